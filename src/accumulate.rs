//! Per-party accumulation of lookup observations into donor cells.

use indexmap::IndexMap;
use tracing::debug;

use crate::amount::{format_amount, parse_observed};
use crate::canonical::IdentityKey;
use crate::constants::fields;
use crate::group::DonorGroupIndex;
use crate::lookup::PartyObservation;
use crate::row::TableRow;
use crate::types::{FileStem, PartyLabel};

/// Discard counters for one accumulation pass.
///
/// Discards are expected and common — an entity with no giving history in
/// a period simply has no party record — so they are counted rather than
/// treated as errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObservationStats {
    /// Observations added to a cell.
    pub recorded: usize,
    /// Observations dropped for an empty party label.
    pub missing_party: usize,
    /// Observations dropped for a zero, negative, or unparsable amount.
    pub non_positive: usize,
    /// Observations dropped because the identifier was never ingested.
    pub unresolved: usize,
}

/// Accumulates (party, donor) dollar cells for one candidate pass.
#[derive(Debug, Default)]
pub struct PartyAccumulator {
    cells: IndexMap<PartyLabel, IndexMap<IdentityKey, f64>>,
    stats: ObservationStats,
}

impl PartyAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation; returns true when it landed in a cell.
    ///
    /// The observation is discarded when the party label is empty, the
    /// amount parses non-positive, or the identifier does not resolve.
    /// All identifiers of a merged group share one cell per party, and a
    /// cell starts at `0.0` the first time its pair is seen, so repeated
    /// calls sum correctly.
    pub fn record(&mut self, index: &DonorGroupIndex, observation: &PartyObservation) -> bool {
        if observation.party.is_empty() {
            self.stats.missing_party += 1;
            return false;
        }
        let amount = parse_observed(&observation.amount);
        if amount <= 0.0 {
            self.stats.non_positive += 1;
            return false;
        }
        let Some(key) = index.resolve(&observation.lookup_id) else {
            debug!(
                lookup_id = observation.lookup_id.as_str(),
                "discarding observation for unknown identifier"
            );
            self.stats.unresolved += 1;
            return false;
        };
        *self
            .cells
            .entry(observation.party.clone())
            .or_default()
            .entry(key.clone())
            .or_insert(0.0) += amount;
        self.stats.recorded += 1;
        true
    }

    /// Record a batch of observations in order.
    pub fn record_all(&mut self, index: &DonorGroupIndex, observations: &[PartyObservation]) {
        for observation in observations {
            self.record(index, observation);
        }
    }

    /// Discard counters so far.
    pub fn stats(&self) -> &ObservationStats {
        &self.stats
    }

    /// Finish the pass and hand over the accumulated table.
    pub fn into_table(self) -> (PartyTotalsTable, ObservationStats) {
        (PartyTotalsTable { cells: self.cells }, self.stats)
    }
}

/// Accumulated per-party, per-donor dollar totals for one candidate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartyTotalsTable {
    cells: IndexMap<PartyLabel, IndexMap<IdentityKey, f64>>,
}

impl PartyTotalsTable {
    /// True when no observation was recorded.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Party labels in first-recorded order.
    pub fn party_labels(&self) -> impl Iterator<Item = &PartyLabel> {
        self.cells.keys()
    }

    /// Accumulated amount for one (party, donor) cell.
    pub fn cell(&self, party: &str, key: &IdentityKey) -> Option<f64> {
        self.cells.get(party).and_then(|donors| donors.get(key)).copied()
    }

    /// Output rows for one party, sorted by accumulated amount descending.
    ///
    /// Ties keep first-recorded order (stable sort). Display fields and
    /// the self-reported total come from the donor group index.
    pub fn rows_for(&self, party: &str, index: &DonorGroupIndex) -> Vec<OutputRow> {
        let Some(donors) = self.cells.get(party) else {
            return Vec::new();
        };
        let mut entries: Vec<(&IdentityKey, f64)> =
            donors.iter().map(|(key, amount)| (key, *amount)).collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
            .into_iter()
            .map(|(key, amount)| {
                let self_reported = index
                    .group(key)
                    .map(|group| group.self_reported)
                    .unwrap_or(0.0);
                OutputRow {
                    entity_name: key.entity_name.clone(),
                    first_name: key.first_name.clone(),
                    last_name: key.last_name.clone(),
                    amount: format_amount(amount),
                    self_reported: format_amount(self_reported),
                }
            })
            .collect()
    }
}

/// One rendered row of a per-party candidate table.
///
/// Dollar values are already formatted under the shared emission rule
/// because downstream duplicate matching compares the formatted strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRow {
    /// Organization name, or empty.
    pub entity_name: String,
    /// Person first name, or empty.
    pub first_name: String,
    /// Person last name, or empty.
    pub last_name: String,
    /// Accumulated per-party amount, formatted.
    pub amount: String,
    /// Self-reported contribution total, formatted.
    pub self_reported: String,
}

impl OutputRow {
    /// Render as a header-keyed table row.
    pub fn to_table_row(&self) -> TableRow {
        let mut row = TableRow::new();
        row.insert(fields::ENTITY_NAME.to_string(), self.entity_name.clone());
        row.insert(fields::FIRST_NAME.to_string(), self.first_name.clone());
        row.insert(fields::LAST_NAME.to_string(), self.last_name.clone());
        row.insert(fields::AMOUNT.to_string(), self.amount.clone());
        row.insert(
            fields::DONATIONS_TO_CAMPAIGN.to_string(),
            self.self_reported.clone(),
        );
        row
    }
}

/// Output file stem for a raw party label (`Republican Party` becomes
/// `republican-party`).
pub fn party_file_stem(party: &str) -> FileStem {
    party.to_lowercase().replace(' ', "-")
}
