//! The per-candidate processing pass.
//!
//! One pass rebuilds everything from its source rows: donor groups,
//! lookup observations, per-party tables. Nothing survives the pass and
//! a rerun fully recomputes; overlapping identifiers across candidates
//! are re-fetched rather than cached, which keeps the run model trivially
//! idempotent at the cost of repeat lookups.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::accumulate::{ObservationStats, OutputRow, PartyAccumulator, party_file_stem};
use crate::canonical::canonicalize;
use crate::config::PipelineConfig;
use crate::duplicates::TaggedTable;
use crate::group::DonorGroupIndex;
use crate::ledger::prepare_rows;
use crate::lookup::{LookupClient, RequestPacer};
use crate::row::{ContributionRow, FieldAliases, TableRow, shape_rows};
use crate::types::{CandidateId, FileStem, LookupId};

/// Aggregated output of one candidate pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateOutput {
    /// Candidate this pass processed.
    pub candidate: CandidateId,
    /// Per-party output rows keyed by file stem, each table sorted by
    /// accumulated amount descending.
    pub tables: IndexMap<FileStem, Vec<OutputRow>>,
    /// Observation discard counters for the pass.
    pub stats: ObservationStats,
    /// Donor groups built from the source rows.
    pub donor_groups: usize,
    /// Lookup identifiers actually fetched.
    pub identifiers: usize,
    /// Source rows skipped for lacking an identifier or any identity.
    pub rows_skipped: usize,
}

impl CandidateOutput {
    /// Render the tables for downstream duplicate detection, partisan
    /// dedupe, and split computation.
    pub fn tagged_tables(&self) -> Vec<TaggedTable> {
        self.tables
            .iter()
            .map(|(stem, rows)| {
                TaggedTable::new(
                    stem.clone(),
                    rows.iter().map(OutputRow::to_table_row).collect(),
                )
            })
            .collect()
    }
}

/// Run one candidate pass over already-shaped contribution rows.
///
/// Rows without a lookup identifier or without any identity field are
/// skipped and counted. Each surviving identifier is fetched exactly
/// once through the paced client; a failed lookup is logged and treated
/// as "no party observations for this identifier" so one bad fetch never
/// aborts the batch.
pub fn run_candidate_pass(
    candidate: &str,
    rows: &[ContributionRow],
    client: &dyn LookupClient,
    config: &PipelineConfig,
) -> CandidateOutput {
    let mut index = DonorGroupIndex::new();
    let mut rows_skipped = 0;
    for row in rows {
        let lookup_id = row.lookup_id.trim();
        if lookup_id.is_empty() || canonicalize(row).is_anonymous() {
            rows_skipped += 1;
            continue;
        }
        index.ingest(row, lookup_id);
    }
    debug!(
        candidate,
        groups = index.len(),
        rows_skipped,
        "built donor group index"
    );

    let mut identifiers: Vec<LookupId> = index.lookup_ids().cloned().collect();
    if config.lookup_limit > 0 {
        identifiers.truncate(config.lookup_limit);
    }

    let mut pacer = RequestPacer::new(config.min_request_interval);
    let mut accumulator = PartyAccumulator::new();
    for lookup_id in &identifiers {
        pacer.pause();
        match client.fetch(lookup_id) {
            Ok(response) => {
                let observations = response.observations(lookup_id);
                accumulator.record_all(&index, &observations);
            }
            Err(error) => warn!(
                lookup_id = lookup_id.as_str(),
                %error,
                "lookup failed; treating as no party observations"
            ),
        }
    }

    let (table, stats) = accumulator.into_table();
    let mut tables = IndexMap::new();
    for party in table.party_labels() {
        tables.insert(party_file_stem(party), table.rows_for(party, &index));
    }

    CandidateOutput {
        candidate: candidate.to_string(),
        tables,
        stats,
        donor_groups: index.len(),
        identifiers: identifiers.len(),
        rows_skipped,
    }
}

/// Run one candidate pass starting from raw header-keyed rows.
///
/// Prepares the ledger first (exact-duplicate removal, date ordering),
/// then resolves headers through the alias table and runs the pass.
pub fn run_candidate_pass_from_table(
    candidate: &str,
    raw_rows: Vec<TableRow>,
    aliases: &FieldAliases,
    client: &dyn LookupClient,
    config: &PipelineConfig,
) -> CandidateOutput {
    let (prepared, report) = prepare_rows(raw_rows);
    debug!(
        candidate,
        removed = report.removed,
        kept = report.kept,
        "prepared contribution ledger"
    );
    let rows = shape_rows(aliases, &prepared);
    run_candidate_pass(candidate, &rows, client, config)
}
