//! Donor group merging and the lookup-identifier index.
//!
//! A [`DonorGroup`] is the merge unit for one canonical identity. Groups
//! are built from scratch while scanning one candidate's source rows and
//! discarded with the pass; there is no persisted group store. Creation
//! and observation are distinct steps so that "first seen wins" is a
//! stated policy rather than an artifact of map insertion order.

use indexmap::{IndexMap, IndexSet, map::Entry};
use tracing::debug;

use crate::amount::parse_self_reported;
use crate::canonical::{IdentityKey, canonicalize};
use crate::row::ContributionRow;
use crate::types::LookupId;

/// Merge record for one canonical donor identity.
#[derive(Clone, Debug, PartialEq)]
pub struct DonorGroup {
    /// Trimmed display fields from the first row seen for this key.
    pub display: IdentityKey,
    /// Self-reported contribution total, parsed once at creation. Later
    /// rows with the same key never overwrite it.
    pub self_reported: f64,
    /// Lookup identifiers known to belong to this donor, in first-seen
    /// order. An organization is often reachable under several.
    pub lookup_ids: IndexSet<LookupId>,
}

impl DonorGroup {
    fn create(display: IdentityKey, self_reported_text: &str, lookup_id: &str) -> Self {
        let mut lookup_ids = IndexSet::new();
        lookup_ids.insert(lookup_id.to_string());
        Self {
            display,
            self_reported: parse_self_reported(self_reported_text),
            lookup_ids,
        }
    }

    /// Attach another lookup identifier. Display fields and the
    /// self-reported total are untouched; re-observing a known identifier
    /// is a no-op. Returns true when the identifier was new.
    pub fn observe(&mut self, lookup_id: &str) -> bool {
        self.lookup_ids.insert(lookup_id.to_string())
    }
}

/// Index from lookup identifiers to donor groups for one candidate pass.
#[derive(Debug, Default)]
pub struct DonorGroupIndex {
    groups: IndexMap<IdentityKey, DonorGroup>,
    by_lookup: IndexMap<LookupId, IdentityKey>,
}

impl DonorGroupIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one source row under its lookup identifier.
    ///
    /// First sighting of a key creates its group from this row; later
    /// sightings only grow the group's identifier set. Returns the
    /// canonical key so callers can index by it directly.
    pub fn ingest(&mut self, row: &ContributionRow, lookup_id: &str) -> IdentityKey {
        let key = canonicalize(row);
        match self.groups.entry(key.clone()) {
            Entry::Occupied(mut slot) => {
                if slot.get_mut().observe(lookup_id) {
                    debug!(lookup_id, "merged identifier into existing donor group");
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(DonorGroup::create(key.clone(), &row.self_reported, lookup_id));
            }
        }
        self.by_lookup.insert(lookup_id.to_string(), key.clone());
        key
    }

    /// Canonical key for a known identifier, or `None` when the
    /// identifier was never ingested. Callers skip the observation in
    /// that case; they never fabricate a group.
    pub fn resolve(&self, lookup_id: &str) -> Option<&IdentityKey> {
        self.by_lookup.get(lookup_id)
    }

    /// Group for a canonical key.
    pub fn group(&self, key: &IdentityKey) -> Option<&DonorGroup> {
        self.groups.get(key)
    }

    /// All groups in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = (&IdentityKey, &DonorGroup)> {
        self.groups.iter()
    }

    /// All known lookup identifiers in first-seen order.
    pub fn lookup_ids(&self) -> impl Iterator<Item = &LookupId> {
        self.by_lookup.keys()
    }

    /// Number of donor groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no row has been ingested.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Totals-free run mode: identifier to the distinct display tuples seen
/// under it. Used when self-reported totals are not tracked for a run.
#[derive(Debug, Default)]
pub struct IdentifierRoster {
    entries: IndexMap<LookupId, IndexSet<IdentityKey>>,
}

impl IdentifierRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the row's display tuple under a lookup identifier.
    pub fn ingest(&mut self, row: &ContributionRow, lookup_id: &str) {
        self.entries
            .entry(lookup_id.to_string())
            .or_default()
            .insert(canonicalize(row));
    }

    /// Distinct display tuples seen for an identifier, in first-seen order.
    pub fn display_tuples(&self, lookup_id: &str) -> Option<&IndexSet<IdentityKey>> {
        self.entries.get(lookup_id)
    }

    /// Number of identifiers on the roster.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been ingested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
