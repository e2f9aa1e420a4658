//! Canonical donor identity keys.

use serde::{Deserialize, Serialize};

use crate::row::ContributionRow;
use crate::types::DisplayName;

/// Normalized tuple uniquely identifying one presumed donor within a run.
///
/// Fields are trimmed but otherwise exactly as cased in the source. Two
/// rows with identical tuples denote the same donor; two real people with
/// identical name, city, and state are therefore merged silently. That is
/// an accepted heuristic limit of exact matching, not a bug to fix here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    /// Organization name, or empty.
    pub entity_name: String,
    /// Person first name, or empty.
    pub first_name: String,
    /// Person middle initial, or empty.
    pub middle_initial: String,
    /// Person last name, or empty.
    pub last_name: String,
    /// Donor city, or empty.
    pub city: String,
    /// Donor state, or empty.
    pub state: String,
}

/// Derive the canonical identity key for a contribution row.
///
/// Pure and total: trims each of the six identity fields and nothing
/// else. No case folding, no punctuation stripping, no inner-whitespace
/// collapsing. Returns a key even when every field is empty; callers must
/// reject anonymous keys rather than fabricate an identity for them.
pub fn canonicalize(row: &ContributionRow) -> IdentityKey {
    IdentityKey {
        entity_name: row.entity_name.trim().to_string(),
        first_name: row.first_name.trim().to_string(),
        middle_initial: row.middle_initial.trim().to_string(),
        last_name: row.last_name.trim().to_string(),
        city: row.city.trim().to_string(),
        state: row.state.trim().to_string(),
    }
}

impl IdentityKey {
    /// True when every identity field is empty.
    pub fn is_anonymous(&self) -> bool {
        self.entity_name.is_empty()
            && self.first_name.is_empty()
            && self.middle_initial.is_empty()
            && self.last_name.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
    }

    /// Person name when present, else the entity name.
    pub fn display_name(&self) -> DisplayName {
        if !self.first_name.is_empty() || !self.last_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        } else {
            self.entity_name.clone()
        }
    }
}
