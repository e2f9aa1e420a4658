//! Normalized contribution-row shape and per-file header resolution.
//!
//! Source ledgers spell their headers inconsistently (`First Name`,
//! `FirstName`, `firstName`). Instead of consulting fallback spellings on
//! every access, [`FieldAliases`] is resolved against a file's header
//! exactly once, producing a [`RowShape`] that maps canonical fields to
//! that file's actual column names. All core logic then runs on
//! [`ContributionRow`] values and never sees raw headers again.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{AmountText, FieldName, LookupId};

/// One data row of a tabular input or output, keyed by column name in
/// header order.
pub type TableRow = IndexMap<FieldName, String>;

/// One contribution record in canonical field shape.
///
/// Every field is already trimmed; empty strings mean "not present",
/// never `None`. At most one of `entity_name` / person-name fields is
/// semantically primary, but both may be populated when an organization's
/// officer is listed alongside it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRow {
    /// Organization name, when the donor is an entity.
    pub entity_name: String,
    /// Person first name, when the donor is an individual.
    pub first_name: String,
    /// Person middle initial.
    pub middle_initial: String,
    /// Person last name.
    pub last_name: String,
    /// Donor city.
    pub city: String,
    /// Donor state.
    pub state: String,
    /// External lookup-service identifier for this row, when known.
    pub lookup_id: LookupId,
    /// Self-reported contribution total as currency text.
    pub self_reported: AmountText,
}

/// Accepted header spellings for each canonical field.
///
/// Matching is forgiving: headers and aliases are compared after
/// lowercasing and dropping non-alphanumerics, so `First Name`,
/// `FirstName`, and `first_name` all resolve to the same field. The
/// default table lists the spellings observed in real exports.
#[derive(Clone, Debug)]
pub struct FieldAliases {
    entity_name: Vec<&'static str>,
    first_name: Vec<&'static str>,
    middle_initial: Vec<&'static str>,
    last_name: Vec<&'static str>,
    city: Vec<&'static str>,
    state: Vec<&'static str>,
    lookup_id: Vec<&'static str>,
    self_reported: Vec<&'static str>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            entity_name: vec!["entityName", "Entity Name"],
            first_name: vec!["firstName", "First Name"],
            middle_initial: vec!["middleInitial", "Middle Initial"],
            last_name: vec!["lastName", "Last Name"],
            city: vec!["city"],
            state: vec!["state"],
            lookup_id: vec!["eid"],
            self_reported: vec!["donationsToCampaign", "donation"],
        }
    }
}

impl FieldAliases {
    /// Resolve a file's header into a reusable [`RowShape`].
    ///
    /// Consulted once per input file; the returned shape remembers which
    /// source column feeds each canonical field. Fields with no matching
    /// column stay unmapped and extract as empty strings.
    pub fn resolve(&self, headers: &[FieldName]) -> RowShape {
        RowShape {
            entity_name: self.find(headers, &self.entity_name),
            first_name: self.find(headers, &self.first_name),
            middle_initial: self.find(headers, &self.middle_initial),
            last_name: self.find(headers, &self.last_name),
            city: self.find(headers, &self.city),
            state: self.find(headers, &self.state),
            lookup_id: self.find(headers, &self.lookup_id),
            self_reported: self.find(headers, &self.self_reported),
        }
    }

    fn find(&self, headers: &[FieldName], aliases: &[&'static str]) -> Option<FieldName> {
        for alias in aliases {
            let wanted = fold_header(alias);
            if let Some(header) = headers.iter().find(|header| fold_header(header) == wanted) {
                return Some(header.clone());
            }
        }
        None
    }
}

/// Lowercase a header and drop everything but ASCII alphanumerics.
fn fold_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// A resolved mapping from canonical fields to one file's column names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowShape {
    entity_name: Option<FieldName>,
    first_name: Option<FieldName>,
    middle_initial: Option<FieldName>,
    last_name: Option<FieldName>,
    city: Option<FieldName>,
    state: Option<FieldName>,
    lookup_id: Option<FieldName>,
    self_reported: Option<FieldName>,
}

impl RowShape {
    /// Extract a trimmed [`ContributionRow`] from one raw table row.
    pub fn extract(&self, raw: &TableRow) -> ContributionRow {
        ContributionRow {
            entity_name: self.value(raw, &self.entity_name),
            first_name: self.value(raw, &self.first_name),
            middle_initial: self.value(raw, &self.middle_initial),
            last_name: self.value(raw, &self.last_name),
            city: self.value(raw, &self.city),
            state: self.value(raw, &self.state),
            lookup_id: self.value(raw, &self.lookup_id),
            self_reported: self.value(raw, &self.self_reported),
        }
    }

    fn value(&self, raw: &TableRow, column: &Option<FieldName>) -> String {
        column
            .as_ref()
            .and_then(|name| raw.get(name))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}

/// Resolve headers and extract every row of one file in a single call.
pub fn shape_rows(aliases: &FieldAliases, rows: &[TableRow]) -> Vec<ContributionRow> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let headers: Vec<FieldName> = first.keys().cloned().collect();
    let shape = aliases.resolve(&headers);
    rows.iter().map(|raw| shape.extract(raw)).collect()
}
