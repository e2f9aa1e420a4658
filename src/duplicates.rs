//! Cross-file duplicate donor detection within one candidate's output set.
//!
//! A donor who appears in a partisan table *and* a nominally non-partisan
//! one is the actionable signal here, so the report carries provenance
//! (which file stems) rather than a bare boolean. Matching is amount
//! insensitive: the same donor legitimately gives different amounts to
//! different committees.

use indexmap::{IndexMap, IndexSet};

use crate::amount::{format_amount, strip_currency_strict};
use crate::constants::{fields, output};
use crate::row::TableRow;
use crate::types::{DisplayName, FieldName, FileStem};

/// One party table tagged with its source file stem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedTable {
    /// File stem the rows came from.
    pub stem: FileStem,
    /// Rows of the table, header-keyed.
    pub rows: Vec<TableRow>,
}

impl TaggedTable {
    /// Convenience constructor.
    pub fn new(stem: impl Into<FileStem>, rows: Vec<TableRow>) -> Self {
        Self {
            stem: stem.into(),
            rows,
        }
    }
}

/// One donor identity that recurred across files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateRecord {
    /// Display name from the first-seen row.
    pub display_name: DisplayName,
    /// Self-reported total rendered with a leading `$` (`$0` when absent,
    /// verbatim when unparsable).
    pub self_reported: String,
    /// Sorted, de-duplicated stems of the files containing this identity.
    pub file_stems: Vec<FileStem>,
}

impl DuplicateRecord {
    /// Render the report line: `<display name> $<total> <a/b>`.
    pub fn report_line(&self) -> String {
        format!(
            "{} {} {}",
            self.display_name,
            self.self_reported,
            self.file_stems.join(output::STEM_SEPARATOR)
        )
    }
}

/// Stable list of match fields: the union of each table's headers in
/// first-seen order.
pub fn match_field_union(tables: &[TaggedTable]) -> Vec<FieldName> {
    let mut union = IndexSet::new();
    for table in tables {
        if let Some(first) = table.rows.first() {
            for name in first.keys() {
                union.insert(name.clone());
            }
        }
    }
    union.into_iter().collect()
}

/// Find identity keys appearing in more than one file of a candidate's
/// output set.
///
/// With zero or one input files no duplicate is possible and nothing is
/// scanned. Otherwise rows group by a match key built from every match
/// field except any field whose name equals `amount` case-insensitively;
/// the first-seen row represents a key in the report.
pub fn find_duplicates(tables: &[TaggedTable]) -> Vec<DuplicateRecord> {
    if tables.len() < 2 {
        return Vec::new();
    }
    let match_fields = match_field_union(tables);

    let mut by_key: IndexMap<Vec<(FieldName, String)>, (IndexSet<FileStem>, &TableRow)> =
        IndexMap::new();
    for table in tables {
        for row in &table.rows {
            let key = match_key(row, &match_fields);
            let entry = by_key.entry(key).or_insert_with(|| (IndexSet::new(), row));
            entry.0.insert(table.stem.clone());
        }
    }

    by_key
        .into_values()
        .filter(|(stems, _)| stems.len() > 1)
        .map(|(stems, representative)| {
            let mut file_stems: Vec<FileStem> = stems.into_iter().collect();
            file_stems.sort();
            DuplicateRecord {
                display_name: display_name_from_row(representative),
                self_reported: self_reported_display(representative),
                file_stems,
            }
        })
        .collect()
}

fn match_key(row: &TableRow, match_fields: &[FieldName]) -> Vec<(FieldName, String)> {
    match_fields
        .iter()
        .filter(|name| !name.eq_ignore_ascii_case(fields::AMOUNT))
        .map(|name| {
            let value = row.get(name).map(|value| value.trim()).unwrap_or("");
            (name.clone(), value.to_string())
        })
        .collect()
}

fn display_name_from_row(row: &TableRow) -> DisplayName {
    let first = trimmed(row, fields::FIRST_NAME);
    let last = trimmed(row, fields::LAST_NAME);
    if !first.is_empty() || !last.is_empty() {
        return format!("{first} {last}").trim().to_string();
    }
    trimmed(row, fields::ENTITY_NAME)
}

fn self_reported_display(row: &TableRow) -> String {
    let raw = trimmed(row, fields::DONATIONS_TO_CAMPAIGN);
    if raw.is_empty() {
        return "$0".to_string();
    }
    let cleaned = strip_currency_strict(&raw);
    match cleaned.parse::<f64>() {
        Ok(value) => format!("${}", format_amount(value)),
        Err(_) => raw,
    }
}

fn trimmed(row: &TableRow, field: &str) -> String {
    row.get(field)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
