//! Contribution-ledger preparation: exact-duplicate removal and date
//! ordering, run before donor resolution.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::constants::ledger::{DATE_FIELD_PREFIX, DATE_FORMATS};
use crate::row::TableRow;
use crate::types::FieldName;

/// Outcome of one ledger preparation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// Exactly-identical rows removed (first occurrence kept).
    pub removed: usize,
    /// Rows remaining after removal.
    pub kept: usize,
    /// Date column used for ordering, when one was found.
    pub date_field: Option<FieldName>,
}

/// Parse a ledger date against the accepted format list.
pub fn parse_ledger_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// First header starting with `date`, case-insensitively.
pub fn find_date_field<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a FieldName>,
{
    headers
        .into_iter()
        .find(|header| header.trim().to_lowercase().starts_with(DATE_FIELD_PREFIX))
        .map(String::as_str)
}

/// Drop exactly-identical rows, then order by the detected date column.
///
/// Duplicate detection compares full value tuples, so two rows differing
/// in any cell both survive. The sort is stable, and rows with a missing
/// or unparsable date sort to the end in their original relative order.
/// Without a date column the order is left untouched; the report says so
/// via `date_field`.
pub fn prepare_rows(rows: Vec<TableRow>) -> (Vec<TableRow>, PrepareReport) {
    let before = rows.len();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut unique: Vec<TableRow> = Vec::with_capacity(rows.len());
    for row in rows {
        let fingerprint: Vec<String> = row.values().cloned().collect();
        if seen.insert(fingerprint) {
            unique.push(row);
        }
    }
    let removed = before - unique.len();

    let date_field = unique
        .first()
        .and_then(|first| find_date_field(first.keys()))
        .map(|name| name.to_string());
    if let Some(field) = &date_field {
        unique.sort_by_key(|row| {
            row.get(field)
                .and_then(|value| parse_ledger_date(value))
                .unwrap_or(NaiveDate::MAX)
        });
    }

    let report = PrepareReport {
        removed,
        kept: unique.len(),
        date_field,
    };
    (unique, report)
}
