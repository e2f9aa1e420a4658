//! Removal of known-partisan donors from non-partisan tables.
//!
//! Distinct from cross-file duplicate *reporting*: here the goal is to
//! collapse a donor already attributed to the republican or democratic
//! table out of the nonpartisan and third-party tables. The match key
//! therefore *includes* the normalized self-reported total as a
//! disambiguator (two different people sharing a name are unlikely to
//! also share a total), where the duplicate report excludes amount-like
//! fields entirely.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::category::{PartyCategory, categorize};
use crate::constants::{fields, output};
use crate::duplicates::TaggedTable;
use crate::row::TableRow;
use crate::types::FileStem;
use crate::utils::normalize_name;

/// Normalized identity-plus-total key for partisan dedupe.
pub type PartisanKey = Vec<String>;

/// Removal counts for one rewritten table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DedupeReport {
    /// Rows removed because their key matched a partisan donor.
    pub removed: usize,
    /// Rows kept.
    pub kept: usize,
}

/// Normalize a self-reported total for key construction.
///
/// Strips a leading `$` and commas, then renders integers without the
/// trailing `.0`. Unparsable text is kept lowercased so two rows carrying
/// the same garbage still match each other.
pub fn normalize_total_text(raw: &str) -> String {
    let stripped = raw.trim().trim_start_matches('$').replace(',', "");
    match stripped.parse::<f64>() {
        Ok(value) if value.trunc() == value && value.is_finite() => {
            format!("{}", value as i64)
        }
        Ok(value) => format!("{value}"),
        Err(_) => stripped.to_lowercase(),
    }
}

/// Build the match key for one output row.
///
/// Prefers the entity name when present; otherwise keys on first/last
/// name. Returns `None` for rows carrying no identity and no total,
/// which can never be deduplicated.
pub fn partisan_match_key(row: &TableRow) -> Option<PartisanKey> {
    let entity = field_any(row, &[fields::ENTITY_NAME, "EntityName"]);
    let donation = normalize_total_text(field_any(
        row,
        &[fields::DONATIONS_TO_CAMPAIGN, "donation", fields::AMOUNT],
    ));
    if !entity.is_empty() {
        return Some(vec![normalize_name(entity), donation]);
    }
    let first = field_any(row, &[fields::FIRST_NAME, "FirstName"]);
    let last = field_any(row, &[fields::LAST_NAME, "LastName"]);
    if !first.is_empty() || !last.is_empty() || !donation.is_empty() {
        return Some(vec![normalize_name(first), normalize_name(last), donation]);
    }
    None
}

/// Collect the match keys of every row in the republican and democratic
/// tables of a candidate's output set.
pub fn collect_partisan_keys(tables: &[TaggedTable]) -> HashSet<PartisanKey> {
    let mut keys = HashSet::new();
    for table in tables {
        if !output::PARTISAN_STEMS.contains(&table.stem.as_str()) {
            continue;
        }
        for row in &table.rows {
            if let Some(key) = partisan_match_key(row) {
                keys.insert(key);
            }
        }
    }
    keys
}

/// Remove rows matching a known-partisan key, in place.
pub fn strip_known_partisans(
    rows: &mut Vec<TableRow>,
    keys: &HashSet<PartisanKey>,
) -> DedupeReport {
    let before = rows.len();
    rows.retain(|row| {
        partisan_match_key(row)
            .map(|key| !keys.contains(&key))
            .unwrap_or(true)
    });
    DedupeReport {
        removed: before - rows.len(),
        kept: rows.len(),
    }
}

/// Rewrite a candidate's nonpartisan and third-party tables, removing
/// donors that already appear in its republican or democratic table.
///
/// Returns per-stem removal reports for the tables that were scanned.
/// With no partisan rows to match against, nothing is touched.
pub fn dedupe_candidate_tables(tables: &mut [TaggedTable]) -> IndexMap<FileStem, DedupeReport> {
    let keys = collect_partisan_keys(tables);
    let mut reports = IndexMap::new();
    if keys.is_empty() {
        return reports;
    }
    for table in tables.iter_mut() {
        match categorize(&table.stem) {
            PartyCategory::Nonpartisan | PartyCategory::ThirdParty => {
                let report = strip_known_partisans(&mut table.rows, &keys);
                reports.insert(table.stem.clone(), report);
            }
            PartyCategory::Republican | PartyCategory::Democratic => {}
        }
    }
    reports
}

// Empty values fall through to the next spelling.
fn field_any<'a>(row: &'a TableRow, names: &[&str]) -> &'a str {
    names
        .iter()
        .filter_map(|name| row.get(*name))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> TableRow {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn normalize_total_text_drops_trailing_zero_decimals() {
        assert_eq!(normalize_total_text("$1,500.00"), "1500");
        assert_eq!(normalize_total_text("15.5"), "15.5");
        assert_eq!(normalize_total_text(""), "");
        assert_eq!(normalize_total_text("N/A"), "n/a");
    }

    #[test]
    fn entity_keys_beat_person_keys() {
        let key = partisan_match_key(&row(&[
            ("entityName", " Acme  PAC "),
            ("firstName", "Mike"),
            ("lastName", "Nelson"),
            ("donationsToCampaign", "$250"),
        ]))
        .expect("key");
        assert_eq!(key, vec!["acme pac".to_string(), "250".to_string()]);
    }

    #[test]
    fn person_keys_use_first_last_and_total() {
        let key = partisan_match_key(&row(&[
            ("firstName", "Mike"),
            ("lastName", "Nelson"),
            ("donationsToCampaign", "250.00"),
        ]))
        .expect("key");
        assert_eq!(
            key,
            vec!["mike".to_string(), "nelson".to_string(), "250".to_string()]
        );
        assert!(partisan_match_key(&row(&[("city", "Helena")])).is_none());
    }

    #[test]
    fn dedupe_rewrites_only_nonpartisan_and_third_party_tables() {
        let partisan_row = row(&[
            ("entityName", "Acme PAC"),
            ("donationsToCampaign", "250"),
        ]);
        let other_row = row(&[
            ("entityName", "Bravo Fund"),
            ("donationsToCampaign", "90"),
        ]);
        let mut tables = vec![
            TaggedTable::new("republican", vec![partisan_row.clone()]),
            TaggedTable::new("nonpartisan", vec![partisan_row.clone(), other_row.clone()]),
            TaggedTable::new("libertarian", vec![partisan_row.clone()]),
        ];
        let reports = dedupe_candidate_tables(&mut tables);
        assert_eq!(
            reports["nonpartisan"],
            DedupeReport {
                removed: 1,
                kept: 1
            }
        );
        assert_eq!(
            reports["libertarian"],
            DedupeReport {
                removed: 1,
                kept: 0
            }
        );
        // The partisan source table itself is never rewritten.
        assert_eq!(tables[0].rows.len(), 1);
        assert_eq!(tables[1].rows, vec![other_row]);
    }

    #[test]
    fn no_partisan_tables_means_no_rewrites() {
        let mut tables = vec![TaggedTable::new(
            "nonpartisan",
            vec![row(&[("entityName", "Acme PAC")])],
        )];
        assert!(dedupe_candidate_tables(&mut tables).is_empty());
        assert_eq!(tables[0].rows.len(), 1);
    }

    #[test]
    fn totals_disambiguate_same_name_donors() {
        let mut tables = vec![
            TaggedTable::new(
                "democratic",
                vec![row(&[
                    ("firstName", "Jo"),
                    ("lastName", "Doe"),
                    ("donationsToCampaign", "100"),
                ])],
            ),
            TaggedTable::new(
                "nonpartisan",
                vec![
                    row(&[
                        ("firstName", "Jo"),
                        ("lastName", "Doe"),
                        ("donationsToCampaign", "100"),
                    ]),
                    row(&[
                        ("firstName", "Jo"),
                        ("lastName", "Doe"),
                        ("donationsToCampaign", "550"),
                    ]),
                ],
            ),
        ];
        let reports = dedupe_candidate_tables(&mut tables);
        // Same name, different total: the second Jo Doe survives.
        assert_eq!(
            reports["nonpartisan"],
            DedupeReport {
                removed: 1,
                kept: 1
            }
        );
    }
}
