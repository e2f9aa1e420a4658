//! Coarse party-category bucketing and per-candidate percentage splits.
//!
//! Raw party labels and file stems are free text; once a stem is
//! categorized it never serves as a key again. Raw labels survive only in
//! display output.

use serde::{Deserialize, Serialize};

use crate::amount::parse_cell_amount;
use crate::constants::{categories, fields};
use crate::duplicates::TaggedTable;
use crate::row::TableRow;
use crate::types::{DisplayName, FieldName};
use crate::utils::format_candidate_name;

/// One of the four coarse political buckets used for split reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyCategory {
    /// Republican committees and their variants.
    Republican,
    /// Democratic committees and their variants.
    Democratic,
    /// Everything that matches no other rule.
    ThirdParty,
    /// Nominally non-partisan committees.
    Nonpartisan,
}

/// All categories in splits-table column order.
pub const ALL_CATEGORIES: [PartyCategory; 4] = [
    PartyCategory::Republican,
    PartyCategory::Democratic,
    PartyCategory::ThirdParty,
    PartyCategory::Nonpartisan,
];

impl PartyCategory {
    /// Splits-table column name for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            PartyCategory::Republican => "republican",
            PartyCategory::Democratic => "democratic",
            PartyCategory::ThirdParty => "thirdParty",
            PartyCategory::Nonpartisan => "nonpartisan",
        }
    }
}

/// Bucket a file stem into a category.
///
/// Case-insensitive substring rules in fixed priority order; a stem
/// matching several rules takes the first. Unrecognized stems fall into
/// the third-party bucket.
pub fn categorize(stem: &str) -> PartyCategory {
    let lowered = stem.to_lowercase();
    if lowered.contains(categories::REPUBLICAN_MARKER) {
        return PartyCategory::Republican;
    }
    if lowered.contains(categories::DEMOCRATIC_MARKER) {
        return PartyCategory::Democratic;
    }
    if categories::NONPARTISAN_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return PartyCategory::Nonpartisan;
    }
    PartyCategory::ThirdParty
}

/// First header containing `donat`, case-insensitively.
pub fn find_donation_field<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a FieldName>,
{
    headers
        .into_iter()
        .find(|header| header.to_lowercase().contains(fields::DONATION_MARKER))
        .map(String::as_str)
}

/// First header containing `amount`, case-insensitively.
pub fn find_amount_field<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a FieldName>,
{
    headers
        .into_iter()
        .find(|header| header.to_lowercase().contains(fields::AMOUNT_MARKER))
        .map(String::as_str)
}

/// Sum a table's preferred dollar column.
///
/// The self-reported donations column wins when present, otherwise the
/// accumulated amount column; with neither the sum is `0.0`. Each value
/// parses through the two-stage cell parser, so junk contributes zero
/// without aborting the table.
pub fn sum_preferred_amount(rows: &[TableRow]) -> f64 {
    let Some(first) = rows.first() else {
        return 0.0;
    };
    let Some(field) = find_donation_field(first.keys()).or_else(|| find_amount_field(first.keys()))
    else {
        return 0.0;
    };
    rows.iter()
        .map(|row| parse_cell_amount(row.get(field).map(String::as_str).unwrap_or("")))
        .sum()
}

/// Per-category dollar sums for one candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CategoryTotals {
    /// Republican-bucket dollars.
    pub republican: f64,
    /// Democratic-bucket dollars.
    pub democratic: f64,
    /// Third-party-bucket dollars.
    pub third_party: f64,
    /// Nonpartisan-bucket dollars.
    pub nonpartisan: f64,
}

impl CategoryTotals {
    /// Add dollars to one category's sum.
    pub fn add(&mut self, category: PartyCategory, amount: f64) {
        match category {
            PartyCategory::Republican => self.republican += amount,
            PartyCategory::Democratic => self.democratic += amount,
            PartyCategory::ThirdParty => self.third_party += amount,
            PartyCategory::Nonpartisan => self.nonpartisan += amount,
        }
    }

    /// Grand total across the four categories.
    pub fn total(&self) -> f64 {
        self.republican + self.democratic + self.third_party + self.nonpartisan
    }
}

/// Percentage-of-total giving per category for one candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSplit {
    /// Candidate display name.
    pub candidate: DisplayName,
    /// Republican percentage of the grand total.
    pub republican: f64,
    /// Democratic percentage of the grand total.
    pub democratic: f64,
    /// Third-party percentage of the grand total.
    pub third_party: f64,
    /// Nonpartisan percentage of the grand total.
    pub nonpartisan: f64,
}

impl CandidateSplit {
    /// Render as a splits-table record with two-decimal percentages.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.candidate.clone(),
            format!("{:.2}", self.republican),
            format!("{:.2}", self.democratic),
            format!("{:.2}", self.third_party),
            format!("{:.2}", self.nonpartisan),
        ]
    }
}

/// Compute the per-category percentage split for one candidate's tables.
///
/// Category sums start at `0.0`; a grand total of zero (or less, if every
/// value was negative junk) forces all four percentages to `0.0` instead
/// of dividing by zero.
pub fn compute_splits(candidate_id: &str, tables: &[TaggedTable]) -> CandidateSplit {
    let mut sums = CategoryTotals::default();
    for table in tables {
        sums.add(categorize(&table.stem), sum_preferred_amount(&table.rows));
    }
    let total = sums.total();
    let percent = |part: f64| {
        if total <= 0.0 {
            0.0
        } else {
            part / total * 100.0
        }
    };
    CandidateSplit {
        candidate: format_candidate_name(candidate_id),
        republican: percent(sums.republican),
        democratic: percent(sums.democratic),
        third_party: percent(sums.third_party),
        nonpartisan: percent(sums.nonpartisan),
    }
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
    fn categorize_follows_priority_order() {
        assert_eq!(categorize("republican"), PartyCategory::Republican);
        assert_eq!(
            categorize("GOP-republican-central"),
            PartyCategory::Republican
        );
        assert_eq!(categorize("democratic-party"), PartyCategory::Democratic);
        assert_eq!(categorize("nonpartisan-judges"), PartyCategory::Nonpartisan);
        assert_eq!(categorize("no-party-preference"), PartyCategory::Nonpartisan);
        assert_eq!(categorize("libertarian"), PartyCategory::ThirdParty);
        // A stem matching several rules takes the first matching category.
        assert_eq!(
            categorize("republican-nonpartisan"),
            PartyCategory::Republican
        );
        assert_eq!(
            categorize("union-democratic"),
            PartyCategory::Democratic
        );
    }

    #[test]
    fn field_detection_prefers_donations_over_amount() {
        let headers: Vec<FieldName> = ["entityName", "amount", "donationsToCampaign"]
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(find_donation_field(&headers), Some("donationsToCampaign"));
        assert_eq!(find_amount_field(&headers), Some("amount"));
        let bare: Vec<FieldName> = vec!["entityName".to_string()];
        assert_eq!(find_donation_field(&bare), None);
    }

    #[test]
    fn sum_preferred_amount_uses_the_detected_column() {
        let rows = vec![
            row(&[("amount", "100"), ("donationsToCampaign", "10")]),
            row(&[("amount", "200"), ("donationsToCampaign", "junk")]),
        ];
        // donationsToCampaign wins; the junk value contributes zero.
        assert_eq!(sum_preferred_amount(&rows), 10.0);

        let amount_only = vec![row(&[("amount", "$1,500.50")])];
        assert_eq!(sum_preferred_amount(&amount_only), 1500.50);
        assert_eq!(sum_preferred_amount(&[]), 0.0);
        assert_eq!(sum_preferred_amount(&[row(&[("city", "Helena")])]), 0.0);
    }

    #[test]
    fn splits_report_full_percentages() {
        let tables = vec![
            TaggedTable::new("republican", vec![row(&[("amount", "100")])]),
            TaggedTable::new("democratic", vec![]),
        ];
        let split = compute_splits("jo-doe", &tables);
        assert_eq!(split.candidate, "Jo Doe");
        assert_eq!(split.republican, 100.0);
        assert_eq!(split.democratic, 0.0);
        assert_eq!(split.third_party, 0.0);
        assert_eq!(split.nonpartisan, 0.0);
        assert_eq!(
            split.to_record(),
            vec!["Jo Doe", "100.00", "0.00", "0.00", "0.00"]
        );
    }

    #[test]
    fn zero_totals_never_divide() {
        let split = compute_splits("jo-doe", &[]);
        assert_eq!(
            split.to_record(),
            vec!["Jo Doe", "0.00", "0.00", "0.00", "0.00"]
        );
    }

    #[test]
    fn stems_of_one_category_sum_together() {
        let tables = vec![
            TaggedTable::new("republican", vec![row(&[("amount", "75")])]),
            TaggedTable::new("republican-central", vec![row(&[("amount", "25")])]),
            TaggedTable::new("nonpartisan", vec![row(&[("amount", "100")])]),
        ];
        let split = compute_splits("jo", &tables);
        assert_eq!(split.republican, 50.0);
        assert_eq!(split.nonpartisan, 50.0);
    }
}
