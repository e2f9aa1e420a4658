//! Campaign-level totals reporting.

use crate::amount::strip_currency_strict;
use crate::category::find_amount_field;
use crate::duplicates::TaggedTable;
use crate::types::DisplayName;

/// Total raised for one campaign ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignTotal {
    /// Campaign name (ledger stem).
    pub name: DisplayName,
    /// Summed amount column.
    pub total: f64,
}

/// Sum the amount column of each ledger.
///
/// The column is detected case-insensitively from the first row's
/// headers; a ledger without one (or without rows) totals `0.0`. Values
/// parse with the strict strip only and unparsable cells contribute
/// nothing.
pub fn campaign_totals(ledgers: &[TaggedTable]) -> Vec<CampaignTotal> {
    ledgers
        .iter()
        .map(|ledger| CampaignTotal {
            name: ledger.stem.clone(),
            total: sum_amount_column(ledger),
        })
        .collect()
}

fn sum_amount_column(ledger: &TaggedTable) -> f64 {
    let Some(first) = ledger.rows.first() else {
        return 0.0;
    };
    let Some(field) = find_amount_field(first.keys()) else {
        return 0.0;
    };
    let mut total = 0.0;
    for row in &ledger.rows {
        let raw = row.get(field).map(|value| value.trim()).unwrap_or("");
        if raw.is_empty() {
            continue;
        }
        let cleaned = strip_currency_strict(raw);
        if cleaned.is_empty() {
            continue;
        }
        if let Ok(value) = cleaned.parse::<f64>() {
            total += value;
        }
    }
    total
}

/// Render totals as `name: $1,234` lines, one per ledger, with a
/// trailing newline.
pub fn render_totals_report(totals: &[CampaignTotal]) -> String {
    let mut out = String::new();
    for entry in totals {
        out.push_str(&format!(
            "{}: ${}\n",
            entry.name,
            format_dollars_grouped(entry.total)
        ));
    }
    out
}

/// Round to whole dollars and insert thousands separators.
pub fn format_dollars_grouped(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped_reversed = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(',');
        }
        grouped_reversed.push(ch);
    }
    let grouped: String = grouped_reversed.chars().rev().collect();
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
