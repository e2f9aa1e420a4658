//! Currency-text parsing stages and the shared dollar formatting rule.
//!
//! Amount parsing is deliberately forgiving: source ledgers and lookup
//! responses render dollars inconsistently (`$1,500.00`, `250`, `1'250`),
//! and a malformed value must degrade to `0.0` rather than abort a batch.
//! Each stage is named and independently testable instead of being buried
//! in nested fallbacks.

/// Keep digits, dot, minus, and apostrophe; drop everything else.
///
/// First-attempt strip for table cells. The apostrophe survives because
/// some exports use it as a thousands separator; when it makes the value
/// unparsable, [`strip_currency_strict`] is the fallback.
pub fn strip_currency_lenient(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-' | '\''))
        .collect()
}

/// Keep digits, dot, and minus; drop everything else.
pub fn strip_currency_strict(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
        .collect()
}

/// Parse a self-reported contribution total from currency text.
///
/// Strict strip only; empty or unparsable values become `0.0`. Used once
/// per donor group at creation time, so a bad value shows up as a visible
/// zero rather than poisoning the group.
pub fn parse_self_reported(raw: &str) -> f64 {
    let cleaned = strip_currency_strict(raw.trim());
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse().unwrap_or(0.0)
}

/// Parse a lookup-response dollar amount.
///
/// The service renders plain numbers with comma grouping, so only commas
/// are stripped before parsing. Unparsable values become `0.0`, which the
/// accumulator then discards as non-positive.
pub fn parse_observed(raw: &str) -> f64 {
    raw.trim().replace(',', "").parse().unwrap_or(0.0)
}

/// Parse a table cell amount: lenient strip first, strict strip as fallback.
///
/// Unparsable values contribute `0.0` without aborting the surrounding sum.
pub fn parse_cell_amount(raw: &str) -> f64 {
    let value = raw.trim();
    if value.is_empty() {
        return 0.0;
    }
    let lenient = strip_currency_lenient(value);
    if !lenient.is_empty()
        && let Ok(parsed) = lenient.parse::<f64>()
    {
        return parsed;
    }
    let strict = strip_currency_strict(value);
    if strict.is_empty() {
        return 0.0;
    }
    strict.parse().unwrap_or(0.0)
}

/// Format a dollar value: integers without decimals, otherwise two places.
///
/// Downstream duplicate matching compares formatted strings, so this rule
/// must hold everywhere a dollar value is emitted. `-0.0` renders as `0`.
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.trunc() == value {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_stages_differ_only_on_apostrophes() {
        assert_eq!(strip_currency_lenient("$1,500.25"), "1500.25");
        assert_eq!(strip_currency_strict("$1,500.25"), "1500.25");
        assert_eq!(strip_currency_lenient("1'500"), "1'500");
        assert_eq!(strip_currency_strict("1'500"), "1500");
    }

    #[test]
    fn parse_self_reported_is_strict_and_total() {
        assert_eq!(parse_self_reported("$2,500.00"), 2500.0);
        assert_eq!(parse_self_reported(""), 0.0);
        assert_eq!(parse_self_reported("n/a"), 0.0);
        assert_eq!(parse_self_reported("  -35.10 "), -35.10);
        // Strips leave multiple dots behind; unparsable falls to zero.
        assert_eq!(parse_self_reported("1.2.3"), 0.0);
    }

    #[test]
    fn parse_observed_strips_commas_only() {
        assert_eq!(parse_observed("1,500"), 1500.0);
        assert_eq!(parse_observed("100.00"), 100.0);
        assert_eq!(parse_observed("$100"), 0.0);
        assert_eq!(parse_observed(""), 0.0);
    }

    #[test]
    fn parse_cell_amount_falls_back_to_strict() {
        assert_eq!(parse_cell_amount("$1,500.25"), 1500.25);
        // Apostrophe survives the lenient strip and breaks the parse; the
        // strict stage rescues the value.
        assert_eq!(parse_cell_amount("1'500"), 1500.0);
        assert_eq!(parse_cell_amount(""), 0.0);
        assert_eq!(parse_cell_amount("no dollars here"), 0.0);
    }

    #[test]
    fn format_amount_matches_emission_rule() {
        assert_eq!(format_amount(15.0), "15");
        assert_eq!(format_amount(15.5), "15.50");
        assert_eq!(format_amount(-0.0), "0");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(1234.567), "1234.57");
        assert_eq!(format_amount(-12.0), "-12");
    }
}
