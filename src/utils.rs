//! Text normalization helpers shared by matching and report rendering.

use crate::types::DisplayName;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Lowercased, whitespace-collapsed form of a name used for match keys.
///
/// This is the normalization used when collapsing a known-partisan donor's
/// appearance in other tables. Cross-file duplicate *reporting* stays
/// case-sensitive on purpose.
pub fn normalize_name<T: AsRef<str>>(name: T) -> String {
    normalize_inline_whitespace(name.as_ref().to_lowercase())
}

/// Render a candidate id like `jennifer-owen` as `Jennifer Owen`.
///
/// Hyphens and underscores become spaces and each word is title-cased.
pub fn format_candidate_name(raw: &str) -> DisplayName {
    let spaced: String = raw
        .chars()
        .map(|ch| if ch == '-' || ch == '_' { ' ' } else { ch })
        .collect();
    spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase every letter that starts a run of letters, lowercase the rest.
/// `o'brien` becomes `O'Brien`, matching conventional title-casing.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
