use std::time::Duration;

use partisan::{
    CandidateOutput, ContributionRow, InMemoryLookup, PipelineConfig, run_candidate_pass,
};

fn fast_config() -> PipelineConfig {
    PipelineConfig {
        min_request_interval: Duration::ZERO,
        ..PipelineConfig::default()
    }
}

fn acme_row(eid: &str) -> ContributionRow {
    ContributionRow {
        entity_name: "Acme PAC".to_string(),
        city: "Helena".to_string(),
        state: "MT".to_string(),
        lookup_id: eid.to_string(),
        self_reported: "1500".to_string(),
        ..ContributionRow::default()
    }
}

fn run_acme(lookup: &InMemoryLookup) -> CandidateOutput {
    let rows = vec![acme_row("1"), acme_row("2")];
    run_candidate_pass("jo-doe", &rows, lookup, &fast_config())
}

#[test]
fn identifiers_of_one_donor_accumulate_into_one_cell() {
    let mut lookup = InMemoryLookup::default();
    lookup.insert_observation("1", "Republican Party", "100.00");
    lookup.insert_observation("2", "Republican Party", "50.00");

    let output = run_acme(&lookup);
    assert_eq!(output.donor_groups, 1);
    assert_eq!(output.identifiers, 2);
    assert_eq!(output.stats.recorded, 2);

    let rows = &output.tables["republican-party"];
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entity_name, "Acme PAC");
    assert_eq!(rows[0].amount, "150");
    assert_eq!(rows[0].self_reported, "1500");
}

#[test]
fn reruns_recompute_identical_output() {
    let mut lookup = InMemoryLookup::default();
    lookup.insert_observation("1", "Republican Party", "100.00");
    lookup.insert_observation("2", "Democratic Party", "25.50");

    let first = run_acme(&lookup);
    let second = run_acme(&lookup);
    assert_eq!(first, second);
    assert_eq!(first.tables["democratic-party"][0].amount, "25.50");
}

#[test]
fn parties_split_into_separate_tables_sorted_by_amount() {
    let rows = vec![
        ContributionRow {
            first_name: "Mike".to_string(),
            last_name: "Nelson".to_string(),
            city: "Helena".to_string(),
            state: "MT".to_string(),
            lookup_id: "10".to_string(),
            self_reported: "40".to_string(),
            ..ContributionRow::default()
        },
        acme_row("1"),
    ];
    let mut lookup = InMemoryLookup::default();
    lookup.insert_observation("10", "Republican Party", "75");
    lookup.insert_observation("1", "Republican Party", "300");
    lookup.insert_observation("1", "Nonpartisan", "20");

    let output = run_candidate_pass("jo-doe", &rows, &lookup, &fast_config());
    assert_eq!(output.tables.len(), 2);

    let republican = &output.tables["republican-party"];
    assert_eq!(republican.len(), 2);
    // Sorted by accumulated amount descending.
    assert_eq!(republican[0].entity_name, "Acme PAC");
    assert_eq!(republican[0].amount, "300");
    assert_eq!(republican[1].first_name, "Mike");
    assert_eq!(republican[1].amount, "75");

    let nonpartisan = &output.tables["nonpartisan"];
    assert_eq!(nonpartisan[0].amount, "20");
}

#[test]
fn empty_input_yields_empty_output_not_an_error() {
    let lookup = InMemoryLookup::default();
    let output = run_candidate_pass("jo-doe", &[], &lookup, &fast_config());
    assert!(output.tables.is_empty());
    assert_eq!(output.donor_groups, 0);
    assert_eq!(output.identifiers, 0);
    assert_eq!(output.stats.recorded, 0);
}

#[test]
fn insignificant_and_failed_lookups_leave_visible_zeros() {
    let mut lookup = InMemoryLookup::default();
    // Zero and negative amounts, and a missing party, are all discarded.
    lookup.insert_observation("1", "Republican Party", "0");
    lookup.insert_observation("1", "", "500");
    lookup.insert_observation("2", "Republican Party", "-10");
    let output = run_acme(&lookup);
    assert!(output.tables.is_empty());
    assert_eq!(output.stats.non_positive, 2);
    assert_eq!(output.stats.missing_party, 1);

    // A hard lookup failure degrades the same way.
    let mut failing = InMemoryLookup::default();
    failing.fail("1");
    failing.insert_observation("2", "Republican Party", "50");
    let output = run_acme(&failing);
    assert_eq!(output.tables["republican-party"][0].amount, "50");
}
