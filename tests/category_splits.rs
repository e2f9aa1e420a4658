use std::time::Duration;

use partisan::{
    ContributionRow, InMemoryLookup, PartyCategory, PipelineConfig, categorize, compute_splits,
    run_candidate_pass,
};

fn fast_config() -> PipelineConfig {
    PipelineConfig {
        min_request_interval: Duration::ZERO,
        ..PipelineConfig::default()
    }
}

#[test]
fn stems_bucket_by_priority_rules() {
    assert_eq!(categorize("republican"), PartyCategory::Republican);
    assert_eq!(
        categorize("GOP-republican-central"),
        PartyCategory::Republican
    );
    assert_eq!(categorize("nonpartisan-judges"), PartyCategory::Nonpartisan);
    assert_eq!(categorize("libertarian"), PartyCategory::ThirdParty);
}

#[test]
fn splits_from_pipeline_output_prefer_self_reported_totals() {
    // One donor, $40 self-reported, observed giving $100 republican and
    // $60 nonpartisan. Split sums prefer the donationsToCampaign column,
    // so each table contributes 40 and the split lands at 50/50.
    let rows = vec![ContributionRow {
        entity_name: "Acme PAC".to_string(),
        lookup_id: "1".to_string(),
        self_reported: "40".to_string(),
        ..ContributionRow::default()
    }];
    let mut lookup = InMemoryLookup::default();
    lookup.insert_observation("1", "Republican", "100");
    lookup.insert_observation("1", "Nonpartisan", "60");

    let output = run_candidate_pass("jennifer-owen", &rows, &lookup, &fast_config());
    let split = compute_splits(&output.candidate, &output.tagged_tables());

    assert_eq!(split.candidate, "Jennifer Owen");
    assert_eq!(split.republican, 50.0);
    assert_eq!(split.nonpartisan, 50.0);
    assert_eq!(split.democratic, 0.0);
    assert_eq!(split.third_party, 0.0);
}

#[test]
fn single_sided_candidates_split_one_hundred_to_zero() {
    let rows = vec![ContributionRow {
        entity_name: "Acme PAC".to_string(),
        lookup_id: "1".to_string(),
        self_reported: "100".to_string(),
        ..ContributionRow::default()
    }];
    let mut lookup = InMemoryLookup::default();
    lookup.insert_observation("1", "Republican Party", "100");

    let output = run_candidate_pass("jo-doe", &rows, &lookup, &fast_config());
    let split = compute_splits(&output.candidate, &output.tagged_tables());
    assert_eq!(
        split.to_record(),
        vec!["Jo Doe", "100.00", "0.00", "0.00", "0.00"]
    );
    assert_eq!(
        split.to_record().len(),
        partisan::constants::output::SPLITS_HEADER.len()
    );
}

#[test]
fn zero_total_candidates_split_to_all_zeros() {
    let lookup = InMemoryLookup::default();
    let output = run_candidate_pass("jo-doe", &[], &lookup, &fast_config());
    let split = compute_splits(&output.candidate, &output.tagged_tables());
    assert_eq!(
        split.to_record(),
        vec!["Jo Doe", "0.00", "0.00", "0.00", "0.00"]
    );
}

#[test]
fn unrecognized_party_labels_land_in_third_party() {
    let rows = vec![ContributionRow {
        entity_name: "Acme PAC".to_string(),
        lookup_id: "1".to_string(),
        self_reported: "100".to_string(),
        ..ContributionRow::default()
    }];
    let mut lookup = InMemoryLookup::default();
    lookup.insert_observation("1", "Libertarian Party", "100");

    let output = run_candidate_pass("jo-doe", &rows, &lookup, &fast_config());
    let split = compute_splits(&output.candidate, &output.tagged_tables());
    assert_eq!(split.third_party, 100.0);
    assert_eq!(split.republican, 0.0);
}
