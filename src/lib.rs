#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Per-party accumulation of lookup observations.
pub mod accumulate;
/// Currency parsing stages and the dollar formatting rule.
pub mod amount;
/// Canonical donor identity keys.
pub mod canonical;
/// Party-category bucketing and per-candidate splits.
pub mod category;
/// Pipeline configuration.
pub mod config;
/// Field, category, output, and pacing constants.
pub mod constants;
/// Known-partisan donor removal from non-partisan tables.
pub mod dedupe;
/// Cross-file duplicate donor detection.
pub mod duplicates;
/// Contribution-ledger preparation (dedupe and date ordering).
pub mod ledger;
/// Lookup payloads, the client seam, and request pacing.
pub mod lookup;
/// Campaign-level totals reporting.
pub mod metrics;
/// The per-candidate processing pass.
pub mod pipeline;
/// Normalized row shape and header alias resolution.
pub mod row;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;
/// Donor group merging and the identifier index.
pub mod group;

pub use accumulate::{ObservationStats, OutputRow, PartyAccumulator, PartyTotalsTable, party_file_stem};
pub use amount::{format_amount, parse_cell_amount, parse_observed, parse_self_reported};
pub use canonical::{IdentityKey, canonicalize};
pub use category::{
    ALL_CATEGORIES, CandidateSplit, CategoryTotals, PartyCategory, categorize, compute_splits,
    sum_preferred_amount,
};
pub use config::PipelineConfig;
pub use dedupe::{DedupeReport, dedupe_candidate_tables};
pub use duplicates::{DuplicateRecord, TaggedTable, find_duplicates};
pub use errors::PipelineError;
pub use group::{DonorGroup, DonorGroupIndex, IdentifierRoster};
pub use ledger::{PrepareReport, prepare_rows};
pub use lookup::{
    InMemoryLookup, LookupClient, LookupRecord, LookupResponse, PartyObservation, RequestPacer,
};
pub use metrics::{CampaignTotal, campaign_totals, render_totals_report};
pub use pipeline::{CandidateOutput, run_candidate_pass, run_candidate_pass_from_table};
pub use row::{ContributionRow, FieldAliases, RowShape, TableRow, shape_rows};
pub use types::{
    AmountText, CandidateId, DisplayName, FieldName, FileStem, LookupId, PartyLabel,
};
pub use utils::format_candidate_name;
