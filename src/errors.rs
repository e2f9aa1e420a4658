use std::io;

use thiserror::Error;

use crate::types::LookupId;

/// Error type for lookup-collaborator and configuration failures.
///
/// The aggregation core itself never fails: unparsable amounts degrade to
/// `0.0`, unresolved identifiers are discarded, and missing inputs surface
/// as empty results. These variants exist for the seams around the core.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("lookup for identifier '{lookup_id}' is unavailable: {reason}")]
    LookupUnavailable { lookup_id: LookupId, reason: String },
    #[error("lookup response for identifier '{lookup_id}' is malformed: {details}")]
    MalformedResponse {
        lookup_id: LookupId,
        details: String,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
}
