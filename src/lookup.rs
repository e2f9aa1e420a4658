//! Typed lookup-service payloads, the client seam, and request pacing.
//!
//! The donor-lookup service is an external collaborator: this crate has
//! no opinion on how its responses are fetched (browser automation, HTTP,
//! fixtures on disk). It does own the payload shape — a `records` array
//! whose entries nest the party name and total-dollar amount inside
//! single-field sub-records — and the pacing contract: lookups are issued
//! one at a time with a minimum interval between requests.

use std::thread;
use std::time::{Duration, Instant};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::PipelineError;
use crate::types::{AmountText, LookupId, PartyLabel};

/// Parsed lookup-service response for one identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Historical giving records for the entity, possibly empty.
    #[serde(default)]
    pub records: Vec<LookupRecord>,
}

/// One historical giving record inside a lookup response.
///
/// Unknown sibling fields in the payload are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupRecord {
    /// Party sub-record, when the period has one.
    #[serde(rename = "Party", default, skip_serializing_if = "Option::is_none")]
    pub party: Option<PartyEnvelope>,
    /// Total-dollar sub-record, when the period has one.
    #[serde(rename = "Total_$", default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalEnvelope>,
}

/// The service's single-field party wrapper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyEnvelope {
    /// Party name, when present.
    #[serde(rename = "Party", default)]
    pub name: Option<String>,
}

/// The service's single-field dollar-total wrapper. The value arrives as
/// either a string or a bare number depending on the endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalEnvelope {
    /// Dollar total, when present.
    #[serde(rename = "Total_$", default)]
    pub dollars: Option<serde_json::Value>,
}

impl LookupRecord {
    /// Party name for this record, or empty when absent.
    pub fn party_name(&self) -> &str {
        self.party
            .as_ref()
            .and_then(|envelope| envelope.name.as_deref())
            .unwrap_or("")
    }

    /// Dollar total as text, or empty when absent.
    pub fn total_text(&self) -> AmountText {
        match self.total.as_ref().and_then(|envelope| envelope.dollars.as_ref()) {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(serde_json::Value::Number(number)) => number.to_string(),
            _ => String::new(),
        }
    }
}

impl LookupResponse {
    /// Parse a raw JSON payload into a response.
    ///
    /// An empty body is a valid "no records" answer; anything else must
    /// deserialize or the response is reported malformed.
    pub fn from_json(lookup_id: &str, payload: &str) -> Result<Self, PipelineError> {
        if payload.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(payload).map_err(|err| PipelineError::MalformedResponse {
            lookup_id: lookup_id.to_string(),
            details: err.to_string(),
        })
    }

    /// Flatten the response into raw party observations.
    ///
    /// No filtering happens here: records with an empty party or a
    /// non-positive amount are still emitted, and the accumulator decides
    /// what is significant.
    pub fn observations(&self, lookup_id: &str) -> Vec<PartyObservation> {
        self.records
            .iter()
            .map(|record| PartyObservation {
                lookup_id: lookup_id.to_string(),
                party: record.party_name().to_string(),
                amount: record.total_text(),
            })
            .collect()
    }
}

/// One (identifier, party, amount) fact from a lookup response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyObservation {
    /// Identifier the observation was fetched under.
    pub lookup_id: LookupId,
    /// Party label, possibly empty.
    pub party: PartyLabel,
    /// Dollar amount as text, possibly empty.
    pub amount: AmountText,
}

/// Transport seam for the donor-lookup collaborator.
pub trait LookupClient: Send + Sync {
    /// Fetch the lookup response for one identifier.
    fn fetch(&self, lookup_id: &str) -> Result<LookupResponse, PipelineError>;
}

/// Deterministic in-memory lookup used by tests and offline runs.
#[derive(Debug, Default)]
pub struct InMemoryLookup {
    responses: IndexMap<LookupId, LookupResponse>,
    failures: IndexSet<LookupId>,
}

impl InMemoryLookup {
    /// Append one (party, amount) giving record for an identifier.
    pub fn insert_observation(&mut self, lookup_id: &str, party: &str, amount: &str) {
        self.responses
            .entry(lookup_id.to_string())
            .or_default()
            .records
            .push(LookupRecord {
                party: Some(PartyEnvelope {
                    name: Some(party.to_string()),
                }),
                total: Some(TotalEnvelope {
                    dollars: Some(serde_json::Value::String(amount.to_string())),
                }),
            });
    }

    /// Replace the full response for an identifier.
    pub fn insert_response(&mut self, lookup_id: &str, response: LookupResponse) {
        self.responses.insert(lookup_id.to_string(), response);
    }

    /// Make subsequent fetches for an identifier fail.
    pub fn fail(&mut self, lookup_id: &str) {
        self.failures.insert(lookup_id.to_string());
    }
}

impl LookupClient for InMemoryLookup {
    fn fetch(&self, lookup_id: &str) -> Result<LookupResponse, PipelineError> {
        if self.failures.contains(lookup_id) {
            return Err(PipelineError::LookupUnavailable {
                lookup_id: lookup_id.to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        Ok(self.responses.get(lookup_id).cloned().unwrap_or_default())
    }
}

/// Enforces the minimum interval between consecutive lookup requests.
///
/// This is a politeness contract with the remote service, not a
/// performance knob: callers pause before every fetch, and the first
/// fetch proceeds immediately.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RequestPacer {
    /// Create a pacer with the given minimum inter-request interval.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Block until the interval since the previous request has elapsed,
    /// then mark this request as issued.
    pub fn pause(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(?wait, "pacing lookup request");
                thread::sleep(wait);
            }
        }
        self.last_request = Some(Instant::now());
    }
}
