/// External lookup-service entity identifier.
/// Example: `49301129`
pub type LookupId = String;
/// Raw party label as returned by the lookup service.
/// Examples: `Republican Party`, `Democratic Party`, `Nonpartisan`
pub type PartyLabel = String;
/// Column/field name in a tabular input or output.
/// Examples: `entityName`, `First Name`, `donationsToCampaign`
pub type FieldName = String;
/// Output file stem for one party table of one candidate.
/// Examples: `republican`, `democratic-party`, `nonpartisan-judges`
pub type FileStem = String;
/// Candidate identifier derived from a source-ledger name.
/// Example: `jennifer-owen`
pub type CandidateId = String;
/// Currency-formatted amount text prior to parsing.
/// Examples: `$1,500.00`, `250`, `-35.10`
pub type AmountText = String;
/// Human-readable donor or candidate name used in reports.
/// Examples: `Mike Nelson`, `Acme PAC`, `Jennifer Owen`
pub type DisplayName = String;
