/// Constants used by field-name detection and the canonical row shape.
pub mod fields {
    /// Canonical header for an organization's name.
    pub const ENTITY_NAME: &str = "entityName";
    /// Canonical header for a person's first name.
    pub const FIRST_NAME: &str = "firstName";
    /// Canonical header for a person's middle initial.
    pub const MIDDLE_INITIAL: &str = "middleInitial";
    /// Canonical header for a person's last name.
    pub const LAST_NAME: &str = "lastName";
    /// Canonical header for a donor's city.
    pub const CITY: &str = "city";
    /// Canonical header for a donor's state.
    pub const STATE: &str = "state";
    /// Canonical header for the external lookup identifier.
    pub const LOOKUP_ID: &str = "eid";
    /// Canonical header for the self-reported contribution total.
    pub const DONATIONS_TO_CAMPAIGN: &str = "donationsToCampaign";
    /// Canonical header for an accumulated per-party amount.
    pub const AMOUNT: &str = "amount";

    /// Case-insensitive substring marking an amount-like column.
    pub const AMOUNT_MARKER: &str = "amount";
    /// Case-insensitive substring marking a donations-total column.
    pub const DONATION_MARKER: &str = "donat";
}

/// Constants used by party-category bucketing.
pub mod categories {
    /// Substring mapping a file stem to the republican bucket.
    pub const REPUBLICAN_MARKER: &str = "republic";
    /// Substring mapping a file stem to the democratic bucket.
    pub const DEMOCRATIC_MARKER: &str = "democ";
    /// Substrings mapping a file stem to the nonpartisan bucket.
    pub const NONPARTISAN_MARKERS: [&str; 3] = ["non", "no-party", "nonpartisan"];
}

/// Constants used when rendering candidate output tables and reports.
pub mod output {
    /// Header row for per-party candidate tables.
    pub const PARTY_TABLE_HEADER: [&str; 5] = [
        "entityName",
        "firstName",
        "lastName",
        "amount",
        "donationsToCampaign",
    ];
    /// Header row for the per-candidate splits table.
    pub const SPLITS_HEADER: [&str; 5] = [
        "candidate",
        "republican",
        "democratic",
        "thirdParty",
        "nonpartisan",
    ];
    /// Separator between file stems in a duplicate-report line.
    pub const STEM_SEPARATOR: &str = "/";
    /// File stems whose rows seed the known-partisan match-key set.
    pub const PARTISAN_STEMS: [&str; 2] = ["republican", "democratic"];
}

/// Constants used by the lookup pacing contract.
pub mod lookup {
    /// Default minimum delay between consecutive lookup requests, in
    /// milliseconds. A politeness contract with the remote service, not a
    /// tuning knob.
    pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 500;
}

/// Constants used by contribution-ledger preparation.
pub mod ledger {
    /// Date renderings accepted in ledger date columns, tried in order.
    pub const DATE_FORMATS: [&str; 6] = [
        "%m/%d/%Y",
        "%m/%d/%y",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%b %d %Y",
        "%B %d %Y",
    ];
    /// Case-insensitive prefix identifying a ledger date column.
    pub const DATE_FIELD_PREFIX: &str = "date";
}
