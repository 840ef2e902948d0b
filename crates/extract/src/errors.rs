//! Error types for catalog loading and per-corridor extraction.

use thiserror::Error;

/// Failure of a single corridor fetch.
///
/// Every variant is recoverable at the per-key boundary: the refresh cycle
/// logs it, keeps the corridor's previous quote, and tries again next cycle.
/// No `FetchError` ever aborts a cycle or crosses the merge boundary.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The fetch did not resolve within the hard per-call deadline.
    #[error("Fetch for {corridor} timed out after {timeout_ms}ms")]
    Timeout { corridor: String, timeout_ms: u64 },

    /// The extractor was handed an entry it cannot serve (wrong provider
    /// variant behind the dispatch seam).
    #[error("{provider} extractor does not support {corridor}")]
    Unsupported { provider: String, corridor: String },

    /// A document was retrieved but no well-formed positive rate was found
    /// in it.
    #[error("No usable rate for {corridor}: {detail}")]
    ParseFailure { corridor: String, detail: String },

    /// The document could not be retrieved at all (connect, TLS, HTTP
    /// status, body read).
    #[error("Transport failure for {corridor}: {detail}")]
    Transport { corridor: String, detail: String },
}

impl FetchError {
    /// Short stable label for log lines and cycle summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout { .. } => "timeout",
            FetchError::Unsupported { .. } => "unsupported",
            FetchError::ParseFailure { .. } => "parse_failure",
            FetchError::Transport { .. } => "transport",
        }
    }
}

/// Fatal catalog problem detected while loading corridor definitions.
///
/// Raised only at startup; the process must not begin serving with an
/// invalid catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown provider code '{0}'")]
    UnknownProvider(String),

    #[error("Invalid currency code '{0}' (expected 3 ASCII letters)")]
    InvalidCurrency(String),

    #[error("Duplicate corridor {0}")]
    DuplicateCorridor(String),

    #[error("Corridor {corridor}: {detail}")]
    InvalidEntry { corridor: String, detail: String },

    #[error("Catalog contains no corridors")]
    Empty,
}
