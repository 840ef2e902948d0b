//! Ratewatch Extract Crate
//!
//! This crate owns everything between "which corridors do we track" and
//! "what number did the provider's page show": the validated corridor
//! catalog, the per-provider extractors, and the retrieval seam they share.
//!
//! # Overview
//!
//! - Closed provider set: MoneyGram and Western Union
//! - Static corridor catalog, validated eagerly at startup
//! - Per-corridor decimal-separator policy
//! - Hard per-fetch deadline with guaranteed resource release
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  CorridorCatalog | --> |  CorridorEntry   |  (key + fetch params)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                         +-------------------+
//!                         | ExtractorRegistry |  (dispatch + deadline)
//!                         +-------------------+
//!                            |             |
//!                            v             v
//!                  +--------------+  +--------------+
//!                  |  MoneyGram   |  | WesternUnion |  (text quirks)
//!                  +--------------+  +--------------+
//!                            |             |
//!                            +------+------+
//!                                   v
//!                          +------------------+
//!                          |  DocumentSource  |  (HTTP / browser seam)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RateKey`] - closed corridor identity, `MG_USD_MAD` form
//! - [`CorridorEntry`] - validated fetch parameters + decimal policy
//! - [`CorridorCatalog`] - the startup-validated registry minting keys
//! - [`Extractor`] - capability resolving an entry to a rate value
//! - [`FetchError`] - Timeout / Unsupported / ParseFailure / Transport

pub mod catalog;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod parse;
pub mod source;

// Re-export all public types from models
pub use models::{
    CorridorEntry, Currency, DecimalStyle, FetchParams, MoneygramParams, Provider, RateKey,
    WesternUnionParams, MONEYGRAM_RATE_SELECTOR, PROVIDER_CODE_MONEYGRAM,
    PROVIDER_CODE_WESTERN_UNION,
};

// Re-export the catalog and error taxonomy
pub use catalog::CorridorCatalog;
pub use errors::{CatalogError, FetchError};

// Re-export extractor and source capabilities
pub use extractor::{Extractor, ExtractorRegistry, MoneygramExtractor, WesternUnionExtractor};
pub use parse::parse_rate;
pub use source::{DocumentSource, HttpDocumentSource};
