//! Extraction-side domain models
//!
//! - `provider` - the closed [`Provider`] enum and its code constants
//! - `corridor` - corridor identity ([`RateKey`]) and per-provider fetch
//!   parameters ([`FetchParams`], [`CorridorEntry`])

mod corridor;
mod provider;

pub use corridor::{
    CorridorEntry, Currency, DecimalStyle, FetchParams, MoneygramParams, RateKey,
    WesternUnionParams, MONEYGRAM_RATE_SELECTOR,
};
pub use provider::{Provider, PROVIDER_CODE_MONEYGRAM, PROVIDER_CODE_WESTERN_UNION};
