//! Per-provider rate extractors and their dispatch registry.
//!
//! An extractor turns one corridor entry into a rate value or a typed
//! failure. Each provider variant has its own adapter encapsulating that
//! provider's text quirks; [`ExtractorRegistry`] routes entries to the
//! right adapter via exhaustive match and enforces the hard per-fetch
//! deadline so callers never wait on a hung page.

mod moneygram;
mod registry;
mod western_union;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::FetchError;
use crate::models::CorridorEntry;

pub use moneygram::MoneygramExtractor;
pub use registry::ExtractorRegistry;
pub use western_union::WesternUnionExtractor;

/// Capability that resolves one corridor entry to its currently quoted
/// rate.
///
/// Implementations must be side-effect free beyond their own resource
/// lifecycle: concurrent fetches for different corridors share no mutable
/// state, and a fetch whose future is dropped (deadline, shutdown) releases
/// everything it acquired. A returned error never poisons later calls.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Fetches the current rate for one corridor.
    async fn fetch(&self, entry: &CorridorEntry) -> Result<Decimal, FetchError>;
}
