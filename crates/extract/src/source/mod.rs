//! The document retrieval seam.
//!
//! Everything mechanical about reaching a provider page (HTTP, TLS, or a
//! headless browser driving navigation and selector evaluation) sits behind
//! [`DocumentSource`]. Extractors only ever see the text that came back.
//! Swapping the shipped HTTP source for a browser-grade one is a wiring
//! change, not an extractor change.

mod http;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::CorridorEntry;

pub use http::HttpDocumentSource;

/// Capability that retrieves the raw text of a corridor's rate page.
///
/// Contract for implementations:
///
/// - One call serves one corridor; concurrent calls for different corridors
///   must not share mutable state.
/// - Callers enforce a hard deadline by dropping the returned future. Any
///   session, page or process handle the implementation acquires must be
///   released when the future is dropped (hold it in a guard, not in
///   ambient state), so a timed-out fetch can never leak its resource into
///   later cycles.
/// - Failures are reported as [`FetchError::Transport`]; implementations do
///   not parse or validate rate text.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Retrieves the document text for one corridor entry.
    async fn fetch_document(&self, entry: &CorridorEntry) -> Result<String, FetchError>;
}
