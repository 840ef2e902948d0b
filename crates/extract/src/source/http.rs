//! Plain-HTTP document source.
//!
//! Fetches provider pages with a single GET and returns the body text. This
//! works for corridors whose rate is present in the initial markup; pages
//! that only render the rate client-side need a browser-grade
//! [`DocumentSource`](super::DocumentSource) wired in instead. Selectors
//! cannot be evaluated here, so extractors receive the whole body and lean
//! on their own text post-processing.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::FetchError;
use crate::models::CorridorEntry;
use crate::source::DocumentSource;

/// Provider pages respond differently to non-browser agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36";

/// Document source backed by a shared reqwest client.
pub struct HttpDocumentSource {
    client: Client,
}

impl HttpDocumentSource {
    /// Creates a source whose transport timeout matches the per-fetch
    /// deadline. The caller-side deadline remains authoritative; the client
    /// timeout just keeps connections from outliving it.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch_document(&self, entry: &CorridorEntry) -> Result<String, FetchError> {
        let corridor = entry.key().to_string();
        let url = entry.params().url();
        debug!("GET {} for {}", url, corridor);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                corridor: corridor.clone(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                corridor,
                detail: format!("HTTP {} from {}", status, url),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            corridor,
            detail: format!("body read failed: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_builds_with_tight_timeout() {
        // Client construction must not panic even with degenerate timeouts.
        let _source = HttpDocumentSource::new(Duration::from_millis(1));
    }
}
