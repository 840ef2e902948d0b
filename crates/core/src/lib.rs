//! Ratewatch Core - Snapshot domain, refresh cycle, and read-side services.
//!
//! This crate owns everything between the corridor extractors and the HTTP
//! surface: the snapshot store with its durable mirror, the refresh
//! coordinator that is the sole writer, and the query service that readers
//! go through.

pub mod errors;
pub mod query;
pub mod refresh;
pub mod snapshot;

// Re-export common types from the snapshot and refresh modules
pub use query::{NotReadyError, QueryService};
pub use refresh::{CycleReport, RefreshCoordinator, RefreshSettings};
pub use snapshot::{PersistedSnapshot, PersistenceError, Quote, Snapshot, SnapshotStore};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
