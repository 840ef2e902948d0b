//! Snapshot domain: the immutable rate snapshot, its wire form and the
//! store that keeps the current one in memory with a durable mirror on
//! disk.

mod model;
mod store;

pub use model::{PersistedSnapshot, Quote, Snapshot};
pub use store::{PersistenceError, SnapshotStore};
