//! The refresh cycle: periodic bounded fetching, carry-forward merging and
//! snapshot publication.

mod coordinator;

pub use coordinator::{CycleReport, RefreshCoordinator, RefreshSettings};
