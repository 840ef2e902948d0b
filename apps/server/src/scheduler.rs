//! Background scheduler for the periodic rate refresh.
//!
//! The coordinator owns the whole loop (interval, manual wake, shutdown);
//! this module just puts it on the runtime and hands back the join handle
//! so shutdown can wait for the loop to finish at a cycle boundary.

use tokio::task::JoinHandle;
use tracing::info;

use ratewatch_core::RefreshCoordinator;

/// Spawns the refresh loop. The first cycle runs immediately, so a cold
/// start serves rates as soon as the first fetch round completes.
pub fn start_refresh_scheduler(coordinator: RefreshCoordinator) -> JoinHandle<()> {
    info!("Starting refresh scheduler");
    tokio::spawn(coordinator.run_loop())
}
