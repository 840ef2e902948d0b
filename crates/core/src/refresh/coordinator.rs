use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use tokio::sync::{watch, Notify};
use tokio::time::MissedTickBehavior;

use ratewatch_extract::{CorridorCatalog, Extractor, FetchError, RateKey};

use crate::errors::{Error, Result};
use crate::snapshot::{Quote, Snapshot, SnapshotStore};

type FetchOutcome = std::result::Result<Decimal, FetchError>;

/// Settings governing the refresh loop, validated at construction.
#[derive(Debug, Clone)]
pub struct RefreshSettings {
    cycle_interval: Duration,
    fetch_timeout: Duration,
    max_concurrent_fetches: usize,
}

impl RefreshSettings {
    pub fn new(
        cycle_interval: Duration,
        fetch_timeout: Duration,
        max_concurrent_fetches: usize,
    ) -> Result<Self> {
        if cycle_interval.is_zero() {
            return Err(Error::InvalidConfigValue(
                "cycle interval must be positive".to_string(),
            ));
        }
        if fetch_timeout.is_zero() {
            return Err(Error::InvalidConfigValue(
                "fetch timeout must be positive".to_string(),
            ));
        }
        if max_concurrent_fetches == 0 {
            return Err(Error::InvalidConfigValue(
                "max concurrent fetches must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            cycle_interval,
            fetch_timeout,
            max_concurrent_fetches,
        })
    }

    pub fn cycle_interval(&self) -> Duration {
        self.cycle_interval
    }

    /// Hard per-corridor deadline, enforced by the extractor registry.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }
}

/// Outcome of one refresh cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    /// Corridors that produced a fresh value this cycle.
    pub refreshed: usize,
    /// Corridors whose previous quote was carried forward after a failure.
    pub carried: usize,
    /// Corridors left without any value.
    pub absent: usize,
    /// Per-corridor fetch errors as (corridor, message) pairs.
    pub errors: Vec<(String, String)>,
    /// Whether the merged snapshot made it to disk and memory.
    pub persisted: bool,
    /// Whether the cycle was abandoned because shutdown was requested.
    pub aborted: bool,
}

impl CycleReport {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            refreshed: 0,
            carried: 0,
            absent: 0,
            errors: Vec::new(),
            persisted: false,
            aborted: false,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Refresh cycle done: {} refreshed, {} carried forward, {} absent, {} fetch errors",
            self.refreshed,
            self.carried,
            self.absent,
            self.errors.len()
        )
    }
}

/// Drives the periodic fetch-merge-publish cycle.
///
/// The coordinator is the single writer in the system. `run_loop` consumes
/// it, so exactly one cycle can execute at a time for the life of the
/// process; readers keep hitting the snapshot store and are never blocked
/// by a cycle in progress.
pub struct RefreshCoordinator {
    catalog: Arc<CorridorCatalog>,
    extractor: Arc<dyn Extractor>,
    store: Arc<SnapshotStore>,
    settings: RefreshSettings,
    shutdown: watch::Receiver<bool>,
    refresh_now: Arc<Notify>,
}

impl RefreshCoordinator {
    pub fn new(
        catalog: Arc<CorridorCatalog>,
        extractor: Arc<dyn Extractor>,
        store: Arc<SnapshotStore>,
        settings: RefreshSettings,
        shutdown: watch::Receiver<bool>,
        refresh_now: Arc<Notify>,
    ) -> Self {
        Self {
            catalog,
            extractor,
            store,
            settings,
            shutdown,
            refresh_now,
        }
    }

    /// Runs one full refresh cycle: fetch every corridor, merge against the
    /// previous snapshot, publish.
    ///
    /// The cycle never aborts on individual fetch failures. A failed
    /// corridor keeps its previous quote, including the original
    /// observation time, so consumers can see exactly how stale it is. Only
    /// a requested shutdown stops the cycle early, and then strictly before
    /// anything is published.
    pub async fn run_cycle(&self) -> CycleReport {
        let started_at = Utc::now();
        let mut report = CycleReport::new(started_at);
        let previous = self.store.get();

        debug!(
            "Refresh cycle starting for {} corridors",
            self.catalog.len()
        );
        let mut outcomes = self.fetch_all().await;

        if *self.shutdown.borrow() {
            info!("Shutdown requested mid-cycle, abandoning before publish");
            report.aborted = true;
            return report;
        }

        let mut rates: BTreeMap<RateKey, Option<Quote>> = BTreeMap::new();
        for entry in self.catalog.entries() {
            let key = entry.key();
            let outcome = outcomes.remove(key).unwrap_or_else(|| {
                Err(FetchError::Transport {
                    corridor: key.canonical(),
                    detail: "fetch was not dispatched".to_string(),
                })
            });

            let quote = match outcome {
                Ok(value) => {
                    report.refreshed += 1;
                    Some(Quote::new(key.clone(), value, started_at))
                }
                Err(err) => {
                    report.errors.push((key.canonical(), err.to_string()));
                    let prior = previous
                        .as_ref()
                        .and_then(|snapshot| snapshot.get(key))
                        .cloned();
                    match prior {
                        Some(prior) => {
                            warn!(
                                "Fetch failed for {}: {}. Carrying forward value observed at {}",
                                key,
                                err,
                                prior.observed_at()
                            );
                            report.carried += 1;
                            Some(prior)
                        }
                        None => {
                            warn!("Fetch failed for {} and no prior value exists: {}", key, err);
                            report.absent += 1;
                            None
                        }
                    }
                }
            };
            rates.insert(key.clone(), quote);
        }

        let snapshot = Snapshot::new(rates, started_at);
        match self.store.publish(snapshot).await {
            Ok(_) => {
                report.persisted = true;
                info!("{}", report.summary());
            }
            Err(err) => {
                error!(
                    "Snapshot publish failed, previous snapshot stays authoritative: {}",
                    err
                );
            }
        }
        report
    }

    /// Fetches every catalog corridor with bounded concurrency.
    async fn fetch_all(&self) -> HashMap<RateKey, FetchOutcome> {
        futures::stream::iter(
            self.catalog
                .entries()
                .iter()
                .map(|entry| {
                    let extractor = self.extractor.clone();
                    async move {
                        let outcome = extractor.fetch(entry).await;
                        (entry.key().clone(), outcome)
                    }
                })
                .collect::<Vec<_>>(),
        )
        .buffer_unordered(self.settings.max_concurrent_fetches)
        .collect::<HashMap<_, _>>()
        .await
    }

    /// Runs cycles on the configured interval until shutdown.
    ///
    /// The first cycle starts immediately. An overrunning cycle delays the
    /// next tick rather than queueing missed ones, so there is never a
    /// catch-up burst. A manual refresh request runs a cycle right away and
    /// reschedules the next periodic one a full interval later.
    pub async fn run_loop(mut self) {
        let mut interval = tokio::time::interval(self.settings.cycle_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Refresh loop started: {} corridors every {}s",
            self.catalog.len(),
            self.settings.cycle_interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = self.refresh_now.notified() => {
                    info!("Manual refresh requested");
                    interval.reset();
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() {
                        info!("Shutdown channel closed, stopping refresh loop");
                        return;
                    }
                }
            }

            if *self.shutdown.borrow() {
                info!("Refresh loop stopping");
                return;
            }

            self.run_cycle().await;
        }
    }
}
