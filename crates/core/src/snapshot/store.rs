use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::DateTime;
use log::{debug, info, warn};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use ratewatch_extract::CorridorCatalog;

use crate::snapshot::model::{PersistedSnapshot, Snapshot};

/// Errors raised while mirroring a snapshot to disk.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to encode snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Snapshot write failed at {path}: {source}")]
    Io { path: String, source: io::Error },
}

/// Holds the current published snapshot plus its durable mirror on disk.
///
/// Reads never block on a refresh cycle: the current snapshot is a cheap
/// `Arc` clone taken under a read lock, and a publish swaps the whole `Arc`
/// in one write-lock critical section. Readers therefore always observe a
/// fully-old or fully-new snapshot, never a mixture.
///
/// There is a single writer per process (the refresh coordinator), so the
/// temp-file name next to the target needs no uniquifier.
pub struct SnapshotStore {
    path: PathBuf,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotStore {
    /// Opens the store, warm-starting from `path` when a readable snapshot
    /// file already exists.
    ///
    /// A missing or unreadable file means a cold start, never a startup
    /// failure; only an unusable parent directory is fatal because no later
    /// publish could ever succeed against it.
    pub async fn open(
        path: impl Into<PathBuf>,
        catalog: &CorridorCatalog,
    ) -> Result<Self, PersistenceError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| PersistenceError::Io {
                        path: parent.display().to_string(),
                        source,
                    })?;
            }
        }

        let current = Self::load(&path, catalog).await;
        Ok(Self {
            path,
            current: RwLock::new(current),
        })
    }

    async fn load(path: &Path, catalog: &CorridorCatalog) -> Option<Arc<Snapshot>> {
        let contents = match fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("No snapshot file at {}, starting cold", path.display());
                return None;
            }
            Err(err) => {
                warn!(
                    "Snapshot file {} is unreadable, starting cold: {}",
                    path.display(),
                    err
                );
                return None;
            }
        };

        let persisted: PersistedSnapshot = match serde_json::from_str(&contents) {
            Ok(persisted) => persisted,
            Err(err) => {
                warn!(
                    "Snapshot file {} is corrupt, starting cold: {}",
                    path.display(),
                    err
                );
                return None;
            }
        };

        let Some(taken_at) = DateTime::from_timestamp(persisted.timestamp, 0) else {
            warn!(
                "Snapshot file {} has out-of-range timestamp {}, starting cold",
                path.display(),
                persisted.timestamp
            );
            return None;
        };

        let tracked: Vec<String> = catalog.keys().map(|key| key.canonical()).collect();
        let stray = persisted
            .rates
            .keys()
            .filter(|key| !tracked.contains(key))
            .count();
        if stray > 0 {
            warn!(
                "Snapshot file {} names {} corridors not in the catalog; ignoring them",
                path.display(),
                stray
            );
        }

        let snapshot = Snapshot::from_persisted(&persisted, taken_at, catalog);
        info!(
            "Warm start from {}: {} of {} corridors have values (taken at {})",
            path.display(),
            snapshot.present_count(),
            snapshot.len(),
            taken_at
        );
        Some(Arc::new(snapshot))
    }

    /// The currently published snapshot, or `None` before the first publish
    /// of a cold-started process.
    pub fn get(&self) -> Option<Arc<Snapshot>> {
        self.read_current().clone()
    }

    /// Publishes a new snapshot: durable mirror first, then the in-memory
    /// swap.
    ///
    /// When the disk write fails the in-memory snapshot is left untouched,
    /// so memory and file never drift apart on the pessimistic side: what
    /// callers read is always at least as old as what the file holds.
    pub async fn publish(&self, snapshot: Snapshot) -> Result<Arc<Snapshot>, PersistenceError> {
        let persisted = PersistedSnapshot::from_snapshot(&snapshot);
        let json = serde_json::to_string_pretty(&persisted)?;
        self.write_atomic(json.as_bytes()).await?;

        let snapshot = Arc::new(snapshot);
        *self.write_current() = Some(snapshot.clone());
        debug!(
            "Published snapshot taken at {} ({} of {} corridors present)",
            snapshot.taken_at(),
            snapshot.present_count(),
            snapshot.len()
        );
        Ok(snapshot)
    }

    /// Path of the durable mirror.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot file via a temp file and an atomic rename, so a
    /// crash mid-write can never leave a partial file at the final path.
    async fn write_atomic(&self, bytes: &[u8]) -> Result<(), PersistenceError> {
        let tmp_path = self.tmp_path();
        let result = self.write_and_rename(&tmp_path, bytes).await;
        if result.is_err() {
            // Best effort: a stale temp file is harmless but untidy.
            let _ = fs::remove_file(&tmp_path).await;
        }
        result
    }

    async fn write_and_rename(&self, tmp_path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
        let mut file = fs::File::create(tmp_path)
            .await
            .map_err(|source| PersistenceError::Io {
                path: tmp_path.display().to_string(),
                source,
            })?;
        file.write_all(bytes)
            .await
            .map_err(|source| PersistenceError::Io {
                path: tmp_path.display().to_string(),
                source,
            })?;
        file.sync_all()
            .await
            .map_err(|source| PersistenceError::Io {
                path: tmp_path.display().to_string(),
                source,
            })?;
        drop(file);

        fs::rename(tmp_path, &self.path)
            .await
            .map_err(|source| PersistenceError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut os = self.path.as_os_str().to_owned();
        os.push(".tmp");
        PathBuf::from(os)
    }

    /// Lock the current snapshot for reading, recovering from poison if
    /// necessary.
    fn read_current(&self) -> RwLockReadGuard<'_, Option<Arc<Snapshot>>> {
        self.current.read().unwrap_or_else(|poisoned| {
            warn!("Snapshot store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Lock the current snapshot for writing, recovering from poison if
    /// necessary.
    fn write_current(&self) -> RwLockWriteGuard<'_, Option<Arc<Snapshot>>> {
        self.current.write().unwrap_or_else(|poisoned| {
            warn!("Snapshot store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
