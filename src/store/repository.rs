//! Repository trait and backends for tournament persistence.
//!
//! The repository is a key/value-ish seam: one document keyed by tournament
//! ID, each value the full tournament. Backends load the whole collection at
//! startup and rewrite it on every save, which keeps writes idempotent.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::tournament::models::{Tournament, TournamentId};

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Document could not be read or written
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Uniform backend interface for the tournament collection.
///
/// `save_all` must be treated as a fast, synchronous, idempotent upsert of
/// the complete collection; partial writes are a backend concern.
pub trait TournamentRepository {
    /// Load every persisted tournament. A missing collection is empty, not
    /// an error.
    fn load_all(&self) -> StoreResult<HashMap<TournamentId, Tournament>>;

    /// Persist the complete collection, replacing whatever was stored.
    fn save_all(&mut self, tournaments: &HashMap<TournamentId, Tournament>) -> StoreResult<()>;
}

/// File-based backend: the collection is one pretty-printed JSON document.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Backend writing to the given file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TournamentRepository for JsonFileRepository {
    fn load_all(&self) -> StoreResult<HashMap<TournamentId, Tournament>> {
        if !self.path.exists() {
            log::info!("no tournament data at {}, starting empty", self.path.display());
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        let tournaments: HashMap<TournamentId, Tournament> = serde_json::from_str(&raw)?;
        log::info!(
            "loaded {} tournaments from {}",
            tournaments.len(),
            self.path.display()
        );
        Ok(tournaments)
    }

    fn save_all(&mut self, tournaments: &HashMap<TournamentId, Tournament>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(tournaments)?;
        fs::write(&self.path, raw)?;
        log::debug!(
            "saved {} tournaments to {}",
            tournaments.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral use.
///
/// Clones share the same underlying state, so a test can keep a handle
/// after handing the backend to a store. `fail_next_save` injects a
/// one-shot write failure to verify that a persistence failure leaves the
/// in-memory registry untouched.
#[derive(Default, Clone)]
pub struct MemoryRepository {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    documents: HashMap<TournamentId, Tournament>,
    fail_next_save: bool,
}

impl MemoryRepository {
    /// Empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `save_all` fail with an I/O error
    pub fn fail_next_save(&self) {
        self.state().fail_next_save = true;
    }

    /// Number of persisted tournaments
    pub fn len(&self) -> usize {
        self.state().documents.len()
    }

    /// Whether nothing has been persisted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic in one handle must not take the shared state down with it,
    // so a poisoned lock is recovered rather than propagated.
    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TournamentRepository for MemoryRepository {
    fn load_all(&self) -> StoreResult<HashMap<TournamentId, Tournament>> {
        Ok(self.state().documents.clone())
    }

    fn save_all(&mut self, tournaments: &HashMap<TournamentId, Tournament>) -> StoreResult<()> {
        let mut state = self.state();
        if state.fail_next_save {
            state.fail_next_save = false;
            return Err(StoreError::Io(io::Error::other("injected save failure")));
        }
        state.documents = tournaments.clone();
        Ok(())
    }
}
