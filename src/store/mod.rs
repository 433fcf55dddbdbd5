//! Entity store: in-memory tournament registry mirrored to a persistence
//! backend after every mutation.
//!
//! The registry is the source of truth for reads. Writes go backend-first:
//! a mutation is persisted before it replaces the in-memory entry, so a
//! failed backend write never leaves memory ahead of the stored state.

pub mod repository;

pub use repository::{
    JsonFileRepository, MemoryRepository, StoreError, StoreResult, TournamentRepository,
};

use std::collections::HashMap;

use crate::tournament::models::{Tournament, TournamentId};

/// In-memory tournament registry backed by a repository
pub struct TournamentStore {
    repository: Box<dyn TournamentRepository>,
    tournaments: HashMap<TournamentId, Tournament>,
}

impl TournamentStore {
    /// Open the store, loading every persisted tournament into memory
    pub fn open(repository: Box<dyn TournamentRepository>) -> StoreResult<Self> {
        let tournaments = repository.load_all()?;
        Ok(Self {
            repository,
            tournaments,
        })
    }

    /// Look up a tournament by ID
    pub fn get(&self, id: &str) -> Option<&Tournament> {
        self.tournaments.get(id)
    }

    /// Whether a tournament with this ID exists
    pub fn contains(&self, id: &str) -> bool {
        self.tournaments.contains_key(id)
    }

    /// Number of active tournaments
    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    /// Whether no tournaments are active
    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    /// Iterate over every active tournament, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments.values()
    }

    /// Persist and install a new or updated tournament.
    ///
    /// The backend write happens against a copy of the collection; the
    /// registry is only swapped once the write succeeds.
    pub fn commit(&mut self, tournament: Tournament) -> StoreResult<()> {
        let mut next = self.tournaments.clone();
        next.insert(tournament.id.clone(), tournament);
        self.repository.save_all(&next)?;
        self.tournaments = next;
        Ok(())
    }

    /// Remove a tournament and persist the removal. Returns the removed
    /// tournament, or `None` if the ID was unknown (nothing is written).
    pub fn remove(&mut self, id: &str) -> StoreResult<Option<Tournament>> {
        if !self.tournaments.contains_key(id) {
            return Ok(None);
        }
        let mut next = self.tournaments.clone();
        let removed = next.remove(id);
        self.repository.save_all(&next)?;
        self.tournaments = next;
        Ok(removed)
    }
}
