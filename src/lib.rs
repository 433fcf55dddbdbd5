//! # Tournament Engine
//!
//! A single-elimination tournament bracket engine: it turns a pool of
//! registered participants into fixed-size teams, builds a bracket
//! (handling non-power-of-two team counts via byes), and advances winners
//! round by round until a champion emerges.
//!
//! ## Architecture
//!
//! A tournament moves through four strictly forward phases:
//!
//! - **Recruiting**: participants join and leave
//! - **TeamFormation**: participants shuffled into fixed-size teams
//! - **InProgress**: bracket built, results recorded match by match
//! - **Completed**: every final-round match decided
//!
//! ## Core Modules
//!
//! - [`tournament`]: data model, lifecycle components, and the manager
//! - [`store`]: in-memory registry mirrored to a persistence backend
//!
//! ## Example
//!
//! ```
//! use tournament_engine::{MemoryRepository, TournamentManager, TournamentStore};
//! use chrono::Utc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = TournamentStore::open(Box::new(MemoryRepository::new()))?;
//! let mut manager = TournamentManager::new(store);
//! let id = manager.create_tournament("Chess", 4, 4, 1, "A book", Utc::now())?;
//! # Ok(())
//! # }
//! ```

/// Entity store and persistence backends.
pub mod store;
pub use store::{
    JsonFileRepository, MemoryRepository, StoreError, TournamentRepository, TournamentStore,
};

/// Tournament lifecycle, bracket logic, and the manager.
pub mod tournament;
pub use tournament::{
    FormationReport, Match, MatchId, MatchStatus, Participant, ParticipantId, Slot, Team, TeamId,
    Tournament, TournamentError, TournamentId, TournamentManager, TournamentResult,
    TournamentStatus,
};
