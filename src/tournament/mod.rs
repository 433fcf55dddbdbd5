//! Single-elimination tournament engine.
//!
//! This module provides the full tournament lifecycle:
//! - Participant registration against capacity and phase constraints
//! - Random partitioning of participants into fixed-size teams
//! - Bracket construction with bye handling for non-power-of-two team counts
//! - Match result recording with winner propagation round by round
//!
//! ## Example
//!
//! ```
//! use tournament_engine::store::{MemoryRepository, TournamentStore};
//! use tournament_engine::tournament::TournamentManager;
//! use chrono::Utc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = TournamentStore::open(Box::new(MemoryRepository::new()))?;
//! let mut manager = TournamentManager::with_seed(store, 42);
//!
//! let id = manager.create_tournament("Rocket League", 8, 4, 2, "Steam keys", Utc::now())?;
//! for i in 0..8 {
//!     manager.join(&id, &format!("user-{i}"), &format!("Player {i}"))?;
//! }
//! manager.build_bracket(&id)?;
//! # Ok(())
//! # }
//! ```

pub mod bracket;
pub mod errors;
pub mod manager;
pub mod models;
pub mod progress;
pub mod roster;

pub use bracket::FormationReport;
pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    Match, MatchId, MatchStatus, Participant, ParticipantId, Slot, Team, TeamId, Tournament,
    TournamentId, TournamentStatus,
};
