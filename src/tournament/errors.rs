//! Tournament engine error types.

use thiserror::Error;

use super::models::{MatchId, ParticipantId, TeamId, TournamentId, TournamentStatus};
use crate::store::StoreError;

/// Tournament engine errors.
///
/// Everything except `Persistence` is a validation error: safe to retry
/// after correcting the input, with no state left behind. A `Persistence`
/// failure aborts the whole operation and the in-memory registry keeps its
/// pre-operation state.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Operation not allowed in the tournament's current phase
    #[error("wrong phase: expected {expected:?}, got {actual:?}")]
    WrongPhase {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    /// No tournament with this ID
    #[error("tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    /// No such participant in the tournament
    #[error("participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// No such team in the tournament
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// No such match in the bracket
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    /// Participant is already registered
    #[error("participant already joined: {0}")]
    AlreadyJoined(ParticipantId),

    /// Tournament is at capacity
    #[error("tournament is full: {0} participants")]
    Full(usize),

    /// Not enough participants to fill every team
    #[error("insufficient participants: need {needed}, have {have}")]
    InsufficientParticipants { needed: usize, have: usize },

    /// The reported winner is not playing in the match
    #[error("team {0} is not a valid winner for this match")]
    InvalidWinner(TeamId),

    /// The match already has a recorded result
    #[error("match {0} has already been completed")]
    AlreadyCompleted(MatchId),

    /// Creation-time configuration rejected
    #[error("invalid tournament configuration: {0}")]
    InvalidConfig(String),

    /// Backend write or read failed; non-recoverable within the call
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
