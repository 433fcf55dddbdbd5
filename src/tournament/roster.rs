//! Participant registry: joining and leaving while recruiting.
//!
//! These functions validate and mutate a tournament in place; persistence
//! timing belongs to the manager.

use chrono::{DateTime, Utc};

use super::errors::{TournamentError, TournamentResult};
use super::models::{Participant, Tournament, TournamentStatus};

/// Register a participant.
///
/// Fails with `WrongPhase` once recruitment has closed, `AlreadyJoined` for
/// a duplicate ID, and `Full` at capacity. Join order is preserved.
pub fn join(
    tournament: &mut Tournament,
    participant_id: &str,
    display_name: &str,
    now: DateTime<Utc>,
) -> TournamentResult<()> {
    if tournament.status != TournamentStatus::Recruiting {
        return Err(TournamentError::WrongPhase {
            expected: TournamentStatus::Recruiting,
            actual: tournament.status,
        });
    }
    if tournament.participants.iter().any(|p| p.id == participant_id) {
        return Err(TournamentError::AlreadyJoined(participant_id.to_string()));
    }
    if tournament.participants.len() >= tournament.max_participants as usize {
        return Err(TournamentError::Full(tournament.participants.len()));
    }

    tournament.participants.push(Participant {
        id: participant_id.to_string(),
        display_name: display_name.to_string(),
        joined_at: now,
    });
    Ok(())
}

/// Remove a participant.
///
/// Fails with `WrongPhase` once recruitment has closed and
/// `ParticipantNotFound` when the ID is not registered.
pub fn leave(tournament: &mut Tournament, participant_id: &str) -> TournamentResult<()> {
    if tournament.status != TournamentStatus::Recruiting {
        return Err(TournamentError::WrongPhase {
            expected: TournamentStatus::Recruiting,
            actual: tournament.status,
        });
    }
    let position = tournament
        .participants
        .iter()
        .position(|p| p.id == participant_id)
        .ok_or_else(|| TournamentError::ParticipantNotFound(participant_id.to_string()))?;

    tournament.participants.remove(position);
    Ok(())
}
