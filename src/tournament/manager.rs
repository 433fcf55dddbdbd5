//! Tournament manager: the externally callable operation surface.
//!
//! Composes the roster, bracket, and progression components and owns
//! persistence timing: every mutating operation validates and mutates a
//! copy of the stored tournament, then commits it, so a failed backend
//! write leaves the registry at its pre-operation state and the operation
//! can simply be retried.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::bracket::{self, FormationReport};
use super::errors::{TournamentError, TournamentResult};
use super::models::{MatchId, TeamId, Tournament, TournamentId, TournamentStatus};
use super::{progress, roster};
use crate::store::TournamentStore;

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LENGTH: usize = 5;

/// Tournament manager.
///
/// Single-writer by construction: every operation takes `&mut self`, so
/// calls on the same manager are serialized. Callers wanting parallelism
/// across tournaments compose multiple managers over disjoint stores.
pub struct TournamentManager {
    store: TournamentStore,
    rng: StdRng,
}

impl TournamentManager {
    /// Manager with an OS-seeded RNG
    pub fn new(store: TournamentStore) -> Self {
        Self {
            store,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Manager with a fixed seed, for deterministic bracket shapes in tests
    pub fn with_seed(store: TournamentStore, seed: u64) -> Self {
        Self {
            store,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a tournament in the `Recruiting` phase and persist it.
    ///
    /// Counts must be positive and the team configuration must fit the
    /// capacity (`team_count * players_per_team <= max_participants`).
    pub fn create_tournament(
        &mut self,
        game: &str,
        max_participants: u32,
        team_count: u32,
        players_per_team: u32,
        prize: &str,
        start_time: DateTime<Utc>,
    ) -> TournamentResult<TournamentId> {
        if max_participants == 0 {
            return Err(TournamentError::InvalidConfig(
                "max_participants must be positive".to_string(),
            ));
        }
        if team_count == 0 || players_per_team == 0 {
            return Err(TournamentError::InvalidConfig(
                "team_count and players_per_team must be positive".to_string(),
            ));
        }
        match team_count.checked_mul(players_per_team) {
            Some(needed) if needed <= max_participants => {}
            Some(needed) => {
                return Err(TournamentError::InvalidConfig(format!(
                    "team configuration requires {needed} players, but capacity is {max_participants}"
                )));
            }
            None => {
                return Err(TournamentError::InvalidConfig(format!(
                    "team configuration overflows: {team_count} teams of {players_per_team}"
                )));
            }
        }

        let id = self.fresh_id();
        let tournament = Tournament {
            id: id.clone(),
            game: game.to_string(),
            prize: prize.to_string(),
            max_participants,
            team_count,
            players_per_team,
            start_time,
            created_at: Utc::now(),
            status: TournamentStatus::Recruiting,
            participants: Vec::new(),
            teams: Vec::new(),
            matches: Vec::new(),
        };
        self.store.commit(tournament)?;
        log::info!("created tournament {id} ({game})");
        Ok(id)
    }

    /// Register a participant
    pub fn join(
        &mut self,
        id: &str,
        participant_id: &str,
        display_name: &str,
    ) -> TournamentResult<()> {
        self.mutate(id, |t, _| roster::join(t, participant_id, display_name, Utc::now()))
    }

    /// Remove a participant
    pub fn leave(&mut self, id: &str, participant_id: &str) -> TournamentResult<()> {
        self.mutate(id, |t, _| roster::leave(t, participant_id))
    }

    /// Partition participants into teams, closing recruitment
    pub fn form_teams(&mut self, id: &str) -> TournamentResult<FormationReport> {
        self.mutate(id, |t, rng| bracket::form_teams(t, rng))
    }

    /// Build the bracket and start the tournament. Usable directly from
    /// `Recruiting`; teams are formed first in that case.
    pub fn build_bracket(&mut self, id: &str) -> TournamentResult<()> {
        self.mutate(id, |t, rng| bracket::build_bracket(t, rng))
    }

    /// Record a match result and advance the winner
    pub fn record_result(
        &mut self,
        id: &str,
        match_id: MatchId,
        winner_id: TeamId,
        score1: u32,
        score2: u32,
    ) -> TournamentResult<()> {
        self.mutate(id, |t, _| {
            progress::record_result(t, match_id, winner_id, score1, score2)
        })
    }

    /// Rename a team, allowed while teams exist and play continues
    pub fn rename_team(
        &mut self,
        id: &str,
        team_id: TeamId,
        new_name: &str,
    ) -> TournamentResult<()> {
        self.mutate(id, |t, _| {
            if !matches!(
                t.status,
                TournamentStatus::TeamFormation | TournamentStatus::InProgress
            ) {
                return Err(TournamentError::WrongPhase {
                    expected: TournamentStatus::TeamFormation,
                    actual: t.status,
                });
            }
            let team = t
                .team_mut(team_id)
                .ok_or(TournamentError::TeamNotFound(team_id))?;
            team.name = new_name.to_string();
            Ok(())
        })
    }

    /// Look up a tournament
    pub fn get_tournament(&self, id: &str) -> TournamentResult<&Tournament> {
        self.store
            .get(id)
            .ok_or_else(|| TournamentError::TournamentNotFound(id.to_string()))
    }

    /// All active tournaments, in no particular order
    pub fn list_tournaments(&self) -> Vec<&Tournament> {
        self.store.iter().collect()
    }

    /// Champion of a completed tournament, if decided
    pub fn champion(&self, id: &str) -> TournamentResult<Option<TeamId>> {
        Ok(progress::champion(self.get_tournament(id)?))
    }

    /// Delete a tournament outright, from any phase
    pub fn delete_tournament(&mut self, id: &str) -> TournamentResult<()> {
        match self.store.remove(id)? {
            Some(_) => {
                log::info!("deleted tournament {id}");
                Ok(())
            }
            None => Err(TournamentError::TournamentNotFound(id.to_string())),
        }
    }

    /// Apply a mutation to a copy of the tournament and commit it.
    /// Validation errors and persistence failures both leave the registry
    /// untouched.
    fn mutate<T>(
        &mut self,
        id: &str,
        op: impl FnOnce(&mut Tournament, &mut StdRng) -> TournamentResult<T>,
    ) -> TournamentResult<T> {
        let mut tournament = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| TournamentError::TournamentNotFound(id.to_string()))?;
        let out = op(&mut tournament, &mut self.rng)?;
        self.store.commit(tournament)?;
        Ok(out)
    }

    /// Short random ID, re-rolled until unused among active tournaments
    fn fresh_id(&mut self) -> TournamentId {
        loop {
            let id: String = (0..ID_LENGTH)
                .map(|_| ID_CHARS[self.rng.random_range(0..ID_CHARS.len())] as char)
                .collect();
            if !self.store.contains(&id) {
                return id;
            }
        }
    }
}
