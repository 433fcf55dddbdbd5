//! Team formation and single-elimination bracket construction.
//!
//! Bracket shape for `n` teams: `rounds = ceil(log2(n))` and
//! `byes = 2^rounds - n`. The `n - byes` non-bye teams play round 1; the
//! bye teams enter directly in round 2, paired first with each other and
//! then with round-1 winners. Because `byes` is computed against the next
//! power of two, every round from 2 onward pairs evenly, and the total
//! match count is always `n - 1`.

use rand::Rng;
use rand::seq::SliceRandom;

use super::errors::{TournamentError, TournamentResult};
use super::models::{Match, MatchId, Slot, Team, TeamId, Tournament, TournamentStatus};

/// Outcome of team formation.
///
/// `dropped` counts participants beyond `team_count * players_per_team`
/// who were left without a team and take no further part. Surfaced here so
/// the caller can warn instead of silently losing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationReport {
    /// Teams created
    pub teams_formed: usize,
    /// Participants not assigned to any team
    pub dropped: usize,
}

/// Partition participants into fixed-size teams.
///
/// Shuffles the participant list uniformly, then slices it into
/// `team_count` contiguous groups of `players_per_team`. Only callable
/// while recruiting; a second call fails with `WrongPhase`.
pub fn form_teams<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> TournamentResult<FormationReport> {
    if tournament.status != TournamentStatus::Recruiting {
        return Err(TournamentError::WrongPhase {
            expected: TournamentStatus::Recruiting,
            actual: tournament.status,
        });
    }

    let needed = tournament.required_players();
    let have = tournament.participants.len();
    if have < needed {
        return Err(TournamentError::InsufficientParticipants { needed, have });
    }

    let mut pool = tournament.participants.clone();
    pool.shuffle(rng);

    let group_size = tournament.players_per_team as usize;
    let teams: Vec<Team> = pool
        .chunks_exact(group_size)
        .take(tournament.team_count as usize)
        .enumerate()
        .map(|(i, group)| {
            let id = i as TeamId + 1;
            Team {
                id,
                name: Team::default_name(id),
                members: group.to_vec(),
                wins: 0,
                losses: 0,
            }
        })
        .collect();

    let dropped = have - needed;
    if dropped > 0 {
        log::warn!(
            "tournament {}: {} participants left without a team",
            tournament.id,
            dropped
        );
    }

    let report = FormationReport {
        teams_formed: teams.len(),
        dropped,
    };
    tournament.teams = teams;
    tournament.status = TournamentStatus::TeamFormation;
    log::info!(
        "tournament {}: formed {} teams",
        tournament.id,
        report.teams_formed
    );
    Ok(report)
}

/// Build the full match graph and start the tournament.
///
/// Callable from `TeamFormation`, or directly from `Recruiting` (teams are
/// formed first, propagating any failure). Match IDs are assigned strictly
/// increasing, round by round. A single-team tournament has no matches and
/// completes immediately.
pub fn build_bracket<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> TournamentResult<()> {
    match tournament.status {
        TournamentStatus::Recruiting => {
            form_teams(tournament, rng)?;
        }
        TournamentStatus::TeamFormation => {}
        actual => {
            return Err(TournamentError::WrongPhase {
                expected: TournamentStatus::TeamFormation,
                actual,
            });
        }
    }

    let n = tournament.teams.len();
    if n == 1 {
        // Lone team is champion by walkover.
        tournament.matches = Vec::new();
        tournament.status = TournamentStatus::Completed;
        log::info!("tournament {}: single team, completed immediately", tournament.id);
        return Ok(());
    }

    let bracket_size = n.next_power_of_two();
    let rounds = bracket_size.trailing_zeros();
    let byes = bracket_size - n;

    let mut team_ids: Vec<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
    team_ids.shuffle(rng);
    let (playing, seeded) = team_ids.split_at(n - byes);

    let mut matches: Vec<Match> = Vec::with_capacity(n - 1);
    let mut next_id: MatchId = 1;

    // Round 1: non-bye teams paired consecutively in shuffled order.
    let mut round1_feeders: Vec<MatchId> = Vec::with_capacity(playing.len() / 2);
    for pair in playing.chunks_exact(2) {
        matches.push(Match::new(
            next_id,
            1,
            Slot::Seeded(pair[0]),
            Slot::Seeded(pair[1]),
        ));
        round1_feeders.push(next_id);
        next_id += 1;
    }

    // Round 2 entrants: bye teams first, then round-1 winners. The list has
    // exactly 2^(rounds - 1) entries, so pairing is always even.
    let mut entrants: Vec<Slot> = seeded.iter().map(|&id| Slot::Seeded(id)).collect();
    entrants.extend(round1_feeders.into_iter().map(Slot::from_match));

    for round in 2..=rounds {
        debug_assert_eq!(entrants.len() % 2, 0);
        let mut winners: Vec<MatchId> = Vec::with_capacity(entrants.len() / 2);
        for pair in entrants.chunks_exact(2) {
            matches.push(Match::new(next_id, round, pair[0].clone(), pair[1].clone()));
            winners.push(next_id);
            next_id += 1;
        }
        entrants = winners.into_iter().map(Slot::from_match).collect();
    }

    tournament.matches = matches;
    tournament.status = TournamentStatus::InProgress;
    log::info!(
        "tournament {}: bracket built with {} rounds, {} byes",
        tournament.id,
        rounds,
        byes
    );
    Ok(())
}
