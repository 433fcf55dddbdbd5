//! Match progression: recording results and advancing winners.

use super::errors::{TournamentError, TournamentResult};
use super::models::{MatchId, MatchStatus, TeamId, Tournament, TournamentStatus};

/// Record a match result and propagate the winner.
///
/// The match must be pending with both slots resolved, and `winner_id`
/// must be one of the two teams. On success the winner is filled into
/// every later slot waiting on this match (a full scan over the bracket,
/// fine at this scale), team win/loss counters are updated, and the
/// tournament completes once every final-round match is completed.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner_id: TeamId,
    score1: u32,
    score2: u32,
) -> TournamentResult<()> {
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::WrongPhase {
            expected: TournamentStatus::InProgress,
            actual: tournament.status,
        });
    }

    let loser_id = {
        let m = tournament
            .matches
            .iter_mut()
            .find(|m| m.match_id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;

        if m.status == MatchStatus::Completed {
            return Err(TournamentError::AlreadyCompleted(match_id));
        }
        // A match with an unresolved slot cannot be scored yet.
        let (Some(team1), Some(team2)) = (m.team1.team(), m.team2.team()) else {
            return Err(TournamentError::InvalidWinner(winner_id));
        };
        let loser_id = if winner_id == team1 {
            team2
        } else if winner_id == team2 {
            team1
        } else {
            return Err(TournamentError::InvalidWinner(winner_id));
        };

        m.winner_id = Some(winner_id);
        m.loser_id = Some(loser_id);
        m.score = (score1, score2);
        m.status = MatchStatus::Completed;
        loser_id
    };

    if let Some(team) = tournament.team_mut(winner_id) {
        team.wins += 1;
    }
    if let Some(team) = tournament.team_mut(loser_id) {
        team.losses += 1;
    }

    for m in &mut tournament.matches {
        m.team1.fill_from(match_id, winner_id);
        m.team2.fill_from(match_id, winner_id);
    }

    if let Some(final_round) = tournament.final_round()
        && tournament
            .matches
            .iter()
            .filter(|m| m.round == final_round)
            .all(|m| m.status == MatchStatus::Completed)
    {
        tournament.status = TournamentStatus::Completed;
        log::info!("tournament {} completed", tournament.id);
    }

    Ok(())
}

/// Champion of a completed tournament.
///
/// Returns the final's winner, or the lone team for a single-team
/// tournament; `None` while the tournament is still running.
pub fn champion(tournament: &Tournament) -> Option<TeamId> {
    if tournament.status != TournamentStatus::Completed {
        return None;
    }
    match tournament.final_round() {
        Some(final_round) => tournament
            .matches
            .iter()
            .find(|m| m.round == final_round)
            .and_then(|m| m.winner_id),
        None => tournament.teams.first().map(|t| t.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::bracket::build_bracket;
    use crate::tournament::models::{Participant, Slot};
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn in_progress(n: usize) -> Tournament {
        let mut t = Tournament {
            id: "t0001".to_string(),
            game: "Tekken".to_string(),
            prize: "Cup".to_string(),
            max_participants: n as u32,
            team_count: n as u32,
            players_per_team: 1,
            start_time: Utc::now(),
            created_at: Utc::now(),
            status: TournamentStatus::Recruiting,
            participants: (0..n)
                .map(|i| Participant {
                    id: format!("u{i}"),
                    display_name: format!("Player {i}"),
                    joined_at: Utc::now(),
                })
                .collect(),
            teams: vec![],
            matches: vec![],
        };
        build_bracket(&mut t, &mut StdRng::seed_from_u64(9)).expect("build");
        t
    }

    /// Play every match in ID order; feeders always complete before the
    /// matches they feed. The slot-1 team always wins.
    fn play_out(t: &mut Tournament) {
        let ids: Vec<MatchId> = t.matches.iter().map(|m| m.match_id).collect();
        for id in ids {
            let winner = t
                .match_by_id(id)
                .and_then(|m| m.team1_id())
                .expect("slot resolved by earlier results");
            record_result(t, id, winner, 1, 0).expect("record");
        }
    }

    #[test]
    fn test_winner_propagates_to_the_waiting_slot() {
        let mut t = in_progress(4);
        let first = t.matches[0].match_id;
        let winner = t.matches[0].team1_id().expect("seeded");

        record_result(&mut t, first, winner, 2, 1).expect("record");

        let final_match = t.matches.iter().find(|m| m.round == 2).expect("final");
        assert_eq!(final_match.team1.team(), Some(winner));
        assert_eq!(final_match.team2.team(), None, "other feeder still pending");
    }

    #[test]
    fn test_record_updates_team_records_and_score() {
        let mut t = in_progress(4);
        let first = t.matches[0].match_id;
        let winner = t.matches[0].team1_id().expect("seeded");
        let loser = t.matches[0].team2_id().expect("seeded");

        record_result(&mut t, first, winner, 13, 7).expect("record");

        let m = t.match_by_id(first).expect("match");
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.winner_id, Some(winner));
        assert_eq!(m.loser_id, Some(loser));
        assert_eq!(m.score, (13, 7));
        assert_eq!(t.team(winner).map(|tm| (tm.wins, tm.losses)), Some((1, 0)));
        assert_eq!(t.team(loser).map(|tm| (tm.wins, tm.losses)), Some((0, 1)));
    }

    #[test]
    fn test_record_is_not_reapplicable() {
        let mut t = in_progress(4);
        let first = t.matches[0].match_id;
        let winner = t.matches[0].team1_id().expect("seeded");
        let loser = t.matches[0].team2_id().expect("seeded");

        record_result(&mut t, first, winner, 2, 0).expect("record");
        let err = record_result(&mut t, first, loser, 0, 2).unwrap_err();
        assert!(matches!(err, TournamentError::AlreadyCompleted(id) if id == first));

        // Score and winner untouched by the rejected second call.
        let m = t.match_by_id(first).expect("match");
        assert_eq!(m.winner_id, Some(winner));
        assert_eq!(m.score, (2, 0));
        assert_eq!(t.team(winner).map(|tm| tm.wins), Some(1));
    }

    #[test]
    fn test_winner_must_play_in_the_match() {
        let mut t = in_progress(4);
        let first = t.matches[0].match_id;
        let outsider = t
            .teams
            .iter()
            .map(|tm| tm.id)
            .find(|id| {
                t.matches[0].team1_id() != Some(*id) && t.matches[0].team2_id() != Some(*id)
            })
            .expect("four teams, two per match");

        let err = record_result(&mut t, first, outsider, 1, 0).unwrap_err();
        assert!(matches!(err, TournamentError::InvalidWinner(id) if id == outsider));
        assert_eq!(
            t.match_by_id(first).map(|m| m.status),
            Some(MatchStatus::Pending)
        );
    }

    #[test]
    fn test_unresolved_match_cannot_be_scored() {
        let mut t = in_progress(4);
        let final_match = t.matches.iter().find(|m| m.round == 2).expect("final");
        assert!(matches!(final_match.team1, Slot::FromMatch { .. }));
        let final_id = final_match.match_id;

        let err = record_result(&mut t, final_id, 1, 1, 0).unwrap_err();
        assert!(matches!(err, TournamentError::InvalidWinner(_)));
    }

    #[test]
    fn test_unknown_match() {
        let mut t = in_progress(4);
        assert!(matches!(
            record_result(&mut t, 99, 1, 1, 0),
            Err(TournamentError::MatchNotFound(99))
        ));
    }

    #[test]
    fn test_record_requires_in_progress() {
        let mut t = in_progress(4);
        t.status = TournamentStatus::Completed;
        assert!(matches!(
            record_result(&mut t, 1, 1, 1, 0),
            Err(TournamentError::WrongPhase { .. })
        ));
    }

    #[test]
    fn test_full_playthrough_completes_the_tournament() {
        for n in [2usize, 3, 4, 5, 8, 11] {
            let mut t = in_progress(n);
            play_out(&mut t);

            assert_eq!(t.status, TournamentStatus::Completed, "n = {n}");
            assert_eq!(t.matches.len(), n - 1, "n = {n}");
            assert!(
                t.matches
                    .iter()
                    .all(|m| m.status == MatchStatus::Completed && m.winner_id.is_some()
                        && m.loser_id.is_some())
            );

            let champ = champion(&t).expect("champion");
            let champ_team = t.team(champ).expect("team");
            assert_eq!(champ_team.losses, 0);
            assert_eq!(
                champ_team.wins as usize,
                t.matches
                    .iter()
                    .filter(|m| m.winner_id == Some(champ))
                    .count()
            );

            // Every other team lost exactly once.
            let losses: u32 = t.teams.iter().map(|tm| tm.losses).sum();
            assert_eq!(losses as usize, n - 1);
        }
    }

    #[test]
    fn test_champion_is_none_while_running() {
        let mut t = in_progress(4);
        assert_eq!(champion(&t), None);

        let first = t.matches[0].match_id;
        let winner = t.matches[0].team1_id().expect("seeded");
        record_result(&mut t, first, winner, 1, 0).expect("record");
        assert_eq!(champion(&t), None);
    }
}
