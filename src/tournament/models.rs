//! Tournament data models for single-elimination brackets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short opaque tournament ID, unique among active tournaments
pub type TournamentId = String;

/// Opaque participant identity assigned by the front end
pub type ParticipantId = String;

/// Team ID, 1-indexed within a tournament
pub type TeamId = u32;

/// Match ID, unique within a tournament
pub type MatchId = u32;

/// Tournament lifecycle phase, strictly forward-moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Accepting participants
    Recruiting,
    /// Teams formed, bracket not yet built
    TeamFormation,
    /// Bracket built, matches being played
    InProgress,
    /// Final match completed
    Completed,
}

/// A registered participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant ID, unique within the tournament
    pub id: ParticipantId,
    /// Display name as provided by the front end
    pub display_name: String,
    /// Registration timestamp
    pub joined_at: DateTime<Utc>,
}

/// A team of participants, assembled once at team formation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID (1..=team_count)
    pub id: TeamId,
    /// Team name, renameable while the tournament runs
    pub name: String,
    /// Fixed member list assigned at formation
    pub members: Vec<Participant>,
    /// Matches won
    pub wins: u32,
    /// Matches lost
    pub losses: u32,
}

impl Team {
    /// Default name for a team ID
    pub fn default_name(id: TeamId) -> String {
        format!("Team {id}")
    }
}

/// One of the two team positions in a match.
///
/// A slot is either filled at bracket build time or waits for the winner
/// of an earlier match, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Team placed directly at build time (round 1, or a round-2 bye)
    Seeded(TeamId),
    /// Placeholder for the winner of an earlier match
    FromMatch {
        /// The feeding match
        match_id: MatchId,
        /// Filled in once the feeding match completes
        winner: Option<TeamId>,
    },
}

impl Slot {
    /// Unresolved placeholder fed by `match_id`
    pub fn from_match(match_id: MatchId) -> Self {
        Slot::FromMatch {
            match_id,
            winner: None,
        }
    }

    /// The team occupying this slot, if resolved
    pub fn team(&self) -> Option<TeamId> {
        match self {
            Slot::Seeded(team_id) => Some(*team_id),
            Slot::FromMatch { winner, .. } => *winner,
        }
    }

    /// Whether this slot is still waiting on the given match
    pub fn awaits(&self, id: MatchId) -> bool {
        matches!(self, Slot::FromMatch { match_id, winner } if *match_id == id && winner.is_none())
    }

    /// Resolve this slot with the winner of the given match, if it is the
    /// slot's feeder. Seeded and already-resolved slots are untouched.
    pub fn fill_from(&mut self, completed: MatchId, winner_id: TeamId) {
        if let Slot::FromMatch { match_id, winner } = self
            && *match_id == completed
            && winner.is_none()
        {
            *winner = Some(winner_id);
        }
    }
}

/// Match completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Not yet played
    Pending,
    /// Result recorded; never reopened
    Completed,
}

/// A bracket match, mutated in place as results arrive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match ID, strictly increasing across the bracket
    pub match_id: MatchId,
    /// Round number, 1-indexed
    pub round: u32,
    /// First team slot
    pub team1: Slot,
    /// Second team slot
    pub team2: Slot,
    /// Winning team, set on completion
    pub winner_id: Option<TeamId>,
    /// Losing team, set on completion
    pub loser_id: Option<TeamId>,
    /// (team1, team2) score
    pub score: (u32, u32),
    /// Completion state
    pub status: MatchStatus,
}

impl Match {
    /// New pending match
    pub fn new(match_id: MatchId, round: u32, team1: Slot, team2: Slot) -> Self {
        Self {
            match_id,
            round,
            team1,
            team2,
            winner_id: None,
            loser_id: None,
            score: (0, 0),
            status: MatchStatus::Pending,
        }
    }

    /// Resolved team in the first slot, if any
    pub fn team1_id(&self) -> Option<TeamId> {
        self.team1.team()
    }

    /// Resolved team in the second slot, if any
    pub fn team2_id(&self) -> Option<TeamId> {
        self.team2.team()
    }
}

/// A tournament and everything it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Short opaque ID
    pub id: TournamentId,
    /// Game being played (free text, not interpreted)
    pub game: String,
    /// Prize description (free text, not interpreted)
    pub prize: String,
    /// Registration capacity
    pub max_participants: u32,
    /// Number of teams to form
    pub team_count: u32,
    /// Players per team
    pub players_per_team: u32,
    /// Informational start time, not enforced by the engine
    pub start_time: DateTime<Utc>,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Lifecycle phase
    pub status: TournamentStatus,
    /// Participants in join order
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Teams, populated once at formation
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Bracket matches, populated once at build time
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Tournament {
    /// Participants needed to fill every team. Widened so the product
    /// cannot overflow even for configs that never passed creation-time
    /// validation (e.g. hand-edited documents).
    pub fn required_players(&self) -> usize {
        u64::from(self.team_count)
            .saturating_mul(u64::from(self.players_per_team))
            .min(usize::MAX as u64) as usize
    }

    /// Look up a team by ID
    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Look up a team by ID, mutably
    pub fn team_mut(&mut self, team_id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }

    /// Look up a match by ID
    pub fn match_by_id(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.match_id == match_id)
    }

    /// Highest round number in the bracket, if any matches exist
    pub fn final_round(&self) -> Option<u32> {
        self.matches.iter().map(|m| m.round).max()
    }

    /// Team name, falling back to the default when the team is unknown
    pub fn team_name(&self, team_id: TeamId) -> String {
        self.team(team_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| Team::default_name(team_id))
    }

    /// Display names of a team's members, empty when the team is unknown
    pub fn team_member_names(&self, team_id: TeamId) -> Vec<String> {
        self.team(team_id)
            .map(|t| t.members.iter().map(|m| m.display_name.clone()).collect())
            .unwrap_or_default()
    }
}
