//! Tournament aggregate and error taxonomy.

use crate::logic::{powermatch, random_matching};
use crate::models::matchup::{Matchup, Round};
use crate::models::team::{Team, TeamId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during pairing and round bookkeeping.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A team that already received a bye was assigned a second one.
    TooManyByes { team: String, bye_round: u32 },
    /// A team's aff/neg round counts would differ by more than one.
    /// The counts reflect the attempted increment.
    ImbalancedRounds {
        team: String,
        aff_rounds: u32,
        neg_rounds: u32,
    },
    /// No legal assignment satisfies the matching constraints.
    CannotPair,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// A matchup references a team that is not in the roster.
    TeamNotFound(TeamId),
    /// The same team appears in more than one matchup of a round.
    TeamPairedTwice { team: String },
    /// A matchup pairs a team against itself.
    SelfMatchup { team: String },
    /// Rounds must be committed in increasing, contiguous order.
    RoundOutOfOrder { expected: u32, got: u32 },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::TooManyByes { team, bye_round } => {
                write!(f, "{} already had a bye in round {}", team, bye_round)
            }
            TournamentError::ImbalancedRounds {
                team,
                aff_rounds,
                neg_rounds,
            } => write!(
                f,
                "{} has had {} aff rounds and {} neg rounds",
                team, aff_rounds, neg_rounds
            ),
            TournamentError::CannotPair => write!(f, "Cannot pair teams"),
            TournamentError::DuplicateTeamName => {
                write!(f, "A team with this name already exists")
            }
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::TeamPairedTwice { team } => {
                write!(f, "{} appears in more than one matchup", team)
            }
            TournamentError::SelfMatchup { team } => {
                write!(f, "{} cannot be paired against itself", team)
            }
            TournamentError::RoundOutOfOrder { expected, got } => {
                write!(f, "Expected round {}, got round {}", expected, got)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// The aggregate: all registered teams (in entry order) and every committed
/// round. A round only ever enters `rounds` together with its side effects
/// on the teams; a failed commit leaves both untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub teams: Vec<Team>,
    pub rounds: Vec<Round>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create a new tournament with no teams or rounds.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            teams: Vec::new(),
            rounds: Vec::new(),
        }
    }

    /// Create a tournament from an initial roster (e.g. from a request).
    /// Duplicate names are rejected.
    pub fn with_teams(teams: Vec<Team>) -> Result<Self, TournamentError> {
        let mut tournament = Self::new();
        for team in teams {
            tournament.add_team(team)?;
        }
        Ok(tournament)
    }

    /// Register a team. Names must be unique (case-insensitive).
    pub fn add_team(&mut self, team: Team) -> Result<(), TournamentError> {
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(&team.name));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        self.teams.push(team);
        Ok(())
    }

    /// Reference to a team by id.
    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Mutable reference to a team by id.
    pub fn get_team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    /// Look up a team by name (case-insensitive).
    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// The number the next committed round must carry.
    pub fn next_round_number(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    /// Pair teams in roster order two at a time; an odd roster gives the last
    /// team a bye. No eligibility checking happens here; `add_round` enforces
    /// everything when the round is committed.
    pub fn generate_round(&self) -> Round {
        let mut round = Round::new(self.next_round_number());
        for pair in self.teams.chunks(2) {
            round.add_matchup(match pair {
                [aff, neg] => Matchup::new(aff.id, neg.id),
                [aff] => Matchup::bye(aff.id),
                _ => unreachable!("chunks(2) yields one or two teams"),
            });
        }
        round
    }

    /// Generate the next round with the cost-optimized engine.
    pub fn generate_powermatched_round(&self) -> Result<Round, TournamentError> {
        let matchups = powermatch(&self.teams)?;
        Ok(Round::with_matchups(self.next_round_number(), matchups))
    }

    /// Generate the next round with the cost-randomized engine.
    pub fn generate_random_round(&self, rng: &mut impl Rng) -> Result<Round, TournamentError> {
        let matchups = random_matching(&self.teams, rng)?;
        Ok(Round::with_matchups(self.next_round_number(), matchups))
    }

    /// Commit a round: validate it, record its side effects, append it.
    ///
    /// The commit is all-or-nothing. Recording runs against a staged copy of
    /// the roster and the copy only replaces the live teams when every
    /// matchup has recorded cleanly, so an error raised mid-round (e.g. a
    /// side-balance violation) leaves the tournament unchanged.
    pub fn add_round(&mut self, round: Round) -> Result<(), TournamentError> {
        let expected = self.next_round_number();
        if round.number != expected {
            return Err(TournamentError::RoundOutOfOrder {
                expected,
                got: round.number,
            });
        }
        round.validate(&self.teams)?;
        let mut staged = self.teams.clone();
        round.record(&mut staged)?;
        self.teams = staged;
        self.rounds.push(round);
        Ok(())
    }

    /// Apply a decided pairing outcome: one win, one loss.
    pub fn record_result(&mut self, winner: TeamId, loser: TeamId) -> Result<(), TournamentError> {
        self.get_team_mut(winner)
            .ok_or(TournamentError::TeamNotFound(winner))?
            .wins += 1;
        self.get_team_mut(loser)
            .ok_or(TournamentError::TeamNotFound(loser))?
            .losses += 1;
        Ok(())
    }

    /// Credit a bye as a win.
    pub fn record_bye_win(&mut self, team: TeamId) -> Result<(), TournamentError> {
        self.get_team_mut(team)
            .ok_or(TournamentError::TeamNotFound(team))?
            .wins += 1;
        Ok(())
    }

    /// Teams ordered for standings: wins descending, then losses ascending.
    pub fn standings(&self) -> Vec<&Team> {
        let mut ranked: Vec<&Team> = self.teams.iter().collect();
        ranked.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.losses.cmp(&b.losses)));
        ranked
    }
}
