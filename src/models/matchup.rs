//! Matchup (pairing or bye) and Round for one round of competition.

use crate::models::team::{Team, TeamId};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// A single pairing for one round: an affirmative team and either a negative
/// team or, when `neg` is absent, a bye for `aff`.
///
/// Teams are referenced by id and resolved against the tournament roster; a
/// matchup never owns the teams it pairs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub aff: TeamId,
    pub neg: Option<TeamId>,
}

impl Matchup {
    pub fn new(aff: TeamId, neg: TeamId) -> Self {
        Self { aff, neg: Some(neg) }
    }

    pub fn bye(aff: TeamId) -> Self {
        Self { aff, neg: None }
    }

    pub fn is_bye(&self) -> bool {
        self.neg.is_none()
    }

    /// Whether this matchup references the given team on either side.
    pub fn contains(&self, team: TeamId) -> bool {
        self.aff == team || self.neg == Some(team)
    }

    /// Check this matchup against the roster without mutating anything:
    /// both sides must exist, a pairing must reference two distinct teams,
    /// and a bye is illegal for a team that already had one.
    pub fn validate(&self, teams: &[Team]) -> Result<(), TournamentError> {
        let aff = find_team(teams, self.aff)?;
        match self.neg {
            None => {
                if let Some(bye_round) = aff.bye_round() {
                    return Err(TournamentError::TooManyByes {
                        team: aff.name.clone(),
                        bye_round,
                    });
                }
            }
            Some(neg_id) => {
                find_team(teams, neg_id)?;
                if neg_id == self.aff {
                    return Err(TournamentError::SelfMatchup {
                        team: aff.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Apply this matchup's side effects for round `number`: a bye marks the
    /// bye round, a pairing bumps both side counters and records the teams as
    /// opponents of each other.
    pub fn record(&self, number: u32, teams: &mut [Team]) -> Result<(), TournamentError> {
        match self.neg {
            None => find_team_mut(teams, self.aff)?.record_bye(number),
            Some(neg_id) => {
                find_team_mut(teams, self.aff)?.record_aff(number)?;
                find_team_mut(teams, neg_id)?.record_neg(number)?;
                find_team_mut(teams, self.aff)?.record_opponent(neg_id);
                find_team_mut(teams, neg_id)?.record_opponent(self.aff);
                Ok(())
            }
        }
    }
}

/// An ordered collection of matchups for one round number.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub matchups: Vec<Matchup>,
}

impl Round {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            matchups: Vec::new(),
        }
    }

    pub fn with_matchups(number: u32, matchups: Vec<Matchup>) -> Self {
        Self { number, matchups }
    }

    pub fn add_matchup(&mut self, matchup: Matchup) {
        self.matchups.push(matchup);
    }

    /// Validate every matchup, failing fast on the first problem. Also
    /// rejects a team appearing in more than one matchup of this round.
    /// Nothing is mutated.
    pub fn validate(&self, teams: &[Team]) -> Result<(), TournamentError> {
        let mut seen: Vec<TeamId> = Vec::new();
        for matchup in &self.matchups {
            matchup.validate(teams)?;
            for id in [Some(matchup.aff), matchup.neg].into_iter().flatten() {
                if seen.contains(&id) {
                    let team = find_team(teams, id)?;
                    return Err(TournamentError::TeamPairedTwice {
                        team: team.name.clone(),
                    });
                }
                seen.push(id);
            }
        }
        Ok(())
    }

    /// Record every matchup in order. Callers are expected to have validated
    /// first; see `Tournament::add_round` for the atomic commit.
    pub fn record(&self, teams: &mut [Team]) -> Result<(), TournamentError> {
        for matchup in &self.matchups {
            matchup.record(self.number, teams)?;
        }
        Ok(())
    }
}

fn find_team(teams: &[Team], id: TeamId) -> Result<&Team, TournamentError> {
    teams
        .iter()
        .find(|t| t.id == id)
        .ok_or(TournamentError::TeamNotFound(id))
}

fn find_team_mut(teams: &mut [Team], id: TeamId) -> Result<&mut Team, TournamentError> {
    teams
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TournamentError::TeamNotFound(id))
}
