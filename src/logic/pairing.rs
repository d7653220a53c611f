//! Caller-facing pairing service: roster snapshot in, matchups by name out.
//!
//! The wire format is camelCase JSON. Failures come back as a structured
//! response with `success: false` and a human-readable error, never as a
//! fault: integrators match on the "Cannot pair" fragment to distinguish
//! pairing infeasibility from other problems.

use crate::logic::matching::powermatch;
use crate::models::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One team's tournament-to-date state as supplied by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRequest {
    pub name: String,
    pub is_bye_eligible: bool,
    pub wins: u32,
    pub losses: u32,
    pub aff_rounds: u32,
    pub neg_rounds: u32,
    pub seed: i32,
    pub club: Option<String>,
    pub opponent_history: Vec<String>,
}

/// A pairing request: the full roster snapshot and the round to pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingRequest {
    pub teams: Vec<TeamRequest>,
    pub round_number: u32,
}

/// One generated matchup; `neg` absent means `aff` receives the bye.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupResponse {
    pub aff: String,
    pub neg: Option<String>,
    pub is_bye: bool,
}

/// The pairing result: matchups on success, an error message otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingResponse {
    pub matchups: Vec<MatchupResponse>,
    pub success: bool,
    pub error: Option<String>,
}

impl PairingResponse {
    fn failure(message: String) -> Self {
        Self {
            matchups: Vec::new(),
            success: false,
            error: Some(message),
        }
    }
}

/// Rebuild the roster from the request and power-match it.
///
/// Opponent history entries are resolved by name; names that match no team
/// in the request are skipped. Teams flagged bye-ineligible are treated as
/// having already had a bye (round 0; real rounds start at 1) so the
/// engine never offers them one.
pub fn generate_pairings(request: &PairingRequest) -> PairingResponse {
    let mut teams: Vec<Team> = Vec::with_capacity(request.teams.len());
    let mut ids_by_name: HashMap<&str, TeamId> = HashMap::new();

    for team_request in &request.teams {
        let mut team = Team::new(team_request.name.clone())
            .with_record(team_request.wins, team_request.losses)
            .with_side_counts(team_request.aff_rounds, team_request.neg_rounds)
            .with_seed(team_request.seed);
        if let Some(club) = &team_request.club {
            team = team.with_club(club.clone());
        }
        ids_by_name.insert(team_request.name.as_str(), team.id);
        teams.push(team);
    }

    for (team, team_request) in teams.iter_mut().zip(&request.teams) {
        for opponent_name in &team_request.opponent_history {
            if let Some(&opponent_id) = ids_by_name.get(opponent_name.as_str()) {
                team.record_opponent(opponent_id);
            }
        }
        if !team_request.is_bye_eligible {
            if let Err(err) = team.record_bye(0) {
                return PairingResponse::failure(err.to_string());
            }
        }
    }

    let names_by_id: HashMap<TeamId, &str> =
        teams.iter().map(|t| (t.id, t.name.as_str())).collect();

    match powermatch(&teams) {
        Ok(matchups) => PairingResponse {
            matchups: matchups
                .iter()
                .map(|m| MatchupResponse {
                    aff: names_by_id[&m.aff].to_string(),
                    neg: m.neg.map(|id| names_by_id[&id].to_string()),
                    is_bye: m.is_bye(),
                })
                .collect(),
            success: true,
            error: None,
        },
        Err(err) => PairingResponse::failure(err.to_string()),
    }
}
