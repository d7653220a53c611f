//! Integration tests for the pairing service boundary: roster snapshots in,
//! name-keyed matchups out, camelCase wire format.

use debate_tournament_web::{generate_pairings, PairingRequest, TeamRequest};

fn fresh_team(name: &str, seed: i32) -> TeamRequest {
    TeamRequest {
        name: name.to_string(),
        is_bye_eligible: true,
        wins: 0,
        losses: 0,
        aff_rounds: 0,
        neg_rounds: 0,
        seed,
        club: None,
        opponent_history: Vec::new(),
    }
}

#[test]
fn two_teams_pair_without_a_bye() {
    let request = PairingRequest {
        teams: vec![fresh_team("Team A", 1), fresh_team("Team B", 2)],
        round_number: 1,
    };
    let response = generate_pairings(&request);
    assert!(response.success);
    assert!(response.error.is_none());
    assert_eq!(response.matchups.len(), 1);
    let matchup = &response.matchups[0];
    assert!(!matchup.is_bye);
    assert!(["Team A", "Team B"].contains(&matchup.aff.as_str()));
    assert!(["Team A", "Team B"].contains(&matchup.neg.as_deref().unwrap()));
    assert_ne!(matchup.aff.as_str(), matchup.neg.as_deref().unwrap());
}

#[test]
fn three_teams_yield_one_bye() {
    let request = PairingRequest {
        teams: vec![
            fresh_team("Team A", 1),
            fresh_team("Team B", 2),
            fresh_team("Team C", 3),
        ],
        round_number: 1,
    };
    let response = generate_pairings(&request);
    assert!(response.success);
    assert_eq!(response.matchups.len(), 2);
    assert_eq!(response.matchups.iter().filter(|m| m.is_bye).count(), 1);
    assert_eq!(response.matchups.iter().filter(|m| !m.is_bye).count(), 1);
}

#[test]
fn bye_goes_to_the_only_eligible_team() {
    let mut team_a = fresh_team("Team A", 1);
    let mut team_b = fresh_team("Team B", 2);
    team_a.is_bye_eligible = false;
    team_b.is_bye_eligible = false;
    let request = PairingRequest {
        teams: vec![team_a, team_b, fresh_team("Team C", 3)],
        round_number: 2,
    };
    let response = generate_pairings(&request);
    assert!(response.success);
    let bye = response.matchups.iter().find(|m| m.is_bye).unwrap();
    assert_eq!(bye.aff, "Team C");
}

#[test]
fn opponent_history_blocks_rematches() {
    let mut team_a = fresh_team("Team A", 1);
    let mut team_c = fresh_team("Team C", 3);
    team_a.opponent_history = vec!["Team C".to_string()];
    team_c.opponent_history = vec!["Team A".to_string()];
    let request = PairingRequest {
        teams: vec![
            team_a,
            fresh_team("Team B", 2),
            team_c,
            fresh_team("Team D", 4),
        ],
        round_number: 2,
    };
    let response = generate_pairings(&request);
    assert!(response.success);
    assert!(!response
        .matchups
        .iter()
        .any(|m| m.aff == "Team A" && m.neg.as_deref() == Some("Team C")
            || m.aff == "Team C" && m.neg.as_deref() == Some("Team A")));
}

#[test]
fn unknown_opponent_names_are_ignored() {
    let mut team_a = fresh_team("Team A", 1);
    team_a.opponent_history = vec!["Withdrawn Team".to_string()];
    let request = PairingRequest {
        teams: vec![team_a, fresh_team("Team B", 2)],
        round_number: 3,
    };
    let response = generate_pairings(&request);
    assert!(response.success);
    assert_eq!(response.matchups.len(), 1);
}

#[test]
fn infeasible_roster_reports_cannot_pair() {
    let teams: Vec<TeamRequest> = ["Team A", "Team B", "Team C"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut team = fresh_team(name, i as i32 + 1);
            team.is_bye_eligible = false;
            team
        })
        .collect();
    let request = PairingRequest {
        teams,
        round_number: 4,
    };
    let response = generate_pairings(&request);
    assert!(!response.success);
    assert!(response.matchups.is_empty());
    let message = response.error.unwrap();
    assert!(
        message.contains("Cannot pair"),
        "error should carry the stable fragment, got: {message}"
    );
}

#[test]
fn wire_format_is_camel_case() {
    let request = PairingRequest {
        teams: vec![fresh_team("Team A", 1), fresh_team("Team B", 2)],
        round_number: 1,
    };
    let request_json = serde_json::to_value(&request).unwrap();
    assert!(request_json.get("roundNumber").is_some());
    let team_json = &request_json["teams"][0];
    assert!(team_json.get("isByeEligible").is_some());
    assert!(team_json.get("affRounds").is_some());
    assert!(team_json.get("opponentHistory").is_some());

    let response_json = serde_json::to_value(generate_pairings(&request)).unwrap();
    assert!(response_json.get("success").is_some());
    assert!(response_json["matchups"][0].get("isBye").is_some());
}

#[test]
fn request_round_trips_through_json() {
    let json = r#"{
        "teams": [
            {
                "name": "Team A",
                "isByeEligible": true,
                "wins": 2,
                "losses": 1,
                "affRounds": 2,
                "negRounds": 1,
                "seed": 5,
                "club": "Northside",
                "opponentHistory": ["Team B"]
            }
        ],
        "roundNumber": 4
    }"#;
    let request: PairingRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.round_number, 4);
    assert_eq!(request.teams[0].name, "Team A");
    assert_eq!(request.teams[0].club.as_deref(), Some("Northside"));
    assert_eq!(request.teams[0].opponent_history, vec!["Team B"]);
}
