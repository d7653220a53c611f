//! Integration tests for the cost-optimized matching engine.

use debate_tournament_web::{powermatch, Matchup, Team, TeamId, TournamentError};

fn id_of<'a>(teams: &'a [Team], name: &str) -> TeamId {
    teams
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no team named {name}"))
        .id
}

fn pairing_of(matchups: &[Matchup], aff: TeamId) -> &Matchup {
    matchups
        .iter()
        .find(|m| m.aff == aff)
        .expect("expected team to appear as aff")
}

#[test]
fn matches_equal_win_brackets_respecting_sides() {
    // A and B are aff-locked out (must go neg); C and D must go aff.
    let teams = vec![
        Team::new("teamA").with_record(1, 0).with_side_counts(1, 0),
        Team::new("teamB").with_record(0, 1).with_side_counts(1, 0),
        Team::new("teamC").with_record(0, 1).with_side_counts(0, 1),
        Team::new("teamD").with_record(1, 0).with_side_counts(0, 1),
    ];
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 2);
    assert_eq!(
        pairing_of(&matchups, id_of(&teams, "teamD")).neg,
        Some(id_of(&teams, "teamA"))
    );
    assert_eq!(
        pairing_of(&matchups, id_of(&teams, "teamC")).neg,
        Some(id_of(&teams, "teamB"))
    );
}

#[test]
fn prefers_two_small_pullups_over_a_big_pullup() {
    let teams = vec![
        Team::new("teamA").with_record(2, 0).with_side_counts(1, 0),
        Team::new("teamB").with_record(1, 1).with_side_counts(1, 0),
        Team::new("teamC").with_record(1, 1).with_side_counts(0, 1),
        Team::new("teamD").with_record(0, 2).with_side_counts(0, 1),
    ];
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 2);
    // The 2-0 vs 0-2 pairing would cost 4x what two one-win gaps cost.
    assert_eq!(
        pairing_of(&matchups, id_of(&teams, "teamD")).neg,
        Some(id_of(&teams, "teamB"))
    );
    assert_eq!(
        pairing_of(&matchups, id_of(&teams, "teamC")).neg,
        Some(id_of(&teams, "teamA"))
    );
}

#[test]
fn odd_roster_gets_exactly_one_bye() {
    let teams = vec![Team::new("teamA"), Team::new("teamB"), Team::new("teamC")];
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 2);
    assert_eq!(matchups.iter().filter(|m| m.is_bye()).count(), 1);
}

#[test]
fn lowest_win_team_gets_the_bye() {
    let teams = vec![
        Team::new("teamA").with_record(10, 0),
        Team::new("teamB").with_record(10, 0),
        Team::new("teamC"),
    ];
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 2);
    let bye = matchups.iter().find(|m| m.is_bye()).unwrap();
    assert_eq!(bye.aff, id_of(&teams, "teamC"));
}

#[test]
fn bye_skips_teams_that_already_had_one() {
    let mut team_c = Team::new("teamC");
    team_c.record_bye(1).unwrap();
    let teams = vec![
        Team::new("teamA").with_record(10, 0),
        Team::new("teamB").with_record(9, 0),
        team_c,
    ];
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 2);
    let bye = matchups.iter().find(|m| m.is_bye()).unwrap();
    assert_eq!(bye.aff, id_of(&teams, "teamB"));
}

#[test]
fn teams_cannot_hit_prior_opponents() {
    let mut team_a = Team::new("teamA").with_record(2, 0).with_side_counts(1, 0);
    let mut team_b = Team::new("teamB").with_record(1, 1).with_side_counts(1, 0);
    let mut team_c = Team::new("teamC").with_record(1, 1).with_side_counts(0, 1);
    let mut team_d = Team::new("teamD").with_record(0, 2).with_side_counts(0, 1);
    team_a.record_opponent(team_c.id);
    team_c.record_opponent(team_a.id);
    team_b.record_opponent(team_d.id);
    team_d.record_opponent(team_b.id);
    let teams = vec![team_a, team_b, team_c, team_d];

    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 2);
    assert_eq!(
        pairing_of(&matchups, id_of(&teams, "teamC")).neg,
        Some(id_of(&teams, "teamB"))
    );
    assert_eq!(
        pairing_of(&matchups, id_of(&teams, "teamD")).neg,
        Some(id_of(&teams, "teamA"))
    );
}

#[test]
fn fresh_bracket_pairs_high_seeds_against_low_seeds() {
    let teams: Vec<Team> = (1..=6)
        .map(|seed| Team::new(format!("team{seed}")).with_seed(seed))
        .collect();
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 3);

    let expected = [("team1", "team6"), ("team2", "team5"), ("team3", "team4")];
    for (high, low) in expected {
        let high_id = id_of(&teams, high);
        let low_id = id_of(&teams, low);
        assert!(
            matchups
                .iter()
                .any(|m| m.contains(high_id) && m.contains(low_id)),
            "expected {high} to be paired with {low}"
        );
    }
}

#[test]
fn same_club_pairing_is_avoided_when_a_choice_exists() {
    let teams = vec![
        Team::new("teamA").with_club("Westside"),
        Team::new("teamB").with_club("Westside"),
        Team::new("teamC"),
        Team::new("teamD"),
    ];
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 2);
    let a = id_of(&teams, "teamA");
    let b = id_of(&teams, "teamB");
    assert!(
        !matchups.iter().any(|m| m.contains(a) && m.contains(b)),
        "clubmates should not be paired when an equal-cost alternative exists"
    );
}

#[test]
fn two_fresh_teams_pair_with_no_bye() {
    let teams = vec![Team::new("teamA"), Team::new("teamB")];
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 1);
    assert!(!matchups[0].is_bye());
    assert!(matchups[0].contains(id_of(&teams, "teamA")));
    assert!(matchups[0].contains(id_of(&teams, "teamB")));
}

#[test]
fn cannot_pair_when_bye_needed_but_no_one_is_eligible() {
    let mut teams = vec![Team::new("teamA"), Team::new("teamB"), Team::new("teamC")];
    for team in &mut teams {
        team.record_bye(1).unwrap();
    }
    assert_eq!(powermatch(&teams), Err(TournamentError::CannotPair));
    // The engine mutates nothing on failure.
    for team in &teams {
        assert_eq!(team.aff_rounds(), 0);
        assert_eq!(team.neg_rounds(), 0);
        assert!(team.opponents().is_empty());
    }
}

#[test]
fn empty_roster_yields_no_matchups() {
    assert_eq!(powermatch(&[]).unwrap(), Vec::new());
}

#[test]
fn every_team_appears_in_exactly_one_matchup() {
    let teams: Vec<Team> = (1..=8)
        .map(|seed| Team::new(format!("team{seed}")).with_seed(seed))
        .collect();
    let matchups = powermatch(&teams).unwrap();
    assert_eq!(matchups.len(), 4);
    for team in &teams {
        assert_eq!(
            matchups.iter().filter(|m| m.contains(team.id)).count(),
            1,
            "{} should appear exactly once",
            team.name
        );
    }
}

/// Run `rounds` power-matched rounds with randomly assigned results and
/// check every legality property before each commit.
fn run_power_matched_rounds(team_count: usize, rounds: u32, seed: u64) {
    use debate_tournament_web::Tournament;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tournament = Tournament::new();
    for i in 0..team_count {
        tournament
            .add_team(Team::new(format!("Team{i:03}")).with_seed(i as i32 + 1))
            .unwrap();
    }

    for _ in 0..rounds {
        let round = tournament.generate_powermatched_round().unwrap();
        assert_eq!(round.matchups.len(), team_count / 2);
        for matchup in &round.matchups {
            let aff = tournament.get_team(matchup.aff).unwrap();
            let neg = tournament.get_team(matchup.neg.unwrap()).unwrap();
            assert!(aff.can_go_aff(), "{} cannot go aff", aff.name);
            assert!(neg.can_go_neg(), "{} cannot go neg", neg.name);
            assert!(!aff.has_hit(neg.id), "{} rematched {}", aff.name, neg.name);
        }
        for team in &tournament.teams {
            assert_eq!(
                round.matchups.iter().filter(|m| m.contains(team.id)).count(),
                1
            );
        }

        let pairings: Vec<(TeamId, TeamId)> = round
            .matchups
            .iter()
            .map(|m| (m.aff, m.neg.unwrap()))
            .collect();
        tournament.add_round(round).unwrap();
        for (aff, neg) in pairings {
            if rng.gen::<bool>() {
                tournament.record_result(aff, neg).unwrap();
            } else {
                tournament.record_result(neg, aff).unwrap();
            }
        }
    }
}

#[test]
fn repeated_power_matching_stays_legal_across_rounds() {
    run_power_matched_rounds(12, 4, 2024);
}

#[test]
#[ignore = "large-scale run; slow under an exact solver"]
fn large_tournament_110_teams_6_rounds() {
    run_power_matched_rounds(110, 6, 42);
}
