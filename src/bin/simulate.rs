//! Console tournament simulation: random early rounds, power-matched late
//! rounds, normally distributed team performances.
//! Run with: cargo run --bin simulate -- <numTeams> <numRounds> <numPowerMatchedRounds> [seed]

use debate_tournament_web::{evaluate, Matchup, SimOutcome, SimTeam, Team, Tournament};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::process::ExitCode;

fn usage() -> ExitCode {
    eprintln!("Usage: simulate <numTeams> <numRounds> <numPowerMatchedRounds> [seed]");
    eprintln!("Example: simulate 20 6 3");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        return usage();
    }

    let num_teams: usize = match args[0].parse() {
        Ok(n) if n >= 2 => n,
        _ => {
            eprintln!("Error: numTeams must be an integer >= 2");
            return ExitCode::FAILURE;
        }
    };
    let num_rounds: u32 = match args[1].parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            eprintln!("Error: numRounds must be an integer >= 1");
            return ExitCode::FAILURE;
        }
    };
    let num_power_rounds: u32 = match args[2].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: numPowerMatchedRounds must be an integer >= 0");
            return ExitCode::FAILURE;
        }
    };
    if num_power_rounds > num_rounds {
        eprintln!("Error: numPowerMatchedRounds cannot be greater than numRounds");
        return ExitCode::FAILURE;
    }
    let mut rng: StdRng = match args.get(3) {
        Some(seed) => match seed.parse() {
            Ok(seed) => StdRng::seed_from_u64(seed),
            Err(_) => {
                eprintln!("Error: seed must be an integer");
                return ExitCode::FAILURE;
            }
        },
        None => StdRng::from_entropy(),
    };

    let mut tournament = Tournament::new();
    let mut sim_teams: HashMap<String, SimTeam> = HashMap::new();
    for i in 0..num_teams {
        let name = format!("Team{}", i + 1);
        let strength = rng.gen::<f64>() * 0.6 + 0.2;
        let variance = rng.gen::<f64>() * 0.15 + 0.05;
        sim_teams.insert(name.clone(), SimTeam::new(strength, variance));
        if let Err(err) = tournament.add_team(Team::new(name).with_seed(i as i32 + 1)) {
            eprintln!("Error adding team: {}", err);
            return ExitCode::FAILURE;
        }
    }

    println!("=== Tournament Simulation ===");
    println!("Teams: {}", num_teams);
    println!("Total Rounds: {}", num_rounds);
    println!("Random Rounds: {}", num_rounds - num_power_rounds);
    println!("Power-Matched Rounds: {}", num_power_rounds);
    println!();

    for round_number in 1..=num_rounds {
        let power_matched = round_number > num_rounds - num_power_rounds;
        println!("=== ROUND {} ===", round_number);
        println!(
            "Strategy: {}",
            if power_matched { "Power-Matched" } else { "Random" }
        );
        println!();

        let round = if power_matched {
            tournament.generate_powermatched_round()
        } else {
            tournament.generate_random_round(&mut rng)
        };
        let round = match round.and_then(|r| {
            let matchups = r.matchups.clone();
            tournament.add_round(r)?;
            Ok(matchups)
        }) {
            Ok(matchups) => matchups,
            Err(err) => {
                eprintln!("Error generating pairings: {}", err);
                return ExitCode::FAILURE;
            }
        };

        print_matchups(&tournament, &round);

        println!("Results:");
        for matchup in &round {
            if let Err(err) = play_matchup(&mut tournament, &sim_teams, matchup, &mut rng) {
                eprintln!("Error recording result: {}", err);
                return ExitCode::FAILURE;
            }
        }
        println!();
    }

    println!("=== FINAL STANDINGS ===");
    for (rank, team) in tournament.standings().iter().enumerate() {
        let sim = &sim_teams[&team.name];
        println!(
            "{}. {}: {}-{} (Aff: {}, Neg: {}) [Strength: {:.3}]",
            rank + 1,
            team.name,
            team.wins,
            team.losses,
            team.aff_rounds(),
            team.neg_rounds(),
            sim.strength
        );
    }

    ExitCode::SUCCESS
}

/// Display the round's matchups, strongest bracket first. A `*` separator
/// marks a pull-up (the paired teams' win counts differ).
fn print_matchups(tournament: &Tournament, matchups: &[Matchup]) {
    let mut sorted: Vec<&Matchup> = matchups.iter().collect();
    sorted.sort_by_key(|m| {
        let aff_wins = tournament.get_team(m.aff).map_or(0, |t| t.wins);
        let neg_wins = m
            .neg
            .and_then(|id| tournament.get_team(id))
            .map_or(0, |t| t.wins);
        std::cmp::Reverse(aff_wins.max(neg_wins))
    });

    println!("Matchups:");
    for matchup in sorted {
        let aff = match tournament.get_team(matchup.aff) {
            Some(team) => team,
            None => continue,
        };
        match matchup.neg.and_then(|id| tournament.get_team(id)) {
            Some(neg) => {
                let separator = if aff.wins == neg.wins { "-" } else { "*" };
                println!(
                    "  {:<10} ({}-{}) {} {:<10} ({}-{})",
                    aff.name, aff.wins, aff.losses, separator, neg.name, neg.wins, neg.losses
                );
            }
            None => println!("  {:<10} ({}-{}) - BYE", aff.name, aff.wins, aff.losses),
        }
    }
    println!();
}

/// Simulate one matchup and apply its outcome. A bye scores a free win.
fn play_matchup(
    tournament: &mut Tournament,
    sim_teams: &HashMap<String, SimTeam>,
    matchup: &Matchup,
    rng: &mut StdRng,
) -> Result<(), debate_tournament_web::TournamentError> {
    let aff = match tournament.get_team(matchup.aff) {
        Some(team) => team.clone(),
        None => return Ok(()),
    };
    let neg = match matchup.neg.and_then(|id| tournament.get_team(id)) {
        Some(team) => team.clone(),
        None => {
            tournament.record_bye_win(matchup.aff)?;
            if let Some(aff) = tournament.get_team(matchup.aff) {
                println!("  {:<10} (BYE) - now {}-{}", aff.name, aff.wins, aff.losses);
            }
            return Ok(());
        }
    };

    let outcome = evaluate(&sim_teams[&aff.name], &sim_teams[&neg.name], rng);
    let (winner, loser) = match outcome {
        SimOutcome::Aff => (&aff, &neg),
        SimOutcome::Neg => (&neg, &aff),
    };
    tournament.record_result(winner.id, loser.id)?;

    let (winner_side, loser_side) = match outcome {
        SimOutcome::Aff => ("Aff", "Neg"),
        SimOutcome::Neg => ("Neg", "Aff"),
    };
    if let (Some(winner), Some(loser)) =
        (tournament.get_team(winner.id), tournament.get_team(loser.id))
    {
        println!(
            "  {:<10} ({}) defeats {:<10} ({}) - now {}-{} and {}-{}",
            winner.name,
            winner_side,
            loser.name,
            loser_side,
            winner.wins,
            winner.losses,
            loser.wins,
            loser.losses
        );
    }
    Ok(())
}
