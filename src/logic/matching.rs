//! Matching engines: candidate edges, constraints, and costs.
//!
//! Both engines build the same legality model (side-balanced pairings, no
//! rematches, at most one bye going to a team that never had one) and only
//! differ in the costs they attach. Powermatch minimizes the fairness cost;
//! random matching draws costs uniformly, which turns the minimizer into an
//! arbitrary-legal-matching picker.

use crate::logic::solver::SelectionProblem;
use crate::models::{Matchup, Team, TournamentError};
use rand::Rng;

/// Upper bound (exclusive) for randomly drawn edge costs.
const RANDOM_COST_RANGE: i64 = 1000;

/// A candidate for one selected slot of a round, over roster indices.
/// The solver never sees this type; it gets variable ids and costs only.
#[derive(Clone, Debug)]
enum Edge {
    Pairing { aff: usize, neg: usize, cost: i64 },
    Bye { team: usize, cost: i64 },
}

impl Edge {
    fn cost(&self) -> i64 {
        match *self {
            Edge::Pairing { cost, .. } | Edge::Bye { cost, .. } => cost,
        }
    }

    fn covers(&self, index: usize) -> bool {
        match *self {
            Edge::Pairing { aff, neg, .. } => aff == index || neg == index,
            Edge::Bye { team, .. } => team == index,
        }
    }
}

/// Produce a legal set of matchups minimizing the fairness cost: squared
/// win-gap penalty, high-low seed spread reward, same-club penalty, and a
/// dominant win-scaled bye cost so the lowest-win eligible team byes.
pub fn powermatch(teams: &[Team]) -> Result<Vec<Matchup>, TournamentError> {
    solve_matching(teams, |aff, neg| match neg {
        Some(neg) => aff.matchup_cost(neg),
        None => aff.bye_cost(),
    })
}

/// Produce an arbitrary legal set of matchups: identical constraints to
/// [`powermatch`], every cost drawn uniformly from `[0, 1000)`.
pub fn random_matching(teams: &[Team], rng: &mut impl Rng) -> Result<Vec<Matchup>, TournamentError> {
    solve_matching(teams, |_, _| rng.gen_range(0..RANDOM_COST_RANGE))
}

/// Shared engine core: enumerate candidates, constrain coverage and matchup
/// count, delegate to the solver, and convert the selection into matchups.
/// `cost` receives the aff team and the neg team, or `None` for a bye edge.
fn solve_matching(
    teams: &[Team],
    mut cost: impl FnMut(&Team, Option<&Team>) -> i64,
) -> Result<Vec<Matchup>, TournamentError> {
    if teams.is_empty() {
        return Ok(Vec::new());
    }

    let bye_needed = teams.len() % 2 != 0;
    let edges = candidate_edges(teams, bye_needed, &mut cost);

    // A team with no candidate edge can never satisfy its coverage
    // constraint; report infeasibility without bothering the solver.
    for index in 0..teams.len() {
        if !edges.iter().any(|e| e.covers(index)) {
            return Err(TournamentError::CannotPair);
        }
    }

    let mut problem = SelectionProblem::new();
    let vars: Vec<usize> = edges.iter().map(|e| problem.add_variable(e.cost())).collect();

    // Every team appears in exactly one selected edge.
    for index in 0..teams.len() {
        let incident: Vec<usize> = edges
            .iter()
            .zip(&vars)
            .filter(|(e, _)| e.covers(index))
            .map(|(_, &v)| v)
            .collect();
        problem.require_sum(incident, 1);
    }

    // Selected edges fill the round: one per pair, plus the bye slot.
    let mut matchup_count = teams.len() as u32 / 2;
    if bye_needed {
        matchup_count += 1;
    }
    problem.require_sum(vars, matchup_count);

    let selected = problem.solve().ok_or(TournamentError::CannotPair)?;

    Ok(edges
        .iter()
        .zip(selected)
        .filter(|(_, keep)| *keep)
        .map(|(edge, _)| match *edge {
            Edge::Pairing { aff, neg, .. } => Matchup::new(teams[aff].id, teams[neg].id),
            Edge::Bye { team, .. } => Matchup::bye(teams[team].id),
        })
        .collect())
}

/// Enumerate every legal candidate: a bye per bye-eligible team when the
/// roster is odd, and a directed pairing for every (aff, neg) combination
/// where both sides stay balanced and the teams have not met before.
fn candidate_edges(
    teams: &[Team],
    bye_needed: bool,
    cost: &mut impl FnMut(&Team, Option<&Team>) -> i64,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (i, aff) in teams.iter().enumerate() {
        if bye_needed && !aff.had_bye() {
            edges.push(Edge::Bye {
                team: i,
                cost: cost(aff, None),
            });
        }
        if !aff.can_go_aff() {
            continue;
        }
        for (j, neg) in teams.iter().enumerate() {
            if i != j && neg.can_go_neg() && !aff.has_hit(neg.id) {
                edges.push(Edge::Pairing {
                    aff: i,
                    neg: j,
                    cost: cost(aff, Some(neg)),
                });
            }
        }
    }
    edges
}
