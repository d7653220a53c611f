//! Monte-Carlo round outcomes: each side samples a normally distributed
//! performance around its innate strength; the higher sample wins.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A team's underlying quality model for simulation purposes.
#[derive(Clone, Copy, Debug)]
pub struct SimTeam {
    /// Innate strength, recommended between 0 and 1.
    pub strength: f64,
    /// Round-to-round performance spread (standard deviation).
    pub variance: f64,
}

impl SimTeam {
    pub fn new(strength: f64, variance: f64) -> Self {
        Self { strength, variance }
    }
}

/// Which side won a simulated matchup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SimOutcome {
    Aff,
    Neg,
}

/// Play out one matchup. Ties go to the negative side, which cannot happen
/// for continuous samples and only matters for degenerate (zero-variance)
/// teams of equal strength.
pub fn evaluate(aff: &SimTeam, neg: &SimTeam, rng: &mut impl Rng) -> SimOutcome {
    let aff_performance = performance(aff, rng);
    let neg_performance = performance(neg, rng);
    if aff_performance > neg_performance {
        SimOutcome::Aff
    } else {
        SimOutcome::Neg
    }
}

/// Sample a single performance. A zero or invalid spread degenerates to the
/// team's strength.
fn performance(team: &SimTeam, rng: &mut impl Rng) -> f64 {
    match Normal::new(team.strength, team.variance) {
        Ok(distribution) if team.variance > 0.0 => distribution.sample(rng),
        _ => team.strength,
    }
}
