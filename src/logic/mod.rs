//! Pairing business logic: matching engines, solver model, service boundary.

mod matching;
mod pairing;
mod simulation;
mod solver;

pub use matching::{powermatch, random_matching};
pub use pairing::{generate_pairings, MatchupResponse, PairingRequest, PairingResponse, TeamRequest};
pub use simulation::{evaluate, SimOutcome, SimTeam};
pub use solver::SelectionProblem;
