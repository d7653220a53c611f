//! Debate tournament pairing engine: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    evaluate, generate_pairings, powermatch, random_matching, MatchupResponse, PairingRequest,
    PairingResponse, SelectionProblem, SimOutcome, SimTeam, TeamRequest,
};
pub use models::{Matchup, Round, Team, TeamId, Tournament, TournamentError, TournamentId};
