//! Data structures for the debate tournament: teams, matchups, rounds.

mod matchup;
mod team;
mod tournament;

pub use matchup::{Matchup, Round};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentId};
