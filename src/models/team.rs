//! Team entity: per-tournament competitor state and pairing costs.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a team (used in matchups and lookups).
pub type TeamId = Uuid;

/// Cost added to a pairing when both teams belong to the same club.
const CLUB_PENALTY: i64 = 100;

/// A competitor in the tournament.
///
/// Side counters, the bye marker and the opponent history are kept private:
/// every mutation goes through a `record_*` method so the balance invariant
/// (aff and neg rounds never differ by more than one) and the one-bye rule
/// hold at all times.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Wins to date; updated by the caller once a round's outcome is known.
    pub wins: u32,
    /// Losses to date; updated by the caller once a round's outcome is known.
    pub losses: u32,
    /// Ranking number used only to spread pairings apart, not for legality.
    pub seed: i32,
    /// Club affiliation; same-club pairings are penalized, never forbidden.
    pub club: Option<String>,
    aff_rounds: u32,
    neg_rounds: u32,
    bye_round: Option<u32>,
    /// Prior opponents in chronological order.
    opponents: Vec<TeamId>,
    /// Mirror of `opponents` for O(1) rematch checks.
    opponent_set: HashSet<TeamId>,
}

impl Team {
    /// Create a new team with the given name. Other fields start at zero/none.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wins: 0,
            losses: 0,
            seed: 0,
            club: None,
            aff_rounds: 0,
            neg_rounds: 0,
            bye_round: None,
            opponents: Vec::new(),
            opponent_set: HashSet::new(),
        }
    }

    /// Set the win/loss record (builder style, for roster construction).
    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    /// Set the side counters directly (builder style, for roster construction).
    pub fn with_side_counts(mut self, aff_rounds: u32, neg_rounds: u32) -> Self {
        self.aff_rounds = aff_rounds;
        self.neg_rounds = neg_rounds;
        self
    }

    /// Set the seed (builder style).
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the club affiliation (builder style).
    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    pub fn aff_rounds(&self) -> u32 {
        self.aff_rounds
    }

    pub fn neg_rounds(&self) -> u32 {
        self.neg_rounds
    }

    /// Round in which this team received its bye, if any.
    pub fn bye_round(&self) -> Option<u32> {
        self.bye_round
    }

    pub fn had_bye(&self) -> bool {
        self.bye_round.is_some()
    }

    /// Prior opponents in the order they were met.
    pub fn opponents(&self) -> &[TeamId] {
        &self.opponents
    }

    /// Whether taking the affirmative side keeps the side counts balanced.
    pub fn can_go_aff(&self) -> bool {
        self.aff_rounds <= self.neg_rounds
    }

    /// Whether taking the negative side keeps the side counts balanced.
    pub fn can_go_neg(&self) -> bool {
        self.neg_rounds <= self.aff_rounds
    }

    /// Mark this team as having received its bye in `round`.
    /// A team only ever gets one bye.
    pub fn record_bye(&mut self, round: u32) -> Result<(), TournamentError> {
        if let Some(bye_round) = self.bye_round {
            return Err(TournamentError::TooManyByes {
                team: self.name.clone(),
                bye_round,
            });
        }
        self.bye_round = Some(round);
        Ok(())
    }

    /// Count an affirmative round, then check the balance invariant.
    /// The counter is incremented before the check so a failure reports the
    /// state the caller attempted.
    pub fn record_aff(&mut self, _round: u32) -> Result<(), TournamentError> {
        self.aff_rounds += 1;
        self.check_round_balance()
    }

    /// Count a negative round, then check the balance invariant.
    pub fn record_neg(&mut self, _round: u32) -> Result<(), TournamentError> {
        self.neg_rounds += 1;
        self.check_round_balance()
    }

    fn check_round_balance(&self) -> Result<(), TournamentError> {
        if self.aff_rounds.abs_diff(self.neg_rounds) > 1 {
            return Err(TournamentError::ImbalancedRounds {
                team: self.name.clone(),
                aff_rounds: self.aff_rounds,
                neg_rounds: self.neg_rounds,
            });
        }
        Ok(())
    }

    /// Append an opponent to the history. Entries are never deduplicated;
    /// the membership mirror stays a set.
    pub fn record_opponent(&mut self, opponent: TeamId) {
        self.opponents.push(opponent);
        self.opponent_set.insert(opponent);
    }

    /// Whether this team has already met the given opponent.
    pub fn has_hit(&self, opponent: TeamId) -> bool {
        self.opponent_set.contains(&opponent)
    }

    /// Unfairness cost of pairing this team (as aff) against `neg`.
    ///
    /// Win gaps are penalized quadratically so a double pull-up costs four
    /// times a single one. Large seed spreads are rewarded (high-low pairing
    /// within a bracket); the seed term may go negative for very wide spreads
    /// and is intentionally not clamped. A shared club adds a flat penalty.
    pub fn matchup_cost(&self, neg: &Team) -> i64 {
        let win_gap = (i64::from(self.wins) - i64::from(neg.wins)).abs();
        let seed_spread = (i64::from(self.seed) - i64::from(neg.seed)).abs();
        let win_cost = 1000 * win_gap * win_gap;
        let seed_cost = 10_000 - seed_spread * seed_spread;
        let club_penalty = match (&self.club, &neg.club) {
            (Some(a), Some(b)) if a == b => CLUB_PENALTY,
            _ => 0,
        };
        win_cost + seed_cost + club_penalty
    }

    /// Cost of giving this team the bye. Shifted into a high-order range so
    /// win-count differences dominate every pairing-cost term: the bye goes
    /// to the lowest-win eligible team whenever there is a choice.
    pub fn bye_cost(&self) -> i64 {
        i64::from(self.wins) << 20
    }
}
