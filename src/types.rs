//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rating value of a player
pub type Rating = f64;

/// Unique identifier for a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a player's state handed to K-factor strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rating: Rating,
    /// Number of matches applied to the player so far
    pub games_played: usize,
}

/// Outcome of a game from the perspective of one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Score fraction credited for this outcome
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// Outcome for the other side of the same game
    pub fn reverse(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }

    /// Map a score of exactly 0, 0.5 or 1 back to an outcome
    pub fn from_score(score: f64) -> Option<Self> {
        if score == 1.0 {
            Some(Outcome::Win)
        } else if score == 0.5 {
            Some(Outcome::Draw)
        } else if score == 0.0 {
            Some(Outcome::Loss)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Loss => write!(f, "Loss"),
        }
    }
}

impl From<Outcome> for f64 {
    fn from(outcome: Outcome) -> Self {
        outcome.score()
    }
}

/// Old and new rating of one side of an applied match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub old_rating: Rating,
    pub new_rating: Rating,
    pub expected_score: f64,
    pub actual_score: f64,
    pub k_factor: f64,
}

impl RatingChange {
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}

/// Result of applying a match to both players
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub match_id: MatchId,
    pub first: RatingChange,
    pub second: RatingChange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_scores() {
        assert_eq!(Outcome::Win.score(), 1.0);
        assert_eq!(Outcome::Draw.score(), 0.5);
        assert_eq!(Outcome::Loss.score(), 0.0);
        assert_eq!(f64::from(Outcome::Draw), 0.5);
    }

    #[test]
    fn test_outcome_from_score() {
        assert_eq!(Outcome::from_score(1.0), Some(Outcome::Win));
        assert_eq!(Outcome::from_score(0.5), Some(Outcome::Draw));
        assert_eq!(Outcome::from_score(0.0), Some(Outcome::Loss));
        assert_eq!(Outcome::from_score(0.75), None);
        assert_eq!(Outcome::from_score(-1.0), None);
    }

    #[test]
    fn test_outcome_reverse() {
        assert_eq!(Outcome::Win.reverse(), Outcome::Loss);
        assert_eq!(Outcome::Draw.reverse(), Outcome::Draw);
        assert_eq!(Outcome::Loss.reverse(), Outcome::Win);
    }

    #[test]
    fn test_match_ids_are_unique() {
        assert_ne!(MatchId::new(), MatchId::new());
    }

    #[test]
    fn test_rating_change_delta() {
        let change = RatingChange {
            old_rating: 1500.0,
            new_rating: 1516.0,
            expected_score: 0.5,
            actual_score: 1.0,
            k_factor: 32.0,
        };
        assert_eq!(change.delta(), 16.0);
    }
}
