//! Pairwise matches and the simultaneous rating update

use crate::error::{EloError, Result};
use crate::rating::player::{MatchRecord, Player};
use crate::types::{MatchId, Outcome, RatingChange, RatingUpdate};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A single game between two players
///
/// `score` is the first player's result: 1 for a win, 0.5 for a draw and 0
/// for a loss. The core uses it verbatim, so any fraction is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    id: MatchId,
    score: f64,
    played_at: DateTime<Utc>,
    applied: bool,
}

impl Match {
    pub fn new(score: f64) -> Self {
        Self {
            id: MatchId::new(),
            score,
            played_at: current_timestamp(),
            applied: false,
        }
    }

    pub fn from_outcome(outcome: Outcome) -> Self {
        Self::new(outcome.score())
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Update both players' ratings and record the match in both histories
    ///
    /// Each side is rated with its own configuration against the other
    /// side's rating as it was before this call, so the result does not
    /// depend on which player is named first. A match can only be applied
    /// once; a second attempt (including a clone of an applied match) is
    /// rejected and leaves both players unchanged.
    pub fn apply(&mut self, first: &mut Player, second: &mut Player) -> Result<RatingUpdate> {
        if self.applied || first.has_played(self.id) || second.has_played(self.id) {
            warn!(match_id = %self.id, "Rejected re-application of match");
            return Err(EloError::MatchAlreadyApplied {
                match_id: self.id.to_string(),
            }
            .into());
        }

        let first_state = first.state();
        let second_state = second.state();

        let (first_expected, first_k) = first.config().read(|config| {
            (
                config.expected_score(first_state.rating, second_state.rating),
                config.k_for(&first_state),
            )
        })?;
        let (second_expected, second_k) = second.config().read(|config| {
            (
                config.expected_score(second_state.rating, first_state.rating),
                config.k_for(&second_state),
            )
        })?;

        let first_change = rating_change(first_state.rating, first_expected, self.score, first_k);
        let second_change = rating_change(
            second_state.rating,
            second_expected,
            1.0 - self.score,
            second_k,
        );

        first.record(MatchRecord {
            match_id: self.id,
            opponent_rating: second_state.rating,
            change: first_change,
            played_at: self.played_at,
        });
        second.record(MatchRecord {
            match_id: self.id,
            opponent_rating: first_state.rating,
            change: second_change,
            played_at: self.played_at,
        });
        self.applied = true;

        debug!(
            match_id = %self.id,
            score = self.score,
            first_old = first_change.old_rating,
            first_new = first_change.new_rating,
            second_old = second_change.old_rating,
            second_new = second_change.new_rating,
            "Applied match"
        );

        Ok(RatingUpdate {
            match_id: self.id,
            first: first_change,
            second: second_change,
        })
    }
}

fn rating_change(
    old_rating: f64,
    expected_score: f64,
    actual_score: f64,
    k_factor: f64,
) -> RatingChange {
    RatingChange {
        old_rating,
        new_rating: old_rating + k_factor * (actual_score - expected_score),
        expected_score,
        actual_score,
        k_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::configuration::{Configuration, KFactor, SharedConfiguration};
    use crate::rating::distribution::Distribution;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_classic_win() {
        let mut a = Player::new(1613.0);
        let mut b = Player::new(1609.0);

        let update = Match::new(1.0).apply(&mut a, &mut b).unwrap();

        assert_abs_diff_eq!(a.rating(), 1628.8158, epsilon = 1e-3);
        assert_abs_diff_eq!(b.rating(), 1593.1842, epsilon = 1e-3);
        assert_eq!(update.first.new_rating, a.rating());
        assert_eq!(update.second.new_rating, b.rating());
        assert_eq!(update.first.k_factor, 32.0);
    }

    #[test]
    fn test_draw_between_equals_is_neutral() {
        let mut a = Player::new(1500.0);
        let mut b = Player::new(1500.0);
        Match::from_outcome(Outcome::Draw).apply(&mut a, &mut b).unwrap();
        assert_eq!(a.rating(), 1500.0);
        assert_eq!(b.rating(), 1500.0);
    }

    #[test]
    fn test_zero_sum_under_equal_configuration() {
        let pool = SharedConfiguration::default();
        let mut a = Player::with_config(1720.0, &pool);
        let mut b = Player::with_config(1388.0, &pool);

        let update = Match::new(0.0).apply(&mut a, &mut b).unwrap();
        assert_abs_diff_eq!(update.first.delta(), -update.second.delta(), epsilon = 1e-9);
        assert!(update.first.delta() < 0.0);
    }

    #[test]
    fn test_update_uses_pre_match_ratings() {
        let mut a1 = Player::new(1400.0);
        let mut b1 = Player::new(1600.0);
        Match::new(1.0).apply(&mut a1, &mut b1).unwrap();

        let mut a2 = Player::new(1400.0);
        let mut b2 = Player::new(1600.0);
        Match::new(0.0).apply(&mut b2, &mut a2).unwrap();

        assert_abs_diff_eq!(a1.rating(), a2.rating(), epsilon = 1e-9);
        assert_abs_diff_eq!(b1.rating(), b2.rating(), epsilon = 1e-9);
    }

    #[test]
    fn test_each_side_uses_own_configuration() {
        let fast = SharedConfiguration::new(Configuration::with_constant_k(40.0).unwrap());
        let slow = SharedConfiguration::new(Configuration::with_constant_k(10.0).unwrap());
        let mut a = Player::with_config(1500.0, &fast);
        let mut b = Player::with_config(1500.0, &slow);

        let update = Match::new(1.0).apply(&mut a, &mut b).unwrap();
        assert_eq!(a.rating(), 1520.0);
        assert_eq!(b.rating(), 1495.0);
        assert_eq!(update.first.k_factor, 40.0);
        assert_eq!(update.second.k_factor, 10.0);
    }

    #[test]
    fn test_dynamic_k_is_evaluated_per_update() {
        let pool = SharedConfiguration::new(Configuration::new(
            KFactor::banded(),
            Distribution::default(),
        ));
        let mut a = Player::with_config(1500.0, &pool);
        let mut b = Player::with_config(1500.0, &pool);

        for _ in 0..30 {
            let update = Match::new(0.5).apply(&mut a, &mut b).unwrap();
            assert_eq!(update.first.k_factor, 40.0);
        }
        let update = Match::new(0.5).apply(&mut a, &mut b).unwrap();
        assert_eq!(update.first.k_factor, 20.0);
        assert_eq!(a.games_played(), 31);
    }

    #[test]
    fn test_history_is_recorded_on_both_sides() {
        let mut a = Player::new(1613.0);
        let mut b = Player::new(1609.0);
        let mut game = Match::new(1.0);
        let id = game.id();
        game.apply(&mut a, &mut b).unwrap();

        assert!(game.is_applied());
        assert_eq!(a.history().len(), 1);
        assert_eq!(b.history().len(), 1);
        assert!(a.has_played(id));
        assert!(b.has_played(id));
        assert_eq!(a.history()[0].opponent_rating, 1609.0);
        assert_eq!(b.history()[0].opponent_rating, 1613.0);
        assert_eq!(a.history()[0].change.actual_score, 1.0);
        assert_eq!(b.history()[0].change.actual_score, 0.0);
        assert_eq!(a.history()[0].played_at, game.played_at());
    }

    #[test]
    fn test_double_apply_is_rejected() {
        let mut a = Player::new(1613.0);
        let mut b = Player::new(1609.0);
        let mut game = Match::new(1.0);
        game.apply(&mut a, &mut b).unwrap();
        let (rating_a, rating_b) = (a.rating(), b.rating());

        let err = game.apply(&mut a, &mut b).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EloError>(),
            Some(EloError::MatchAlreadyApplied { .. })
        ));
        assert_eq!(a.rating(), rating_a);
        assert_eq!(b.rating(), rating_b);
        assert_eq!(a.history().len(), 1);
    }

    #[test]
    fn test_cloned_match_is_rejected_by_history() {
        let mut a = Player::new(1500.0);
        let mut b = Player::new(1500.0);
        let mut c = Player::new(1500.0);
        let mut game = Match::new(1.0);
        let mut copy = game.clone();

        game.apply(&mut a, &mut b).unwrap();
        assert!(copy.apply(&mut c, &mut b).is_err());
        assert_eq!(c.rating(), 1500.0);
        assert!(c.history().is_empty());
    }

    #[test]
    fn test_expected_result_leaves_ratings_unchanged() {
        let mut a = Player::new(1830.0);
        let mut b = Player::new(1612.0);
        let expected = a.expected_score(&b).unwrap();

        Match::new(expected).apply(&mut a, &mut b).unwrap();
        assert_abs_diff_eq!(a.rating(), 1830.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.rating(), 1612.0, epsilon = 1e-9);
    }
}
