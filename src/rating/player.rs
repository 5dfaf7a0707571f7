//! Rated players and their match history

use crate::error::Result;
use crate::rating::configuration::{Configuration, SharedConfiguration};
use crate::types::{MatchId, PlayerState, Rating, RatingChange};
use crate::utils::round_places;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_INITIAL_RATING: Rating = 1500.0;

/// One applied match as seen from a single player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    /// Opponent rating before the match was applied
    pub opponent_rating: Rating,
    pub change: RatingChange,
    pub played_at: DateTime<Utc>,
}

/// A rated player bound to a shared configuration
#[derive(Debug, Clone)]
pub struct Player {
    rating: Rating,
    config: SharedConfiguration,
    history: Vec<MatchRecord>,
}

impl Player {
    /// Create a player with its own default configuration
    pub fn new(rating: Rating) -> Self {
        Self::with_config(rating, &SharedConfiguration::new(Configuration::default()))
    }

    /// Create a player in the pool governed by `config`
    pub fn with_config(rating: Rating, config: &SharedConfiguration) -> Self {
        Self {
            rating,
            config: config.clone(),
            history: Vec::new(),
        }
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Manual correction outside of match processing
    pub fn set_rating(&mut self, rating: Rating) {
        debug!(old = self.rating, new = rating, "Rating set manually");
        self.rating = rating;
    }

    pub fn rounded_rating(&self, places: i32) -> Rating {
        round_places(self.rating, places)
    }

    pub fn config(&self) -> &SharedConfiguration {
        &self.config
    }

    pub fn set_config(&mut self, config: &SharedConfiguration) {
        self.config = config.clone();
    }

    /// Matches this player took part in, oldest first
    pub fn history(&self) -> &[MatchRecord] {
        &self.history
    }

    pub fn games_played(&self) -> usize {
        self.history.len()
    }

    pub fn has_played(&self, match_id: MatchId) -> bool {
        self.history.iter().any(|record| record.match_id == match_id)
    }

    pub fn state(&self) -> PlayerState {
        PlayerState {
            rating: self.rating,
            games_played: self.games_played(),
        }
    }

    /// Probability of outscoring `opponent` under this player's configuration
    pub fn expected_score(&self, opponent: &Player) -> Result<f64> {
        self.config
            .read(|config| config.expected_score(self.rating, opponent.rating))
    }

    /// Rate this player against a list of opponent ratings in one step
    ///
    /// Nothing is added to the history. The rating is left untouched when the
    /// two slices differ in length.
    pub fn apply_series(&mut self, opponents: &[Rating], scores: &[f64]) -> Result<Rating> {
        let state = self.state();
        let new_rating = self
            .config
            .read(|config| config.rate_list(&state, opponents, scores))??;

        debug!(
            old = self.rating,
            new = new_rating,
            games = opponents.len(),
            "Applied series"
        );
        self.rating = new_rating;
        Ok(new_rating)
    }

    pub(crate) fn record(&mut self, record: MatchRecord) {
        self.rating = record.change.new_rating;
        self.history.push(record);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_RATING)
    }
}
