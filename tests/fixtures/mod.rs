//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use elo_rating::rating::{Configuration, Distribution, KFactor, Player, SharedConfiguration};
use skillratings::elo::{elo, EloConfig, EloRating};
use skillratings::Outcomes;

/// Pool with constant K and the classic logistic model
pub fn classic_pool(k: f64) -> SharedConfiguration {
    SharedConfiguration::new(Configuration::with_constant_k(k).unwrap())
}

/// Pool with constant K and a normal model
pub fn normal_pool(k: f64, stdev: f64) -> SharedConfiguration {
    SharedConfiguration::new(Configuration::new(
        KFactor::Constant(k),
        Distribution::normal(stdev).unwrap(),
    ))
}

/// Two players sharing one pool
pub fn pair(pool: &SharedConfiguration, rating_a: f64, rating_b: f64) -> (Player, Player) {
    (
        Player::with_config(rating_a, pool),
        Player::with_config(rating_b, pool),
    )
}

/// Reference result computed with the skillratings Elo implementation
pub fn oracle_update(rating_a: f64, rating_b: f64, score_a: f64, k: f64) -> (f64, f64) {
    let outcome = if score_a == 1.0 {
        Outcomes::WIN
    } else if score_a == 0.0 {
        Outcomes::LOSS
    } else {
        Outcomes::DRAW
    };

    let (a, b) = elo(
        &EloRating { rating: rating_a },
        &EloRating { rating: rating_b },
        &outcome,
        &EloConfig { k },
    );
    (a.rating, b.rating)
}
