//! Command line front end
//!
//! Parses and validates user input, drives the rating engine and the
//! estimator, and renders their results as text or JSON.

use crate::config::{AppConfig, ModelKind};
use crate::error::{EloError, Result};
use crate::estimation::{validate_percentile, Estimator, GameTally, RatingDifferenceEstimate};
use crate::rating::{Configuration, KFactor, Match, Player, SharedConfiguration};
use crate::types::Outcome;
use crate::utils::round_places;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

const UNBOUNDED_MESSAGE: &str = "There have not been enough games to yield a rating difference, \
or the player has only won or lost against the opponent.";

/// Elo rating updates and head-to-head rating difference estimates
#[derive(Parser, Debug)]
#[command(
    name = "elo",
    version,
    about = "Update Elo ratings and estimate rating differences from game results",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,

    #[arg(long, global = true, value_name = "MODEL", help = "Probability model (logistic, normal)")]
    pub model: Option<ModelKind>,

    #[arg(long, global = true, value_name = "BASE", help = "Logistic log base")]
    pub base: Option<f64>,

    #[arg(long, global = true, value_name = "SCALE", help = "Logistic scale")]
    pub scale: Option<f64>,

    #[arg(long, global = true, value_name = "STDEV", help = "Normal standard deviation")]
    pub stdev: Option<f64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Show the usage text
    Help,

    /// Update the ratings of two players after one game
    #[command(allow_negative_numbers = true)]
    Update {
        /// Rating of player A
        rating_a: f64,
        /// Rating of player B
        rating_b: f64,
        /// 1 (A wins), 0.5 (draw) or 0 (B wins)
        score_a: f64,
        /// Maximum change in rating
        k: Option<f64>,
    },

    /// Estimate the rating difference between A and B from A's results against B
    #[command(allow_negative_numbers = true)]
    Diff { wins: i64, draws: i64, losses: i64 },

    /// Same as diff, with a confidence interval
    #[command(allow_negative_numbers = true)]
    DiffInterval {
        wins: i64,
        draws: i64,
        losses: i64,
        /// Confidence level between 0 and 1
        percentile: Option<f64>,
    },
}

/// Usage text for `elo help`
pub fn usage() -> &'static str {
    "Usage:\n\
* elo help - Show this help screen\n\n\
* elo update [rating A] [rating B] [score of A] <K (default 32)> - Update the ratings of two players \
in a game. Score is either 1 (A wins), 0.5 (draw), or 0 (B wins). K is an optional parameter that is \
the maximum change in rating.\n\n\
* elo diff [wins] [draws] [losses] - Estimate the rating difference between a player A and another \
player B given player A's results against B.\n\n\
* elo diff-interval [wins] [draws] [losses] <percentile (default 0.95)> - Same as elo diff, but it \
yields a confidence interval (to the specified percentile) of the rating difference in addition to \
the rating difference estimate."
}

impl Cli {
    /// Fold command line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.service.log_level = level.clone();
        }
        if let Some(model) = self.model {
            config.rating.distribution.model = model;
        }
        if let Some(base) = self.base {
            config.rating.distribution.base = base;
        }
        if let Some(scale) = self.scale {
            config.rating.distribution.scale = scale;
        }
        if let Some(stdev) = self.stdev {
            config.rating.distribution.stdev = stdev;
        }
    }
}

/// Execute a command and return the text to print on stdout
pub fn run(command: &Commands, config: &AppConfig, json: bool) -> Result<String> {
    match command {
        Commands::Help => Ok(usage().to_string()),
        Commands::Update {
            rating_a,
            rating_b,
            score_a,
            k,
        } => update(config, *rating_a, *rating_b, *score_a, *k, json),
        Commands::Diff {
            wins,
            draws,
            losses,
        } => diff(config, *wins, *draws, *losses, None, json),
        Commands::DiffInterval {
            wins,
            draws,
            losses,
            percentile,
        } => {
            let percentile = percentile.unwrap_or(config.estimator.percentile);
            diff(config, *wins, *draws, *losses, Some(percentile), json)
        }
    }
}

/// What the binary writes to each stream and its exit status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub exit_code: i32,
}

/// Run an optional command and decide where its output goes
///
/// Usage text always goes to stderr. Failures become a single `Error:` line
/// on stderr with exit status 1.
pub fn dispatch(command: Option<&Commands>, config: &AppConfig, json: bool) -> Dispatch {
    let command = match command {
        None | Some(Commands::Help) => {
            return Dispatch {
                stdout: None,
                stderr: Some(usage().to_string()),
                exit_code: 0,
            }
        }
        Some(command) => command,
    };

    match run(command, config, json) {
        Ok(output) => Dispatch {
            stdout: Some(output),
            stderr: None,
            exit_code: 0,
        },
        Err(e) => {
            debug!(error = %e, "Command failed");
            Dispatch {
                stdout: None,
                stderr: Some(error_line(&e)),
                exit_code: 1,
            }
        }
    }
}

/// One-line rendering of a command failure
pub fn error_line(e: &anyhow::Error) -> String {
    let message = e.to_string();
    format!("Error: {}", message.lines().collect::<Vec<_>>().join(" "))
}

/// First line of a clap parse failure, e.g. a non-numeric rating
pub fn parse_error_line(e: &clap::Error) -> String {
    let rendered = e.to_string();
    rendered
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("error: invalid arguments")
        .to_string()
}

fn update(
    config: &AppConfig,
    rating_a: f64,
    rating_b: f64,
    score_a: f64,
    k: Option<f64>,
    json: bool,
) -> Result<String> {
    let mut configuration: Configuration = config.rating.build_configuration()?;
    if let Some(k) = k {
        if !(k.is_finite() && k > 0.0) {
            return Err(invalid_input("K must be positive."));
        }
        configuration.set_k_factor(KFactor::Constant(k));
    }

    let outcome = Outcome::from_score(score_a).ok_or_else(|| {
        invalid_input("score must be either 1 (A wins), 0.5 (draw), or 0 (B wins).")
    })?;
    if !(rating_a.is_finite() && rating_b.is_finite()) {
        return Err(invalid_input("ratings must be finite numbers."));
    }

    let pool = SharedConfiguration::new(configuration);
    let mut player_a = Player::with_config(rating_a, &pool);
    let mut player_b = Player::with_config(rating_b, &pool);
    let update = Match::from_outcome(outcome).apply(&mut player_a, &mut player_b)?;

    info!(
        rating_a = player_a.rating(),
        rating_b = player_b.rating(),
        %outcome,
        "Updated ratings"
    );

    if json {
        return Ok(serde_json::to_string_pretty(&update)?);
    }

    Ok(format!(
        "New ratings:\n* Player A: {}\n* Player B: {}",
        round_places(player_a.rating(), 2),
        round_places(player_b.rating(), 2)
    ))
}

fn diff(
    config: &AppConfig,
    wins: i64,
    draws: i64,
    losses: i64,
    percentile: Option<f64>,
    json: bool,
) -> Result<String> {
    let tally = check_tally(wins, draws, losses)?;
    if let Some(percentile) = percentile {
        validate_percentile(percentile)?;
    }

    let estimator = Estimator::new(config.rating.distribution.build()?);
    let estimate = match percentile {
        Some(percentile) => estimator.estimate_with_interval(tally, percentile),
        None => estimator.estimate(tally),
    };

    if json {
        return Ok(serde_json::to_string_pretty(&estimate)?);
    }

    Ok(render_estimate(&estimate))
}

/// Validate raw win/draw/loss counts
pub fn check_tally(wins: i64, draws: i64, losses: i64) -> Result<GameTally> {
    if wins < 0 || draws < 0 || losses < 0 {
        return Err(invalid_input(
            "The number of wins, draws, or losses cannot be negative.",
        ));
    }

    let to_count = |value: i64| {
        u32::try_from(value).map_err(|_| invalid_input("The number of games is too large."))
    };
    let tally = GameTally::new(to_count(wins)?, to_count(draws)?, to_count(losses)?);
    tally.validate()?;
    Ok(tally)
}

/// Human readable summary of an estimate
pub fn render_estimate(estimate: &RatingDifferenceEstimate) -> String {
    if estimate.is_infinite {
        return UNBOUNDED_MESSAGE.to_string();
    }

    let interval = estimate.interval.map(|interval| {
        format!(
            "{} percent confidence interval: {}, {}",
            round_places(interval.percentile * 100.0, 4),
            format_bound(interval.lower),
            format_bound(interval.upper)
        )
    });
    let magnitude = round_places(estimate.estimate.abs(), 2);

    if magnitude == 0.0 {
        return match interval {
            Some(interval) => format!(
                "Player A has the same Elo rating ({}) as Player B.",
                interval
            ),
            None => "Player A has the same Elo rating as Player B.".to_string(),
        };
    }

    let direction = if estimate.estimate > 0.0 {
        "stronger"
    } else {
        "weaker"
    };
    match interval {
        Some(interval) => format!(
            "Player A is {} ({}) Elo points {} than Player B.",
            magnitude, interval, direction
        ),
        None => format!(
            "Player A is {} Elo points {} than Player B.",
            magnitude, direction
        ),
    }
}

fn format_bound(value: f64) -> String {
    if value == f64::INFINITY {
        "+inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        round_places(value, 2).to_string()
    }
}

fn invalid_input(reason: &str) -> anyhow::Error {
    EloError::InvalidInput {
        reason: reason.to_string(),
    }
    .into()
}
