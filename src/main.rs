//! Main entry point for the elo command line tool
//!
//! Loads configuration, initialises logging and dispatches to the rating
//! engine or the estimator. Validation and usage errors print a single line
//! on stderr and exit with status 1.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use elo_rating::cli::{self, Cli};
use elo_rating::config::AppConfig;
use tracing::debug;

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment and apply CLI overrides
fn load_config(args: &Cli) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    args.apply_overrides(&mut config);
    elo_rating::config::validate_config(&config)?;
    Ok(config)
}

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("{}", cli::parse_error_line(&e));
                    std::process::exit(1);
                }
            }
        }
    };

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    debug!(command = ?args.command, "Running command");
    let out = cli::dispatch(args.command.as_ref(), &config, args.json);
    if let Some(text) = out.stdout {
        println!("{}", text);
    }
    if let Some(text) = out.stderr {
        eprintln!("{}", text);
    }
    if out.exit_code != 0 {
        std::process::exit(out.exit_code);
    }
}
