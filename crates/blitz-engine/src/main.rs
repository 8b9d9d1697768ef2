//! Headless engine binary for the Bottle Blitz simulation.
//!
//! Loads configuration, starts a run with an idle human, drives it on the
//! async runner until it ends, and prints the resulting profile book as
//! JSON on stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `BLITZ_CONFIG` or `blitz-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the session and its profile book
//! 4. Start a match, or the tutorial when `BLITZ_MODE=tutorial`
//! 5. Create match controls and wire Ctrl-C to a stop request
//! 6. Run until a win, tutorial completion, frame limit, or stop
//! 7. Return to the menu and print the profile book

mod error;
mod event_log;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use blitz_core::{GameConfig, MatchControls, ProfileBook, Session, runner};
use blitz_core::config::LoggingConfig;
use blitz_types::RunMode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::event_log::EventLog;

/// Config file path override.
const CONFIG_ENV: &str = "BLITZ_CONFIG";

/// Run kind selector (`match` or `tutorial`).
const MODE_ENV: &str = "BLITZ_MODE";

/// Player name override.
const PLAYER_ENV: &str = "BLITZ_PLAYER";

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "blitz-config.yaml";

/// Simulated ticks between trace-level snapshots.
const SNAPSHOT_EVERY: u64 = 600;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, the run, or the final report fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report the source
    //    once it is.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("blitz-engine starting");
    info!(
        source = %source,
        seed = config.world.seed,
        tick_rate_hz = config.world.tick_rate_hz,
        max_ticks = config.world.max_ticks,
        realtime = config.world.realtime,
        "Configuration loaded"
    );

    // 3. Session.
    let player = std::env::var(PLAYER_ENV).unwrap_or_else(|_| "Player One".to_owned());
    let max_ticks = config.world.max_ticks;
    let mut session = Session::new(config, ProfileBook::new(&player));

    // 4. Start the run.
    let mode = run_mode();
    match mode {
        RunMode::Match => {
            session.start_match(&player);
        }
        RunMode::Tutorial => {
            session.start_tutorial(&player).map_err(EngineError::from)?;
        }
    }
    info!(player = %player, ?mode, "Run created");

    // 5. Controls.
    let controls = Arc::new(MatchControls::new(max_ticks));
    {
        let controls = Arc::clone(&controls);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, stopping run");
                controls.request_stop();
            }
        });
    }

    // 6. Run.
    let mut callback = EventLog::new(SNAPSHOT_EVERY);
    let started = Instant::now();
    let result = runner::run_session(&mut session, &controls, &mut callback)
        .await
        .map_err(EngineError::from)?;
    runner::log_run_end(&result);
    info!(
        deposits = callback.deposits(),
        thefts = callback.thefts(),
        wall_seconds = started.elapsed().as_secs(),
        "Run statistics"
    );

    // 7. Report.
    session.return_to_menu();
    let book = session.into_sink();
    let json = serde_json::to_string_pretty(&book).map_err(EngineError::from)?;
    println!("{json}");

    info!(end_reason = ?result.end_reason, "blitz-engine shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the game configuration.
///
/// Uses `BLITZ_CONFIG` when set, otherwise `blitz-config.yaml` in the
/// working directory, otherwise defaults. Returns the config and a label
/// for where it came from.
fn load_config() -> Result<(GameConfig, String), EngineError> {
    let path = std::env::var(CONFIG_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = GameConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        let mut config = GameConfig::default();
        config.world.apply_env_overrides();
        Ok((config, "defaults".to_owned()))
    }
}

/// Pick the run kind from `BLITZ_MODE`.
fn run_mode() -> RunMode {
    match std::env::var(MODE_ENV).as_deref() {
        Ok("tutorial") => RunMode::Tutorial,
        Ok("match") | Err(_) => RunMode::Match,
        Ok(other) => {
            warn!(value = other, "Unknown {MODE_ENV}, starting a match");
            RunMode::Match
        }
    }
}
