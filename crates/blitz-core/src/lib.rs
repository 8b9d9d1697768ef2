//! Match clock, tick cycle, tutorial script, and run orchestration for the
//! Bottle Blitz simulation.
//!
//! This crate owns the per-frame pipeline (countdown, pills, script,
//! movement, pickup, zones, powers, time) and everything that starts,
//! pauses, and ends runs around it.
//!
//! # Modules
//!
//! - [`clock`] -- Frame and tick counters, game time, and the countdown.
//! - [`config`] -- Configuration loading from `blitz-config.yaml` into
//!   strongly-typed structs.
//! - [`controls`] -- [`MatchControls`] shared between the runner and its
//!   drivers.
//! - [`input`] -- Stick shaping and pointer mapping.
//! - [`profile`] -- [`ProfileSink`] and the in-memory [`ProfileBook`].
//! - [`runner`] -- The async run loop.
//! - [`session`] -- Starting, pausing, leaving, and restarting runs.
//! - [`state`] -- The owned [`World`] and its snapshot.
//! - [`tick`] -- The per-frame pipeline.
//! - [`tutorial`] -- The scripted lesson sequence and thief.

pub mod clock;
pub mod config;
pub mod controls;
pub mod input;
pub mod profile;
pub mod runner;
pub mod session;
pub mod state;
pub mod tick;
pub mod tutorial;

// Re-export primary types at crate root.
pub use config::{ConfigError, GameConfig};
pub use controls::{MatchControls, RunEndReason};
pub use profile::{ProfileBook, ProfileSink};
pub use runner::{NoOpCallback, RunResult, RunnerError, TickCallback, run_session};
pub use session::{Session, SessionError};
pub use state::World;
pub use tick::{TickError, TickOutcome, TickSummary, run_tick};
