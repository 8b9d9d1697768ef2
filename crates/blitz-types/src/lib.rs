//! Shared type definitions for the Bottle Blitz simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Every presentation-facing type derives `ts-rs` so the
//! front end can consume snapshots without hand-written bindings.
//!
//! # Modules
//!
//! - [`ids`] -- Agent slot ids and seeded pill ids
//! - [`enums`] -- Agent kinds, power kinds, run modes, tutorial steps
//! - [`structs`] -- Arena geometry, agents, powers, pills, run results
//! - [`snapshot`] -- Read-only per-tick view for presentation

pub mod enums;
pub mod ids;
pub mod snapshot;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AgentKind, PillVisibility, PowerKind, RunMode, TrialStep};
pub use ids::{AgentId, PillId};
pub use snapshot::{PillView, TutorialView, WorldSnapshot};
pub use structs::{
    ARENA_MAX, ARENA_MIN, ActivePower, Agent, GameOver, LeaderboardEntry, MovementIntent,
    PlayerProfile, Position, PowerPill, Vector,
};
