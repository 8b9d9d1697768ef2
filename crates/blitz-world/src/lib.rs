//! Arena geometry, power-pill lifecycle, and movement for the Bottle Blitz
//! simulation.
//!
//! This crate models the physical side of the arena: how far apart things
//! are, how agents move through the `[0, 100]` field, and how timed power
//! pills appear, age, and get picked up.
//!
//! # Modules
//!
//! - [`geometry`] -- Distance, seek-toward, direction, and integration
//!   primitives with safe fallbacks for degenerate inputs.
//! - [`movement`] -- Effective speed and per-agent movement for both seek
//!   and direct-steer intents.
//! - [`pills`] -- The [`PillBoard`]: spawn cooldowns, lifetimes, staging,
//!   and pickup.

pub mod geometry;
pub mod movement;
pub mod pills;

// Re-export primary types at crate root.
pub use movement::{MovementConfig, apply_intent, effective_speed};
pub use pills::{PINNED_LIFETIME, PillBoard, PillConfig, PillTick};
