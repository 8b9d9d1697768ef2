//! Roster, bot decisions, and zone interactions for the Bottle Blitz
//! simulation.
//!
//! Everything that acts on agents lives here; the arena primitives they act
//! through come from `blitz-world`.
//!
//! # Modules
//!
//! - [`decision`] -- Utility scoring and target selection for bots.
//! - [`error`] -- [`AgentError`] for roster lookups.
//! - [`interaction`] -- Pool pickups, deposits, thefts, and win detection.
//! - [`powers`] -- Granting, collecting, and ageing power effects.
//! - [`roster`] -- The fixed three-agent layout and lookups.

pub mod decision;
pub mod error;
pub mod interaction;
pub mod powers;
pub mod roster;

// Re-export primary types at crate root.
pub use decision::{BotWeights, Decision, DecisionContext, Objective, choose_target};
pub use error::AgentError;
pub use interaction::{InteractionEvent, Resolution, ZoneConfig, resolve_zones};
pub use powers::{PillPickup, collect_pills, tick_powers};
