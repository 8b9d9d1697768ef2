//! Read-only per-tick view of the world handed to the presentation layer.
//!
//! The snapshot is a plain copy; mutating it has no effect on the running
//! simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{PillVisibility, RunMode, TrialStep};
use crate::ids::AgentId;
use crate::structs::{Agent, Position, PowerPill};

/// A pill plus its blink bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PillView {
    /// The pill itself.
    pub pill: PowerPill,
    /// How to draw it this tick.
    pub visibility: PillVisibility,
}

impl From<PowerPill> for PillView {
    fn from(pill: PowerPill) -> Self {
        Self {
            visibility: PillVisibility::from_lifetime(pill.lifetime),
            pill,
        }
    }
}

/// Tutorial overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TutorialView {
    /// Current lesson step.
    pub step: TrialStep,
    /// Where the on-screen indicator points, if anywhere.
    pub waypoint: Option<Position>,
    /// Whether the scripted thief is running.
    pub thief_armed: bool,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Number of simulated (non-frozen) ticks so far.
    pub tick: u64,
    /// Match or tutorial.
    pub mode: RunMode,
    /// Full roster in roster order.
    pub agents: Vec<Agent>,
    /// Live pills in board order.
    pub pills: Vec<PillView>,
    /// Bottles left in the center.
    pub pool: u32,
    /// Pre-start countdown value, if still counting.
    pub countdown: Option<u32>,
    /// The winner, once decided.
    pub winner: Option<AgentId>,
    /// Whether the run is paused.
    pub paused: bool,
    /// Simulated game time in milliseconds.
    pub elapsed_ms: u64,
    /// Tutorial overlay, present only in tutorial runs.
    pub tutorial: Option<TutorialView>,
}
