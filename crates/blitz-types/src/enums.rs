//! Enumeration types for the Bottle Blitz simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Who controls an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AgentKind {
    /// Steered by the player through the input collaborator.
    Human,
    /// Steered by the bot decision engine.
    Bot,
}

/// The effect granted by a power pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PowerKind {
    /// Movement speed boost.
    Speed,
    /// Shield against theft from the agent's home zone.
    Protect,
}

impl PowerKind {
    /// Every power kind, in spawn-evaluation order.
    pub const ALL: [Self; 2] = [Self::Speed, Self::Protect];
}

/// Which kind of run a world was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RunMode {
    /// A normal three-way match with countdown and win detection.
    Match,
    /// The scripted lesson sequence.
    Tutorial,
}

/// A step of the scripted tutorial.
///
/// Steps advance strictly forward; [`TrialStep::Complete`] is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrialStep {
    /// Walk to a marked waypoint.
    Move,
    /// Pick up a bottle from the center.
    Collect,
    /// Bring it home.
    Deposit,
    /// Grab the staged speed pill.
    SpeedPill,
    /// Collect again while boosted.
    CollectFast,
    /// Deposit while boosted.
    DepositFast,
    /// Raid the rival's home.
    SnatchTrial,
    /// Deposit the stolen bottle.
    DepositSnatch,
    /// Grab the staged shield pill.
    ShieldPill,
    /// Watch the thief bounce off the shield.
    ShieldDemo,
    /// Lesson sequence finished.
    Complete,
}

impl TrialStep {
    /// Every step in lesson order.
    pub const ALL: [Self; 11] = [
        Self::Move,
        Self::Collect,
        Self::Deposit,
        Self::SpeedPill,
        Self::CollectFast,
        Self::DepositFast,
        Self::SnatchTrial,
        Self::DepositSnatch,
        Self::ShieldPill,
        Self::ShieldDemo,
        Self::Complete,
    ];

    /// Zero-based position of this step in the lesson sequence.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is the terminal step.
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// How a pill should be drawn this tick.
///
/// Pills close to expiry blink so the player can tell they are about to
/// vanish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PillVisibility {
    /// Plenty of lifetime left.
    Solid,
    /// Expiring, bright half of the blink cycle.
    Bright,
    /// Expiring, dim half of the blink cycle.
    Dim,
}

impl PillVisibility {
    /// Lifetime (in ticks) below which a pill starts blinking.
    pub const EXPIRING_BELOW: u32 = 120;

    /// Length of one full blink cycle in ticks.
    pub const BLINK_PERIOD: u32 = 14;

    /// Bucket a remaining lifetime into a visibility state.
    pub const fn from_lifetime(lifetime: u32) -> Self {
        if lifetime >= Self::EXPIRING_BELOW {
            return Self::Solid;
        }
        if lifetime % Self::BLINK_PERIOD < Self::BLINK_PERIOD / 2 {
            Self::Dim
        } else {
            Self::Bright
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_steps_are_ordered() {
        for pair in TrialStep::ALL.windows(2) {
            if let [a, b] = pair {
                assert!(a < b);
                assert_eq!(a.index().saturating_add(1), b.index());
            }
        }
        assert!(TrialStep::Complete.is_complete());
        assert!(!TrialStep::ShieldDemo.is_complete());
    }

    #[test]
    fn trial_step_serializes_screaming_snake() {
        let json = serde_json::to_string(&TrialStep::SnatchTrial).unwrap_or_default();
        assert_eq!(json, "\"SNATCH_TRIAL\"");
    }

    #[test]
    fn pill_visibility_buckets() {
        assert_eq!(PillVisibility::from_lifetime(900), PillVisibility::Solid);
        assert_eq!(PillVisibility::from_lifetime(120), PillVisibility::Solid);
        // 112 % 14 == 0 -> dim half
        assert_eq!(PillVisibility::from_lifetime(112), PillVisibility::Dim);
        // 111 % 14 == 13 -> bright half
        assert_eq!(PillVisibility::from_lifetime(111), PillVisibility::Bright);
    }
}
