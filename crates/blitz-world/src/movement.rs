//! Per-agent movement: seek toward a target, or steer along a vector.

use blitz_types::{Agent, MovementIntent, PowerKind};
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Movement tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Arena units travelled per tick without boosts.
    pub base_speed: f64,
    /// Multiplier applied while any SPEED effect is active.
    pub speed_boost: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.25,
            speed_boost: 1.5,
        }
    }
}

/// Speed for this tick. Stacked SPEED timers still yield a single boost.
pub fn effective_speed(agent: &Agent, config: &MovementConfig) -> f64 {
    if agent.has_power(PowerKind::Speed) {
        config.base_speed * config.speed_boost
    } else {
        config.base_speed
    }
}

/// Move `agent` toward its current target at `speed`.
pub fn seek(agent: &mut Agent, speed: f64) {
    agent.position = geometry::move_toward(agent.position, agent.target, speed);
}

/// Move an agent according to an externally supplied intent.
///
/// A steering vector with non-zero length bypasses seeking and is
/// integrated straight into position; the target follows the agent so that
/// releasing the stick leaves it standing still. A zero vector or no intent
/// at all falls back to seeking the existing target, which starts out as
/// the spawn point.
pub fn apply_intent(agent: &mut Agent, intent: Option<MovementIntent>, config: &MovementConfig) {
    let speed = effective_speed(agent, config);
    match intent {
        Some(MovementIntent::Steer(vector)) if vector.magnitude() > f64::EPSILON => {
            agent.position = geometry::integrate(agent.position, vector, speed);
            agent.target = agent.position;
        }
        Some(MovementIntent::Seek(target)) => {
            agent.target = target.clamped();
            seek(agent, speed);
        }
        Some(MovementIntent::Steer(_)) | None => seek(agent, speed),
    }
}
