//! Power pill lifecycle: spawning, aging, expiry, and pickup.
//!
//! The board holds at most one pill of each [`PowerKind`] outside the
//! tutorial. When a kind is missing, its cooldown counts down one tick at a
//! time and a fresh pill spawns at a random spot once it reaches zero.
//!
//! # Tutorial mode
//!
//! Scripted lessons stage pills at fixed positions and must never lose them
//! mid-lesson, so [`PillBoard::advance`] with `pinned = true` pins every
//! lifetime to [`PINNED_LIFETIME`] and skips random spawning entirely.

use std::collections::BTreeMap;

use blitz_types::{PillId, Position, PowerKind, PowerPill};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifetime assigned to every pill while the board is pinned.
pub const PINNED_LIFETIME: u32 = u32::MAX;

/// Tunables for pill spawning and pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillConfig {
    /// Ticks between a kind disappearing and its replacement spawning.
    pub spawn_interval_ticks: u32,
    /// Ticks a spawned pill stays on the board (default: 900).
    pub lifetime_ticks: u32,
    /// Ticks a picked-up effect lasts (default: 360).
    pub power_duration_ticks: u32,
    /// Agent-to-pill distance below which the pill is taken.
    pub pickup_radius: f64,
    /// Inclusive lower corner of the random spawn rectangle.
    pub spawn_min: Position,
    /// Exclusive upper corner of the random spawn rectangle.
    pub spawn_max: Position,
}

impl Default for PillConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ticks: 600,
            lifetime_ticks: 900,
            power_duration_ticks: 360,
            // pill radius (2) + agent radius (3)
            pickup_radius: 5.0,
            spawn_min: Position::new(15.0, 20.0),
            spawn_max: Position::new(85.0, 80.0),
        }
    }
}

/// What changed on the board during one [`PillBoard::advance`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PillTick {
    /// Pills that ran out of lifetime and were removed.
    pub expired: Vec<PowerPill>,
    /// Pills that spawned this tick.
    pub spawned: Vec<PowerPill>,
}

/// Live pills plus the per-kind spawn cooldowns.
#[derive(Debug, Clone, PartialEq)]
pub struct PillBoard {
    /// Pills in spawn order.
    pills: Vec<PowerPill>,
    /// Ticks until each kind may respawn.
    cooldowns: BTreeMap<PowerKind, u32>,
}

impl Default for PillBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PillBoard {
    /// An empty board with every cooldown at zero, so the first
    /// non-tutorial tick spawns one pill of each kind.
    pub fn new() -> Self {
        Self {
            pills: Vec::new(),
            cooldowns: PowerKind::ALL.iter().map(|&kind| (kind, 0)).collect(),
        }
    }

    /// Live pills in spawn order.
    pub fn pills(&self) -> &[PowerPill] {
        &self.pills
    }

    /// Remaining cooldown for `kind`.
    pub fn cooldown(&self, kind: PowerKind) -> u32 {
        self.cooldowns.get(&kind).copied().unwrap_or(0)
    }

    /// Number of live pills of `kind`.
    pub fn count_of(&self, kind: PowerKind) -> usize {
        self.pills.iter().filter(|p| p.kind == kind).count()
    }

    /// Age the board by one tick and respawn missing kinds.
    ///
    /// With `pinned` set, lifetimes are pinned and nothing spawns.
    pub fn advance<R: Rng>(&mut self, config: &PillConfig, pinned: bool, rng: &mut R) -> PillTick {
        let mut tick = PillTick::default();

        if pinned {
            for pill in &mut self.pills {
                pill.lifetime = PINNED_LIFETIME;
            }
            return tick;
        }

        for pill in &mut self.pills {
            pill.lifetime = pill.lifetime.saturating_sub(1);
        }
        let (alive, expired): (Vec<_>, Vec<_>) =
            self.pills.drain(..).partition(|p| p.lifetime > 0);
        self.pills = alive;
        for pill in &expired {
            debug!(pill = %pill.id, kind = ?pill.kind, "Pill expired");
        }
        tick.expired = expired;

        for kind in PowerKind::ALL {
            if self.count_of(kind) > 0 {
                continue;
            }
            let cooldown = self.cooldown(kind);
            if cooldown == 0 {
                let pill = self.spawn(kind, None, config, rng);
                self.cooldowns.insert(kind, config.spawn_interval_ticks);
                tick.spawned.push(pill);
            } else {
                self.cooldowns.insert(kind, cooldown.saturating_sub(1));
            }
        }

        tick
    }

    /// Place a pill of `kind` at `at`, or at a random spot inside the spawn
    /// rectangle when no position is given.
    pub fn spawn<R: Rng>(
        &mut self,
        kind: PowerKind,
        at: Option<Position>,
        config: &PillConfig,
        rng: &mut R,
    ) -> PowerPill {
        let position = at.unwrap_or_else(|| random_spawn_point(config, rng));
        let pill = PowerPill {
            id: PillId::from_random_bytes(rng.random()),
            position,
            kind,
            lifetime: config.lifetime_ticks,
        };
        debug!(pill = %pill.id, ?kind, x = position.x, y = position.y, "Pill spawned");
        self.pills.push(pill);
        pill
    }

    /// Replace the whole board with a single pill at a fixed spot.
    pub fn stage<R: Rng>(
        &mut self,
        kind: PowerKind,
        at: Position,
        config: &PillConfig,
        rng: &mut R,
    ) -> PowerPill {
        self.pills.clear();
        self.spawn(kind, Some(at), config, rng)
    }

    /// Remove and return every pill strictly within `radius` of `position`.
    pub fn take_within(&mut self, position: Position, radius: f64) -> Vec<PowerPill> {
        let (taken, kept): (Vec<_>, Vec<_>) = self
            .pills
            .drain(..)
            .partition(|p| p.position.is_within(position, radius));
        self.pills = kept;
        taken
    }
}

/// Uniform point in `[spawn_min, spawn_max)`. A degenerate axis collapses to
/// its lower bound.
fn random_spawn_point<R: Rng>(config: &PillConfig, rng: &mut R) -> Position {
    Position::new(
        sample_axis(config.spawn_min.x, config.spawn_max.x, rng),
        sample_axis(config.spawn_min.y, config.spawn_max.y, rng),
    )
}

fn sample_axis<R: Rng>(low: f64, high: f64, rng: &mut R) -> f64 {
    if low < high {
        rng.random_range(low..high)
    } else {
        low
    }
}
