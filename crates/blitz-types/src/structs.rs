//! Core entity structs: arena geometry, agents, powers, and pills.
//!
//! All coordinates live in the normalized `[0, 100] x [0, 100]` arena space
//! (percent-of-field units). Radii and speeds use the same units.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AgentKind, PowerKind};
use crate::ids::{AgentId, PillId};

/// Lower bound of both arena axes.
pub const ARENA_MIN: f64 = 0.0;

/// Upper bound of both arena axes.
pub const ARENA_MAX: f64 = 100.0;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate, 0 at the left edge.
    pub x: f64,
    /// Vertical coordinate, 0 at the top edge.
    pub y: f64,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Vector pointing from `self` to `other`.
    pub fn vector_to(self, other: Self) -> Vector {
        Vector::new(other.x - self.x, other.y - self.y)
    }

    /// Translate by `vector` scaled by `factor`.
    pub fn offset(self, vector: Vector, factor: f64) -> Self {
        Self::new(
            vector.dx.mul_add(factor, self.x),
            vector.dy.mul_add(factor, self.y),
        )
    }

    /// Clamp both coordinates into the arena bounds.
    pub fn clamped(self) -> Self {
        Self::new(
            self.x.clamp(ARENA_MIN, ARENA_MAX),
            self.y.clamp(ARENA_MIN, ARENA_MAX),
        )
    }

    /// Whether both coordinates are finite numbers.
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whether `other` lies strictly inside a circle of `radius` around `self`.
    pub fn is_within(self, other: Self, radius: f64) -> bool {
        self.distance_to(other) < radius
    }
}

/// A 2D direction or velocity in arena units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vector {
    /// Horizontal component.
    pub dx: f64,
    /// Vertical component.
    pub dy: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a vector from components.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Unit vector in the same direction, or `fallback` when the length is
    /// zero or not finite.
    pub fn normalized_or(self, fallback: Self) -> Self {
        let len = self.magnitude();
        if len > f64::EPSILON && len.is_finite() {
            Self::new(self.dx / len, self.dy / len)
        } else {
            fallback
        }
    }

    /// Scale down to at most unit length. Shorter vectors pass through.
    pub fn capped_to_unit(self) -> Self {
        let len = self.magnitude();
        if len > 1.0 {
            Self::new(self.dx / len, self.dy / len)
        } else if len.is_finite() {
            self
        } else {
            Self::ZERO
        }
    }
}

/// What the human agent is currently trying to do.
///
/// The input collaborator picks the mode: a pointer sets a target to seek,
/// a joystick supplies a steering vector integrated straight into position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MovementIntent {
    /// Seek toward a fixed point.
    Seek(Position),
    /// Move along a vector with magnitude in `[0, 1]`.
    Steer(Vector),
}

// ---------------------------------------------------------------------------
// Powers and pills
// ---------------------------------------------------------------------------

/// A timed effect active on an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActivePower {
    /// Which effect.
    pub kind: PowerKind,
    /// Ticks remaining before the effect drops.
    pub remaining_ticks: u32,
}

/// A pickup lying on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PowerPill {
    /// Unique pill identifier.
    pub id: PillId,
    /// Where the pill sits.
    pub position: Position,
    /// The effect granted on pickup.
    pub kind: PowerKind,
    /// Ticks remaining before the pill expires.
    pub lifetime: u32,
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A human- or bot-controlled competitor.
///
/// The home position is fixed at construction; everything else is mutated
/// by the tick orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Agent {
    /// Stable roster identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Display color (CSS hex string).
    pub color: String,
    /// Human or bot.
    pub kind: AgentKind,
    /// Current position.
    pub position: Position,
    /// Current movement target.
    pub target: Position,
    /// Bottles successfully deposited (net of thefts).
    pub score: u32,
    /// Whether the agent holds a bottle.
    pub carrying: bool,
    /// Active power effects, in acquisition order. Duplicate kinds stack.
    pub powers: Vec<ActivePower>,
    /// Center of the agent's home zone.
    home: Position,
}

impl Agent {
    /// Create an agent standing on its home zone with its target set to
    /// the same point, so it does not move until told to.
    pub fn new(id: AgentId, name: String, color: String, kind: AgentKind, home: Position) -> Self {
        Self {
            id,
            name,
            color,
            kind,
            position: home,
            target: home,
            score: 0,
            carrying: false,
            powers: Vec::new(),
            home,
        }
    }

    /// Center of the agent's home zone.
    pub const fn home(&self) -> Position {
        self.home
    }

    /// Whether this agent is bot-controlled.
    pub const fn is_bot(&self) -> bool {
        matches!(self.kind, AgentKind::Bot)
    }

    /// Whether at least one effect of `kind` is active.
    pub fn has_power(&self, kind: PowerKind) -> bool {
        self.powers.iter().any(|p| p.kind == kind)
    }

    /// Whether the agent's home is shielded against theft.
    pub fn is_shielded(&self) -> bool {
        self.has_power(PowerKind::Protect)
    }
}

// ---------------------------------------------------------------------------
// Run results and profile records
// ---------------------------------------------------------------------------

/// Emitted once when a normal match produces a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameOver {
    /// The winning agent.
    pub winner_id: AgentId,
    /// Whether the winner is the human player.
    pub winner_kind: AgentKind,
    /// Name of the human player in this run.
    pub player_name: String,
    /// Simulated game time at the winning tick, in milliseconds.
    pub elapsed_ms: u64,
    /// Simulation tick on which the win fired.
    pub tick: u64,
}

/// A player's persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    /// Player display name.
    pub name: String,
    /// Completed normal matches.
    pub games_played: u32,
    /// Normal matches won by the player.
    pub games_won: u32,
    /// Fastest winning time in milliseconds.
    pub best_time: Option<u64>,
    /// Whether the tutorial has been finished at least once.
    pub tutorial_complete: bool,
}

/// One row of the fastest-wins leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeaderboardEntry {
    /// Player display name.
    pub name: String,
    /// Winning time in milliseconds.
    pub time: u64,
    /// Calendar date of the win (`YYYY-MM-DD`).
    pub date: String,
}
