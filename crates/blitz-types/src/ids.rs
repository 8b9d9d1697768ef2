//! Type-safe identifiers for agents and power pills.
//!
//! Agents live in a fixed three-slot roster, so an [`AgentId`] is a small
//! slot number rendered as `p1`, `p2`, `p3`. Pills come and go every few
//! hundred ticks and are keyed by a [`PillId`] wrapping a [`Uuid`] built
//! from the world's seeded random source, never from ambient entropy.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Stable identifier of an agent within a run's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentId(pub u8);

impl AgentId {
    /// Return the roster slot number (1-based).
    pub const fn slot(self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Unique identifier for a power pill on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PillId(pub Uuid);

impl PillId {
    /// Build an identifier from 16 random bytes (UUID v4 layout).
    ///
    /// Callers draw the bytes from the world's seeded generator so that
    /// the same seed always yields the same pill ids.
    pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl core::fmt::Display for PillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PillId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_id_displays_as_slot() {
        assert_eq!(AgentId(1).to_string(), "p1");
        assert_eq!(AgentId(3).to_string(), "p3");
    }

    #[test]
    fn pill_id_is_deterministic_for_same_bytes() {
        let a = PillId::from_random_bytes([7; 16]);
        let b = PillId::from_random_bytes([7; 16]);
        let c = PillId::from_random_bytes([8; 16]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.into_inner().get_version_num(), 4);
    }
}
