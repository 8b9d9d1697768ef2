//! Tick callback that turns each frame's outcome into structured log
//! lines.
//!
//! Zone events, pill pickups, and tutorial transitions are logged as they
//! happen. A full JSON snapshot is logged at `trace` level every
//! `snapshot_every` simulated ticks.

use blitz_agents::InteractionEvent;
use blitz_core::{TickCallback, TickOutcome, TickSummary, World};
use tracing::{debug, info, trace};

/// Callback that logs gameplay events from the tick loop.
#[derive(Debug)]
pub struct EventLog {
    snapshot_every: u64,
    deposits: u64,
    thefts: u64,
}

impl EventLog {
    /// Log a snapshot every `snapshot_every` simulated ticks (0 disables).
    pub const fn new(snapshot_every: u64) -> Self {
        Self {
            snapshot_every,
            deposits: 0,
            thefts: 0,
        }
    }

    /// Deposits seen so far.
    pub const fn deposits(&self) -> u64 {
        self.deposits
    }

    /// Thefts seen so far.
    pub const fn thefts(&self) -> u64 {
        self.thefts
    }
}

impl TickCallback for EventLog {
    fn on_tick(&mut self, summary: &TickSummary, world: &World) {
        if summary.outcome != TickOutcome::Simulated {
            return;
        }

        for event in &summary.interactions {
            match event {
                InteractionEvent::PoolPickup { agent_id, pool_left } => {
                    debug!(tick = summary.tick, agent = %agent_id, pool_left, "Pickup");
                }
                InteractionEvent::Deposit { agent_id, score } => {
                    self.deposits = self.deposits.saturating_add(1);
                    info!(tick = summary.tick, agent = %agent_id, score, "Deposit");
                }
                InteractionEvent::Theft { thief_id, victim_id } => {
                    self.thefts = self.thefts.saturating_add(1);
                    info!(tick = summary.tick, thief = %thief_id, victim = %victim_id, "Theft");
                }
                InteractionEvent::Won { agent_id } => {
                    info!(tick = summary.tick, agent = %agent_id, "Winning deposit");
                }
            }
        }

        for pickup in &summary.pickups {
            debug!(tick = summary.tick, agent = %pickup.agent_id, kind = ?pickup.pill.kind, "Power up");
        }

        if summary.tick.checked_rem(self.snapshot_every) == Some(0) {
            match serde_json::to_string(&world.snapshot()) {
                Ok(json) => trace!(tick = summary.tick, snapshot = %json, "Snapshot"),
                Err(e) => debug!(error = %e, "Snapshot serialization failed"),
            }
        }
    }
}
