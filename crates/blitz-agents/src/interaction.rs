//! Zone interactions: pool pickups, deposits, and thefts.
//!
//! Resolution walks the roster in order. For each agent the pool is checked
//! first, then every home in roster order. Mutations apply immediately, so a
//! later check in the same tick sees the effect of an earlier one (an agent
//! that just picked up from the pool can deposit at a home it is also
//! standing in, and a victim robbed earlier this tick has a lower score for
//! the next raider).

use blitz_types::{Agent, AgentId, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Geometry of the interaction zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Center of the bottle pool.
    pub center: Position,
    /// Radius shared by the pool zone and every home zone. Strict.
    pub zone_radius: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            center: Position::new(50.0, 50.0),
            zone_radius: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Something that happened while resolving zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// An agent took a bottle from the pool.
    PoolPickup {
        /// Who picked it up.
        agent_id: AgentId,
        /// Bottles left afterwards.
        pool_left: u32,
    },
    /// An agent dropped its bottle at home.
    Deposit {
        /// Who deposited.
        agent_id: AgentId,
        /// Score after the deposit.
        score: u32,
    },
    /// An agent took a bottle out of a rival's home.
    Theft {
        /// The raider.
        thief_id: AgentId,
        /// The home owner.
        victim_id: AgentId,
    },
    /// A deposit reached the win threshold.
    Won {
        /// The winner.
        agent_id: AgentId,
    },
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Events in the order they happened.
    pub events: Vec<InteractionEvent>,
    /// First agent to reach the win threshold this pass, if any.
    pub winner: Option<AgentId>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve pool pickups, deposits, and thefts for one tick.
pub fn resolve_zones(
    agents: &mut [Agent],
    pool: &mut u32,
    config: &ZoneConfig,
    win_score: u32,
) -> Resolution {
    let mut resolution = Resolution::default();

    for i in 0..agents.len() {
        pickup_from_pool(agents, i, pool, config, &mut resolution);
        for j in 0..agents.len() {
            visit_home(agents, i, j, config, win_score, &mut resolution);
        }
    }

    resolution
}

fn pickup_from_pool(
    agents: &mut [Agent],
    i: usize,
    pool: &mut u32,
    config: &ZoneConfig,
    resolution: &mut Resolution,
) {
    let Some(agent) = agents.get_mut(i) else {
        return;
    };
    if agent.carrying || *pool == 0 || !agent.position.is_within(config.center, config.zone_radius) {
        return;
    }
    agent.carrying = true;
    *pool = pool.saturating_sub(1);
    debug!(agent_id = %agent.id, pool_left = *pool, "Pool pickup");
    resolution.events.push(InteractionEvent::PoolPickup {
        agent_id: agent.id,
        pool_left: *pool,
    });
}

fn visit_home(
    agents: &mut [Agent],
    i: usize,
    j: usize,
    config: &ZoneConfig,
    win_score: u32,
    resolution: &mut Resolution,
) {
    let Some(owner) = agents.get(j) else {
        return;
    };
    let (owner_id, home, owner_shielded, owner_score) =
        (owner.id, owner.home(), owner.is_shielded(), owner.score);

    let Some(agent) = agents.get_mut(i) else {
        return;
    };
    if !agent.position.is_within(home, config.zone_radius) {
        return;
    }

    if i == j {
        if !agent.carrying {
            return;
        }
        agent.carrying = false;
        agent.score = agent.score.saturating_add(1);
        debug!(agent_id = %agent.id, score = agent.score, "Bottle deposited");
        resolution.events.push(InteractionEvent::Deposit {
            agent_id: agent.id,
            score: agent.score,
        });
        if agent.score >= win_score && resolution.winner.is_none() {
            info!(winner = %agent.id, score = agent.score, "Win threshold reached");
            resolution.winner = Some(agent.id);
            resolution
                .events
                .push(InteractionEvent::Won { agent_id: agent.id });
        }
        return;
    }

    if agent.carrying || owner_shielded || owner_score == 0 {
        return;
    }
    agent.carrying = true;
    let thief_id = agent.id;
    if let Some(owner) = agents.get_mut(j) {
        owner.score = owner.score.saturating_sub(1);
    }
    debug!(thief = %thief_id, victim = %owner_id, "Bottle stolen");
    resolution.events.push(InteractionEvent::Theft {
        thief_id,
        victim_id: owner_id,
    });
}
