//! Power effects: granting them from pills and ageing them each tick.
//!
//! Picking up a second pill of a kind the agent already has pushes a second,
//! independent timer instead of refreshing the first. The effect stays
//! active until the longer timer runs out.

use blitz_types::{ActivePower, Agent, AgentId, PowerKind, PowerPill};
use blitz_world::{PillBoard, PillConfig};
use tracing::debug;

/// A pill taken by an agent this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillPickup {
    /// Who took it.
    pub agent_id: AgentId,
    /// The pill, as it was on the board.
    pub pill: PowerPill,
}

/// Add a fresh timer of `kind` to `agent`.
pub fn grant(agent: &mut Agent, kind: PowerKind, duration_ticks: u32) {
    agent.powers.push(ActivePower {
        kind,
        remaining_ticks: duration_ticks,
    });
}

/// Decrement every timer on `agent` and drop the ones that hit zero.
pub fn tick_powers(agent: &mut Agent) {
    for power in &mut agent.powers {
        power.remaining_ticks = power.remaining_ticks.saturating_sub(1);
    }
    agent.powers.retain(|p| p.remaining_ticks > 0);
}

/// Let each agent, in roster order, take every pill within pickup range.
///
/// An agent overlapping two pills takes both. A pill taken by an earlier
/// agent is gone for later ones.
pub fn collect_pills(
    agents: &mut [Agent],
    board: &mut PillBoard,
    config: &PillConfig,
) -> Vec<PillPickup> {
    let mut pickups = Vec::new();
    for agent in agents.iter_mut() {
        for pill in board.take_within(agent.position, config.pickup_radius) {
            grant(agent, pill.kind, config.power_duration_ticks);
            debug!(agent = %agent.id, kind = ?pill.kind, "Pill collected");
            pickups.push(PillPickup {
                agent_id: agent.id,
                pill,
            });
        }
    }
    pickups
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blitz_types::Position;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::roster::{ALPHA_ID, HUMAN_ID, starting_roster};

    #[test]
    fn timers_expire_and_drop() {
        let mut agents = starting_roster("T");
        let agent = agents.first_mut().unwrap();
        grant(agent, PowerKind::Speed, 2);
        tick_powers(agent);
        assert!(agent.has_power(PowerKind::Speed));
        tick_powers(agent);
        assert!(!agent.has_power(PowerKind::Speed));
        assert!(agent.powers.is_empty());
    }

    #[test]
    fn stacked_timers_last_as_long_as_the_longest() {
        let mut agents = starting_roster("T");
        let agent = agents.first_mut().unwrap();
        grant(agent, PowerKind::Speed, 3);
        grant(agent, PowerKind::Speed, 1);
        tick_powers(agent);
        assert_eq!(agent.powers.len(), 1);
        tick_powers(agent);
        assert!(agent.has_power(PowerKind::Speed));
        tick_powers(agent);
        assert!(!agent.has_power(PowerKind::Speed));
    }

    #[test]
    fn agent_takes_all_overlapping_pills() {
        let cfg = PillConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = PillBoard::new();
        let mut agents = starting_roster("T");
        let home = agents.first().unwrap().home();
        let _ = board.spawn(PowerKind::Speed, Some(home), &cfg, &mut rng);
        let _ = board.spawn(PowerKind::Protect, Some(Position::new(home.x + 1.0, home.y)), &cfg, &mut rng);

        let pickups = collect_pills(&mut agents, &mut board, &cfg);
        assert_eq!(pickups.len(), 2);
        assert!(pickups.iter().all(|p| p.agent_id == HUMAN_ID));
        let human = agents.first().unwrap();
        assert!(human.has_power(PowerKind::Speed));
        assert!(human.is_shielded());
        assert!(board.pills().is_empty());
    }

    #[test]
    fn earlier_roster_agent_wins_contested_pill() {
        let cfg = PillConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = PillBoard::new();
        let mut agents = starting_roster("T");
        let spot = Position::new(30.0, 30.0);
        for a in &mut agents {
            a.position = spot;
        }
        let _ = board.spawn(PowerKind::Speed, Some(spot), &cfg, &mut rng);
        let pickups = collect_pills(&mut agents, &mut board, &cfg);
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups.first().unwrap().agent_id, HUMAN_ID);
        assert!(!agents.iter().any(|a| a.id == ALPHA_ID && a.has_power(PowerKind::Speed)));
    }
}
