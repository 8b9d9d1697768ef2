//! Integration tests driving bots through full fetch/deposit rounds with the
//! decision engine and the zone resolver.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use blitz_agents::roster::{ALPHA_ID, SIGMA_ID, find, starting_roster};
use blitz_agents::{BotWeights, DecisionContext, Objective, ZoneConfig, choose_target, resolve_zones};
use blitz_types::{Agent, AgentId};
use blitz_world::MovementConfig;
use blitz_world::effective_speed;
use blitz_world::movement::seek;

/// Bottles are never created or destroyed, only moved around.
fn total_bottles(agents: &[Agent], pool: u32) -> u32 {
    pool + agents.iter().map(|a| a.score + u32::from(a.carrying)).sum::<u32>()
}

/// Advance bots one step: move toward last step's target, then re-decide.
/// Returns the winner, if any.
fn step(agents: &mut [Agent], pool: &mut u32, win_score: u32) -> Option<AgentId> {
    let zones = ZoneConfig::default();
    let weights = BotWeights::default();
    let movement = MovementConfig::default();

    for agent in agents.iter_mut().filter(|a| a.is_bot()) {
        let speed = effective_speed(agent, &movement);
        seek(agent, speed);
    }
    let decisions: Vec<_> = {
        let ctx = DecisionContext {
            agents: &*agents,
            pool: *pool,
            pills: &[],
            center: zones.center,
            win_score,
        };
        agents
            .iter()
            .map(|a| a.is_bot().then(|| choose_target(a, &ctx, &weights)))
            .collect()
    };
    for (agent, decision) in agents.iter_mut().zip(decisions) {
        if let Some(decision) = decision {
            agent.target = decision.target;
        }
    }
    resolve_zones(agents, pool, &zones, win_score).winner
}

#[test]
fn bots_open_by_fetching() {
    let agents = starting_roster("Idle");
    let ctx = DecisionContext {
        agents: &agents,
        pool: 5,
        pills: &[],
        center: ZoneConfig::default().center,
        win_score: 3,
    };
    for id in [ALPHA_ID, SIGMA_ID] {
        let bot = find(&agents, id).unwrap();
        let choice = choose_target(bot, &ctx, &BotWeights::default());
        assert_eq!(choice.objective, Objective::Fetch);
    }
}

#[test]
fn bots_play_a_match_to_completion_against_idle_human() {
    let mut agents = starting_roster("Idle");
    let mut pool = 5;
    let mut winner = None;

    for _ in 0..20_000 {
        winner = step(&mut agents, &mut pool, 3);
        assert_eq!(total_bottles(&agents, pool), 5);
        assert!(agents.iter().all(|a| a.score <= 5));
        if winner.is_some() {
            break;
        }
    }

    let winner = winner.unwrap();
    assert!(winner == ALPHA_ID || winner == SIGMA_ID);
    assert!(find(&agents, winner).unwrap().score >= 3);
}

#[test]
fn first_round_trip_scores_for_both_bots() {
    let mut agents = starting_roster("Idle");
    let mut pool = 5;
    for _ in 0..2_000 {
        step(&mut agents, &mut pool, 3);
        if agents.iter().filter(|a| a.score > 0).count() == 2 {
            break;
        }
    }
    // Symmetric homes: both bots reach the pool, carry home, and deposit.
    assert_eq!(find(&agents, ALPHA_ID).unwrap().score, 1);
    assert_eq!(find(&agents, SIGMA_ID).unwrap().score, 1);
    assert_eq!(pool, 3);
}
