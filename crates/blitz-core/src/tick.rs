//! Tick cycle: the fixed per-frame pipeline that drives a run.
//!
//! Each call to [`run_tick`] is one frame. A frame first checks whether the
//! simulation is frozen:
//!
//! 1. **Countdown** -- feed real time into the countdown and stop.
//! 2. **Pause / win** -- stop without touching anything.
//!
//! A live frame then runs these phases, in order, each seeing the writes of
//! the ones before it:
//!
//! 1. **Pills** -- age, expire, and respawn power pills.
//! 2. **Script** -- evaluate one tutorial transition (tutorial runs only).
//! 3. **Movement** -- per agent in roster order: the human follows its
//!    intent, bots decide a target and seek it (or follow the script).
//! 4. **Pickup** -- each agent takes every pill in range.
//! 5. **Zones** -- pool pickups, deposits, thefts, win detection.
//! 6. **Powers** -- every timer ages by one tick.
//! 7. **Time** -- the frame's real delta is added to game time.
//!
//! A winner found in phase 5 is recorded on the world and, in a normal
//! match, reported once as a [`GameOver`] on the summary.

use std::time::Duration;

use blitz_agents::powers::{self, PillPickup};
use blitz_agents::roster::{self, ALPHA_ID};
use blitz_agents::{AgentError, DecisionContext, InteractionEvent, choose_target, resolve_zones};
use blitz_types::{AgentKind, GameOver, RunMode, TrialStep};
use blitz_world::movement::seek;
use blitz_world::{PillTick, apply_intent, effective_speed};
use tracing::{debug, info};

use crate::clock::{ClockError, CountdownStep};
use crate::state::World;
use crate::tutorial::ScriptInputs;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock counter overflowed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A roster lookup failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// Why a frame did or did not simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frozen by the pre-match countdown.
    CountingDown(CountdownStep),
    /// Frozen by pause.
    Paused,
    /// Frozen because a winner is set.
    Finished,
    /// The simulation advanced.
    Simulated,
}

/// Summary of a single frame.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// Frame number.
    pub frame: u64,
    /// Simulated tick number after this frame.
    pub tick: u64,
    /// Whether the frame simulated.
    pub outcome: TickOutcome,
    /// Pill expiries and spawns.
    pub pills: PillTick,
    /// Pills taken by agents.
    pub pickups: Vec<PillPickup>,
    /// Pool pickups, deposits, thefts, and wins, in order.
    pub interactions: Vec<InteractionEvent>,
    /// Tutorial step entered this tick, if any.
    pub tutorial_step: Option<TrialStep>,
    /// Set on the tick a normal match is won.
    pub game_over: Option<GameOver>,
    /// Game time after this frame.
    pub elapsed_ms: u64,
}

impl TickSummary {
    fn frozen(world: &World, frame: u64, outcome: TickOutcome) -> Self {
        Self {
            frame,
            tick: world.clock.tick(),
            outcome,
            pills: PillTick::default(),
            pickups: Vec::new(),
            interactions: Vec::new(),
            tutorial_step: None,
            game_over: None,
            elapsed_ms: world.clock.elapsed_ms(),
        }
    }
}

/// Execute one frame against `world`. `delta` is the real time since the
/// previous frame.
///
/// # Errors
///
/// Returns [`TickError`] if a clock counter overflows or the roster is
/// missing an agent the script or resolver needs.
pub fn run_tick(world: &mut World, delta: Duration) -> Result<TickSummary, TickError> {
    let frame = world.clock.advance_frame()?;

    if world.clock.countdown().is_some() {
        let step = world.clock.count_down(delta);
        match step {
            CountdownStep::Stepped(remaining) => info!(remaining, "Countdown"),
            CountdownStep::Finished => info!(frame, "Match live"),
            CountdownStep::Holding(_) => {}
        }
        return Ok(TickSummary::frozen(world, frame, TickOutcome::CountingDown(step)));
    }
    if world.paused {
        return Ok(TickSummary::frozen(world, frame, TickOutcome::Paused));
    }
    if world.winner.is_some() {
        return Ok(TickSummary::frozen(world, frame, TickOutcome::Finished));
    }

    let tick = world.clock.advance_tick()?;

    // --- Pills ---
    let pinned = world.mode == RunMode::Tutorial;
    let pills = world.board.advance(&world.config.pills, pinned, &mut world.rng);

    // --- Script ---
    let tutorial_step = run_script(world, tick)?;

    // --- Movement ---
    move_agents(world, tick)?;

    // --- Pickup ---
    let pickups = powers::collect_pills(&mut world.agents, &mut world.board, &world.config.pills);

    // --- Zones ---
    let win_score = world.win_score();
    let resolution = resolve_zones(
        &mut world.agents,
        &mut world.pool,
        &world.config.arena,
        win_score,
    );

    // --- Powers ---
    for agent in &mut world.agents {
        powers::tick_powers(agent);
    }

    // --- Time ---
    world.clock.accumulate(delta);
    let elapsed_ms = world.clock.elapsed_ms();

    let mut game_over = None;
    if let Some(winner_id) = resolution.winner {
        world.winner = Some(winner_id);
        let winner = roster::find(&world.agents, winner_id)?;
        info!(
            winner = %winner_id,
            name = %winner.name,
            tick,
            elapsed_ms,
            mode = ?world.mode,
            "Run won"
        );
        if world.mode == RunMode::Match {
            game_over = Some(GameOver {
                winner_id,
                winner_kind: winner.kind,
                player_name: world.player_name.clone(),
                elapsed_ms,
                tick,
            });
        }
    }

    debug!(
        tick,
        pool = world.pool,
        pills = world.board.pills().len(),
        interactions = resolution.events.len(),
        "Tick complete"
    );

    Ok(TickSummary {
        frame,
        tick,
        outcome: TickOutcome::Simulated,
        pills,
        pickups,
        interactions: resolution.events,
        tutorial_step,
        game_over,
        elapsed_ms,
    })
}

fn run_script(world: &mut World, tick: u64) -> Result<Option<TrialStep>, TickError> {
    let Some(tutorial) = world.tutorial.as_mut() else {
        return Ok(None);
    };
    let inputs = ScriptInputs {
        tick,
        human: roster::human(&world.agents)?,
        thief_home: roster::find(&world.agents, ALPHA_ID)?.home(),
        center: world.config.arena.center,
    };
    Ok(tutorial.advance(
        &inputs,
        &world.config.tutorial,
        &mut world.board,
        &world.config.pills,
        &mut world.rng,
    ))
}

fn move_agents(world: &mut World, tick: u64) -> Result<(), TickError> {
    let human_home = roster::human(&world.agents)?.home();

    for index in 0..world.agents.len() {
        let Some(agent) = world.agents.get(index) else {
            continue;
        };
        let (id, kind) = (agent.id, agent.kind);

        if kind == AgentKind::Human {
            if let Some(human) = world.agents.get_mut(index) {
                apply_intent(human, world.human_intent, &world.config.movement);
            }
            continue;
        }

        if let Some(tutorial) = world.tutorial.as_mut() {
            if !tutorial.thief_armed() {
                continue;
            }
            if id == ALPHA_ID {
                if let Some(thief) = world.agents.get_mut(index) {
                    tutorial.drive_thief(
                        thief,
                        human_home,
                        tick,
                        world.config.arena.zone_radius,
                        world.config.movement.base_speed,
                        &world.config.tutorial,
                    );
                }
                continue;
            }
        }

        steer_bot(world, index);
    }
    Ok(())
}

/// Move a bot toward the target it chose last tick, then pick the target
/// for the next one from its new position.
fn steer_bot(world: &mut World, index: usize) {
    if let Some(bot) = world.agents.get_mut(index) {
        let speed = effective_speed(bot, &world.config.movement);
        seek(bot, speed);
    }
    let decision = {
        let Some(bot) = world.agents.get(index) else {
            return;
        };
        let ctx = DecisionContext {
            agents: &world.agents,
            pool: world.pool,
            pills: world.board.pills(),
            center: world.config.arena.center,
            win_score: world.win_score(),
        };
        choose_target(bot, &ctx, &world.config.bots)
    };
    if let Some(bot) = world.agents.get_mut(index) {
        bot.target = decision.target;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blitz_agents::roster::{HUMAN_ID, SIGMA_ID, find, find_mut};
    use blitz_types::{ActivePower, Position, PowerKind};

    use super::*;
    use crate::config::GameConfig;

    const FRAME: Duration = Duration::from_millis(16);

    fn live_match() -> World {
        let mut config = GameConfig::default();
        config.world.countdown_seconds = 0;
        World::new_match("Ada", &config, 9)
    }

    #[test]
    fn countdown_freezes_everything() {
        let mut world = World::new_match("Ada", &GameConfig::default(), 9);
        let before = world.agents.clone();
        let summary = run_tick(&mut world, Duration::from_millis(400)).unwrap();
        assert_eq!(
            summary.outcome,
            TickOutcome::CountingDown(CountdownStep::Holding(3))
        );
        assert_eq!(world.agents, before);
        assert!(world.board.pills().is_empty());
        assert_eq!(world.clock.tick(), 0);
        assert_eq!(world.clock.elapsed_ms(), 0);
    }

    #[test]
    fn countdown_hands_over_to_live_play() {
        let mut world = World::new_match("Ada", &GameConfig::default(), 9);
        for _ in 0..4 {
            run_tick(&mut world, Duration::from_secs(1)).unwrap();
        }
        assert_eq!(world.clock.countdown(), None);
        let summary = run_tick(&mut world, FRAME).unwrap();
        assert_eq!(summary.outcome, TickOutcome::Simulated);
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.elapsed_ms, 16);
    }

    #[test]
    fn first_live_tick_spawns_both_pill_kinds() {
        let mut world = live_match();
        let summary = run_tick(&mut world, FRAME).unwrap();
        assert_eq!(summary.pills.spawned.len(), 2);
        assert_eq!(world.board.count_of(PowerKind::Speed), 1);
        assert_eq!(world.board.count_of(PowerKind::Protect), 1);
    }

    #[test]
    fn pause_freezes_simulation_but_counts_frames() {
        let mut world = live_match();
        world.set_paused(true);
        let summary = run_tick(&mut world, FRAME).unwrap();
        assert_eq!(summary.outcome, TickOutcome::Paused);
        assert_eq!(summary.frame, 1);
        assert_eq!(summary.tick, 0);
        assert_eq!(world.clock.elapsed_ms(), 0);
    }

    #[test]
    fn bots_pick_the_pool_then_move_on_the_next_tick() {
        let mut world = live_match();
        run_tick(&mut world, FRAME).unwrap();
        let alpha = find(&world.agents, ALPHA_ID).unwrap();
        assert_eq!(alpha.target, Position::new(50.0, 50.0));
        assert_eq!(alpha.position, alpha.home());

        run_tick(&mut world, FRAME).unwrap();
        let alpha = find(&world.agents, ALPHA_ID).unwrap();
        assert!((alpha.position.distance_to(alpha.home()) - 0.25).abs() < 1e-9);
        // The idle human stays home.
        let human = find(&world.agents, HUMAN_ID).unwrap();
        assert_eq!(human.position, human.home());
    }

    #[test]
    fn power_timers_age_after_resolution() {
        let mut world = live_match();
        find_mut(&mut world.agents, HUMAN_ID).unwrap().powers.push(ActivePower {
            kind: PowerKind::Speed,
            remaining_ticks: 2,
        });
        run_tick(&mut world, FRAME).unwrap();
        assert!(find(&world.agents, HUMAN_ID).unwrap().has_power(PowerKind::Speed));
        run_tick(&mut world, FRAME).unwrap();
        assert!(!find(&world.agents, HUMAN_ID).unwrap().has_power(PowerKind::Speed));
    }

    #[test]
    fn winning_tick_emits_game_over_once() {
        let mut world = live_match();
        {
            let sigma = find_mut(&mut world.agents, SIGMA_ID).unwrap();
            sigma.score = 2;
            sigma.carrying = true;
        }
        let first = run_tick(&mut world, FRAME).unwrap();
        assert!(first.game_over.is_some());
        for _ in 0..5 {
            let summary = run_tick(&mut world, FRAME).unwrap();
            assert_eq!(summary.outcome, TickOutcome::Finished);
            assert!(summary.game_over.is_none());
        }
        assert_eq!(world.winner, Some(SIGMA_ID));
        assert_eq!(world.clock.elapsed_ms(), 16);
    }

    #[test]
    fn game_over_carries_elapsed_including_winning_frame() {
        let mut world = live_match();
        {
            let sigma = find_mut(&mut world.agents, SIGMA_ID).unwrap();
            sigma.score = 2;
            sigma.carrying = true;
        }
        let summary = run_tick(&mut world, Duration::from_millis(20)).unwrap();
        let over = summary.game_over.unwrap();
        assert_eq!(over.winner_id, SIGMA_ID);
        assert_eq!(over.winner_kind, AgentKind::Bot);
        assert_eq!(over.elapsed_ms, 20);
        assert_eq!(over.tick, 1);
        assert_eq!(over.player_name, "Ada");
    }

    #[test]
    fn tutorial_bots_stand_still_until_thief_is_armed() {
        let mut world = World::new_tutorial("Ada", &GameConfig::default(), 9).unwrap();
        for _ in 0..30 {
            run_tick(&mut world, FRAME).unwrap();
        }
        for bot in world.agents.iter().filter(|a| a.is_bot()) {
            assert_eq!(bot.position, bot.home());
        }
        // No random pills in the tutorial.
        assert!(world.board.pills().is_empty());
    }
}
