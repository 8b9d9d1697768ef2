//! The owned world for one run, plus its read-only snapshot.
//!
//! A [`World`] is created fresh for every match or tutorial and dropped when
//! the player returns to the menu. It owns its random source, so a run is
//! reproducible from its seed and the sequence of inputs and deltas.

use blitz_agents::AgentError;
use blitz_agents::roster::{self, ALPHA_ID};
use blitz_types::{
    Agent, AgentId, MovementIntent, PillView, Position, RunMode, Vector, WorldSnapshot,
};
use blitz_world::PillBoard;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::clock::MatchClock;
use crate::config::GameConfig;
use crate::tutorial::TutorialState;

/// The mutable simulation state for one run.
#[derive(Debug, Clone)]
pub struct World {
    /// Tuning for this run.
    pub config: GameConfig,
    /// Match or tutorial.
    pub mode: RunMode,
    /// Name the human plays under.
    pub player_name: String,
    /// The fixed roster, in roster order.
    pub agents: Vec<Agent>,
    /// Bottles left in the center.
    pub pool: u32,
    /// Live pills and spawn cooldowns.
    pub board: PillBoard,
    /// The winner. Terminal once set.
    pub winner: Option<AgentId>,
    /// Whether the run is paused.
    pub paused: bool,
    /// Frames, ticks, countdown, and game time.
    pub clock: MatchClock,
    /// Tutorial progress, present only in tutorial runs.
    pub tutorial: Option<TutorialState>,
    /// Latest movement input for the human.
    pub human_intent: Option<MovementIntent>,
    /// Random source for pill placement and ids.
    pub rng: StdRng,
}

impl World {
    /// A normal match: full pool, countdown, nobody ahead.
    pub fn new_match(player_name: &str, config: &GameConfig, seed: u64) -> Self {
        info!(player = player_name, seed, "Starting match");
        Self {
            config: config.clone(),
            mode: RunMode::Match,
            player_name: player_name.to_owned(),
            agents: roster::starting_roster(player_name),
            pool: config.world.initial_pool,
            board: PillBoard::new(),
            winner: None,
            paused: false,
            clock: MatchClock::new(config.world.countdown_seconds),
            tutorial: None,
            human_intent: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A tutorial run: small pool, Bot Alpha one bottle up, no countdown.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] if the roster has no Bot Alpha.
    pub fn new_tutorial(
        player_name: &str,
        config: &GameConfig,
        seed: u64,
    ) -> Result<Self, AgentError> {
        info!(player = player_name, seed, "Starting tutorial");
        let mut agents = roster::starting_roster(player_name);
        roster::find_mut(&mut agents, ALPHA_ID)?.score = config.tutorial.rival_head_start;
        Ok(Self {
            config: config.clone(),
            mode: RunMode::Tutorial,
            player_name: player_name.to_owned(),
            agents,
            pool: config.tutorial.initial_pool,
            board: PillBoard::new(),
            winner: None,
            paused: false,
            clock: MatchClock::new(0),
            tutorial: Some(TutorialState::new(&config.tutorial)),
            human_intent: None,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Score that wins this run.
    pub const fn win_score(&self) -> u32 {
        match self.mode {
            RunMode::Match => self.config.world.win_score,
            RunMode::Tutorial => self.config.tutorial.win_score,
        }
    }

    /// Whether player input is currently ignored.
    pub const fn input_locked(&self) -> bool {
        self.clock.countdown().is_some() || self.winner.is_some()
    }

    /// Point the human at an absolute arena position (clamped into the
    /// arena). Returns `false`, keeping the current intent, if input is
    /// locked or a coordinate is not finite.
    pub fn set_human_target(&mut self, target: Position) -> bool {
        if self.input_locked() {
            return false;
        }
        if !target.is_finite() {
            warn!(x = target.x, y = target.y, "Ignoring non-finite target");
            return false;
        }
        self.human_intent = Some(MovementIntent::Seek(target.clamped()));
        true
    }

    /// Steer the human along a vector (capped to unit length). A zero vector
    /// releases the stick. Returns `false` if input is locked.
    pub fn set_human_steering(&mut self, steering: Vector) -> bool {
        if self.input_locked() {
            return false;
        }
        self.human_intent = Some(MovementIntent::Steer(steering.capped_to_unit()));
        true
    }

    /// Pause or resume.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!(paused, "Pause toggled");
        }
        self.paused = paused;
    }

    /// Copy out everything the presentation layer draws.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.clock.tick(),
            mode: self.mode,
            agents: self.agents.clone(),
            pills: self.board.pills().iter().copied().map(PillView::from).collect(),
            pool: self.pool,
            countdown: self.clock.countdown(),
            winner: self.winner,
            paused: self.paused,
            elapsed_ms: self.clock.elapsed_ms(),
            tutorial: self.tutorial.as_ref().map(TutorialState::view),
        }
    }
}
