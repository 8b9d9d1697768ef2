//! Run control: starting, pausing, ending, and restarting runs.
//!
//! A [`Session`] owns at most one [`World`] at a time plus the
//! [`ProfileSink`] that outcomes are reported to. Returning to the menu
//! discards the world.

use std::time::Duration;

use blitz_agents::AgentError;
use blitz_types::{Position, RunMode, TrialStep, Vector, WorldSnapshot};
use tracing::info;

use crate::config::GameConfig;
use crate::profile::ProfileSink;
use crate::state::World;
use crate::tick::{self, TickError, TickSummary};

/// Errors from run control.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The operation needs a run in progress.
    #[error("no run in progress")]
    NoActiveRun,

    /// Restart was requested before the run had a winner.
    #[error("run has not finished")]
    RunNotFinished,

    /// A tick failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },

    /// Building the world failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// Menu-level state: configuration, profile sink, and the current run.
#[derive(Debug)]
pub struct Session<S> {
    config: GameConfig,
    sink: S,
    world: Option<World>,
    /// Runs started so far; mixed into each run's seed.
    runs: u64,
}

impl<S: ProfileSink> Session<S> {
    /// A session sitting at the menu.
    pub const fn new(config: GameConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            world: None,
            runs: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = self.config.world.seed.wrapping_add(self.runs);
        self.runs = self.runs.wrapping_add(1);
        seed
    }

    /// Start a normal match, replacing any current run.
    pub fn start_match(&mut self, player_name: &str) -> &World {
        self.sink.register_player(player_name);
        let seed = self.next_seed();
        self.world
            .insert(World::new_match(player_name, &self.config, seed))
    }

    /// Start the tutorial, replacing any current run.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Agent`] if the roster cannot be staged.
    pub fn start_tutorial(&mut self, player_name: &str) -> Result<&World, SessionError> {
        self.sink.register_player(player_name);
        let seed = self.next_seed();
        let world = World::new_tutorial(player_name, &self.config, seed)?;
        Ok(self.world.insert(world))
    }

    /// Session configuration.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current run, if any.
    pub const fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// The current run, mutably. Hosts use this for direct setup.
    pub const fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// The profile sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the session and hand back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn active(&mut self) -> Result<&mut World, SessionError> {
        self.world.as_mut().ok_or(SessionError::NoActiveRun)
    }

    /// Pause the current run.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveRun`] at the menu.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.active()?.set_paused(true);
        Ok(())
    }

    /// Resume the current run.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveRun`] at the menu.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.active()?.set_paused(false);
        Ok(())
    }

    /// Forward a pointer target. `Ok(false)` means input is locked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveRun`] at the menu.
    pub fn set_target(&mut self, target: Position) -> Result<bool, SessionError> {
        Ok(self.active()?.set_human_target(target))
    }

    /// Forward a steering vector. `Ok(false)` means input is locked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveRun`] at the menu.
    pub fn set_steering(&mut self, steering: Vector) -> Result<bool, SessionError> {
        Ok(self.active()?.set_human_steering(steering))
    }

    /// Run one frame and report a finished match to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveRun`] at the menu, or
    /// [`SessionError::Tick`] if the frame fails.
    pub fn tick(&mut self, delta: Duration) -> Result<TickSummary, SessionError> {
        let world = self.world.as_mut().ok_or(SessionError::NoActiveRun)?;
        let summary = tick::run_tick(world, delta)?;
        if let Some(result) = &summary.game_over {
            self.sink.record_game_over(result);
        }
        Ok(summary)
    }

    /// Leave the current run. A tutorial left at COMPLETE is recorded as
    /// finished. Returns the final snapshot, or `None` if already at the
    /// menu.
    pub fn return_to_menu(&mut self) -> Option<WorldSnapshot> {
        let world = self.world.take()?;
        let finished_tutorial = world
            .tutorial
            .as_ref()
            .is_some_and(|t| t.step() == TrialStep::Complete);
        if finished_tutorial {
            self.sink.record_tutorial_complete();
        }
        info!(mode = ?world.mode, tick = world.clock.tick(), "Returned to menu");
        Some(world.snapshot())
    }

    /// Start a fresh run of the same kind for the same player after a win.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveRun`] at the menu and
    /// [`SessionError::RunNotFinished`] if nobody has won yet.
    pub fn restart_after_win(&mut self) -> Result<&World, SessionError> {
        let world = self.world.as_ref().ok_or(SessionError::NoActiveRun)?;
        if world.winner.is_none() {
            return Err(SessionError::RunNotFinished);
        }
        let (mode, name) = (world.mode, world.player_name.clone());
        info!(?mode, player = %name, "Restarting");
        match mode {
            RunMode::Match => Ok(self.start_match(&name)),
            RunMode::Tutorial => self.start_tutorial(&name),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blitz_agents::roster::{HUMAN_ID, SIGMA_ID, find_mut};

    use super::*;
    use crate::profile::ProfileBook;

    const FRAME: Duration = Duration::from_millis(16);

    fn session() -> Session<ProfileBook> {
        let mut config = GameConfig::default();
        config.world.countdown_seconds = 0;
        Session::new(config, ProfileBook::default())
    }

    #[test]
    fn menu_operations_need_a_run() {
        let mut s = session();
        assert!(matches!(s.tick(FRAME), Err(SessionError::NoActiveRun)));
        assert!(matches!(s.pause(), Err(SessionError::NoActiveRun)));
        assert!(s.return_to_menu().is_none());
    }

    #[test]
    fn starting_registers_player_and_varies_seed() {
        let mut s = session();
        s.start_match("Ada");
        assert_eq!(s.sink().profile.name, "Ada");
        s.tick(FRAME).unwrap();
        let first = s.world().unwrap().board.pills().to_vec();
        s.start_match("Ada");
        s.tick(FRAME).unwrap();
        let second = s.world().unwrap().board.pills().to_vec();
        assert_ne!(first, second);
    }

    #[test]
    fn pause_and_resume_toggle_world() {
        let mut s = session();
        s.start_match("Ada");
        s.pause().unwrap();
        assert!(s.world().unwrap().paused);
        s.resume().unwrap();
        assert!(!s.world().unwrap().paused);
    }

    #[test]
    fn game_over_reaches_the_sink() {
        let mut s = session();
        s.start_match("Ada");
        {
            let world = s.world.as_mut().unwrap();
            let human = find_mut(&mut world.agents, HUMAN_ID).unwrap();
            human.score = 2;
            human.carrying = true;
        }
        s.tick(FRAME).unwrap();
        s.tick(FRAME).unwrap();
        let profile = &s.sink().profile;
        assert_eq!(profile.games_played, 1);
        assert_eq!(profile.games_won, 1);
        assert_eq!(profile.best_time, Some(16));
        assert_eq!(s.sink().leaderboard.len(), 1);
    }

    #[test]
    fn restart_requires_a_winner() {
        let mut s = session();
        s.start_match("Ada");
        assert!(matches!(s.restart_after_win(), Err(SessionError::RunNotFinished)));
        {
            let world = s.world.as_mut().unwrap();
            let sigma = find_mut(&mut world.agents, SIGMA_ID).unwrap();
            sigma.score = 2;
            sigma.carrying = true;
        }
        s.tick(FRAME).unwrap();
        let world = s.restart_after_win().unwrap();
        assert_eq!(world.winner, None);
        assert_eq!(world.mode, RunMode::Match);
        assert_eq!(world.player_name, "Ada");
    }

    #[test]
    fn leaving_unfinished_tutorial_does_not_mark_complete() {
        let mut s = session();
        s.start_tutorial("Ada").unwrap();
        let snapshot = s.return_to_menu().unwrap();
        assert_eq!(snapshot.mode, RunMode::Tutorial);
        assert!(!s.sink().profile.tutorial_complete);
        assert!(s.world().is_none());
    }
}
