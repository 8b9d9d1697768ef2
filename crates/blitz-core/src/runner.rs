//! Async run loop with shared controls.
//!
//! [`run_session`] drives the current run of a [`Session`] frame by frame
//! until it is won, the tutorial completes, the frame limit is hit, or a
//! stop is requested. With `world.realtime` set, frames are paced by a
//! `tokio` interval at `world.tick_rate_hz` and each frame receives the
//! wall time measured since the previous frame, so a stalled frame still
//! counts toward game time. Otherwise the loop fast-forwards, yielding
//! between frames, and each frame receives the nominal frame delta.

use std::sync::Arc;

use blitz_types::{AgentId, TrialStep};
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::controls::{MatchControls, RunEndReason};
use crate::profile::ProfileSink;
use crate::session::{Session, SessionError};
use crate::state::World;
use crate::tick::TickSummary;

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Run control or a tick failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: SessionError,
    },
}

/// Result of a run.
#[derive(Debug)]
pub struct RunResult {
    /// Why the run ended.
    pub end_reason: RunEndReason,
    /// The winner, if the run was won.
    pub winner: Option<AgentId>,
    /// The last frame's summary, if any frame ran.
    pub final_summary: Option<TickSummary>,
    /// Frames executed.
    pub total_frames: u64,
}

/// Callback invoked after each frame.
pub trait TickCallback: Send {
    /// Called after a frame completes.
    fn on_tick(&mut self, summary: &TickSummary, world: &World);
}

/// A callback that ignores every frame.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _world: &World) {}
}

/// Drive the session's current run until it ends.
///
/// # Errors
///
/// Returns [`RunnerError`] if there is no run in progress or a frame fails.
pub async fn run_session<S: ProfileSink>(
    session: &mut Session<S>,
    controls: &Arc<MatchControls>,
    callback: &mut dyn TickCallback,
) -> Result<RunResult, RunnerError> {
    let settings = session.config().world.clone();
    let delta = settings.frame_delta();
    let mut ticker = (settings.realtime && !delta.is_zero()).then(|| {
        let mut ticker = interval(delta);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });
    let mut last_summary: Option<TickSummary> = None;
    let mut total_frames: u64 = 0;
    let mut last_frame = Instant::now();

    info!(
        max_ticks = controls.max_ticks(),
        tick_rate_hz = settings.tick_rate_hz,
        realtime = settings.realtime,
        "Run starting"
    );

    loop {
        // --- Pause ---
        if controls.is_paused() {
            session.pause()?;
            info!("Run paused, waiting for resume...");
            controls.wait_if_paused().await;
            session.resume()?;
            info!("Run resumed");
            if let Some(ticker) = ticker.as_mut() {
                ticker.reset();
            }
            last_frame = Instant::now();
        }

        // --- Stop ---
        if controls.is_stop_requested() {
            info!("Stop requested");
            controls.set_end_reason(RunEndReason::Stopped).await;
            return Ok(RunResult {
                end_reason: RunEndReason::Stopped,
                winner: session.world().and_then(|w| w.winner),
                final_summary: last_summary,
                total_frames,
            });
        }

        // --- Frame ---
        let frame_delta = if ticker.is_some() {
            let now = Instant::now();
            let measured = now.saturating_duration_since(last_frame);
            last_frame = now;
            measured
        } else {
            delta
        };
        let summary = session.tick(frame_delta)?;
        total_frames = total_frames.saturating_add(1);
        let world = session.world().ok_or(SessionError::NoActiveRun)?;
        callback.on_tick(&summary, world);

        let end_reason = if world.winner.is_some() {
            Some(RunEndReason::Won)
        } else if summary.tutorial_step == Some(TrialStep::Complete) {
            Some(RunEndReason::TutorialComplete)
        } else if controls.tick_limit_reached(total_frames) {
            info!(frames = total_frames, max_ticks = controls.max_ticks(), "Frame limit reached");
            Some(RunEndReason::MaxTicksReached)
        } else {
            None
        };
        if let Some(end_reason) = end_reason {
            let winner = world.winner;
            controls.set_end_reason(end_reason).await;
            return Ok(RunResult {
                end_reason,
                winner,
                final_summary: Some(summary),
                total_frames,
            });
        }
        last_summary = Some(summary);

        // --- Pace ---
        match ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => tokio::task::yield_now().await,
        }
    }
}

/// Log how a run ended.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        winner = ?result.winner,
        total_frames = result.total_frames,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        elapsed_ms = result.final_summary.as_ref().map(|s| s.elapsed_ms),
        "Run ended"
    );
    if result.final_summary.is_none() {
        warn!("Run ended with no frames executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use blitz_agents::roster::{SIGMA_ID, find_mut};

    use super::*;
    use crate::config::GameConfig;
    use crate::profile::ProfileBook;

    fn fast_session() -> Session<ProfileBook> {
        let mut config = GameConfig::default();
        config.world.realtime = false;
        Session::new(config, ProfileBook::default())
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let mut session = fast_session();
        session.start_match("Ada");
        let controls = Arc::new(MatchControls::new(5));
        let result = run_session(&mut session, &controls, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::MaxTicksReached);
        assert_eq!(result.total_frames, 5);
        assert_eq!(controls.end_reason().await, Some(RunEndReason::MaxTicksReached));
    }

    #[tokio::test]
    async fn stop_before_first_frame() {
        let mut session = fast_session();
        session.start_match("Ada");
        let controls = Arc::new(MatchControls::new(0));
        controls.request_stop();
        let result = run_session(&mut session, &controls, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::Stopped);
        assert_eq!(result.total_frames, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn no_run_is_an_error() {
        let mut session = fast_session();
        let controls = Arc::new(MatchControls::new(3));
        let err = run_session(&mut session, &controls, &mut NoOpCallback).await;
        assert!(matches!(
            err,
            Err(RunnerError::Session {
                source: SessionError::NoActiveRun
            })
        ));
    }

    #[tokio::test]
    async fn win_ends_the_run() {
        let mut session = fast_session();
        session.start_match("Ada");
        let controls = Arc::new(MatchControls::new(10_000));
        // Skip ahead to a live world with Sigma one deposit from winning.
        for _ in 0..4 {
            session.tick(Duration::from_secs(1)).unwrap();
        }
        {
            let world = session.world_mut().unwrap();
            let sigma = find_mut(&mut world.agents, SIGMA_ID).unwrap();
            sigma.score = 2;
            sigma.carrying = true;
        }
        let result = run_session(&mut session, &controls, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, RunEndReason::Won);
        assert_eq!(result.winner, Some(SIGMA_ID));
        assert_eq!(result.total_frames, 1);
        assert!(result.final_summary.unwrap().game_over.is_some());
        assert_eq!(session.sink().profile.games_played, 1);
    }

    #[tokio::test]
    async fn tick_callback_is_called() {
        struct CountCallback {
            count: u64,
        }
        impl TickCallback for CountCallback {
            fn on_tick(&mut self, _summary: &TickSummary, _world: &World) {
                self.count = self.count.saturating_add(1);
            }
        }

        let mut session = fast_session();
        session.start_match("Ada");
        let controls = Arc::new(MatchControls::new(3));
        let mut cb = CountCallback { count: 0 };
        run_session(&mut session, &controls, &mut cb).await.unwrap();
        assert_eq!(cb.count, 3);
    }

    #[tokio::test]
    async fn realtime_pacing_runs_frames() {
        let mut config = GameConfig::default();
        config.world.tick_rate_hz = 1000;
        let mut session = Session::new(config, ProfileBook::default());
        session.start_match("Ada");
        let controls = Arc::new(MatchControls::new(3));
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            run_session(&mut session, &controls, &mut NoOpCallback),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(result.total_frames, 3);
    }

    #[tokio::test]
    async fn realtime_game_time_follows_wall_clock() {
        struct SlowCallback;
        impl TickCallback for SlowCallback {
            fn on_tick(&mut self, _summary: &TickSummary, _world: &World) {
                std::thread::sleep(Duration::from_millis(50));
            }
        }

        let mut config = GameConfig::default();
        config.world.countdown_seconds = 0;
        let mut session = Session::new(config, ProfileBook::default());
        session.start_match("Ada");
        let controls = Arc::new(MatchControls::new(10));
        let started = Instant::now();
        let result = run_session(&mut session, &controls, &mut SlowCallback)
            .await
            .unwrap();
        let wall_ms = u64::try_from(started.elapsed().as_millis()).unwrap();

        assert_eq!(result.total_frames, 10);
        let game_ms = result.final_summary.unwrap().elapsed_ms;
        // Nine stalled gaps of 50 ms precede the last frame.
        assert!(game_ms >= 450, "game time {game_ms} ms");
        assert!(game_ms <= wall_ms);
    }
}
