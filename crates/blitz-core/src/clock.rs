//! Match clock: frame and tick counters, game time, and the pre-match
//! countdown.
//!
//! Two counters are kept. Frames count every call into the tick cycle,
//! frozen or not. Ticks count only frames on which the simulation actually
//! advanced; pill lifetimes, power timers and tutorial scheduling are all
//! expressed in ticks.
//!
//! Game time accumulates the real delta of simulated ticks only, so time
//! spent counting down, paused, or looking at the win screen never counts
//! toward a best time.

use std::time::Duration;

/// Real time between countdown steps.
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClockError {
    /// A counter would overflow.
    #[error("{counter} counter overflow: cannot advance beyond u64::MAX")]
    Overflow {
        /// Which counter overflowed.
        counter: &'static str,
    },
}

/// What a countdown step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Still waiting for the next full second.
    Holding(u32),
    /// Dropped to a new value (0 is shown as "GO").
    Stepped(u32),
    /// Finished; the match is live from the next frame.
    Finished,
}

/// Clock state for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClock {
    /// Calls into the tick cycle, including frozen ones.
    frame: u64,
    /// Simulated ticks.
    tick: u64,
    /// Accumulated game time.
    elapsed: Duration,
    /// Remaining countdown, if still counting.
    countdown: Option<u32>,
    /// Real time since the last countdown step.
    countdown_acc: Duration,
}

impl MatchClock {
    /// Create a clock. A zero `countdown_seconds` starts the run live.
    pub const fn new(countdown_seconds: u32) -> Self {
        Self {
            frame: 0,
            tick: 0,
            elapsed: Duration::ZERO,
            countdown: if countdown_seconds == 0 {
                None
            } else {
                Some(countdown_seconds)
            },
            countdown_acc: Duration::ZERO,
        }
    }

    /// Advance the frame counter. Returns the new frame number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Overflow`] if the counter would wrap.
    pub fn advance_frame(&mut self) -> Result<u64, ClockError> {
        self.frame = self
            .frame
            .checked_add(1)
            .ok_or(ClockError::Overflow { counter: "frame" })?;
        Ok(self.frame)
    }

    /// Advance the tick counter. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Overflow`] if the counter would wrap.
    pub fn advance_tick(&mut self) -> Result<u64, ClockError> {
        self.tick = self
            .tick
            .checked_add(1)
            .ok_or(ClockError::Overflow { counter: "tick" })?;
        Ok(self.tick)
    }

    /// Feed real time into the countdown.
    ///
    /// Each time the accumulated delta reaches [`COUNTDOWN_STEP`] the value
    /// drops by one and the accumulator restarts from zero. One more step
    /// after 0 clears the countdown.
    pub fn count_down(&mut self, delta: Duration) -> CountdownStep {
        let Some(current) = self.countdown else {
            return CountdownStep::Finished;
        };
        self.countdown_acc = self.countdown_acc.saturating_add(delta);
        if self.countdown_acc < COUNTDOWN_STEP {
            return CountdownStep::Holding(current);
        }
        self.countdown_acc = Duration::ZERO;
        if let Some(next) = current.checked_sub(1) {
            self.countdown = Some(next);
            CountdownStep::Stepped(next)
        } else {
            self.countdown = None;
            CountdownStep::Finished
        }
    }

    /// Add the real delta of a simulated tick to game time.
    pub fn accumulate(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Current frame number.
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Remaining countdown, if any.
    pub const fn countdown(&self) -> Option<u32> {
        self.countdown
    }

    /// Accumulated game time.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Accumulated game time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
