//! The scripted tutorial: a fixed lesson sequence layered on the normal
//! simulation.
//!
//! The script watches the human's live state and moves through
//! [`TrialStep`] one transition per tick. Two steps stage a pill at a fixed
//! spot. The last lesson arms a scripted thief (Bot Alpha) that runs at the
//! shielded player's home, gets repelled, and a fixed number of ticks after
//! the first bounce the lesson completes.
//!
//! While the thief is not armed, every bot stands still. While it is armed,
//! the other bot plays normally.

use blitz_types::{Agent, Position, PowerKind, TrialStep, TutorialView};
use blitz_world::geometry;
use blitz_world::{PillBoard, PillConfig};
use rand::Rng;
use tracing::{debug, info};

use crate::config::TutorialConfig;

/// World facts the script reads on each tick.
#[derive(Debug, Clone, Copy)]
pub struct ScriptInputs<'a> {
    /// Current simulated tick.
    pub tick: u64,
    /// The human player, as of the start of this tick.
    pub human: &'a Agent,
    /// Home of the scripted thief (the home to snatch from).
    pub thief_home: Position,
    /// Center of the bottle pool.
    pub center: Position,
}

/// Progress through the tutorial.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorialState {
    step: TrialStep,
    waypoint: Option<Position>,
    thief_armed: bool,
    /// Tick on which SHIELD_DEMO turns into COMPLETE, once scheduled.
    completion_due: Option<u64>,
}

impl TutorialState {
    /// Start at the first lesson, pointing at the first waypoint.
    pub const fn new(config: &TutorialConfig) -> Self {
        Self {
            step: TrialStep::Move,
            waypoint: Some(config.waypoint),
            thief_armed: false,
            completion_due: None,
        }
    }

    /// Current lesson.
    pub const fn step(&self) -> TrialStep {
        self.step
    }

    /// Where the indicator points, if anywhere.
    pub const fn waypoint(&self) -> Option<Position> {
        self.waypoint
    }

    /// Whether the scripted thief is running.
    pub const fn thief_armed(&self) -> bool {
        self.thief_armed
    }

    /// Tick on which the final demo completes, once scheduled.
    pub const fn completion_due(&self) -> Option<u64> {
        self.completion_due
    }

    /// Presentation view.
    pub const fn view(&self) -> TutorialView {
        TutorialView {
            step: self.step,
            waypoint: self.waypoint,
            thief_armed: self.thief_armed,
        }
    }

    /// Evaluate at most one transition and refresh the waypoint.
    ///
    /// Returns the new step when a transition fired.
    pub fn advance<R: Rng>(
        &mut self,
        inputs: &ScriptInputs<'_>,
        config: &TutorialConfig,
        board: &mut PillBoard,
        pills: &PillConfig,
        rng: &mut R,
    ) -> Option<TrialStep> {
        let human = inputs.human;
        let current = self.step;
        let next = match current {
            TrialStep::Move => human
                .position
                .is_within(config.waypoint, config.waypoint_radius)
                .then_some(TrialStep::Collect),
            TrialStep::Collect => human.carrying.then_some(TrialStep::Deposit),
            TrialStep::Deposit => (human.score >= 1).then(|| {
                board.stage(PowerKind::Speed, config.speed_pill_at, pills, rng);
                TrialStep::SpeedPill
            }),
            TrialStep::SpeedPill => human
                .has_power(PowerKind::Speed)
                .then_some(TrialStep::CollectFast),
            TrialStep::CollectFast => human.carrying.then_some(TrialStep::DepositFast),
            TrialStep::DepositFast => (human.score >= 2).then_some(TrialStep::SnatchTrial),
            TrialStep::SnatchTrial => human.carrying.then_some(TrialStep::DepositSnatch),
            TrialStep::DepositSnatch => (human.score >= 3).then(|| {
                board.stage(PowerKind::Protect, config.protect_pill_at, pills, rng);
                TrialStep::ShieldPill
            }),
            TrialStep::ShieldPill => human.is_shielded().then(|| {
                self.thief_armed = true;
                TrialStep::ShieldDemo
            }),
            TrialStep::ShieldDemo => self
                .completion_due
                .is_some_and(|due| inputs.tick >= due)
                .then(|| {
                    self.thief_armed = false;
                    self.completion_due = None;
                    TrialStep::Complete
                }),
            TrialStep::Complete => None,
        };

        if let Some(step) = next {
            info!(from = ?current, to = ?step, tick = inputs.tick, "Tutorial step");
            self.step = step;
        }
        self.waypoint = self.waypoint_for(inputs, config, board);
        next
    }

    fn waypoint_for(
        &self,
        inputs: &ScriptInputs<'_>,
        config: &TutorialConfig,
        board: &PillBoard,
    ) -> Option<Position> {
        let staged = |fallback: Position| {
            board
                .pills()
                .first()
                .map_or(fallback, |pill| pill.position)
        };
        match self.step {
            TrialStep::Move => Some(config.waypoint),
            TrialStep::Collect | TrialStep::CollectFast => Some(inputs.center),
            TrialStep::Deposit
            | TrialStep::DepositFast
            | TrialStep::DepositSnatch
            | TrialStep::ShieldDemo => Some(inputs.human.home()),
            TrialStep::SnatchTrial => Some(inputs.thief_home),
            TrialStep::SpeedPill => Some(staged(config.speed_pill_at)),
            TrialStep::ShieldPill => Some(staged(config.protect_pill_at)),
            TrialStep::Complete => None,
        }
    }

    /// Move the armed thief for one tick.
    ///
    /// Far from the target home it seeks at the approach speed. Once inside
    /// the zone radius plus margin it is thrown outward along the
    /// home-to-thief direction at the retreat speed. The first bounce during
    /// the final demo schedules completion. Returns whether it bounced.
    pub fn drive_thief(
        &mut self,
        thief: &mut Agent,
        target_home: Position,
        tick: u64,
        zone_radius: f64,
        base_speed: f64,
        config: &TutorialConfig,
    ) -> bool {
        if !thief.position.is_within(target_home, zone_radius + config.bounce_margin) {
            thief.target = target_home;
            thief.position = geometry::move_toward(
                thief.position,
                target_home,
                base_speed * config.thief_speed_factor,
            );
            return false;
        }

        let away = geometry::direction_from(target_home, thief.position);
        let out = target_home
            .offset(away, zone_radius + config.bounce_distance)
            .clamped();
        thief.target = out;
        thief.position =
            geometry::move_toward(thief.position, out, base_speed * config.bounce_speed_factor);
        debug!(tick, x = thief.position.x, y = thief.position.y, "Thief repelled");

        if self.step == TrialStep::ShieldDemo && self.completion_due.is_none() {
            let due = tick.saturating_add(config.completion_delay_ticks);
            self.completion_due = Some(due);
            info!(tick, due, "Tutorial completion scheduled");
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blitz_types::{ActivePower, AgentId, AgentKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const CENTER: Position = Position::new(50.0, 50.0);
    const HOME: Position = Position::new(50.0, 88.0);
    const THIEF_HOME: Position = Position::new(17.0, 31.0);

    fn human() -> Agent {
        Agent::new(AgentId(1), "T".to_owned(), "#3b82f6".to_owned(), AgentKind::Human, HOME)
    }

    fn thief() -> Agent {
        Agent::new(AgentId(2), "Bot Alpha".to_owned(), "#ef4444".to_owned(), AgentKind::Bot, THIEF_HOME)
    }

    struct Harness {
        state: TutorialState,
        config: TutorialConfig,
        board: PillBoard,
        pills: PillConfig,
        rng: StdRng,
    }

    impl Harness {
        fn new() -> Self {
            let config = TutorialConfig::default();
            Self {
                state: TutorialState::new(&config),
                config,
                board: PillBoard::new(),
                pills: PillConfig::default(),
                rng: StdRng::seed_from_u64(3),
            }
        }

        fn step(&mut self, tick: u64, human: &Agent) -> Option<TrialStep> {
            let inputs = ScriptInputs {
                tick,
                human,
                thief_home: THIEF_HOME,
                center: CENTER,
            };
            self.state
                .advance(&inputs, &self.config, &mut self.board, &self.pills, &mut self.rng)
        }
    }

    #[test]
    fn starts_at_move_with_fixed_waypoint() {
        let h = Harness::new();
        assert_eq!(h.state.step(), TrialStep::Move);
        assert_eq!(h.state.waypoint(), Some(Position::new(30.0, 65.0)));
        assert!(!h.state.thief_armed());
    }

    #[test]
    fn move_needs_strictly_inside_waypoint_radius() {
        let mut h = Harness::new();
        let mut p = human();
        p.position = Position::new(35.0, 65.0);
        assert_eq!(h.step(1, &p), None);
        p.position = Position::new(34.9, 65.0);
        assert_eq!(h.step(2, &p), Some(TrialStep::Collect));
        assert_eq!(h.state.waypoint(), Some(CENTER));
    }

    #[test]
    fn deposit_stages_speed_pill() {
        let mut h = Harness::new();
        h.state.step = TrialStep::Deposit;
        let mut p = human();
        p.score = 1;
        assert_eq!(h.step(1, &p), Some(TrialStep::SpeedPill));
        assert_eq!(h.board.pills().len(), 1);
        let pill = h.board.pills().first().unwrap();
        assert_eq!(pill.kind, PowerKind::Speed);
        assert_eq!(pill.position, Position::new(80.0, 75.0));
        assert_eq!(h.state.waypoint(), Some(Position::new(80.0, 75.0)));
    }

    #[test]
    fn one_transition_per_tick() {
        let mut h = Harness::new();
        let mut p = human();
        // Satisfies MOVE and COLLECT at once; only MOVE fires this tick.
        p.position = Position::new(30.0, 65.0);
        p.carrying = true;
        assert_eq!(h.step(1, &p), Some(TrialStep::Collect));
        assert_eq!(h.step(2, &p), Some(TrialStep::Deposit));
        assert_eq!(h.state.waypoint(), Some(HOME));
    }

    #[test]
    fn snatch_points_at_thief_home() {
        let mut h = Harness::new();
        h.state.step = TrialStep::DepositFast;
        let mut p = human();
        p.score = 2;
        assert_eq!(h.step(1, &p), Some(TrialStep::SnatchTrial));
        assert_eq!(h.state.waypoint(), Some(THIEF_HOME));
    }

    #[test]
    fn shield_pickup_arms_thief() {
        let mut h = Harness::new();
        h.state.step = TrialStep::DepositSnatch;
        let mut p = human();
        p.score = 3;
        assert_eq!(h.step(1, &p), Some(TrialStep::ShieldPill));
        assert_eq!(h.board.pills().first().unwrap().kind, PowerKind::Protect);
        assert_eq!(h.step(2, &p), None);
        p.powers.push(ActivePower {
            kind: PowerKind::Protect,
            remaining_ticks: 360,
        });
        assert_eq!(h.step(3, &p), Some(TrialStep::ShieldDemo));
        assert!(h.state.thief_armed());
        assert_eq!(h.state.waypoint(), Some(HOME));
    }

    #[test]
    fn thief_seeks_then_bounces() {
        let mut h = Harness::new();
        h.state.step = TrialStep::ShieldDemo;
        h.state.thief_armed = true;
        let mut t = thief();
        let config = TutorialConfig::default();

        let start = t.position.distance_to(HOME);
        assert!(!h.state.drive_thief(&mut t, HOME, 1, 10.0, 0.25, &config));
        let after = t.position.distance_to(HOME);
        assert!((start - after - 0.625).abs() < 1e-9);
        assert_eq!(t.target, HOME);

        t.position = Position::new(50.0, 76.0);
        assert!(h.state.drive_thief(&mut t, HOME, 5, 10.0, 0.25, &config));
        // Thrown straight up, away from the home.
        assert!((t.position.y - 74.5).abs() < 1e-9);
        assert_eq!(t.target, Position::new(50.0, 53.0));
        assert_eq!(h.state.completion_due(), Some(65));

        // Later bounces do not reschedule.
        t.position = Position::new(50.0, 76.0);
        h.state.drive_thief(&mut t, HOME, 9, 10.0, 0.25, &config);
        assert_eq!(h.state.completion_due(), Some(65));
    }

    #[test]
    fn degenerate_bounce_uses_fallback_axis() {
        let mut h = Harness::new();
        let mut t = thief();
        t.position = HOME;
        h.state.drive_thief(&mut t, HOME, 1, 10.0, 0.25, &TutorialConfig::default());
        // Fallback axis points down; the target is clamped into the arena.
        assert_eq!(t.target, Position::new(50.0, 100.0));
    }

    #[test]
    fn completion_fires_on_due_tick() {
        let mut h = Harness::new();
        h.state.step = TrialStep::ShieldDemo;
        h.state.thief_armed = true;
        h.state.completion_due = Some(65);
        let p = human();
        assert_eq!(h.step(64, &p), None);
        assert_eq!(h.step(65, &p), Some(TrialStep::Complete));
        assert!(!h.state.thief_armed());
        assert_eq!(h.state.waypoint(), None);
        assert_eq!(h.step(66, &p), None);
    }
}
