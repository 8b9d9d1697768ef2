//! Utility-based target selection for bot agents.
//!
//! Every tick, each free bot scores a fixed set of candidates and walks
//! toward the best one:
//!
//! | Candidate       | Eligible when                               | Utility                                      |
//! |-----------------|---------------------------------------------|----------------------------------------------|
//! | Fetch           | pool > 0                                    | `2400 / (d + 5)`                             |
//! | Raid rival home | rival score > 0, rival unshielded           | `(1800 [+1500 near win] [+800 leader]) / (d + 8)` |
//! | SPEED pill      | bot has no SPEED                            | `600 * (0.3 if carrying) / (d + 15)`         |
//! | PROTECT pill    | bot has no PROTECT, bot score > 0           | `score * 250 * (2 if leader) / (d + 20)`     |
//!
//! Candidates are evaluated in the order pool, rival homes (roster order),
//! pills (board order). A later candidate replaces the current best only
//! when strictly better, so ties keep the earlier one. Nothing above the
//! floor of `-1` means the bot heads home. A bot already carrying skips
//! scoring and heads home unconditionally.

use blitz_types::{Agent, AgentId, AgentKind, PillId, Position, PowerKind, PowerPill};
use serde::{Deserialize, Serialize};

use crate::roster;

/// Utility every real candidate must beat.
pub const FLOOR_UTILITY: f64 = -1.0;

/// Scoring weights for the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotWeights {
    /// Numerator for fetching from the pool.
    pub fetch_weight: f64,
    /// Distance offset for fetching.
    pub fetch_offset: f64,
    /// Base numerator for raiding a rival home.
    pub raid_base: f64,
    /// Added when the rival is one bottle from winning.
    pub raid_near_win_bonus: f64,
    /// Added when the rival is the leader.
    pub raid_leader_bonus: f64,
    /// Added when the rival is the leader and human-controlled.
    pub raid_human_leader_bonus: f64,
    /// Distance offset for raiding.
    pub raid_offset: f64,
    /// Numerator for a SPEED pill.
    pub speed_pill_weight: f64,
    /// Factor applied to the SPEED numerator while carrying.
    pub speed_pill_carrying_factor: f64,
    /// Distance offset for a SPEED pill.
    pub speed_pill_offset: f64,
    /// Per-point numerator for a PROTECT pill.
    pub protect_per_point: f64,
    /// Factor applied to the PROTECT numerator when the bot leads.
    pub protect_leader_factor: f64,
    /// Distance offset for a PROTECT pill.
    pub protect_offset: f64,
}

impl Default for BotWeights {
    fn default() -> Self {
        Self {
            fetch_weight: 2400.0,
            fetch_offset: 5.0,
            raid_base: 1800.0,
            raid_near_win_bonus: 1500.0,
            raid_leader_bonus: 800.0,
            raid_human_leader_bonus: 0.0,
            raid_offset: 8.0,
            speed_pill_weight: 600.0,
            speed_pill_carrying_factor: 0.3,
            speed_pill_offset: 15.0,
            protect_per_point: 250.0,
            protect_leader_factor: 2.0,
            protect_offset: 20.0,
        }
    }
}

/// Read-only world facts a bot decides on.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    /// Full roster.
    pub agents: &'a [Agent],
    /// Bottles left in the center.
    pub pool: u32,
    /// Live pills.
    pub pills: &'a [PowerPill],
    /// Center of the pool zone.
    pub center: Position,
    /// Score that wins the current run.
    pub win_score: u32,
}

/// What a bot is heading for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Grab a bottle from the center.
    Fetch,
    /// Steal from a rival's home.
    Raid(AgentId),
    /// Pick up a pill.
    Pill(PillId),
    /// Go home (carrying, or nothing better to do).
    ReturnHome,
}

/// A scored candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// The chosen objective.
    pub objective: Objective,
    /// Where to walk.
    pub target: Position,
    /// Its utility score.
    pub utility: f64,
}

/// Score every eligible candidate for `bot`, in evaluation order.
pub fn score_candidates(bot: &Agent, ctx: &DecisionContext<'_>, weights: &BotWeights) -> Vec<Decision> {
    let mut candidates = Vec::new();
    let leader = roster::leader(ctx.agents);

    if ctx.pool > 0 {
        let d = bot.position.distance_to(ctx.center);
        candidates.push(Decision {
            objective: Objective::Fetch,
            target: ctx.center,
            utility: weights.fetch_weight / (d + weights.fetch_offset),
        });
    }

    for rival in ctx.agents.iter().filter(|a| a.id != bot.id) {
        if rival.score == 0 || rival.is_shielded() {
            continue;
        }
        let mut value = weights.raid_base;
        if rival.score.saturating_add(1) >= ctx.win_score {
            value += weights.raid_near_win_bonus;
        }
        if leader == Some(rival.id) {
            value += weights.raid_leader_bonus;
            if rival.kind == AgentKind::Human {
                value += weights.raid_human_leader_bonus;
            }
        }
        let d = bot.position.distance_to(rival.home());
        candidates.push(Decision {
            objective: Objective::Raid(rival.id),
            target: rival.home(),
            utility: value / (d + weights.raid_offset),
        });
    }

    for pill in ctx.pills {
        let d = bot.position.distance_to(pill.position);
        let utility = match pill.kind {
            PowerKind::Speed if !bot.has_power(PowerKind::Speed) => {
                let factor = if bot.carrying {
                    weights.speed_pill_carrying_factor
                } else {
                    1.0
                };
                weights.speed_pill_weight * factor / (d + weights.speed_pill_offset)
            }
            PowerKind::Protect if !bot.is_shielded() && bot.score > 0 => {
                let factor = if leader == Some(bot.id) {
                    weights.protect_leader_factor
                } else {
                    1.0
                };
                f64::from(bot.score) * weights.protect_per_point * factor
                    / (d + weights.protect_offset)
            }
            PowerKind::Speed | PowerKind::Protect => continue,
        };
        candidates.push(Decision {
            objective: Objective::Pill(pill.id),
            target: pill.position,
            utility,
        });
    }

    candidates
}

/// Pick the target for `bot` this tick.
pub fn choose_target(bot: &Agent, ctx: &DecisionContext<'_>, weights: &BotWeights) -> Decision {
    let home = Decision {
        objective: Objective::ReturnHome,
        target: bot.home(),
        utility: FLOOR_UTILITY,
    };
    if bot.carrying {
        return home;
    }
    score_candidates(bot, ctx, weights)
        .into_iter()
        .fold(home, |best, c| if c.utility > best.utility { c } else { best })
}
