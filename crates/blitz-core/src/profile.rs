//! Player profile and fastest-wins leaderboard.
//!
//! The simulation only reports outcomes through [`ProfileSink`]; storage is
//! up to the host. [`ProfileBook`] is the in-memory implementation the
//! engine uses, serializable so a host can persist it however it likes.

use blitz_types::{AgentKind, GameOver, LeaderboardEntry, PlayerProfile};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Number of leaderboard rows kept.
pub const LEADERBOARD_SIZE: usize = 5;

/// Receives run outcomes worth persisting.
pub trait ProfileSink {
    /// A run was started under `name`.
    fn register_player(&mut self, _name: &str) {}

    /// A normal match finished.
    fn record_game_over(&mut self, result: &GameOver);

    /// The player left a tutorial after finishing it.
    fn record_tutorial_complete(&mut self);
}

/// In-memory profile plus leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBook {
    /// The player's record.
    pub profile: PlayerProfile,
    /// Fastest human wins, ascending by time.
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Default for ProfileBook {
    fn default() -> Self {
        Self::new("Player One")
    }
}

impl ProfileBook {
    /// A fresh profile for `name`.
    pub fn new(name: &str) -> Self {
        Self {
            profile: PlayerProfile {
                name: name.to_owned(),
                games_played: 0,
                games_won: 0,
                best_time: None,
                tutorial_complete: false,
            },
            leaderboard: Vec::new(),
        }
    }

    /// Record a finished match as of `date`.
    ///
    /// Every match counts as played. A human win also counts as won, may
    /// improve the best time, and enters the leaderboard, which keeps the
    /// [`LEADERBOARD_SIZE`] fastest entries.
    pub fn apply_game_over(&mut self, result: &GameOver, date: NaiveDate) {
        let profile = &mut self.profile;
        profile.games_played = profile.games_played.saturating_add(1);
        if result.winner_kind != AgentKind::Human {
            return;
        }

        profile.games_won = profile.games_won.saturating_add(1);
        profile.best_time = Some(
            profile
                .best_time
                .map_or(result.elapsed_ms, |best| best.min(result.elapsed_ms)),
        );
        self.leaderboard.push(LeaderboardEntry {
            name: result.player_name.clone(),
            time: result.elapsed_ms,
            date: date.format("%Y-%m-%d").to_string(),
        });
        self.leaderboard.sort_by_key(|entry| entry.time);
        self.leaderboard.truncate(LEADERBOARD_SIZE);
        info!(
            player = %result.player_name,
            time_ms = result.elapsed_ms,
            best_ms = ?self.profile.best_time,
            "Win recorded"
        );
    }
}

impl ProfileSink for ProfileBook {
    fn register_player(&mut self, name: &str) {
        name.clone_into(&mut self.profile.name);
    }

    fn record_game_over(&mut self, result: &GameOver) {
        self.apply_game_over(result, Utc::now().date_naive());
    }

    fn record_tutorial_complete(&mut self) {
        self.profile.tutorial_complete = true;
        info!(player = %self.profile.name, "Tutorial completed");
    }
}
