//! The turn and scoring rules.
//!
//! A stroke's capture events are applied as a single atomic batch by the
//! [`resolver`]: fouls, scoring, queen covering, the consecutive-foul
//! counter, turn advancement, and the win condition, all deterministic
//! given the event list. Scores and counters are never touched while the
//! physics is still running.

pub mod resolver;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

pub use resolver::{resolve, StrokeOutcome};

/// Result of a completed match.
///
/// Pocketing out first only ends the match; the cumulative score decides
/// who wins, so the player who cleared their color can still lose.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner on score.
    Winner(PlayerId),
    /// A shared top score between some, but not all, players.
    Winners(Vec<PlayerId>),
    /// Every player tied.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}
