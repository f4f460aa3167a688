//! Player identification and per-seat standings.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Carrom matches seat 2 or 4 players around
//! the board; turn order follows the index.
//!
//! ## Scoreboard
//!
//! The standings for every seat: assigned coin color, score, and the
//! consecutive-foul streak. The stroke resolver is the only writer.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::body::CoinColor;

/// Player identifier.
///
/// Seats are 0-based and fixed for the whole match: 0 at the bottom,
/// 1 at the top, and in four-player matches 2 and 3 on the left and
/// right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next player in turn order, wrapping around the table.
    ///
    /// ```
    /// use carrom_core::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
    /// assert_eq!(PlayerId::new(1).next(4), PlayerId::new(2));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self((self.0 + 1) % player_count as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One seat's standing: assigned color, score, and the consecutive-foul
/// streak counter.
///
/// The counter resets to 0 on any stroke without a foul and when the
/// third foul in a row forfeits the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// The coin color this player pockets for points.
    pub color: CoinColor,
    /// Cumulative score.
    pub score: i64,
    /// Consecutive foul strokes, 0-3.
    pub consecutive_fouls: u8,
}

/// The standings for every seat at the table, indexable by `PlayerId`.
///
/// Seating fixes the colors at match start: even seats pocket White,
/// odd seats Black, so opposing colors always face each other across
/// the board.
///
/// ## Example
///
/// ```
/// use carrom_core::core::{PlayerId, Scoreboard};
///
/// let mut standings = Scoreboard::new(2);
/// standings[PlayerId::new(0)].score += 1;
/// assert_eq!(standings.scores(), vec![1, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    seats: Vec<PlayerStatus>,
}

impl Scoreboard {
    /// Fresh standings for a match: zero scores, no foul streaks, and
    /// colors alternating around the table.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(
            matches!(player_count, 2 | 4),
            "carrom seats 2 or 4 players"
        );

        let seats = (0..player_count)
            .map(|seat| PlayerStatus {
                color: if seat % 2 == 0 {
                    CoinColor::White
                } else {
                    CoinColor::Black
                },
                score: 0,
                consecutive_fouls: 0,
            })
            .collect();

        Self { seats }
    }

    /// Rebuild standings from persisted statuses, e.g. when restoring a
    /// snapshot. The caller has already validated them.
    #[must_use]
    pub fn from_statuses(seats: Vec<PlayerStatus>) -> Self {
        Self { seats }
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Iterate over the standings in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerStatus)> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, s)| (PlayerId(i as u8), s))
    }

    /// Scores in seat order.
    #[must_use]
    pub fn scores(&self) -> Vec<i64> {
        self.seats.iter().map(|s| s.score).collect()
    }

    /// Consecutive-foul counters in seat order.
    #[must_use]
    pub fn foul_counts(&self) -> Vec<u8> {
        self.seats.iter().map(|s| s.consecutive_fouls).collect()
    }

    /// The seats sharing the current top score. Decides the match once
    /// either color is cleared from the board.
    #[must_use]
    pub fn leaders(&self) -> Vec<PlayerId> {
        let top = self.seats.iter().map(|s| s.score).max().unwrap_or(0);
        self.iter()
            .filter(|(_, s)| s.score == top)
            .map(|(p, _)| p)
            .collect()
    }
}

impl Index<PlayerId> for Scoreboard {
    type Output = PlayerStatus;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.seats[player.index()]
    }
}

impl IndexMut<PlayerId> for Scoreboard {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.seats[player.index()]
    }
}
