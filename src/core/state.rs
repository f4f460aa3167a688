//! Match state: the aggregate the rules state machine owns.
//!
//! ## TurnPhase
//!
//! The gesture state machine for one stroke:
//! `AwaitingStrikerPlacement -> AwaitingAim -> AwaitingPower ->
//! Simulating -> AwaitingStrikerPlacement | GameOver`. Stroke resolution
//! happens inside the `Simulating -> ...` edge, atomically.
//!
//! ## MatchState
//!
//! Board, bodies, players, turn bookkeeping, and the stroke history.
//! Mutated only at stroke boundaries, never mid-simulation. Uses an `im`
//! persistent vector for the history so cloning a match state is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::error::GameError;
use super::player::{PlayerId, Scoreboard};
use crate::board::Board;
use crate::body::{BodySet, CoinColor};
use crate::rules::GameResult;
use crate::stroke::StrokeRecord;

/// Where the active player is in the stroke gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the striker to be placed on the baseline.
    AwaitingStrikerPlacement,
    /// Striker placed; waiting for an aim direction.
    AwaitingAim,
    /// Aim fixed; waiting for a power value and release.
    AwaitingPower,
    /// Physics running. No interface call is legal until rest.
    Simulating,
    /// Match over; no further strokes.
    GameOver,
}

/// The full state of one match.
///
/// Owns every body and player. The board and configuration are fixed at
/// creation; everything else is mutated by the stroke resolver at stroke
/// boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchState {
    config: MatchConfig,
    board: Board,

    /// Every body in the match; pocketed bodies stay in the set inactive.
    pub bodies: BodySet,

    /// Per-seat standings.
    pub players: Scoreboard,

    /// Whose stroke it is.
    pub active_player: PlayerId,

    /// Gesture phase.
    pub phase: TurnPhase,

    /// True exactly while a pocketed queen awaits a covering coin. Raised
    /// and settled inside a single stroke resolution, so it is false at
    /// every stroke boundary.
    pub queen_pending_cover: bool,

    /// Strokes resolved so far.
    pub stroke_counter: u64,

    /// Resolved-stroke records, oldest first.
    pub history: Vector<StrokeRecord>,

    /// Set when the match ends.
    pub result: Option<GameResult>,
}

impl MatchState {
    /// Start a match on the standard board with the standard layout.
    ///
    /// Colors alternate around the table: even seats play White, odd
    /// seats play Black. Fails if the configuration is out of range.
    pub fn new(config: MatchConfig) -> Result<Self, GameError> {
        config.validate()?;

        let board = Board::standard();
        let bodies = BodySet::initial(&board);
        let players = Scoreboard::new(config.player_count);

        Ok(Self {
            config,
            board,
            bodies,
            players,
            active_player: PlayerId::new(0),
            phase: TurnPhase::AwaitingStrikerPlacement,
            queen_pending_cover: false,
            stroke_counter: 0,
            history: Vector::new(),
            result: None,
        })
    }

    /// Reassemble a state from its parts, e.g. when restoring a
    /// snapshot. The caller has already validated them.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        config: MatchConfig,
        board: Board,
        bodies: BodySet,
        players: Scoreboard,
        active_player: PlayerId,
        phase: TurnPhase,
        stroke_counter: u64,
        history: Vector<StrokeRecord>,
        result: Option<GameResult>,
    ) -> Self {
        Self {
            config,
            board,
            bodies,
            players,
            active_player,
            phase,
            queen_pending_cover: false,
            stroke_counter,
            history,
            result,
        }
    }

    /// The match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The board geometry.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The color the given player pockets for points.
    #[must_use]
    pub fn color_of(&self, player: PlayerId) -> CoinColor {
        self.players[player].color
    }

    /// Scores in seat order.
    #[must_use]
    pub fn scores(&self) -> Vec<i64> {
        self.players.scores()
    }
}
