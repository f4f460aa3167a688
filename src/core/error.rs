//! Error types for the engine's external interface.
//!
//! Four kinds cover every failure mode:
//! - `InvalidPlacement`: striker placed outside the legal baseline region
//!   (recoverable - re-prompt the player)
//! - `InvalidConfiguration`: out-of-range physics constant or a non-finite
//!   numeric input (fatal at setup; aborts a stroke before commit)
//! - `CorruptSnapshot`: malformed persisted state (recoverable - reject the
//!   load and keep the current state)
//! - `IllegalTransition`: an interface call made in the wrong phase
//!   (recoverable - surfaced to the caller)

use glam::Vec2;
use std::fmt;

use super::state::TurnPhase;
use super::PlayerId;

/// Engine error. Rules resolution itself is total and never fails;
/// these arise only at the external interface and at setup.
#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// Striker placement outside the active player's baseline.
    InvalidPlacement { position: Vec2, player: PlayerId },

    /// A physics constant or numeric input is out of range or non-finite.
    InvalidConfiguration { field: &'static str, value: f64 },

    /// A persisted snapshot failed validation or decoding.
    CorruptSnapshot { reason: String },

    /// An interface call made in the wrong phase.
    IllegalTransition { expected: &'static str, found: TurnPhase },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlacement { position, player } => write!(
                f,
                "invalid striker placement at ({}, {}) for {}",
                position.x, position.y, player
            ),
            Self::InvalidConfiguration { field, value } => {
                write!(f, "invalid configuration: {} = {}", field, value)
            }
            Self::CorruptSnapshot { reason } => {
                write!(f, "corrupt snapshot: {}", reason)
            }
            Self::IllegalTransition { expected, found } => {
                write!(f, "illegal transition: expected {}, found {:?}", expected, found)
            }
        }
    }
}

impl std::error::Error for GameError {}
