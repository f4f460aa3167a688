//! Match state persistence.
//!
//! `MatchSnapshot` is the serializable value handed to the persistence
//! collaborator at stroke boundaries. Snapshots are only ever taken
//! between strokes, so bodies are at rest and velocities are not stored;
//! radii and masses are reconstructed from each body's kind. Restoring
//! validates everything before any state is replaced, so a corrupt
//! snapshot is rejected and the current match is untouched.
//!
//! A snapshot taken mid-gesture (striker placed, aim or power staged)
//! rolls back to `AwaitingStrikerPlacement`: the staged gesture is not
//! part of the committed match state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::body::{Body, BodyId, BodyKind, BodyOwner, BodySet, CoinColor, COINS_PER_COLOR};
use crate::core::state::{MatchState, TurnPhase};
use crate::core::{GameError, MatchConfig, PlayerId, PlayerStatus, Scoreboard};
use crate::rules::GameResult;
use crate::stroke::StrokeRecord;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One body, as persisted. Bodies are at rest at stroke boundaries, so
/// only position and the active flag vary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub kind: BodyKind,
    pub owner: BodyOwner,
    pub position: Vec2,
    pub active: bool,
}

/// The full persisted match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub version: u32,
    pub config: MatchConfig,
    pub players: Vec<PlayerStatus>,
    pub active_player: PlayerId,
    pub phase: TurnPhase,
    pub queen_pending_cover: bool,
    pub stroke_counter: u64,
    pub bodies: Vec<BodySnapshot>,
    pub history: Vec<StrokeRecord>,
    pub result: Option<GameResult>,
}

impl MatchSnapshot {
    /// Capture a state. A mid-gesture phase is rolled back to
    /// `AwaitingStrikerPlacement` with the striker parked.
    #[must_use]
    pub fn capture(state: &MatchState) -> Self {
        let mid_gesture = matches!(
            state.phase,
            TurnPhase::AwaitingAim | TurnPhase::AwaitingPower
        );
        let phase = if mid_gesture {
            TurnPhase::AwaitingStrikerPlacement
        } else {
            state.phase
        };

        let bodies = state
            .bodies
            .bodies()
            .iter()
            .map(|b| BodySnapshot {
                id: b.id,
                kind: b.kind,
                owner: b.owner,
                position: b.position,
                active: if mid_gesture && b.kind == BodyKind::Striker {
                    false
                } else {
                    b.active
                },
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            config: *state.config(),
            players: state.players.iter().map(|(_, s)| *s).collect(),
            active_player: state.active_player,
            phase,
            queen_pending_cover: state.queen_pending_cover,
            stroke_counter: state.stroke_counter,
            bodies,
            history: state.history.iter().cloned().collect(),
            result: state.result.clone(),
        }
    }

    /// Encode to the binary wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        bincode::serialize(self).map_err(|e| GameError::CorruptSnapshot {
            reason: format!("encode failed: {}", e),
        })
    }

    /// Decode from the binary wire form. Decoding alone does not accept
    /// the snapshot; [`validate`](Self::validate) runs on restore.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        bincode::deserialize(bytes).map_err(|e| GameError::CorruptSnapshot {
            reason: format!("decode failed: {}", e),
        })
    }

    /// Check every integrity invariant without building a state.
    pub fn validate(&self) -> Result<(), GameError> {
        let corrupt = |reason: &str| GameError::CorruptSnapshot {
            reason: reason.to_string(),
        };

        if self.version != SNAPSHOT_VERSION {
            return Err(corrupt("unsupported version"));
        }
        self.config
            .validate()
            .map_err(|_| corrupt("configuration out of range"))?;
        if self.players.len() != self.config.player_count {
            return Err(corrupt("player list does not match configuration"));
        }
        if self.active_player.index() >= self.config.player_count {
            return Err(corrupt("active player out of range"));
        }
        if !matches!(
            self.phase,
            TurnPhase::AwaitingStrikerPlacement | TurnPhase::GameOver
        ) {
            return Err(corrupt("phase is not a stroke boundary"));
        }
        if self.queen_pending_cover {
            return Err(corrupt("queen pending cover outside a stroke"));
        }
        if (self.phase == TurnPhase::GameOver) != self.result.is_some() {
            return Err(corrupt("result does not match phase"));
        }
        for status in &self.players {
            if status.score < 0 || status.consecutive_fouls > 3 {
                return Err(corrupt("player standing out of range"));
            }
        }

        let board = Board::standard();
        let mut coins_per_color = [0usize; 2];
        for body in &self.bodies {
            if !body.position.is_finite() {
                return Err(corrupt("non-finite body position"));
            }
            // A resting body can overhang the edge inside a pocket mouth,
            // where wall response is suppressed
            if body.active
                && !board.is_within_bounds(body.position, body.kind.radius())
                && !board.in_pocket_mouth(body.position)
            {
                return Err(corrupt("active body outside the board"));
            }
            match (body.kind, body.owner) {
                (BodyKind::Coin, BodyOwner::Color(CoinColor::White)) => coins_per_color[0] += 1,
                (BodyKind::Coin, BodyOwner::Color(CoinColor::Black)) => coins_per_color[1] += 1,
                (BodyKind::Coin, BodyOwner::Neutral) => {
                    return Err(corrupt("coin without a color"))
                }
                (_, BodyOwner::Color(_)) => return Err(corrupt("owned neutral piece")),
                _ => {}
            }
        }
        if coins_per_color != [COINS_PER_COLOR, COINS_PER_COLOR] {
            return Err(corrupt("coin census does not match a match"));
        }

        Ok(())
    }

    /// Validate and build a match state from the snapshot.
    pub fn into_state(self) -> Result<MatchState, GameError> {
        self.validate()?;

        let bodies: Vec<Body> = self
            .bodies
            .iter()
            .map(|s| {
                let mut body = Body::new(s.id, s.kind, s.owner, s.position);
                body.active = s.active;
                body
            })
            .collect();
        let bodies = BodySet::from_bodies(bodies).ok_or_else(|| GameError::CorruptSnapshot {
            reason: "body set is not well-formed".to_string(),
        })?;

        let players = Scoreboard::from_statuses(self.players);

        Ok(MatchState::from_parts(
            self.config,
            Board::standard(),
            bodies,
            players,
            self.active_player,
            self.phase,
            self.stroke_counter,
            self.history.into_iter().collect(),
            self.result,
        ))
    }
}
