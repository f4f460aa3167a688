//! The match engine: stroke control and the external interface.
//!
//! `MatchEngine` wraps a [`MatchState`] and walks it through the gesture
//! state machine: place the striker, fix an aim, fix a power, release.
//! Release runs the physics synchronously to completion and resolves the
//! stroke atomically, so callers never observe a half-applied stroke.
//!
//! Rendering is a pure observer: [`RenderState`] is a read-only
//! projection, available between strokes from
//! [`render_state`](MatchEngine::render_state) and per simulation step
//! through [`release_stroke_observed`](MatchEngine::release_stroke_observed).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::body::{BodyId, BodyKind, BodyOwner, BodySet};
use crate::core::state::{MatchState, TurnPhase};
use crate::core::{GameError, MatchConfig, PlayerId};
use crate::physics::Integrator;
use crate::rules::{self, StrokeOutcome};
use crate::snapshot::MatchSnapshot;

/// One body as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderBody {
    pub id: BodyId,
    pub kind: BodyKind,
    pub owner: BodyOwner,
    pub position: Vec2,
    pub radius: f32,
}

/// Read-only projection of the match for drawing. Never feeds back into
/// the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Active bodies only, in id order.
    pub bodies: Vec<RenderBody>,
    pub board: Board,
    pub scores: Vec<i64>,
    pub foul_counts: Vec<u8>,
    pub active_player: PlayerId,
    pub queen_pending_cover: bool,
    pub phase: TurnPhase,
}

impl RenderState {
    fn project(
        bodies: &BodySet,
        board: &Board,
        scores: Vec<i64>,
        foul_counts: Vec<u8>,
        active_player: PlayerId,
        queen_pending_cover: bool,
        phase: TurnPhase,
    ) -> Self {
        Self {
            bodies: bodies
                .iter_active()
                .map(|b| RenderBody {
                    id: b.id,
                    kind: b.kind,
                    owner: b.owner,
                    position: b.position,
                    radius: b.radius,
                })
                .collect(),
            board: board.clone(),
            scores,
            foul_counts,
            active_player,
            queen_pending_cover,
            phase,
        }
    }
}

/// Drives one match from the first stroke to the result.
///
/// ## Example
///
/// ```
/// use carrom_core::core::MatchConfig;
/// use carrom_core::engine::MatchEngine;
/// use glam::Vec2;
///
/// let mut engine = MatchEngine::new(MatchConfig::new(2)).unwrap();
/// engine.place_striker(Vec2::new(300.0, 550.0)).unwrap();
/// engine.set_aim(Vec2::new(0.0, -1.0)).unwrap();
/// engine.set_power(0.6).unwrap();
/// let outcome = engine.release_stroke().unwrap();
/// assert_eq!(outcome.record.stroke_number, 1);
/// ```
pub struct MatchEngine {
    state: MatchState,
    aim: Option<Vec2>,
    power: Option<f32>,
}

impl MatchEngine {
    /// Start a new match. Fails on an out-of-range configuration.
    pub fn new(config: MatchConfig) -> Result<Self, GameError> {
        Ok(Self {
            state: MatchState::new(config)?,
            aim: None,
            power: None,
        })
    }

    /// The committed match state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Place the striker for the active player.
    ///
    /// The position must sit on the player's baseline band, keep the
    /// striker fully inside the board, and not overlap any active body.
    pub fn place_striker(&mut self, position: Vec2) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::AwaitingStrikerPlacement, "AwaitingStrikerPlacement")?;

        let player = self.state.active_player;
        let board = self.state.board();
        let radius = BodyKind::Striker.radius();
        let valid = position.is_finite()
            && board.is_on_baseline(position, self.state.config().player_count, player)
            && board.is_within_bounds(position, radius)
            && self
                .state
                .bodies
                .iter_active()
                .all(|b| b.position.distance(position) >= b.radius + radius);
        if !valid {
            return Err(GameError::InvalidPlacement { position, player });
        }

        self.state.bodies.spawn_striker(position);
        self.state.phase = TurnPhase::AwaitingAim;
        self.aim = None;
        self.power = None;
        log::debug!("{} placed the striker at {:?}", player, position);
        Ok(())
    }

    /// Fix the aim direction. Normalized internally; must be finite and
    /// nonzero.
    pub fn set_aim(&mut self, direction: Vec2) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::AwaitingAim, "AwaitingAim")?;

        let length = direction.length();
        if !direction.is_finite() || length == 0.0 {
            return Err(GameError::InvalidConfiguration {
                field: "aim_direction",
                value: f64::from(length),
            });
        }

        self.aim = Some(direction / length);
        self.state.phase = TurnPhase::AwaitingPower;
        Ok(())
    }

    /// Fix the stroke power. Must be finite and positive; values above
    /// 1 are clamped to full power. May be called again before release.
    pub fn set_power(&mut self, power: f32) -> Result<(), GameError> {
        self.expect_phase(TurnPhase::AwaitingPower, "AwaitingPower")?;

        if !power.is_finite() || power <= 0.0 {
            return Err(GameError::InvalidConfiguration {
                field: "power",
                value: f64::from(power),
            });
        }

        self.power = Some(power.min(1.0));
        Ok(())
    }

    /// Release the striker and run the stroke to completion.
    ///
    /// Simulates on a scratch copy of the bodies and commits only when
    /// the integrator finishes cleanly, then resolves the stroke's rules
    /// atomically. On a physics abort the committed state is unchanged
    /// and the gesture stays at `AwaitingPower`.
    pub fn release_stroke(&mut self) -> Result<StrokeOutcome, GameError> {
        self.release_with(|_| {})
    }

    /// Like [`release_stroke`](Self::release_stroke), invoking the
    /// observer with a render projection after every simulation step.
    pub fn release_stroke_observed(
        &mut self,
        mut observer: impl FnMut(&RenderState),
    ) -> Result<StrokeOutcome, GameError> {
        let color = self.state.color_of(self.state.active_player);
        let own_at_start = self.state.bodies.active_coins(color);
        let queen_up_at_start = self.state.bodies.queen().active;
        let board = self.state.board().clone();
        let scores = self.state.scores();
        let foul_counts = self.state.players.foul_counts();
        let active_player = self.state.active_player;

        self.release_with(move |bodies| {
            // The queen has gone down this stroke and no covering own
            // coin has followed yet
            let pending = queen_up_at_start
                && !bodies.queen().active
                && bodies.active_coins(color) == own_at_start;
            observer(&RenderState::project(
                bodies,
                &board,
                scores.clone(),
                foul_counts.clone(),
                active_player,
                pending,
                TurnPhase::Simulating,
            ));
        })
    }

    fn release_with(
        &mut self,
        observer: impl FnMut(&BodySet),
    ) -> Result<StrokeOutcome, GameError> {
        self.expect_phase(TurnPhase::AwaitingPower, "AwaitingPower")?;
        let (Some(direction), Some(power)) = (self.aim, self.power) else {
            return Err(GameError::IllegalTransition {
                expected: "power before release",
                found: self.state.phase,
            });
        };

        self.state.phase = TurnPhase::Simulating;
        let mut scratch = self.state.bodies.clone();
        scratch.striker_mut().velocity =
            direction * power * self.state.config().max_striker_speed;

        let result = {
            let integrator = Integrator::new(self.state.board(), self.state.config());
            integrator.run_observed(&mut scratch, observer)
        };
        match result {
            Ok(stroke) => {
                self.state.bodies = scratch;
                self.aim = None;
                self.power = None;
                Ok(rules::resolve(&mut self.state, stroke))
            }
            Err(err) => {
                // Nothing committed; the gesture may be retried or abandoned
                self.state.phase = TurnPhase::AwaitingPower;
                Err(err)
            }
        }
    }

    /// The current render projection.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState::project(
            &self.state.bodies,
            self.state.board(),
            self.state.scores(),
            self.state.players.foul_counts(),
            self.state.active_player,
            self.state.queen_pending_cover,
            self.state.phase,
        )
    }

    /// Snapshot the committed match state. Refused while simulating.
    pub fn serialize_state(&self) -> Result<MatchSnapshot, GameError> {
        if self.state.phase == TurnPhase::Simulating {
            return Err(GameError::IllegalTransition {
                expected: "a stroke boundary",
                found: self.state.phase,
            });
        }
        Ok(MatchSnapshot::capture(&self.state))
    }

    /// Replace the match with a restored snapshot. A snapshot that fails
    /// validation is rejected and the current match is untouched.
    pub fn restore_state(&mut self, snapshot: MatchSnapshot) -> Result<(), GameError> {
        let state = snapshot.into_state()?;
        self.state = state;
        self.aim = None;
        self.power = None;
        log::debug!("restored match at stroke {}", self.state.stroke_counter);
        Ok(())
    }

    fn expect_phase(&self, phase: TurnPhase, expected: &'static str) -> Result<(), GameError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(GameError::IllegalTransition {
                expected,
                found: self.state.phase,
            })
        }
    }
}
