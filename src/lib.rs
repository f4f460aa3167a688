//! # carrom-core
//!
//! A physics and rules engine for carrom, the strike-and-pocket board
//! game, for two or four players.
//!
//! ## Design Principles
//!
//! 1. **Strokes Are Atomic**: the physics runs one stroke to full rest
//!    before the rules see anything; capture events are applied as one
//!    batch, never incrementally.
//!
//! 2. **Deterministic Throughout**: fixed-step integration, stable
//!    collision ordering, and id-ordered tie-breaks make every stroke
//!    reproducible from the same state and inputs.
//!
//! 3. **Rendering Observes, Never Mutates**: drawing consumes read-only
//!    [`RenderState`](engine::RenderState) projections; nothing flows
//!    back into the simulation.
//!
//! ## Architecture
//!
//! The stroke controller gives the striker a velocity, the integrator
//! runs the body set to rest and collects capture events, and the rules
//! resolver turns the event batch into scores, fouls, the next player,
//! and possibly the match result. Persistence snapshots the committed
//! state at stroke boundaries only.
//!
//! ## Modules
//!
//! - `core`: players, configuration, match state, errors
//! - `board`: playing-field geometry, pockets, baselines
//! - `body`: coins, the queen, the striker; the body population
//! - `physics`: friction, collisions, pocket capture, the integrator
//! - `stroke`: capture events and per-stroke records
//! - `rules`: the scoring and turn state machine
//! - `engine`: the external interface for one match
//! - `snapshot`: the persistence contract

pub mod board;
pub mod body;
pub mod core;
pub mod engine;
pub mod physics;
pub mod rules;
pub mod snapshot;
pub mod stroke;

// Re-export commonly used types
pub use crate::core::{
    GameError, MatchConfig, MatchState, PlayerId, PlayerStatus, Scoreboard, TurnPhase,
};

pub use crate::board::{Baseline, Board, PocketId, Side};

pub use crate::body::{Body, BodyId, BodyKind, BodyOwner, BodySet, CoinColor};

pub use crate::physics::{Integrator, MAX_STROKE_STEPS};

pub use crate::stroke::{CaptureEvent, FoulKind, Stroke, StrokeRecord};

pub use crate::rules::{GameResult, StrokeOutcome};

pub use crate::engine::{MatchEngine, RenderBody, RenderState};

pub use crate::snapshot::{BodySnapshot, MatchSnapshot, SNAPSHOT_VERSION};
