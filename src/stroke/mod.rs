//! Stroke values: capture events and per-stroke records.
//!
//! A `Stroke` is the transient result of one simulation run, from striker
//! release to all bodies at rest. It holds the capture events in temporal
//! order and is handed to the rules resolver by value, so the resolver
//! never observes intermediate simulation state. A `StrokeRecord` is the
//! durable summary the resolver appends to the match history.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::PocketId;
use crate::body::{BodyId, BodyKind, BodyOwner};
use crate::core::PlayerId;

/// One body falling into one pocket.
///
/// Events within the same step share a step index and are ordered by
/// ascending body id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    pub body: BodyId,
    pub kind: BodyKind,
    pub owner: BodyOwner,
    pub pocket: PocketId,
    pub step: u32,
}

/// The outcome of one simulation run. Consumed exactly once by the
/// rules resolver, then discarded.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Stroke {
    /// Captures in temporal order.
    pub events: SmallVec<[CaptureEvent; 4]>,
    /// Steps simulated before every body came to rest.
    pub steps: u32,
}

impl Stroke {
    /// A stroke with no captures.
    #[must_use]
    pub fn empty(steps: u32) -> Self {
        Self {
            events: SmallVec::new(),
            steps,
        }
    }

    /// Whether any event captured the given kind.
    #[must_use]
    pub fn captured_kind(&self, kind: BodyKind) -> bool {
        self.events.iter().any(|e| e.kind == kind)
    }
}

/// A rules violation within a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoulKind {
    /// The striker fell into a pocket.
    StrikerPocketed,
    /// A coin of the opposing color fell into a pocket.
    OpponentCoinPocketed,
}

/// Durable summary of a resolved stroke, kept in the match history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord {
    /// Stroke number, counted from 1 across the match.
    pub stroke_number: u64,
    /// Who struck.
    pub player: PlayerId,
    /// Points awarded to the striker's player (0 on any foul).
    pub points: i64,
    /// Fouls committed, at most one of each kind.
    pub fouls: SmallVec<[FoulKind; 2]>,
    /// Captures observed, in temporal order.
    pub captures: SmallVec<[CaptureEvent; 4]>,
    /// Whether the queen was captured and covered this stroke.
    pub queen_covered: bool,
    /// Whether the same player strikes again.
    pub retained_turn: bool,
}

impl StrokeRecord {
    /// Whether the stroke was foul-free.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fouls.is_empty()
    }
}
