//! Pocket capture detection.
//!
//! Runs once per simulation step, after collision resolution and before
//! the next friction pass. Capture is final within a stroke: a body whose
//! center reaches the capture zone is deactivated on the spot and never
//! bounces back out.

use glam::Vec2;
use smallvec::SmallVec;

use crate::board::Board;
use crate::body::Body;
use crate::core::MatchConfig;
use crate::stroke::CaptureEvent;

/// Deactivate every body that has fallen into a pocket this step and
/// append a capture event for each.
///
/// A body is captured when the distance from its center to a pocket
/// center is at most `pocket_radius - body_radius * capture_leniency`
/// (inclusive, so a body exactly on the boundary counts). Bodies are
/// visited in id order, so simultaneous captures land in the event list
/// with the same step index, ordered by ascending id.
pub fn detect_captures(
    board: &Board,
    config: &MatchConfig,
    bodies: &mut [Body],
    step: u32,
    events: &mut SmallVec<[CaptureEvent; 4]>,
) {
    for body in bodies.iter_mut().filter(|b| b.active) {
        let (pocket, dist) = board.distance_to_nearest_pocket(body.position);
        let threshold = board.pocket_radius() - body.radius * config.capture_leniency;
        if dist <= threshold {
            body.active = false;
            body.velocity = Vec2::ZERO;
            events.push(CaptureEvent {
                body: body.id,
                kind: body.kind,
                owner: body.owner,
                pocket,
                step,
            });
        }
    }
}
