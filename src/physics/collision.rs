//! Disc-disc collision detection and elastic resolution.
//!
//! Contacts are gathered per step, ordered deepest-first with an
//! ascending-id tie-break, and resolved one pair at a time. Resolution
//! applies the standard unequal-mass elastic impulse along the line of
//! centers and separates the overlap so bodies never stick.

use glam::Vec2;
use smallvec::SmallVec;

use crate::body::Body;

/// An overlapping pair, by index into the body slice. Indices equal
/// body ids because set order is id order; `a < b` always.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
    pub depth: f32,
}

/// Collect every overlapping pair of active bodies.
///
/// A pair is in contact when the center distance is strictly less than
/// the sum of radii.
pub fn find_contacts(bodies: &[Body], out: &mut SmallVec<[Contact; 8]>) {
    out.clear();
    for i in 0..bodies.len() {
        if !bodies[i].active {
            continue;
        }
        for j in i + 1..bodies.len() {
            if !bodies[j].active {
                continue;
            }
            let dist = bodies[i].position.distance(bodies[j].position);
            let depth = bodies[i].radius + bodies[j].radius - dist;
            if depth > 0.0 {
                out.push(Contact { a: i, b: j, depth });
            }
        }
    }
}

/// Order contacts for resolution: deepest first, ties broken by the
/// lower first id, then the second. Fully deterministic.
pub fn order_contacts(contacts: &mut SmallVec<[Contact; 8]>) {
    contacts.sort_by(|x, y| {
        y.depth
            .total_cmp(&x.depth)
            .then(x.a.cmp(&y.a))
            .then(x.b.cmp(&y.b))
    });
}

/// Resolve one contact: separate the overlap evenly along the line of
/// centers, then exchange momentum with a perfectly elastic impulse.
///
/// Conserves momentum and kinetic energy for any mass pair. Bodies
/// already separating receive no impulse, only the positional fix.
pub fn resolve_contact(a: &mut Body, b: &mut Body) {
    let delta = b.position - a.position;
    let dist = delta.length();
    // Coincident centers get a fixed axis so resolution stays deterministic
    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::X
    };

    let overlap = (a.radius + b.radius - dist).max(0.0);
    let shift = normal * (overlap * 0.5);
    a.position -= shift;
    b.position += shift;

    let approach = (a.velocity - b.velocity).dot(normal);
    if approach <= 0.0 {
        return;
    }

    let impulse = 2.0 * approach * a.mass * b.mass / (a.mass + b.mass);
    a.velocity -= normal * (impulse / a.mass);
    b.velocity += normal * (impulse / b.mass);
}
