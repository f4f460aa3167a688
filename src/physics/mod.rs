//! The physics core: friction, collisions, and pocket capture.
//!
//! One stroke is one synchronous run of the [`Integrator`]: the striker
//! is given a velocity, the set advances in fixed steps until everything
//! is at rest, and the captures observed along the way come back as a
//! [`Stroke`](crate::stroke::Stroke) for the rules to consume.

pub mod collision;
pub mod integrator;
pub mod pocket;

pub use collision::{find_contacts, order_contacts, resolve_contact, Contact};
pub use integrator::{Integrator, MAX_STROKE_STEPS};
pub use pocket::detect_captures;
