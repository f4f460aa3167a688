//! The fixed-step physics integrator.
//!
//! Advances the whole body set one step at a time until every active
//! body is at rest, then hands back the stroke's capture events in
//! temporal order. Each step applies, in order: friction decay with a
//! rest clamp, position update, wall response, disc-disc collision
//! resolution, and pocket detection.
//!
//! The integrator owns the body set for the duration of a run; nothing
//! else reads positions mid-stroke except a read-only observer callback,
//! which cannot feed back into the simulation.

use glam::Vec2;
use smallvec::SmallVec;

use super::collision::{find_contacts, order_contacts, resolve_contact, Contact};
use super::pocket::detect_captures;
use crate::board::Board;
use crate::body::{Body, BodySet};
use crate::core::{GameError, MatchConfig};
use crate::stroke::{CaptureEvent, Stroke};

/// Hard cap on steps per stroke. Any valid configuration settles orders
/// of magnitude sooner; hitting the cap means the configuration cannot
/// terminate and the stroke is aborted.
pub const MAX_STROKE_STEPS: u32 = 20_000;

/// Fixed-step simulation of one stroke over a body set.
pub struct Integrator<'a> {
    board: &'a Board,
    config: &'a MatchConfig,
}

impl<'a> Integrator<'a> {
    #[must_use]
    pub fn new(board: &'a Board, config: &'a MatchConfig) -> Self {
        Self { board, config }
    }

    /// Run until every active body is at rest.
    ///
    /// Returns the stroke's capture events and step count. Fails with
    /// `InvalidConfiguration` if a position or velocity turns non-finite
    /// or the step cap is hit; the caller discards the body set in that
    /// case rather than committing it.
    pub fn run(&self, bodies: &mut BodySet) -> Result<Stroke, GameError> {
        self.run_observed(bodies, |_| {})
    }

    /// Like [`run`](Self::run), invoking `observer` with the body set
    /// after every step, for live rendering.
    pub fn run_observed(
        &self,
        bodies: &mut BodySet,
        mut observer: impl FnMut(&BodySet),
    ) -> Result<Stroke, GameError> {
        let mut events = SmallVec::new();
        let mut contacts: SmallVec<[Contact; 8]> = SmallVec::new();
        let mut steps = 0u32;

        loop {
            if steps >= MAX_STROKE_STEPS {
                return Err(GameError::InvalidConfiguration {
                    field: "stroke_step_limit",
                    value: f64::from(MAX_STROKE_STEPS),
                });
            }

            let moving = self.step(bodies.bodies_mut(), steps, &mut events, &mut contacts)?;
            steps += 1;
            observer(bodies);

            if !moving {
                break;
            }
        }

        log::debug!(
            "stroke settled after {} steps with {} captures",
            steps,
            events.len()
        );
        Ok(Stroke { events, steps })
    }

    /// Advance one step. Returns whether any active body is still moving
    /// afterwards; a `false` return is the one full step at rest that
    /// ends the stroke.
    fn step(
        &self,
        bodies: &mut [Body],
        step_index: u32,
        events: &mut SmallVec<[CaptureEvent; 4]>,
        contacts: &mut SmallVec<[Contact; 8]>,
    ) -> Result<bool, GameError> {
        let friction = self.config.friction_coefficient;
        let rest = self.config.rest_speed_epsilon;

        for body in bodies.iter_mut().filter(|b| b.active) {
            body.velocity *= friction;
            if body.velocity.length() < rest {
                body.velocity = Vec2::ZERO;
            }
            body.position += body.velocity;
        }

        for body in bodies.iter_mut().filter(|b| b.active) {
            self.wall_response(body);
        }

        find_contacts(bodies, contacts);
        order_contacts(contacts);
        for contact in contacts.iter() {
            // a < b always; split so both ends borrow mutably
            let (left, right) = bodies.split_at_mut(contact.b);
            resolve_contact(&mut left[contact.a], &mut right[0]);
        }

        detect_captures(self.board, self.config, bodies, step_index, events);

        let mut moving = false;
        for body in bodies.iter().filter(|b| b.active) {
            if !body.position.is_finite() || !body.velocity.is_finite() {
                return Err(GameError::InvalidConfiguration {
                    field: "non_finite_body",
                    value: f64::from(body.id.raw()),
                });
            }
            moving |= body.velocity != Vec2::ZERO;
        }
        Ok(moving)
    }

    /// Reflect the velocity component normal to a crossed wall, scaled
    /// by the restitution coefficient, and clamp the body back inside.
    /// Suppressed while the center sits in a pocket mouth so bodies can
    /// fall into corner pockets instead of being clamped away from them.
    fn wall_response(&self, body: &mut Body) {
        if self.board.in_pocket_mouth(body.position) {
            return;
        }

        let restitution = self.config.restitution_coefficient;
        let (min, max) = (self.board.min(), self.board.max());

        if body.position.x - body.radius < min.x {
            body.position.x = min.x + body.radius;
            body.velocity.x = -body.velocity.x * restitution;
        } else if body.position.x + body.radius > max.x {
            body.position.x = max.x - body.radius;
            body.velocity.x = -body.velocity.x * restitution;
        }

        if body.position.y - body.radius < min.y {
            body.position.y = min.y + body.radius;
            body.velocity.y = -body.velocity.y * restitution;
        } else if body.position.y + body.radius > max.y {
            body.position.y = max.y - body.radius;
            body.velocity.y = -body.velocity.y * restitution;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyKind;

    fn quiet_board() -> (Board, MatchConfig, BodySet) {
        let board = Board::standard();
        let config = MatchConfig::new(2);
        let bodies = BodySet::initial(&board);
        (board, config, bodies)
    }

    #[test]
    fn test_stroke_with_no_motion_settles_in_one_step() {
        let (board, config, mut bodies) = quiet_board();

        let stroke = Integrator::new(&board, &config).run(&mut bodies).unwrap();

        assert_eq!(stroke.steps, 1);
        assert!(stroke.events.is_empty());
    }

    #[test]
    fn test_moving_striker_comes_to_rest() {
        let (board, config, mut bodies) = quiet_board();
        bodies.spawn_striker(Vec2::new(150.0, 550.0));
        bodies.striker_mut().velocity = Vec2::new(0.0, -20.0);

        let stroke = Integrator::new(&board, &config).run(&mut bodies).unwrap();

        assert!(stroke.steps > 1);
        assert!(stroke.steps < MAX_STROKE_STEPS);
        for body in bodies.iter_active() {
            assert_eq!(body.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_wall_bounce_reflects_and_clamps() {
        let (board, config, mut bodies) = quiet_board();
        // Head straight for the right wall at mid-height, far from pockets
        bodies.spawn_striker(Vec2::new(500.0, 300.0));
        bodies.striker_mut().velocity = Vec2::new(18.0, 0.0);

        let integrator = Integrator::new(&board, &config);
        let mut max_x: f32 = 0.0;
        integrator
            .run_observed(&mut bodies, |set| {
                max_x = max_x.max(set.striker().position.x);
            })
            .unwrap();

        let striker = bodies.striker();
        assert!(max_x <= board.max().x - striker.radius + 1e-3);
        // Came back off the wall
        assert!(striker.position.x < board.max().x - striker.radius);
    }

    #[test]
    fn test_striker_aimed_at_pocket_is_captured() {
        let (board, config, mut bodies) = quiet_board();
        bodies.spawn_striker(Vec2::new(300.0, 550.0));
        let pocket = Vec2::new(0.0, 600.0);
        let direction = (pocket - bodies.striker().position).normalize();
        bodies.striker_mut().velocity = direction * config.max_striker_speed;

        let stroke = Integrator::new(&board, &config).run(&mut bodies).unwrap();

        assert_eq!(stroke.events.len(), 1);
        assert_eq!(stroke.events[0].kind, BodyKind::Striker);
        assert_eq!(stroke.events[0].pocket.index(), 2);
        assert!(!bodies.striker().active);
    }

    #[test]
    fn test_non_finite_velocity_aborts() {
        let (board, config, mut bodies) = quiet_board();
        bodies.spawn_striker(Vec2::new(300.0, 550.0));
        bodies.striker_mut().velocity = Vec2::new(f32::NAN, 0.0);

        let err = Integrator::new(&board, &config).run(&mut bodies).unwrap_err();

        assert!(matches!(
            err,
            GameError::InvalidConfiguration { field: "non_finite_body", .. }
        ));
    }

    #[test]
    fn test_observer_sees_every_step() {
        let (board, config, mut bodies) = quiet_board();
        bodies.spawn_striker(Vec2::new(150.0, 550.0));
        bodies.striker_mut().velocity = Vec2::new(0.0, -15.0);

        let mut observed = 0u32;
        let stroke = Integrator::new(&board, &config)
            .run_observed(&mut bodies, |_| observed += 1)
            .unwrap();

        assert_eq!(observed, stroke.steps);
    }

    #[test]
    fn test_break_shot_is_deterministic() {
        let (board, config, _) = quiet_board();

        let run = || {
            let mut bodies = BodySet::initial(&board);
            bodies.spawn_striker(Vec2::new(300.0, 550.0));
            bodies.striker_mut().velocity = Vec2::new(0.3, -19.0);
            let stroke = Integrator::new(&board, &config).run(&mut bodies).unwrap();
            (stroke, bodies)
        };

        let (stroke_a, bodies_a) = run();
        let (stroke_b, bodies_b) = run();

        assert_eq!(stroke_a, stroke_b);
        assert_eq!(bodies_a, bodies_b);
    }
}
