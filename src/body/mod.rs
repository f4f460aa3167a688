//! Movable bodies: coins, the queen, and the striker.
//!
//! ## Body
//!
//! Every piece on the board is a `Body`: a rigid disc with position,
//! velocity, radius, mass, and an active flag. Radius and mass are fixed
//! per kind; once a body is pocketed its `active` flag drops and it is
//! excluded from physics and rendering alike.
//!
//! ## BodySet
//!
//! The full body population for a match. Bodies are never removed from
//! the set, only deactivated, so storage order is stable and matches
//! ascending `BodyId`. Lookup by id is O(1) via an index map.

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};

/// Radius of a regular coin, in board units.
pub const COIN_RADIUS: f32 = 15.0;

/// Radius of the queen.
pub const QUEEN_RADIUS: f32 = 15.0;

/// Radius of the striker.
pub const STRIKER_RADIUS: f32 = 20.0;

/// Coins per color in the initial layout.
pub const COINS_PER_COLOR: usize = 9;

/// Body identifier. Dense: the queen is 0, coins follow, the striker is
/// last. Ascending id is the deterministic tie-break everywhere ordering
/// matters (collision pairs, same-step captures).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// What kind of piece a body is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Coin,
    Queen,
    Striker,
}

impl BodyKind {
    /// The fixed radius for this kind.
    #[must_use]
    pub fn radius(self) -> f32 {
        match self {
            BodyKind::Coin => COIN_RADIUS,
            BodyKind::Queen => QUEEN_RADIUS,
            BodyKind::Striker => STRIKER_RADIUS,
        }
    }

    /// The fixed mass for this kind, proportional to disc area with a
    /// coin as the unit.
    #[must_use]
    pub fn mass(self) -> f32 {
        let r = self.radius();
        (r * r) / (COIN_RADIUS * COIN_RADIUS)
    }
}

/// Coin color. Players own a color; in four-player matches two seats
/// share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinColor {
    White,
    Black,
}

impl CoinColor {
    /// The other color.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            CoinColor::White => CoinColor::Black,
            CoinColor::Black => CoinColor::White,
        }
    }
}

/// Who a body belongs to. The queen and striker are neutral; coins
/// belong to a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyOwner {
    Neutral,
    Color(CoinColor),
}

/// A rigid disc on the board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub owner: BodyOwner,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub active: bool,
}

impl Body {
    /// Create an active body of `kind` at `position`, at rest.
    #[must_use]
    pub fn new(id: BodyId, kind: BodyKind, owner: BodyOwner, position: Vec2) -> Self {
        Self {
            id,
            kind,
            owner,
            position,
            velocity: Vec2::ZERO,
            radius: kind.radius(),
            mass: kind.mass(),
            active: true,
        }
    }

    /// Current speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Whether the body is active and moving.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.active && self.velocity != Vec2::ZERO
    }
}

/// The body population for a match.
///
/// Membership is fixed at creation; capture deactivates a body rather
/// than removing it, so indices are stable and storage order equals
/// ascending id order.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySet {
    bodies: Vec<Body>,
    index: FxHashMap<BodyId, usize>,
    queen: BodyId,
    striker: BodyId,
}

impl BodySet {
    /// The standard opening layout: queen at the board center, 18 coins
    /// (9 per color) in two concentric rings around it, striker parked
    /// inactive at the bottom baseline.
    ///
    /// Inner ring: 6 coins, alternating colors. Outer ring: 12 coins,
    /// staggered half a slot and alternating the other way, so each
    /// color gets 9 coins.
    #[must_use]
    pub fn initial(board: &Board) -> Self {
        let center = board.center();
        let mut bodies = Vec::with_capacity(2 * COINS_PER_COLOR + 2);

        bodies.push(Body::new(
            BodyId(0),
            BodyKind::Queen,
            BodyOwner::Neutral,
            center,
        ));

        let mut next_id = 1u32;
        let mut push_ring = |bodies: &mut Vec<Body>, count: u32, radius: f32, offset: f32, first: CoinColor| {
            for i in 0..count {
                let angle = offset + i as f32 * (std::f32::consts::TAU / count as f32);
                let color = if i % 2 == 0 { first } else { first.opponent() };
                bodies.push(Body::new(
                    BodyId(next_id),
                    BodyKind::Coin,
                    BodyOwner::Color(color),
                    center + Vec2::new(angle.cos(), angle.sin()) * radius,
                ));
                next_id += 1;
            }
        };

        push_ring(&mut bodies, 6, COIN_RADIUS * 2.5, 0.0, CoinColor::Black);
        push_ring(
            &mut bodies,
            12,
            COIN_RADIUS * 5.0,
            std::f32::consts::TAU / 24.0,
            CoinColor::White,
        );

        let striker_id = BodyId(next_id);
        let mut striker = Body::new(
            striker_id,
            BodyKind::Striker,
            BodyOwner::Neutral,
            board.baseline(Side::Bottom).midpoint(),
        );
        striker.active = false;
        bodies.push(striker);

        Self::from_bodies(bodies).expect("initial layout is well-formed")
    }

    /// Build a set from an explicit body list, e.g. when restoring a
    /// snapshot. Returns `None` if ids repeat or the set does not contain
    /// exactly one queen and one striker.
    #[must_use]
    pub fn from_bodies(bodies: Vec<Body>) -> Option<Self> {
        let mut index = FxHashMap::default();
        let mut queen = None;
        let mut striker = None;

        for (i, body) in bodies.iter().enumerate() {
            if index.insert(body.id, i).is_some() {
                return None;
            }
            match body.kind {
                BodyKind::Queen if queen.is_none() => queen = Some(body.id),
                BodyKind::Striker if striker.is_none() => striker = Some(body.id),
                BodyKind::Coin => {}
                _ => return None,
            }
        }

        Some(Self {
            bodies,
            index,
            queen: queen?,
            striker: striker?,
        })
    }

    /// All bodies, active or not, in id order.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to all bodies. Order must not be changed.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Look up a body by id.
    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index.get(&id).map(|&i| &self.bodies[i])
    }

    /// Look up a body by id, mutably.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.index.get(&id).copied().map(move |i| &mut self.bodies[i])
    }

    /// Iterate over active bodies in id order.
    pub fn iter_active(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.active)
    }

    /// The queen, wherever it is.
    #[must_use]
    pub fn queen(&self) -> &Body {
        &self.bodies[self.index[&self.queen]]
    }

    /// The queen, mutably.
    pub fn queen_mut(&mut self) -> &mut Body {
        let i = self.index[&self.queen];
        &mut self.bodies[i]
    }

    /// The striker.
    #[must_use]
    pub fn striker(&self) -> &Body {
        &self.bodies[self.index[&self.striker]]
    }

    /// The striker, mutably.
    pub fn striker_mut(&mut self) -> &mut Body {
        let i = self.index[&self.striker];
        &mut self.bodies[i]
    }

    /// Number of active coins of a color still on the board.
    #[must_use]
    pub fn active_coins(&self, color: CoinColor) -> usize {
        self.iter_active()
            .filter(|b| b.owner == BodyOwner::Color(color))
            .count()
    }

    /// Centers and radii of every active body, for open-position search.
    #[must_use]
    pub fn occupied_circles(&self) -> Vec<(Vec2, f32)> {
        self.iter_active().map(|b| (b.position, b.radius)).collect()
    }

    /// Activate a body at `position`, at rest. Used to restore fouled
    /// coins and the uncovered queen to the board.
    pub fn restore(&mut self, id: BodyId, position: Vec2) {
        if let Some(body) = self.get_mut(id) {
            body.position = position;
            body.velocity = Vec2::ZERO;
            body.active = true;
        }
    }

    /// Place the striker at `position`, active and at rest.
    pub fn spawn_striker(&mut self, position: Vec2) {
        let striker = self.striker_mut();
        striker.position = position;
        striker.velocity = Vec2::ZERO;
        striker.active = true;
    }

    /// Park the striker at `position`, inactive and at rest. Between
    /// strokes the striker is not part of the simulation.
    pub fn park_striker(&mut self, position: Vec2) {
        let striker = self.striker_mut();
        striker.position = position;
        striker.velocity = Vec2::ZERO;
        striker.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_constants() {
        assert_eq!(BodyKind::Coin.radius(), 15.0);
        assert_eq!(BodyKind::Striker.radius(), 20.0);
        assert_eq!(BodyKind::Coin.mass(), 1.0);
        assert_eq!(BodyKind::Queen.mass(), 1.0);
        assert!(BodyKind::Striker.mass() > 1.0);
    }

    #[test]
    fn test_initial_layout_census() {
        let board = Board::standard();
        let set = BodySet::initial(&board);

        assert_eq!(set.bodies().len(), 20);
        assert_eq!(set.active_coins(CoinColor::White), COINS_PER_COLOR);
        assert_eq!(set.active_coins(CoinColor::Black), COINS_PER_COLOR);
        assert_eq!(set.queen().kind, BodyKind::Queen);
        assert_eq!(set.queen().position, board.center());
        assert!(!set.striker().active);
    }

    #[test]
    fn test_initial_layout_no_overlaps() {
        let board = Board::standard();
        let set = BodySet::initial(&board);

        let active: Vec<_> = set.iter_active().collect();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                let dist = a.position.distance(b.position);
                assert!(
                    dist >= a.radius + b.radius - 1e-3,
                    "{} and {} overlap: {}",
                    a.id,
                    b.id,
                    dist
                );
            }
        }
    }

    #[test]
    fn test_ids_are_dense_and_ordered() {
        let set = BodySet::initial(&Board::standard());
        for (i, body) in set.bodies().iter().enumerate() {
            assert_eq!(body.id, BodyId(i as u32));
        }
    }

    #[test]
    fn test_lookup_and_restore() {
        let mut set = BodySet::initial(&Board::standard());
        let id = BodyId(1);

        set.get_mut(id).unwrap().active = false;
        assert!(!set.get(id).unwrap().active);

        set.restore(id, Vec2::new(100.0, 100.0));
        let body = set.get(id).unwrap();
        assert!(body.active);
        assert_eq!(body.position, Vec2::new(100.0, 100.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_striker_spawn_and_park() {
        let board = Board::standard();
        let mut set = BodySet::initial(&board);

        set.spawn_striker(Vec2::new(300.0, 550.0));
        assert!(set.striker().active);

        set.park_striker(Vec2::new(300.0, 50.0));
        assert!(!set.striker().active);
        assert_eq!(set.striker().position, Vec2::new(300.0, 50.0));
    }

    #[test]
    fn test_from_bodies_rejects_duplicates() {
        let board = Board::standard();
        let set = BodySet::initial(&board);
        let mut bodies = set.bodies().to_vec();
        bodies[1].id = BodyId(0);
        assert!(BodySet::from_bodies(bodies).is_none());
    }

    #[test]
    fn test_from_bodies_requires_queen_and_striker() {
        let coin = Body::new(
            BodyId(0),
            BodyKind::Coin,
            BodyOwner::Color(CoinColor::White),
            Vec2::ZERO,
        );
        assert!(BodySet::from_bodies(vec![coin]).is_none());
    }
}
