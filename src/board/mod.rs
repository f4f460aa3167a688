//! Board geometry: playing-field bounds, corner pockets, baselines.
//!
//! The board is immutable for the lifetime of a match and shared read-only
//! by every component. All queries are pure functions.
//!
//! ## Coordinates
//!
//! Board space is y-down with the origin at the top-left corner of the
//! playing field. The standard board is a 600x600 square with a pocket at
//! each corner.
//!
//! ## Baselines
//!
//! Each side of the board carries a striking baseline set in from that
//! side's wall. The striker must be placed inside the baseline band before
//! a stroke. Player seating: player 0 strikes from the bottom, player 1
//! from the top, and in four-player matches players 2 and 3 from the left
//! and right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Side length of the standard playing field, in board units.
pub const BOARD_SIZE: f32 = 600.0;

/// Capture radius of each corner pocket.
pub const POCKET_RADIUS: f32 = 30.0;

/// Distance from a side's wall to its baseline.
pub const BASELINE_INSET: f32 = 50.0;

/// Lateral inset of the baseline span from the adjoining walls.
pub const BASELINE_MARGIN: f32 = 70.0;

/// Half-width of the band around the baseline in which the striker may
/// be placed.
pub const BASELINE_HALF_WIDTH: f32 = 15.0;

/// Identifier of one of the four corner pockets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PocketId(pub u8);

impl PocketId {
    /// Get the raw pocket index (0..4).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PocketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pocket({})", self.0)
    }
}

/// A side of the board, naming the baseline a player strikes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Top,
    Left,
    Right,
}

impl Side {
    /// The side a player strikes from, or `None` for an invalid player id.
    ///
    /// Two-player matches seat players on the bottom and top; four-player
    /// matches add the left and right sides.
    #[must_use]
    pub fn of(player_count: usize, player: PlayerId) -> Option<Side> {
        match (player_count, player.index()) {
            (2, 0) | (4, 0) => Some(Side::Bottom),
            (2, 1) | (4, 1) => Some(Side::Top),
            (4, 2) => Some(Side::Left),
            (4, 3) => Some(Side::Right),
            _ => None,
        }
    }
}

/// A baseline segment: the line a striker is placed on before a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Endpoint nearest the board origin.
    pub start: Vec2,
    /// Endpoint farthest from the board origin.
    pub end: Vec2,
}

impl Baseline {
    /// Midpoint of the segment, the default striker spawn position.
    #[must_use]
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }
}

/// Immutable board geometry.
///
/// ## Example
///
/// ```
/// use carrom_core::board::Board;
/// use glam::Vec2;
///
/// let board = Board::standard();
/// let (pocket, dist) = board.distance_to_nearest_pocket(Vec2::new(10.0, 10.0));
/// assert_eq!(pocket.index(), 0);
/// assert!(dist < 20.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    min: Vec2,
    max: Vec2,
    pocket_radius: f32,
}

impl Board {
    /// The standard 600x600 board with corner pockets of radius 30.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::splat(BOARD_SIZE),
            pocket_radius: POCKET_RADIUS,
        }
    }

    /// Minimum (top-left) corner of the playing field.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Maximum (bottom-right) corner of the playing field.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Center of the playing field.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Capture radius shared by all four pockets.
    #[must_use]
    pub fn pocket_radius(&self) -> f32 {
        self.pocket_radius
    }

    /// Centers of the four corner pockets, indexed by `PocketId`:
    /// top-left, top-right, bottom-left, bottom-right.
    #[must_use]
    pub fn pockets(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.min.y),
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.max.y),
        ]
    }

    /// Center of one pocket.
    #[must_use]
    pub fn pocket_center(&self, pocket: PocketId) -> Vec2 {
        self.pockets()[pocket.index()]
    }

    /// The pocket nearest to `position` and the distance to its center.
    #[must_use]
    pub fn distance_to_nearest_pocket(&self, position: Vec2) -> (PocketId, f32) {
        let mut best = (PocketId(0), f32::INFINITY);
        for (i, center) in self.pockets().iter().enumerate() {
            let dist = position.distance(*center);
            if dist < best.1 {
                best = (PocketId(i as u8), dist);
            }
        }
        best
    }

    /// Whether a disc of `radius` centered at `position` lies entirely
    /// inside the playing field.
    #[must_use]
    pub fn is_within_bounds(&self, position: Vec2, radius: f32) -> bool {
        position.x - radius >= self.min.x
            && position.x + radius <= self.max.x
            && position.y - radius >= self.min.y
            && position.y + radius <= self.max.y
    }

    /// Whether `position` is inside a pocket mouth: within the capture
    /// radius of some pocket center. Wall response is suppressed there so
    /// bodies can fall into corner pockets instead of being clamped away
    /// from them.
    #[must_use]
    pub fn in_pocket_mouth(&self, position: Vec2) -> bool {
        self.distance_to_nearest_pocket(position).1 <= self.pocket_radius
    }

    /// The baseline segment for a side.
    #[must_use]
    pub fn baseline(&self, side: Side) -> Baseline {
        let (lo, hi) = (self.min, self.max);
        match side {
            Side::Bottom => Baseline {
                start: Vec2::new(lo.x + BASELINE_MARGIN, hi.y - BASELINE_INSET),
                end: Vec2::new(hi.x - BASELINE_MARGIN, hi.y - BASELINE_INSET),
            },
            Side::Top => Baseline {
                start: Vec2::new(lo.x + BASELINE_MARGIN, lo.y + BASELINE_INSET),
                end: Vec2::new(hi.x - BASELINE_MARGIN, lo.y + BASELINE_INSET),
            },
            Side::Left => Baseline {
                start: Vec2::new(lo.x + BASELINE_INSET, lo.y + BASELINE_MARGIN),
                end: Vec2::new(lo.x + BASELINE_INSET, hi.y - BASELINE_MARGIN),
            },
            Side::Right => Baseline {
                start: Vec2::new(hi.x - BASELINE_INSET, lo.y + BASELINE_MARGIN),
                end: Vec2::new(hi.x - BASELINE_INSET, hi.y - BASELINE_MARGIN),
            },
        }
    }

    /// Whether `position` is a legal striker placement for `player`:
    /// within the baseline band of the player's side. Returns `false` for
    /// an invalid player id.
    #[must_use]
    pub fn is_on_baseline(&self, position: Vec2, player_count: usize, player: PlayerId) -> bool {
        let Some(side) = Side::of(player_count, player) else {
            return false;
        };
        let baseline = self.baseline(side);
        match side {
            Side::Bottom | Side::Top => {
                (position.y - baseline.start.y).abs() <= BASELINE_HALF_WIDTH
                    && position.x >= baseline.start.x
                    && position.x <= baseline.end.x
            }
            Side::Left | Side::Right => {
                (position.x - baseline.start.x).abs() <= BASELINE_HALF_WIDTH
                    && position.y >= baseline.start.y
                    && position.y <= baseline.end.y
            }
        }
    }

    /// Find the nearest unoccupied position to `desired` for a disc of
    /// `radius`, scanning outward along the board's axes in a fixed order.
    ///
    /// Used to restore the queen or a foul-restored coin when the desired
    /// spot is occupied. `occupied` lists (center, radius) of discs already
    /// on the board. Deterministic; falls back to `desired` if no open spot
    /// exists within the field.
    #[must_use]
    pub fn find_open_position(
        &self,
        desired: Vec2,
        radius: f32,
        occupied: &[(Vec2, f32)],
    ) -> Vec2 {
        let fits = |candidate: Vec2| {
            self.is_within_bounds(candidate, radius)
                && occupied
                    .iter()
                    .all(|(center, r)| candidate.distance(*center) >= radius + r)
        };

        if fits(desired) {
            return desired;
        }

        let directions = [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y];
        let max_steps = ((self.max.x - self.min.x) / radius) as u32;
        for step in 1..=max_steps {
            for dir in directions {
                let candidate = desired + dir * (step as f32 * radius);
                if fits(candidate) {
                    return candidate;
                }
            }
        }
        desired
    }
}
