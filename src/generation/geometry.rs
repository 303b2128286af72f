//! # Room Geometry
//!
//! Overlap, separation and adjacency predicates on room footprints.
//!
//! All predicates work on the integer cell footprint of a room
//! ([`Room::cell_rect`]), so "touching" means the footprints share an edge
//! with no gap and no common cell.

use super::Room;
use crate::map::{HallwayOrientation, Position};
use crate::utils;
use glam::DVec2;
use rand::Rng;

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
    pub top: i32,
}

impl CellRect {
    pub fn new(left: i32, bottom: i32, right: i32, top: i32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn min(&self) -> Position {
        Position::new(self.left, self.bottom)
    }

    pub fn max(&self) -> Position {
        Position::new(self.right, self.top)
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left + 1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.top - self.bottom + 1).max(0) as u32
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.bottom && pos.y <= self.top
    }

    /// Iterates over every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (bottom, top) = (self.bottom, self.top);
        (self.left..=self.right).flat_map(move |x| (bottom..=top).map(move |y| Position::new(x, y)))
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &CellRect) -> CellRect {
        CellRect::new(
            self.left.min(other.left),
            self.bottom.min(other.bottom),
            self.right.max(other.right),
            self.top.max(other.top),
        )
    }
}

/// Number of cells two rooms share along x and along y. Both are positive
/// exactly when the footprints overlap.
pub fn overlap_extent(a: &Room, b: &Room) -> (i32, i32) {
    let (ra, rb) = (a.cell_rect(), b.cell_rect());
    let x = ra.right.min(rb.right) - ra.left.max(rb.left) + 1;
    let y = ra.top.min(rb.top) - ra.bottom.max(rb.bottom) + 1;
    (x, y)
}

/// Checks whether two room footprints share at least one cell.
/// Touching rooms do not overlap.
pub fn overlaps(a: &Room, b: &Room) -> bool {
    let (x, y) = overlap_extent(a, b);
    x > 0 && y > 0
}

/// Unit vector pointing from `b`'s centre towards `a`'s centre.
///
/// Coincident centres have no direction, so a random unit vector is used.
pub fn separation_vector<R: Rng + ?Sized>(a: &Room, b: &Room, rng: &mut R) -> DVec2 {
    let delta = a.center - b.center;
    if delta.length_squared() <= f64::EPSILON {
        utils::random_unit_vector(rng)
    } else {
        delta.normalize()
    }
}

/// Wall segment shared by two touching rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedBorder {
    /// Direction a hallway through this border runs in
    pub orientation: HallwayOrientation,
    /// Border column (horizontal) or row (vertical) of the lower-coordinate room
    pub wall_line: i32,
    /// First shared cell along the border
    pub span_start: i32,
    /// Last shared cell along the border
    pub span_end: i32,
}

impl SharedBorder {
    /// Length of the shared segment in cells.
    pub fn length(&self) -> u32 {
        (self.span_end - self.span_start + 1).max(0) as u32
    }
}

/// Finds the border two rooms share, if their footprints touch along an edge.
pub fn shared_border(a: &Room, b: &Room) -> Option<SharedBorder> {
    let (ra, rb) = (a.cell_rect(), b.cell_rect());

    if ra.right + 1 == rb.left || rb.right + 1 == ra.left {
        let span_start = ra.bottom.max(rb.bottom);
        let span_end = ra.top.min(rb.top);
        if span_end >= span_start {
            return Some(SharedBorder {
                orientation: HallwayOrientation::Horizontal,
                wall_line: if ra.right < rb.left { ra.right } else { rb.right },
                span_start,
                span_end,
            });
        }
    }

    if ra.top + 1 == rb.bottom || rb.top + 1 == ra.bottom {
        let span_start = ra.left.max(rb.left);
        let span_end = ra.right.min(rb.right);
        if span_end >= span_start {
            return Some(SharedBorder {
                orientation: HallwayOrientation::Vertical,
                wall_line: if ra.top < rb.bottom { ra.top } else { rb.top },
                span_start,
                span_end,
            });
        }
    }

    None
}

/// Two rooms are adjacent when they touch along a border of at least
/// `min_segment` cells.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use warren::{are_adjacent, Room, RoomType};
///
/// let a = Room::new(0, DVec2::new(0.0, 0.0), 10, 10, RoomType::Enemy);
/// let b = Room::new(1, DVec2::new(10.0, 2.0), 10, 10, RoomType::Enemy);
/// assert!(are_adjacent(&a, &b, 6));
/// assert!(!are_adjacent(&a, &b, 9));
/// ```
pub fn are_adjacent(a: &Room, b: &Room, min_segment: u32) -> bool {
    shared_border(a, b).is_some_and(|border| border.length() >= min_segment)
}
