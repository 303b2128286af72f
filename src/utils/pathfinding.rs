//! # Grid Search
//!
//! Bounded 4-connected flood fill over cell positions.

use crate::map::Position;
use ::pathfinding::prelude::bfs_reach;

/// Inclusive rectangular search region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    pub min: Position,
    pub max: Position,
}

impl SearchBounds {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// Grows the region by `margin` cells on every side.
    pub fn expanded(self, margin: i32) -> Self {
        Self::new(self.min.offset(-margin, -margin), self.max.offset(margin, margin))
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// Nearest position inside the region.
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(self.min.x, self.max.x),
            pos.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Flood-fills from `start` through cells inside `bounds` for which
/// `passable` holds, and returns the first reached cell matching `target`.
///
/// The start cell itself is tested against `target` but not against
/// `passable`. Returns `None` when the fill exhausts without a match.
///
/// # Examples
///
/// ```
/// use warren::Position;
/// use warren::utils::{flood_find, SearchBounds};
///
/// let bounds = SearchBounds::new(Position::new(0, 0), Position::new(4, 0));
/// let wall = Position::new(2, 0);
/// let found = flood_find(Position::new(0, 0), bounds, |p| *p != wall, |p| p.x == 4);
/// assert!(found.is_none());
/// ```
pub fn flood_find<P, T>(
    start: Position,
    bounds: SearchBounds,
    mut passable: P,
    mut target: T,
) -> Option<Position>
where
    P: FnMut(&Position) -> bool,
    T: FnMut(&Position) -> bool,
{
    if !bounds.contains(start) {
        return None;
    }

    bfs_reach(start, |pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|next| bounds.contains(*next) && passable(next))
            .collect::<Vec<_>>()
    })
    .find(|pos| target(pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flood_find_reaches_open_target() {
        let bounds = SearchBounds::new(Position::new(0, 0), Position::new(5, 5));
        let found = flood_find(Position::new(0, 0), bounds, |_| true, |p| *p == Position::new(5, 5));
        assert_eq!(found, Some(Position::new(5, 5)));
    }

    #[test]
    fn test_flood_find_blocked_by_wall_ring() {
        // Ring of walls around (3, 3)
        let bounds = SearchBounds::new(Position::new(0, 0), Position::new(6, 6));
        let ring = |p: &Position| {
            (p.x - 3).abs().max((p.y - 3).abs()) == 1
        };
        let found = flood_find(
            Position::new(0, 0),
            bounds,
            |p| !ring(p),
            |p| *p == Position::new(3, 3),
        );
        assert!(found.is_none());
    }

    #[test]
    fn test_bounds_clamp_and_expand() {
        let bounds = SearchBounds::new(Position::new(-2, -2), Position::new(2, 2)).expanded(1);
        assert!(bounds.contains(Position::new(-3, 3)));
        assert_eq!(bounds.clamp(Position::new(-1000, 1)), Position::new(-3, 1));
        assert!(flood_find(Position::new(9, 9), bounds, |_| true, |_| true).is_none());
    }
}
