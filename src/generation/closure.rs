//! # Closure Check
//!
//! Verifies that the emitted dungeon is sealed: a flood fill started outside
//! every room, blocked only by lower wall tiles, must never reach a walkable
//! floor tile.

use super::AttemptFailure;
use crate::map::{Layer, Position, TileGrid};
use crate::utils::{flood_find, SearchBounds};

/// Closure Validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureValidator {
    /// Where the outside flood fill starts; clamped into the search region
    pub probe: Position,
}

impl ClosureValidator {
    pub fn new(probe: Position) -> Self {
        Self { probe }
    }

    /// Floods the grid from outside and reports the first floor cell reached.
    ///
    /// The search is limited to the floor bounding box grown by one cell, so
    /// the outside ring is always open and the fill can wrap around the whole
    /// dungeon. A grid without floor is trivially closed.
    pub fn check(&self, grid: &TileGrid) -> Result<(), AttemptFailure> {
        let Some((min, max)) = grid.bounds(Layer::Floor) else {
            return Ok(());
        };
        let inner = SearchBounds::new(min, max);
        let region = inner.expanded(1);

        let start = if inner.contains(self.probe) {
            region.min
        } else {
            region.clamp(self.probe)
        };

        let breach = flood_find(
            start,
            region,
            |pos| !grid.has_tile(Layer::WallLower, *pos),
            |pos| grid.has_tile(Layer::Floor, *pos) && !grid.has_tile(Layer::WallLower, *pos),
        );

        match breach {
            Some(breach) => {
                log::debug!("perimeter breached at ({}, {})", breach.x, breach.y);
                Err(AttemptFailure::PerimeterBreached { breach })
            }
            None => Ok(()),
        }
    }
}

impl Default for ClosureValidator {
    fn default() -> Self {
        Self::new(Position::from(crate::config::CLOSURE_PROBE))
    }
}
