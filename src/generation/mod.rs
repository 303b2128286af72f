//! # Generation Module
//!
//! Procedural dungeon layout generation.
//!
//! The pipeline runs leaves first: the [`RoomPlanner`] seeds rooms from the
//! archetype pools, the [`OverlapResolver`] pushes them apart, the
//! [`DungeonGraph`] links rooms that share a wall and prunes the ones that do
//! not help connect important rooms, the [`TileEmitter`] writes the tile
//! layers and the [`ClosureValidator`] rejects layouts with a leaking
//! perimeter. [`DungeonGenerator`] drives the retry loop around all of it.

pub mod catalog;
pub mod closure;
pub mod dungeon;
pub mod emission;
pub mod geometry;
pub mod graph;
pub mod placement;
pub mod separation;
pub mod templates;

pub use catalog::*;
pub use closure::*;
pub use dungeon::*;
pub use emission::*;
pub use geometry::*;
pub use graph::*;
pub use placement::*;
pub use separation::*;
pub use templates::*;

use crate::map::Position;
use crate::{config, WarrenError, WarrenResult};
use glam::DVec2;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for dungeon generation.
///
/// Controls room counts, transition room sizing, adjacency and hallway
/// geometry, and the retry budgets of the generation loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation; `None` draws from entropy
    pub seed: Option<u64>,
    /// Number of enemy rooms drawn from the enemy pool
    pub enemy_rooms: usize,
    /// Number of item rooms drawn from the item pool
    pub item_rooms: usize,
    /// Number of transition (passageway) rooms on the spiral
    pub transition_rooms: usize,
    /// Base side length of transition rooms
    pub transition_room_size: u32,
    /// Transition room sides vary by up to this much either way
    pub transition_room_variation: u32,
    /// Spiral radius growth per transition room
    pub spiral_step: f64,
    /// Distance from the origin at which boss, item and enemy rooms are seeded
    pub prefab_distance: f64,
    /// Minimum shared border length for two rooms to be adjacent
    pub min_adjacent_segment: u32,
    /// Hallway width in tiles
    pub hallway_width: u32,
    /// Background padding around all room footprints
    pub background_padding: i32,
    /// Maximum number of full generation attempts
    pub max_attempts: u32,
    /// Maximum number of separation passes per attempt
    pub max_separation_passes: u32,
    /// Flood-fill start for the closure check; must lie outside the dungeon
    pub closure_probe: Position,
}

impl GenerationConfig {
    /// Creates the default generation configuration with a fixed seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.seed, Some(42));
    /// assert_eq!(config.min_adjacent_segment, 6);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            enemy_rooms: 5,
            item_rooms: 2,
            transition_rooms: 5,
            transition_room_size: 30,
            transition_room_variation: 5,
            spiral_step: config::SPIRAL_STEP,
            prefab_distance: config::PREFAB_DISTANCE,
            min_adjacent_segment: config::MIN_ADJACENT_SEGMENT,
            hallway_width: config::HALLWAY_WIDTH,
            background_padding: config::BACKGROUND_PADDING,
            max_attempts: config::MAX_GENERATION_ATTEMPTS,
            max_separation_passes: config::MAX_SEPARATION_PASSES,
            closure_probe: Position::from(config::CLOSURE_PROBE),
        }
    }

    /// Creates a configuration for testing with fewer, smaller rooms.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            enemy_rooms: 3,
            transition_rooms: 4,
            transition_room_size: 20,
            transition_room_variation: 4,
            ..Self::new(seed)
        }
    }

    /// Creates a configuration seeded from entropy.
    pub fn unseeded() -> Self {
        Self {
            seed: None,
            ..Self::new(0)
        }
    }

    /// Checks the settings for combinations the pipeline cannot honour.
    pub fn validate(&self) -> WarrenResult<()> {
        if self.max_attempts == 0 {
            return Err(WarrenError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.max_separation_passes == 0 {
            return Err(WarrenError::InvalidConfig(
                "max_separation_passes must be at least 1".to_string(),
            ));
        }
        if self.hallway_width == 0 {
            return Err(WarrenError::InvalidConfig(
                "hallway_width must be at least 1".to_string(),
            ));
        }
        // A hallway needs one intact wall cell on each side of it
        if self.min_adjacent_segment < self.hallway_width + 2 {
            return Err(WarrenError::InvalidConfig(format!(
                "min_adjacent_segment {} leaves no wall beside a hallway of width {}",
                self.min_adjacent_segment, self.hallway_width
            )));
        }
        if self.transition_rooms > 0
            && self
                .transition_room_size
                .saturating_sub(self.transition_room_variation)
                < config::MIN_ROOM_SIZE
        {
            return Err(WarrenError::InvalidConfig(format!(
                "transition rooms may shrink to {} tiles, below the minimum of {}",
                self.transition_room_size
                    .saturating_sub(self.transition_room_variation),
                config::MIN_ROOM_SIZE
            )));
        }
        if !(self.prefab_distance.is_finite() && self.prefab_distance >= 0.0) {
            return Err(WarrenError::InvalidConfig(
                "prefab_distance must be a non-negative finite number".to_string(),
            ));
        }
        if !(self.spiral_step.is_finite() && self.spiral_step >= 0.0) {
            return Err(WarrenError::InvalidConfig(
                "spiral_step must be a non-negative finite number".to_string(),
            ));
        }
        if self.background_padding < 0 {
            return Err(WarrenError::InvalidConfig(
                "background_padding must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Gameplay role of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Boss encounter
    Boss,
    /// Regular combat room
    Enemy,
    /// Item pickup room
    Item,
    /// Filler room that only helps connect the others
    Passageway,
}

impl RoomType {
    /// Important rooms must stay mutually reachable.
    pub fn is_important(self) -> bool {
        !matches!(self, RoomType::Passageway)
    }
}

/// Axis-aligned rectangular room.
///
/// The centre is real-valued while rooms are being pushed apart and is
/// snapped to whole cells once separation settles. The room covers exactly
/// `width` × `height` cells starting at `floor(center - size / 2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier assigned in placement order
    pub id: u32,
    pub center: DVec2,
    pub width: u32,
    pub height: u32,
    pub room_type: RoomType,
    /// Archetype index of the prefab this room was drawn from
    pub archetype: Option<usize>,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec2;
    /// use warren::{Position, Room, RoomType};
    ///
    /// let room = Room::new(1, DVec2::new(0.0, 0.0), 10, 8, RoomType::Enemy);
    /// let rect = room.cell_rect();
    /// assert_eq!(rect.min(), Position::new(-5, -4));
    /// assert_eq!(rect.max(), Position::new(4, 3));
    /// ```
    pub fn new(id: u32, center: DVec2, width: u32, height: u32, room_type: RoomType) -> Self {
        Self {
            id,
            center,
            width,
            height,
            room_type,
            archetype: None,
        }
    }

    /// Tags the room with the prefab archetype it was drawn from.
    pub fn with_archetype(mut self, archetype: usize) -> Self {
        self.archetype = Some(archetype);
        self
    }

    /// Cells covered by the room.
    pub fn cell_rect(&self) -> CellRect {
        let left = (self.center.x - self.width as f64 / 2.0).floor() as i32;
        let bottom = (self.center.y - self.height as f64 / 2.0).floor() as i32;
        CellRect::new(
            left,
            bottom,
            left + self.width as i32 - 1,
            bottom + self.height as i32 - 1,
        )
    }

    /// Centre rounded down to whole cells.
    pub fn cell_center(&self) -> Position {
        Position::new(self.center.x.floor() as i32, self.center.y.floor() as i32)
    }

    /// Moves the centre onto the integer grid.
    pub fn snap_to_grid(&mut self) {
        self.center = self.center.floor();
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn is_important(&self) -> bool {
        self.room_type.is_important()
    }

    /// Checks whether a cell has a 4-neighbour outside this room's footprint.
    pub fn is_border_cell(&self, pos: Position) -> bool {
        let rect = self.cell_rect();
        rect.contains(pos)
            && pos
                .cardinal_adjacent_positions()
                .iter()
                .any(|neighbor| !rect.contains(*neighbor))
    }
}

/// Trait for procedural generators.
///
/// Generators produce content from a configuration and a caller-owned
/// random number generator, and can re-check content they produced.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WarrenResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> WarrenResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a random number generator from the config seed, or from
    /// entropy when the config carries none.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Finds the room whose centre is closest to the origin.
    pub fn room_nearest_origin(rooms: &[Room]) -> Option<usize> {
        rooms
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.center.length().total_cmp(&b.center.length()))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.item_rooms, 2);
        assert_eq!(config.max_attempts, 100);
        assert_eq!(config.max_separation_passes, 1000);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());

        let unseeded = GenerationConfig::unseeded();
        assert_eq!(unseeded.seed, None);
        assert_eq!(unseeded.enemy_rooms, config.enemy_rooms);
        assert!(unseeded.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_tiny_transition_rooms() {
        let config = GenerationConfig {
            transition_room_size: 10,
            transition_room_variation: 5,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(config.validate(), Err(WarrenError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_segment_narrower_than_hallway() {
        let config = GenerationConfig {
            min_adjacent_segment: 4,
            ..GenerationConfig::new(1)
        };
        assert!(config.validate().is_err());

        let config = GenerationConfig {
            max_attempts: 0,
            ..GenerationConfig::new(1)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_room_cell_rect_covers_exact_size() {
        let room = Room::new(0, DVec2::new(3.0, -2.0), 7, 5, RoomType::Passageway);
        let rect = room.cell_rect();
        assert_eq!(rect.width(), 7);
        assert_eq!(rect.height(), 5);
        assert_eq!(rect.cells().count() as u32, room.area());
        assert!(rect.contains(room.cell_center()));
    }

    #[test]
    fn test_room_snap_and_border() {
        let mut room = Room::new(0, DVec2::new(2.7, -0.2), 6, 6, RoomType::Boss);
        room.snap_to_grid();
        assert_eq!(room.center, DVec2::new(2.0, -1.0));

        let rect = room.cell_rect();
        assert!(room.is_border_cell(rect.min()));
        assert!(room.is_border_cell(Position::new(rect.max().x, rect.min().y + 2)));
        assert!(!room.is_border_cell(Position::new(rect.min().x + 2, rect.min().y + 2)));
        assert!(!room.is_border_cell(Position::new(100, 100)));
    }

    #[test]
    fn test_room_types() {
        assert!(RoomType::Boss.is_important());
        assert!(RoomType::Enemy.is_important());
        assert!(RoomType::Item.is_important());
        assert!(!RoomType::Passageway.is_important());
    }

    #[test]
    fn test_utils_rng_is_reproducible() {
        let config = GenerationConfig::new(12345);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_room_nearest_origin() {
        let rooms = vec![
            Room::new(0, DVec2::new(10.0, 0.0), 8, 8, RoomType::Enemy),
            Room::new(1, DVec2::new(-2.0, 3.0), 8, 8, RoomType::Passageway),
            Room::new(2, DVec2::new(0.0, -9.0), 8, 8, RoomType::Item),
        ];
        assert_eq!(utils::room_nearest_origin(&rooms), Some(1));
        assert_eq!(utils::room_nearest_origin(&[]), None);
    }
}
