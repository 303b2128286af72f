//! # Tile Layers
//!
//! Sparse layered tile storage. Each layer maps a cell to the material the
//! host should paint there; absent cells are empty.

use super::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque material reference handed back to the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// The four independent tile layers of a dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Walkable ground
    Floor,
    /// Collision layer; the closure check treats it as impermeable
    WallLower,
    /// Wall face drawn one cell above the lower wall
    WallUpper,
    /// Wall tops and the background fill around the dungeon
    Roof,
}

impl Layer {
    /// All layers in storage order.
    pub const ALL: [Layer; 4] = [Layer::Floor, Layer::WallLower, Layer::WallUpper, Layer::Roof];

    fn slot(self) -> usize {
        match self {
            Layer::Floor => 0,
            Layer::WallLower => 1,
            Layer::WallUpper => 2,
            Layer::Roof => 3,
        }
    }
}

/// Layers of a wall stack and how far each sits above the lower wall.
const WALL_STACK: [(Layer, i32); 3] = [
    (Layer::WallLower, 0),
    (Layer::WallUpper, 1),
    (Layer::Roof, 2),
];

/// Material used for each layer by one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePalette {
    pub floor: MaterialId,
    pub wall_lower: MaterialId,
    pub wall_upper: MaterialId,
    pub roof: MaterialId,
}

impl TilePalette {
    /// Gets the material for a layer.
    pub fn material(&self, layer: Layer) -> MaterialId {
        match layer {
            Layer::Floor => self.floor,
            Layer::WallLower => self.wall_lower,
            Layer::WallUpper => self.wall_upper,
            Layer::Roof => self.roof,
        }
    }
}

/// Layered sparse tile grid addressed by integer cell coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGrid {
    layers: [HashMap<Position, MaterialId>; 4],
}

impl TileGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the material at a cell, if any.
    pub fn get(&self, layer: Layer, pos: Position) -> Option<MaterialId> {
        self.layers[layer.slot()].get(&pos).copied()
    }

    /// Checks whether a cell on the layer holds a tile.
    pub fn has_tile(&self, layer: Layer, pos: Position) -> bool {
        self.layers[layer.slot()].contains_key(&pos)
    }

    /// Sets a tile, replacing whatever was there.
    pub fn set(&mut self, layer: Layer, pos: Position, material: MaterialId) {
        self.layers[layer.slot()].insert(pos, material);
    }

    /// Empties a cell on one layer.
    pub fn clear_tile(&mut self, layer: Layer, pos: Position) {
        self.layers[layer.slot()].remove(&pos);
    }

    /// Places a faux-3D wall stack: lower wall at `pos`, upper wall one cell
    /// above and roof two cells above.
    pub fn place_wall(&mut self, pos: Position, palette: &TilePalette) {
        for (layer, rise) in WALL_STACK {
            self.set(layer, pos.offset(0, rise), palette.material(layer));
        }
    }

    /// Removes the wall stack rooted at `pos` and lays floor there instead.
    pub fn carve(&mut self, pos: Position, palette: &TilePalette) {
        for (layer, rise) in WALL_STACK {
            self.clear_tile(layer, pos.offset(0, rise));
        }
        self.set(Layer::Floor, pos, palette.material(Layer::Floor));
    }

    /// Number of occupied cells on a layer.
    pub fn tile_count(&self, layer: Layer) -> usize {
        self.layers[layer.slot()].len()
    }

    /// Iterates over the occupied cells of a layer in no particular order.
    pub fn cells(&self, layer: Layer) -> impl Iterator<Item = (Position, MaterialId)> + '_ {
        self.layers[layer.slot()].iter().map(|(pos, mat)| (*pos, *mat))
    }

    /// Occupied cells of a layer sorted by (x, y), for stable host output.
    pub fn sorted_cells(&self, layer: Layer) -> Vec<(Position, MaterialId)> {
        let mut cells: Vec<_> = self.cells(layer).collect();
        cells.sort_by_key(|(pos, _)| *pos);
        cells
    }

    /// Inclusive bounding box of a layer, or `None` when it is empty.
    pub fn bounds(&self, layer: Layer) -> Option<(Position, Position)> {
        let mut positions = self.layers[layer.slot()].keys();
        let first = *positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), pos| {
            (
                Position::new(min.x.min(pos.x), min.y.min(pos.y)),
                Position::new(max.x.max(pos.x), max.y.max(pos.y)),
            )
        });
        Some((min, max))
    }

    /// Checks whether every layer is empty.
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(HashMap::is_empty)
    }

    /// Removes every tile from every layer.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }
}
