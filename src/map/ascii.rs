//! # ASCII Rendering
//!
//! Text dump of the collision-relevant layers, used by the preview binary
//! and handy when a layout test fails.

use super::{Layer, Markers, Position, SpawnRole, TileGrid};
use glam::DVec2;
use std::collections::HashMap;

/// Renders floor, lower walls and markers as text, top row first.
///
/// `#` lower wall, `.` floor, `D` door, `@` player, `w` weapon pickup,
/// `$` item pickup, space for empty cells.
pub fn render_ascii(grid: &TileGrid, markers: &Markers) -> String {
    let bounds = [Layer::Floor, Layer::WallLower]
        .iter()
        .filter_map(|layer| grid.bounds(*layer))
        .reduce(|(a_min, a_max), (b_min, b_max)| {
            (
                Position::new(a_min.x.min(b_min.x), a_min.y.min(b_min.y)),
                Position::new(a_max.x.max(b_max.x), a_max.y.max(b_max.y)),
            )
        });
    let Some((min, max)) = bounds else {
        return String::new();
    };

    let mut overlay: HashMap<Position, char> = HashMap::new();
    for door in &markers.doors {
        overlay.insert(marker_cell(door.position), 'D');
    }
    for spawn in &markers.spawns {
        let glyph = match spawn.role {
            SpawnRole::Player => '@',
            SpawnRole::WeaponPickup => 'w',
            SpawnRole::ItemPickup => '$',
        };
        overlay.insert(marker_cell(spawn.position), glyph);
    }

    let mut out = String::new();
    for y in (min.y..=max.y).rev() {
        for x in min.x..=max.x {
            let pos = Position::new(x, y);
            let glyph = if let Some(glyph) = overlay.get(&pos) {
                *glyph
            } else if grid.has_tile(Layer::WallLower, pos) {
                '#'
            } else if grid.has_tile(Layer::Floor, pos) {
                '.'
            } else {
                ' '
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn marker_cell(position: DVec2) -> Position {
    Position::new(position.x.floor() as i32, position.y.floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialId, SpawnMarker};

    #[test]
    fn test_render_small_grid() {
        let mut grid = TileGrid::new();
        for x in 0..3 {
            grid.set(Layer::Floor, Position::new(x, 0), MaterialId(0));
        }
        grid.set(Layer::WallLower, Position::new(0, 0), MaterialId(1));
        grid.set(Layer::WallLower, Position::new(1, 1), MaterialId(1));

        let mut markers = Markers::new();
        markers.spawns.push(SpawnMarker {
            position: DVec2::new(2.5, 0.5),
            role: SpawnRole::Player,
            room: 0,
        });

        let rendered = render_ascii(&grid, &markers);
        assert_eq!(rendered, " # \n#.@\n");
    }

    #[test]
    fn test_render_empty_grid() {
        assert!(render_ascii(&TileGrid::new(), &Markers::new()).is_empty());
    }
}
