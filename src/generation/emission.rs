//! # Tile Emission
//!
//! Writes a finalized room set into the layered tile grid.
//!
//! Pass order matters: floors first so every room footprint exists, then the
//! wall stack on each room's inner border, then hallways, which carve through
//! walls already placed, and finally the background fill.

use super::{geometry, DungeonGraph, Room, RoomType, SharedBorder};
use crate::map::{
    DoorMarker, HallwayOrientation, Layer, Markers, Position, TileGrid, TilePalette,
};
use glam::DVec2;
use std::collections::HashSet;

/// Tile Emitter for one palette and hallway width.
#[derive(Debug, Clone, Copy)]
pub struct TileEmitter<'a> {
    palette: &'a TilePalette,
    hallway_width: u32,
    background_padding: i32,
}

impl<'a> TileEmitter<'a> {
    pub fn new(palette: &'a TilePalette, hallway_width: u32, background_padding: i32) -> Self {
        Self {
            palette,
            hallway_width,
            background_padding,
        }
    }

    /// Runs every pass, writing tiles into `grid` and door markers into `markers`.
    pub fn emit(
        &self,
        rooms: &[Room],
        graph: &DungeonGraph,
        grid: &mut TileGrid,
        markers: &mut Markers,
    ) {
        let footprint = self.place_floors(rooms, grid);
        self.place_walls(rooms, grid);

        for (a, b) in graph.edges() {
            let Some(border) = geometry::shared_border(&rooms[a], &rooms[b]) else {
                continue;
            };
            if let Some(door) = self.carve_hallway(&rooms[a], &rooms[b], &border, grid) {
                markers.doors.push(door);
            }
        }

        self.place_background(&footprint, grid);
    }

    /// Floor on every room cell. Returns the union of all room footprints.
    pub fn place_floors(&self, rooms: &[Room], grid: &mut TileGrid) -> HashSet<Position> {
        let mut footprint = HashSet::new();
        for room in rooms {
            for cell in room.cell_rect().cells() {
                grid.set(Layer::Floor, cell, self.palette.floor);
                footprint.insert(cell);
            }
        }
        footprint
    }

    /// Wall stack on every cell of a room that borders the outside of that
    /// same room.
    pub fn place_walls(&self, rooms: &[Room], grid: &mut TileGrid) {
        for room in rooms {
            for cell in room.cell_rect().cells() {
                if room.is_border_cell(cell) {
                    grid.place_wall(cell, self.palette);
                }
            }
        }
    }

    /// Carves a straight hallway across the shared border, centred on the
    /// shared span and `hallway_width` cells deep starting at the wall line.
    ///
    /// Returns a door marker unless both rooms are passageways.
    pub fn carve_hallway(
        &self,
        a: &Room,
        b: &Room,
        border: &SharedBorder,
        grid: &mut TileGrid,
    ) -> Option<DoorMarker> {
        let width = self.hallway_width as i32;
        let start = (border.span_start + border.span_end + 1).div_euclid(2) - width / 2;

        for across in start..start + width {
            for depth in 0..width {
                let along = border.wall_line + depth;
                let cell = match border.orientation {
                    HallwayOrientation::Horizontal => Position::new(along, across),
                    HallwayOrientation::Vertical => Position::new(across, along),
                };
                grid.carve(cell, self.palette);
            }
        }

        if a.room_type == RoomType::Passageway && b.room_type == RoomType::Passageway {
            return None;
        }

        let middle = start as f64 + width as f64 / 2.0;
        let line = border.wall_line as f64 + 1.0;
        let position = match border.orientation {
            HallwayOrientation::Horizontal => DVec2::new(line, middle),
            HallwayOrientation::Vertical => DVec2::new(middle, line),
        };
        Some(DoorMarker {
            position,
            rooms: (a.id, b.id),
            orientation: border.orientation,
        })
    }

    /// Roof tiles over every non-room cell of the padded bounding box, raised
    /// by the same two cells as the roof of a wall stack.
    pub fn place_background(&self, footprint: &HashSet<Position>, grid: &mut TileGrid) {
        let Some(first) = footprint.iter().next() else {
            return;
        };
        let (min, max) = footprint.iter().fold((*first, *first), |(min, max), pos| {
            (
                Position::new(min.x.min(pos.x), min.y.min(pos.y)),
                Position::new(max.x.max(pos.x), max.y.max(pos.y)),
            )
        });

        let pad = self.background_padding;
        for x in (min.x - pad)..=(max.x + pad) {
            for y in (min.y - pad)..=(max.y + pad) {
                let pos = Position::new(x, y);
                if !footprint.contains(&pos) {
                    grid.set(Layer::Roof, pos.offset(0, 2), self.palette.roof);
                }
            }
        }
    }
}
