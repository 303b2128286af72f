//! # Room Templates
//!
//! Prefab room content supplied by the host. A template is an opaque set of
//! occupied cells; once a layout is accepted each cell is stamped into the
//! dungeon as a wall stack, anchored on the room's centre.

use super::Room;
use crate::map::{Position, TileGrid, TilePalette};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Occupied cells of a prefab room, relative to the room centre plus `offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub offset: Position,
    pub cells: Vec<Position>,
}

impl RoomTemplate {
    pub fn new(offset: Position, cells: Vec<Position>) -> Self {
        Self { offset, cells }
    }

    /// Absolute cells this template covers when stamped into `room`.
    pub fn anchored_cells<'a>(&'a self, room: &Room) -> impl Iterator<Item = Position> + 'a {
        let anchor = room.cell_center() + self.offset;
        self.cells.iter().map(move |cell| anchor + *cell)
    }

    /// Copies the template into the grid as wall stacks.
    pub fn stamp(&self, room: &Room, grid: &mut TileGrid, palette: &TilePalette) {
        for cell in self.anchored_cells(room) {
            grid.place_wall(cell, palette);
        }
    }
}

/// Source of prefab content, keyed by archetype index.
pub trait RoomTemplateProvider {
    /// Gets the template for an archetype, if the host has one.
    fn template(&self, archetype: usize) -> Option<&RoomTemplate>;
}

/// Provider for hosts without prefab content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl RoomTemplateProvider for NoTemplates {
    fn template(&self, _archetype: usize) -> Option<&RoomTemplate> {
        None
    }
}

/// In-memory template table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateLibrary {
    templates: HashMap<usize, RoomTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template, returning the one it replaced.
    pub fn insert(&mut self, archetype: usize, template: RoomTemplate) -> Option<RoomTemplate> {
        self.templates.insert(archetype, template)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl RoomTemplateProvider for TemplateLibrary {
    fn template(&self, archetype: usize) -> Option<&RoomTemplate> {
        self.templates.get(&archetype)
    }
}
