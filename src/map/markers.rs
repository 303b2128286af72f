//! # Markers
//!
//! Point entities the host instantiates on top of the tile grid: doors on
//! hallways and spawn points for the player and pickups.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Direction a carved hallway runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HallwayOrientation {
    /// Rooms sit side by side; the hallway runs along x
    Horizontal,
    /// Rooms are stacked; the hallway runs along y
    Vertical,
}

/// Door placed at the midpoint of a hallway between two rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorMarker {
    pub position: DVec2,
    /// Ids of the two rooms the hallway joins
    pub rooms: (u32, u32),
    pub orientation: HallwayOrientation,
}

/// What a spawn marker spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnRole {
    Player,
    WeaponPickup,
    ItemPickup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnMarker {
    pub position: DVec2,
    pub role: SpawnRole,
    /// Id of the room the marker sits in
    pub room: u32,
}

/// All markers produced by one generation attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Markers {
    pub doors: Vec<DoorMarker>,
    pub spawns: Vec<SpawnMarker>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the spawn markers with the given role.
    pub fn spawns_with_role(&self, role: SpawnRole) -> impl Iterator<Item = &SpawnMarker> {
        self.spawns.iter().filter(move |marker| marker.role == role)
    }

    /// Gets the player spawn marker, if one was placed.
    pub fn player_spawn(&self) -> Option<&SpawnMarker> {
        self.spawns_with_role(SpawnRole::Player).next()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty() && self.spawns.is_empty()
    }

    pub fn clear(&mut self) {
        self.doors.clear();
        self.spawns.clear();
    }
}
