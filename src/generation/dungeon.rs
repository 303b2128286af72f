//! # Dungeon Generation
//!
//! The generation orchestrator and its output.
//!
//! One attempt walks a fixed sequence of phases: placing rooms, separating
//! them, building the adjacency graph, checking that every important room is
//! reachable, stitching, emitting tiles and checking closure. A rejected
//! attempt throws away all of its state and the next attempt starts from a
//! fresh placement, up to the configured attempt ceiling. The caller either
//! gets a complete [`Dungeon`] or an error; partial layouts are never returned.

use super::{
    geometry, utils, ArchetypeCatalog, ClosureValidator, DungeonGraph, GenerationConfig,
    Generator, NoTemplates, OverlapResolver, Room, RoomPlanner, RoomTemplateProvider, RoomType,
    Theme, TileEmitter,
};
use crate::map::{Markers, Position, SpawnMarker, SpawnRole, TileGrid, TilePalette};
use crate::{WarrenError, WarrenResult};
use glam::DVec2;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

/// Reasons a single generation attempt is thrown away and retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// Rooms still overlapped when the separation budget ran out
    #[error("rooms still overlap after {passes} separation passes")]
    SeparationExhausted { passes: u32 },

    /// Some important rooms are cut off from the others
    #[error("important rooms {unreachable:?} are unreachable")]
    Disconnected { unreachable: Vec<u32> },

    /// The outside flood fill reached a floor tile
    #[error("wall perimeter breached at {breach:?}")]
    PerimeterBreached { breach: Position },
}

/// Phases of one generation attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    #[default]
    Placing,
    Separating,
    GraphBuilding,
    ConnectivityCheck,
    Stitching,
    TileEmission,
    ClosureCheck,
    Accepted,
    Rejected,
}

/// Mutable state owned by the attempt in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationState {
    pub rooms: Vec<Room>,
    /// Indices into `rooms` of the rooms that must stay connected
    pub important: Vec<usize>,
    pub graph: DungeonGraph,
    pub grid: TileGrid,
    pub markers: Markers,
    pub phase: GenerationPhase,
}

impl GenerationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every room, edge, tile and marker and rewinds to placement.
    pub fn reset(&mut self) {
        self.rooms.clear();
        self.important.clear();
        self.graph.clear();
        self.grid.clear();
        self.markers.clear();
        self.phase = GenerationPhase::Placing;
    }

    /// Checks whether the state holds nothing from a previous attempt.
    pub fn is_clear(&self) -> bool {
        self.rooms.is_empty()
            && self.important.is_empty()
            && self.graph.is_empty()
            && self.grid.is_empty()
            && self.markers.is_empty()
    }

    /// Drops every room outside `keep`, then re-derives the important
    /// indices and the graph for the remaining rooms.
    fn prune(&mut self, keep: &BTreeSet<usize>, min_segment: u32) {
        let before = self.rooms.len();
        let rooms = std::mem::take(&mut self.rooms);
        self.rooms = rooms
            .into_iter()
            .enumerate()
            .filter(|(index, _)| keep.contains(index))
            .map(|(_, room)| room)
            .collect();
        self.important = self
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.is_important())
            .map(|(index, _)| index)
            .collect();
        self.graph = DungeonGraph::build(&self.rooms, min_segment);

        log::debug!("pruned {} of {} rooms", before - self.rooms.len(), before);
    }
}

/// An accepted dungeon layout, ready for the host to instantiate.
#[derive(Debug, Clone, PartialEq)]
pub struct Dungeon {
    pub rooms: Vec<Room>,
    /// Indices into `rooms` of boss, enemy and item rooms
    pub important: Vec<usize>,
    pub graph: DungeonGraph,
    pub grid: TileGrid,
    pub markers: Markers,
    /// Centre of the room nearest the origin
    pub player_spawn: DVec2,
    /// Attempts used, including the accepted one
    pub attempts: u32,
}

impl Dungeon {
    pub fn important_rooms(&self) -> impl Iterator<Item = &Room> {
        self.important.iter().map(move |&index| &self.rooms[index])
    }

    pub fn rooms_of_type(&self, room_type: RoomType) -> impl Iterator<Item = &Room> {
        self.rooms
            .iter()
            .filter(move |room| room.room_type == room_type)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

/// Generation orchestrator.
///
/// Collaborators are handed in at construction: the archetype pools, the
/// materials to paint with and the source of prefab room content.
pub struct DungeonGenerator<'a> {
    catalog: ArchetypeCatalog,
    palette: TilePalette,
    templates: &'a dyn RoomTemplateProvider,
}

impl DungeonGenerator<'static> {
    /// Creates a generator for a built-in theme without prefab content.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use warren::generation::utils::create_rng;
    /// use warren::{DungeonGenerator, GenerationConfig, Generator, Theme};
    ///
    /// let generator = DungeonGenerator::for_theme(Theme::Hotel);
    /// let config = GenerationConfig::new(42);
    /// let mut rng = create_rng(&config);
    /// let dungeon = generator.generate(&config, &mut rng).unwrap();
    /// assert!(dungeon.important_rooms().count() >= 3);
    /// ```
    pub fn for_theme(theme: Theme) -> Self {
        Self::new(theme.catalog(), theme.palette(), &NoTemplates)
    }
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(
        catalog: ArchetypeCatalog,
        palette: TilePalette,
        templates: &'a dyn RoomTemplateProvider,
    ) -> Self {
        Self {
            catalog,
            palette,
            templates,
        }
    }

    pub fn catalog(&self) -> &ArchetypeCatalog {
        &self.catalog
    }

    pub fn palette(&self) -> &TilePalette {
        &self.palette
    }

    /// Runs one full attempt on a cleared state.
    ///
    /// Recoverable failures come back as [`WarrenError::Rejected`] with
    /// `state.phase` left at the phase that failed. On success the phase is
    /// [`GenerationPhase::Accepted`].
    pub fn run_attempt(
        &self,
        config: &GenerationConfig,
        state: &mut GenerationState,
        rng: &mut StdRng,
    ) -> WarrenResult<()> {
        state.phase = GenerationPhase::Placing;
        let plan = RoomPlanner::new(config, &self.catalog).plan(rng)?;
        state.rooms = plan.rooms;
        state.important = plan.important;

        state.phase = GenerationPhase::Separating;
        OverlapResolver::new(config.max_separation_passes).resolve(&mut state.rooms, rng)?;

        self.assemble(config, state)
    }

    /// Runs every phase after separation on the rooms already in `state`:
    /// graph building, the connectivity gate, stitching, tile emission and
    /// the closure check.
    fn assemble(
        &self,
        config: &GenerationConfig,
        state: &mut GenerationState,
    ) -> WarrenResult<()> {
        state.phase = GenerationPhase::GraphBuilding;
        state.graph = DungeonGraph::build(&state.rooms, config.min_adjacent_segment);

        state.phase = GenerationPhase::ConnectivityCheck;
        let unreachable = state.graph.unreachable_important(&state.important);
        if !unreachable.is_empty() {
            let unreachable = unreachable
                .into_iter()
                .map(|index| state.rooms[index].id)
                .collect();
            return Err(AttemptFailure::Disconnected { unreachable }.into());
        }

        state.phase = GenerationPhase::Stitching;
        let keep = state.graph.stitch(&state.important);
        state.prune(&keep, config.min_adjacent_segment);

        state.phase = GenerationPhase::TileEmission;
        TileEmitter::new(&self.palette, config.hallway_width, config.background_padding).emit(
            &state.rooms,
            &state.graph,
            &mut state.grid,
            &mut state.markers,
        );

        state.phase = GenerationPhase::ClosureCheck;
        ClosureValidator::new(config.closure_probe).check(&state.grid)?;

        state.phase = GenerationPhase::Accepted;
        Ok(())
    }

    /// Stamps prefab content and spawn markers into an accepted state.
    fn finish(&self, mut state: GenerationState, attempts: u32) -> Dungeon {
        for room in &state.rooms {
            let template = room
                .archetype
                .and_then(|archetype| self.templates.template(archetype));
            if let Some(template) = template {
                template.stamp(room, &mut state.grid, &self.palette);
            }
        }

        let player_spawn = place_spawns(&state.rooms, &mut state.markers).unwrap_or_default();

        log::info!(
            "accepted dungeon after {} attempts: {} rooms, {} doors",
            attempts,
            state.rooms.len(),
            state.markers.doors.len()
        );

        Dungeon {
            rooms: state.rooms,
            important: state.important,
            graph: state.graph,
            grid: state.grid,
            markers: state.markers,
            player_spawn,
            attempts,
        }
    }
}

impl Generator<Dungeon> for DungeonGenerator<'_> {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WarrenResult<Dungeon> {
        config.validate()?;
        self.catalog.validate(config)?;

        let mut state = GenerationState::new();
        let mut last_failure = None;

        for attempt in 1..=config.max_attempts {
            state.reset();
            match self.run_attempt(config, &mut state, rng) {
                Ok(()) => return Ok(self.finish(state, attempt)),
                Err(WarrenError::Rejected(failure)) => {
                    log::debug!(
                        "attempt {} rejected during {:?}: {}",
                        attempt,
                        state.phase,
                        failure
                    );
                    state.phase = GenerationPhase::Rejected;
                    last_failure = Some(failure);
                }
                Err(err) => return Err(err),
            }
        }

        let Some(last_failure) = last_failure else {
            return Err(WarrenError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        };
        log::error!(
            "no dungeon accepted after {} attempts: {}",
            config.max_attempts,
            last_failure
        );
        Err(WarrenError::AttemptsExhausted {
            attempts: config.max_attempts,
            last_failure,
        })
    }

    fn validate(&self, dungeon: &Dungeon, config: &GenerationConfig) -> WarrenResult<()> {
        for (i, a) in dungeon.rooms.iter().enumerate() {
            for b in &dungeon.rooms[i + 1..] {
                if geometry::overlaps(a, b) {
                    return Err(WarrenError::InvalidState(format!(
                        "rooms {} and {} overlap",
                        a.id, b.id
                    )));
                }
            }
        }

        if !dungeon.graph.is_symmetric() {
            return Err(WarrenError::InvalidState(
                "adjacency graph is not symmetric".to_string(),
            ));
        }
        if dungeon.graph != DungeonGraph::build(&dungeon.rooms, config.min_adjacent_segment) {
            return Err(WarrenError::InvalidState(
                "adjacency graph does not match room geometry".to_string(),
            ));
        }

        let unreachable = dungeon.graph.unreachable_important(&dungeon.important);
        if !unreachable.is_empty() {
            let unreachable = unreachable
                .into_iter()
                .map(|index| dungeon.rooms[index].id)
                .collect();
            return Err(AttemptFailure::Disconnected { unreachable }.into());
        }

        ClosureValidator::new(config.closure_probe).check(&dungeon.grid)?;

        if dungeon.markers.player_spawn().is_none() {
            return Err(WarrenError::InvalidState(
                "dungeon has no player spawn".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

/// Adds player, weapon and item spawn markers. Returns the player spawn
/// position, or `None` when there are no rooms.
fn place_spawns(rooms: &[Room], markers: &mut Markers) -> Option<DVec2> {
    let spawn_room = &rooms[utils::room_nearest_origin(rooms)?];
    markers.spawns.push(SpawnMarker {
        position: spawn_room.center,
        role: SpawnRole::Player,
        room: spawn_room.id,
    });

    let quarter = spawn_room.width as f64 / 4.0;
    for dx in [-quarter, quarter] {
        markers.spawns.push(SpawnMarker {
            position: spawn_room.center + DVec2::new(dx, 0.0),
            role: SpawnRole::WeaponPickup,
            room: spawn_room.id,
        });
    }

    for room in rooms.iter().filter(|room| room.room_type == RoomType::Item) {
        markers.spawns.push(SpawnMarker {
            position: room.center,
            role: SpawnRole::ItemPickup,
            room: room.id,
        });
    }

    Some(spawn_room.center)
}
