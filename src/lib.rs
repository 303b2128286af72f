//! # Warren
//!
//! Procedural dungeon layout core for a top-down shooter.
//!
//! ## Architecture Overview
//!
//! Warren turns a handful of room archetypes into a sealed, fully connected
//! dungeon. A generation run is a retry loop over a fixed pipeline:
//!
//! - **Placement**: boss, item and enemy rooms are seeded on a ring around the
//!   origin, transition rooms on an expanding spiral
//! - **Separation**: overlapping rooms are pushed apart until the layout is stable
//! - **Graph**: rooms that share a long enough border become adjacent; every
//!   important room must be reachable from every other one
//! - **Stitching**: rooms that lie on no shortest path between important rooms are pruned
//! - **Tile emission**: floor, wall stack, hallway and background layers are written
//!   into a [`TileGrid`]
//! - **Closure**: a flood fill from outside the dungeon must never reach a floor tile
//!
//! The host engine consumes the resulting [`Dungeon`]: the room list, the
//! layered tile grid and the door/spawn markers.

pub mod generation;
pub mod map;
pub mod utils;

pub use generation::*;
pub use map::*;

/// Core error type for the Warren dungeon generator.
#[derive(thiserror::Error, Debug)]
pub enum WarrenError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation settings or content tables are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// More archetypes were requested from a pool than it holds
    #[error("Cannot draw {requested} rooms from the {pool} pool of {available}")]
    PoolExhausted {
        pool: &'static str,
        requested: usize,
        available: usize,
    },

    /// A finished dungeon violates a layout invariant
    #[error("Invalid dungeon state: {0}")]
    InvalidState(String),

    /// Theme name did not match any known theme
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// A single generation attempt was rejected and may be retried
    #[error("Attempt rejected: {0}")]
    Rejected(#[from] AttemptFailure),

    /// Every attempt was rejected; no dungeon was produced
    #[error("No layout accepted after {attempts} attempts (last failure: {last_failure})")]
    AttemptsExhausted {
        attempts: u32,
        last_failure: AttemptFailure,
    },
}

/// Result type used throughout the Warren codebase.
pub type WarrenResult<T> = Result<T, WarrenError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation constants.
pub mod config {
    /// Maximum number of full generation attempts per invocation
    pub const MAX_GENERATION_ATTEMPTS: u32 = 100;

    /// Maximum number of overlap separation passes per attempt
    pub const MAX_SEPARATION_PASSES: u32 = 1000;

    /// Minimum shared border length for two rooms to count as adjacent
    pub const MIN_ADJACENT_SEGMENT: u32 = 6;

    /// Hallway width in tiles, also the carve depth across a shared wall
    pub const HALLWAY_WIDTH: u32 = 4;

    /// Radial distance of boss, item and enemy rooms from the origin
    pub const PREFAB_DISTANCE: f64 = 30.0;

    /// Spiral radius growth per transition room
    pub const SPIRAL_STEP: f64 = 2.0;

    /// Padding of the background fill around all room footprints
    pub const BACKGROUND_PADDING: i32 = 15;

    /// Smallest room side the generator accepts
    pub const MIN_ROOM_SIZE: u32 = 8;

    /// Default flood-fill start for the closure check
    pub const CLOSURE_PROBE: (i32, i32) = (-1000, -1000);
}
