//! # Overlap Resolution
//!
//! Iterative pairwise separation of overlapping rooms.
//!
//! Each pass visits every overlapping pair once and pushes both rooms apart
//! along the axis of least overlap, half the overlap each, then snaps every
//! centre back onto the cell grid. Pair order shapes the final cluster but
//! a converged layout never has overlapping rooms.

use super::{geometry, AttemptFailure, Room};
use crate::{config, utils};
use glam::DVec2;
use rand::Rng;

/// Overlap Resolver with a bounded number of passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapResolver {
    pub max_passes: u32,
}

impl OverlapResolver {
    pub fn new(max_passes: u32) -> Self {
        Self { max_passes }
    }

    /// Separates the rooms in place.
    ///
    /// Returns the number of passes used, including the final clean pass, or
    /// [`AttemptFailure::SeparationExhausted`] when rooms still overlap after
    /// the last allowed pass.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        rooms: &mut [Room],
        rng: &mut R,
    ) -> Result<u32, AttemptFailure> {
        snap_all(rooms);

        for pass in 1..=self.max_passes {
            let mut overlapping = false;
            for i in 0..rooms.len() {
                for j in (i + 1)..rooms.len() {
                    if geometry::overlaps(&rooms[i], &rooms[j]) {
                        separate_pair(rooms, i, j, rng);
                        overlapping = true;
                    }
                }
            }
            snap_all(rooms);

            if !overlapping {
                log::trace!("rooms separated after {} passes", pass);
                return Ok(pass);
            }
        }

        Err(AttemptFailure::SeparationExhausted {
            passes: self.max_passes,
        })
    }
}

impl Default for OverlapResolver {
    fn default() -> Self {
        Self::new(config::MAX_SEPARATION_PASSES)
    }
}

fn snap_all(rooms: &mut [Room]) {
    for room in rooms.iter_mut() {
        room.snap_to_grid();
    }
}

/// Pushes rooms `i` and `j` apart by half their overlap each.
fn separate_pair<R: Rng + ?Sized>(rooms: &mut [Room], i: usize, j: usize, rng: &mut R) {
    let direction = geometry::separation_vector(&rooms[i], &rooms[j], rng);
    let (overlap_x, overlap_y) = geometry::overlap_extent(&rooms[i], &rooms[j]);

    let push = if overlap_x < overlap_y {
        DVec2::new(utils::sign_or_random(direction.x, rng) * overlap_x as f64 / 2.0, 0.0)
    } else {
        DVec2::new(0.0, utils::sign_or_random(direction.y, rng) * overlap_y as f64 / 2.0)
    };

    rooms[i].center += push;
    rooms[j].center -= push;
}
