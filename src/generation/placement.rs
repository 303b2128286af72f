//! # Room Placement
//!
//! Seeds the initial, possibly overlapping, room set.
//!
//! Prefab rooms (boss, items, enemies) start on a ring around the origin at
//! an angle set by their role, which spreads them in different directions
//! before separation pulls everything into a cluster. Transition rooms start
//! on an expanding spiral from the origin.

use super::{draw_without_replacement, Archetype, ArchetypeCatalog, GenerationConfig, Room, RoomType};
use crate::utils::{polar, random_angle};
use crate::{WarrenError, WarrenResult};
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Initial room set and the indices of the rooms that must stay connected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementPlan {
    pub rooms: Vec<Room>,
    pub important: Vec<usize>,
}

impl PlacementPlan {
    fn push(&mut self, room: Room) {
        if room.is_important() {
            self.important.push(self.rooms.len());
        }
        self.rooms.push(room);
    }

    fn next_id(&self) -> u32 {
        self.rooms.len() as u32
    }
}

/// Room Placement Planner.
#[derive(Debug, Clone, Copy)]
pub struct RoomPlanner<'a> {
    config: &'a GenerationConfig,
    catalog: &'a ArchetypeCatalog,
}

impl<'a> RoomPlanner<'a> {
    pub fn new(config: &'a GenerationConfig, catalog: &'a ArchetypeCatalog) -> Self {
        Self { config, catalog }
    }

    /// Draws archetypes from the pools and places every room.
    ///
    /// Order is boss, items, enemies, then transition rooms; room ids follow
    /// that order.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> WarrenResult<PlacementPlan> {
        if self.catalog.boss.is_empty() {
            return Err(WarrenError::PoolExhausted {
                pool: "boss",
                requested: 1,
                available: 0,
            });
        }
        let boss = self.catalog.boss[rng.gen_range(0..self.catalog.boss.len())];
        let mut item_pool = self.catalog.item.clone();
        let items = draw_without_replacement("item", &mut item_pool, self.config.item_rooms, rng)?;
        let mut enemy_pool = self.catalog.enemy.clone();
        let enemies =
            draw_without_replacement("enemy", &mut enemy_pool, self.config.enemy_rooms, rng)?;

        let mut plan = PlacementPlan::default();

        self.place_prefab(&mut plan, boss, RoomType::Boss, FRAC_PI_2);
        let fan = self.config.item_rooms as f64 + 1.0;
        for item in items {
            let angle = FRAC_PI_2 + TAU * plan.rooms.len() as f64 / fan;
            self.place_prefab(&mut plan, item, RoomType::Item, angle);
        }
        for enemy in enemies {
            let angle = random_angle(rng);
            self.place_prefab(&mut plan, enemy, RoomType::Enemy, angle);
        }

        for step in 0..self.config.transition_rooms {
            let center = polar(random_angle(rng), step as f64 * self.config.spiral_step);
            let width = self.transition_side(rng);
            let height = self.transition_side(rng);
            let room = Room::new(plan.next_id(), center, width, height, RoomType::Passageway);
            plan.push(room);
        }

        log::trace!(
            "planned {} rooms ({} important)",
            plan.rooms.len(),
            plan.important.len()
        );
        Ok(plan)
    }

    fn place_prefab(&self, plan: &mut PlacementPlan, archetype: Archetype, room_type: RoomType, angle: f64) {
        let center = polar(angle, self.config.prefab_distance);
        let room = Room::new(plan.next_id(), center, archetype.width, archetype.height, room_type)
            .with_archetype(archetype.index);
        plan.push(room);
    }

    fn transition_side<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let base = i64::from(self.config.transition_room_size);
        let variation = i64::from(self.config.transition_room_variation);
        (base + rng.gen_range(-variation..=variation)).max(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use crate::Theme;
    use glam::DVec2;
    use std::collections::HashSet;

    #[test]
    fn test_plan_room_counts_and_important_set() {
        let config = GenerationConfig::new(7);
        let catalog = Theme::Hotel.catalog();
        let mut rng = create_rng(&config);
        let plan = RoomPlanner::new(&config, &catalog).plan(&mut rng).unwrap();

        assert_eq!(plan.rooms.len(), 1 + 2 + 5 + 5);
        assert_eq!(plan.important, (0..8).collect::<Vec<_>>());
        assert_eq!(plan.rooms[0].room_type, RoomType::Boss);
        assert!(plan.rooms[1..3].iter().all(|r| r.room_type == RoomType::Item));
        assert!(plan.rooms[3..8].iter().all(|r| r.room_type == RoomType::Enemy));
        assert!(plan.rooms[8..].iter().all(|r| r.room_type == RoomType::Passageway));

        let ids: Vec<u32> = plan.rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, (0..13).collect::<Vec<u32>>());
    }

    #[test]
    fn test_prefab_angles() {
        let config = GenerationConfig::new(11);
        let catalog = Theme::Hotel.catalog();
        let mut rng = create_rng(&config);
        let plan = RoomPlanner::new(&config, &catalog).plan(&mut rng).unwrap();

        let boss = &plan.rooms[0];
        assert!(boss.center.x.abs() < 1e-9);
        assert!((boss.center.y - 30.0).abs() < 1e-9);
        assert!(boss.archetype.is_some_and(|index| index < 2));

        // Items fan out 120 degrees apart, 120 degrees either side of the boss
        let angle = |u: DVec2, v: DVec2| u.normalize().dot(v.normalize()).clamp(-1.0, 1.0).acos();
        let a = plan.rooms[1].center;
        let b = plan.rooms[2].center;
        assert!((angle(a, b) - TAU / 3.0).abs() < 1e-9);
        assert!((angle(boss.center, a) - TAU / 3.0).abs() < 1e-9);
        assert!((angle(boss.center, b) - TAU / 3.0).abs() < 1e-9);

        for room in &plan.rooms[..8] {
            assert!((room.center.length() - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_prefab_draws_are_distinct() {
        let config = GenerationConfig {
            enemy_rooms: 10,
            item_rooms: 4,
            ..GenerationConfig::new(5)
        };
        let catalog = Theme::Subway.catalog();
        let mut rng = create_rng(&config);
        let plan = RoomPlanner::new(&config, &catalog).plan(&mut rng).unwrap();

        let archetypes: HashSet<usize> = plan.rooms.iter().filter_map(|r| r.archetype).collect();
        assert_eq!(archetypes.len(), 1 + 4 + 10);
    }

    #[test]
    fn test_transition_spiral_and_sizes() {
        let config = GenerationConfig::new(3);
        let catalog = Theme::Hotel.catalog();
        let mut rng = create_rng(&config);
        let plan = RoomPlanner::new(&config, &catalog).plan(&mut rng).unwrap();

        for (step, room) in plan.rooms[8..].iter().enumerate() {
            assert!((room.center.length() - step as f64 * 2.0).abs() < 1e-9);
            assert!((25..=35).contains(&room.width));
            assert!((25..=35).contains(&room.height));
            assert!(room.archetype.is_none());
        }
        assert_eq!(plan.rooms[8].center.length(), 0.0);
    }

    #[test]
    fn test_oversized_enemy_request_fails() {
        let config = GenerationConfig {
            enemy_rooms: 11,
            ..GenerationConfig::new(3)
        };
        let catalog = Theme::Hotel.catalog();
        let mut rng = create_rng(&config);
        let result = RoomPlanner::new(&config, &catalog).plan(&mut rng);
        assert!(matches!(
            result,
            Err(WarrenError::PoolExhausted { pool: "enemy", .. })
        ));
    }
}
