//! # Dungeon Graph
//!
//! Room adjacency, reachability and the stitching step that decides which
//! rooms survive pruning.
//!
//! Adjacency is derived from geometry only, so the graph is rebuilt whenever
//! room positions or the room list change. Neighbour sets are ordered, which
//! makes the shortest path picked between two rooms stable for a given layout.

use super::{geometry, Room};
use pathfinding::prelude::{bfs, bfs_reach};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Symmetric adjacency relation over room indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DungeonGraph {
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
}

impl DungeonGraph {
    /// Builds the graph for a room list: `i` and `j` are linked when they
    /// share a border of at least `min_segment` cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::DVec2;
    /// use warren::{DungeonGraph, Room, RoomType};
    ///
    /// let rooms = vec![
    ///     Room::new(0, DVec2::new(0.0, 0.0), 10, 10, RoomType::Boss),
    ///     Room::new(1, DVec2::new(10.0, 0.0), 10, 10, RoomType::Passageway),
    ///     Room::new(2, DVec2::new(40.0, 0.0), 10, 10, RoomType::Item),
    /// ];
    /// let graph = DungeonGraph::build(&rooms, 6);
    /// assert!(graph.are_adjacent(0, 1));
    /// assert!(!graph.are_adjacent(1, 2));
    /// ```
    pub fn build(rooms: &[Room], min_segment: u32) -> Self {
        let mut adjacency: BTreeMap<usize, BTreeSet<usize>> =
            (0..rooms.len()).map(|i| (i, BTreeSet::new())).collect();

        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                if geometry::are_adjacent(&rooms[i], &rooms[j], min_segment) {
                    adjacency.entry(i).or_default().insert(j);
                    adjacency.entry(j).or_default().insert(i);
                }
            }
        }

        Self { adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbours of a room in ascending index order.
    pub fn neighbors(&self, room: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(&room)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Every edge once, as `(low, high)` index pairs.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .flat_map(|(&a, set)| set.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Checks that every edge is stored in both directions.
    pub fn is_symmetric(&self) -> bool {
        self.adjacency
            .iter()
            .all(|(&a, set)| set.iter().all(|&b| self.are_adjacent(b, a)))
    }

    /// All rooms reachable from `start`, including `start`.
    pub fn reachable_from(&self, start: usize) -> HashSet<usize> {
        bfs_reach(start, |&room| self.neighbors(room).collect::<Vec<_>>()).collect()
    }

    /// Important rooms not reachable from the first important room.
    pub fn unreachable_important(&self, important: &[usize]) -> Vec<usize> {
        let Some(&first) = important.first() else {
            return Vec::new();
        };
        let reached = self.reachable_from(first);
        important
            .iter()
            .copied()
            .filter(|room| !reached.contains(room))
            .collect()
    }

    /// Checks that every important room can reach every other one.
    pub fn important_connected(&self, important: &[usize]) -> bool {
        self.unreachable_important(important).is_empty()
    }

    /// A shortest path from `start` to `goal`, both ends included.
    pub fn shortest_path(&self, start: usize, goal: usize) -> Option<Vec<usize>> {
        bfs(
            &start,
            |&room| self.neighbors(room).collect::<Vec<_>>(),
            |&room| room == goal,
        )
    }

    /// Rooms to keep when stitching: every important room, plus every room
    /// on the shortest path found between each ordered pair of important rooms.
    pub fn stitch(&self, important: &[usize]) -> BTreeSet<usize> {
        let mut keep: BTreeSet<usize> = important.iter().copied().collect();
        for &start in important {
            for &goal in important {
                if start == goal {
                    continue;
                }
                if let Some(path) = self.shortest_path(start, goal) {
                    keep.extend(path);
                }
            }
        }
        keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoomType;
    use glam::DVec2;

    fn room(id: u32, x: f64, y: f64, room_type: RoomType) -> Room {
        Room::new(id, DVec2::new(x, y), 10, 10, room_type)
    }

    /// Boss - P - P - Item in a row, with a dead-end passageway hanging off
    /// the first passageway and an isolated passageway far away.
    fn corridor_rooms() -> Vec<Room> {
        vec![
            room(0, 0.0, 0.0, RoomType::Boss),
            room(1, 10.0, 0.0, RoomType::Passageway),
            room(2, 20.0, 0.0, RoomType::Passageway),
            room(3, 30.0, 0.0, RoomType::Item),
            room(4, 10.0, 10.0, RoomType::Passageway),
            room(5, 100.0, 100.0, RoomType::Passageway),
        ]
    }

    #[test]
    fn test_graph_adjacency_is_symmetric() {
        let graph = DungeonGraph::build(&corridor_rooms(), 6);
        assert!(graph.is_symmetric());
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2), (1, 4), (2, 3)]);
        for (a, b) in graph.edges() {
            assert!(graph.are_adjacent(a, b));
            assert!(graph.are_adjacent(b, a));
        }
    }

    #[test]
    fn test_reachability() {
        let graph = DungeonGraph::build(&corridor_rooms(), 6);
        let reached = graph.reachable_from(0);
        assert_eq!(reached.len(), 5);
        assert!(!reached.contains(&5));

        assert!(graph.important_connected(&[0, 3]));
        assert_eq!(graph.unreachable_important(&[0, 3, 5]), vec![5]);
        assert!(graph.important_connected(&[]));
    }

    #[test]
    fn test_shortest_path() {
        let graph = DungeonGraph::build(&corridor_rooms(), 6);
        assert_eq!(graph.shortest_path(0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(graph.shortest_path(3, 0), Some(vec![3, 2, 1, 0]));
        assert_eq!(graph.shortest_path(0, 5), None);
    }

    #[test]
    fn test_stitch_drops_dead_ends() {
        let graph = DungeonGraph::build(&corridor_rooms(), 6);
        let keep = graph.stitch(&[0, 3]);
        assert_eq!(keep.into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_stitch_keeps_lone_important_room() {
        let graph = DungeonGraph::build(&corridor_rooms(), 6);
        let keep = graph.stitch(&[3]);
        assert_eq!(keep.into_iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_clear() {
        let mut graph = DungeonGraph::build(&corridor_rooms(), 6);
        assert!(graph.edge_count() > 0);
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
