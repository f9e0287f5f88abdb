// Unweighted shortest-path search over a room graph.
//
// Every exit costs one hop, so plain breadth-first search finds a shortest
// path. Edges with no destination are never followed.
//
// Ties between equal-length paths are broken by discovery order. That order
// is fixed by the graph's sorted adjacency lists (see `graph.rs`), so
// repeated queries over the same graph return the same path.
//
// See also: `graph.rs` for the graph being searched, `access.rs` for the
// per-actor subgraph it is normally run on, `topography.rs` which resolves
// objects to rooms before calling in.
//
// **Critical constraint: determinism.** BFS here must be a pure function of
// the graph and the endpoints. No hash-ordered iteration.

use crate::graph::{NavEdge, RoomGraph};
use crate::types::{EntityId, ExitId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A route between two rooms. Empty when there is no route or when the
/// endpoints coincide.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// Rooms from source to target, inclusive. Empty for an empty path.
    pub rooms: Vec<EntityId>,
    /// One edge per hop (`rooms.len() - 1` of them).
    pub edges: Vec<NavEdge>,
}

impl PathResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Direction keys to follow, in order.
    pub fn directions(&self) -> Vec<&str> {
        self.edges.iter().map(|edge| edge.key.as_str()).collect()
    }

    /// Exits to take, in order.
    pub fn exits(&self) -> Vec<ExitId> {
        self.edges.iter().map(|edge| edge.exit).collect()
    }

    /// The exit to take first.
    pub fn first_step(&self) -> Option<&NavEdge> {
        self.edges.first()
    }
}

/// Find a shortest path from `source` to `target` by BFS.
///
/// Returns an empty result if `source == target`, if either endpoint is not
/// in the graph, or if `target` is unreachable.
pub fn shortest_path(graph: &RoomGraph, source: EntityId, target: EntityId) -> PathResult {
    if source == target || !graph.contains(source) || !graph.contains(target) {
        return PathResult::empty();
    }

    // came_from[node] = edge used to first reach node.
    let mut came_from: FxHashMap<EntityId, &NavEdge> = FxHashMap::default();
    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        for (next, edge) in graph.successors(current) {
            if next == source || came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, edge);
            if next == target {
                return reconstruct_path(&came_from, source, target);
            }
            queue.push_back(next);
        }
    }

    PathResult::empty()
}

/// Walk `came_from` back from the target.
fn reconstruct_path(
    came_from: &FxHashMap<EntityId, &NavEdge>,
    source: EntityId,
    target: EntityId,
) -> PathResult {
    let mut rooms = vec![target];
    let mut edges = Vec::new();
    let mut current = target;

    while current != source {
        let Some(&edge) = came_from.get(&current) else {
            break;
        };
        edges.push(edge.clone());
        current = edge.origin;
        rooms.push(current);
    }

    rooms.reverse();
    edges.reverse();
    PathResult { rooms, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ExitRecord;

    fn build(exits: &[(u64, u64, &str)]) -> RoomGraph {
        let mut graph = RoomGraph::new();
        for (i, &(from, to, key)) in exits.iter().enumerate() {
            graph.upsert_exit(&ExitRecord {
                id: ExitId(i as u64 + 1),
                origin: Some(EntityId(from)),
                destination: Some(EntityId(to)),
                key: key.to_string(),
            });
        }
        graph
    }

    #[test]
    fn trivial_path_is_empty() {
        let graph = build(&[(1, 2, "east")]);
        let result = shortest_path(&graph, EntityId(1), EntityId(1));
        assert!(result.is_empty());
        assert!(result.rooms.is_empty());
    }

    #[test]
    fn simple_chain() {
        let graph = build(&[(1, 2, "east"), (2, 3, "north")]);
        let result = shortest_path(&graph, EntityId(1), EntityId(3));
        assert_eq!(result.rooms, vec![EntityId(1), EntityId(2), EntityId(3)]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.directions(), vec!["east", "north"]);
        assert_eq!(result.exits(), vec![ExitId(1), ExitId(2)]);
        assert_eq!(result.first_step().map(|e| e.exit), Some(ExitId(1)));
    }

    #[test]
    fn chooses_fewest_hops() {
        // Long way round 1 -> 2 -> 3 -> 4, short cut 1 -> 4.
        let graph = build(&[(1, 2, "north"), (2, 3, "north"), (3, 4, "east"), (1, 4, "east")]);
        let result = shortest_path(&graph, EntityId(1), EntityId(4));
        assert_eq!(result.len(), 1);
        assert_eq!(result.directions(), vec!["east"]);
    }

    #[test]
    fn respects_edge_direction() {
        let graph = build(&[(1, 2, "east")]);
        assert!(shortest_path(&graph, EntityId(2), EntityId(1)).is_empty());
    }

    #[test]
    fn unknown_endpoints_give_empty_path() {
        let graph = build(&[(1, 2, "east")]);
        assert!(shortest_path(&graph, EntityId(9), EntityId(2)).is_empty());
        assert!(shortest_path(&graph, EntityId(1), EntityId(9)).is_empty());
    }

    #[test]
    fn unwired_exits_are_not_followed() {
        let mut graph = build(&[(1, 2, "east")]);
        graph.upsert_exit(&ExitRecord {
            id: ExitId(50),
            origin: Some(EntityId(2)),
            destination: None,
            key: "north".into(),
        });
        let result = shortest_path(&graph, EntityId(1), EntityId(2));
        assert_eq!(result.len(), 1);
        assert!(result.edges.iter().all(|e| e.destination.is_some()));
    }

    #[test]
    fn handles_cycles() {
        let graph = build(&[(1, 2, "east"), (2, 1, "west"), (2, 3, "east"), (3, 2, "west")]);
        let result = shortest_path(&graph, EntityId(3), EntityId(1));
        assert_eq!(result.rooms, vec![EntityId(3), EntityId(2), EntityId(1)]);
    }

    #[test]
    fn deterministic_tie_break() {
        // Two 2-hop routes: via 2 and via 3. Lower id is discovered first.
        let graph = build(&[(1, 3, "north"), (1, 2, "east"), (3, 4, "east"), (2, 4, "north")]);
        let r1 = shortest_path(&graph, EntityId(1), EntityId(4));
        let r2 = shortest_path(&graph, EntityId(1), EntityId(4));
        assert_eq!(r1, r2);
        assert_eq!(r1.rooms, vec![EntityId(1), EntityId(2), EntityId(4)]);
    }
}
