// Directed room graph built from world exits.
//
// A `RoomGraph` is a set of rooms (`EntityId`s) connected by `NavEdge`s,
// one per `(origin, destination)` pair. Re-inserting the same pair
// overwrites the stored exit and key; it never duplicates the edge. Edges
// whose destination is unset are kept so that the diagnostic dump shows
// unwired exits, but searches never follow them.
//
// Storage:
// - `nodes`: `BTreeSet`. Every endpoint of every edge is a member.
// - `edges`: `BTreeMap` keyed by `(origin, destination)`, iterated in key order.
// - `outgoing`: `FxHashMap` from origin to its edge keys for O(1) adjacency.
//   Each list is kept sorted by destination, so BFS discovery order does not
//   depend on hash order or insertion order.
//
// See also: `store.rs` which owns the canonical graph, `access.rs` which
// derives per-actor subgraphs, `pathfinding.rs` and `minimap.rs` which
// search them.
//
// **Critical constraint: determinism.** Identical edge sets must yield
// identical iteration order regardless of insertion order. Never iterate
// `outgoing` directly.

use crate::types::{Direction, EntityId, ExitId};
use crate::world::ExitRecord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Edge identity within a graph.
pub type EdgeKey = (EntityId, Option<EntityId>);

/// A directed edge: one exit leading from `origin` to `destination`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEdge {
    /// The exit entity that owns this connection.
    pub exit: ExitId,
    pub origin: EntityId,
    pub destination: Option<EntityId>,
    /// Direction key as the world spells it.
    pub key: String,
    /// `key` parsed once at insertion.
    pub direction: Direction,
}

impl NavEdge {
    pub fn from_record(record: &ExitRecord) -> Option<Self> {
        let origin = record.origin?;
        Some(Self {
            exit: record.id,
            origin,
            destination: record.destination,
            key: record.key.clone(),
            direction: Direction::from_key(&record.key),
        })
    }

    pub fn edge_key(&self) -> EdgeKey {
        (self.origin, self.destination)
    }
}

/// The room graph container.
#[derive(Clone, Debug, Default)]
pub struct RoomGraph {
    nodes: BTreeSet<EntityId>,
    edges: BTreeMap<EdgeKey, NavEdge>,
    outgoing: FxHashMap<EntityId, SmallVec<[EdgeKey; 8]>>,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the edge for an exit record. Returns `false`
    /// (and changes nothing) if the record has no origin.
    pub fn upsert_exit(&mut self, record: &ExitRecord) -> bool {
        match NavEdge::from_record(record) {
            Some(edge) => {
                self.insert_edge(edge);
                true
            }
            None => false,
        }
    }

    /// Insert an edge, replacing any edge with the same endpoints.
    pub fn insert_edge(&mut self, edge: NavEdge) {
        let key = edge.edge_key();
        self.nodes.insert(edge.origin);
        if let Some(dest) = edge.destination {
            self.nodes.insert(dest);
        }
        if self.edges.insert(key, edge).is_none() {
            let list = self.outgoing.entry(key.0).or_default();
            let pos = list.binary_search(&key).unwrap_or_else(|p| p);
            list.insert(pos, key);
        }
    }

    /// Add an isolated node.
    pub fn add_node(&mut self, node: EntityId) {
        self.nodes.insert(node);
    }

    pub fn contains(&self, node: EntityId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in id order.
    pub fn nodes(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes.iter().copied()
    }

    /// All edges, in `(origin, destination)` order.
    pub fn edges(&self) -> impl Iterator<Item = &NavEdge> {
        self.edges.values()
    }

    pub fn edge(&self, origin: EntityId, destination: Option<EntityId>) -> Option<&NavEdge> {
        self.edges.get(&(origin, destination))
    }

    /// Edges leaving `node`, ordered by destination.
    pub fn outgoing(&self, node: EntityId) -> impl Iterator<Item = &NavEdge> {
        self.outgoing
            .get(&node)
            .into_iter()
            .flat_map(|keys| keys.iter())
            .filter_map(|key| self.edges.get(key))
    }

    /// Edges leaving `node` that lead somewhere, as `(destination, edge)`.
    pub fn successors(&self, node: EntityId) -> impl Iterator<Item = (EntityId, &NavEdge)> {
        self.outgoing(node)
            .filter_map(|edge| edge.destination.map(|dest| (dest, edge)))
    }

    /// Build the subgraph made of the given edges. Its nodes are exactly
    /// the endpoints of those edges.
    pub fn edge_subgraph<'a>(edges: impl IntoIterator<Item = &'a NavEdge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert_edge(edge.clone());
        }
        graph
    }

    /// Subgraph of the edges matching `keep`.
    pub fn filter_edges(&self, mut keep: impl FnMut(&NavEdge) -> bool) -> Self {
        Self::edge_subgraph(self.edges().filter(|edge| keep(edge)))
    }

    /// Nodes reachable from `source` within `radius` hops, together with all
    /// edges among them.
    ///
    /// If `source` is not in the graph, the result holds just `source`.
    pub fn ego_network(&self, source: EntityId, radius: usize) -> Self {
        let mut ego = Self::new();
        ego.add_node(source);
        if !self.contains(source) {
            return ego;
        }

        let mut depth: BTreeMap<EntityId, usize> = BTreeMap::new();
        depth.insert(source, 0);
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            let d = depth[&node];
            if d >= radius {
                continue;
            }
            for (dest, _) in self.successors(node) {
                if !depth.contains_key(&dest) {
                    depth.insert(dest, d + 1);
                    queue.push_back(dest);
                }
            }
        }

        for &node in depth.keys() {
            ego.add_node(node);
            for (dest, edge) in self.successors(node) {
                if depth.contains_key(&dest) {
                    ego.insert_edge(edge.clone());
                }
            }
        }
        ego
    }

    /// Origin -> destinations, in id and adjacency order. Unwired exits
    /// appear as `None`.
    pub fn adjacency(&self) -> BTreeMap<EntityId, Vec<Option<EntityId>>> {
        let mut out: BTreeMap<EntityId, Vec<Option<EntityId>>> = BTreeMap::new();
        for (origin, dest) in self.edges.keys() {
            out.entry(*origin).or_default().push(*dest);
        }
        out
    }

    /// Diagnostic dump `{ "<origin>": [<destination or null>, ...] }`.
    /// `indent == 0` produces compact JSON.
    pub fn to_json(&self, indent: usize) -> Result<String, serde_json::Error> {
        let adjacency = self.adjacency();
        if indent == 0 {
            return serde_json::to_string(&adjacency);
        }
        let pad = vec![b' '; indent];
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&pad);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        adjacency.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
