// mudmap_nav: room-graph navigation for text worlds.
//
// This crate answers two questions for an acting entity: "can I get from A
// to B, and how?" and "what does my neighborhood look like?". It keeps a
// directed graph of rooms and exits, filters it per actor by traversal
// permission, finds unweighted shortest paths, and renders a bounded ASCII
// minimap around a location.
//
// It is a synchronous, in-process library. The entity store, the permission
// engine, and command handling belong to the host; they plug in through the
// traits in `world.rs` and `access.rs`.
//
// Module overview:
// - `topography.rs`:  `Topography`: request entry point (path, map, dump).
// - `store.rs`:       `GraphStore`: lazy build, serialized rebuilds, snapshot reads.
// - `graph.rs`:       `RoomGraph` / `NavEdge`: the directed graph and subgraphs.
// - `access.rs`:      `TraversePolicy`, lock table, per-actor usable subgraph.
// - `pathfinding.rs`: BFS shortest path and `PathResult`.
// - `minimap.rs`:     Neighborhood enumeration, grid projection, pad/crop.
// - `tile.rs`:        Two-character room labels.
// - `world.rs`:       `ExitSource` / `RoomCatalog` contracts + in-memory `StaticWorld`.
// - `config.rs`:      `NavConfig`: viewport defaults and the map path cap.
// - `error.rs`:       `NavError`.
// - `types.rs`:       Entity IDs, `Direction`, `GridPos`.
//
// **Critical constraint: determinism.** Given the same exits and the same
// policy, every query returns the same answer. Graph iteration is ordered by
// id; nothing depends on hash order or thread scheduling.

pub mod access;
pub mod config;
pub mod error;
pub mod graph;
pub mod minimap;
pub mod pathfinding;
pub mod store;
pub mod tile;
pub mod topography;
pub mod types;
pub mod world;

pub use access::{AllowAll, ExitLocks, TraverseLock, TraversePolicy};
pub use config::NavConfig;
pub use error::{NavError, NavResult};
pub use graph::{NavEdge, RoomGraph};
pub use pathfinding::PathResult;
pub use store::GraphStore;
pub use topography::Topography;
pub use types::{Direction, EntityId, ExitId};
pub use world::{ExitRecord, ExitSource, RoomCatalog, StaticWorld};
