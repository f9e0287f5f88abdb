// Request-level entry point: paths, minimaps, and the graph dump.
//
// `Topography` ties the pieces together for one world. It owns the world
// handle, the traversal policy, the config, and the `GraphStore`. Every
// request goes through the same steps:
//
//   1. Lazily build the shared graph (first request only).
//   2. Resolve objects to the rooms that contain them.
//   3. Filter the graph down to what the acting entity may traverse.
//   4. Run BFS (`path`) or the minimap projector (`render_map`).
//
// The usable subgraph is recomputed for every request and never stored,
// because it depends on the actor.
//
// `Topography` is `Send + Sync`; share one behind an `Arc` and call it from
// any number of threads. Rebuilds serialize inside the store, and readers
// work on immutable snapshots.
//
// See also: `store.rs` for the build protocol, `access.rs` for filtering,
// `pathfinding.rs` and `minimap.rs` for the two query kinds.

use crate::access::{self, TraversePolicy};
use crate::config::NavConfig;
use crate::error::{NavError, NavResult};
use crate::graph::RoomGraph;
use crate::minimap::{self, MapView};
use crate::pathfinding::{self, PathResult};
use crate::store::GraphStore;
use crate::types::EntityId;
use crate::world::{ExitSource, RoomCatalog};
use std::sync::Arc;

/// Navigation service for one world.
#[derive(Debug)]
pub struct Topography<W, P> {
    world: W,
    policy: P,
    config: NavConfig,
    store: GraphStore,
}

impl<W, P> Topography<W, P>
where
    W: ExitSource + RoomCatalog,
    P: TraversePolicy,
{
    /// Create a service. Fails if `config` does not validate.
    pub fn new(world: W, policy: P, config: NavConfig) -> NavResult<Self> {
        config.validate()?;
        Ok(Self {
            world,
            policy,
            config,
            store: GraphStore::new(),
        })
    }

    /// Create a service with `NavConfig::default()`.
    pub fn with_default_config(world: W, policy: P) -> Self {
        Self {
            world,
            policy,
            config: NavConfig::default(),
            store: GraphStore::new(),
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// The shared graph, built on first use.
    pub fn graph(&self) -> Arc<RoomGraph> {
        self.store.ensure_built(&self.world)
    }

    /// Rescan the world's exits. New and changed exits are applied;
    /// removed exits stay in the graph.
    pub fn update(&self) -> Arc<RoomGraph> {
        self.store.update(&self.world)
    }

    /// The room containing `id`, or `id` itself if it is not inside anything.
    pub fn resolve_location(&self, id: EntityId) -> EntityId {
        self.world.location_of(id).unwrap_or(id)
    }

    /// The subgraph `actor` may traverse.
    pub fn usable(&self, actor: EntityId) -> RoomGraph {
        access::usable(&self.graph(), &self.policy, actor)
    }

    /// Shortest route from `source` to `target` as seen by `actor`.
    ///
    /// Either endpoint may be a room or an object inside one. Without a
    /// `source`, the route starts wherever `actor` is. Without an `actor`,
    /// permissions are checked for the source entity. An empty result means
    /// no route, or that source and target are the same room.
    ///
    /// Errors with `MissingSource` when both `source` and `actor` are absent.
    pub fn path(
        &self,
        source: Option<EntityId>,
        target: EntityId,
        actor: Option<EntityId>,
    ) -> NavResult<PathResult> {
        let start = source.or(actor).ok_or(NavError::MissingSource)?;
        let subject = actor.unwrap_or(start);
        let from = self.resolve_location(start);
        let to = self.resolve_location(target);

        if from == to {
            tracing::trace!(room = from.0, "path query already at target");
            return Ok(PathResult::empty());
        }

        let usable = self.usable(subject);
        let result = pathfinding::shortest_path(&usable, from, to);
        tracing::trace!(
            source = from.0,
            target = to.0,
            actor = subject.0,
            hops = result.len(),
            "path query"
        );
        Ok(result)
    }

    /// ASCII minimap centered on `center` (or the room containing it).
    ///
    /// `ttl`, `width` and `height` fall back to the config when unset. Always
    /// returns a map; an unknown center renders just the self tile.
    pub fn render_map(
        &self,
        center: EntityId,
        actor: Option<EntityId>,
        ttl: Option<u32>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> String {
        let subject = actor.unwrap_or(center);
        let room = self.resolve_location(center);
        let view = MapView::resolve(&self.config, ttl, width, height);
        let usable = self.usable(subject);
        minimap::render_minimap(&usable, &self.world, room, &view)
    }

    /// Raw graph adjacency as JSON, for diagnostics.
    pub fn to_json(&self, indent: usize) -> NavResult<String> {
        self.graph().to_json(indent).map_err(NavError::Serialize)
    }
}
