// Traversal permissions and the per-actor usable subgraph.
//
// The permission engine lives outside this crate; all it has to provide is a
// `TraversePolicy` answering "may this actor use this exit?". `usable()` is
// the only caller. It asks once per edge and keeps the edges that pass.
//
// Default is deny. A policy with no rule for an exit must answer `false`.
// `ExitLocks`, the in-memory policy, follows the same rule.
//
// The usable subgraph is never cached. Permission depends on the actor, and
// the graph does not know who is asking.
//
// See also: `graph.rs` for the subgraph construction, `topography.rs` which
// calls `usable()` on every request.

use crate::graph::{NavEdge, RoomGraph};
use crate::types::{EntityId, ExitId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Capability check supplied by the permission engine.
pub trait TraversePolicy: Send + Sync {
    fn can_traverse(&self, actor: EntityId, edge: &NavEdge) -> bool;
}

/// Lets everyone through every exit.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl TraversePolicy for AllowAll {
    fn can_traverse(&self, _actor: EntityId, _edge: &NavEdge) -> bool {
        true
    }
}

/// Lock on a single exit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraverseLock {
    /// Anyone may pass.
    All,
    /// No one may pass.
    Nobody,
    /// Only the listed actors may pass.
    Only(BTreeSet<EntityId>),
    /// Everyone except the listed actors may pass.
    Except(BTreeSet<EntityId>),
}

impl TraverseLock {
    pub fn allows(&self, actor: EntityId) -> bool {
        match self {
            Self::All => true,
            Self::Nobody => false,
            Self::Only(actors) => actors.contains(&actor),
            Self::Except(actors) => !actors.contains(&actor),
        }
    }
}

/// In-memory lock table keyed by exit. Exits without a lock are closed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExitLocks {
    locks: BTreeMap<ExitId, TraverseLock>,
}

impl ExitLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, exit: ExitId, lock: TraverseLock) {
        self.locks.insert(exit, lock);
    }

    pub fn remove(&mut self, exit: ExitId) -> Option<TraverseLock> {
        self.locks.remove(&exit)
    }

    /// Open every listed exit to everyone.
    pub fn open_all(&mut self, exits: impl IntoIterator<Item = ExitId>) {
        for exit in exits {
            self.set(exit, TraverseLock::All);
        }
    }
}

impl TraversePolicy for ExitLocks {
    fn can_traverse(&self, actor: EntityId, edge: &NavEdge) -> bool {
        self.locks
            .get(&edge.exit)
            .is_some_and(|lock| lock.allows(actor))
    }
}

/// The subgraph of `graph` holding exactly the edges `actor` may traverse.
///
/// Checks run in parallel; the surviving edges keep the graph's edge order.
pub fn usable<P: TraversePolicy + ?Sized>(
    graph: &RoomGraph,
    policy: &P,
    actor: EntityId,
) -> RoomGraph {
    let edges: Vec<&NavEdge> = graph.edges().collect();
    let allowed: Vec<&NavEdge> = edges
        .par_iter()
        .copied()
        .filter(|edge| policy.can_traverse(actor, edge))
        .collect();
    tracing::trace!(
        actor = actor.0,
        total = edges.len(),
        allowed = allowed.len(),
        "computed usable subgraph"
    );
    RoomGraph::edge_subgraph(allowed)
}
