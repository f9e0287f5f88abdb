// Shared room graph with serialized rebuilds and snapshot reads.
//
// `GraphStore` owns the canonical `RoomGraph`. The graph is built lazily on
// first use and then served from cache for as long as the store lives.
//
// Publishing: each rebuild produces a fresh `RoomGraph` and swaps it in
// behind an `Arc`. Readers clone the current `Arc` under a brief read lock
// and keep working on that snapshot while later rebuilds publish new ones,
// so a rebuild never mutates a graph someone is iterating.
//
// Rebuilding: `build_lock` serializes writers, so at most one scan runs at
// a time. `ensure_built` re-checks the generation after taking the lock. A
// caller that waited behind an in-flight first build therefore finds it
// done and returns without scanning again.
//
// Rebuilds are append-only. Each scan upserts onto a copy of the previous
// graph; edges missing from the latest scan are not evicted.
//
// See also: `graph.rs` for the graph itself, `world.rs` for `ExitSource`,
// `topography.rs` which owns one store per world.

use crate::graph::RoomGraph;
use crate::world::ExitSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Process-wide room graph with lazy build and snapshot reads.
#[derive(Debug, Default)]
pub struct GraphStore {
    published: RwLock<Arc<RoomGraph>>,
    build_lock: Mutex<()>,
    /// Number of completed rebuilds. Zero means never built.
    generation: AtomicU64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published graph.
    pub fn read(&self) -> Arc<RoomGraph> {
        let guard = self.published.read().unwrap_or_else(|poisoned| {
            tracing::warn!("graph snapshot lock poisoned; recovering");
            poisoned.into_inner()
        });
        Arc::clone(&guard)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_built(&self) -> bool {
        self.generation() > 0
    }

    /// Build the graph if it has never been built, then return it.
    pub fn ensure_built<S: ExitSource + ?Sized>(&self, source: &S) -> Arc<RoomGraph> {
        if self.is_built() {
            return self.read();
        }
        let guard = self.lock_build();
        if self.is_built() {
            tracing::trace!("graph already built by a concurrent caller");
            drop(guard);
            return self.read();
        }
        self.rebuild_locked(&guard, source)
    }

    /// Rescan `source` and publish the result, even if already built.
    pub fn update<S: ExitSource + ?Sized>(&self, source: &S) -> Arc<RoomGraph> {
        let guard = self.lock_build();
        self.rebuild_locked(&guard, source)
    }

    fn lock_build(&self) -> MutexGuard<'_, ()> {
        self.build_lock.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("graph build lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Caller must hold `build_lock`; the guard parameter proves it.
    fn rebuild_locked<S: ExitSource + ?Sized>(
        &self,
        _guard: &MutexGuard<'_, ()>,
        source: &S,
    ) -> Arc<RoomGraph> {
        let mut graph = RoomGraph::clone(&self.read());
        let exits = source.exits();
        let mut skipped = 0usize;
        for record in &exits {
            if !graph.upsert_exit(record) {
                skipped += 1;
            }
        }

        let graph = Arc::new(graph);
        {
            let mut published = self.published.write().unwrap_or_else(|poisoned| {
                tracing::warn!("graph snapshot lock poisoned; recovering");
                poisoned.into_inner()
            });
            *published = Arc::clone(&graph);
        }
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(
            scanned = exits.len(),
            skipped,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            generation,
            "rebuilt room graph"
        );
        graph
    }
}
