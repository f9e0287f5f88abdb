// World-facing contracts consumed by the navigation crate.
//
// The persistent store and entity model live outside this crate. Two traits
// describe what navigation needs from them:
// - `ExitSource`: every connection record (origin, destination, direction key).
// - `RoomCatalog`: per-entity facts, namely the containing location, the
//   display name, and an optional tile override.
//
// `StaticWorld` is an in-memory implementation of both, used by the tests,
// the benches, and hosts that keep their world map in memory.
//
// See also: `store.rs` which scans an `ExitSource` to build the graph,
// `access.rs` for the permission side of the contract, `tile.rs` which reads
// names and tile overrides.

use crate::types::{EntityId, ExitId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw connection record as supplied by the world.
///
/// `origin` may be missing for half-built exits; such records are dropped
/// during graph construction. `destination` may be missing for exits not yet
/// wired to a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitRecord {
    pub id: ExitId,
    pub origin: Option<EntityId>,
    pub destination: Option<EntityId>,
    /// Direction key, e.g. `"north"` or `"portal"`.
    pub key: String,
}

/// Supplies the full set of exits. Called once per graph rebuild.
pub trait ExitSource: Send + Sync {
    fn exits(&self) -> Vec<ExitRecord>;
}

/// Per-entity facts needed to resolve locations and label tiles.
pub trait RoomCatalog: Send + Sync {
    /// The location containing `id`, if `id` is an object inside a room.
    /// Rooms themselves return `None`.
    fn location_of(&self, id: EntityId) -> Option<EntityId>;

    fn name_of(&self, id: EntityId) -> Option<&str>;

    /// Explicit tile label overriding the name-derived one.
    fn tile_of(&self, id: EntityId) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// In-memory world
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EntityInfo {
    name: String,
    tile: Option<String>,
    location: Option<EntityId>,
}

/// A world held entirely in memory.
///
/// Entity and exit ids are assigned sequentially from 1 so that tests can
/// rely on creation order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    entities: BTreeMap<EntityId, EntityInfo>,
    exits: Vec<ExitRecord>,
    next_entity: u64,
    next_exit: u64,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room. Returns its ID.
    pub fn add_room(&mut self, name: &str) -> EntityId {
        self.add_entity(name, None)
    }

    /// Create an object placed inside `location`. Returns its ID.
    pub fn add_object(&mut self, name: &str, location: EntityId) -> EntityId {
        self.add_entity(name, Some(location))
    }

    fn add_entity(&mut self, name: &str, location: Option<EntityId>) -> EntityId {
        self.next_entity += 1;
        let id = EntityId(self.next_entity);
        self.entities.insert(
            id,
            EntityInfo {
                name: name.to_string(),
                tile: None,
                location,
            },
        );
        id
    }

    /// Move an existing entity into `location`, or out of any location.
    pub fn set_location(&mut self, id: EntityId, location: Option<EntityId>) {
        if let Some(info) = self.entities.get_mut(&id) {
            info.location = location;
        }
    }

    pub fn set_tile(&mut self, id: EntityId, tile: &str) {
        if let Some(info) = self.entities.get_mut(&id) {
            info.tile = Some(tile.to_string());
        }
    }

    /// Create an exit. Either endpoint may be `None` to model a half-built
    /// exit. Returns the exit's ID.
    pub fn add_exit(
        &mut self,
        origin: Option<EntityId>,
        destination: Option<EntityId>,
        key: &str,
    ) -> ExitId {
        self.next_exit += 1;
        let id = ExitId(self.next_exit);
        self.exits.push(ExitRecord {
            id,
            origin,
            destination,
            key: key.to_string(),
        });
        id
    }

    /// Shorthand for a fully wired exit.
    pub fn connect(&mut self, origin: EntityId, destination: EntityId, key: &str) -> ExitId {
        self.add_exit(Some(origin), Some(destination), key)
    }

    /// Look up an entity by exact name. Returns the lowest matching ID.
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, info)| info.name == name)
            .map(|(&id, _)| id)
    }

    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }
}

impl ExitSource for StaticWorld {
    fn exits(&self) -> Vec<ExitRecord> {
        self.exits.clone()
    }
}

impl RoomCatalog for StaticWorld {
    fn location_of(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(&id).and_then(|info| info.location)
    }

    fn name_of(&self, id: EntityId) -> Option<&str> {
        self.entities.get(&id).map(|info| info.name.as_str())
    }

    fn tile_of(&self, id: EntityId) -> Option<&str> {
        self.entities.get(&id).and_then(|info| info.tile.as_deref())
    }
}
