// Core types shared across the navigation crate.
//
// Defines entity identifiers (`EntityId`, `ExitId`), the compass `Direction`
// parsed from an exit's direction key, and `GridPos` for minimap cells.
// Identities are owned by the surrounding world; this crate only compares
// and hashes them.
//
// See also: `graph.rs` which keys edges by `EntityId`, `minimap.rs` which
// turns `Direction` into grid steps.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Entity IDs
// ---------------------------------------------------------------------------

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

entity_id!(/// Identifier for any world entity: a room, an object, or an actor.
/// Rooms are the nodes of the navigation graph.
EntityId);
entity_id!(/// Identifier for the exit entity that owns a graph edge.
ExitId);

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// Direction of an exit, parsed from its key.
///
/// Only the eight compass directions are drawn on the minimap. Everything
/// else (`up`, `in`, `portal`, ...) is `Other` and is still valid for
/// pathfinding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Other,
}

impl Direction {
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Parse an exit key. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "north" => Self::North,
            "northeast" => Self::NorthEast,
            "east" => Self::East,
            "southeast" => Self::SouthEast,
            "south" => Self::South,
            "southwest" => Self::SouthWest,
            "west" => Self::West,
            "northwest" => Self::NorthWest,
            _ => Self::Other,
        }
    }

    pub fn is_compass(self) -> bool {
        self != Self::Other
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::NorthEast => "northeast",
            Self::East => "east",
            Self::SouthEast => "southeast",
            Self::South => "south",
            Self::SouthWest => "southwest",
            Self::West => "west",
            Self::NorthWest => "northwest",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Grid positions
// ---------------------------------------------------------------------------

/// A cell on the minimap grid. Signed so that projection can step past the
/// top/left edge before the cell gets clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// True when both coordinates are non-negative.
    pub const fn in_quadrant(self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_all_compass_keys() {
        for dir in Direction::COMPASS {
            assert_eq!(Direction::from_key(&dir.to_string()), dir);
        }
    }

    #[test]
    fn direction_parse_is_case_insensitive() {
        assert_eq!(Direction::from_key("NorthEast"), Direction::NorthEast);
        assert_eq!(Direction::from_key("  SOUTH "), Direction::South);
    }

    #[test]
    fn non_compass_keys_are_other() {
        assert_eq!(Direction::from_key("up"), Direction::Other);
        assert_eq!(Direction::from_key("north-ish"), Direction::Other);
        assert!(!Direction::from_key("portal").is_compass());
    }

    #[test]
    fn entity_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&EntityId(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
    }

    #[test]
    fn grid_pos_quadrant() {
        assert!(GridPos::new(0, 0).in_quadrant());
        assert!(!GridPos::new(-1, 3).in_quadrant());
        assert_eq!(GridPos::new(2, 2).offset(-2, 1), GridPos::new(0, 3));
    }
}
