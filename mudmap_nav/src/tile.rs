// Two-character tile labels for rooms on the minimap.
//
// A room's tile is its explicit override when one is set. Otherwise it is
// derived from the display name:
// - Several words: first letter of the first word + first letter of the last
//   word ("Front Yard" -> "FY").
// - One word: first letter + first non-vowel after it, or the last letter if
//   every later letter is a vowel ("Dungeon" -> "DN").
// Derived labels are uppercased. Overrides are returned as given.
//
// See also: `minimap.rs` which places tiles on the grid, `world.rs` for the
// `RoomCatalog` that supplies names and overrides.

use crate::types::EntityId;
use crate::world::RoomCatalog;

/// Tile shown for a room that has neither a name nor an override.
pub const UNKNOWN_TILE: &str = "??";

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Label derived from a display name. `None` for a blank name.
pub fn label_for_name(name: &str) -> Option<String> {
    let name = name.trim();
    let first = name.chars().next()?;

    let second = if name.contains(char::is_whitespace) {
        let last_word = name.split_whitespace().last()?;
        last_word.chars().next()?
    } else {
        name.chars()
            .skip(1)
            .flat_map(char::to_lowercase)
            .find(|c| !VOWELS.contains(c))
            .or_else(|| name.chars().last())?
    };

    // Some uppercase forms expand ('ß' -> "SS"); keep one char of each so the
    // label stays two characters wide.
    let upper = |c: char| c.to_uppercase().next().unwrap_or(c);
    Some([upper(first), upper(second)].iter().collect())
}

/// Tile for `room`: the override if set, else the name-derived label, else
/// `UNKNOWN_TILE`.
pub fn tile_label<C: RoomCatalog + ?Sized>(catalog: &C, room: EntityId) -> String {
    if let Some(tile) = catalog.tile_of(room).filter(|t| !t.is_empty()) {
        return tile.to_string();
    }
    catalog
        .name_of(room)
        .and_then(label_for_name)
        .unwrap_or_else(|| UNKNOWN_TILE.to_string())
}
