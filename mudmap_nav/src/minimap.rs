// ASCII minimap of the rooms around a location.
//
// Rendering pipeline:
// 1. Keep only compass exits (north, northeast, ..., northwest) of the
//    actor's usable graph. Other exits are valid for pathfinding but have no
//    place on a flat map.
// 2. Take the ego network of the source: everything within `ttl * 2` hops.
// 3. Enumerate simple paths out of the source by depth-limited DFS. Paths
//    are cut at `ttl * 2` hops and the total is capped at `max_paths`. Dense,
//    cyclic neighborhoods have exponentially many simple paths; the cap keeps
//    rendering bounded.
// 4. Project every path onto a `ttl x ttl` grid, starting each one from the
//    center. A room takes a 2x2 block: the tile cell plus the connector cell
//    toward the room it was entered from. Each step moves two cells, writes
//    the connector glyph at the half-step, and places the destination tile
//    unless that cell already holds one. Steps that land at a negative
//    coordinate are clipped.
// 5. Serialize the grid (blank cells default to `BLANK_TILE`, the center is
//    always `SELF_TILE`), then pad or crop it to the requested viewport.
//
// Every cell is two display characters wide.
//
// See also: `tile.rs` for room labels, `graph.rs` for `ego_network`,
// `access.rs` for the usable graph this is handed.

use crate::config::NavConfig;
use crate::graph::{NavEdge, RoomGraph};
use crate::tile::tile_label;
use crate::types::{Direction, EntityId, GridPos};
use crate::world::RoomCatalog;
use rustc_hash::{FxHashMap, FxHashSet};
use std::iter;

pub const BLANK_TILE: &str = "  ";
pub const SELF_TILE: &str = "**";
pub const VERTICAL_LINK: &str = "::";
pub const HORIZONTAL_LINK: &str = "==";
pub const RISING_LINK: &str = "//";
pub const FALLING_LINK: &str = "\\\\";

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Fully resolved rendering parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapView {
    /// Grid side length; the neighborhood radius is twice this.
    pub ttl: usize,
    /// Output width in display characters.
    pub width: usize,
    /// Output height in rows.
    pub height: usize,
    /// Cap on enumerated paths.
    pub max_paths: usize,
}

impl MapView {
    /// Fill unset (or zero) request fields from `config`. Width and height
    /// never exceed the configured defaults. A ttl of zero is raised to one
    /// so the map always shows the self tile, and ttl is capped at
    /// `config.max_ttl`.
    pub fn resolve(
        config: &NavConfig,
        ttl: Option<u32>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        let pick = |requested: Option<u32>, default: u32| {
            requested.filter(|&v| v > 0).map_or(default, |v| v.min(default)) as usize
        };
        Self {
            ttl: ttl.unwrap_or(config.default_ttl).clamp(1, config.max_ttl.max(1)) as usize,
            width: pick(width, config.default_width),
            height: pick(height, config.default_height),
            max_paths: config.max_map_paths,
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Grid movement for one exit direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    dx: i32,
    dy: i32,
    /// Connector cell, relative to the landing cell.
    link: (i32, i32),
    glyph: &'static str,
}

impl Step {
    fn for_direction(direction: Direction) -> Option<Self> {
        let (dx, dy, link, glyph) = match direction {
            Direction::North => (0, -2, (0, 1), VERTICAL_LINK),
            Direction::South => (0, 2, (0, -1), VERTICAL_LINK),
            Direction::West => (-2, 0, (1, 0), HORIZONTAL_LINK),
            Direction::East => (2, 0, (-1, 0), HORIZONTAL_LINK),
            Direction::NorthEast => (2, -2, (-1, 1), RISING_LINK),
            Direction::SouthEast => (-2, 2, (1, -1), FALLING_LINK),
            Direction::NorthWest => (-2, -2, (1, 1), FALLING_LINK),
            Direction::SouthWest => (-2, 2, (1, -1), RISING_LINK),
            Direction::Other => return None,
        };
        Some(Self { dx, dy, link, glyph })
    }
}

/// Sparse square grid of two-character glyphs.
#[derive(Clone, Debug)]
pub struct MapGrid {
    size: usize,
    cells: FxHashMap<GridPos, String>,
}

impl MapGrid {
    /// An empty `size x size` grid with the self tile at the center.
    pub fn new(size: usize) -> Self {
        let mut grid = Self {
            size,
            cells: FxHashMap::default(),
        };
        grid.set(grid.center(), SELF_TILE);
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn center(&self) -> GridPos {
        let mid = (self.size / 2) as i32;
        GridPos::new(mid, mid)
    }

    /// Glyph at `pos`, or `BLANK_TILE` if unset.
    pub fn get(&self, pos: GridPos) -> &str {
        self.cells.get(&pos).map_or(BLANK_TILE, String::as_str)
    }

    pub fn is_set(&self, pos: GridPos) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn set(&mut self, pos: GridPos, glyph: &str) {
        self.cells.insert(pos, glyph.to_string());
    }

    /// Draw one path outward from the center.
    pub fn project_path<C: RoomCatalog + ?Sized>(&mut self, path: &[&NavEdge], catalog: &C) {
        let mut cursor = self.center();
        for edge in path {
            let Some(step) = Step::for_direction(edge.direction) else {
                continue;
            };
            cursor = cursor.offset(step.dx, step.dy);
            if !cursor.in_quadrant() {
                continue;
            }
            self.set(cursor.offset(step.link.0, step.link.1), step.glyph);
            if let Some(dest) = edge.destination {
                if !self.is_set(cursor) {
                    self.set(cursor, &tile_label(catalog, dest));
                }
            }
        }
    }

    /// Rows of glyphs, top to bottom.
    pub fn rows(&self) -> Vec<Vec<&str>> {
        (0..self.size as i32)
            .map(|y| {
                (0..self.size as i32)
                    .map(|x| self.get(GridPos::new(x, y)))
                    .collect()
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Path enumeration
// ---------------------------------------------------------------------------

/// Simple paths out of a source, in DFS order.
#[derive(Clone, Debug, Default)]
pub struct PathEnumeration<'g> {
    pub paths: Vec<Vec<&'g NavEdge>>,
    /// True if the cap stopped enumeration early.
    pub truncated: bool,
}

/// Every simple path leaving `source` with at most `cutoff` hops, up to
/// `cap` paths. Each path ends at a different point of the DFS, so a path
/// and all of its prefixes are listed.
pub fn simple_paths(
    graph: &RoomGraph,
    source: EntityId,
    cutoff: usize,
    cap: usize,
) -> PathEnumeration<'_> {
    let mut out = PathEnumeration::default();
    if cutoff == 0 || cap == 0 || !graph.contains(source) {
        return out;
    }
    let mut on_path = FxHashSet::default();
    on_path.insert(source);
    let mut stack = Vec::with_capacity(cutoff);
    extend_paths(graph, source, cutoff, cap, &mut on_path, &mut stack, &mut out);
    out
}

/// Returns `false` once the cap is hit, unwinding the whole search.
fn extend_paths<'g>(
    graph: &'g RoomGraph,
    node: EntityId,
    cutoff: usize,
    cap: usize,
    on_path: &mut FxHashSet<EntityId>,
    stack: &mut Vec<&'g NavEdge>,
    out: &mut PathEnumeration<'g>,
) -> bool {
    for (next, edge) in graph.successors(node) {
        if on_path.contains(&next) {
            continue;
        }
        if out.paths.len() >= cap {
            out.truncated = true;
            return false;
        }
        stack.push(edge);
        out.paths.push(stack.clone());
        let mut keep_going = true;
        if stack.len() < cutoff {
            on_path.insert(next);
            keep_going = extend_paths(graph, next, cutoff, cap, on_path, stack, out);
            on_path.remove(&next);
        }
        stack.pop();
        if !keep_going {
            return false;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Only the edges drawable on a compass grid.
pub fn compass_subgraph(graph: &RoomGraph) -> RoomGraph {
    graph.filter_edges(|edge| edge.direction.is_compass() && edge.destination.is_some())
}

/// Project the neighborhood of `source` onto a `view.ttl`-sized grid.
///
/// An unknown `source` yields a grid holding only the self tile.
pub fn build_grid<C: RoomCatalog + ?Sized>(
    usable: &RoomGraph,
    catalog: &C,
    source: EntityId,
    view: &MapView,
) -> MapGrid {
    let radius = view.ttl * 2;
    let compass = compass_subgraph(usable);
    let neighborhood = compass.ego_network(source, radius);
    let enumeration = simple_paths(&neighborhood, source, radius, view.max_paths);
    if enumeration.truncated {
        tracing::debug!(
            source = source.0,
            cap = view.max_paths,
            truncated = true,
            "minimap path enumeration hit the cap"
        );
    }

    let mut grid = MapGrid::new(view.ttl);
    for path in &enumeration.paths {
        grid.project_path(path, catalog);
    }
    grid
}

/// Pad or crop `rows` to `width` display characters by `height` rows.
///
/// Padding is symmetric with any odd remainder dropped. Cropping keeps a
/// window around the midpoint; an even end index is bumped by one.
pub fn fit_to_viewport<'a>(
    mut rows: Vec<Vec<&'a str>>,
    width: usize,
    height: usize,
) -> Vec<Vec<&'a str>> {
    let mut map_height = rows.len();
    let mut map_width = rows.first().map_or(0, Vec::len);

    if height > map_height {
        let pad = (height - map_height) / 2;
        let blank_row = vec![BLANK_TILE; map_width];
        let mut padded = Vec::with_capacity(map_height + pad * 2);
        padded.extend(iter::repeat_n(blank_row.clone(), pad));
        padded.append(&mut rows);
        padded.extend(iter::repeat_n(blank_row, pad));
        rows = padded;
        map_height = rows.len();
    }

    if width > map_width * 2 {
        // Spare characters become blank cells on each side. This overshoots,
        // and the width crop below trims back to the requested window.
        let pad = (width - map_width * 2) / 2;
        for row in &mut rows {
            let mut padded = Vec::with_capacity(row.len() + pad * 2);
            padded.extend(iter::repeat_n(BLANK_TILE, pad));
            padded.append(row);
            padded.extend(iter::repeat_n(BLANK_TILE, pad));
            *row = padded;
        }
        map_width += pad * 2;
    }

    if height < map_height {
        let (start, end) = crop_window(map_height, height / 2);
        rows.truncate(end);
        rows.drain(..start);
    }

    if width < map_width * 2 {
        let (start, end) = crop_window(map_width, (width / 2) / 2);
        for row in &mut rows {
            let end = end.min(row.len());
            row.truncate(end);
            row.drain(..start.min(end));
        }
    }

    rows
}

/// `[mid - half, mid + half)` around the midpoint of `len`, with an even end
/// bumped to odd, clamped to `len`.
fn crop_window(len: usize, half: usize) -> (usize, usize) {
    let mid = len / 2;
    let start = mid.saturating_sub(half);
    let mut end = mid + half;
    if end % 2 == 0 {
        end += 1;
    }
    let end = end.min(len);
    (start.min(end), end)
}

/// Render the minimap around `source` as newline-separated rows.
pub fn render_minimap<C: RoomCatalog + ?Sized>(
    usable: &RoomGraph,
    catalog: &C,
    source: EntityId,
    view: &MapView,
) -> String {
    let grid = build_grid(usable, catalog, source, view);
    let rows = fit_to_viewport(grid.rows(), view.width, view.height);
    rows.iter()
        .map(|row| row.concat())
        .collect::<Vec<_>>()
        .join("\n")
}
