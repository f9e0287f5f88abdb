// End-to-end checks over a small hand-built world.
//
// Seven rooms, eight exits: a four-hop loop from node1 to node6 around the
// north side, a direct east exit that short-cuts it, and a diagonal pair
// between node1 and node7. Every query goes through `Topography`, the same
// entry point a host would use.

use mudmap_nav::{
    AllowAll, EntityId, ExitLocks, ExitSource, NavConfig, StaticWorld, Topography, TraverseLock,
};

const PLANS: [(&str, &str, &str); 8] = [
    ("node1", "node2", "north"),
    ("node7", "node1", "northeast"),
    ("node1", "node7", "southeast"),
    ("node2", "node3", "north"),
    ("node3", "node4", "east"),
    ("node4", "node5", "south"),
    ("node5", "node6", "south"),
    ("node1", "node6", "east"),
];

fn seven_rooms() -> StaticWorld {
    let mut world = StaticWorld::new();
    for (src, dst, way) in PLANS {
        let source = world.find(src).unwrap_or_else(|| world.add_room(src));
        let target = world.find(dst).unwrap_or_else(|| world.add_room(dst));
        world.connect(source, target, way);
    }
    for i in 1..=7 {
        let room = world.find(&format!("node{i}")).unwrap();
        world.set_tile(room, &format!("N{i}"));
    }
    world
}

fn room(world: &StaticWorld, name: &str) -> EntityId {
    world.find(name).unwrap()
}

#[test]
fn direct_exit_beats_the_long_way_round() {
    let world = seven_rooms();
    let (node1, node6) = (room(&world, "node1"), room(&world, "node6"));
    let topo = Topography::with_default_config(world, AllowAll);

    let result = topo.path(Some(node1), node6, None).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.directions(), vec!["east"]);
    assert_eq!(result.rooms, vec![node1, node6]);
}

#[test]
fn long_way_round_when_the_short_cut_is_locked() {
    let world = seven_rooms();
    let (node1, node6) = (room(&world, "node1"), room(&world, "node6"));
    let mut locks = ExitLocks::new();
    for record in world.exits() {
        let shortcut = record.origin == Some(node1) && record.destination == Some(node6);
        if !shortcut {
            locks.set(record.id, TraverseLock::All);
        }
    }
    let topo = Topography::with_default_config(world, locks);

    let result = topo.path(Some(node1), node6, None).unwrap();
    assert_eq!(result.directions(), vec!["north", "north", "east", "south", "south"]);
}

#[test]
fn default_deny_means_no_path() {
    let world = seven_rooms();
    let (node1, node6) = (room(&world, "node1"), room(&world, "node6"));
    let topo = Topography::with_default_config(world, ExitLocks::new());
    assert!(topo.path(Some(node1), node6, None).unwrap().is_empty());
}

#[test]
fn unreachable_target_gives_empty_path() {
    let world = seven_rooms();
    let (node6, node1) = (room(&world, "node6"), room(&world, "node1"));
    let topo = Topography::with_default_config(world, AllowAll);
    // node6 has no exits out.
    assert!(topo.path(Some(node6), node1, None).unwrap().is_empty());
}

#[test]
fn repeated_queries_agree() {
    let world = seven_rooms();
    let (node7, node5) = (room(&world, "node7"), room(&world, "node5"));
    let topo = Topography::with_default_config(world, AllowAll);
    let first = topo.path(Some(node7), node5, None).unwrap();
    for _ in 0..10 {
        assert_eq!(topo.path(Some(node7), node5, None).unwrap(), first);
    }
    // node7 -> node1 -> node6 is a dead end; the only route goes north.
    assert_eq!(first.len(), 5);
}

#[test]
fn map_of_the_seven_rooms() {
    let world = seven_rooms();
    let node1 = room(&world, "node1");
    let topo = Topography::with_default_config(world, AllowAll);

    // 14 cells = 28 characters; 14 rows. No padding or cropping.
    let map = topo.render_map(node1, None, Some(14), Some(28), Some(14));
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(rows.len(), 14);
    assert!(rows.iter().all(|r| r.len() == 28));

    let cell = |x: usize, y: usize| &rows[y][x * 2..x * 2 + 2];
    assert_eq!(cell(7, 7), "**");
    assert_eq!(cell(7, 6), "::");
    assert_eq!(cell(7, 5), "N2");
    assert_eq!(cell(7, 4), "::");
    assert_eq!(cell(7, 3), "N3");
    assert_eq!(cell(8, 3), "==");
    assert_eq!(cell(9, 3), "N4");
    assert_eq!(cell(9, 4), "::");
    assert_eq!(cell(9, 5), "N5");
    assert_eq!(cell(9, 6), "::");
    assert_eq!(cell(9, 7), "N6");
    assert_eq!(cell(8, 7), "==");
    // Southeast steps down and to the left.
    assert_eq!(cell(6, 8), "\\\\");
    assert_eq!(cell(5, 9), "N7");
}

#[test]
fn default_viewport_pads_the_map() {
    let world = seven_rooms();
    let node1 = room(&world, "node1");
    let config = NavConfig::default();
    let topo = Topography::new(world, AllowAll, config.clone()).unwrap();

    let map = topo.render_map(node1, None, None, None, None);
    let rows: Vec<&str> = map.lines().collect();
    let ttl = config.default_ttl as usize;
    let pad_rows = (config.default_height as usize - ttl) / 2;
    assert_eq!(rows.len(), ttl + pad_rows * 2);
    let width = rows[0].len();
    assert!(rows.iter().all(|r| r.len() == width));
    assert!(width <= config.default_width as usize);
    assert_eq!(rows.iter().filter(|r| r.contains("**")).count(), 1);
}

#[test]
fn json_dump_lists_every_origin() {
    let world = seven_rooms();
    let ids: Vec<u64> = (1..=7)
        .map(|i| room(&world, &format!("node{i}")).0)
        .collect();
    let topo = Topography::with_default_config(world, AllowAll);
    let dump: serde_json::Value = serde_json::from_str(&topo.to_json(2).unwrap()).unwrap();
    let map = dump.as_object().unwrap();
    // node6 has no outgoing exits, so it is absent as a key.
    assert_eq!(map.len(), 6);
    let node1 = &map[&ids[0].to_string()];
    assert_eq!(node1.as_array().unwrap().len(), 3);
}
