use overmap_core::{
    Cell, Direction, Frame, Glyph, GlyphSet, GridPos, InMemoryWorld, RoomAttributes, RoomGraphWalker,
    RoomId, SymbolResolver, SymbolTable, render_overhead_map,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// `size x size` lattice where every room links to all eight neighbours.
fn lattice(size: u64) -> InMemoryWorld {
    let mut world = InMemoryWorld::new();
    let id = |row: u64, col: u64| RoomId(row * size + col + 1);

    for row in 0..size {
        for col in 0..size {
            world.insert_room(RoomAttributes::new(id(row, col)).with_sector("CROSSROADS"));
        }
    }
    for row in 0..size {
        for col in 0..size {
            let here = id(row, col);
            if col + 1 < size {
                world.link(here, Direction::East, id(row, col + 1));
            }
            if row + 1 < size {
                world.link(here, Direction::South, id(row + 1, col));
                if col + 1 < size {
                    world.link(here, Direction::SouthEast, id(row + 1, col + 1));
                }
                if col > 0 {
                    world.link(here, Direction::SouthWest, id(row + 1, col - 1));
                }
            }
        }
    }
    world
}

fn plain_walker(size: usize) -> RoomGraphWalker {
    let table = SymbolTable {
        self_outdoor: Glyph::from("@"),
        ..SymbolTable::default()
    };
    RoomGraphWalker::new(SymbolResolver::new(table), Frame::blank(size, size))
}

// ============================================================================
// Termination and placement
// ============================================================================

#[test]
fn dense_cyclic_graph_terminates_and_places_each_room_once() {
    init_tracing();
    let world = lattice(8);

    // depth-first order reaches rooms through long detours, so a radius of
    // 20 does not cover the whole lattice
    let partial = plain_walker(31)
        .walk(&world, RoomId(1), 20)
        .expect("observer exists");
    assert!(partial.visited().len() < world.room_count());

    let map = plain_walker(31)
        .walk(&world, RoomId(1), 64)
        .expect("observer exists");

    assert_eq!(map.visited().len(), world.room_count());

    let mut positions: Vec<GridPos> = map.visited().values().copied().collect();
    positions.sort();
    positions.dedup();
    assert_eq!(positions.len(), world.room_count(), "two rooms share a cell");

    let drawn = map.grid().cells().filter(|(_, cell)| cell.is_room()).count();
    assert_eq!(drawn, world.room_count());
}

#[test]
fn lattice_positions_follow_exit_geometry() {
    init_tracing();
    let world = lattice(3);

    // observer in the middle of the lattice
    let map = plain_walker(11).walk(&world, RoomId(5), 3).expect("observer exists");
    let center = GridPos::new(5, 5);

    assert_eq!(map.origin(), center);
    assert_eq!(map.position_of(RoomId(1)), Some(GridPos::new(3, 3)));
    assert_eq!(map.position_of(RoomId(9)), Some(GridPos::new(7, 7)));
    assert_eq!(map.grid().get(center), Some(&Cell::Room(Glyph::from("@"))));
}

#[test]
fn radius_limits_reach_on_a_corridor() {
    init_tracing();
    let mut world = InMemoryWorld::new();
    for id in 1..=20 {
        world.insert_room(RoomAttributes::new(RoomId(id)));
    }
    for id in 1..20 {
        world.link(RoomId(id), Direction::East, RoomId(id + 1));
    }

    for radius in 0..6 {
        let map = plain_walker(41).walk(&world, RoomId(1), radius).expect("observer exists");
        assert_eq!(map.visited().len(), radius as usize + 1, "radius {radius}");
    }
}

// ============================================================================
// Glyph selection through the public entry point
// ============================================================================

#[test]
fn overhead_map_uses_banded_glyphs_and_keeps_the_self_glyph() {
    init_tracing();
    let bands: GlyphSet = ["v", "-", "=", "^", "A"]
        .into_iter()
        .map(Glyph::from)
        .collect::<Vec<_>>()
        .try_into()
        .expect("five glyphs");

    let mut world = InMemoryWorld::new();
    world.insert_room(
        RoomAttributes::new(RoomId(1))
            .with_elevation(100)
            .with_glyph_set(bands.clone()),
    );
    world.insert_room(RoomAttributes::new(RoomId(2)).with_elevation(300).with_glyph_set(bands.clone()));
    world.insert_room(RoomAttributes::new(RoomId(3)).with_elevation(-100).with_glyph_set(bands));
    world.link(RoomId(1), Direction::North, RoomId(2));
    world.link(RoomId(1), Direction::South, RoomId(3));

    let display = render_overhead_map(&world, RoomId(1), 10).expect("observer exists");
    let cell = |row: usize| display.lines().nth(row).and_then(|line| line.split(' ').nth(10));

    assert_eq!(cell(10), Some("|500@|n"));
    assert_eq!(cell(8), Some("A"));
    assert_eq!(cell(9), Some("|"));
    assert_eq!(cell(12), Some("v"));
}

#[test]
fn unknown_observer_is_reported() {
    let world = InMemoryWorld::new();
    let err = render_overhead_map(&world, RoomId(404), 3).unwrap_err();
    assert_eq!(err.to_string(), "observer room #404 is not part of the world graph");
}

#[test]
fn diamond_frame_hides_far_corners() {
    init_tracing();
    let world = lattice(11);

    // observer at the lattice centre, corner rooms land on walled cells
    let map = RoomGraphWalker::default()
        .walk(&world, RoomId(61), 10)
        .expect("observer exists");

    let corner = map.position_of(RoomId(1)).expect("corner is reachable");
    assert_eq!(corner, GridPos::new(0, 0));
    assert!(!map.nearby_rooms().any(|room| room == RoomId(1)));
    assert!(map.nearby_rooms().any(|room| room == RoomId(61)));
    assert_eq!(map.grid().get(corner), Some(&Cell::Background(Glyph::from('█'))));
}
