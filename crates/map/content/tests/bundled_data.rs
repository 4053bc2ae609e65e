use std::path::PathBuf;

use overmap_content::ContentFactory;
use overmap_core::{
    BattlefieldBuilder, BattlefieldPreset, Frame, GridPos, RoomGraph, RoomGraphWalker, RoomId,
    SymbolResolver,
};

fn factory() -> ContentFactory {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data");
    ContentFactory::new(data)
}

#[test]
fn bundled_village_renders() {
    let factory = factory();
    let config = factory.load_config().expect("config.toml parses");
    let symbols = factory.load_symbols().expect("symbols.toml parses");
    let world = factory.load_world("village").expect("village.ron parses");

    let walker = RoomGraphWalker::new(SymbolResolver::new(symbols), Frame::overhead());
    let map = walker
        .walk(&world, RoomId(1), config.radius)
        .expect("square exists");

    // the cellar is only reachable by a vertical exit
    assert!(map.position_of(RoomId(8)).is_none());
    assert_eq!(map.visited().len(), 7);

    let display = map.render();
    let rows: Vec<&str> = display.lines().collect();
    let cell = |row: usize, col: usize| rows[row].split(' ').nth(col);
    assert_eq!(cell(10, 10), Some("|500@|n"));
    assert_eq!(cell(10, 12), Some("♣"));
    assert_eq!(cell(8, 14), Some("◙"));
    assert_eq!(cell(10, 8), Some("○"));
    assert_eq!(cell(6, 10), Some("A"));
}

#[test]
fn bundled_legend_and_templates_build() {
    let factory = factory();
    let legend = factory.load_legend().expect("legend.ron parses");
    let mut world = factory.load_world("village").expect("village.ron parses");

    let size = world.attributes(RoomId(1)).and_then(|room| room.size);
    let preset = BattlefieldPreset::for_room_size(size);
    assert_eq!(preset, BattlefieldPreset::Medium);

    let battlefield = BattlefieldBuilder::new(legend.clone())
        .with_parent(RoomId(1))
        .build(preset.template(), &mut world)
        .expect("preset builds");
    assert_eq!(battlefield.sections().len(), 25);

    let bridge = factory.load_template("bridge").expect("bridge.txt is valid");
    let battlefield = BattlefieldBuilder::new(legend)
        .build(&bridge, &mut world)
        .expect("bridge builds");
    assert_eq!(battlefield.sections().len(), 13);
    // 8 horizontal and 8 vertical connectors, each linking a pair
    assert_eq!(battlefield.sections().exit_count(), 32);
}

#[test]
fn bundled_walled_frame_loads() {
    let frame = factory().load_frame("walled").expect("walled.txt parses");

    assert_eq!((frame.width(), frame.height()), (21, 21));
    assert!(!frame.is_open(GridPos::new(0, 0)));
    assert!(frame.is_open(GridPos::new(10, 10)));
    assert!(!frame.is_open(GridPos::new(20, 10)));
}
