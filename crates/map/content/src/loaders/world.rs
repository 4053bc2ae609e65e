//! World graph loader.
//!
//! Loads rooms and exits from RON files into an [`InMemoryWorld`].

use std::path::Path;

use overmap_core::{Direction, InMemoryWorld, RoomAttributes, RoomGraph, RoomId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// World data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorldDataRon {
    rooms: Vec<RoomAttributes>,
    /// Two-way connections: `(from, direction, to)`.
    #[serde(default)]
    links: Vec<(u64, String, u64)>,
    /// One-way exits with free-form names: `(from, name, to)`.
    #[serde(default)]
    exits: Vec<(u64, String, u64)>,
}

/// Loader for world graphs from RON files.
///
/// ```ron
/// (
///     rooms: [
///         (id: 1, name: "Crossroads", sector_type: Some("CROSSROADS")),
///         (id: 2, name: "Ridge", elevation: 140, glyph_set: Some(["^"])),
///     ],
///     links: [(1, "east", 2)],
///     exits: [(2, "up", 1)],
/// )
/// ```
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<InMemoryWorld> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Exits naming a room that does not exist are dropped with a warning.
    /// Room ids above [`RoomId::MAX_STORED`] are rejected.
    pub fn parse(content: &str) -> LoadResult<InMemoryWorld> {
        let data: WorldDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;

        let mut world = InMemoryWorld::new();
        for room in data.rooms {
            if world.contains(room.id) {
                anyhow::bail!("Duplicate room id {}", room.id);
            }
            if room.id > RoomId::MAX_STORED {
                anyhow::bail!(
                    "Room id {} is above the highest allowed id {}",
                    room.id,
                    RoomId::MAX_STORED
                );
            }
            world.insert_room(room);
        }

        for (from, name, to) in data.links {
            let direction: Direction = name
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown link direction '{}' from room {}", name, from))?;
            let (from, to) = (RoomId(from), RoomId(to));
            if !world.contains(from) || !world.contains(to) {
                warn!(%from, %to, %direction, "skipping link to a missing room");
                continue;
            }
            world.link(from, direction, to);
        }

        for (from, name, to) in data.exits {
            let (from, to) = (RoomId(from), RoomId(to));
            if !world.contains(from) || !world.contains(to) {
                warn!(%from, %to, exit = %name, "skipping exit to a missing room");
                continue;
            }
            world.add_exit(from, name, to);
        }

        Ok(world)
    }
}
