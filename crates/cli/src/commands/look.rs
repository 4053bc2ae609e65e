//! Overhead map of the rooms around an observer.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use overmap_core::{BattlefieldPreset, Frame, MapConfig, RoomGraph, RoomGraphWalker, RoomId, SymbolResolver};

use super::Session;

/// Render the overhead map around an observer
#[derive(Parser)]
pub struct Look {
    /// World file under worlds/ (without .ron)
    #[arg(short, long, value_name = "NAME")]
    world: String,

    /// Room the observer stands in
    #[arg(short, long, value_name = "ROOM")]
    observer: u64,

    /// Maximum number of exits to follow
    #[arg(short, long)]
    radius: Option<u32>,

    /// Frame: `blank`, a combat preset (small, medium, large) or a file
    /// under frames/ (without .txt)
    #[arg(short, long, value_name = "NAME")]
    frame: Option<String>,

    /// List the rooms drawn on the map
    #[arg(long)]
    nearby: bool,
}

impl Look {
    pub fn execute(self, session: &Session) -> Result<()> {
        let world = session
            .factory
            .load_world(&self.world)
            .with_context(|| format!("Failed to load world '{}'", self.world))?;
        let symbols = session.factory.load_symbols().context("Failed to load symbols.toml")?;
        let frame = self.frame(session)?;
        let radius = self.radius.unwrap_or(session.config.radius);

        let walker = RoomGraphWalker::new(SymbolResolver::new(symbols), frame);
        let map = walker.walk(&world, RoomId(self.observer), radius)?;

        println!("{}", map.render());

        if self.nearby {
            println!();
            println!("{}", style("Nearby rooms").bold());
            for room in map.nearby_rooms() {
                let name = world
                    .attributes(room)
                    .map(|attributes| attributes.name)
                    .unwrap_or_default();
                let position = map.position_of(room).unwrap_or_default();
                println!("  {:<6} {:<10} {}", room.to_string(), position.to_string(), name);
            }
        }

        Ok(())
    }

    fn frame(&self, session: &Session) -> Result<Frame> {
        let config = &session.config;
        match self.frame.as_deref() {
            Some("blank") => Ok(Frame::blank(config.width, config.height)),
            Some(name) => match name.parse::<BattlefieldPreset>() {
                Ok(preset) => Ok(preset.frame()),
                Err(_) => session
                    .factory
                    .load_frame(name)
                    .with_context(|| format!("Failed to load frame '{}'", name)),
            },
            None if is_default_size(config) => Ok(Frame::overhead()),
            None => Ok(Frame::blank(config.width, config.height)),
        }
    }
}

fn is_default_size(config: &MapConfig) -> bool {
    config.width == MapConfig::DEFAULT_SIZE && config.height == MapConfig::DEFAULT_SIZE
}
