//! Battlefield construction from a template.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use overmap_core::{
    AccessibilitySampler, BattlefieldBuilder, BattlefieldPreset, GridPos, InMemoryWorld, RoomGraph,
    RoomId, SymbolResolver, TemplateGrid,
};
use serde_json::json;
use tracing::info;

use super::Session;

/// Build a battlefield from a template
#[derive(Parser)]
pub struct Battlefield {
    /// Preset name (small, medium, large) or a file under battlefields/
    #[arg(short, long, value_name = "NAME")]
    template: Option<String>,

    /// World file the parent room is read from
    #[arg(short, long, value_name = "NAME", requires = "parent")]
    world: Option<String>,

    /// Parent room; its size picks the preset when no template is given
    #[arg(short, long, value_name = "ROOM")]
    parent: Option<u64>,

    /// Number of template passes
    #[arg(long)]
    passes: Option<u32>,

    /// Link every pair of orthogonally adjacent subsections
    #[arg(long)]
    auto_link: bool,

    /// Mark only a sampled share of room cells accessible
    #[arg(long)]
    sample: bool,

    /// Sampling seed (overrides OVERMAP_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Show the battlefield as seen from the starting subsection
    #[arg(long)]
    view: bool,

    /// Print the subsection map as JSON after the grid
    #[arg(long)]
    json: bool,
}

impl Battlefield {
    pub fn execute(self, session: &Session) -> Result<()> {
        let mut world = match &self.world {
            Some(name) => session
                .factory
                .load_world(name)
                .with_context(|| format!("Failed to load world '{}'", name))?,
            None => InMemoryWorld::new(),
        };
        let parent = self.parent.map(RoomId);
        if let Some(parent) = parent.filter(|room| !world.contains(*room)) {
            anyhow::bail!("Parent room {} is not in the world", parent);
        }

        let template = match &self.template {
            Some(name) => session
                .factory
                .load_template(name)
                .with_context(|| format!("Failed to load template '{}'", name))?,
            None => {
                let size = parent
                    .and_then(|room| world.attributes(room))
                    .and_then(|room| room.size);
                BattlefieldPreset::for_room_size(size).template().to_owned()
            }
        };
        let template = TemplateGrid::parse(&template)?;

        let config = &session.config;
        let legend = session.factory.load_legend().context("Failed to load legend.ron")?;
        let mut builder = BattlefieldBuilder::from_config(legend, config)
            .with_passes(self.passes.unwrap_or(config.passes))
            .with_auto_link(self.auto_link || config.auto_link);
        if let Some(parent) = parent {
            builder = builder.with_parent(parent);
        }

        let sampler = AccessibilitySampler::new(config.clamped_ratio(), self.seed.unwrap_or(config.seed));
        let salt = parent.map_or(0, |room| room.0);
        let mut start = None;
        if self.sample {
            let accessible = sampler.sample(&builder.legend().room_positions(&template), salt);
            info!(accessible = accessible.len(), "sampled accessible cells");
            start = sampler.choose_start(&accessible, salt);
            builder = builder.with_accessible(accessible);
        }

        let battlefield = builder.build_from(&template, &mut world)?;
        println!("{}", battlefield.render());

        if self.view {
            let start = start.or_else(|| centre_section(&battlefield));
            if let Some(room) = start.and_then(|cell| battlefield.sections().room_at(cell)) {
                let symbols = session.factory.load_symbols().context("Failed to load symbols.toml")?;
                let view = battlefield.view(&world, &SymbolResolver::new(symbols), room);
                println!();
                println!("{}", style(format!("View from {}", room)).bold());
                println!("{}", view);
            }
        }

        if self.json {
            let sections: Vec<_> = battlefield
                .sections()
                .iter()
                .map(|(cell, section)| {
                    let exits: serde_json::Map<String, serde_json::Value> = section
                        .exits
                        .iter()
                        .map(|(direction, room)| (direction.to_string(), json!(room.0)))
                        .collect();
                    json!({ "row": cell.row, "col": cell.col, "room": section.room.0, "exits": exits })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }

        let destroyed = battlefield.teardown(&mut world);
        info!(destroyed, "combat over");
        Ok(())
    }
}

/// Subsection closest to the middle of the template.
fn centre_section(battlefield: &overmap_core::Battlefield) -> Option<GridPos> {
    let centre = battlefield.grid().center();
    battlefield
        .sections()
        .iter()
        .map(|(cell, _)| cell)
        .min_by_key(|cell| (cell.row - centre.row).abs() + (cell.col - centre.col).abs())
}
