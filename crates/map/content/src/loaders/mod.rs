//! Content loaders for reading map data from files.

pub mod config;
pub mod factory;
pub mod legend;
pub mod symbols;
pub mod template;
pub mod world;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use legend::{CapabilitySpec, LegendLoader};
pub use symbols::SymbolLoader;
pub use template::TemplateLoader;
pub use world::WorldLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
