//! Map configuration loader.

use std::path::Path;

use overmap_core::MapConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for map configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`MapConfig`] from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<MapConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MapConfig> {
        let config: MapConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(0.0..=1.0).contains(&config.accessible_ratio) {
            anyhow::bail!(
                "accessible_ratio must be between 0 and 1, got {}",
                config.accessible_ratio
            );
        }
        if config.width == 0 || config.height == 0 {
            anyhow::bail!("map dimensions must be non-zero, got {}x{}", config.width, config.height);
        }

        Ok(config)
    }
}
