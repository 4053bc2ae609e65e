//! Environment overrides for the command-line frontend.
use std::env;
use std::path::PathBuf;

use overmap_core::MapConfig;

/// Settings read from the environment (and `.env`).
///
/// Environment variables:
/// - `OVERMAP_DATA_DIR` - Content directory (default: `data`)
/// - `OVERMAP_WIDTH` - Overhead grid width
/// - `OVERMAP_HEIGHT` - Overhead grid height
/// - `OVERMAP_RADIUS` - Walk radius
/// - `OVERMAP_SEED` - Accessibility sampling seed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub radius: Option<u32>,
    pub seed: Option<u64>,
}

impl CliConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";

    pub fn from_env() -> Self {
        Self {
            data_dir: env::var_os("OVERMAP_DATA_DIR").map(PathBuf::from),
            width: read_env("OVERMAP_WIDTH"),
            height: read_env("OVERMAP_HEIGHT"),
            radius: read_env("OVERMAP_RADIUS"),
            seed: read_env("OVERMAP_SEED"),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DATA_DIR))
    }

    /// Overwrites the fields of `config` that are set here.
    ///
    /// A width or height override without an explicit radius re-derives the
    /// radius so the walk still fits the grid.
    pub fn apply(&self, config: &mut MapConfig) {
        if let Some(width) = self.width {
            config.width = width.max(1);
        }
        if let Some(height) = self.height {
            config.height = height.max(1);
        }
        if self.width.is_some() || self.height.is_some() {
            config.radius = MapConfig::fitting_radius(config.width, config.height);
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
