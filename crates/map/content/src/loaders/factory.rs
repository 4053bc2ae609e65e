//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use overmap_core::{BattlefieldPreset, Frame, InMemoryWorld, Legend, MapConfig, SymbolTable};
use tracing::debug;

use crate::loaders::{
    ConfigLoader, LegendLoader, LoadResult, SymbolLoader, TemplateLoader, WorldLoader,
};

/// Content factory that loads map content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── symbols.toml
/// ├── legend.ron
/// ├── worlds/
/// │   └── village.ron
/// ├── battlefields/
/// │   └── ambush.txt
/// └── frames/
///     └── tower.txt
/// ```
///
/// `config.toml`, `symbols.toml` and `legend.ron` are optional; the built-in
/// defaults are used when they are absent.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load map configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<MapConfig> {
        self.load_optional("config.toml", ConfigLoader::load)
    }

    /// Load the glyph table from `symbols.toml`.
    pub fn load_symbols(&self) -> LoadResult<SymbolTable> {
        self.load_optional("symbols.toml", SymbolLoader::load)
    }

    /// Load the battlefield legend from `legend.ron`.
    pub fn load_legend(&self) -> LoadResult<Legend> {
        self.load_optional("legend.ron", LegendLoader::load)
    }

    /// Load a world graph from `worlds/{name}.ron`.
    pub fn load_world(&self, name: &str) -> LoadResult<InMemoryWorld> {
        let path = self.data_dir.join("worlds").join(format!("{}.ron", name));
        WorldLoader::load(&path)
    }

    /// Battlefield template text for `name`.
    ///
    /// Preset names (`small`, `medium`, `large`) resolve to the built-in
    /// templates; anything else is read from `battlefields/{name}.txt`.
    pub fn load_template(&self, name: &str) -> LoadResult<String> {
        if let Ok(preset) = name.parse::<BattlefieldPreset>() {
            return Ok(preset.template().to_owned());
        }
        let path = self.data_dir.join("battlefields").join(format!("{}.txt", name));
        TemplateLoader::load(&path)
    }

    /// Load an overhead frame from `frames/{name}.txt`, walls drawn with `█`.
    pub fn load_frame(&self, name: &str) -> LoadResult<Frame> {
        let path = self.data_dir.join("frames").join(format!("{}.txt", name));
        TemplateLoader::load_frame(&path, Frame::WALL)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load_optional<T: Default>(
        &self,
        file: &str,
        load: impl FnOnce(&Path) -> LoadResult<T>,
    ) -> LoadResult<T> {
        let path = self.data_dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "content file absent, using defaults");
            return Ok(T::default());
        }
        load(&path)
    }
}
