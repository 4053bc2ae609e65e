//! Symbol table loader.

use std::path::Path;

use overmap_core::SymbolTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for glyph tables from TOML files.
///
/// ```toml
/// self_outdoor = "|500@|n"
/// unknown = "."
///
/// [sectors]
/// CROSSROADS = "╬"
/// SECT_FOREST = "♣"
/// ```
///
/// A `[sectors]` table replaces the built-in sector glyphs instead of
/// extending them.
pub struct SymbolLoader;

impl SymbolLoader {
    pub fn load(path: &Path) -> LoadResult<SymbolTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SymbolTable> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse symbols TOML: {}", e))
    }
}
