//! Plain-text battlefield templates and frames.

use std::path::Path;

use overmap_core::{Frame, TemplateGrid};

use crate::loaders::{LoadResult, read_file};

/// Loader for template text files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Reads and validates a battlefield template.
    ///
    /// Returns the raw text, since that is what the builder consumes.
    pub fn load(path: &Path) -> LoadResult<String> {
        let content = read_file(path)?;
        TemplateGrid::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid template {}: {}", path.display(), e))?;
        Ok(content)
    }

    /// Reads an overhead frame; `wall` marks closed cells.
    pub fn load_frame(path: &Path, wall: char) -> LoadResult<Frame> {
        let content = read_file(path)?;
        Frame::parse(&content, wall)
            .map_err(|e| anyhow::anyhow!("Invalid frame {}: {}", path.display(), e))
    }
}
