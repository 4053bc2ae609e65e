//! Battlefield legend loader.

use std::path::Path;
use std::sync::Arc;

use overmap_core::{Axis, BuildCapability, ConnectorBuilder, Legend, SubsectionBuilder};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Built-in capability a legend entry can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilitySpec {
    /// Creates a subsection per trigger cell.
    Subsection,
    /// Links the subsections on either side along the axis.
    Connector(Axis),
}

impl CapabilitySpec {
    pub fn instantiate(self) -> Arc<dyn BuildCapability> {
        match self {
            CapabilitySpec::Subsection => Arc::new(SubsectionBuilder),
            CapabilitySpec::Connector(axis) => Arc::new(ConnectorBuilder::new(axis)),
        }
    }
}

/// Legend entry structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LegendEntryRon {
    symbols: Vec<char>,
    capability: CapabilitySpec,
}

/// Loader for legends from RON files.
///
/// ```ron
/// [
///     (symbols: ['X', 'O'], capability: subsection),
///     (symbols: ['|'], capability: connector(vertical)),
///     (symbols: ['-'], capability: connector(horizontal)),
/// ]
/// ```
///
/// Ambiguous bindings are rejected when the file is loaded.
pub struct LegendLoader;

impl LegendLoader {
    pub fn load(path: &Path) -> LoadResult<Legend> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Legend> {
        let entries: Vec<LegendEntryRon> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse legend RON: {}", e))?;

        entries
            .into_iter()
            .fold(Legend::builder(), |builder, entry| {
                builder.bind_shared(entry.symbols, entry.capability.instantiate())
            })
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid legend: {}", e))
    }
}
