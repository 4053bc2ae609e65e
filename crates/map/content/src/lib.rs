//! Data-driven content for the overhead map engine.
//!
//! Loaders read RON/TOML data files into `overmap-core` types:
//! - World graphs (rooms and exits, RON)
//! - Battlefield legends (symbol to capability bindings, RON)
//! - Symbol tables (glyphs per sector type, TOML)
//! - Map configuration (TOML)
//! - Battlefield templates and frames (plain text)
//!
//! Content is read once by frontends and handed to the engine; the engine never
//! touches the filesystem.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CapabilitySpec, ConfigLoader, ContentFactory, LegendLoader, SymbolLoader, TemplateLoader,
    WorldLoader,
};
