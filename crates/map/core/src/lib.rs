//! Overhead map rendering and battlefield construction over a room graph.
//!
//! `overmap-core` is pure and synchronous. [`walker::RoomGraphWalker`] explores
//! the rooms around an observer and draws them onto a fixed-size [`Grid`];
//! [`battlefield::BattlefieldBuilder`] turns an ASCII template into linked
//! subsections through a [`Legend`] of build capabilities. Rooms are read
//! through [`RoomGraph`] and subsections created through [`SectionStore`], so
//! the crate never owns world state.
pub mod api;
pub mod battlefield;
pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod symbol;
pub mod template;
pub mod walker;
pub mod world;

pub use api::{build_battlefield, render_overhead_map};
pub use battlefield::{
    AccessibilitySampler, AccessibleSet, Axis, Battlefield, BattlefieldBuilder,
    BattlefieldSectionMap, BuildCapability, BuildContext, BuildError, BuildOutcome, CapabilityRole,
    ConnectorBuilder, Legend, LegendBuilder, LegendEntry, LegendError, Section, SubsectionBuilder,
};
pub use config::MapConfig;
pub use error::{ErrorSeverity, MapError};
pub use grid::{Cell, Connector, Frame, Grid, GridError, GridPos, GridRenderer};
pub use rng::{PcgRng, RngOracle};
pub use symbol::{ElevationBand, Glyph, GlyphSet, GlyphSetError, Observer, SymbolResolver, SymbolTable};
pub use template::{BattlefieldPreset, TemplateError, TemplateGrid};
pub use walker::{OverheadMap, RoomGraphWalker, WalkError};
pub use world::{
    CombatPresence, Direction, Exit, InMemoryWorld, RoomAttributes, RoomGraph, RoomId, SectionStore,
};
