//! Symbol to build-capability dispatch table.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{BattlefieldSectionMap, BuildError};
use crate::error::{ErrorSeverity, MapError};
use crate::grid::{Connector, GridPos};
use crate::template::TemplateGrid;
use crate::world::{Direction, RoomId, SectionStore};

/// Orientation of a connector symbol.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Axis {
    /// Links the cells above and below.
    Vertical,
    /// Links the cells left and right.
    Horizontal,
}

impl Axis {
    /// Cells on either side of a connector at `position`, in
    /// north-to-south or west-to-east order.
    pub const fn neighbours(self, position: GridPos) -> (GridPos, GridPos) {
        match self {
            Axis::Vertical => (position.offset((-1, 0)), position.offset((1, 0))),
            Axis::Horizontal => (position.offset((0, -1)), position.offset((0, 1))),
        }
    }

    /// Direction of the exit leading from the first neighbour to the second.
    pub const fn forward(self) -> Direction {
        match self {
            Axis::Vertical => Direction::South,
            Axis::Horizontal => Direction::East,
        }
    }

    pub const fn connector(self) -> Connector {
        match self {
            Axis::Vertical => Connector::Vertical,
            Axis::Horizontal => Connector::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityRole {
    /// Creates a subsection during pass 0.
    Room,
    /// Links subsections during later passes.
    Connector(Axis),
}

/// Everything a capability may read or touch while handling one cell.
pub struct BuildContext<'a> {
    pub iteration: u32,
    pub position: GridPos,
    pub symbol: char,
    pub parent: Option<RoomId>,
    pub sections: &'a mut BattlefieldSectionMap,
    pub store: &'a mut dyn SectionStore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Nothing to do for this iteration.
    Skipped,
    /// A subsection was created; the builder records it at the cell.
    Created(RoomId),
    /// `exits` new exits were created between two subsections.
    Linked { exits: usize },
}

/// Handler invoked for each template cell whose symbol it is bound to.
pub trait BuildCapability: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn role(&self) -> CapabilityRole;

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<BuildOutcome, BuildError>;
}

/// Creates one subsection per trigger cell, on the first iteration only.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubsectionBuilder;

impl BuildCapability for SubsectionBuilder {
    fn name(&self) -> &str {
        "subsection"
    }

    fn role(&self) -> CapabilityRole {
        CapabilityRole::Room
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<BuildOutcome, BuildError> {
        if ctx.iteration > 0 || ctx.sections.contains(ctx.position) {
            return Ok(BuildOutcome::Skipped);
        }
        let room = ctx.store.create_section(ctx.parent, ctx.position);
        debug!(%room, position = %ctx.position, "created battlefield subsection");
        Ok(BuildOutcome::Created(room))
    }
}

/// Creates the exit pair across a connector symbol.
///
/// Does nothing on iteration 0, when subsections do not exist yet.
#[derive(Clone, Copy, Debug)]
pub struct ConnectorBuilder {
    axis: Axis,
}

impl ConnectorBuilder {
    pub const fn new(axis: Axis) -> Self {
        Self { axis }
    }

    pub const fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    pub const fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub const fn axis(&self) -> Axis {
        self.axis
    }
}

impl BuildCapability for ConnectorBuilder {
    fn name(&self) -> &str {
        match self.axis {
            Axis::Vertical => "vertical_connector",
            Axis::Horizontal => "horizontal_connector",
        }
    }

    fn role(&self) -> CapabilityRole {
        CapabilityRole::Connector(self.axis)
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Result<BuildOutcome, BuildError> {
        if ctx.iteration == 0 {
            return Ok(BuildOutcome::Skipped);
        }

        let (before, after) = self.axis.neighbours(ctx.position);
        for side in [before, after] {
            if !ctx.sections.contains(side) {
                return Err(BuildError::MissingAdjacentSubsection {
                    connector: ctx.position,
                    missing: side,
                });
            }
        }

        let exits = ctx
            .sections
            .link(before, self.axis.forward(), after, &mut *ctx.store);
        if exits == 0 {
            return Ok(BuildOutcome::Skipped);
        }
        debug!(connector = %ctx.position, exits, "linked battlefield subsections");
        Ok(BuildOutcome::Linked { exits })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LegendError {
    #[error("symbol {symbol:?} is bound to more than one capability")]
    AmbiguousSymbol { symbol: char },

    #[error("capability `{capability}` is bound to no symbols")]
    NoSymbols { capability: String },
}

impl MapError for LegendError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            LegendError::AmbiguousSymbol { .. } => "LEGEND_AMBIGUOUS_SYMBOL",
            LegendError::NoSymbols { .. } => "LEGEND_NO_SYMBOLS",
        }
    }
}

/// One binding: several trigger symbols sharing one capability.
#[derive(Clone, Debug)]
pub struct LegendEntry {
    pub symbols: Vec<char>,
    pub capability: Arc<dyn BuildCapability>,
}

/// Validated dispatch table. Every symbol maps to exactly one capability.
#[derive(Clone, Debug)]
pub struct Legend {
    table: BTreeMap<char, Arc<dyn BuildCapability>>,
}

impl Legend {
    pub fn builder() -> LegendBuilder {
        LegendBuilder::default()
    }

    /// `X`/`O` create subsections, `|` and `-` link them.
    pub fn standard() -> Self {
        let room: Arc<dyn BuildCapability> = Arc::new(SubsectionBuilder);
        let mut table = BTreeMap::new();
        table.insert('X', Arc::clone(&room));
        table.insert('O', room);
        table.insert('|', Arc::new(ConnectorBuilder::vertical()) as Arc<dyn BuildCapability>);
        table.insert('-', Arc::new(ConnectorBuilder::horizontal()) as Arc<dyn BuildCapability>);
        Self { table }
    }

    pub fn capability(&self, symbol: char) -> Option<&Arc<dyn BuildCapability>> {
        self.table.get(&symbol)
    }

    pub fn role(&self, symbol: char) -> Option<CapabilityRole> {
        self.capability(symbol).map(|capability| capability.role())
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.table.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Template cells whose symbol is bound to a room capability.
    pub fn room_positions(&self, template: &TemplateGrid) -> Vec<GridPos> {
        template
            .symbols()
            .filter(|(_, symbol)| self.role(*symbol) == Some(CapabilityRole::Room))
            .map(|(position, _)| position)
            .collect()
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::standard()
    }
}

/// Collects bindings and rejects ambiguous ones in [`LegendBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct LegendBuilder {
    entries: Vec<LegendEntry>,
}

impl LegendBuilder {
    #[must_use]
    pub fn bind<C>(self, symbols: impl IntoIterator<Item = char>, capability: C) -> Self
    where
        C: BuildCapability + 'static,
    {
        self.bind_shared(symbols, Arc::new(capability))
    }

    #[must_use]
    pub fn bind_shared(
        mut self,
        symbols: impl IntoIterator<Item = char>,
        capability: Arc<dyn BuildCapability>,
    ) -> Self {
        self.entries.push(LegendEntry {
            symbols: symbols.into_iter().collect(),
            capability,
        });
        self
    }

    #[must_use]
    pub fn entry(mut self, entry: LegendEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> Result<Legend, LegendError> {
        let mut table = BTreeMap::new();

        for LegendEntry { mut symbols, capability } in self.entries {
            if symbols.is_empty() {
                return Err(LegendError::NoSymbols {
                    capability: capability.name().to_owned(),
                });
            }
            symbols.sort_unstable();
            symbols.dedup();
            for symbol in symbols {
                if table.insert(symbol, Arc::clone(&capability)).is_some() {
                    return Err(LegendError::AmbiguousSymbol { symbol });
                }
            }
        }

        Ok(Legend { table })
    }
}
