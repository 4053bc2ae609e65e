//! Template-driven battlefield construction.
//!
//! A battlefield template is interpreted in passes. Pass 0 invokes room
//! capabilities, which create one subsection per trigger cell. Every later
//! pass invokes connector capabilities, which link the subsections on either
//! side of a connector symbol. All of pass 0 completes before any linking
//! starts. An optional adjacency sweep runs after the last pass.
mod access;
mod legend;
mod sections;

pub use access::{AccessibilitySampler, AccessibleSet};
pub use legend::{
    Axis, BuildCapability, BuildContext, BuildOutcome, CapabilityRole, ConnectorBuilder, Legend,
    LegendBuilder, LegendEntry, LegendError, SubsectionBuilder,
};
pub use sections::{BattlefieldSectionMap, Section};

use tracing::{debug, info};

use crate::config::MapConfig;
use crate::error::{ErrorSeverity, MapError};
use crate::grid::{Cell, Grid, GridPos};
use crate::symbol::{Glyph, Observer, SymbolResolver};
use crate::template::{TemplateError, TemplateGrid};
use crate::world::{Direction, RoomGraph, RoomId, SectionStore};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("connector at {connector} has no subsection at {missing}")]
    MissingAdjacentSubsection { connector: GridPos, missing: GridPos },
}

impl MapError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BuildError::Template(err) => err.severity(),
            BuildError::MissingAdjacentSubsection { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BuildError::Template(err) => err.error_code(),
            BuildError::MissingAdjacentSubsection { .. } => "BUILD_MISSING_ADJACENT_SUBSECTION",
        }
    }
}

/// Interprets templates through a [`Legend`].
#[derive(Clone, Debug)]
pub struct BattlefieldBuilder {
    legend: Legend,
    passes: u32,
    auto_link: bool,
    parent: Option<RoomId>,
    accessible: Option<AccessibleSet>,
}

impl BattlefieldBuilder {
    /// Two passes, no adjacency sweep, every trigger cell accessible.
    pub fn new(legend: Legend) -> Self {
        Self {
            legend,
            passes: 2,
            auto_link: false,
            parent: None,
            accessible: None,
        }
    }

    pub fn from_config(legend: Legend, config: &MapConfig) -> Self {
        Self::new(legend)
            .with_passes(config.passes)
            .with_auto_link(config.auto_link)
    }

    #[must_use]
    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }

    #[must_use]
    pub fn with_auto_link(mut self, auto_link: bool) -> Self {
        self.auto_link = auto_link;
        self
    }

    /// Room the subsections belong to.
    #[must_use]
    pub fn with_parent(mut self, parent: RoomId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Restricts subsection creation to `accessible` cells.
    #[must_use]
    pub fn with_accessible(mut self, accessible: AccessibleSet) -> Self {
        self.accessible = Some(accessible);
        self
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    fn is_accessible(&self, position: GridPos) -> bool {
        self.accessible
            .as_ref()
            .is_none_or(|accessible| accessible.contains(position))
    }

    /// Parses `template` and builds it. An empty template fails before any
    /// subsection is created.
    pub fn build(&self, template: &str, store: &mut dyn SectionStore) -> Result<Battlefield, BuildError> {
        let template = TemplateGrid::parse(template)?;
        self.build_from(&template, store)
    }

    pub fn build_from(
        &self,
        template: &TemplateGrid,
        store: &mut dyn SectionStore,
    ) -> Result<Battlefield, BuildError> {
        let mut sections = BattlefieldSectionMap::new();
        let mut linked = 0;

        for iteration in 0..self.passes {
            for (position, symbol) in template.symbols() {
                let Some(capability) = self.legend.capability(symbol) else {
                    continue;
                };
                if capability.role() == CapabilityRole::Room && !self.is_accessible(position) {
                    continue;
                }

                let mut ctx = BuildContext {
                    iteration,
                    position,
                    symbol,
                    parent: self.parent,
                    sections: &mut sections,
                    store: &mut *store,
                };
                match capability.build(&mut ctx) {
                    Ok(BuildOutcome::Created(room)) => {
                        if !sections.insert(position, room) {
                            debug!(%room, %position, "cell already holds a subsection");
                        }
                    }
                    Ok(BuildOutcome::Linked { exits }) => linked += exits,
                    Ok(BuildOutcome::Skipped) => {}
                    Err(err) if err.severity().is_recoverable() => {
                        debug!(error = %err, capability = capability.name(), "capability skipped");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if self.auto_link {
            let swept = sections.auto_link(store);
            debug!(exits = swept, "adjacency sweep finished");
            linked += swept;
        }

        info!(
            sections = sections.len(),
            exits = linked,
            passes = self.passes,
            "battlefield built"
        );

        let grid = self.draw(template, &sections);
        Ok(Battlefield {
            grid,
            sections,
            parent: self.parent,
        })
    }

    /// Room cells show their trigger symbol, connectors are shown once their
    /// two sides are linked, everything else is blank. Pairs linked without a
    /// connector symbol get one drawn on the empty cell between them.
    fn draw(&self, template: &TemplateGrid, sections: &BattlefieldSectionMap) -> Grid {
        let mut grid = Grid::new(template.width(), template.height());

        for (position, symbol) in template.symbols() {
            let cell = match self.legend.role(symbol) {
                Some(CapabilityRole::Room) if sections.contains(position) => Cell::Room(Glyph::from(symbol)),
                Some(CapabilityRole::Connector(axis)) => {
                    let (before, after) = axis.neighbours(position);
                    if !sections.is_linked(before, after) {
                        continue;
                    }
                    Cell::Connector(axis.connector())
                }
                _ => continue,
            };
            // Template positions lie inside the normalized bounds.
            let _ = grid.set(position, cell);
        }

        for (position, _) in sections.iter() {
            for direction in [Direction::East, Direction::South] {
                let (Some(step), Some(connector)) = (direction.step(), direction.connector()) else {
                    continue;
                };
                let neighbour = position.offset(step);
                if !sections.is_linked(position, neighbour) {
                    continue;
                }
                let between = position.midpoint(neighbour);
                if grid.get(between) == Some(&Cell::Empty) {
                    let _ = grid.set(between, Cell::Connector(connector));
                }
            }
        }

        grid
    }
}

/// A built battlefield: its display grid and the subsections behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Battlefield {
    grid: Grid,
    sections: BattlefieldSectionMap,
    parent: Option<RoomId>,
}

impl Battlefield {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sections(&self) -> &BattlefieldSectionMap {
        &self.sections
    }

    pub fn parent(&self) -> Option<RoomId> {
        self.parent
    }

    pub fn render(&self) -> String {
        self.grid.to_string()
    }

    pub fn into_parts(self) -> (Grid, BattlefieldSectionMap) {
        (self.grid, self.sections)
    }

    /// The battlefield as seen from subsection `observer`.
    ///
    /// The observer's subsection gets the self glyph and occupied
    /// subsections get their presence glyph. Other cells are unchanged.
    pub fn view<G>(&self, graph: &G, resolver: &SymbolResolver, observer: RoomId) -> Grid
    where
        G: RoomGraph + ?Sized,
    {
        let elevation = graph
            .attributes(observer)
            .map_or(0, |attributes| attributes.elevation);
        let viewer = Observer::new(observer, elevation);
        let mut grid = self.grid.clone();

        for (position, section) in self.sections.iter() {
            let Some(room) = graph.attributes(section.room) else {
                continue;
            };
            if let Some(marker) = resolver.marker(&viewer, &room) {
                let _ = grid.set(position, Cell::Room(marker));
            }
        }

        grid
    }

    /// Destroys every subsection. Returns how many were destroyed.
    pub fn teardown(self, store: &mut dyn SectionStore) -> usize {
        let count = self.sections.len();
        for room in self.sections.rooms() {
            store.destroy_section(room);
        }
        info!(sections = count, parent = ?self.parent, "battlefield torn down");
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::BattlefieldPreset;
    use crate::world::{CombatPresence, InMemoryWorld, RoomAttributes};

    fn build(template: &str, passes: u32, auto_link: bool) -> (Battlefield, InMemoryWorld) {
        let mut world = InMemoryWorld::new();
        let battlefield = BattlefieldBuilder::new(Legend::standard())
            .with_passes(passes)
            .with_auto_link(auto_link)
            .build(template, &mut world)
            .unwrap();
        (battlefield, world)
    }

    #[test]
    fn empty_template_creates_nothing() {
        let mut world = InMemoryWorld::new();
        let err = BattlefieldBuilder::new(Legend::standard())
            .build("", &mut world)
            .unwrap_err();

        assert_eq!(err, BuildError::Template(TemplateError::Empty));
        assert_eq!(world.room_count(), 0);
    }

    #[test]
    fn single_pass_places_without_linking() {
        let (battlefield, world) = build("X-X\n| |\nX-X", 1, false);

        assert_eq!(battlefield.sections().len(), 4);
        assert_eq!(world.exit_count(), 0);
        assert_eq!(battlefield.render(), "X   X\n     \nX   X");
    }

    #[test]
    fn second_pass_links_across_connectors() {
        let (battlefield, world) = build("X-X\n| |\nX-X", 2, false);

        assert_eq!(world.exit_count(), 8);
        assert_eq!(battlefield.sections().exit_count(), 8);
        assert_eq!(battlefield.render(), "X ─ X\n|   |\nX ─ X");
    }

    #[test]
    fn dangling_connectors_are_no_ops() {
        let (battlefield, world) = build("X-\n|\n\n-X", 2, false);

        assert_eq!(battlefield.sections().len(), 2);
        assert_eq!(world.exit_count(), 0);
        assert_eq!(battlefield.render(), "X  \n   \n   \n  X");
    }

    #[test]
    fn extra_passes_create_no_duplicate_exits() {
        let (_, world) = build(BattlefieldPreset::Small.template(), 4, false);
        assert_eq!(world.exit_count(), 24);
    }

    #[test]
    fn swept_pairs_get_a_drawn_connector() {
        let (battlefield, world) = build("X X\n\nX X", 1, true);

        assert_eq!(world.exit_count(), 8);
        assert_eq!(battlefield.render(), "X ─ X\n|   |\nX ─ X");
    }

    #[test]
    fn inaccessible_cells_get_no_subsection() {
        let template = TemplateGrid::parse("X-X-X").unwrap();
        let accessible: AccessibleSet = [GridPos::new(0, 0), GridPos::new(0, 2)].into_iter().collect();
        let mut world = InMemoryWorld::new();

        let battlefield = BattlefieldBuilder::new(Legend::standard())
            .with_accessible(accessible)
            .build_from(&template, &mut world)
            .unwrap();

        assert_eq!(battlefield.sections().len(), 2);
        assert_eq!(world.exit_count(), 2);
        assert_eq!(battlefield.render(), "X ─ X    ");
    }

    #[test]
    fn subsections_belong_to_the_parent() {
        let mut world = InMemoryWorld::new();
        let parent = world.insert_room(RoomAttributes::new(RoomId(50)).named("Clearing"));

        let battlefield = BattlefieldBuilder::new(Legend::standard())
            .with_parent(parent)
            .build("X", &mut world)
            .unwrap();

        let room = battlefield.sections().room_at(GridPos::ORIGIN).unwrap();
        assert_eq!(world.attributes(room).unwrap().name, "section of Clearing at 0, 0");
        assert_eq!(battlefield.parent(), Some(parent));
    }

    #[test]
    fn view_marks_observer_and_enemies() {
        let (battlefield, mut world) = build("X-X-X", 2, false);
        let sections = battlefield.sections();
        let me = sections.room_at(GridPos::new(0, 0)).unwrap();
        let foe = sections.room_at(GridPos::new(0, 4)).unwrap();
        if let Some(room) = world.room_mut(foe) {
            room.presence = CombatPresence::Enemy;
        }

        let view = battlefield.view(&world, &SymbolResolver::default(), me);

        assert_eq!(view.get(GridPos::new(0, 0)), Some(&Cell::Room(Glyph::from("|500@|n"))));
        assert_eq!(view.get(GridPos::new(0, 2)), Some(&Cell::Room(Glyph::from('X'))));
        assert_eq!(view.get(GridPos::new(0, 4)), Some(&Cell::Room(Glyph::from("◙"))));
    }

    #[test]
    fn teardown_destroys_every_subsection() {
        let (battlefield, mut world) = build(BattlefieldPreset::Small.template(), 2, false);
        assert_eq!(world.room_count(), 9);

        assert_eq!(battlefield.teardown(&mut world), 9);
        assert_eq!(world.room_count(), 0);
        assert_eq!(world.exit_count(), 0);
    }
}
