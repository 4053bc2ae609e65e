//! Entry points for callers that only need the display string.
use crate::battlefield::{BattlefieldBuilder, BattlefieldSectionMap, BuildError, Legend};
use crate::walker::{RoomGraphWalker, WalkError};
use crate::world::{RoomGraph, RoomId, SectionStore};

/// Renders the overhead map around `observer` with the default diamond frame
/// and symbol table.
pub fn render_overhead_map<G>(world: &G, observer: RoomId, radius: u32) -> Result<String, WalkError>
where
    G: RoomGraph + ?Sized,
{
    let map = RoomGraphWalker::default().walk(world, observer, radius)?;
    Ok(map.render())
}

/// Builds a battlefield from `template` and returns its display string and
/// subsection map.
pub fn build_battlefield(
    template: &str,
    legend: &Legend,
    passes: u32,
    auto_link: bool,
    store: &mut dyn SectionStore,
) -> Result<(String, BattlefieldSectionMap), BuildError> {
    let battlefield = BattlefieldBuilder::new(legend.clone())
        .with_passes(passes)
        .with_auto_link(auto_link)
        .build(template, store)?;
    let display = battlefield.render();
    let (_, sections) = battlefield.into_parts();
    Ok((display, sections))
}
