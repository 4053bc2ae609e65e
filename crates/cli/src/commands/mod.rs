//! Subcommands.

mod battlefield;
mod look;

pub use battlefield::Battlefield;
pub use look::Look;

use overmap_content::ContentFactory;
use overmap_core::MapConfig;

/// Content and settings shared by every subcommand.
pub struct Session {
    pub factory: ContentFactory,
    pub config: MapConfig,
}
