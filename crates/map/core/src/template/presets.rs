//! Built-in templates.
//!
//! Frame templates are 21x21 with `█` walls and `·` open floor. Battlefield
//! templates use `X` for a subsection, `O` for the centre subsection and
//! `|`/`-` for connectors; `*` marks the inert border.
use super::TemplateGrid;
use crate::grid::{Frame, GridPos};

/// Diamond-shaped frame for regular overhead maps.
pub const OVERHEAD_FRAME: &str = "\
█████████████████████
██████████·██████████
████████·····████████
████████·····████████
██████·········██████
██████·········██████
████·············████
████·············████
██·················██
██·················██
█···················█
██·················██
██·················██
████·············████
████·············████
██████·········██████
██████·········██████
████████·····████████
████████·····████████
██████████·██████████
█████████████████████
";

const SMALL_FRAME: &str = "\
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
████████·····████████
████████·····████████
████████·····████████
████████·····████████
████████·····████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
";

const MEDIUM_FRAME: &str = "\
█████████████████████
█████████████████████
█████████████████████
█████████████████████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
████·············████
█████████████████████
█████████████████████
█████████████████████
█████████████████████
";

const LARGE_FRAME: &str = "\
█████████████████████
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█···················█
█████████████████████
";

const SMALL_BATTLEFIELD: &str = "\
* * * * *

* X-X-X *
  | | |
* X-O-X *
  | | |
* X-X-X *

* * * * *
";

const MEDIUM_BATTLEFIELD: &str = "\
* * * * * * *

* X-X-X-X-X *
  | | | | |
* X-X-X-X-X *
  | | | | |
* X-X-O-X-X *
  | | | | |
* X-X-X-X-X *
  | | | | |
* X-X-X-X-X *

* * * * * * *
";

const LARGE_BATTLEFIELD: &str = "\
* * * * * * * * *

* X-X-X-X-X-X-X *
  | | | | | | |
* X-X-X-X-X-X-X *
  | | | | | | |
* X-X-X-X-X-X-X *
  | | | | | | |
* X-X-X-O-X-X-X *
  | | | | | | |
* X-X-X-X-X-X-X *
  | | | | | | |
* X-X-X-X-X-X-X *
  | | | | | | |
* X-X-X-X-X-X-X *

* * * * * * * * *
";

/// Named battlefield sizes.
///
/// Selecting a preset is equivalent to passing its template text directly.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattlefieldPreset {
    /// 3x3 subsections.
    #[default]
    Small,
    /// 5x5 subsections.
    Medium,
    /// 7x7 subsections.
    Large,
}

impl BattlefieldPreset {
    pub const ALL: [BattlefieldPreset; 3] = [
        BattlefieldPreset::Small,
        BattlefieldPreset::Medium,
        BattlefieldPreset::Large,
    ];

    /// Room area (square metres) from which the medium preset is used.
    pub const MEDIUM_MIN_SIZE: u32 = 225;
    /// Room area (square metres) from which the large preset is used.
    pub const LARGE_MIN_SIZE: u32 = 2500;

    /// Picks a preset from the area of the room hosting the fight.
    ///
    /// Rooms of unknown size get the small preset.
    pub fn for_room_size(size: Option<u32>) -> Self {
        match size.unwrap_or(0) {
            s if s >= Self::LARGE_MIN_SIZE => BattlefieldPreset::Large,
            s if s >= Self::MEDIUM_MIN_SIZE => BattlefieldPreset::Medium,
            _ => BattlefieldPreset::Small,
        }
    }

    /// Builder template text.
    pub fn template(self) -> &'static str {
        match self {
            BattlefieldPreset::Small => SMALL_BATTLEFIELD,
            BattlefieldPreset::Medium => MEDIUM_BATTLEFIELD,
            BattlefieldPreset::Large => LARGE_BATTLEFIELD,
        }
    }

    pub fn template_grid(self) -> TemplateGrid {
        TemplateGrid::preset(self.template())
    }

    /// Subsections per side.
    pub fn side(self) -> usize {
        match self {
            BattlefieldPreset::Small => 3,
            BattlefieldPreset::Medium => 5,
            BattlefieldPreset::Large => 7,
        }
    }

    /// 21x21 overhead frame used while fighting in a room of this size.
    pub fn frame(self) -> Frame {
        let template = match self {
            BattlefieldPreset::Small => SMALL_FRAME,
            BattlefieldPreset::Medium => MEDIUM_FRAME,
            BattlefieldPreset::Large => LARGE_FRAME,
        };
        Frame::from_template(&TemplateGrid::preset(template), Frame::WALL)
    }

    /// Overhead-frame cells a combatant can occupy.
    pub fn room_coords(self) -> Vec<GridPos> {
        self.frame().room_slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_from_room_size() {
        assert_eq!(BattlefieldPreset::for_room_size(None), BattlefieldPreset::Small);
        assert_eq!(BattlefieldPreset::for_room_size(Some(224)), BattlefieldPreset::Small);
        assert_eq!(BattlefieldPreset::for_room_size(Some(225)), BattlefieldPreset::Medium);
        assert_eq!(BattlefieldPreset::for_room_size(Some(2500)), BattlefieldPreset::Large);
        assert_eq!(BattlefieldPreset::for_room_size(Some(10_000)), BattlefieldPreset::Large);
    }

    #[test]
    fn templates_hold_one_trigger_per_subsection() {
        for preset in BattlefieldPreset::ALL {
            let grid = preset.template_grid();
            let rooms = grid.count(|c| matches!(c, 'X' | 'O'));
            assert_eq!(rooms, preset.side() * preset.side(), "{preset}");
            assert_eq!(grid.count(|c| c == 'O'), 1, "{preset}");
        }
    }

    #[test]
    fn room_coords_cover_open_area() {
        for (preset, expected) in BattlefieldPreset::ALL.into_iter().zip([9, 49, 81]) {
            let coords = preset.room_coords();
            assert_eq!(coords.len(), expected, "{preset}");
            assert!(coords.contains(&GridPos::new(10, 10)), "{preset}");
        }
        let small = BattlefieldPreset::Small.room_coords();
        assert!(small.contains(&GridPos::new(8, 12)));
        assert!(!small.contains(&GridPos::new(6, 10)));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Large".parse::<BattlefieldPreset>(), Ok(BattlefieldPreset::Large));
        assert_eq!(BattlefieldPreset::Medium.to_string(), "medium");
    }
}
