/// Relative height of a room compared to the observer.
///
/// Bands partition every elevation difference `d = room - observer`:
///
/// | band      | range              |
/// |-----------|--------------------|
/// | `Lowest`  | `d < -125`         |
/// | `Lower`   | `-125 <= d < -25`  |
/// | `Level`   | `-25 <= d <= 25`   |
/// | `Higher`  | `25 < d <= 125`    |
/// | `Highest` | `d > 125`          |
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElevationBand {
    Lowest,
    Lower,
    Level,
    Higher,
    Highest,
}

impl ElevationBand {
    pub const COUNT: usize = 5;

    pub const fn from_delta(delta: i32) -> Self {
        if delta < -125 {
            ElevationBand::Lowest
        } else if delta < -25 {
            ElevationBand::Lower
        } else if delta <= 25 {
            ElevationBand::Level
        } else if delta <= 125 {
            ElevationBand::Higher
        } else {
            ElevationBand::Highest
        }
    }

    /// Index into a five-entry glyph set.
    pub const fn index(self) -> usize {
        self as usize
    }
}
