/// Tunables shared by overhead rendering and battlefield builds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Overhead grid width in cells.
    pub width: usize,
    /// Overhead grid height in cells.
    pub height: usize,
    /// Maximum number of exits the walker follows from the observer.
    pub radius: u32,
    /// Fraction of battlefield room cells marked accessible, in `[0, 1]`.
    pub accessible_ratio: f64,
    /// Run the adjacency sweep after the template passes.
    pub auto_link: bool,
    /// Template passes; pass 0 places subsections, later passes link them.
    pub passes: u32,
    /// Base seed for accessibility sampling.
    pub seed: u64,
}

impl MapConfig {
    pub const DEFAULT_SIZE: usize = 21;

    /// Largest radius whose rooms can still land inside a `width x height` grid.
    pub fn fitting_radius(width: usize, height: usize) -> u32 {
        (width.min(height).saturating_sub(1) / 2) as u32
    }

    /// Ratio clamped into `[0, 1]`; NaN counts as 0.
    pub fn clamped_ratio(&self) -> f64 {
        if self.accessible_ratio.is_nan() {
            0.0
        } else {
            self.accessible_ratio.clamp(0.0, 1.0)
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            radius: Self::fitting_radius(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE),
            accessible_ratio: 0.95,
            auto_link: false,
            passes: 2,
            seed: 0,
        }
    }
}
