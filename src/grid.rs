//! Snapping onto the game's fixed-resolution spatial grid
//!
//! The game stores positions on a grid of 1/32 light-year cells. Each axis
//! is snapped independently by truncating toward zero:
//!
//! ```text
//! snapped = trunc(coord * 32) / 32
//! ```
//!
//! This is neither rounding nor flooring: `3.0624 -> 3.03125` and
//! `-0.01 -> 0`. The in-game reference positions of real stars only line up
//! under truncation.

use serde::Serialize;

use crate::constants::GRID_CELLS_PER_LY;
use crate::coordinates::cartesian::{CartesianPosition, Convention};

/// Truncating grid snapper
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridNormalizer {
    cells_per_unit: f64,
}

impl Default for GridNormalizer {
    fn default() -> Self {
        GridNormalizer {
            cells_per_unit: GRID_CELLS_PER_LY,
        }
    }
}

impl GridNormalizer {
    /// A grid with `cells_per_unit` cells per light-year
    pub fn new(cells_per_unit: f64) -> Self {
        GridNormalizer { cells_per_unit }
    }

    pub fn cells_per_unit(&self) -> f64 {
        self.cells_per_unit
    }

    /// Snap one coordinate toward zero
    pub fn snap_coordinate(&self, coord: f64) -> f64 {
        (coord * self.cells_per_unit).trunc() / self.cells_per_unit
    }

    /// Snap each axis independently; the convention is preserved
    pub fn snap<C: Convention>(&self, position: &CartesianPosition<C>) -> CartesianPosition<C> {
        CartesianPosition::new(
            self.snap_coordinate(position.x),
            self.snap_coordinate(position.y),
            self.snap_coordinate(position.z),
        )
    }

    /// Per-axis difference `a - b` measured in grid cells
    pub fn cell_offset<C: Convention>(
        &self,
        a: &CartesianPosition<C>,
        b: &CartesianPosition<C>,
    ) -> [f64; 3] {
        let d = *a - *b;
        [
            d.x * self.cells_per_unit,
            d.y * self.cells_per_unit,
            d.z * self.cells_per_unit,
        ]
    }
}

/// Snap onto the standard 1/32 light-year grid
pub fn snap_to_grid<C: Convention>(position: &CartesianPosition<C>) -> CartesianPosition<C> {
    GridNormalizer::default().snap(position)
}
