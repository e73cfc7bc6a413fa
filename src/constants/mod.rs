//! Constants module for coordinate conversion

use std::f64::consts::PI;

// Distances
/// Light-years per parsec, rounded as the in-game reference table was built with
pub const LY_PER_PARSEC_ROUNDED: f64 = 3.26;
/// Light-years per parsec to ten significant digits
pub const LY_PER_PARSEC: f64 = 3.261_563_777;
/// Milli-arcseconds per arcsecond
pub const MAS_PER_ARCSEC: f64 = 1_000.0;

// Angles
/// Degrees in a complete circle
pub const DEG360: f64 = 360.0;
/// Hours of right ascension in a complete circle
pub const HOURS_PER_CIRCLE: f64 = 24.0;
/// Minutes per hour or per degree
pub const MINUTES_PER_UNIT: f64 = 60.0;
/// Seconds per hour or per degree
pub const SECONDS_PER_UNIT: f64 = 3_600.0;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;

// Game grid
/// Cells per light-year on the in-game spatial grid
pub const GRID_CELLS_PER_LY: f64 = 32.0;
/// Edge length of one grid cell in light-years
pub const GRID_CELL_LY: f64 = 1.0 / GRID_CELLS_PER_LY;
