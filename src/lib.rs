//! edcoords: place real stars on the ED galaxy map
//!
//! This crate converts FK5/J2000 catalog positions (right ascension,
//! declination, parallax) into the game's Cartesian coordinates, in light-years
//! on a 1/32 ly grid.
//!
//! Two independent strategies are provided:
//!
//! - [`convert_absolute`]: rotate the equatorial direction into the galactic
//!   frame with a fixed published matrix, scale by distance, map galactic axes
//!   onto game axes and snap to the grid.
//! - [`convert_calibrated`]: learn right ascension and declination offsets
//!   from one star whose game position is known, and apply them to the query.
//!   Only valid near the calibration star.
//!
//! ```rust
//! use edcoords::{convert_absolute, ConversionConfig, StarInput};
//!
//! let alpha_cen = StarInput::new(14.0, 39.0, 36.204, -60.0, 50.0, 8.23, 742.0).unwrap();
//! let result = convert_absolute(&alpha_cen, &ConversionConfig::default()).unwrap();
//! assert_eq!(result.game_snapped.x, 3.03125);
//! ```

pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod framelib;
pub mod grid;
pub mod pipeline;
pub mod reference;

// Re-export commonly used types
pub use coordinates::{AxisConvention, CartesianPosition, Game, Mathematical, SphericalPosition};
pub use errors::{EdCoordsError, Result};
pub use framelib::{CalibrationStar, FrameAlignment, MatrixChoice, RotationMatrix};
pub use grid::{snap_to_grid, GridNormalizer};
pub use pipeline::{
    convert_absolute, convert_calibrated, AbsoluteConversion, CalibratedConfig,
    CalibratedConversion, ConversionConfig, StarInput,
};
pub use reference::KnownStar;
