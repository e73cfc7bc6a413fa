//! Reference-frame changes: the fixed equatorial → galactic rotation and the
//! single-star frame alignment.

pub mod alignment;
pub mod rotation;

pub use alignment::{CalibrationStar, FrameAlignment};
pub use rotation::{galactic_to_game, MatrixChoice, RotationMatrix};
