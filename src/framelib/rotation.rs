//! Fixed equatorial → galactic rotation matrices
//!
//! The published matrices map J2000 equatorial direction cosines onto a
//! galactic Cartesian basis (x toward the galactic centre, z toward the north
//! galactic pole). They are constants: nothing here derives a matrix, it is
//! only applied.
//!
//! Three variants are provided and the caller picks one:
//! - [`NJ`]: the `Nj` matrix of Liu, Zhu & Zhang (2011), arXiv:1010.3773
//! - [`NB`]: the `Nb` matrix of the same paper
//! - [`NE`]: `Nb` with a hand-tuned third row fitted to in-game positions.
//!   It is *not* orthonormal.

use clap::ValueEnum;
use nalgebra::Matrix3;
use serde::Serialize;

use crate::coordinates::cartesian::{CartesianPosition, Game, Mathematical};

/// `Nj` from arXiv:1010.3773
pub const NJ: [[f64; 3]; 3] = [
    [-0.054875539390, -0.873437104725, -0.483834991775],
    [0.494109453633, -0.444829594298, 0.746982248696],
    [-0.867666135681, -0.198076389622, 0.455983794523],
];

/// `Nb` from arXiv:1010.3773
pub const NB: [[f64; 3]; 3] = [
    [-0.066988739410, -0.872755765850, -0.483538914637],
    [0.492728466081, -0.450346958020, 0.744584633279],
    [-0.867600811149, -0.188374601732, 0.460199784785],
];

/// `Nb` with its third row adjusted to match in-game coordinates
pub const NE: [[f64; 3]; 3] = [
    [-0.066988739410, -0.872755765850, -0.483538914637],
    [0.492728466081, -0.450346958020, 0.744584633279],
    [-0.86747076, -0.17863258, 0.4643112],
];

/// Selects one of the built-in matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixChoice {
    Nj,
    #[default]
    Nb,
    Ne,
}

impl MatrixChoice {
    /// The rotation matrix this choice names
    pub fn rotation(self) -> RotationMatrix {
        match self {
            MatrixChoice::Nj => RotationMatrix::from_rows("nj", NJ),
            MatrixChoice::Nb => RotationMatrix::from_rows("nb", NB),
            MatrixChoice::Ne => RotationMatrix::from_rows("ne", NE),
        }
    }
}

/// A named, immutable 3×3 basis-change matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationMatrix {
    name: String,
    rows: [[f64; 3]; 3],
}

impl RotationMatrix {
    /// Wrap a row-major matrix under a display name
    pub fn from_rows(name: impl Into<String>, rows: [[f64; 3]; 3]) -> Self {
        RotationMatrix {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.rows
    }

    /// The matrix as a nalgebra `Matrix3`
    pub fn matrix(&self) -> Matrix3<f64> {
        let r = &self.rows;
        Matrix3::new(
            r[0][0], r[0][1], r[0][2], //
            r[1][0], r[1][1], r[1][2], //
            r[2][0], r[2][1], r[2][2],
        )
    }

    /// Matrix-vector product `M · v`
    ///
    /// `unit` is expected to be a unit direction; it is not normalised here,
    /// so any length it has passes straight through.
    pub fn rotate(&self, unit: &CartesianPosition<Mathematical>) -> CartesianPosition<Mathematical> {
        CartesianPosition::from_vector3(self.matrix() * unit.to_vector3())
    }

    /// Rotate a unit direction, then scale it to `distance`
    pub fn rotate_then_scale(
        &self,
        unit: &CartesianPosition<Mathematical>,
        distance: f64,
    ) -> CartesianPosition<Mathematical> {
        self.rotate(unit) * distance
    }

    /// Whether `M · Mᵀ` is the identity to within `tolerance`
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let m = self.matrix();
        let deviation = m * m.transpose() - Matrix3::identity();
        deviation.iter().all(|d| d.abs() <= tolerance)
    }
}

/// Galactic Cartesian → game axes: `(g_x, g_y, g_z) -> (-g_y, g_z, g_x)`
///
/// Game x is the negated galactic y (lateral, positive toward galactic
/// longitude 270°), game y is the north galactic pole (vertical) and game z
/// points at the galactic centre (depth).
pub fn galactic_to_game(galactic: &CartesianPosition<Mathematical>) -> CartesianPosition<Game> {
    CartesianPosition::new(-galactic.y, galactic.z, galactic.x)
}
