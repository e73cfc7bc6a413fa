//! # Cartesian Position Module
//!
//! Three-dimensional positions in light-years, tagged at the type level with
//! the axis convention they are expressed in.
//!
//! ## Axis Conventions
//!
//! Two conventions coexist and must never be mixed silently:
//!
//! | Convention      | x              | y                  | z                |
//! |-----------------|----------------|--------------------|------------------|
//! | [`Mathematical`]| in-plane (RA 0°) | in-plane (RA 90°) | polar axis       |
//! | [`Game`]        | lateral        | vertical           | depth            |
//!
//! Spherical formulas, rotation matrices and plane projections all work in
//! the [`Mathematical`] convention. Game coordinates use [`Game`]. The only
//! ways across the boundary are the explicit permutations
//! [`CartesianPosition::to_game`] / [`CartesianPosition::to_mathematical`]
//! (swap y and z) and
//! [`galactic_to_game`](crate::framelib::rotation::galactic_to_game).
//!
//! ```rust
//! use edcoords::coordinates::cartesian::{CartesianPosition, Game};
//!
//! let sol_to_alpha_cen = CartesianPosition::<Game>::new(3.03125, -0.09375, 3.15625);
//! let math = sol_to_alpha_cen.to_mathematical();
//! assert_eq!((math.x, math.y, math.z), (3.03125, 3.15625, -0.09375));
//! ```

use std::fmt;
use std::marker::PhantomData;

use nalgebra::Vector3;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::format_significant;

/// Runtime tag naming an axis convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisConvention {
    /// x, y in the reference plane, z along the polar axis
    Mathematical,
    /// x lateral, y vertical, z depth
    Game,
}

/// Type-level marker for an axis convention
pub trait Convention: fmt::Debug + Clone + Copy + PartialEq + Default {
    /// The runtime tag for this convention
    const TAG: AxisConvention;
}

/// Marker for the mathematical convention (z is the polar axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mathematical;

/// Marker for the game convention (y is vertical)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Game;

impl Convention for Mathematical {
    const TAG: AxisConvention = AxisConvention::Mathematical;
}

impl Convention for Game {
    const TAG: AxisConvention = AxisConvention::Game;
}

/// A Cartesian position or direction in light-years
///
/// Can hold a unit direction or a full position vector; the convention
/// parameter `C` fixes what the three axes mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianPosition<C: Convention> {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    convention: PhantomData<C>,
}

impl<C: Convention> CartesianPosition<C> {
    /// Creates a new position in convention `C`
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        CartesianPosition {
            x,
            y,
            z,
            convention: PhantomData,
        }
    }

    /// The convention this position is expressed in
    pub fn convention(&self) -> AxisConvention {
        C::TAG
    }

    /// Components as an array, in axis order
    pub fn components(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean length: `sqrt(x² + y² + z²)`
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Self> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Dot product with another position in the same convention
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Unsigned angle to `other` in radians, in `[0, π]`
    ///
    /// The normalised dot product is clamped to `[-1, 1]` before `acos` to
    /// absorb floating-point overshoot. Zero-length inputs give NaN.
    pub fn angle_to(&self, other: &Self) -> f64 {
        let cos_angle = self.dot(other) / (self.magnitude() * other.magnitude());
        cos_angle.clamp(-1.0, 1.0).acos()
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3; the caller asserts the convention
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Self::new(vec.x, vec.y, vec.z)
    }
}

impl CartesianPosition<Mathematical> {
    /// Permute into the game convention: `(x, y, z) -> (x, z, y)`
    ///
    /// The mathematical polar axis becomes the game's vertical axis.
    pub fn to_game(&self) -> CartesianPosition<Game> {
        CartesianPosition::new(self.x, self.z, self.y)
    }

    /// Projection onto the x/y reference plane (z zeroed)
    pub fn project_onto_reference_plane(&self) -> Self {
        Self::new(self.x, self.y, 0.0)
    }
}

impl CartesianPosition<Game> {
    /// Permute into the mathematical convention: `(x, y, z) -> (x, z, y)`
    ///
    /// Inverse of [`CartesianPosition::to_game`].
    pub fn to_mathematical(&self) -> CartesianPosition<Mathematical> {
        CartesianPosition::new(self.x, self.z, self.y)
    }
}

/// Twelve significant digits per component
impl<C: Convention> fmt::Display for CartesianPosition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {}]",
            format_significant(self.x, 12),
            format_significant(self.y, 12),
            format_significant(self.z, 12)
        )
    }
}

/// Serialises as `{x, y, z, convention}` so the axis meaning travels with
/// the numbers
impl<C: Convention> Serialize for CartesianPosition<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CartesianPosition", 4)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("z", &self.z)?;
        state.serialize_field("convention", &C::TAG)?;
        state.end()
    }
}

// Arithmetic operations, only between positions of the same convention
impl<C: Convention> std::ops::Add for CartesianPosition<C> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<C: Convention> std::ops::Sub for CartesianPosition<C> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<C: Convention> std::ops::Mul<f64> for CartesianPosition<C> {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl<C: Convention> std::ops::Div<f64> for CartesianPosition<C> {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    type Math = CartesianPosition<Mathematical>;

    #[test]
    fn test_convention_tags() {
        assert_eq!(Math::new(1.0, 2.0, 3.0).convention(), AxisConvention::Mathematical);
        assert_eq!(
            CartesianPosition::<Game>::new(1.0, 2.0, 3.0).convention(),
            AxisConvention::Game
        );
    }

    #[test]
    fn test_axis_permutation_is_explicit() {
        let math = Math::new(1.0, 2.0, 3.0);
        let game = math.to_game();
        assert_eq!(game.components(), [1.0, 3.0, 2.0]);

        // Polar axis ends up vertical
        let north = Math::new(0.0, 0.0, 1.0).to_game();
        assert_eq!(north.components(), [0.0, 1.0, 0.0]);

        // Permutation is its own inverse
        assert_eq!(game.to_mathematical(), math);
    }

    #[test]
    fn test_magnitude_calculation() {
        assert_eq!(Math::new(3.0, 4.0, 0.0).magnitude(), 5.0);
        assert_eq!(Math::new(0.0, 0.0, 0.0).magnitude(), 0.0);

        // Permutation preserves length
        let v = Math::new(1.5, -2.0, 0.25);
        assert_eq!(v.magnitude(), v.to_game().magnitude());
    }

    #[test]
    fn test_normalize() {
        let normalized = Math::new(3.0, 4.0, 0.0).normalize().unwrap();
        assert!((normalized.magnitude() - 1.0).abs() < 1e-15);
        assert!((normalized.x - 0.6).abs() < 1e-15);
        assert!((normalized.y - 0.8).abs() < 1e-15);
        assert_eq!(normalized.z, 0.0);

        assert!(Math::new(0.0, 0.0, 0.0).normalize().is_none());
    }

    #[test]
    fn test_angle_to() {
        let x_axis = Math::new(1.0, 0.0, 0.0);

        assert!((x_axis.angle_to(&Math::new(0.0, 1.0, 0.0)) - PI / 2.0).abs() < 1e-15);
        assert!((x_axis.angle_to(&Math::new(0.0, -1.0, 0.0)) - PI / 2.0).abs() < 1e-15);
        assert!((x_axis.angle_to(&Math::new(-1.0, 0.0, 0.0)) - PI).abs() < 1e-15);
        assert_eq!(x_axis.angle_to(&Math::new(2.0, 0.0, 0.0)), 0.0);

        // Nearly parallel vectors whose normalised dot may overshoot 1
        let a = Math::new(0.1, 0.2, 0.3);
        assert!(!a.angle_to(&(a * 3.0)).is_nan());
    }

    #[test]
    fn test_projection_zeroes_polar_axis() {
        let p = Math::new(1.0, -2.0, 7.5).project_onto_reference_plane();
        assert_eq!(p.components(), [1.0, -2.0, 0.0]);
    }

    #[test]
    fn test_arithmetic_operations() {
        let a = Math::new(1.0, 2.0, 3.0);
        let b = Math::new(4.0, 5.0, 6.0);

        assert_eq!((a + b).components(), [5.0, 7.0, 9.0]);
        assert_eq!((b - a).components(), [3.0, 3.0, 3.0]);
        assert_eq!((a * 2.0).components(), [2.0, 4.0, 6.0]);
        assert_eq!((a / 2.0).components(), [0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_vector3_conversions() {
        let coord = Math::new(1.0, 2.0, 3.0);
        let vec = coord.to_vector3();
        assert_eq!((vec.x, vec.y, vec.z), (1.0, 2.0, 3.0));
        assert_eq!(Math::from_vector3(vec), coord);
    }

    #[test]
    fn test_serialized_with_convention() {
        let game = CartesianPosition::<Game>::new(3.03125, -0.09375, 3.15625);
        assert_eq!(
            serde_json::to_value(game).unwrap(),
            serde_json::json!({"x": 3.03125, "y": -0.09375, "z": 3.15625, "convention": "game"})
        );

        let math = serde_json::to_value(game.to_mathematical()).unwrap();
        assert_eq!(math["convention"], "mathematical");
        assert_eq!(math["y"], 3.15625);
    }

    #[test]
    fn test_display_twelve_significant_digits() {
        let v = CartesianPosition::<Game>::new(3.0474385786765885, -0.08181805153288288, 0.0);
        assert_eq!(v.to_string(), "[3.04743857868 -0.0818180515329 0]");
    }
}
