//! Frame alignment from a single calibration star
//!
//! With one star known both by its equatorial position and by its game
//! position, the game frame's orientation can be approximated by two
//! offsets:
//!
//! 1. The game position is permuted into the mathematical convention and
//!    converted to spherical form `(ra_g, dec_g, dist_g)`.
//! 2. Both the game vector and the equatorial vector are projected onto the
//!    mathematical x/y plane.
//! 3. Each projection's angle to `(1, 0, 0)` is measured with `acos` of the
//!    clamped, normalised dot product, then signed by the projection's y
//!    component so that it lies in `(-180°, 180°]`.
//! 4. `ΔRA = angle(game) - angle(equatorial)`, `ΔDec = dec_g - dec_eq`.
//!
//! A query `(ra, dec)` is then mapped to `(ra + ΔRA, dec + ΔDec)`. This is a
//! first-order correction around the calibration star, not a rotation of the
//! sphere: the further a query is from the calibration star, the worse the
//! prediction. Projections with no in-plane component (stars near the polar
//! axis) have no defined angle; they are logged and otherwise left alone.

use log::{debug, warn};
use serde::Serialize;

use crate::coordinates::cartesian::{CartesianPosition, Game, Mathematical};
use crate::coordinates::spherical::SphericalPosition;

/// Relative in-plane length below which a projection's angle is meaningless
const DEGENERATE_PROJECTION: f64 = 1e-12;

/// A star whose position is known in both frames
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationStar {
    pub name: String,
    /// Catalog position (distance in light-years, RA/Dec in degrees)
    pub equatorial: SphericalPosition,
    /// Position read off the game's galaxy map
    pub game: CartesianPosition<Game>,
}

impl CalibrationStar {
    pub fn new(
        name: impl Into<String>,
        equatorial: SphericalPosition,
        game: CartesianPosition<Game>,
    ) -> Self {
        CalibrationStar {
            name: name.into(),
            equatorial,
            game,
        }
    }
}

/// Signed angle in degrees between the x/y projection of `v` and `(1, 0, 0)`
pub fn projected_angle(v: &CartesianPosition<Mathematical>) -> f64 {
    let projection = v.project_onto_reference_plane();
    if projection.magnitude() <= DEGENERATE_PROJECTION * v.magnitude() {
        warn!(
            "Projection of {} onto the reference plane is degenerate; its angle is undefined",
            v
        );
    }
    let reference = CartesianPosition::<Mathematical>::new(1.0, 0.0, 0.0);
    let unsigned = projection.angle_to(&reference).to_degrees();
    if projection.y < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Right ascension and declination offsets from the equatorial frame to the
/// game frame, valid near the calibration star
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameAlignment {
    /// Offset added to right ascension, degrees
    pub delta_ra: f64,
    /// Offset added to declination, degrees
    pub delta_dec: f64,
    /// The calibration star's game position in spherical form
    pub game_spherical: SphericalPosition,
    /// The calibration star's equatorial direction at the game distance
    pub equatorial_vector: CartesianPosition<Mathematical>,
    /// Projected angle of the game vector, degrees
    pub game_angle: f64,
    /// Projected angle of the equatorial vector, degrees
    pub equatorial_angle: f64,
}

impl FrameAlignment {
    /// Derive the offsets from one calibration star
    pub fn from_calibration(star: &CalibrationStar) -> Self {
        let game_math = star.game.to_mathematical();
        let game_spherical = SphericalPosition::from_cartesian(&game_math);

        // Only the direction matters for the projection; use the game distance
        // so both vectors are on the same scale in diagnostics.
        let equatorial_vector = star
            .equatorial
            .with_distance(game_spherical.distance)
            .to_cartesian();

        let game_angle = projected_angle(&game_math);
        let equatorial_angle = projected_angle(&equatorial_vector);

        let alignment = FrameAlignment {
            delta_ra: game_angle - equatorial_angle,
            delta_dec: game_spherical.dec - star.equatorial.dec,
            game_spherical,
            equatorial_vector,
            game_angle,
            equatorial_angle,
        };
        debug!(
            "Alignment from {}: dRA = {:.5}, dDec = {:.5}",
            star.name, alignment.delta_ra, alignment.delta_dec
        );
        alignment
    }

    /// Map an equatorial spherical position into game-frame spherical form
    ///
    /// Distance is carried through unchanged. A shifted declination that
    /// passes a pole is folded back into `[-90, 90]`.
    pub fn apply(&self, query: &SphericalPosition) -> SphericalPosition {
        SphericalPosition::new(
            query.distance,
            query.ra + self.delta_ra,
            query.dec + self.delta_dec,
        )
    }

    /// Predicted game-convention position for `query` at `query.distance`
    pub fn predict(&self, query: &SphericalPosition) -> CartesianPosition<Game> {
        self.apply(query).to_cartesian().to_game()
    }
}
