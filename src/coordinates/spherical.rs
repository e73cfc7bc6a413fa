//! Spherical positions (distance, right ascension, declination) and their
//! conversion to and from [`Mathematical`] Cartesian vectors.
//!
//! Declination is measured from the equatorial plane, *not* from the pole.
//! The conversion formulas are written in terms of the colatitude
//! `theta = 90° - dec`:
//!
//! ```text
//! x = d * sin(theta) * cos(ra)
//! y = d * sin(theta) * sin(ra)
//! z = d * cos(theta)
//! ```
//!
//! and back:
//!
//! ```text
//! d     = sqrt(x² + y² + z²)
//! theta = acos(z / d)            in [0°, 180°]
//! dec   = 90° - theta
//! ra    = atan2(y, x)            normalised to [0°, 360°)
//! ```
//!
//! Right ascension is undefined at the poles and any value is acceptable
//! there. A zero distance yields NaN angles.
//!
//! A declination past either pole is folded back over it: `dec' = ±180° - dec`
//! with `ra' = ra + 180°`. The Cartesian direction is unchanged by the fold.

use log::warn;
use serde::Serialize;

use super::cartesian::{CartesianPosition, Mathematical};
use crate::constants::{DEG360, MAS_PER_ARCSEC};
use crate::errors::{EdCoordsError, Result};

/// Wrap an angle in degrees into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(DEG360);
    // rem_euclid of a tiny negative value rounds up to exactly 360
    if wrapped >= DEG360 {
        0.0
    } else {
        wrapped
    }
}

/// Fold a declination beyond ±90° back over the pole
///
/// Returns `(ra, dec)` with `dec` in `[-90, 90]`; right ascension is turned
/// by 180° whenever a fold happens. NaN passes through.
pub fn fold_over_pole(ra: f64, dec: f64) -> (f64, f64) {
    if dec.is_nan() || dec.abs() <= 90.0 {
        return (ra, dec);
    }
    let dec = (dec + 180.0).rem_euclid(DEG360) - 180.0;
    if dec > 90.0 {
        (ra + 180.0, 180.0 - dec)
    } else if dec < -90.0 {
        (ra + 180.0, -180.0 - dec)
    } else {
        (ra, dec)
    }
}

/// A position given by distance and equatorial-style angles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SphericalPosition {
    /// Radial distance in light-years
    pub distance: f64,
    /// Right ascension (or longitude) in degrees, `[0, 360)`
    pub ra: f64,
    /// Declination (or latitude) in degrees from the equator, `[-90, 90]`
    pub dec: f64,
}

impl SphericalPosition {
    /// Creates a spherical position
    ///
    /// `dec` is folded into `[-90, 90]` (see [`fold_over_pole`]) and `ra` is
    /// then wrapped into `[0, 360)`.
    pub fn new(distance: f64, ra: f64, dec: f64) -> Self {
        let (ra, dec) = fold_over_pole(ra, dec);
        SphericalPosition {
            distance,
            ra: normalize_degrees(ra),
            dec,
        }
    }

    /// Polar angle from the +z axis in degrees, `90 - dec`
    pub fn colatitude(&self) -> f64 {
        90.0 - self.dec
    }

    /// Same direction at a different distance
    pub fn with_distance(&self, distance: f64) -> Self {
        SphericalPosition { distance, ..*self }
    }

    /// Converts to a Cartesian vector in the mathematical convention
    pub fn to_cartesian(&self) -> CartesianPosition<Mathematical> {
        let theta = self.colatitude().to_radians();
        let ra = self.ra.to_radians();
        CartesianPosition::new(
            self.distance * theta.sin() * ra.cos(),
            self.distance * theta.sin() * ra.sin(),
            self.distance * theta.cos(),
        )
    }

    /// Converts a mathematical-convention Cartesian vector to spherical form
    pub fn from_cartesian(cart: &CartesianPosition<Mathematical>) -> Self {
        let distance = cart.magnitude();
        if distance == 0.0 {
            warn!("Converting a zero-length vector to spherical; angles are undefined");
        }
        let theta = (cart.z / distance).acos().to_degrees();
        let ra = cart.y.atan2(cart.x).to_degrees();
        SphericalPosition::new(distance, ra, 90.0 - theta)
    }
}

/// Distance in parsecs for a parallax in milli-arcseconds: `1 / (p / 1000)`
///
/// # Errors
///
/// Returns [`EdCoordsError::InvalidParallax`] for zero, negative or
/// non-finite parallaxes.
pub fn parsecs_from_parallax(parallax_mas: f64) -> Result<f64> {
    if !parallax_mas.is_finite() || parallax_mas <= 0.0 {
        return Err(EdCoordsError::InvalidParallax(parallax_mas));
    }
    Ok(1.0 / (parallax_mas / MAS_PER_ARCSEC))
}

/// Distance in light-years for a parallax in milli-arcseconds
pub fn distance_from_parallax(parallax_mas: f64, light_years_per_parsec: f64) -> Result<f64> {
    Ok(parsecs_from_parallax(parallax_mas)? * light_years_per_parsec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LY_PER_PARSEC, LY_PER_PARSEC_ROUNDED};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_cardinal_directions() {
        let vernal_equinox = SphericalPosition::new(1.0, 0.0, 0.0).to_cartesian();
        assert_abs_diff_eq!(vernal_equinox.x, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(vernal_equinox.y, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(vernal_equinox.z, 0.0, epsilon = 1e-15);

        let ra_90 = SphericalPosition::new(2.0, 90.0, 0.0).to_cartesian();
        assert_abs_diff_eq!(ra_90.x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ra_90.y, 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ra_90.z, 0.0, epsilon = 1e-15);

        // Declination is from the equator: +90 is the polar axis, not the plane
        let north = SphericalPosition::new(1.0, 0.0, 90.0).to_cartesian();
        assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(north.z, 1.0, epsilon = 1e-15);

        let south = SphericalPosition::new(1.0, 0.0, -90.0).to_cartesian();
        assert_abs_diff_eq!(south.z, -1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_matches_cos_dec_form() {
        // sin(90 - dec) == cos(dec): agrees with the usual direction cosines
        let (ra, dec) = (219.90085_f64, -60.83561944444445_f64);
        let v = SphericalPosition::new(1.0, ra, dec).to_cartesian();
        let (ra, dec) = (ra.to_radians(), dec.to_radians());
        assert_abs_diff_eq!(v.x, dec.cos() * ra.cos(), epsilon = 1e-15);
        assert_abs_diff_eq!(v.y, dec.cos() * ra.sin(), epsilon = 1e-15);
        assert_abs_diff_eq!(v.z, dec.sin(), epsilon = 1e-15);
    }

    #[test]
    fn test_from_cartesian_normalizes_ra() {
        let s = SphericalPosition::from_cartesian(&CartesianPosition::new(0.0, -1.0, 0.0));
        assert_abs_diff_eq!(s.ra, 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.dec, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.distance, 1.0, epsilon = 1e-15);

        let s = SphericalPosition::from_cartesian(&CartesianPosition::new(0.0, 0.0, -3.0));
        assert_abs_diff_eq!(s.dec, -90.0, epsilon = 1e-12);
        assert_eq!(s.distance, 3.0);
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let distance = rng.gen_range(1e-3..1e4);
            let ra = rng.gen_range(0.0..360.0);
            let dec = rng.gen_range(-89.0..89.0);

            let original = SphericalPosition::new(distance, ra, dec);
            let back = SphericalPosition::from_cartesian(&original.to_cartesian());

            assert_abs_diff_eq!(back.distance, distance, epsilon = 1e-9 * distance.max(1.0));
            assert_abs_diff_eq!(back.dec, dec, epsilon = 1e-9);
            // RA near 0/360 may come back on the other side of the seam
            let ra_err = (back.ra - ra).abs();
            assert!(
                ra_err.min(DEG360 - ra_err) < 1e-9,
                "RA mismatch: {} -> {}",
                ra,
                back.ra
            );
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-17), 0.0);
    }

    #[test]
    fn test_declination_folds_over_pole() {
        let north = SphericalPosition::new(1.0, 10.0, 100.0);
        assert_eq!((north.ra, north.dec), (190.0, 80.0));

        let south = SphericalPosition::new(1.0, 300.0, -100.0);
        assert_eq!((south.ra, south.dec), (120.0, -80.0));

        // A full turn past the equator is no fold at all
        let wrapped = SphericalPosition::new(1.0, 45.0, 370.0);
        assert_abs_diff_eq!(wrapped.dec, 10.0, epsilon = 1e-12);
        assert_eq!(wrapped.ra, 45.0);

        // In-range values are stored untouched
        let dec = -(60.0 + 50.0 / 60.0 + 8.23 / 3600.0);
        assert_eq!(SphericalPosition::new(1.0, 219.90085, dec).dec, dec);
        assert!(SphericalPosition::new(1.0, 0.0, f64::NAN).dec.is_nan());
    }

    #[test]
    fn test_fold_keeps_direction() {
        let mut rng = StdRng::seed_from_u64(0xf01d);
        for _ in 0..1_000 {
            let ra: f64 = rng.gen_range(0.0..360.0);
            let dec: f64 = rng.gen_range(-250.0..250.0);
            let folded = SphericalPosition::new(2.0, ra, dec);
            assert!((-90.0..=90.0).contains(&folded.dec), "dec {} -> {}", dec, folded.dec);

            let v = folded.to_cartesian();
            let (theta, ra) = ((90.0 - dec).to_radians(), ra.to_radians());
            assert_abs_diff_eq!(v.x, 2.0 * theta.sin() * ra.cos(), epsilon = 1e-12);
            assert_abs_diff_eq!(v.y, 2.0 * theta.sin() * ra.sin(), epsilon = 1e-12);
            assert_abs_diff_eq!(v.z, 2.0 * theta.cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_distance_is_nan() {
        let s = SphericalPosition::from_cartesian(&CartesianPosition::new(0.0, 0.0, 0.0));
        assert_eq!(s.distance, 0.0);
        assert!(s.dec.is_nan());
    }

    #[test]
    fn test_parallax_distance() {
        assert_abs_diff_eq!(parsecs_from_parallax(742.0).unwrap(), 1.3477088948787062, epsilon = 1e-12);
        assert_abs_diff_eq!(
            distance_from_parallax(1000.0, LY_PER_PARSEC_ROUNDED).unwrap(),
            3.26,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            distance_from_parallax(742.0, LY_PER_PARSEC).unwrap(),
            4.395638513,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_parallax_rejects_non_positive() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                parsecs_from_parallax(bad),
                Err(EdCoordsError::InvalidParallax(_))
            ));
        }
    }
}
