//! # Sexagesimal Angle Module
//!
//! Catalogs publish right ascension as hours, minutes and seconds and
//! declination as degrees, arcminutes and arcseconds. This module turns those
//! fields into signed decimal degrees and radians.
//!
//! ## Sign Convention
//!
//! Declination carries its sign on the degrees field only. The sign is
//! extracted from that field, the magnitudes of all three fields are summed,
//! and the sign is re-applied to the total:
//!
//! ```text
//! dec = sign(d) * (|d| + m/60 + s/3600)
//! ```
//!
//! A degrees field of exactly zero counts as positive, *including* `-0`.
//! A declination such as `-00 30 00` therefore parses as `+0.5°`. This is a
//! known limitation of the field-based convention and is kept as-is.
//!
//! Minutes and seconds are nominally in `[0, 60)` but are not range checked.
//!
//! ## Examples
//!
//! ```rust
//! use edcoords::coordinates::angle::{parse_declination, parse_right_ascension};
//!
//! let ra = parse_right_ascension(14.0, 39.0, 36.204);
//! assert!((ra - 219.90085).abs() < 1e-9);
//!
//! let dec = parse_declination(-60.0, 50.0, 8.23);
//! assert!(dec < -60.8);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::constants::{
    DEG2RAD, DEG360, HOURS_PER_CIRCLE, MINUTES_PER_UNIT, SECONDS_PER_UNIT,
};
use crate::errors::{EdCoordsError, Result};

/// Accepts `14 39 36.204`, `14:39:36.204`, `14h39m36.204s`, `-60d50m08.23s`
/// and `+04°41'36.21"`.
static SEXAGESIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(?P<whole>[+-]?\d+(?:\.\d*)?)\s*(?:[hd°:]\s*|\s+)(?P<minutes>\d+(?:\.\d*)?)\s*(?:[m':′]\s*|\s+)(?P<seconds>\d+(?:\.\d*)?)\s*[s"″]?\s*$"#,
    )
    .expect("sexagesimal pattern is valid")
});

/// Which largest unit a sexagesimal angle is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AngleUnit {
    /// Hours of right ascension (24 per circle)
    Hours,
    /// Degrees of declination (360 per circle)
    Degrees,
}

/// A sexagesimal astronomical angle
///
/// Built once from its raw fields and only read afterwards. `whole` holds the
/// magnitude of the largest unit; the sign lives in `sign` and is never
/// applied to the minute or second components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SexagesimalAngle {
    unit: AngleUnit,
    whole: f64,
    minutes: f64,
    seconds: f64,
    sign: f64,
}

impl SexagesimalAngle {
    /// Right ascension from hours, minutes and seconds
    ///
    /// Hours are expected in `[0, 24)`; right ascension has no sign.
    pub fn right_ascension(hours: f64, minutes: f64, seconds: f64) -> Self {
        SexagesimalAngle {
            unit: AngleUnit::Hours,
            whole: hours,
            minutes,
            seconds,
            sign: 1.0,
        }
    }

    /// Declination from signed degrees, arcminutes and arcseconds
    ///
    /// The sign is taken from `degrees` alone. Zero (positive or negative)
    /// is treated as positive.
    pub fn declination(degrees: f64, minutes: f64, seconds: f64) -> Self {
        let sign = if degrees != 0.0 {
            degrees / degrees.abs()
        } else {
            1.0
        };
        SexagesimalAngle {
            unit: AngleUnit::Degrees,
            whole: degrees.abs(),
            minutes,
            seconds,
            sign,
        }
    }

    /// Parse a textual angle in the given unit
    ///
    /// # Errors
    ///
    /// Returns [`EdCoordsError::InvalidAngle`] when the text has no
    /// recognisable whole/minute/second structure.
    pub fn parse(text: &str, unit: AngleUnit) -> Result<Self> {
        let caps = SEXAGESIMAL
            .captures(text)
            .ok_or_else(|| EdCoordsError::InvalidAngle(text.to_string()))?;
        let field = |name: &str| -> Result<f64> {
            caps[name]
                .parse::<f64>()
                .map_err(|_| EdCoordsError::InvalidAngle(text.to_string()))
        };
        let (whole, minutes, seconds) = (field("whole")?, field("minutes")?, field("seconds")?);

        Ok(match unit {
            AngleUnit::Hours => Self::right_ascension(whole, minutes, seconds),
            AngleUnit::Degrees => Self::declination(whole, minutes, seconds),
        })
    }

    /// Unit class of the largest component
    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// +1.0 or -1.0 (always +1.0 for right ascension)
    pub fn sign(&self) -> f64 {
        self.sign
    }

    /// Signed decimal degrees
    pub fn to_degrees(&self) -> f64 {
        let magnitude =
            self.whole + self.minutes / MINUTES_PER_UNIT + self.seconds / SECONDS_PER_UNIT;
        match self.unit {
            AngleUnit::Hours => magnitude / HOURS_PER_CIRCLE * DEG360,
            AngleUnit::Degrees => self.sign * magnitude,
        }
    }

    /// Signed radians
    pub fn to_radians(&self) -> f64 {
        self.to_degrees() * DEG2RAD
    }
}

impl fmt::Display for SexagesimalAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            AngleUnit::Hours => write!(
                f,
                "{}h {}m {}s ({:.5}° / {:.5} rad)",
                self.whole,
                self.minutes,
                self.seconds,
                self.to_degrees(),
                self.to_radians()
            ),
            AngleUnit::Degrees => write!(
                f,
                "{}{}° {}' {}\" ({:.5}° / {:.5} rad)",
                if self.sign < 0.0 { "-" } else { "+" },
                self.whole,
                self.minutes,
                self.seconds,
                self.to_degrees(),
                self.to_radians()
            ),
        }
    }
}

/// Right ascension in decimal degrees: `(h + m/60 + s/3600) / 24 * 360`
pub fn parse_right_ascension(hours: f64, minutes: f64, seconds: f64) -> f64 {
    SexagesimalAngle::right_ascension(hours, minutes, seconds).to_degrees()
}

/// Declination in signed decimal degrees: `sign(d) * (|d| + m/60 + s/3600)`
pub fn parse_declination(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    SexagesimalAngle::declination(degrees, minutes, seconds).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_right_ascension_alpha_centauri() {
        let ra = parse_right_ascension(14.0, 39.0, 36.204);
        assert_abs_diff_eq!(ra, 219.90085, epsilon = 1e-10);
    }

    #[test]
    fn test_right_ascension_whole_hours() {
        assert_eq!(parse_right_ascension(0.0, 0.0, 0.0), 0.0);
        assert_eq!(parse_right_ascension(6.0, 0.0, 0.0), 90.0);
        assert_eq!(parse_right_ascension(12.0, 0.0, 0.0), 180.0);
    }

    #[test]
    fn test_declination_sign_only_on_degrees() {
        let dec = parse_declination(-60.0, 50.0, 8.23);
        assert_eq!(dec, -(60.0 + 50.0 / 60.0 + 8.23 / 3600.0));

        // A per-field sign would give -60 + 0.8333 + 0.0023
        assert!(dec < -60.0);
    }

    #[test]
    fn test_declination_zero_degrees_is_positive() {
        assert_eq!(parse_declination(0.0, 30.0, 0.0), 0.5);
        assert_eq!(parse_declination(-0.0, 30.0, 0.0), 0.5);
    }

    #[test]
    fn test_declination_positive() {
        let dec = parse_declination(4.0, 41.0, 36.21);
        assert_abs_diff_eq!(dec, 4.693391666666667, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_components_are_accepted() {
        // 90 minutes is 1.5 degrees; no error, no wrapping
        assert_eq!(parse_declination(10.0, 90.0, 0.0), 11.5);
        assert_eq!(parse_right_ascension(1.0, 60.0, 0.0), 30.0);
    }

    #[test]
    fn test_radians() {
        let angle = SexagesimalAngle::declination(-90.0, 0.0, 0.0);
        assert_abs_diff_eq!(angle.to_radians(), -PI / 2.0, epsilon = 1e-15);
        assert_eq!(angle.sign(), -1.0);
        assert_eq!(angle.unit(), AngleUnit::Degrees);
    }

    #[test]
    fn test_parse_text_forms() {
        let forms = ["14 39 36.204", "14:39:36.204", "14h39m36.204s", " 14h 39m 36.204s "];
        for form in forms {
            let angle = SexagesimalAngle::parse(form, AngleUnit::Hours).unwrap();
            assert_abs_diff_eq!(angle.to_degrees(), 219.90085, epsilon = 1e-10);
        }

        let dec = SexagesimalAngle::parse("-60d50m08.23s", AngleUnit::Degrees).unwrap();
        assert_eq!(dec.to_degrees(), parse_declination(-60.0, 50.0, 8.23));

        let dec = SexagesimalAngle::parse("+04°41'36.21\"", AngleUnit::Degrees).unwrap();
        assert_eq!(dec.to_degrees(), parse_declination(4.0, 41.0, 36.21));

        let dec = SexagesimalAngle::parse("-60:50:08.23", AngleUnit::Degrees).unwrap();
        assert_eq!(dec.to_degrees(), parse_declination(-60.0, 50.0, 8.23));
    }

    #[test]
    fn test_parse_text_negative_zero_is_positive() {
        let dec = SexagesimalAngle::parse("-00 30 00", AngleUnit::Degrees).unwrap();
        assert_eq!(dec.to_degrees(), 0.5);
    }

    #[test]
    fn test_parse_text_rejects_garbage() {
        for bad in ["", "14 39", "fourteen 39 36", "14 -39 36", "14 39 36 12"] {
            let result = SexagesimalAngle::parse(bad, AngleUnit::Hours);
            assert_eq!(result, Err(EdCoordsError::InvalidAngle(bad.to_string())));
        }
    }

    #[test]
    fn test_parse_text_keeps_requested_unit() {
        let ra = SexagesimalAngle::parse("14 39 36", AngleUnit::Hours).unwrap();
        assert_eq!(ra.unit(), AngleUnit::Hours);
        assert_eq!(ra.to_degrees(), parse_right_ascension(14.0, 39.0, 36.0));

        let dec = SexagesimalAngle::parse("14 39 36", AngleUnit::Degrees).unwrap();
        assert_eq!(dec.unit(), AngleUnit::Degrees);
        assert_eq!(dec.to_degrees(), parse_declination(14.0, 39.0, 36.0));
    }

    #[test]
    fn test_display() {
        let ra = SexagesimalAngle::right_ascension(14.0, 39.0, 36.204);
        assert_eq!(ra.to_string(), "14h 39m 36.204s (219.90085° / 3.83799 rad)");

        let dec = SexagesimalAngle::declination(-60.0, 50.0, 8.23);
        assert!(dec.to_string().starts_with("-60° 50' 8.23\""));
    }
}
