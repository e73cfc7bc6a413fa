//! The two conversion pipelines
//!
//! - **Absolute**: parse angles, build the equatorial unit vector, rotate it
//!   with a fixed matrix, scale by distance, map galactic axes onto game
//!   axes and snap to the grid. See [`convert_absolute`].
//! - **Calibrated**: parse angles, derive a [`FrameAlignment`] from one
//!   calibration star and apply its offsets to the query. See
//!   [`convert_calibrated`].
//!
//! The pipelines are alternatives; neither feeds the other. Both are pure
//! functions of their input and configuration, and both return a report
//! carrying every intermediate value for diagnostics.

use std::fmt;

use log::{debug, info, warn};
use serde::Serialize;

use crate::constants::{LY_PER_PARSEC, LY_PER_PARSEC_ROUNDED};
use crate::coordinates::angle::{AngleUnit, SexagesimalAngle};
use crate::coordinates::cartesian::{CartesianPosition, Game, Mathematical};
use crate::coordinates::spherical::{distance_from_parallax, parsecs_from_parallax, SphericalPosition};
use crate::errors::{parse_field, EdCoordsError, Result};
use crate::framelib::alignment::{CalibrationStar, FrameAlignment};
use crate::framelib::rotation::{galactic_to_game, MatrixChoice, RotationMatrix};
use crate::grid::GridNormalizer;
use crate::reference::default_calibration;

/// One star's catalog input: RA, Dec and parallax
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarInput {
    right_ascension: SexagesimalAngle,
    declination: SexagesimalAngle,
    parallax_mas: f64,
}

impl StarInput {
    /// Field names in command-line order
    pub const FIELD_NAMES: [&'static str; 7] = [
        "ra_hours",
        "ra_minutes",
        "ra_seconds",
        "dec_degrees",
        "dec_minutes",
        "dec_seconds",
        "parallax_mas",
    ];

    /// Build from numeric fields
    ///
    /// # Errors
    ///
    /// [`EdCoordsError::InvalidParallax`] unless the parallax is positive.
    pub fn new(
        ra_hours: f64,
        ra_minutes: f64,
        ra_seconds: f64,
        dec_degrees: f64,
        dec_minutes: f64,
        dec_seconds: f64,
        parallax_mas: f64,
    ) -> Result<Self> {
        parsecs_from_parallax(parallax_mas)?;
        Ok(StarInput {
            right_ascension: SexagesimalAngle::right_ascension(ra_hours, ra_minutes, ra_seconds),
            declination: SexagesimalAngle::declination(dec_degrees, dec_minutes, dec_seconds),
            parallax_mas,
        })
    }

    /// Build from the seven textual fields of [`StarInput::FIELD_NAMES`]
    ///
    /// Every field is parsed before any conversion runs. The first missing or
    /// non-numeric field is reported by name. A leading `+` on the
    /// declination degrees is accepted.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        let mut values = [0.0; 7];
        for (i, &name) in Self::FIELD_NAMES.iter().enumerate() {
            let raw = fields
                .get(i)
                .ok_or(EdCoordsError::MissingField { field: name })?;
            values[i] = parse_field(name, raw.as_ref())?;
        }
        if fields.len() > values.len() {
            warn!("Ignoring {} extra input field(s)", fields.len() - values.len());
        }
        let [ra_h, ra_m, ra_s, dec_d, dec_m, dec_s, parallax] = values;
        Self::new(ra_h, ra_m, ra_s, dec_d, dec_m, dec_s, parallax)
    }

    /// Build from textual RA and Dec (any form [`SexagesimalAngle::parse`]
    /// accepts) and a numeric parallax in milli-arcseconds
    ///
    /// # Errors
    ///
    /// [`EdCoordsError::InvalidAngle`] for unreadable angles,
    /// [`EdCoordsError::InvalidNumber`] or [`EdCoordsError::InvalidParallax`]
    /// for a bad parallax.
    pub fn from_text(right_ascension: &str, declination: &str, parallax_mas: &str) -> Result<Self> {
        let right_ascension = SexagesimalAngle::parse(right_ascension, AngleUnit::Hours)?;
        let declination = SexagesimalAngle::parse(declination, AngleUnit::Degrees)?;
        let parallax_mas = parse_field("parallax_mas", parallax_mas)?;
        parsecs_from_parallax(parallax_mas)?;
        Ok(StarInput {
            right_ascension,
            declination,
            parallax_mas,
        })
    }

    pub fn right_ascension(&self) -> &SexagesimalAngle {
        &self.right_ascension
    }

    pub fn declination(&self) -> &SexagesimalAngle {
        &self.declination
    }

    pub fn parallax_mas(&self) -> f64 {
        self.parallax_mas
    }

    /// Distance in light-years for the given parsec conversion factor
    pub fn distance(&self, light_years_per_parsec: f64) -> Result<f64> {
        distance_from_parallax(self.parallax_mas, light_years_per_parsec)
    }

    /// Catalog position as (distance, RA°, Dec°)
    pub fn spherical(&self, light_years_per_parsec: f64) -> Result<SphericalPosition> {
        Ok(SphericalPosition::new(
            self.distance(light_years_per_parsec)?,
            self.right_ascension.to_degrees(),
            self.declination.to_degrees(),
        ))
    }
}

/// Settings for the absolute pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionConfig {
    pub rotation: RotationMatrix,
    pub light_years_per_parsec: f64,
    pub grid: GridNormalizer,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            rotation: MatrixChoice::default().rotation(),
            light_years_per_parsec: LY_PER_PARSEC_ROUNDED,
            grid: GridNormalizer::default(),
        }
    }
}

impl ConversionConfig {
    /// Default settings with one of the built-in matrices
    pub fn with_matrix(choice: MatrixChoice) -> Self {
        ConversionConfig {
            rotation: choice.rotation(),
            ..Self::default()
        }
    }
}

/// Every stage of an absolute conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsoluteConversion {
    pub input: StarInput,
    pub config: ConversionConfig,
    /// Equatorial direction cosines
    pub equatorial_unit: CartesianPosition<Mathematical>,
    /// Galactic direction cosines
    pub galactic_unit: CartesianPosition<Mathematical>,
    pub parsecs: f64,
    pub light_years: f64,
    /// Galactic position in light-years
    pub galactic: CartesianPosition<Mathematical>,
    /// Game position before snapping
    pub game: CartesianPosition<Game>,
    /// Game position on the grid
    pub game_snapped: CartesianPosition<Game>,
}

/// Convert with a fixed rotation matrix, then snap to the game grid
pub fn convert_absolute(input: &StarInput, config: &ConversionConfig) -> Result<AbsoluteConversion> {
    let direction = SphericalPosition::new(
        1.0,
        input.right_ascension.to_degrees(),
        input.declination.to_degrees(),
    );
    let equatorial_unit = direction.to_cartesian();
    debug!("Equatorial unit vector: {}", equatorial_unit);

    let galactic_unit = config.rotation.rotate(&equatorial_unit);
    debug!("Galactic unit vector ({}): {}", config.rotation.name(), galactic_unit);

    let parsecs = parsecs_from_parallax(input.parallax_mas)?;
    let light_years = parsecs * config.light_years_per_parsec;
    let galactic = config.rotation.rotate_then_scale(&equatorial_unit, light_years);
    let game = galactic_to_game(&galactic);
    let game_snapped = config.grid.snap(&game);
    info!(
        "{} at {:.5} ly -> game {} (grid {})",
        input.right_ascension, light_years, game, game_snapped
    );

    Ok(AbsoluteConversion {
        input: *input,
        config: config.clone(),
        equatorial_unit,
        galactic_unit,
        parsecs,
        light_years,
        galactic,
        game,
        game_snapped,
    })
}

impl fmt::Display for AbsoluteConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RA : {}", self.input.right_ascension)?;
        writeln!(f, "Dec: {}", self.input.declination)?;
        writeln!(f, "Equatorial unit  {}", self.equatorial_unit)?;
        writeln!(f, "Using {}", self.config.rotation.name())?;
        writeln!(f, "Galactic unit    {}", self.galactic_unit)?;
        writeln!(f, "Distance (Parsecs): {:.5}", self.parsecs)?;
        writeln!(f, "Distance (Lightyears): {:.5}", self.light_years)?;
        writeln!(f, "Galactic         {}", self.galactic)?;
        writeln!(f, "Game             {}", self.game)?;
        write!(f, "Game (grid)      {}", self.game_snapped)
    }
}

/// Settings for the calibrated pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibratedConfig {
    pub calibration: CalibrationStar,
    pub light_years_per_parsec: f64,
    pub grid: GridNormalizer,
}

impl CalibratedConfig {
    pub fn new(calibration: CalibrationStar, light_years_per_parsec: f64) -> Self {
        CalibratedConfig {
            calibration,
            light_years_per_parsec,
            grid: GridNormalizer::default(),
        }
    }

    /// Alpha Centauri calibration with the full-precision parsec factor
    pub fn alpha_centauri() -> Result<Self> {
        Ok(Self::new(default_calibration()?, LY_PER_PARSEC))
    }
}

/// Every stage of a calibrated conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibratedConversion {
    pub input: StarInput,
    pub config: CalibratedConfig,
    pub alignment: FrameAlignment,
    /// Calibration game position rebuilt from its spherical form
    pub game_check: CartesianPosition<Game>,
    /// Query position in equatorial spherical form
    pub query: SphericalPosition,
    /// Query position after the alignment offsets
    pub predicted_spherical: SphericalPosition,
    pub predicted: CartesianPosition<Game>,
    pub predicted_snapped: CartesianPosition<Game>,
}

/// Convert by applying offsets learned from a calibration star
///
/// Only trustworthy close to the calibration star.
pub fn convert_calibrated(
    input: &StarInput,
    config: &CalibratedConfig,
) -> Result<CalibratedConversion> {
    let alignment = FrameAlignment::from_calibration(&config.calibration);
    let game_check = alignment.game_spherical.to_cartesian().to_game();
    debug!(
        "Calibration game position {} rebuilt as {}",
        config.calibration.game, game_check
    );

    let query = input.spherical(config.light_years_per_parsec)?;
    let predicted_spherical = alignment.apply(&query);
    let predicted = predicted_spherical.to_cartesian().to_game();
    let predicted_snapped = config.grid.snap(&predicted);
    info!(
        "Calibrated on {}: {} -> game {} (grid {})",
        config.calibration.name, input.right_ascension, predicted, predicted_snapped
    );

    Ok(CalibratedConversion {
        input: *input,
        config: config.clone(),
        alignment,
        game_check,
        query,
        predicted_spherical,
        predicted,
        predicted_snapped,
    })
}

fn write_spherical(f: &mut fmt::Formatter<'_>, label: &str, s: &SphericalPosition) -> fmt::Result {
    writeln!(
        f,
        "{:<10} R: {:>9.5}   RA: {:>9.5}  Dec: {:>9.5}",
        label, s.distance, s.ra, s.dec
    )
}

impl fmt::Display for CalibratedConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.alignment;
        writeln!(f, "Calibration: {}", self.config.calibration.name)?;
        write_spherical(f, "Game", &a.game_spherical)?;
        writeln!(f, "Game       {}", self.config.calibration.game)?;
        writeln!(f, "Game check {}", self.game_check)?;
        write_spherical(f, "Calib eq", &self.config.calibration.equatorial)?;
        writeln!(f, "Calib vec  {}", a.equatorial_vector)?;
        writeln!(
            f,
            "Angles     game: {:.5}  equatorial: {:.5}",
            a.game_angle, a.equatorial_angle
        )?;
        writeln!(f, "Delta      RA: {:.5}  Dec: {:.5}", a.delta_ra, a.delta_dec)?;
        writeln!(f, "RA : {}", self.input.right_ascension)?;
        writeln!(f, "Dec: {}", self.input.declination)?;
        write_spherical(f, "In", &self.query)?;
        write_spherical(f, "Out", &self.predicted_spherical)?;
        writeln!(f, "Out        {}", self.predicted)?;
        writeln!(f, "Out (grid) {}", self.predicted_snapped)?;
        write!(
            f,
            "Calibration distance: {:.5}\tdistance: {:.5}",
            a.game_spherical.distance, self.query.distance
        )
    }
}
