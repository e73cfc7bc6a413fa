//! Known stars with both catalog input and in-game coordinates
//!
//! Catalog values are SIMBAD FK5 (ep=J2000, eq=2000). Game coordinates are
//! read from the galaxy map and are exact multiples of 1/32 ly.

use crate::constants::LY_PER_PARSEC;
use crate::coordinates::cartesian::{CartesianPosition, Game};
use crate::errors::{EdCoordsError, Result};
use crate::framelib::alignment::CalibrationStar;
use crate::pipeline::StarInput;

/// Raw catalog fields as they would be typed on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogFields {
    /// Hours, minutes, seconds
    pub ra: [f64; 3],
    /// Signed degrees, arcminutes, arcseconds
    pub dec: [f64; 3],
    pub parallax_mas: f64,
}

/// A star whose game position is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownStar {
    pub name: &'static str,
    /// `None` when the star has no usable catalog entry
    pub catalog: Option<CatalogFields>,
    /// Game-convention coordinates in light-years
    pub game: [f64; 3],
}

pub const ALPHA_CENTAURI: KnownStar = KnownStar {
    name: "Alpha Centauri",
    catalog: Some(CatalogFields {
        ra: [14.0, 39.0, 36.204],
        dec: [-60.0, 50.0, 8.23],
        parallax_mas: 742.0,
    }),
    game: [3.03125, -0.09375, 3.15625],
};

pub const ROSS_128: KnownStar = KnownStar {
    name: "Ross 128",
    catalog: Some(CatalogFields {
        ra: [11.0, 47.0, 44.397],
        dec: [0.0, 48.0, 16.40],
        parallax_mas: 295.80,
    }),
    game: [5.53125, 9.4375, 0.125],
};

pub const BARNARDS_STAR: KnownStar = KnownStar {
    name: "Barnard's Star",
    catalog: Some(CatalogFields {
        ra: [17.0, 57.0, 48.498],
        dec: [4.0, 41.0, 36.21],
        parallax_mas: 548.31,
    }),
    game: [-3.03125, 1.375, 4.9375],
};

pub const LUHMAN_16: KnownStar = KnownStar {
    name: "Luhman 16",
    catalog: None,
    game: [6.3125, 0.59375, 1.71875],
};

pub const KNOWN_STARS: &[KnownStar] = &[ALPHA_CENTAURI, ROSS_128, BARNARDS_STAR, LUHMAN_16];

impl KnownStar {
    /// Case-insensitive lookup; spaces, hyphens and apostrophes are ignored
    pub fn find(name: &str) -> Result<&'static KnownStar> {
        let key = normalize_name(name);
        KNOWN_STARS
            .iter()
            .find(|star| normalize_name(star.name) == key)
            .ok_or_else(|| EdCoordsError::UnknownStar(name.to_string()))
    }

    pub fn game_position(&self) -> CartesianPosition<Game> {
        let [x, y, z] = self.game;
        CartesianPosition::new(x, y, z)
    }

    /// Catalog fields as pipeline input
    ///
    /// # Errors
    ///
    /// [`EdCoordsError::NoCatalogEntry`] when the star has no catalog entry.
    pub fn input(&self) -> Result<StarInput> {
        let fields = self
            .catalog
            .ok_or_else(|| EdCoordsError::NoCatalogEntry(self.name.to_string()))?;
        let [ra_h, ra_m, ra_s] = fields.ra;
        let [dec_d, dec_m, dec_s] = fields.dec;
        StarInput::new(ra_h, ra_m, ra_s, dec_d, dec_m, dec_s, fields.parallax_mas)
    }

    /// This star as a calibration pair, distance from its parallax
    pub fn calibration(&self, light_years_per_parsec: f64) -> Result<CalibrationStar> {
        let input = self.input()?;
        Ok(CalibrationStar::new(
            self.name,
            input.spherical(light_years_per_parsec)?,
            self.game_position(),
        ))
    }
}

/// Default calibration pair: Alpha Centauri at full-precision distance
pub fn default_calibration() -> Result<CalibrationStar> {
    ALPHA_CENTAURI.calibration(LY_PER_PARSEC)
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
