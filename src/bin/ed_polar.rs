//! Calibrated J2000 to ED conversion
//!
//! Learns right ascension and declination offsets between the equatorial
//! frame and the ED frame from one reference star, then applies them to the
//! query star. The result is only meaningful near the calibration star.
//!
//! Usage:
//!   cargo run --bin ed_polar -- 14 39 36.204 -60 50 08.23 742.0
//!   cargo run --bin ed_polar -- --star "Ross 128" --calibrate "Alpha Centauri"
//!   cargo run --bin ed_polar -- --ra "11h47m44.397s" --dec "+00d48m16.40s" --parallax 295.8

use clap::{ArgAction, Parser};
use log::LevelFilter;
use serde_json::json;

use edcoords::constants::LY_PER_PARSEC;
use edcoords::{convert_calibrated, CalibratedConfig, KnownStar, StarInput};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts J2000 RA/Dec/parallax into ED coordinates via a calibration star",
    long_about = None,
    allow_negative_numbers = true
)]
struct Args {
    /// RA hours, minutes, seconds; Dec degrees, minutes, seconds; parallax (mas)
    #[arg(value_name = "FIELD", required_unless_present_any = ["star", "ra"])]
    fields: Vec<String>,

    /// Right ascension as text, e.g. "14:39:36.204" or "14h39m36.204s"
    #[arg(
        long,
        requires_all = ["dec", "parallax"],
        conflicts_with_all = ["fields", "star"]
    )]
    ra: Option<String>,

    /// Declination as text, e.g. "-60:50:08.23" or "+04d41m36.21s"
    #[arg(long, requires = "ra", allow_hyphen_values = true)]
    dec: Option<String>,

    /// Parallax in milli-arcseconds, with --ra and --dec
    #[arg(long, requires = "ra")]
    parallax: Option<String>,

    /// Take the query from the reference table instead
    #[arg(short, long, conflicts_with = "fields")]
    star: Option<String>,

    /// Reference star used to align the frames
    #[arg(short, long, default_value = "Alpha Centauri")]
    calibrate: String,

    /// Light-years per parsec
    #[arg(long, default_value_t = LY_PER_PARSEC)]
    ly_per_parsec: f64,

    /// Print the full report as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (input, known) = if let Some(name) = &args.star {
        let star = KnownStar::find(name)?;
        (star.input()?, Some(star))
    } else if let (Some(ra), Some(dec), Some(parallax)) = (&args.ra, &args.dec, &args.parallax) {
        (StarInput::from_text(ra, dec, parallax)?, None)
    } else {
        (StarInput::from_fields(args.fields.as_slice())?, None)
    };

    let calibration = KnownStar::find(&args.calibrate)?.calibration(args.ly_per_parsec)?;
    let config = CalibratedConfig::new(calibration, args.ly_per_parsec);
    let result = convert_calibrated(&input, &config)?;

    let reference = known.map(|star| {
        let offset = config
            .grid
            .cell_offset(&result.predicted_snapped, &star.game_position());
        (star, offset)
    });

    if args.json {
        let report = json!({
            "conversion": result,
            "reference": reference.map(|(star, offset)| json!({
                "name": star.name,
                "game": star.game_position(),
                "offset_cells": offset,
            })),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", result);
    if let Some((star, offset)) = reference {
        println!("Reference  {} {}", star.name, star.game_position());
        println!("Offset (cells) [{} {} {}]", offset[0], offset[1], offset[2]);
    }

    Ok(())
}
