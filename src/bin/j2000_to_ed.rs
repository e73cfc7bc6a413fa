//! J2000 to ED coordinate tool
//!
//! Converts one star's FK5/J2000 position into ED galaxy-map coordinates by
//! rotating it into the galactic frame with a fixed matrix.
//!
//! Usage:
//!   cargo run --bin j2000_to_ed -- 14 39 36.204 -60 50 08.23 742.0
//!   cargo run --bin j2000_to_ed -- --star "Barnard's Star" --matrix ne --json
//!   cargo run --bin j2000_to_ed -- --ra 14:39:36.204 --dec -60:50:08.23 --parallax 742

use clap::{ArgAction, Parser};
use log::LevelFilter;
use serde_json::json;

use edcoords::constants::LY_PER_PARSEC_ROUNDED;
use edcoords::{convert_absolute, ConversionConfig, KnownStar, MatrixChoice, StarInput};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// J2000 to ED coordinate tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts FK5/J2000 RA/Dec/parallax into ED galaxy-map coordinates",
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

    /// Take the input from the reference table instead
    #[arg(short, long, conflicts_with = "fields")]
    star: Option<String>,

    /// Equatorial to galactic rotation matrix
    #[arg(short, long, value_enum, default_value_t = MatrixChoice::Nb)]
    matrix: MatrixChoice,

    /// Light-years per parsec
    #[arg(long, default_value_t = LY_PER_PARSEC_ROUNDED)]
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

    let config = ConversionConfig {
        light_years_per_parsec: args.ly_per_parsec,
        ..ConversionConfig::with_matrix(args.matrix)
    };
    let result = convert_absolute(&input, &config)?;

    let reference = known.map(|star| {
        let offset = config
            .grid
            .cell_offset(&result.game_snapped, &star.game_position());
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
        println!("Reference        {} {}", star.name, star.game_position());
        println!(
            "Offset (cells)   [{} {} {}]",
            offset[0], offset[1], offset[2]
        );
    }

    Ok(())
}
