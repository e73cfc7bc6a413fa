pub mod angle;
pub mod cartesian;
pub mod spherical;

pub use angle::{parse_declination, parse_right_ascension, AngleUnit, SexagesimalAngle};
pub use cartesian::{AxisConvention, CartesianPosition, Convention, Game, Mathematical};
pub use spherical::{distance_from_parallax, SphericalPosition};

/// Format `value` with `digits` significant digits, without exponent notation
/// or trailing zeros
pub(crate) fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", if value == 0.0 { 0.0 } else { value });
    }
    let exponent = value.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - exponent).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
