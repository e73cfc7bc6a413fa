//! Error types for edcoords
//!
//! Only malformed input is reported as an error. Degenerate geometry (zero
//! distances, poles, projections with no in-plane component) is allowed to
//! produce NaN or arbitrary angles.

use thiserror::Error;

/// Main error type for coordinate conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EdCoordsError {
    /// An input field was not supplied
    #[error("Missing input field: {field}")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
    },

    /// An input field could not be parsed as a number
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber {
        /// Name of the offending field
        field: &'static str,
        /// The raw text that failed to parse
        value: String,
    },

    /// A textual sexagesimal angle matched none of the accepted forms
    #[error("Invalid sexagesimal angle: {0:?}")]
    InvalidAngle(String),

    /// Parallax must be a positive, finite number of milli-arcseconds
    #[error("Invalid parallax: {0} mas (must be positive)")]
    InvalidParallax(f64),

    /// The requested star is not in the reference table
    #[error("Star not found in reference table: {0}")]
    UnknownStar(String),

    /// A reference star has game coordinates but no catalog position
    #[error("No catalog position for reference star: {0}")]
    NoCatalogEntry(String),
}

/// Result type for edcoords operations
pub type Result<T> = std::result::Result<T, EdCoordsError>;

/// Parse one named numeric field, mapping failures to [`EdCoordsError::InvalidNumber`]
pub fn parse_field(field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| EdCoordsError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_accepts_signs() {
        assert_eq!(parse_field("dec_degrees", "+04").unwrap(), 4.0);
        assert_eq!(parse_field("dec_degrees", "-60").unwrap(), -60.0);
        assert_eq!(parse_field("ra_seconds", " 36.204 ").unwrap(), 36.204);
    }

    #[test]
    fn test_parse_field_reports_field_name() {
        let err = parse_field("parallax", "abc").unwrap_err();
        assert_eq!(
            err,
            EdCoordsError::InvalidNumber {
                field: "parallax",
                value: "abc".to_string()
            }
        );
        assert!(err.to_string().contains("parallax"));
    }
}
