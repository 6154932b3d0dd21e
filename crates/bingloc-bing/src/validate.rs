//! Input validation run before any network call.

use crate::error::BingError;

/// Validates a free-text lookup query, returning it trimmed.
///
/// # Errors
///
/// Returns [`BingError::InvalidInput`] when the query is empty or
/// whitespace-only.
pub fn validate_query(input: &str) -> Result<&str, BingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BingError::InvalidInput(
            "search query must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Validates a coordinate pair for reverse geocoding.
///
/// Latitude must lie in [-90, 90] and longitude in [-180, 180], both finite.
/// The original field widget checked both values against [-180, 180]; the
/// latitude half of that bound was a defect and is tightened here.
///
/// # Errors
///
/// Returns [`BingError::InvalidInput`] naming the offending coordinate.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), BingError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(BingError::InvalidInput(format!(
            "latitude {latitude} outside [-90, 90]"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(BingError::InvalidInput(format!(
            "longitude {longitude} outside [-180, 180]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed() {
        assert_eq!(validate_query("  coffee  ").unwrap(), "coffee");
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(
            validate_query("   "),
            Err(BingError::InvalidInput(_))
        ));
        assert!(matches!(validate_query(""), Err(BingError::InvalidInput(_))));
    }

    #[test]
    fn coordinates_in_range_pass() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.0, -180.0).is_ok());
    }

    #[test]
    fn latitude_beyond_ninety_is_rejected() {
        // 95 passed the original widget's [-180, 180] check; it is not a
        // latitude that exists on the globe.
        assert!(matches!(
            validate_coordinates(95.0, 0.0),
            Err(BingError::InvalidInput(_))
        ));
        assert!(validate_coordinates(-90.5, 0.0).is_err());
    }

    #[test]
    fn longitude_out_of_range_is_rejected() {
        assert!(matches!(
            validate_coordinates(0.0, 180.5),
            Err(BingError::InvalidInput(_))
        ));
        assert!(validate_coordinates(0.0, -200.0).is_err());
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }
}
