use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod config;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};

/// Where a location record's coordinates came from.
///
/// The numeric codes are the storage codes of the location field schema and
/// must stay stable: `Address = 1`, `PointOfInterest = 2`, `PinPoint = 3`,
/// `Phonebook = 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Coordinates resolved from a free-text address (geocode search).
    Address,
    /// Coordinates from a business / point-of-interest search result.
    PointOfInterest,
    /// Coordinates placed manually by dropping a pin on the map.
    PinPoint,
    /// Coordinates from a phonebook search result.
    Phonebook,
}

impl LocationSource {
    /// Stable storage code for this source.
    #[must_use]
    pub fn as_code(self) -> i16 {
        match self {
            LocationSource::Address => 1,
            LocationSource::PointOfInterest => 2,
            LocationSource::PinPoint => 3,
            LocationSource::Phonebook => 4,
        }
    }

    /// Parses a storage code back into a source.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSourceCode`] for codes outside `1..=4`.
    pub fn from_code(code: i16) -> Result<Self, CoreError> {
        match code {
            1 => Ok(LocationSource::Address),
            2 => Ok(LocationSource::PointOfInterest),
            3 => Ok(LocationSource::PinPoint),
            4 => Ok(LocationSource::Phonebook),
            other => Err(CoreError::InvalidSourceCode(other)),
        }
    }
}

/// A geographic location attached to a content item.
///
/// This is the sole interchange format between the lookup adapters and the
/// widget layer: every adapter emits these, nothing else crosses the seam.
/// Accepted records always carry finite coordinates and a non-empty
/// description; `address` and `external_id` are empty strings when the
/// upstream had nothing usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub address: String,
    pub external_id: String,
    pub source: LocationSource,
}

impl LocationRecord {
    /// Builds a record for a manually placed pin.
    ///
    /// `address` is typically backfilled from a reverse-geocode resource's
    /// `name` field; pass an empty string when reverse geocoding came back
    /// empty.
    #[must_use]
    pub fn pin_point(latitude: f64, longitude: f64, name: &str, address: &str) -> Self {
        LocationRecord {
            latitude,
            longitude,
            description: name.trim().to_string(),
            address: address.to_string(),
            external_id: String::new(),
            source: LocationSource::PinPoint,
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid location source code: {0}")]
    InvalidSourceCode(i16),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
