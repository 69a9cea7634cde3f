use common::ErrorLocation;

use models::ModelError;
use parking_core::error::{ApiError, ConfigError, CoreError, StorageError};

use thiserror::Error;

/// Errors surfaced by the parKING console application.
///
/// Core and model errors are flattened to their message here; the original
/// location is kept inside the message, the location of the conversion is
/// recorded alongside it.
#[derive(Debug, Error)]
pub enum ParkingError {
    /// Error from this app
    #[error("Parking Error: {message} {location}")]
    Parking {
        message: String,
        location: ErrorLocation,
    },

    /// Error from parking-core (fetch engine, storage)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Configuration could not be resolved or loaded
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Carpark data could not be decoded
    #[error("Data Error: {message} {location}")]
    Data {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for ParkingError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        let location = ErrorLocation::caller();
        match error {
            CoreError::Config(config) => ParkingError::Config {
                message: config.to_string(),
                location,
            },
            other => ParkingError::Core {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<ApiError> for ParkingError {
    #[track_caller]
    fn from(error: ApiError) -> Self {
        ParkingError::from(CoreError::from(error))
    }
}

impl From<StorageError> for ParkingError {
    #[track_caller]
    fn from(error: StorageError) -> Self {
        ParkingError::from(CoreError::from(error))
    }
}

impl From<ConfigError> for ParkingError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        ParkingError::from(CoreError::from(error))
    }
}

impl From<ModelError> for ParkingError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ParkingError::Data {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<std::io::Error> for ParkingError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        ParkingError::Parking {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
