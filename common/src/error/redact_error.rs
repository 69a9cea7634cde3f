//! Failure raised by secret wrappers that refuse to leave memory via serde.

use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RedactError {
    /// A secret reached a serializer. Callers wanting the raw text must ask
    /// for it explicitly.
    #[error("Refused Serialization Error: {type_name} is never serialized {location}")]
    SerializationRefused {
        type_name: &'static str,
        location: ErrorLocation,
    },
}

impl RedactError {
    #[track_caller]
    pub fn refused(type_name: &'static str) -> Self {
        RedactError::SerializationRefused {
            type_name,
            location: ErrorLocation::caller(),
        }
    }
}
