//! Error types for the authenticated fetch engine.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - `is_retryable()` decides from the variant, never from message content
//! - Display carries `ErrorLocation` for logs; `user_message()` is what the console shows
//! - `#[track_caller]` for automatic location capture

use crate::error::storage::StorageError;

use common::{ErrorLocation, HttpStatusCode};

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Timeout Error: no response within {timeout_ms}ms {location}")]
    Timeout {
        timeout_ms: u64,
        location: ErrorLocation,
    },

    #[error("Unauthorized Error: API key rejected with HTTP {status_code} {location}")]
    Unauthorized {
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Server Not Ready Error: HTTP {status_code} {location}")]
    ServerNotReady {
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Unknown Response Error: HTTP {status_code} {location}")]
    UnknownResponse {
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Empty Response Error: no data after {attempts} attempt(s) {location}")]
    EmptyResponse {
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("File Write Error: {source} {location}")]
    FileWrite {
        #[source]
        source: StorageError,
        location: ErrorLocation,
    },

    #[error("No File Found Error: {path} {location}")]
    NoFileFound {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Empty Secret File Error: {path} {location}")]
    EmptySecretFile {
        path: PathBuf,
        location: ErrorLocation,
    },

    /// The key holds bytes an HTTP header cannot carry, so no request is sent.
    #[error("Invalid Credential Error: API key is not a valid header value {location}")]
    InvalidCredential { location: ErrorLocation },

    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn timeout(timeout_ms: u64) -> Self {
        ApiError::Timeout {
            timeout_ms,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn empty_response(attempts: u32) -> Self {
        ApiError::EmptyResponse {
            attempts,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn file_write(source: StorageError) -> Self {
        ApiError::FileWrite {
            source,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn no_file_found(path: impl Into<PathBuf>) -> Self {
        ApiError::NoFileFound {
            path: path.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn empty_secret_file(path: impl Into<PathBuf>) -> Self {
        ApiError::EmptySecretFile {
            path: path.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn invalid_credential() -> Self {
        ApiError::InvalidCredential {
            location: ErrorLocation::caller(),
        }
    }

    /// Map a non-200 status to its failure variant.
    #[track_caller]
    pub fn from_status(status_code: HttpStatusCode) -> Self {
        let location = ErrorLocation::caller();
        match status_code.0 {
            401 => ApiError::Unauthorized {
                status_code,
                location,
            },
            503 => ApiError::ServerNotReady {
                status_code,
                location,
            },
            _ => ApiError::UnknownResponse {
                status_code,
                location,
            },
        }
    }

    /// Whether the retry loop may spend another attempt after this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Timeout { .. } => true,
            ApiError::ServerNotReady { .. } => true,
            ApiError::UnknownResponse { .. } => true,

            ApiError::Unauthorized { .. } => false,
            ApiError::EmptyResponse { .. } => false,
            ApiError::FileWrite { .. } => false,
            ApiError::NoFileFound { .. } => false,
            ApiError::EmptySecretFile { .. } => false,
            ApiError::InvalidCredential { .. } => false,
            ApiError::Client { .. } => false,
        }
    }

    /// Short category name for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "transport",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::ServerNotReady { .. } => "server_not_ready",
            ApiError::UnknownResponse { .. } => "unknown_response",
            ApiError::EmptyResponse { .. } => "empty_response",
            ApiError::FileWrite { .. } => "file_write",
            ApiError::NoFileFound { .. } => "no_file_found",
            ApiError::EmptySecretFile { .. } => "empty_secret_file",
            ApiError::InvalidCredential { .. } => "invalid_credential",
            ApiError::Client { .. } => "client",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status_code, .. }
            | ApiError::ServerNotReady { status_code, .. }
            | ApiError::UnknownResponse { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Plain-text diagnostic for the console. Never includes locations.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport { .. } => {
                String::from("Something went wrong when fetching data.")
            }
            ApiError::Timeout { .. } => String::from("Fetch Timeout."),
            ApiError::Unauthorized { .. } => String::from(
                "Your API key is not authorised to access the API. Please check your API key.",
            ),
            ApiError::ServerNotReady { .. } => {
                String::from("The server is not ready, please try again later.")
            }
            ApiError::UnknownResponse { status_code, .. } => {
                format!("Unknown response from the server (HTTP {status_code}).")
            }
            ApiError::EmptyResponse { .. } => String::from(
                "Unable to fetch data from the API. Please check your internet connection.",
            ),
            ApiError::FileWrite { .. } => String::from("Something went wrong when saving data."),
            ApiError::NoFileFound { path, .. } => {
                format!("API key file is missing! Please check {}.", path.display())
            }
            ApiError::EmptySecretFile { path, .. } => format!(
                "API key file at {} is empty! Add your API key there or use `auth`.",
                path.display()
            ),
            ApiError::InvalidCredential { .. } => String::from(
                "Your API key contains characters that cannot be sent. Please check your API key.",
            ),
            ApiError::Client { .. } => String::from("Unable to set up the HTTP client."),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
