use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Failures of the local file sink.
#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("Not Found Error: {path} {location}")]
    NotFound {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Read Error: {path}: {source} {location}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Write Error: {path}: {source} {location}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl StorageError {
    #[track_caller]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        StorageError::NotFound {
            path: path.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Read {
            path: path.into(),
            source,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Write {
            path: path.into(),
            source,
            location: ErrorLocation::caller(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            StorageError::NotFound { path, .. }
            | StorageError::Read { path, .. }
            | StorageError::Write { path, .. } => path,
        }
    }
}
