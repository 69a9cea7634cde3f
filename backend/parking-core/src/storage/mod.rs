//! Local file sink for fetched data, the secret file and favourites.
//!
//! Writes go through a temp file + rename; readers never observe a partially
//! written file.

use crate::error::storage::StorageError;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

const TEMP_SUFFIX: &str = "tmp";

/// A single file inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
    file: String,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file: file.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Atomically replace the file contents with `data`.
    ///
    /// # Errors
    /// Returns [`StorageError::Write`] if the directory cannot be created or
    /// the temp file cannot be written or renamed.
    pub fn write_data_to_file(&self, data: &str) -> Result<(), StorageError> {
        write_string_to_text(&self.file, &self.directory, data)
    }

    /// Read the whole file.
    ///
    /// # Errors
    /// [`StorageError::NotFound`] if the file is absent, [`StorageError::Read`] otherwise.
    pub fn read_data(&self) -> Result<String, StorageError> {
        read_string_from_text(&self.file, &self.directory)
    }
}

/// Read `directory/file` as UTF-8 text.
///
/// # Errors
/// [`StorageError::NotFound`] if the file does not exist.
pub fn read_string_from_text(file: &str, directory: &Path) -> Result<String, StorageError> {
    let path = directory.join(file);
    match fs::read_to_string(&path) {
        Ok(contents) => {
            debug!("Read {} bytes from {}", contents.len(), path.display());
            Ok(contents)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::not_found(path)),
        Err(e) => Err(StorageError::read(path, e)),
    }
}

/// Atomically write `text` to `directory/file`, creating the directory if needed.
pub fn write_string_to_text(file: &str, directory: &Path, text: &str) -> Result<(), StorageError> {
    fs::create_dir_all(directory).map_err(|e| StorageError::write(directory, e))?;

    let path = directory.join(file);
    let temp_path = directory.join(format!("{file}.{TEMP_SUFFIX}"));

    fs::write(&temp_path, text).map_err(|e| StorageError::write(&temp_path, e))?;

    // Atomic rename (POSIX guarantees atomicity)
    fs::rename(&temp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StorageError::write(&path, e)
    })?;

    info!("Saved {} bytes to {}", text.len(), path.display());
    Ok(())
}
