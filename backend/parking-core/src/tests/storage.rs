use crate::error::StorageError;
use crate::storage::{FileStorage, read_string_from_text, write_string_to_text};

use std::fs;

use tempfile::TempDir;

#[test]
fn given_missing_directory_when_writing_then_creates_it_and_file() {
    // GIVEN: A data dir that does not exist yet
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("resources");
    let storage = FileStorage::new(&data_dir, "ltaData.json");

    // WHEN: Writing data
    storage.write_data_to_file("{\"value\":[]}").unwrap();

    // THEN: File holds exactly what was written, no temp file left behind
    assert_eq!(fs::read_to_string(storage.path()).unwrap(), "{\"value\":[]}");
    assert!(!data_dir.join("ltaData.json.tmp").exists());
}

#[test]
fn given_existing_file_when_writing_then_contents_are_replaced() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path(), "ltaData.json");
    storage.write_data_to_file("old body that is longer").unwrap();

    storage.write_data_to_file("new").unwrap();

    assert_eq!(storage.read_data().unwrap(), "new");
}

#[test]
fn given_missing_file_when_reading_then_not_found_with_path() {
    let temp = TempDir::new().unwrap();

    let err = read_string_from_text("secret.txt", temp.path()).unwrap_err();

    assert!(matches!(err, StorageError::NotFound { .. }));
    assert_eq!(err.path(), temp.path().join("secret.txt"));
}

/// **VALUE**: A data directory that is actually a file surfaces as a write error.
///
/// **BUG THIS CATCHES**: Would catch if write failures were swallowed and the caller
/// reported a successful fetch with nothing persisted.
#[test]
fn given_directory_path_is_a_file_when_writing_then_write_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("resources");
    fs::write(&blocker, "not a directory").unwrap();

    let err = write_string_to_text("ltaData.json", &blocker, "data").unwrap_err();

    assert!(matches!(err, StorageError::Write { .. }));
}

#[test]
fn given_written_text_when_read_back_then_round_trips_unicode() {
    let temp = TempDir::new().unwrap();

    write_string_to_text("favourite.txt", temp.path(), "A35\nMarina Square ✓\n").unwrap();

    assert_eq!(
        read_string_from_text("favourite.txt", temp.path()).unwrap(),
        "A35\nMarina Square ✓\n"
    );
}
