use crate::config::paths::{CONFIG_DIR_ENV, DATA_DIR_ENV};
use crate::config::{AppConfig, PathSource, StorageConfig, detect_config_dir, resolve_data_dir};
use crate::error::ConfigError;
use crate::{DEFAULT_API_KEY, LTA_AUTH_HEADER, LTA_BASE_URL};

use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

#[test]
fn given_default_config_when_built_then_matches_lta_settings() {
    let config = AppConfig::default();

    assert_eq!(config.api.base_url, LTA_BASE_URL);
    assert_eq!(config.api.auth_header, LTA_AUTH_HEADER);
    assert_eq!(config.api.timeout_ms, 1000);
    assert_eq!(config.api.fetch_attempts, 5);
    assert_eq!(config.api.default_api_key, DEFAULT_API_KEY);
    assert_eq!(config.storage.data_file, "ltaData.json");
    assert_eq!(config.storage.backup_file, "ltaDataBackup.json");
    assert_eq!(config.storage.secret_file, "secret.txt");
    assert_eq!(config.storage.favourite_file, "favourite.txt");
    assert!(config.validate().is_ok());
}

#[test]
fn given_missing_config_file_when_loading_then_defaults() {
    let temp = TempDir::new().unwrap();

    let config = AppConfig::load(temp.path()).unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn given_saved_config_when_loaded_then_values_survive() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.api.timeout_ms = 250;
    config.storage.data_dir = Some(String::from("/var/lib/parking"));

    config.save(temp.path()).unwrap();
    let loaded = AppConfig::load(temp.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(!temp.path().join("config.json.tmp").exists());
}

/// **VALUE**: Sections omitted from config.json fall back to their defaults.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[serde(default)]` that makes a
/// hand-edited config with only `{"api": {"timeout_ms": 500}}` fail to load.
#[test]
fn given_partial_config_file_when_loading_then_missing_fields_default() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.json"),
        r#"{"api": {"timeout_ms": 500}}"#,
    )
    .unwrap();

    let config = AppConfig::load(temp.path()).unwrap();

    assert_eq!(config.api.timeout_ms, 500);
    assert_eq!(config.api.fetch_attempts, 5);
    assert_eq!(config.storage, StorageConfig::default());
}

#[test]
fn given_corrupt_config_file_when_loading_then_parse_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.json"), "{ not json").unwrap();

    let err = AppConfig::load(temp.path()).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn given_invalid_values_when_validating_then_validation_error() {
    let mutations: [fn(&mut AppConfig); 6] = [
        |c| c.version = 0,
        |c| c.api.base_url = String::from("ftp://example.com/data"),
        |c| c.api.auth_header = String::from("  "),
        |c| c.api.timeout_ms = 0,
        |c| c.api.fetch_attempts = 0,
        |c| c.storage.secret_file = String::new(),
    ];

    for (i, mutate) in mutations.iter().enumerate() {
        let mut config = AppConfig::default();
        mutate(&mut config);

        let result = config.validate();

        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "mutation {i} should be rejected"
        );
    }
}

#[test]
fn given_invalid_config_when_saving_then_nothing_is_written() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.api.fetch_attempts = 0;

    assert!(config.save(temp.path()).is_err());
    assert!(!temp.path().join("config.json").exists());
}

#[test]
#[serial]
fn given_config_dir_env_when_detecting_then_env_wins() {
    let temp = TempDir::new().unwrap();
    // SAFETY: serialised with every other test touching the environment.
    unsafe { std::env::set_var(CONFIG_DIR_ENV, temp.path()) };

    let (dir, source) = detect_config_dir().unwrap();

    unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
    assert_eq!(dir, temp.path());
    assert_eq!(source, PathSource::EnvVar);
}

#[test]
#[serial]
fn given_data_dir_sources_when_resolving_then_env_beats_config_beats_default() {
    unsafe { std::env::remove_var(DATA_DIR_ENV) };
    let mut storage = StorageConfig::default();

    assert_eq!(resolve_data_dir(&storage), PathBuf::from("resources"));

    storage.data_dir = Some(String::from("/srv/parking"));
    assert_eq!(resolve_data_dir(&storage), PathBuf::from("/srv/parking"));

    unsafe { std::env::set_var(DATA_DIR_ENV, "/tmp/override") };
    let resolved = resolve_data_dir(&storage);
    unsafe { std::env::remove_var(DATA_DIR_ENV) };

    assert_eq!(resolved, PathBuf::from("/tmp/override"));
}
