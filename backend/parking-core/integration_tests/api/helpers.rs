//! Test helpers for fetch engine integration tests.
//!
//! - Engine wired to a wiremock server and a temp data dir
//! - Request matchers for the LTA path and account header
//! - A port nobody listens on

use parking_core::api::FetchEngine;
use parking_core::config::ApiConfig;
use parking_core::storage::FileStorage;

use std::net::TcpListener;
use std::path::Path;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder};

pub const DATA_PATH: &str = "/ltaodataservice/CarParkAvailabilityv2";
pub const DATA_FILE: &str = "ltaData.json";
pub const SECRET_FILE: &str = "secret.txt";
pub const SAMPLE_BODY: &str = r#"{"value":[{"CarParkID":"1","Area":"Marina","Development":"Suntec City","Location":"1.29375 103.85718","AvailableLots":442,"LotType":"C","Agency":"LTA"}]}"#;

/// Short enough to keep the timeout tests quick, long enough for a local mock.
pub const TEST_TIMEOUT_MS: u64 = 300;

pub fn api_config(base: &str) -> ApiConfig {
    ApiConfig {
        base_url: format!("{base}{DATA_PATH}"),
        timeout_ms: TEST_TIMEOUT_MS,
        ..ApiConfig::default()
    }
}

/// Engine pointed at `base`, persisting into `data_dir/ltaData.json`.
pub fn engine_for(base: &str, data_dir: &Path) -> FetchEngine {
    FetchEngine::new(&api_config(base), FileStorage::new(data_dir, DATA_FILE))
        .expect("Failed to build fetch engine")
}

/// GET on the data path, any key.
pub fn data_request() -> MockBuilder {
    Mock::given(method("GET")).and(path(DATA_PATH))
}

/// GET on the data path carrying `key` in the account header.
pub fn data_request_with_key(key: &str) -> MockBuilder {
    data_request().and(header(parking_core::LTA_AUTH_HEADER, key))
}

/// Base URL of a port that was bound and released, so connections are refused.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn write_secret(data_dir: &Path, key: &str) {
    std::fs::write(data_dir.join(SECRET_FILE), key).expect("Failed to write secret file");
}

pub fn read_persisted(data_dir: &Path) -> Option<String> {
    std::fs::read_to_string(data_dir.join(DATA_FILE)).ok()
}
