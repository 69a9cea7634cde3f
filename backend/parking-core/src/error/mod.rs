pub mod api;
pub mod config;
pub mod storage;

pub use api::ApiError;
pub use config::ConfigError;
pub use storage::StorageError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] api::ApiError),

    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
