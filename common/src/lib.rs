//! Shared building blocks for parKING.
//!
//! Everything in here is free of I/O and business rules so that both the
//! data models and the fetch/dispatch core can depend on it.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, credential wrapper, status codes
//! - **models**: Carpark data and lookups
//! - **parking-core**: Fetch engine, key store, command parser
//! - **parking**: CLI wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_credential;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::{HttpStatusCode, StatusClass};
pub use redacted_credential::RedactedCredential;
