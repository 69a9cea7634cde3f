// Unit tests for error module
use crate::error::ParkingError;

use common::{ErrorLocation, HttpStatusCode};
use parking_core::error::ApiError;

use std::panic::Location;

/// **VALUE**: Verifies that ParkingError Display includes the location.
///
/// **WHY THIS MATTERS**: Startup failures are printed once and logged; without the
/// location there is no telling which step failed.
///
/// **BUG THIS CATCHES**: Would catch if the `#[error(...)]` format drops `{location}`.
#[test]
fn given_parking_error_when_formatted_then_includes_location() {
    // GIVEN
    let err = ParkingError::Parking {
        message: "Failed to create log directory".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN
    let text = err.to_string();

    // THEN
    assert!(text.starts_with("Parking Error: Failed to create log directory"));
    assert!(text.contains("error.rs"));
}

#[test]
fn given_api_error_when_converted_then_core_variant_keeps_message() {
    let api = ApiError::from_status(HttpStatusCode::UNAUTHORIZED);

    let err: ParkingError = api.into();

    match err {
        ParkingError::Core { message, .. } => assert!(message.contains("Unauthorized Error")),
        other => panic!("Expected Core, got {other:?}"),
    }
}

#[test]
fn given_model_error_when_converted_then_data_variant() {
    let model = models::CarparkList::from_lta_json("not json").unwrap_err();

    let err: ParkingError = model.into();

    assert!(matches!(err, ParkingError::Data { .. }));
}
