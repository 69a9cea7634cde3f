use crate::{CarparkBuilder, LotType, ModelError};

/// **VALUE**: Verifies that the builder rejects an empty carpark id.
///
/// **WHY THIS MATTERS**: `find` and `favourite` key off the id. A blank id would be
/// unreachable through the command line and poison the favourites file.
#[test]
fn given_blank_id_when_building_carpark_then_returns_validation_error() {
    // GIVEN: Builder with a whitespace-only id
    let builder = CarparkBuilder::default()
        .with_id("   ")
        .with_development("Suntec City");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Carpark ID cannot be empty");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_development_when_building_then_returns_validation_error() {
    let result = CarparkBuilder::default().with_id("1").build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

#[test]
fn given_complete_builder_when_building_then_optional_fields_default() {
    let carpark = CarparkBuilder::default()
        .with_id("1")
        .with_development("Suntec City")
        .with_lots(LotType::Car, 442)
        .build()
        .unwrap();

    assert_eq!(carpark.id, "1");
    assert_eq!(carpark.area, "");
    assert_eq!(carpark.total_lots(), 442);
}

/// **BUG THIS CATCHES**: Would catch if a repeated (carpark, lot type) record silently
/// overwrote the first count instead of flagging a corrupt data file.
#[test]
fn given_repeated_lot_type_when_adding_lots_then_returns_duplicate_error() {
    let mut builder = CarparkBuilder::default().with_id("A1");
    builder.add_lots(LotType::Car, 10).unwrap();

    let result = builder.add_lots(LotType::Car, 12);

    match result {
        Err(ModelError::DuplicateCarparkId { carpark_id, .. }) => assert_eq!(carpark_id, "A1"),
        other => panic!("Expected duplicate error, got {other:?}"),
    }
}
