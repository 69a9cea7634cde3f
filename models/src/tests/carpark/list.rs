use crate::{CarparkList, LotType, ModelError};

const SAMPLE_PAYLOAD: &str = r#"{
    "odata.metadata": "http://datamall2.mytransport.sg/ltaodataservice/$metadata#CarParkAvailability",
    "value": [
        {"CarParkID": "1", "Area": "Marina", "Development": "Suntec City", "Location": "1.29375 103.85718", "AvailableLots": 442, "LotType": "C", "Agency": "LTA"},
        {"CarParkID": "1", "Area": "Marina", "Development": "Suntec City", "Location": "1.29375 103.85718", "AvailableLots": 31, "LotType": "Y", "Agency": "LTA"},
        {"CarParkID": "2", "Area": "Marina", "Development": "Marina Square", "Location": "1.29115 103.85728", "AvailableLots": 1011, "LotType": "C", "Agency": "LTA"},
        {"CarParkID": "A35", "Area": "", "Development": "BLK 203 BUKIT BATOK", "Location": "1.3496 103.7536", "AvailableLots": 87, "LotType": "H", "Agency": "HDB"}
    ]
}"#;

/// **VALUE**: Records for the same carpark id are merged into one carpark.
///
/// **WHY THIS MATTERS**: The feed sends one row per lot type. Without merging, `find 1`
/// would only ever show the car lots and `list` would print duplicates.
#[test]
fn given_lta_payload_when_decoded_then_merges_lot_types_per_carpark() {
    let list = CarparkList::from_lta_json(SAMPLE_PAYLOAD).unwrap();

    assert_eq!(list.len(), 3);
    let suntec = list.find("1").unwrap();
    assert_eq!(suntec.lots.get(&LotType::Car), Some(&442));
    assert_eq!(suntec.lots.get(&LotType::Motorcycle), Some(&31));
    assert_eq!(suntec.total_lots(), 473);
}

#[test]
fn given_mixed_case_id_when_finding_then_matches_exactly_ignoring_case() {
    let list = CarparkList::from_lta_json(SAMPLE_PAYLOAD).unwrap();

    assert_eq!(list.find("a35").map(|c| c.development.as_str()), Some("BLK 203 BUKIT BATOK"));
    assert!(list.find("A3").is_none(), "Lookup must not be a prefix match");
}

#[test]
fn given_query_when_filtering_then_every_word_must_match() {
    let list = CarparkList::from_lta_json(SAMPLE_PAYLOAD).unwrap();

    let marina = list.filter("marina");
    let square = list.filter("marina square");
    let none = list.filter("marina batok");

    assert_eq!(marina.len(), 2);
    assert_eq!(square.len(), 1);
    assert_eq!(square[0].id, "2");
    assert!(none.is_empty());
}

#[test]
fn given_malformed_json_when_decoded_then_returns_decode_error() {
    let result = CarparkList::from_lta_json("{\"value\": [ {\"CarParkID\": 1 } ]");

    assert!(matches!(result, Err(ModelError::Decode { .. })));
}

#[test]
fn given_duplicate_record_when_decoded_then_returns_duplicate_error() {
    let payload = r#"{"value": [
        {"CarParkID": "7", "Development": "X", "AvailableLots": 1, "LotType": "C"},
        {"CarParkID": "7", "Development": "X", "AvailableLots": 2, "LotType": "C"}
    ]}"#;

    let result = CarparkList::from_lta_json(payload);

    assert!(matches!(
        result,
        Err(ModelError::DuplicateCarparkId { ref carpark_id, .. }) if carpark_id == "7"
    ));
}

#[test]
fn given_carpark_when_displayed_then_lists_each_lot_type() {
    let list = CarparkList::from_lta_json(SAMPLE_PAYLOAD).unwrap();

    let shown = list.find("1").unwrap().to_string();

    assert!(shown.contains("CarparkID 1 at Suntec City"));
    assert!(shown.contains("Cars: 442"));
    assert!(shown.contains("Motorcycles: 31"));
}
