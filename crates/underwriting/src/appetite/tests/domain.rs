use crate::appetite::domain::{PolicyId, PolicyRecord};

#[test]
fn deserializes_numeric_and_string_ids_alike() {
    let from_number: PolicyRecord =
        serde_json::from_str(r#"{"id": 42}"#).expect("numeric id parses");
    let from_string: PolicyRecord =
        serde_json::from_str(r#"{"id": "42"}"#).expect("string id parses");

    assert_eq!(from_number.id, Some(PolicyId("42".to_string())));
    assert_eq!(from_number.id, from_string.id);
}

#[test]
fn coerces_string_amounts_with_separators() {
    let record: PolicyRecord = serde_json::from_str(
        r#"{"tiv": "12,500,000", "total_premium": "$75,000", "loss_value": "1,200"}"#,
    )
    .expect("string amounts parse");

    assert_eq!(record.tiv(), 12_500_000.0);
    assert_eq!(record.total_premium(), 75_000.0);
    assert_eq!(record.loss_value(), Some(1_200.0));
}

#[test]
fn malformed_numbers_fail_soft_instead_of_erroring() {
    let record: PolicyRecord =
        serde_json::from_str(r#"{"tiv": "lots", "total_premium": {"amount": 5}}"#)
            .expect("bad shapes deserialize");

    assert_eq!(record.tiv(), 0.0);
    assert_eq!(record.total_premium(), 0.0);
}

#[test]
fn loss_value_distinguishes_absent_from_unparseable() {
    let absent: PolicyRecord = serde_json::from_str("{}").expect("empty record parses");
    assert_eq!(absent.loss_value(), Some(0.0));

    let garbage: PolicyRecord =
        serde_json::from_str(r#"{"loss_value": "no losses reported"}"#).expect("parses");
    assert_eq!(garbage.loss_value(), None);
}

#[test]
fn dates_accept_timestamp_prefixes() {
    let record: PolicyRecord = serde_json::from_str(
        r#"{"effective_date": "2025-03-01T00:00:00Z", "expiration_date": "2026-03-01"}"#,
    )
    .expect("dates parse");

    assert!(record.has_policy_dates());
}

#[test]
fn unknown_fields_round_trip_through_extra() {
    let record: PolicyRecord =
        serde_json::from_str(r#"{"id": 7, "broker_code": "BR-9"}"#).expect("parses");

    assert_eq!(
        record.extra.get("broker_code").and_then(|v| v.as_str()),
        Some("BR-9")
    );

    let serialized = serde_json::to_value(&record).expect("serializes");
    assert_eq!(serialized["broker_code"], "BR-9");
}

#[test]
fn field_matchers_trim_and_ignore_case() {
    let record: PolicyRecord = serde_json::from_str(
        r#"{"line_of_business": " Commercial Property ", "renewal_or_new_business": "new_business", "primary_risk_state": " ca "}"#,
    )
    .expect("parses");

    assert!(record.is_commercial_property());
    assert!(record.is_new_business());
    assert_eq!(record.state(), Some("ca"));
}
