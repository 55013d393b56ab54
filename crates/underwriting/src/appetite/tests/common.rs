use chrono::NaiveDate;

use crate::appetite::domain::{LossField, PolicyId, PolicyRecord, ScoredPolicy};

/// A submission that clears the strict property guideline: in-force
/// dates, healthy TIV, fire resistive construction, low loss ratio.
pub(super) fn property_record() -> PolicyRecord {
    PolicyRecord {
        id: Some(PolicyId("1001".to_string())),
        account_name: Some("Acme Corp".to_string()),
        line_of_business: Some("COMMERCIAL PROPERTY".to_string()),
        renewal_or_new_business: Some("NEW_BUSINESS".to_string()),
        primary_risk_state: Some("OH".to_string()),
        tiv: Some(10_000_000.0),
        total_premium: Some(1_000_000.0),
        loss_value: Some(LossField::Amount(100_000.0)),
        construction_type: Some("Fire Resistive".to_string()),
        oldest_building: Some(1960),
        winnability: None,
        effective_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        expiration_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        extra: Default::default(),
    }
}

/// A submission squarely inside the target segment bands.
pub(super) fn target_record() -> PolicyRecord {
    PolicyRecord {
        id: Some(PolicyId("2001".to_string())),
        account_name: Some("Target Holdings".to_string()),
        tiv: Some(60_000_000.0),
        total_premium: Some(100_000.0),
        loss_value: Some(LossField::Amount(20_000.0)),
        construction_type: Some("Joisted Masonry".to_string()),
        oldest_building: Some(2015),
        ..property_record()
    }
}

/// Scored wrapper with only the fields that matter for aggregation.
pub(super) fn scored(
    id: &str,
    account: &str,
    premium: f64,
    risk_score: f64,
    relevance: Option<f64>,
) -> ScoredPolicy {
    ScoredPolicy {
        record: PolicyRecord {
            id: Some(PolicyId(id.to_string())),
            account_name: Some(account.to_string()),
            total_premium: Some(premium),
            ..Default::default()
        },
        appetite_score: 0.0,
        risk_score,
        eligible: true,
        reason: None,
        relevance_score: relevance,
        score: None,
        justification_points: Vec::new(),
        references: Vec::new(),
    }
}
