use super::common::property_record;
use crate::appetite::domain::{LossField, PolicyRecord};
use crate::appetite::risk::RiskScorer;

fn reference_scorer() -> RiskScorer {
    RiskScorer::new(2025)
}

#[test]
fn risk_score_matches_hand_computed_reference() {
    // loss: ratio 0.1 -> (1 - 0.1/0.7) * 0.35 = 0.3
    // tiv: ln(10M)/ln(50M) * 0.25 ~= 0.2273
    // construction: fire resistive -> 0.15
    // age: (1 - 65/100) * 0.10 = 0.035
    // state: OH not preferred -> 0.05
    // winnability: absent -> 0.5 * 0.05 = 0.025
    let score = reference_scorer().score(&property_record());
    assert_eq!(score, 78.73);
}

#[test]
fn zero_premium_zeroes_the_loss_component() {
    let mut record = property_record();
    record.total_premium = Some(0.0);
    record.loss_value = Some(LossField::Amount(500.0));

    let with_zero_premium = reference_scorer().score(&record);

    record.loss_value = Some(LossField::Amount(0.0));
    record.total_premium = Some(1_000_000.0);
    let clean = reference_scorer().score(&record);

    // The degenerate ratio counts as the worst loss history.
    assert!(with_zero_premium < clean);
    assert_eq!(with_zero_premium, clean - 35.0);
}

#[test]
fn preferred_state_earns_full_jurisdiction_credit() {
    let scorer = reference_scorer();
    let mut record = property_record();

    record.primary_risk_state = Some("CA".to_string());
    let preferred = scorer.score(&record);

    record.primary_risk_state = Some("NY".to_string());
    let other = scorer.score(&record);

    assert_eq!(preferred - other, 5.0);
}

#[test]
fn unknown_construction_scores_above_known_poor_class() {
    let scorer = reference_scorer();
    let mut record = property_record();

    record.construction_type = None;
    let unknown = scorer.score(&record);

    record.construction_type = Some("Wood Shake".to_string());
    let poor = scorer.score(&record);

    assert!(unknown > poor);
}

#[test]
fn missing_building_year_reads_as_current_construction() {
    let scorer = reference_scorer();
    let mut record = property_record();

    record.oldest_building = None;
    let missing = scorer.score(&record);

    record.oldest_building = Some(2025);
    let current = scorer.score(&record);

    assert_eq!(missing, current);
}

#[test]
fn winnability_rescales_percentage_inputs() {
    let scorer = reference_scorer();
    let mut record = property_record();

    record.winnability = Some(0.8);
    let fractional = scorer.score(&record);

    record.winnability = Some(80.0);
    assert_eq!(scorer.score(&record), fractional);
}

#[test]
fn empty_record_still_scores_within_bounds() {
    let score = reference_scorer().score(&PolicyRecord::default());
    assert!((0.0..=100.0).contains(&score));
}

#[test]
fn reference_year_shifts_age_credit() {
    let mut record = property_record();
    record.oldest_building = Some(2000);

    let near = RiskScorer::new(2010).score(&record);
    let far = RiskScorer::new(2025).score(&record);

    assert!(near > far);
}
