use super::common::scored;
use crate::appetite::aggregate::aggregate_accounts;
use crate::appetite::domain::PolicyId;

#[test]
fn weighted_average_blends_premium_sized_policies() {
    let view = aggregate_accounts(vec![
        scored("1", "Acme Corp", 1_000_000.0, 70.0, Some(0.8)),
        scored("2", "Acme Corp", 500_000.0, 50.0, Some(0.4)),
    ]);

    let acme = &view.accounts["Acme Corp"];
    assert_eq!(acme.avg_score, Some(0.6));
    assert_eq!(acme.max_score, Some(0.8));
    // (0.8 * 1M + 0.4 * 0.5M) / 1.5M
    assert_eq!(acme.weighted_score, Some(0.667));
}

#[test]
fn blended_policy_score_averages_relevance_with_account_weight() {
    let view = aggregate_accounts(vec![
        scored("1", "Acme Corp", 1_000_000.0, 70.0, Some(0.8)),
        scored("2", "Acme Corp", 500_000.0, 50.0, Some(0.4)),
    ]);

    let acme = &view.accounts["Acme Corp"];
    let first = &acme.policies[&PolicyId("1".to_string())];
    let second = &acme.policies[&PolicyId("2".to_string())];
    assert_eq!(first.score, Some(0.733));
    assert_eq!(second.score, Some(0.533));
}

#[test]
fn zero_premium_group_degenerates_to_simple_average() {
    let view = aggregate_accounts(vec![
        scored("1", "Zero Co", 0.0, 80.0, Some(0.9)),
        scored("2", "Zero Co", 0.0, 40.0, Some(0.3)),
    ]);

    let account = &view.accounts["Zero Co"];
    assert_eq!(account.weighted_score, account.avg_score);
    assert_eq!(account.weighted_risk_score, account.avg_risk_score);
    assert_eq!(account.avg_risk_score, 60.0);
}

#[test]
fn risk_rollup_is_always_present_and_relevance_is_optional() {
    let view = aggregate_accounts(vec![
        scored("1", "Quiet Co", 250_000.0, 55.5, None),
        scored("2", "Quiet Co", 750_000.0, 75.5, None),
    ]);

    let account = &view.accounts["Quiet Co"];
    assert!(account.avg_score.is_none());
    assert!(account.weighted_score.is_none());
    assert_eq!(account.max_risk_score, 75.5);
    // (55.5 * 0.25 + 75.5 * 0.75)
    assert_eq!(account.weighted_risk_score, 70.5);
    assert!(account
        .policies
        .values()
        .all(|policy| policy.score.is_none()));
}

#[test]
fn weighted_average_stays_between_group_min_and_max() {
    let view = aggregate_accounts(vec![
        scored("1", "Span Co", 10.0, 20.0, Some(0.2)),
        scored("2", "Span Co", 990.0, 90.0, Some(0.9)),
        scored("3", "Span Co", 500.0, 45.0, Some(0.5)),
    ]);

    let account = &view.accounts["Span Co"];
    let weighted = account.weighted_score.expect("relevance present");
    assert!((0.2..=0.9).contains(&weighted));
    assert!((20.0..=90.0).contains(&account.weighted_risk_score));
}

#[test]
fn grouping_is_exact_and_preserves_every_policy() {
    let view = aggregate_accounts(vec![
        scored("1", "Acme Corp", 100.0, 10.0, None),
        scored("2", "Acme Corp ", 100.0, 20.0, None),
        scored("3", "Beta LLC", 100.0, 30.0, None),
    ]);

    // Trailing whitespace makes a distinct account: no fuzzy grouping.
    assert_eq!(view.accounts.len(), 3);
    assert_eq!(view.policy_count(), 3);
}

#[test]
fn unnamed_policies_share_the_unassigned_bucket() {
    let mut nameless = scored("1", "", 100.0, 10.0, None);
    nameless.record.account_name = None;
    let view = aggregate_accounts(vec![nameless]);

    assert!(view.accounts.contains_key("<unassigned>"));
}

#[test]
fn missing_ids_fall_back_to_positional_keys() {
    let mut policy = scored("x", "Acme Corp", 100.0, 10.0, None);
    policy.record.id = None;
    let view = aggregate_accounts(vec![policy]);

    let acme = &view.accounts["Acme Corp"];
    assert!(acme.policies.contains_key(&PolicyId("policy-0".to_string())));
}
