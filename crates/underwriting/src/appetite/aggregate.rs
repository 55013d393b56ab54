use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{PolicyId, ScoredPolicy};
use super::{round2, round3};

/// Account-level rollup of one score. Averages are premium-weighted
/// where premium exists; an account whose members all carry zero
/// premium degenerates to the simple average rather than dividing by
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub avg: f64,
    pub max: f64,
    pub weighted: f64,
}

/// One account's summary plus every constituent policy keyed by id.
/// Aggregation never drops a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Relevance rollup, present only when the external reranker
    /// annotated at least one member. Three decimals, matching the
    /// per-record relevance precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
    /// Risk rollup, always present. Two decimals like the per-record
    /// risk score.
    pub avg_risk_score: f64,
    pub max_risk_score: f64,
    pub weighted_risk_score: f64,
    pub policies: BTreeMap<PolicyId, ScoredPolicy>,
}

/// The serializable account graph handed to the record sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioView {
    pub accounts: BTreeMap<String, AccountSummary>,
}

impl PortfolioView {
    pub fn policy_count(&self) -> usize {
        self.accounts
            .values()
            .map(|account| account.policies.len())
            .sum()
    }
}

/// Group scored policies by exact account name and compute the
/// account statistics. Insertion order is irrelevant to the result;
/// the output maps are ordered by key.
pub fn aggregate_accounts(policies: Vec<ScoredPolicy>) -> PortfolioView {
    let mut groups: BTreeMap<String, Vec<ScoredPolicy>> = BTreeMap::new();
    for policy in policies {
        groups
            .entry(policy.record.account_name().to_string())
            .or_default()
            .push(policy);
    }

    let accounts = groups
        .into_iter()
        .map(|(name, members)| (name, summarize(members)))
        .collect();

    PortfolioView { accounts }
}

fn summarize(mut members: Vec<ScoredPolicy>) -> AccountSummary {
    let risk_points: Vec<(f64, f64)> = members
        .iter()
        .map(|member| (member.risk_score, member.record.total_premium()))
        .collect();
    // Groups are built by pushing at least one member, but degrade
    // to zeros rather than panicking if that ever changes.
    let risk = stats(&risk_points).unwrap_or(ScoreStats {
        avg: 0.0,
        max: 0.0,
        weighted: 0.0,
    });

    let relevance_points: Vec<(f64, f64)> = members
        .iter()
        .filter_map(|member| {
            member
                .relevance_score
                .map(|score| (score, member.record.total_premium()))
        })
        .collect();
    let relevance = stats(&relevance_points);

    // Blend each annotated policy's relevance with the account's
    // weighted average so a single outlier in a strong account still
    // surfaces near its peers.
    if let Some(relevance) = &relevance {
        for member in &mut members {
            if let Some(score) = member.relevance_score {
                member.score = Some(round3((score + relevance.weighted) / 2.0));
            }
        }
    }

    let mut policies = BTreeMap::new();
    for (index, member) in members.into_iter().enumerate() {
        let id = member
            .record
            .id
            .clone()
            .unwrap_or_else(|| PolicyId(format!("policy-{index}")));
        policies.insert(id, member);
    }

    AccountSummary {
        avg_score: relevance.map(|r| round3(r.avg)),
        max_score: relevance.map(|r| round3(r.max)),
        weighted_score: relevance.map(|r| round3(r.weighted)),
        avg_risk_score: round2(risk.avg),
        max_risk_score: round2(risk.max),
        weighted_risk_score: round2(risk.weighted),
        policies,
    }
}

/// Simple average, maximum, and premium-weighted average over
/// `(score, premium)` pairs. `None` when the slice is empty.
fn stats(points: &[(f64, f64)]) -> Option<ScoreStats> {
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let avg = points.iter().map(|(score, _)| score).sum::<f64>() / count;
    let max = points
        .iter()
        .map(|(score, _)| *score)
        .fold(f64::MIN, f64::max);

    let total_weight: f64 = points.iter().map(|(_, premium)| premium).sum();
    let weighted = if total_weight > 0.0 {
        points
            .iter()
            .map(|(score, premium)| score * premium)
            .sum::<f64>()
            / total_weight
    } else {
        avg
    };

    Some(ScoreStats { avg, max, weighted })
}
