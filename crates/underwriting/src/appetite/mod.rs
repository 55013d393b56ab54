//! Appetite evaluation: the policy record model, the two eligibility
//! rule sets, the two appetite scorers, the risk scorer, enrichment
//! pass-through, and the account rollup.

pub mod aggregate;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod enrichment;
pub mod risk;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_accounts, AccountSummary, PortfolioView, ScoreStats};
pub use domain::{LossField, PolicyId, PolicyRecord, ScoredPolicy};
pub use eligibility::{
    AppetiteFilter, Classification, IneligibilityReason, StrictPropertyFilter, TargetSegmentFilter,
};
pub use engine::SubmissionPipeline;
pub use enrichment::{
    apply_relevance, parse_justification, parse_references, Reference, RelevanceAnnotation,
};
pub use risk::RiskScorer;
pub use scoring::{
    AppetiteScorer, ConstructionTier, FactorWeights, TargetAppetiteScorer, WeightedAppetiteScorer,
};

/// Round to two decimals, the precision of the per-record scores.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to three decimals, the precision of relevance-style scores.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
