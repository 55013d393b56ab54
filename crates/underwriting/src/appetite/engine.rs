use tracing::debug;

use super::aggregate::{aggregate_accounts, PortfolioView};
use super::domain::{PolicyRecord, ScoredPolicy};
use super::eligibility::{AppetiteFilter, StrictPropertyFilter, TargetSegmentFilter};
use super::risk::RiskScorer;
use super::scoring::{AppetiteScorer, TargetAppetiteScorer, WeightedAppetiteScorer};
use crate::config::UnderwritingConfig;

/// Composes one filter strategy, one appetite scorer, and the risk
/// scorer into a single annotate-and-aggregate pass. Input records
/// are never mutated; annotation returns new [`ScoredPolicy`] values.
pub struct SubmissionPipeline {
    filter: Box<dyn AppetiteFilter + Send + Sync>,
    appetite: Box<dyn AppetiteScorer + Send + Sync>,
    risk: RiskScorer,
}

impl SubmissionPipeline {
    pub fn new(
        filter: Box<dyn AppetiteFilter + Send + Sync>,
        appetite: Box<dyn AppetiteScorer + Send + Sync>,
        risk: RiskScorer,
    ) -> Self {
        Self {
            filter,
            appetite,
            risk,
        }
    }

    /// Broad-intake pairing: strict property gate with the graded
    /// appetite score.
    pub fn strict(config: &UnderwritingConfig) -> Self {
        Self::new(
            Box::new(StrictPropertyFilter),
            Box::new(WeightedAppetiteScorer::new()),
            RiskScorer::new(config.risk_reference_year),
        )
    }

    /// Target-segment pairing: narrow gate with the gated scorer.
    /// The configured premium ceiling, when set, overrides both
    /// strategies' defaults.
    pub fn target_segment(config: &UnderwritingConfig) -> Self {
        let filter = match config.premium_ceiling {
            Some(ceiling) => TargetSegmentFilter::with_premium_ceiling(ceiling),
            None => TargetSegmentFilter::new(),
        };
        let scorer = match config.premium_ceiling {
            Some(ceiling) => TargetAppetiteScorer::with_premium_ceiling(ceiling),
            None => TargetAppetiteScorer::new(),
        };
        Self::new(
            Box::new(filter),
            Box::new(scorer),
            RiskScorer::new(config.risk_reference_year),
        )
    }

    /// Classify and score every record. Total: each output carries a
    /// complete set of derived fields regardless of input quality.
    pub fn annotate(&self, records: &[PolicyRecord]) -> Vec<ScoredPolicy> {
        let mut eligible = 0usize;
        let scored: Vec<ScoredPolicy> = records
            .iter()
            .map(|record| {
                let classification = self.filter.classify(record);
                if classification.eligible {
                    eligible += 1;
                }
                ScoredPolicy {
                    appetite_score: self.appetite.score(record),
                    risk_score: self.risk.score(record),
                    eligible: classification.eligible,
                    reason: classification.reason,
                    relevance_score: None,
                    score: None,
                    justification_points: Vec::new(),
                    references: Vec::new(),
                    record: record.clone(),
                }
            })
            .collect();

        debug!(
            total = scored.len(),
            eligible,
            out_of_appetite = scored.len() - eligible,
            "annotated submissions"
        );
        scored
    }

    /// Full pass: annotate then roll up by account.
    pub fn run(&self, records: &[PolicyRecord]) -> PortfolioView {
        aggregate_accounts(self.annotate(records))
    }
}
