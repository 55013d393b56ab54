//! Rule-based underwriting appetite engine.
//!
//! The crate turns raw policy submissions into an in/out appetite
//! classification, a pair of 0-100 scores (appetite and risk), and an
//! account-level rollup. The scoring core is a pure computation over
//! in-memory records; JSON feed ingestion and export live behind the
//! [`feed`] module, and calling reranking or generation services
//! belongs to the consuming orchestrator.

pub mod appetite;
pub mod config;
pub mod error;
pub mod feed;
pub mod telemetry;

pub use appetite::{
    aggregate_accounts, apply_relevance, parse_justification, parse_references, AccountSummary,
    AppetiteFilter, AppetiteScorer, Classification, ConstructionTier, FactorWeights,
    IneligibilityReason, LossField, PolicyId, PolicyRecord, PortfolioView, Reference,
    RelevanceAnnotation, RiskScorer, ScoreStats, ScoredPolicy, StrictPropertyFilter,
    SubmissionPipeline, TargetAppetiteScorer, TargetSegmentFilter, WeightedAppetiteScorer,
};
pub use config::AppConfig;
pub use error::AppError;
