//! Pass-through handling for annotations produced by external
//! reranking and generation services. The engine never calls those
//! services; it only accepts their output defensively, since chat
//! completions routinely wrap JSON in markdown fences or return prose
//! instead of the requested structure.

use serde::{Deserialize, Serialize};

use super::domain::ScoredPolicy;

/// Reference-style supporting point attached per policy by the
/// generation collaborator. Content is opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub point: String,
    pub link: String,
}

/// Relevance produced by the reranking collaborator, correlated back
/// to the original record position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceAnnotation {
    pub index: usize,
    pub relevance_score: f64,
}

const FALLBACK_LINK: &str = "https://example.com";

#[derive(Deserialize)]
struct PointsPayload {
    points: Vec<String>,
}

#[derive(Deserialize)]
struct ReferencesPayload {
    references: Vec<Reference>,
}

/// Parse a justification response. Any shape other than
/// `{"points": [...]}` wraps the raw text as a single point; a
/// malformed response is never fatal to the batch.
pub fn parse_justification(raw: &str) -> Vec<String> {
    match serde_json::from_str::<PointsPayload>(strip_code_fence(raw)) {
        Ok(payload) => payload.points,
        Err(_) => vec![raw.trim().to_string()],
    }
}

/// Parse a references response, falling back to one entry carrying
/// the raw text.
pub fn parse_references(raw: &str) -> Vec<Reference> {
    match serde_json::from_str::<ReferencesPayload>(strip_code_fence(raw)) {
        Ok(payload) => payload.references,
        Err(_) => vec![Reference {
            point: raw.trim().to_string(),
            link: FALLBACK_LINK.to_string(),
        }],
    }
}

/// Attach reranker relevance to scored policies by original record
/// position. Out-of-range indices are ignored.
pub fn apply_relevance(policies: &mut [ScoredPolicy], annotations: &[RelevanceAnnotation]) {
    for annotation in annotations {
        if let Some(policy) = policies.get_mut(annotation.index) {
            policy.relevance_score = Some(annotation.relevance_score);
        }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_prefix
        .strip_suffix("```")
        .unwrap_or(without_prefix)
        .trim()
}
