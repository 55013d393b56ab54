use super::domain::PolicyRecord;
use super::round2;

/// Weighted-normalization risk score, independent of the appetite
/// rules. Each component normalizes to [0, 1]; the fixed weights sum
/// to 1, so the combined score lands in [0, 100].
#[derive(Debug, Clone)]
pub struct RiskScorer {
    /// Year building age is measured against.
    pub reference_year: i32,
    /// Jurisdictions the carrier prioritizes.
    pub preferred_states: Vec<String>,
}

const LOSS_WEIGHT: f64 = 0.35;
const TIV_WEIGHT: f64 = 0.25;
const CONSTRUCTION_WEIGHT: f64 = 0.15;
const AGE_WEIGHT: f64 = 0.10;
const STATE_WEIGHT: f64 = 0.10;
const WINNABILITY_WEIGHT: f64 = 0.05;

/// TIV normalization saturates at this reference exposure.
const TIV_SATURATION: f64 = 50_000_000.0;

impl RiskScorer {
    pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            preferred_states: vec!["CA".to_string(), "TX".to_string()],
        }
    }

    pub fn with_preferred_states(mut self, states: Vec<String>) -> Self {
        self.preferred_states = states;
        self
    }

    pub fn score(&self, record: &PolicyRecord) -> f64 {
        let loss_component = 1.0 - (Self::loss_ratio(record) / 0.7).min(1.0);

        let tiv_component = (record.tiv().max(1.0).ln() / TIV_SATURATION.ln()).min(1.0);

        let construction_component = Self::construction_component(record.construction_type());

        // Missing year reads as current construction rather than
        // penalizing the record for a data gap.
        let build_year = record.oldest_building().unwrap_or(self.reference_year);
        let age_component =
            (1.0 - f64::from(self.reference_year - build_year) / 100.0).clamp(0.0, 1.0);

        let state_component = match record.state() {
            Some(state)
                if self
                    .preferred_states
                    .iter()
                    .any(|preferred| preferred.eq_ignore_ascii_case(state)) =>
            {
                1.0
            }
            _ => 0.5,
        };

        let winnability_component = match record.winnability() {
            Some(value) if value > 1.0 => (value / 100.0).min(1.0),
            Some(value) => value.clamp(0.0, 1.0),
            None => 0.5,
        };

        let combined = LOSS_WEIGHT * loss_component
            + TIV_WEIGHT * tiv_component
            + CONSTRUCTION_WEIGHT * construction_component
            + AGE_WEIGHT * age_component
            + STATE_WEIGHT * state_component
            + WINNABILITY_WEIGHT * winnability_component;

        round2((combined * 100.0).clamp(0.0, 100.0))
    }

    /// Loss ratio with a documented default of 1 whenever the premium
    /// cannot serve as a denominator.
    fn loss_ratio(record: &PolicyRecord) -> f64 {
        let premium = record.total_premium();
        if premium <= 0.0 {
            return 1.0;
        }
        record.loss_value().unwrap_or(0.0) / premium
    }

    fn construction_component(construction: &str) -> f64 {
        let lowered = construction.to_ascii_lowercase();
        if lowered.is_empty() {
            // Unknown construction is riskier than a known-mediocre
            // class but not as bad as known-poor.
            0.3
        } else if lowered.contains("fire resistive") || lowered.contains("non-combustible") {
            1.0
        } else if lowered.contains("masonry") || lowered.contains("mixed") {
            0.5
        } else {
            0.2
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REFERENCE_YEAR)
    }
}
