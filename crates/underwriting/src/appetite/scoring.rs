use super::domain::PolicyRecord;
use super::eligibility::{
    is_acceptable_state, is_target_state, matches_preferred_construction, TargetSegmentFilter,
};
use super::round2;

/// Continuous 0-100 appetite signal. Scorers are independent of the
/// eligibility filters: out-of-appetite records still score, so the
/// desk can rank near-misses.
pub trait AppetiteScorer {
    fn score(&self, record: &PolicyRecord) -> f64;
}

/// Weights of the graded appetite factors; they sum to 100 so the
/// score reads as a percentage of a perfect fit.
#[derive(Debug, Clone)]
pub struct FactorWeights {
    pub line_of_business: f64,
    pub tiv: f64,
    pub construction: f64,
    pub building_age: f64,
    pub loss_ratio: f64,
    pub winnability: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            line_of_business: 20.0,
            tiv: 15.0,
            construction: 15.0,
            building_age: 10.0,
            loss_ratio: 20.0,
            winnability: 20.0,
        }
    }
}

/// One row of the construction credit table: a lowercase substring
/// pattern and the share of the construction weight it earns.
#[derive(Debug, Clone)]
pub struct ConstructionTier {
    pub pattern: &'static str,
    pub credit: f64,
}

/// Default construction credit ladder, best class first. First match
/// wins, so order is part of the table.
pub const DEFAULT_CONSTRUCTION_TIERS: [ConstructionTier; 4] = [
    ConstructionTier {
        pattern: "fire resistive",
        credit: 1.0,
    },
    ConstructionTier {
        pattern: "non-combustible",
        credit: 0.8,
    },
    ConstructionTier {
        pattern: "masonry",
        credit: 0.6,
    },
    ConstructionTier {
        pattern: "frame",
        credit: 0.3,
    },
];

/// Graded scorer: each factor contributes partial credit
/// independently, so a submission that misses one guideline still
/// ranks above one that misses three.
#[derive(Debug, Clone)]
pub struct WeightedAppetiteScorer {
    weights: FactorWeights,
    construction_tiers: Vec<ConstructionTier>,
}

impl WeightedAppetiteScorer {
    pub fn new() -> Self {
        Self {
            weights: FactorWeights::default(),
            construction_tiers: DEFAULT_CONSTRUCTION_TIERS.to_vec(),
        }
    }

    /// Tune the tier table without touching the scoring algorithm.
    pub fn with_construction_tiers(mut self, tiers: Vec<ConstructionTier>) -> Self {
        self.construction_tiers = tiers;
        self
    }

    fn construction_credit(&self, construction: &str) -> f64 {
        let lowered = construction.to_ascii_lowercase();
        self.construction_tiers
            .iter()
            .find(|tier| lowered.contains(tier.pattern))
            .map(|tier| tier.credit)
            .unwrap_or(0.0)
    }

    fn building_age_credit(year: Option<i32>) -> f64 {
        match year {
            Some(year) if year >= 2000 => 1.0,
            Some(year) if year >= 1980 => 0.7,
            Some(year) if year >= 1950 => 0.5,
            _ => 0.0,
        }
    }

    fn loss_ratio_credit(ratio: f64) -> f64 {
        if ratio < 0.3 {
            1.0
        } else if ratio < 0.5 {
            0.7
        } else if ratio < 0.7 {
            0.4
        } else {
            0.0
        }
    }

    /// Graded loss ratio: a premium of exactly zero and an
    /// unparseable loss amount both fall back to 1.0; a missing
    /// premium divides by the guideline default of 1.
    fn loss_ratio(record: &PolicyRecord) -> f64 {
        let loss = match record.loss_value() {
            Some(loss) => loss,
            None => return 1.0,
        };
        match record.total_premium {
            Some(premium) if premium != 0.0 => loss / premium,
            Some(_) => 1.0,
            None => loss,
        }
    }
}

impl Default for WeightedAppetiteScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl AppetiteScorer for WeightedAppetiteScorer {
    fn score(&self, record: &PolicyRecord) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;

        if record.is_commercial_property() {
            score += w.line_of_business;
        }

        // Linear TIV credit saturating at the 100M reference point.
        score += (record.tiv() / 100_000_000.0 * w.tiv).min(w.tiv);

        score += w.construction * self.construction_credit(record.construction_type());

        score += w.building_age * Self::building_age_credit(record.oldest_building());

        score += w.loss_ratio * Self::loss_ratio_credit(Self::loss_ratio(record));

        if let Some(mut winnability) = record.winnability() {
            if winnability > 1.0 {
                winnability /= 100.0;
            }
            score += winnability * w.winnability;
        }

        round2(score.clamp(0.0, 100.0))
    }
}

/// Gated scorer paired with [`TargetSegmentFilter`]: any hard
/// criterion failing zeroes the score outright; passed criteria earn
/// fixed credits with target-band bonuses, capped at 100.
#[derive(Debug, Clone)]
pub struct TargetAppetiteScorer {
    premium_ceiling: f64,
}

impl TargetAppetiteScorer {
    /// The gated guideline revision carried a wider premium band than
    /// the filter's; both stayed configurable once they diverged.
    pub const DEFAULT_PREMIUM_CEILING: f64 = 1_705_000.0;

    pub fn new() -> Self {
        Self {
            premium_ceiling: Self::DEFAULT_PREMIUM_CEILING,
        }
    }

    pub fn with_premium_ceiling(premium_ceiling: f64) -> Self {
        Self { premium_ceiling }
    }
}

impl Default for TargetAppetiteScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl AppetiteScorer for TargetAppetiteScorer {
    fn score(&self, record: &PolicyRecord) -> f64 {
        let mut score: f64 = 0.0;

        if !record.is_new_business() {
            return 0.0;
        }
        score += 10.0;

        if !record.is_commercial_property() {
            return 0.0;
        }
        score += 10.0;

        match record.state() {
            Some(state) if is_acceptable_state(state) => {
                score += 10.0;
                if is_target_state(state) {
                    score += 5.0;
                }
            }
            _ => return 0.0,
        }

        let tiv = record.tiv();
        if tiv > TargetSegmentFilter::MAX_TIV {
            return 0.0;
        }
        score += if (50_000_000.0..=100_000_000.0).contains(&tiv) {
            15.0
        } else {
            10.0
        };

        let premium = record.total_premium();
        if premium < TargetSegmentFilter::PREMIUM_FLOOR || premium > self.premium_ceiling {
            return 0.0;
        }
        score += if (75_000.0..=1_000_000.0).contains(&premium) {
            15.0
        } else {
            10.0
        };

        let year = record.oldest_building().unwrap_or(0);
        if year < TargetSegmentFilter::MIN_BUILD_YEAR {
            return 0.0;
        }
        score += if year >= 2010 { 15.0 } else { 10.0 };

        if record.loss_value().unwrap_or(0.0) > TargetSegmentFilter::MAX_LOSS_VALUE {
            return 0.0;
        }
        score += 10.0;

        if !matches_preferred_construction(record.construction_type()) {
            return 0.0;
        }
        score += 10.0;

        round2(score.min(100.0))
    }
}
