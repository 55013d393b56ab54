use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::PolicyRecord;

/// States the target underwriting guideline accepts at all.
pub(crate) const ACCEPTABLE_STATES: [&str; 11] = [
    "OH", "PA", "MD", "CO", "CA", "FL", "NC", "SC", "GA", "VA", "UT",
];

/// Subset of acceptable states that earn the target bonus.
pub(crate) const TARGET_STATES: [&str; 6] = ["OH", "PA", "MD", "CO", "CA", "FL"];

/// Construction classes the target guideline prefers; matched
/// case-insensitively by substring against the free-text field.
pub(crate) const PREFERRED_CONSTRUCTION: [&str; 4] = [
    "JM",
    "Joisted Masonry",
    "Non-Combustible",
    "Masonry Non-Combustible",
];

pub(crate) fn matches_preferred_construction(construction: &str) -> bool {
    let lowered = construction.to_ascii_lowercase();
    PREFERRED_CONSTRUCTION
        .iter()
        .any(|preferred| lowered.contains(&preferred.to_ascii_lowercase()))
}

pub(crate) fn is_acceptable_state(state: &str) -> bool {
    ACCEPTABLE_STATES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(state))
}

pub(crate) fn is_target_state(state: &str) -> bool {
    TARGET_STATES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(state))
}

/// Hard-gate rule set deciding whether a submission is in appetite.
///
/// Two carrier guidelines exist for the same concept and evolved
/// separately; they stay swappable behind this trait and are never
/// merged.
pub trait AppetiteFilter {
    fn classify(&self, record: &PolicyRecord) -> Classification;
}

/// In/out decision with the first failing rule as the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub eligible: bool,
    pub reason: Option<IneligibilityReason>,
}

impl Classification {
    pub fn in_appetite() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    pub fn out_of_appetite(reason: IneligibilityReason) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
        }
    }
}

/// Enumerates why a submission fell outside appetite, for reporting
/// and audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    NotNewBusiness,
    NonPropertyLine,
    MissingPolicyDates,
    TivBelowMinimum { tiv: f64, minimum: f64 },
    TivAboveMaximum { tiv: f64, maximum: f64 },
    PremiumOutsideBounds { premium: f64, floor: f64, ceiling: f64 },
    BuildingTooOld { year: i32, minimum: i32 },
    ExcessiveLossRatio { ratio: f64, threshold: f64 },
    ExcessiveLossValue { loss: f64, maximum: f64 },
    UnacceptableState { state: Option<String> },
    ExcludedConstruction { construction: String },
    ConstructionNotPreferred { construction: String },
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::NotNewBusiness => write!(f, "renewal business is out of appetite"),
            IneligibilityReason::NonPropertyLine => {
                write!(f, "only Commercial Property is in appetite")
            }
            IneligibilityReason::MissingPolicyDates => {
                write!(f, "effective and expiration dates are required")
            }
            IneligibilityReason::TivBelowMinimum { tiv, minimum } => {
                write!(f, "TIV {tiv:.0} below minimum {minimum:.0}")
            }
            IneligibilityReason::TivAboveMaximum { tiv, maximum } => {
                write!(f, "TIV {tiv:.0} above maximum {maximum:.0}")
            }
            IneligibilityReason::PremiumOutsideBounds {
                premium,
                floor,
                ceiling,
            } => write!(
                f,
                "premium {premium:.0} outside [{floor:.0}, {ceiling:.0}]"
            ),
            IneligibilityReason::BuildingTooOld { year, minimum } => {
                write!(f, "oldest building {year} predates {minimum}")
            }
            IneligibilityReason::ExcessiveLossRatio { ratio, threshold } => {
                write!(f, "loss ratio {ratio:.2} at or above {threshold:.2}")
            }
            IneligibilityReason::ExcessiveLossValue { loss, maximum } => {
                write!(f, "loss value {loss:.0} above {maximum:.0}")
            }
            IneligibilityReason::UnacceptableState { state } => match state {
                Some(state) => write!(f, "state {state} outside acceptable set"),
                None => write!(f, "primary risk state missing"),
            },
            IneligibilityReason::ExcludedConstruction { construction } => {
                write!(f, "{construction} construction is excluded")
            }
            IneligibilityReason::ConstructionNotPreferred { construction } => {
                write!(f, "construction '{construction}' not in preferred set")
            }
        }
    }
}

/// The original property guideline: broad intake gated on line of
/// business, policy dates, a TIV floor, frame exclusion, building age,
/// and loss ratio. Checks run cheapest first; the set is commutative,
/// so ordering only affects the reported reason.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictPropertyFilter;

impl StrictPropertyFilter {
    pub const MIN_TIV: f64 = 10_000_000.0;
    pub const MIN_BUILD_YEAR: i32 = 1950;
    pub const MAX_LOSS_RATIO: f64 = 0.7;

    /// Loss ratio with the guideline's guards: premium floors at 1 and
    /// an unparseable loss amount falls back to a ratio of 1.0.
    fn loss_ratio(record: &PolicyRecord) -> f64 {
        match record.loss_value() {
            Some(loss) => loss / record.total_premium().max(1.0),
            None => 1.0,
        }
    }
}

impl AppetiteFilter for StrictPropertyFilter {
    fn classify(&self, record: &PolicyRecord) -> Classification {
        if !record.is_commercial_property() {
            return Classification::out_of_appetite(IneligibilityReason::NonPropertyLine);
        }

        if !record.has_policy_dates() {
            return Classification::out_of_appetite(IneligibilityReason::MissingPolicyDates);
        }

        let tiv = record.tiv();
        if tiv < Self::MIN_TIV {
            return Classification::out_of_appetite(IneligibilityReason::TivBelowMinimum {
                tiv,
                minimum: Self::MIN_TIV,
            });
        }

        // Exact match by guideline: "Frame" names the ISO class, not
        // any free-text mention of framing.
        if record.construction_type() == "Frame" {
            return Classification::out_of_appetite(IneligibilityReason::ExcludedConstruction {
                construction: "Frame".to_string(),
            });
        }

        // Missing year passes: the guideline only rejects known
        // pre-1950 construction.
        if let Some(year) = record.oldest_building() {
            if year < Self::MIN_BUILD_YEAR {
                return Classification::out_of_appetite(IneligibilityReason::BuildingTooOld {
                    year,
                    minimum: Self::MIN_BUILD_YEAR,
                });
            }
        }

        let ratio = Self::loss_ratio(record);
        if ratio >= Self::MAX_LOSS_RATIO {
            return Classification::out_of_appetite(IneligibilityReason::ExcessiveLossRatio {
                ratio,
                threshold: Self::MAX_LOSS_RATIO,
            });
        }

        Classification::in_appetite()
    }
}

/// The later underwriting-target guideline: narrow new-business intake
/// within a fixed state set, premium band, and preferred construction
/// classes. The premium ceiling moved between guideline revisions, so
/// it is a parameter rather than a constant.
#[derive(Debug, Clone)]
pub struct TargetSegmentFilter {
    premium_ceiling: f64,
}

impl TargetSegmentFilter {
    pub const MAX_TIV: f64 = 150_000_000.0;
    pub const PREMIUM_FLOOR: f64 = 50_000.0;
    pub const DEFAULT_PREMIUM_CEILING: f64 = 175_000.0;
    pub const MIN_BUILD_YEAR: i32 = 1990;
    pub const MAX_LOSS_VALUE: f64 = 100_000.0;

    pub fn new() -> Self {
        Self {
            premium_ceiling: Self::DEFAULT_PREMIUM_CEILING,
        }
    }

    pub fn with_premium_ceiling(premium_ceiling: f64) -> Self {
        Self { premium_ceiling }
    }

    pub fn premium_ceiling(&self) -> f64 {
        self.premium_ceiling
    }
}

impl Default for TargetSegmentFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl AppetiteFilter for TargetSegmentFilter {
    fn classify(&self, record: &PolicyRecord) -> Classification {
        if !record.is_new_business() {
            return Classification::out_of_appetite(IneligibilityReason::NotNewBusiness);
        }

        // Line of business is only enforced when the extract carries
        // the field; most target-segment feeds are property-only.
        if record.line_of_business.is_some() && !record.is_commercial_property() {
            return Classification::out_of_appetite(IneligibilityReason::NonPropertyLine);
        }

        match record.state() {
            Some(state) if is_acceptable_state(state) => {}
            state => {
                return Classification::out_of_appetite(IneligibilityReason::UnacceptableState {
                    state: state.map(str::to_string),
                })
            }
        }

        let tiv = record.tiv();
        if tiv > Self::MAX_TIV {
            return Classification::out_of_appetite(IneligibilityReason::TivAboveMaximum {
                tiv,
                maximum: Self::MAX_TIV,
            });
        }

        let premium = record.total_premium();
        if premium < Self::PREMIUM_FLOOR || premium > self.premium_ceiling {
            return Classification::out_of_appetite(IneligibilityReason::PremiumOutsideBounds {
                premium,
                floor: Self::PREMIUM_FLOOR,
                ceiling: self.premium_ceiling,
            });
        }

        let year = record.oldest_building().unwrap_or(0);
        if year < Self::MIN_BUILD_YEAR {
            return Classification::out_of_appetite(IneligibilityReason::BuildingTooOld {
                year,
                minimum: Self::MIN_BUILD_YEAR,
            });
        }

        let loss = record.loss_value().unwrap_or(0.0);
        if loss > Self::MAX_LOSS_VALUE {
            return Classification::out_of_appetite(IneligibilityReason::ExcessiveLossValue {
                loss,
                maximum: Self::MAX_LOSS_VALUE,
            });
        }

        let construction = record.construction_type();
        if !matches_preferred_construction(construction) {
            return Classification::out_of_appetite(
                IneligibilityReason::ConstructionNotPreferred {
                    construction: construction.to_string(),
                },
            );
        }

        Classification::in_appetite()
    }
}
