use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::eligibility::IneligibilityReason;
use super::enrichment::Reference;

/// Identifier wrapper for policy submissions. Upstream extracts emit
/// ids as JSON numbers or strings depending on the source system, so
/// both deserialize into the same key type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPolicyId")]
pub struct PolicyId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPolicyId {
    Number(i64),
    Text(String),
}

impl From<RawPolicyId> for PolicyId {
    fn from(value: RawPolicyId) -> Self {
        match value {
            RawPolicyId::Number(n) => PolicyId(n.to_string()),
            RawPolicyId::Text(s) => PolicyId(s),
        }
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One underwriting submission as supplied by the record source.
///
/// Every field is optional at the wire level; accessors encode the
/// documented defaults so filter and scorer code never branches on
/// presence itself. Unknown fields are preserved through `extra` so
/// the annotated output carries whatever the source sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PolicyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_of_business: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_or_new_business: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_risk_state: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_flexible_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub tiv: Option<f64>,
    #[serde(
        default,
        deserialize_with = "de_flexible_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_premium: Option<f64>,
    /// Kept in its raw shape: an unparseable loss amount is a
    /// different condition than a missing one (see [`Self::loss_value`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_value: Option<LossField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_flexible_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub oldest_building: Option<i32>,
    #[serde(
        default,
        deserialize_with = "de_flexible_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub winnability: Option<f64>,
    #[serde(
        default,
        deserialize_with = "de_flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "de_flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolicyRecord {
    /// Grouping key for account rollups. Exact string match; records
    /// without a name share the `<unassigned>` bucket.
    pub fn account_name(&self) -> &str {
        self.account_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("<unassigned>")
    }

    pub fn is_commercial_property(&self) -> bool {
        self.line_of_business
            .as_deref()
            .map(|lob| lob.trim().eq_ignore_ascii_case("COMMERCIAL PROPERTY"))
            .unwrap_or(false)
    }

    pub fn is_new_business(&self) -> bool {
        self.renewal_or_new_business
            .as_deref()
            .map(|kind| kind.trim().eq_ignore_ascii_case("NEW_BUSINESS"))
            .unwrap_or(false)
    }

    pub fn state(&self) -> Option<&str> {
        self.primary_risk_state
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty())
    }

    /// Total insured value; absent or malformed reads as zero.
    pub fn tiv(&self) -> f64 {
        self.tiv.unwrap_or(0.0)
    }

    /// Total premium; absent or malformed reads as zero.
    pub fn total_premium(&self) -> f64 {
        self.total_premium.unwrap_or(0.0)
    }

    /// Incurred loss amount. `Some(0.0)` when absent, `None` when the
    /// source sent text that does not parse as an amount. Callers
    /// computing a loss ratio substitute the documented 1.0 fallback
    /// for the `None` case.
    pub fn loss_value(&self) -> Option<f64> {
        match &self.loss_value {
            None => Some(0.0),
            Some(LossField::Amount(amount)) => Some(*amount),
            Some(LossField::Text(text)) => parse_amount_text(text),
        }
    }

    pub fn construction_type(&self) -> &str {
        self.construction_type.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn oldest_building(&self) -> Option<i32> {
        self.oldest_building
    }

    /// Raw winnability signal; sources mix 0-1 and 0-100 scales, so
    /// each scorer applies its own rescaling and default.
    pub fn winnability(&self) -> Option<f64> {
        self.winnability
    }

    pub fn has_policy_dates(&self) -> bool {
        self.effective_date.is_some() && self.expiration_date.is_some()
    }
}

/// Loss amount as received: a number, or text that may or may not
/// parse. Non-scalar shapes collapse to unparseable text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LossField {
    Amount(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for LossField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => match n.as_f64() {
                Some(amount) => LossField::Amount(amount),
                None => LossField::Text(n.to_string()),
            },
            Value::String(text) => LossField::Text(text),
            other => LossField::Text(other.to_string()),
        })
    }
}

/// A record annotated by the pipeline: the original submission plus
/// every derived field. Serializes flat, so the account graph written
/// by the sink mirrors the incoming record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPolicy {
    #[serde(flatten)]
    pub record: PolicyRecord,
    pub appetite_score: f64,
    pub risk_score: f64,
    pub eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
    /// Relevance supplied by the external reranking collaborator;
    /// never computed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    /// Blend of the policy's relevance and its account's weighted
    /// average, filled during aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub justification_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

fn de_flexible_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number))
}

fn de_flexible_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(coerce_number)
        .map(|year| year as i32))
}

fn de_flexible_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(text) => parse_date_text(&text),
        _ => None,
    }))
}

pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => parse_amount_text(text),
        _ => None,
    }
}

fn parse_amount_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok()
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            // Timestamp forms come through from some extracts; the
            // calendar date prefix is all the rules need.
            trimmed
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
