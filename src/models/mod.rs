//! Domain Records
//!
//! Records returned by the SympTrack backend. Every record is created by a
//! fetch, never mutated, and replaced wholesale by the next fetch. Optional
//! fields default and unknown fields are ignored so older and newer backend
//! shapes decode to the same types.

mod alert;
mod dashboard;
mod hospital;
mod prediction;
mod user;
mod vlog;

pub use alert::{Alert, ALERT_TYPES};
pub use dashboard::{CategoryRisk, DashboardSummary, LongRangePrediction, RiskAnalysis, RiskTrendPoint, TrendPoint};
pub use hospital::{by_rating_then_distance, GeoPoint, Hospital, SPECIALTIES};
pub use prediction::{Condition, Prediction, PredictionHistoryEntry, DEFAULT_RISK_SCORE};
pub use user::{HealthStats, Profile, User};
pub use vlog::{Comment, Vlog, DISEASES};

use serde::{Deserialize, Deserializer};

/// Text column that the backend may send as null
pub(crate) fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a string, a number or null for id-like fields
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
