use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Alert, PredictionHistoryEntry};
use crate::severity::RiskLevel;

/// Aggregate returned by `/dashboard`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    pub risk_score: Option<u32>,
    pub prediction_count: u64,
    pub alerts_count: u64,
    pub recent_predictions: Vec<PredictionHistoryEntry>,
    pub health_trends: Vec<TrendPoint>,
    pub community_alerts: Vec<Alert>,
}

impl DashboardSummary {
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_score.map(|s| RiskLevel::from_score(f64::from(s)))
    }
}

/// One bar of the health trend chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPoint {
    #[serde(alias = "month", alias = "date")]
    pub label: String,
    #[serde(alias = "value")]
    pub score: f64,
}

/// Risk analysis returned by `/dashboard-stats`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAnalysis {
    pub current_risk_score: f64,
    pub risk_trend: Vec<RiskTrendPoint>,
    /// Factor name to contribution percentage
    pub risk_factors: BTreeMap<String, f64>,
    pub health_categories: Vec<CategoryRisk>,
    pub predictions: Vec<LongRangePrediction>,
}

impl RiskAnalysis {
    /// Meter band for the current score
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.current_risk_score)
    }

    /// Highest-risk category, if any
    pub fn top_category(&self) -> Option<&CategoryRisk> {
        self.health_categories
            .iter()
            .max_by(|a, b| a.risk.partial_cmp(&b.risk).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskTrendPoint {
    pub date: String,
    pub risk_score: f64,
    pub disease: Option<String>,
    pub lifestyle_factor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRisk {
    pub name: String,
    pub risk: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LongRangePrediction {
    pub condition: String,
    pub probability: f64,
    pub timeline: String,
}

impl LongRangePrediction {
    /// Badge band: over 30% high, over 15% medium
    pub fn band(&self) -> RiskLevel {
        if self.probability > 30.0 {
            RiskLevel::High
        } else if self.probability > 15.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}
