use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::de_text;

use crate::filter::Filterable;
use crate::severity::RiskLevel;

/// Score shown on the result bar when the backend omits one
pub const DEFAULT_RISK_SCORE: u32 = 25;

/// One candidate condition in a prediction result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    /// Percentage, 0-100
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub risk_level: RiskLevel,
}

/// Wire shape accepted from `/predictions/predict`, old and new
#[derive(Debug, Deserialize)]
struct RawPrediction {
    #[serde(default)]
    conditions: Vec<Condition>,
    #[serde(default)]
    predicted_disease: Option<String>,
    /// Fraction, 0-1
    #[serde(default)]
    confidence_score: Option<f64>,
    #[serde(default)]
    risk_score: Option<f64>,
    #[serde(default)]
    risk_level: Option<RiskLevel>,
    #[serde(default)]
    recommendations: Vec<String>,
}

/// Symptom prediction result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPrediction")]
pub struct Prediction {
    pub conditions: Vec<Condition>,
    pub risk_score: Option<u32>,
    pub risk_level: Option<RiskLevel>,
    pub recommendations: Vec<String>,
}

impl From<RawPrediction> for Prediction {
    fn from(raw: RawPrediction) -> Self {
        let mut conditions = raw.conditions;

        if conditions.is_empty() {
            if let Some(name) = raw.predicted_disease.filter(|n| !n.trim().is_empty()) {
                conditions.push(Condition {
                    name,
                    probability: (raw.confidence_score.unwrap_or(0.0) * 100.0).round(),
                    risk_level: raw.risk_level.unwrap_or_default(),
                });
            }
        }

        Prediction {
            conditions,
            risk_score: raw.risk_score.map(|s| s.clamp(0.0, 100.0).round() as u32),
            risk_level: raw.risk_level,
            recommendations: raw.recommendations,
        }
    }
}

impl Prediction {
    /// Score for the result bar
    pub fn display_risk_score(&self) -> u32 {
        self.risk_score.unwrap_or(DEFAULT_RISK_SCORE)
    }

    /// Bar colour band for the displayed score
    pub fn score_band(&self) -> RiskLevel {
        RiskLevel::for_score_bar(f64::from(self.display_risk_score()))
    }

    /// Overall level, derived from the score when the backend omitted it
    pub fn overall_level(&self) -> RiskLevel {
        self.risk_level
            .unwrap_or_else(|| RiskLevel::from_score(f64::from(self.display_risk_score())))
    }
}

/// Past prediction (`/predictions/history`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionHistoryEntry {
    #[serde(default, deserialize_with = "de_text")]
    pub symptoms: String,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Filterable for PredictionHistoryEntry {
    const SEARCH_FIELDS: &'static [&'static str] = &["symptoms"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "symptoms" => Some(Cow::Borrowed(self.symptoms.as_str())),
            "risk_level" => self.risk_level.map(|l| Cow::Borrowed(l.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_condition_shape() {
        let p: Prediction = serde_json::from_str(
            r#"{
                "conditions": [
                    {"name": "Common Cold/Flu", "probability": 75, "risk_level": "low"},
                    {"name": "Migraine", "probability": 70, "risk_level": "medium"}
                ],
                "risk_score": 40,
                "risk_level": "medium",
                "recommendations": ["Get adequate rest"]
            }"#,
        )
        .unwrap();

        assert_eq!(p.conditions.len(), 2);
        assert_eq!(p.conditions[1].risk_level, RiskLevel::Medium);
        assert_eq!(p.display_risk_score(), 40);
        assert_eq!(p.score_band(), RiskLevel::Medium);
    }

    #[test]
    fn test_legacy_single_condition_normalized() {
        let p: Prediction = serde_json::from_str(
            r#"{"predicted_disease": "Common Cold", "confidence_score": 0.75, "risk_level": "low",
                "recommendations": ["Rest"]}"#,
        )
        .unwrap();

        assert_eq!(p.conditions.len(), 1);
        assert_eq!(p.conditions[0].name, "Common Cold");
        assert_eq!(p.conditions[0].probability, 75.0);
        assert_eq!(p.risk_score, None);
        assert_eq!(p.display_risk_score(), DEFAULT_RISK_SCORE);
        assert_eq!(p.score_band(), RiskLevel::Low);
    }

    #[test]
    fn test_overall_level_falls_back_to_score() {
        let p: Prediction = serde_json::from_str(r#"{"risk_score": 75}"#).unwrap();
        assert_eq!(p.overall_level(), RiskLevel::High);
        assert!(p.conditions.is_empty());
    }

    #[test]
    fn test_unknown_risk_level_rejected() {
        let json = r#"{"conditions": [{"name": "X", "probability": 10, "risk_level": "extreme"}]}"#;
        assert!(serde_json::from_str::<Prediction>(json).is_err());
    }

    #[test]
    fn test_history_entry_null_symptoms_and_critical_level() {
        let entry: PredictionHistoryEntry = serde_json::from_str(
            r#"{"symptoms": null, "risk_score": 85, "risk_level": "critical"}"#,
        )
        .unwrap();
        assert_eq!(entry.symptoms, "");
        assert_eq!(entry.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn test_history_entry() {
        let entry: PredictionHistoryEntry = serde_json::from_str(
            r#"{"symptoms": "fever, cough", "risk_score": 30, "risk_level": "low", "created_at": null}"#,
        )
        .unwrap();
        assert_eq!(entry.risk_level, Some(RiskLevel::Low));
        assert!(entry.created_at.is_none());
    }
}
