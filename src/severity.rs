//! Severity and Risk Levels
//!
//! Closed enumerations for alert severity and prediction risk, each mapped
//! through a lookup table to its display attributes. Unknown strings are a
//! parse error rather than a silent grey default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised when parsing a closed enumeration from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown severity: {0:?}")]
    UnknownSeverity(String),

    #[error("Unknown risk level: {0:?}")]
    UnknownRiskLevel(String),

    #[error("Unknown route: {0:?}")]
    UnknownRoute(String),
}

/// Display attributes for a severity or risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStyle {
    /// Human label ("Critical")
    pub label: &'static str,
    /// Badge classes (background, text, border)
    pub badge: &'static str,
    /// Icon foreground class
    pub icon: &'static str,
    /// Icon container background class
    pub icon_bg: &'static str,
    /// Solid bar/fill class used by meters
    pub fill: &'static str,
}

// ============ Severity ============

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

const SEVERITY_STYLES: [DisplayStyle; 4] = [
    DisplayStyle {
        label: "Low",
        badge: "bg-green-100 text-green-800 border-green-200",
        icon: "text-green-600",
        icon_bg: "bg-green-100",
        fill: "bg-green-500",
    },
    DisplayStyle {
        label: "Medium",
        badge: "bg-yellow-100 text-yellow-800 border-yellow-200",
        icon: "text-yellow-600",
        icon_bg: "bg-yellow-100",
        fill: "bg-yellow-500",
    },
    DisplayStyle {
        label: "High",
        badge: "bg-orange-100 text-orange-800 border-orange-200",
        icon: "text-orange-600",
        icon_bg: "bg-orange-100",
        fill: "bg-orange-500",
    },
    DisplayStyle {
        label: "Critical",
        badge: "bg-red-100 text-red-800 border-red-200",
        icon: "text-red-600",
        icon_bg: "bg-red-100",
        fill: "bg-red-500",
    },
];

impl Severity {
    /// All severities, lowest first. Drives the filter dropdown.
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Display attributes for this severity
    pub fn style(self) -> &'static DisplayStyle {
        &SEVERITY_STYLES[self as usize]
    }

    /// Canonical label, also the filter value
    pub fn as_str(self) -> &'static str {
        self.style().label
    }
}

impl FromStr for Severity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" | "moderate" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ParseError::UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Risk Level ============

/// Risk level attached to predictions and conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

const RISK_STYLES: [DisplayStyle; 3] = [
    DisplayStyle {
        label: "Low",
        badge: "text-green-600 bg-green-100 border-green-200",
        icon: "text-green-600",
        icon_bg: "bg-green-100",
        fill: "bg-green-500",
    },
    DisplayStyle {
        label: "Medium",
        badge: "text-yellow-600 bg-yellow-100 border-yellow-200",
        icon: "text-yellow-600",
        icon_bg: "bg-yellow-100",
        fill: "bg-yellow-500",
    },
    DisplayStyle {
        label: "High",
        badge: "text-red-600 bg-red-100 border-red-200",
        icon: "text-red-600",
        icon_bg: "bg-red-100",
        fill: "bg-red-500",
    },
];

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Display attributes for this level
    pub fn style(self) -> &'static DisplayStyle {
        &RISK_STYLES[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.style().label
    }

    /// Band a 0-100 score for the risk meter: under 30 low, under 60 medium
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            RiskLevel::Low
        } else if score < 60.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Band a 0-100 score for the prediction result bar: 70+ high, 40+ medium
    pub fn for_score_bar(score: f64) -> Self {
        if score >= 70.0 {
            RiskLevel::High
        } else if score >= 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Meter caption ("Medium Risk")
    pub fn meter_caption(self) -> String {
        format!("{} Risk", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "moderate" => Ok(RiskLevel::Medium),
            "high" | "critical" => Ok(RiskLevel::High),
            _ => Err(ParseError::UnknownRiskLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for RiskLevel {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RiskLevel> for String {
    fn from(value: RiskLevel) -> Self {
        value.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("Medium".parse::<Severity>().unwrap(), Severity::Medium);
        assert_eq!(" HIGH ".parse::<Severity>().unwrap(), Severity::High);
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let err = "catastrophic".parse::<Severity>().unwrap_err();
        assert_eq!(err, ParseError::UnknownSeverity("catastrophic".to_string()));

        let json = r#""purple""#;
        assert!(serde_json::from_str::<Severity>(json).is_err());
    }

    #[test]
    fn test_severity_style_table() {
        assert_eq!(Severity::Low.style().icon, "text-green-600");
        assert_eq!(Severity::Critical.style().icon_bg, "bg-red-100");
        for severity in Severity::ALL {
            assert_eq!(severity.style().label, severity.to_string());
        }
    }

    #[test]
    fn test_severity_serde() {
        let parsed: Severity = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(parsed, Severity::High);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""High""#);
    }

    #[test]
    fn test_risk_meter_banding() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::High);
        assert_eq!(RiskLevel::High.meter_caption(), "High Risk");
    }

    #[test]
    fn test_risk_bar_banding() {
        assert_eq!(RiskLevel::for_score_bar(25.0), RiskLevel::Low);
        assert_eq!(RiskLevel::for_score_bar(40.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_score_bar(70.0), RiskLevel::High);
    }

    #[test]
    fn test_risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), r#""medium""#);
        assert!(serde_json::from_str::<RiskLevel>(r#""severe""#).is_err());
    }

    #[test]
    fn test_critical_risk_folds_into_high() {
        assert_eq!("critical".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert_eq!(serde_json::from_str::<RiskLevel>(r#""Critical""#).unwrap(), RiskLevel::High);
    }
}
