use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::{de_id, de_text};
use crate::filter::Filterable;
use crate::severity::Severity;

/// Alert categories offered by the type filter
pub const ALERT_TYPES: [&str; 5] = [
    "Disease Outbreak",
    "Environmental",
    "Hospital Updates",
    "Public Health",
    "Emergency",
];

/// Community health alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,

    #[serde(rename = "type", alias = "alert_type", default, deserialize_with = "de_text")]
    pub alert_type: String,

    pub severity: Severity,

    #[serde(default, deserialize_with = "de_text")]
    pub title: String,

    #[serde(default, deserialize_with = "de_text")]
    pub description: String,

    #[serde(default)]
    pub location: Option<String>,

    /// Miles from the user, when the backend computed it
    #[serde(default)]
    pub distance: Option<f64>,

    #[serde(default, alias = "timestamp")]
    pub created_at: Option<String>,

    #[serde(default)]
    pub affected_count: Option<u64>,

    #[serde(default)]
    pub source: Option<String>,
}

impl Filterable for Alert {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description", "location"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "type" => non_empty(&self.alert_type),
            "severity" => Some(Cow::Borrowed(self.severity.as_str())),
            "title" => non_empty(&self.title),
            "description" => non_empty(&self.description),
            "location" => self.location.as_deref().and_then(non_empty),
            "source" => self.source.as_deref().and_then(non_empty),
            _ => None,
        }
    }
}

fn non_empty(value: &str) -> Option<Cow<'_, str>> {
    if value.is_empty() {
        None
    } else {
        Some(Cow::Borrowed(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{derive, FilterSpec};

    fn alerts() -> Vec<Alert> {
        serde_json::from_str(
            r#"[
                {"id": 1, "type": "Disease Outbreak", "severity": "High", "title": "Flu surge",
                 "description": "Influenza cases up 40%", "location": "Brooklyn", "affected_count": 230,
                 "created_at": "2024-01-15T10:00:00"},
                {"id": 2, "alert_type": "Environmental", "severity": "Medium", "title": "Air quality",
                 "description": "Smoke advisory", "timestamp": "2024-01-15T08:00:00Z"},
                {"id": 3, "type": "Emergency", "severity": "critical", "title": "Water main break",
                 "description": "Boil water notice", "location": "Queens"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_alert_field_aliases() {
        let alerts = alerts();
        assert_eq!(alerts[1].alert_type, "Environmental");
        assert_eq!(alerts[1].created_at.as_deref(), Some("2024-01-15T08:00:00Z"));
        assert_eq!(alerts[2].severity, Severity::Critical);
        assert_eq!(alerts[0].affected_count, Some(230));
    }

    #[test]
    fn test_unknown_severity_fails_decode() {
        let json = r#"{"id": 1, "type": "Emergency", "severity": "apocalyptic", "title": "x"}"#;
        assert!(serde_json::from_str::<Alert>(json).is_err());
    }

    #[test]
    fn test_filter_by_type_and_severity() {
        let alerts = alerts();

        let spec = FilterSpec::new().with("type", "environmental");
        let visible = derive(&alerts, &spec, None);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "2");

        let spec = FilterSpec::new().with("severity", "Critical");
        let visible = derive(&alerts, &spec, None);
        assert_eq!(visible[0].title, "Water main break");
    }

    #[test]
    fn test_location_filter_excludes_alerts_without_location() {
        let alerts = alerts();
        let spec = FilterSpec::new().with("location", "Brooklyn");
        assert_eq!(derive(&alerts, &spec, None).len(), 1);

        let visible = derive(&alerts, &FilterSpec::new(), None);
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn test_search_over_title_and_description() {
        let alerts = alerts();
        let spec = FilterSpec::new().search("smoke");
        assert_eq!(derive(&alerts, &spec, None)[0].id, "2");
    }
}
