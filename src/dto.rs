//! Request/Response DTOs
//!
//! Bodies sent to and received from the SympTrack backend, plus the lenient
//! decoders used for list and envelope responses.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::{GeoPoint, User};

// ============ Auth ============

/// Body for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/register`. The password confirmation never leaves
/// the form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// Response to login and register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

// ============ Predictions ============

/// Body for `POST /predictions/predict`
#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictionRequest {
    pub symptoms: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<String>,
    #[serde(rename = "medicalHistory", skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

// ============ Stories ============

/// Body for `POST /vlogs`
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewVlog {
    pub title: String,
    pub description: String,
    pub disease_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicines_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_visited: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Body for `POST /comments`. The author comes from the bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub vlog_id: String,
    pub comment_text: String,
}

// ============ Hospitals ============

/// Search radius used when none is configured, in miles
pub const DEFAULT_RADIUS_MILES: u32 = 10;

/// Query for `GET /hospitals`
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalQuery {
    pub origin: GeoPoint,
    pub radius_miles: u32,
    /// Empty means every specialty
    pub specialty: String,
}

impl Default for HospitalQuery {
    fn default() -> Self {
        Self {
            origin: GeoPoint::FALLBACK,
            radius_miles: DEFAULT_RADIUS_MILES,
            specialty: String::new(),
        }
    }
}

impl HospitalQuery {
    /// Query-string pairs, specialty omitted when empty
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("lat", self.origin.latitude.to_string()),
            ("lng", self.origin.longitude.to_string()),
            ("radius", self.radius_miles.to_string()),
        ];
        if !self.specialty.trim().is_empty() {
            pairs.push(("specialty", self.specialty.trim().to_string()));
        }
        pairs
    }
}

/// Query for `GET /hospitals/search`
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalSearch {
    pub text: String,
    pub origin: GeoPoint,
}

impl HospitalSearch {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.text.trim().to_string()),
            ("lat", self.origin.latitude.to_string()),
            ("lng", self.origin.longitude.to_string()),
        ]
    }
}

// ============ Decoding ============

/// Decode a list response that is either `{"<key>": [...]}` or a bare array.
///
/// Records that fail to decode (unknown severity, wrong types) are skipped
/// with a warning instead of failing the whole list.
pub fn decode_list<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>, serde_json::Error> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "expected array under {:?}, found {}",
                    key,
                    kind(&other)
                )))
            }
        },
        Value::Null => Vec::new(),
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected list response, found {}",
                kind(&other)
            )))
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(key, kept = records.len(), total, "Dropped records from list response");
    }

    Ok(records)
}

/// Decode an object that may be wrapped as `{"<key>": {...}}`
pub fn decode_envelope<T: DeserializeOwned>(body: Value, key: &str) -> Result<T, serde_json::Error> {
    match body {
        Value::Object(mut map) if map.get(key).map(Value::is_object).unwrap_or(false) => {
            let inner = map.remove(key).unwrap_or(Value::Null);
            serde_json::from_value(inner)
        }
        other => serde_json::from_value(other),
    }
}

/// Human message carried by an error body: `error`, then `message`, then `msg`
pub fn error_message(body: &Value) -> Option<String> {
    ["error", "message", "msg"].iter().find_map(|field| match body.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Object(inner)) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alert, Profile, Vlog};
    use serde_json::json;

    #[test]
    fn test_decode_list_envelope_and_bare() {
        let record = json!({"id": 1, "type": "Emergency", "severity": "High", "title": "Flood"});

        let wrapped: Vec<Alert> = decode_list(json!({"alerts": [record.clone()]}), "alerts").unwrap();
        let bare: Vec<Alert> = decode_list(json!([record]), "alerts").unwrap();

        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.len(), 1);
    }

    #[test]
    fn test_decode_list_skips_bad_records() {
        let body = json!({"alerts": [
            {"id": 1, "type": "Emergency", "severity": "High", "title": "ok"},
            {"id": 2, "type": "Emergency", "severity": "unheard-of", "title": "bad"}
        ]});

        let alerts: Vec<Alert> = decode_list(body, "alerts").unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "ok");
    }

    #[test]
    fn test_decode_list_keeps_records_with_null_text() {
        let body = json!({"vlogs": [
            {"id": 1, "title": "Asthma at night", "description": null, "disease": "Asthma",
             "author_name": "Kim", "likes": 2, "comments": 0, "video_url": null},
            {"id": 2, "title": "Back on my feet", "description": "Two weeks of rest", "disease": null,
             "author_name": null, "likes": 0, "comments": 1}
        ]});
        let vlogs: Vec<Vlog> = decode_list(body, "vlogs").unwrap();
        assert_eq!(vlogs.len(), 2);
        assert_eq!(vlogs[0].description, "");
        assert_eq!(vlogs[1].disease, "");
        assert_eq!(vlogs[1].author_name, "");

        let body = json!({"alerts": [
            {"id": 7, "type": null, "severity": "High", "title": "Heat advisory", "description": null}
        ]});
        let alerts: Vec<Alert> = decode_list(body, "alerts").unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, "");
        assert_eq!(alerts[0].description, "");
    }

    #[test]
    fn test_decode_list_missing_key_is_empty() {
        let alerts: Vec<Alert> = decode_list(json!({"message": "nothing"}), "alerts").unwrap();
        assert!(alerts.is_empty());
        assert!(decode_list::<Alert>(json!("nope"), "alerts").is_err());
    }

    #[test]
    fn test_decode_envelope() {
        let wrapped: Profile = decode_envelope(json!({"profile": {"name": "Ana", "email": "a@x.io"}}), "profile").unwrap();
        let bare: Profile = decode_envelope(json!({"name": "Ana", "email": "a@x.io"}), "profile").unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_error_message_precedence() {
        assert_eq!(error_message(&json!({"error": "Bad", "message": "Other"})).as_deref(), Some("Bad"));
        assert_eq!(error_message(&json!({"message": "Invalid credentials"})).as_deref(), Some("Invalid credentials"));
        assert_eq!(error_message(&json!({"error": {"code": "X", "message": "Nested"}})).as_deref(), Some("Nested"));
        assert_eq!(error_message(&json!({"msg": "Token has expired"})).as_deref(), Some("Token has expired"));
        assert_eq!(error_message(&json!({"message": "First", "msg": "Last"})).as_deref(), Some("First"));
        assert_eq!(error_message(&json!({})), None);
    }

    #[test]
    fn test_prediction_request_wire_names() {
        let body = serde_json::to_value(PredictionRequest {
            symptoms: "fever".into(),
            medical_history: Some("asthma".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"symptoms": "fever", "medicalHistory": "asthma"}));
    }

    #[test]
    fn test_hospital_query_pairs() {
        let query = HospitalQuery::default();
        let pairs = query.to_pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], ("radius", "10".to_string()));

        let query = HospitalQuery { specialty: "Cardiology".into(), ..HospitalQuery::default() };
        assert_eq!(query.to_pairs().last(), Some(&("specialty", "Cardiology".to_string())));
    }
}
