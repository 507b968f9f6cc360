use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

use super::{de_id, de_text};
use crate::filter::Filterable;

/// Specialties offered by the hospital finder filter
pub const SPECIALTIES: [&str; 15] = [
    "Emergency",
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "Oncology",
    "Surgery",
    "Internal Medicine",
    "Family Medicine",
    "ICU",
    "Dermatology",
    "Psychiatry",
    "Radiology",
    "Pathology",
    "Anesthesiology",
];

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// New York City, used when the device location is unavailable
    pub const FALLBACK: GeoPoint = GeoPoint {
        latitude: 40.7128,
        longitude: -74.0060,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Hospital near the user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(default, deserialize_with = "de_id", alias = "place_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub address: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews_count: Option<u64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Comma-separated place types ("hospital, health, establishment")
    #[serde(default)]
    pub types: Option<String>,
    /// Miles from the search origin; computed server-side
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub opening_hours: Vec<String>,
}

impl Hospital {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Distance with a missing value treated as zero
    pub fn distance_or_zero(&self) -> f64 {
        self.distance.unwrap_or(0.0)
    }

    /// Up to `limit` individual place types
    pub fn type_tags(&self, limit: usize) -> Vec<&str> {
        self.types
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Any opening-hours line advertising round-the-clock service
    pub fn is_open_24h(&self) -> bool {
        self.opening_hours.iter().any(|h| h.contains("24 hours"))
    }

    /// Open now or round-the-clock, as advertised by the opening-hours lines
    pub fn appears_open(&self) -> bool {
        self.opening_hours
            .iter()
            .any(|h| h.contains("24 hours") || h.contains("Open"))
    }
}

/// Highest rating first; ties broken by nearest distance
pub fn by_rating_then_distance(a: &Hospital, b: &Hospital) -> Ordering {
    let rating_a = a.rating.unwrap_or(0.0);
    let rating_b = b.rating.unwrap_or(0.0);

    rating_b
        .partial_cmp(&rating_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.distance_or_zero()
                .partial_cmp(&b.distance_or_zero())
                .unwrap_or(Ordering::Equal)
        })
}

impl Filterable for Hospital {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "address", "types"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Borrowed(self.name.as_str())),
            "address" => Some(Cow::Borrowed(self.address.as_str())),
            "types" => self.types.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{derive, FilterSpec};

    fn hospital(id: &str, rating: Option<f64>, distance: Option<f64>) -> Hospital {
        Hospital {
            id: id.to_string(),
            name: format!("Hospital {}", id),
            rating,
            distance,
            ..Hospital::default()
        }
    }

    #[test]
    fn test_rating_then_distance_ordering() {
        let source = vec![
            hospital("far-good", Some(4.5), Some(9.0)),
            hospital("near-ok", Some(4.1), Some(1.0)),
            hospital("near-good", Some(4.5), Some(2.0)),
            hospital("unknown-distance", Some(4.5), None),
        ];

        let order: crate::filter::Ordering<Hospital> = by_rating_then_distance;
        let visible = derive(&source, &FilterSpec::new(), Some(order));
        let ids: Vec<_> = visible.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["unknown-distance", "near-good", "far-good", "near-ok"]);
    }

    #[test]
    fn test_search_matches_types() {
        let mut trauma = hospital("1", Some(4.0), None);
        trauma.types = Some("hospital, trauma center".to_string());
        let plain = hospital("2", Some(4.0), None);

        let visible = derive(&[trauma, plain], &FilterSpec::new().search("Trauma"), None);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[test]
    fn test_type_tags_and_hours() {
        let h = Hospital {
            types: Some("hospital, health, establishment, point_of_interest".to_string()),
            opening_hours: vec!["Monday: 24 hours".to_string()],
            ..Hospital::default()
        };
        assert_eq!(h.type_tags(3), vec!["hospital", "health", "establishment"]);
        assert!(h.is_open_24h());
        assert!(h.appears_open());
    }

    #[test]
    fn test_decode_with_missing_distance() {
        let h: Hospital = serde_json::from_str(
            r#"{"place_id": "abc", "name": "NYU Langone", "address": "550 1st Ave", "latitude": 40.74, "longitude": -73.97, "rating": 4.3}"#,
        )
        .unwrap();
        assert_eq!(h.id, "abc");
        assert_eq!(h.distance_or_zero(), 0.0);
    }

    #[test]
    fn test_fallback_location() {
        assert_eq!(GeoPoint::default(), GeoPoint::new(40.7128, -74.0060));
    }
}
