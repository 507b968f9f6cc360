use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::{de_id, de_text};
use crate::filter::Filterable;

/// Disease categories offered by the story filter and the create form
pub const DISEASES: [&str; 8] = [
    "COVID-19",
    "Flu",
    "Common Cold",
    "Diabetes",
    "Hypertension",
    "Asthma",
    "PCOS",
    "Anxiety",
];

/// Patient story
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vlog {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_text")]
    pub title: String,
    #[serde(default, deserialize_with = "de_text")]
    pub description: String,
    #[serde(default, alias = "disease_category", deserialize_with = "de_text")]
    pub disease: String,
    #[serde(default, alias = "username", deserialize_with = "de_text")]
    pub author_name: String,
    #[serde(default)]
    pub likes: u64,
    /// Comment count; the comments themselves are fetched lazily
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, alias = "medicines_used")]
    pub medicines: Option<String>,
    #[serde(default, alias = "hospital_visited")]
    pub hospitals: Option<String>,
    #[serde(default)]
    pub recovery_timeline: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Filterable for Vlog {
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description", "disease"];

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value = match name {
            "title" => &self.title,
            "description" => &self.description,
            "disease" => &self.disease,
            "author" => &self.author_name,
            _ => return None,
        };
        (!value.is_empty()).then(|| Cow::Borrowed(value.as_str()))
    }
}

/// Comment on a patient story
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, alias = "author_name", deserialize_with = "de_text")]
    pub username: String,
    #[serde(default, deserialize_with = "de_text")]
    pub comment_text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{derive, FilterSpec};

    #[test]
    fn test_vlog_backend_and_legacy_shapes() {
        let backend: Vlog = serde_json::from_str(
            r#"{"id": 4, "title": "Beating asthma", "disease": "Asthma", "author_name": "Kim",
                "likes": 12, "comments": 3, "medicines": "Albuterol", "video_url": null}"#,
        )
        .unwrap();
        let legacy: Vlog = serde_json::from_str(
            r#"{"id": "4", "title": "Beating asthma", "disease_category": "Asthma", "username": "Kim",
                "likes": 12, "comments": 3, "medicines_used": "Albuterol"}"#,
        )
        .unwrap();

        assert_eq!(backend, legacy);
        assert!(backend.video_url.is_none());
    }

    #[test]
    fn test_disease_filter_and_search() {
        let vlogs = vec![
            Vlog { id: "1".into(), title: "Living with PCOS".into(), disease: "PCOS".into(), ..Vlog::default() },
            Vlog { id: "2".into(), title: "Flu week".into(), description: "Fever and chills".into(), disease: "Flu".into(), ..Vlog::default() },
            Vlog { id: "3".into(), title: "Untagged".into(), ..Vlog::default() },
        ];

        let spec = FilterSpec::new().with("disease", "flu");
        assert_eq!(derive(&vlogs, &spec, None).len(), 1);

        let spec = FilterSpec::new().search("chills");
        assert_eq!(derive(&vlogs, &spec, None)[0].id, "2");

        assert_eq!(derive(&vlogs, &FilterSpec::new(), None).len(), 3);
    }

    #[test]
    fn test_comment_shape() {
        let comment: Comment = serde_json::from_str(
            r#"{"id": 1, "username": "John D.", "comment_text": "Thanks for sharing", "created_at": "2024-01-15T12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(comment.username, "John D.");
    }
}
