//! Filter engine
//!
//! Linear scan over the source collection; order-preserving.

use std::borrow::Cow;
use std::cmp;

use super::spec::FilterSpec;

/// A record that exposes named text fields to the filter engine
pub trait Filterable {
    /// Fields consulted by the free-text search slot
    const SEARCH_FIELDS: &'static [&'static str];

    /// Text value of a named field, `None` when the record lacks it
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Optional ordering applied after filtering
pub type Ordering<T> = fn(&T, &T) -> cmp::Ordering;

/// Derive the visible subset of `source` under `spec`.
///
/// Pure and idempotent: the same inputs always produce the same output and
/// `source` is only read.
pub fn derive<T>(source: &[T], spec: &FilterSpec, order: Option<Ordering<T>>) -> Vec<T>
where
    T: Filterable + Clone,
{
    let mut visible: Vec<T> = if spec.is_empty() {
        source.to_vec()
    } else {
        source.iter().filter(|record| spec.matches(*record)).cloned().collect()
    };

    if let Some(order) = order {
        // Stable: ties keep their source order
        visible.sort_by(order);
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        kind: Option<&'static str>,
        level: &'static str,
        note: &'static str,
    }

    impl Filterable for Row {
        const SEARCH_FIELDS: &'static [&'static str] = &["note", "kind"];

        fn field(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "kind" => self.kind.map(Cow::Borrowed),
                "level" => Some(Cow::Borrowed(self.level)),
                "note" => Some(Cow::Borrowed(self.note)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, kind: Some("Outbreak"), level: "High", note: "Flu cases rising" },
            Row { id: 2, kind: None, level: "Low", note: "Water advisory lifted" },
            Row { id: 3, kind: Some("Outbreak"), level: "Low", note: "Measles" },
            Row { id: 4, kind: Some("Weather"), level: "High", note: "Cold snap, flu risk" },
        ]
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_spec_returns_source_unchanged() {
        let source = rows();
        let visible = derive(&source, &FilterSpec::new(), None);
        assert_eq!(visible, source);
    }

    #[test]
    fn test_records_missing_field_kept_when_unfiltered() {
        let source = rows();
        let spec = FilterSpec::new().with("level", "low");
        assert_eq!(ids(&derive(&source, &spec, None)), vec![2, 3]);
    }

    #[test]
    fn test_records_missing_field_excluded_when_filtered() {
        let source = rows();
        let spec = FilterSpec::new().with("kind", "outbreak");
        assert_eq!(ids(&derive(&source, &spec, None)), vec![1, 3]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let source = rows();
        let spec = FilterSpec::new().with("kind", "Outbreak").with("level", "High");
        assert_eq!(ids(&derive(&source, &spec, None)), vec![1]);
    }

    #[test]
    fn test_search_matches_any_search_field() {
        let source = rows();
        let spec = FilterSpec::new().search("FLU");
        assert_eq!(ids(&derive(&source, &spec, None)), vec![1, 4]);

        let spec = FilterSpec::new().search("weather");
        assert_eq!(ids(&derive(&source, &spec, None)), vec![4]);
    }

    #[test]
    fn test_idempotent() {
        let source = rows();
        let spec = FilterSpec::new().with("level", "High").search("flu");
        let once = derive(&source, &spec, None);
        let twice = derive(&once, &spec, None);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_relaxed_spec_yields_superset() {
        let source = rows();
        let strict = FilterSpec::new().with("kind", "Outbreak").with("level", "Low");

        for slot in ["kind", "level"] {
            let relaxed = strict.relaxed(slot);
            let narrow = derive(&source, &strict, None);
            let wide = derive(&source, &relaxed, None);
            assert!(narrow.iter().all(|r| wide.contains(r)), "relaxing {} lost rows", slot);
        }
    }

    #[test]
    fn test_source_not_mutated() {
        let source = rows();
        let before = source.clone();
        let reverse: Ordering<Row> = |a, b| b.id.cmp(&a.id);
        let _ = derive(&source, &FilterSpec::new().with("level", "High"), Some(reverse));
        assert_eq!(source, before);
    }

    #[test]
    fn test_ordering_is_stable_and_keeps_membership() {
        let source = rows();
        let by_level: Ordering<Row> = |a, b| a.level.cmp(b.level);
        let visible = derive(&source, &FilterSpec::new(), Some(by_level));
        assert_eq!(ids(&visible), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_empty_source() {
        let source: Vec<Row> = Vec::new();
        assert!(derive(&source, &FilterSpec::new().search("x"), None).is_empty());
    }
}
