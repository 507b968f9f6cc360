//! Filter specification
//!
//! A mapping from field name to accepted value, plus one free-text search
//! slot. Setting a slot to the empty string removes it.

use std::collections::BTreeMap;

use super::engine::Filterable;

/// Slot name used for the free-text search predicate
pub const SEARCH_SLOT: &str = "search";

/// Set of active filter predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Exact (case-insensitive) matches keyed by field name
    fields: BTreeMap<String, String>,
    /// Free-text needle matched against the record's search fields
    search: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSpec::set`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Builder form of [`FilterSpec::set_search`]
    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.set_search(needle);
        self
    }

    /// Require `field` to equal `value`. An empty value clears the predicate.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();

        if field == SEARCH_SLOT {
            self.set_search(value);
            return;
        }

        if value.trim().is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, value.trim().to_string());
        }
    }

    /// Set the free-text needle. Whitespace-only clears it.
    pub fn set_search(&mut self, needle: impl Into<String>) {
        let needle = needle.into();
        let trimmed = needle.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Current value of a slot, empty when unset
    pub fn value(&self, field: &str) -> &str {
        if field == SEARCH_SLOT {
            return self.search.as_deref().unwrap_or("");
        }
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Reset every predicate to the "no filter" sentinel
    pub fn clear(&mut self) {
        self.fields.clear();
        self.search = None;
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.search.is_none()
    }

    /// Number of active predicates
    pub fn active_count(&self) -> usize {
        self.fields.len() + usize::from(self.search.is_some())
    }

    /// Copy of this spec with one slot removed
    pub fn relaxed(&self, field: &str) -> Self {
        let mut relaxed = self.clone();
        relaxed.set(field, "");
        relaxed
    }

    /// True when every active predicate of `self` is also active, with the
    /// same value, in `other`. Filtering by `self` then yields a superset of
    /// filtering by `other`.
    pub fn is_relaxation_of(&self, other: &FilterSpec) -> bool {
        let fields_contained = self
            .fields
            .iter()
            .all(|(field, value)| other.fields.get(field) == Some(value));

        let search_contained = match (&self.search, &other.search) {
            (None, _) => true,
            (Some(a), Some(b)) => a == b,
            (Some(_), None) => false,
        };

        fields_contained && search_contained
    }

    /// Whether a record satisfies every active predicate
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        let fields_match = self.fields.iter().all(|(field, expected)| {
            record
                .field(field)
                .map(|actual| actual.trim().eq_ignore_ascii_case(expected))
                .unwrap_or(false)
        });

        if !fields_match {
            return false;
        }

        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                T::SEARCH_FIELDS.iter().any(|field| {
                    record
                        .field(field)
                        .map(|value| value.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            }
        }
    }

    /// Iterate active (field, value) pairs, search slot last
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(self.search.as_deref().map(|s| (SEARCH_SLOT, s)))
    }
}
