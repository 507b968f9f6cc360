//! Client-side Filtering
//!
//! Derives the visible subset of a fetched collection from a set of
//! user-chosen predicates.
//!
//! ## Rules
//!
//! - An empty value for a field means "match all" for that field
//! - Non-empty predicates combine with logical AND
//! - Output preserves the source order; an optional ordering is applied
//!   afterwards and never changes membership
//! - Derivation is pure: the source collection is never touched
//!
//! ## Example
//!
//! ```rust
//! use symptrack::filter::{derive, FilterSpec};
//! use symptrack::models::Alert;
//!
//! let alerts: Vec<Alert> = Vec::new();
//! let spec = FilterSpec::new().with("severity", "High").search("flu");
//! let visible = derive(&alerts, &spec, None);
//! assert!(visible.is_empty());
//! ```

mod engine;
mod spec;

pub use engine::{derive, Filterable, Ordering};
pub use spec::{FilterSpec, SEARCH_SLOT};
