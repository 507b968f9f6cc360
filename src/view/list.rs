//! List View State
//!
//! Owns the fetched source collection, the filter specification and the
//! derived visible subset. Every mutation of source or filters recomputes
//! the visible subset before returning.

use std::fmt::Display;

use tracing::{debug, warn};

use super::sequence::{RequestSequencer, Ticket};
use crate::filter::{derive, FilterSpec, Filterable, Ordering};

/// Which branch a list screen renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// No fetch has completed yet
    Loading,
    /// Source fetched but nothing survives the filters
    NoResults,
    /// At least one visible record
    Items,
}

/// What happened to a fetch result handed to [`ListView::commit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Response replaced the source collection
    Applied,
    /// Response belonged to a superseded or cancelled ticket and was dropped
    Stale,
    /// Fetch failed; last-known source kept
    Failed,
}

/// Fetched collection plus its filtered projection
#[derive(Debug, Clone)]
pub struct ListView<T> {
    source: Vec<T>,
    filters: FilterSpec,
    order: Option<Ordering<T>>,
    visible: Vec<T>,
    loaded: bool,
}

impl<T: Filterable + Clone> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Filterable + Clone> ListView<T> {
    pub fn new() -> Self {
        Self {
            source: Vec::new(),
            filters: FilterSpec::new(),
            order: None,
            visible: Vec::new(),
            loaded: false,
        }
    }

    /// List view whose visible subset is sorted by `order`
    pub fn with_order(order: Ordering<T>) -> Self {
        Self {
            order: Some(order),
            ..Self::new()
        }
    }

    /// Replace the source wholesale
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
        self.loaded = true;
        self.recompute();
    }

    /// Set one predicate; empty value clears it
    pub fn set_filter(&mut self, field: &str, value: impl Into<String>) {
        self.filters.set(field, value);
        self.recompute();
    }

    pub fn set_search(&mut self, needle: impl Into<String>) {
        self.filters.set_search(needle);
        self.recompute();
    }

    /// Reset every predicate
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.recompute();
    }

    /// Replace the whole filter specification
    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
        self.recompute();
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn display_state(&self) -> DisplayState {
        if !self.loaded {
            DisplayState::Loading
        } else if self.visible.is_empty() {
            DisplayState::NoResults
        } else {
            DisplayState::Items
        }
    }

    /// Apply a fetch result if `ticket` is still current.
    ///
    /// A failed fetch marks the view loaded but keeps the last-known source;
    /// the error is logged and never surfaced to the renderer.
    pub fn commit<E: Display>(
        &mut self,
        sequencer: &RequestSequencer,
        ticket: Ticket,
        result: Result<Vec<T>, E>,
    ) -> CommitOutcome {
        if !sequencer.is_current(ticket) {
            debug!(ticket = ticket.id(), "Dropping stale list response");
            return CommitOutcome::Stale;
        }

        match result {
            Ok(records) => {
                self.set_source(records);
                CommitOutcome::Applied
            }
            Err(e) => {
                warn!(ticket = ticket.id(), error = %e, "List fetch failed, keeping last-known data");
                self.loaded = true;
                self.recompute();
                CommitOutcome::Failed
            }
        }
    }

    fn recompute(&mut self) {
        self.visible = derive(&self.source, &self.filters, self.order);
    }
}
