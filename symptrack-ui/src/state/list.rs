//! List Screen State
//!
//! Reactive wrapper around a [`ListView`] plus the screen's request
//! sequencer. Fetches that settle after a newer one, or after the screen
//! unmounts, are dropped.

use leptos::*;
use std::future::Future;
use std::rc::Rc;

use symptrack::filter::Filterable;
use symptrack::view::{DisplayState, ListView, RequestSequencer};

use crate::api::ApiResult;

pub struct ListScreen<T: 'static> {
    pub view: RwSignal<ListView<T>>,
    sequencer: Rc<RequestSequencer>,
}

impl<T: 'static> Clone for ListScreen<T> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            sequencer: Rc::clone(&self.sequencer),
        }
    }
}

impl<T: Filterable + Clone + 'static> ListScreen<T> {
    /// Create inside a component; unmounting cancels outstanding fetches
    pub fn new(view: ListView<T>) -> Self {
        let sequencer = Rc::new(RequestSequencer::new());

        let on_unmount = Rc::clone(&sequencer);
        on_cleanup(move || on_unmount.cancel());

        Self {
            view: create_rw_signal(view),
            sequencer,
        }
    }

    /// Run a fetch and apply its result if it is still the latest
    pub fn load<Fut>(&self, fetch: Fut)
    where
        Fut: Future<Output = ApiResult<Vec<T>>> + 'static,
    {
        let ticket = self.sequencer.begin();
        let sequencer = Rc::clone(&self.sequencer);
        let view = self.view;

        spawn_local(async move {
            let result = fetch.await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch list: {}", e).into());
            }
            if sequencer.is_current(ticket) {
                view.try_update(|v| v.commit(&sequencer, ticket, result));
            }
        });
    }

    pub fn set_filter(&self, field: &'static str, value: String) {
        self.view.update(|v| v.set_filter(field, value));
    }

    pub fn set_search(&self, needle: String) {
        self.view.update(|v| v.set_search(needle));
    }

    pub fn clear_filters(&self) {
        self.view.update(|v| v.clear_filters());
    }

    pub fn filter_value(&self, field: &str) -> String {
        self.view.with(|v| v.filters().value(field).to_string())
    }

    pub fn active_filters(&self) -> usize {
        self.view.with(|v| v.filters().active_count())
    }

    pub fn visible(&self) -> Vec<T> {
        self.view.with(|v| v.visible().to_vec())
    }

    pub fn source_len(&self) -> usize {
        self.view.with(|v| v.source().len())
    }

    pub fn display_state(&self) -> DisplayState {
        self.view.with(|v| v.display_state())
    }
}
