//! Collection Sources
//!
//! Every list screen is a [`CollectionSource`] feeding a [`ListController`].
//! The controller owns the screen's request sequencer, so a slow response
//! that arrives after a newer one is dropped, and nothing is applied after
//! the controller is cancelled.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::client::ApiClient;
use super::error::ApiResult;
use crate::dto::{HospitalQuery, HospitalSearch};
use crate::filter::{FilterSpec, Filterable};
use crate::models::{by_rating_then_distance, Alert, Hospital, PredictionHistoryEntry, Vlog};
use crate::view::{CommitOutcome, DisplayState, ListView, RequestSequencer};

/// A fetchable collection backing one list screen
#[async_trait]
pub trait CollectionSource: Send + Sync {
    type Record: Filterable + Clone + Send + Sync;

    /// Short name for logs
    fn name(&self) -> &str;

    /// Fetch the whole collection
    async fn fetch(&self) -> ApiResult<Vec<Self::Record>>;

    /// Fresh list view for this collection, with its display ordering
    fn view(&self) -> ListView<Self::Record> {
        ListView::new()
    }
}

/// Community alerts
pub struct AlertFeed {
    client: ApiClient,
}

impl AlertFeed {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionSource for AlertFeed {
    type Record = Alert;

    fn name(&self) -> &str {
        "alerts"
    }

    async fn fetch(&self) -> ApiResult<Vec<Alert>> {
        self.client.alerts().await
    }
}

/// Patient stories
pub struct VlogFeed {
    client: ApiClient,
}

impl VlogFeed {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionSource for VlogFeed {
    type Record = Vlog;

    fn name(&self) -> &str {
        "vlogs"
    }

    async fn fetch(&self) -> ApiResult<Vec<Vlog>> {
        self.client.vlogs().await
    }
}

/// Hospitals near an origin; radius and specialty are server-side filters
pub struct HospitalFeed {
    client: ApiClient,
    query: HospitalQuery,
}

impl HospitalFeed {
    pub fn new(client: ApiClient, query: HospitalQuery) -> Self {
        Self { client, query }
    }
}

#[async_trait]
impl CollectionSource for HospitalFeed {
    type Record = Hospital;

    fn name(&self) -> &str {
        "hospitals"
    }

    async fn fetch(&self) -> ApiResult<Vec<Hospital>> {
        self.client.hospitals(&self.query).await
    }

    fn view(&self) -> ListView<Hospital> {
        ListView::<Hospital>::with_order(by_rating_then_distance)
    }
}

/// Free-text hospital search
pub struct HospitalSearchFeed {
    client: ApiClient,
    search: HospitalSearch,
}

impl HospitalSearchFeed {
    pub fn new(client: ApiClient, search: HospitalSearch) -> Self {
        Self { client, search }
    }
}

#[async_trait]
impl CollectionSource for HospitalSearchFeed {
    type Record = Hospital;

    fn name(&self) -> &str {
        "hospital-search"
    }

    async fn fetch(&self) -> ApiResult<Vec<Hospital>> {
        self.client.search_hospitals(&self.search).await
    }

    fn view(&self) -> ListView<Hospital> {
        ListView::<Hospital>::with_order(by_rating_then_distance)
    }
}

/// Past predictions, newest first as sent
pub struct HistoryFeed {
    client: ApiClient,
}

impl HistoryFeed {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionSource for HistoryFeed {
    type Record = PredictionHistoryEntry;

    fn name(&self) -> &str {
        "prediction-history"
    }

    async fn fetch(&self) -> ApiResult<Vec<PredictionHistoryEntry>> {
        self.client.prediction_history().await
    }
}

/// One list screen: source, sequencer and view state
pub struct ListController<S: CollectionSource> {
    source: S,
    sequencer: RequestSequencer,
    view: RwLock<ListView<S::Record>>,
}

impl<S: CollectionSource> ListController<S> {
    pub fn new(source: S) -> Self {
        let view = source.view();
        Self {
            source,
            sequencer: RequestSequencer::new(),
            view: RwLock::new(view),
        }
    }

    /// Start with a filter already applied
    pub fn with_filters(source: S, filters: FilterSpec) -> Self {
        let mut view = source.view();
        view.set_filters(filters);
        Self {
            source,
            sequencer: RequestSequencer::new(),
            view: RwLock::new(view),
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Fetch and, if still current, replace the source collection
    pub async fn refresh(&self) -> CommitOutcome {
        let ticket = self.sequencer.begin();
        debug!(source = self.source.name(), ticket = ticket.id(), "Fetching");

        let result = self.source.fetch().await;
        let outcome = self.view.write().await.commit(&self.sequencer, ticket, result);

        debug!(source = self.source.name(), ticket = ticket.id(), ?outcome, "Fetch settled");
        outcome
    }

    pub async fn set_filter(&self, field: &str, value: &str) {
        self.view.write().await.set_filter(field, value);
    }

    pub async fn set_search(&self, needle: &str) {
        self.view.write().await.set_search(needle);
    }

    pub async fn clear_filters(&self) {
        self.view.write().await.clear_filters();
    }

    /// Copy of the visible subset
    pub async fn visible(&self) -> Vec<S::Record> {
        self.view.read().await.visible().to_vec()
    }

    pub async fn source_len(&self) -> usize {
        self.view.read().await.source().len()
    }

    pub async fn display_state(&self) -> DisplayState {
        self.view.read().await.display_state()
    }

    /// Tear down: outstanding fetches will not be applied
    pub fn cancel(&self) {
        self.sequencer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::severity::Severity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn alert(id: &str, severity: Severity) -> Alert {
        Alert {
            id: id.to_string(),
            alert_type: "Public Health".to_string(),
            severity,
            title: format!("Alert {}", id),
            description: String::new(),
            location: None,
            distance: None,
            created_at: None,
            affected_count: None,
            source: None,
        }
    }

    /// First call is slow and returns "old"; later calls are fast
    struct RacingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CollectionSource for RacingSource {
        type Record = Alert;

        fn name(&self) -> &str {
            "racing"
        }

        async fn fetch(&self) -> ApiResult<Vec<Alert>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(vec![alert("old", Severity::Low)])
            } else {
                Ok(vec![alert("new", Severity::High), alert("new-2", Severity::Low)])
            }
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CollectionSource for FailingSource {
        type Record = Alert;

        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self) -> ApiResult<Vec<Alert>> {
            Err(ApiError::Timeout)
        }
    }

    #[tokio::test]
    async fn test_stale_response_dropped() {
        let controller = ListController::new(RacingSource {
            calls: AtomicUsize::new(0),
        });

        let (slow, fast) = tokio::join!(controller.refresh(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.refresh().await
        });

        assert_eq!(fast, CommitOutcome::Applied);
        assert_eq!(slow, CommitOutcome::Stale);

        let ids: Vec<_> = controller.visible().await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["new", "new-2"]);
    }

    #[tokio::test]
    async fn test_cancel_blocks_late_response() {
        let controller = ListController::new(RacingSource {
            calls: AtomicUsize::new(0),
        });

        let (outcome, ()) = tokio::join!(controller.refresh(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.cancel();
        });

        assert_eq!(outcome, CommitOutcome::Stale);
        assert_eq!(controller.display_state().await, DisplayState::Loading);
    }

    #[tokio::test]
    async fn test_filters_survive_refresh() {
        let controller = ListController::with_filters(
            RacingSource {
                calls: AtomicUsize::new(1),
            },
            FilterSpec::new().with("severity", "High"),
        );

        controller.refresh().await;
        assert_eq!(controller.visible().await.len(), 1);
        assert_eq!(controller.source_len().await, 2);

        controller.clear_filters().await;
        assert_eq!(controller.visible().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_empty() {
        let controller = ListController::new(FailingSource);
        assert_eq!(controller.refresh().await, CommitOutcome::Failed);
        assert_eq!(controller.display_state().await, DisplayState::NoResults);
    }
}
