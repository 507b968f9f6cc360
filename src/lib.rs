//! # SympTrack
//!
//! Client core for the SympTrack health-tracking service: typed records,
//! client-side filtering, list-view synchronization, the session gate and,
//! with the default `client` feature, a native REST client and CLI.
//!
//! ## Features
//!
//! - **Filtering**: pure, order-preserving derivation of the visible subset
//! - **List views**: fetched source, filters and visible subset kept in step
//! - **Request sequencing**: stale or cancelled responses are never applied
//! - **Session gate**: route decision table over a tri-state session
//! - **REST client**: bearer token on every request, global 401 handling
//!
//! ## Modules
//!
//! - [`filter`]: filter specification and derivation
//! - [`view`]: list-view state and request sequencer
//! - [`session`]: routes, gate, credential store, session lifecycle
//! - [`models`]: alerts, stories, hospitals, predictions, dashboard
//! - [`api`]: REST client (feature `client`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use symptrack::api::{ApiClient, ClientConfig, SessionManager};
//! use symptrack::filter::FilterSpec;
//! use symptrack::forms::LoginForm;
//! use symptrack::session::MemoryCredentialStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryCredentialStore::new());
//!     let client = ApiClient::new(ClientConfig::default(), store)?;
//!     let session = SessionManager::new(client.clone());
//!
//!     session.init().await;
//!     session
//!         .login(&LoginForm {
//!             email: "me@example.com".into(),
//!             password: "secret".into(),
//!         })
//!         .await?;
//!
//!     let alerts = client.alerts().await?;
//!     let spec = FilterSpec::new().with("severity", "High");
//!     let visible = symptrack::filter::derive(&alerts, &spec, None);
//!
//!     println!("{} high-severity alerts", visible.len());
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod filter;
pub mod format;
pub mod forms;
pub mod models;
pub mod session;
pub mod severity;
pub mod view;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod config;

// Re-export top-level types for convenience
pub use filter::{derive, FilterSpec, Filterable};

pub use view::{CommitOutcome, DisplayState, ListView, RequestSequencer, Ticket};

pub use session::{
    gate, Access, CredentialError, CredentialStore, GateDecision, MemoryCredentialStore, Route,
    SessionState, SessionStatus,
};

pub use severity::{DisplayStyle, ParseError, RiskLevel, Severity};

pub use forms::ValidationError;

pub use models::{
    Alert, Comment, DashboardSummary, GeoPoint, HealthStats, Hospital, Prediction,
    PredictionHistoryEntry, Profile, RiskAnalysis, User, Vlog,
};

#[cfg(feature = "client")]
pub use api::{ApiClient, ApiError, ApiResult, ClientConfig, SessionManager, UnauthorizedHandler};

#[cfg(feature = "client")]
pub use config::{Config, ConfigError};
