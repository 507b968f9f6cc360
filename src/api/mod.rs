//! SympTrack REST Client
//!
//! Native client for the SympTrack backend, built on reqwest. Every request
//! carries the stored bearer token; any 401 clears it and sends the
//! application back to the login screen.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/login` - Email and password login
//! - `POST /auth/register` - Create an account
//! - `GET /auth/profile` - Current user (session resume)
//!
//! ## Profile
//! - `GET /user/profile` - Full profile
//! - `PUT /user/profile` - Update profile
//! - `GET /user/health-stats` - Activity counters
//!
//! ## Predictions
//! - `POST /predictions/predict` - Analyze symptoms
//! - `GET /predictions/history` - Past predictions
//!
//! ## Dashboard
//! - `GET /dashboard` - Summary
//! - `GET /dashboard-stats` - Risk analysis
//!
//! ## Community
//! - `GET /alerts` - Community alerts
//! - `GET /vlogs` - Patient stories
//! - `POST /vlogs` - Share a story
//! - `POST /vlogs/:id/like` - Like a story
//! - `GET /comments/:vlog_id` - Comments on a story
//! - `POST /comments` - Add a comment
//!
//! ## Hospitals
//! - `GET /hospitals?lat&lng&radius[&specialty]` - Nearby hospitals
//! - `GET /hospitals/search?q&lat&lng` - Free-text search
//!
//! # Example
//!
//! ```rust,no_run
//! use symptrack::api::{AlertFeed, ApiClient, ClientConfig, ListController};
//! use symptrack::session::MemoryCredentialStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ClientConfig::default(), Arc::new(MemoryCredentialStore::new()))?;
//! let alerts = ListController::new(AlertFeed::new(client));
//!
//! alerts.refresh().await;
//! alerts.set_filter("severity", "High").await;
//! println!("{} high-severity alerts", alerts.visible().await.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod credentials;
mod error;
mod session;
mod sources;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{ApiClient, ClientConfig, LogUnauthorized, UnauthorizedHandler, REQUEST_ID_HEADER};
pub use credentials::FileCredentialStore;
pub use error::{ApiError, ApiResult};
pub use session::SessionManager;
pub use sources::{
    AlertFeed, CollectionSource, HistoryFeed, HospitalFeed, HospitalSearchFeed, ListController,
    VlogFeed,
};
