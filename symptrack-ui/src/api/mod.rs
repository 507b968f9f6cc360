//! Backend Access
//!
//! HTTP client for the SympTrack REST API and the browser-side credential
//! store it reads the bearer token from.

pub mod client;
pub mod storage;

pub use client::*;
pub use storage::{get_api_base, set_api_base, LocalCredentialStore, DEFAULT_API_BASE};
