//! Session Context
//!
//! Route table, the session gate decision table, credential persistence and
//! the session lifecycle shared by the CLI and the browser frontend.

mod credentials;
mod gate;
mod route;
mod state;

pub use credentials::{CredentialError, CredentialStore, MemoryCredentialStore, TOKEN_KEY};
pub use gate::{gate, GateDecision, SessionStatus};
pub use route::{Access, Route};
pub use state::{ResumeStep, SessionState};
