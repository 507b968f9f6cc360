//! State Management
//!
//! Global UI state, the session context and per-screen list state.

pub mod global;
pub mod list;
pub mod session;

pub use global::{provide_global_state, GlobalState};
pub use list::ListScreen;
pub use session::{provide_session, use_session, Session};
