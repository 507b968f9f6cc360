//! Session Gate
//!
//! Pure decision table: given the session status and the requested route,
//! decide whether to render, show a placeholder, or redirect.

use super::route::{Access, Route};
use crate::models::User;

/// Tri-state session status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Resume in progress; nothing is known yet
    #[default]
    Loading,
    Absent,
    Present(User),
}

impl SessionStatus {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionStatus::Present(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, SessionStatus::Present(_))
    }
}

/// What the router should do with a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Render,
    /// Session still resolving; show the loading placeholder
    Placeholder,
    Redirect(Route),
}

/// Decide what to show for `route` under `status`
pub fn gate(status: &SessionStatus, route: Route) -> GateDecision {
    match (status, route.access()) {
        (_, Access::Public) => GateDecision::Render,
        (SessionStatus::Loading, _) => GateDecision::Placeholder,
        (_, _) if route == Route::Root => GateDecision::Redirect(Route::AUTHENTICATED_ENTRY),
        (SessionStatus::Absent, Access::Protected) => GateDecision::Redirect(Route::PUBLIC_ENTRY),
        (SessionStatus::Present(_), Access::PublicOnly) => {
            GateDecision::Redirect(Route::AUTHENTICATED_ENTRY)
        }
        (SessionStatus::Absent, Access::PublicOnly) | (SessionStatus::Present(_), Access::Protected) => {
            GateDecision::Render
        }
    }
}
