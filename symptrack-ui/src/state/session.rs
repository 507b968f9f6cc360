//! Session Context
//!
//! One [`SessionState`] per running app, provided at the root. On start a
//! persisted token is resumed by fetching the current user.

use leptos::*;

use symptrack::dto::AuthResponse;
use symptrack::models::User;
use symptrack::session::{ResumeStep, SessionState, SessionStatus};

use crate::api::{self, LocalCredentialStore};

/// Handle to the app-wide session
#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<SessionState>,
}

impl Session {
    /// Reactive read of the tri-state status
    pub fn status(&self) -> SessionStatus {
        self.state.with(|s| s.status().clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    /// Login or register succeeded: persist the token and become present
    pub fn signed_in(&self, response: AuthResponse) -> Result<(), String> {
        let mut result = Ok(());
        self.state.update(|s| {
            result = s
                .signed_in(&LocalCredentialStore, response.token, response.user)
                .map_err(|e| e.to_string());
        });
        result
    }

    /// Profile edited; keep the shown identity in step
    pub fn refresh_user(&self, user: User) {
        self.state.update(|s| s.refresh_user(user));
    }

    pub fn sign_out(&self) {
        self.state.update(|s| s.signed_out(&LocalCredentialStore));
    }
}

/// Provide the session and start resolving it
pub fn provide_session() {
    let state = create_rw_signal(SessionState::new());
    provide_context(Session { state });

    let mut step = ResumeStep::NoCredential;
    state.update(|s| step = s.begin_resume(&LocalCredentialStore));

    if let ResumeStep::Resume(_) = step {
        spawn_local(async move {
            match api::current_user().await {
                Ok(user) => state.update(|s| s.resume_succeeded(user)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Session resume failed: {}", e).into());
                    state.update(|s| s.resume_failed(&LocalCredentialStore));
                }
            }
        });
    }
}

pub fn use_session() -> Session {
    use_context::<Session>().expect("Session not found")
}
