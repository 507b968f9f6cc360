//! Session Lifecycle
//!
//! One session per running application. The state owns the in-memory
//! identity; the credential store owns the persisted token. Transitions keep
//! the two consistent.

use tracing::{debug, info, warn};

use super::credentials::{CredentialError, CredentialStore};
use super::gate::SessionStatus;
use crate::models::User;

/// First step of a silent resume
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeStep {
    /// Nothing persisted; session is now absent
    NoCredential,
    /// Fetch the current user with this token
    Resume(String),
}

/// Current identity plus token
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    status: SessionStatus,
    token: Option<String>,
}

impl SessionState {
    /// Fresh state, loading until [`begin_resume`](Self::begin_resume) resolves
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn user(&self) -> Option<&User> {
        self.status.user()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Look for a persisted credential to resume with
    pub fn begin_resume(&mut self, store: &dyn CredentialStore) -> ResumeStep {
        match store.load() {
            Ok(Some(token)) if !token.trim().is_empty() => {
                self.status = SessionStatus::Loading;
                self.token = Some(token.clone());
                ResumeStep::Resume(token)
            }
            Ok(_) => {
                debug!("No persisted credential");
                self.become_absent();
                ResumeStep::NoCredential
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted credential");
                self.become_absent();
                ResumeStep::NoCredential
            }
        }
    }

    /// Current-user fetch succeeded
    pub fn resume_succeeded(&mut self, user: User) {
        info!(user = %user.email, "Session resumed");
        self.status = SessionStatus::Present(user);
    }

    /// Current-user fetch failed; the credential is discarded
    pub fn resume_failed(&mut self, store: &dyn CredentialStore) {
        warn!("Session resume failed, clearing credential");
        self.discard(store);
    }

    /// Login or register succeeded
    pub fn signed_in(
        &mut self,
        store: &dyn CredentialStore,
        token: String,
        user: User,
    ) -> Result<(), CredentialError> {
        store.store(&token)?;
        info!(user = %user.email, "Signed in");
        self.token = Some(token);
        self.status = SessionStatus::Present(user);
        Ok(())
    }

    /// Replace the in-memory identity after a profile edit
    pub fn refresh_user(&mut self, user: User) {
        if self.status.is_present() {
            self.status = SessionStatus::Present(user);
        }
    }

    /// Explicit logout
    pub fn signed_out(&mut self, store: &dyn CredentialStore) {
        info!("Signed out");
        self.discard(store);
    }

    /// Backend rejected the credential
    pub fn unauthorized(&mut self, store: &dyn CredentialStore) {
        warn!("Credential rejected, session ended");
        self.discard(store);
    }

    fn discard(&mut self, store: &dyn CredentialStore) {
        if let Err(e) = store.clear() {
            warn!(error = %e, "Failed to clear persisted credential");
        }
        self.become_absent();
    }

    fn become_absent(&mut self) {
        self.token = None;
        self.status = SessionStatus::Absent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryCredentialStore;

    fn user() -> User {
        User {
            id: "9".into(),
            name: "Riley".into(),
            email: "riley@example.com".into(),
            ..User::default()
        }
    }

    #[test]
    fn test_starts_loading() {
        assert!(SessionState::new().status().is_loading());
    }

    #[test]
    fn test_resume_without_credential() {
        let store = MemoryCredentialStore::new();
        let mut state = SessionState::new();

        assert_eq!(state.begin_resume(&store), ResumeStep::NoCredential);
        assert_eq!(state.status(), &SessionStatus::Absent);
    }

    #[test]
    fn test_resume_success() {
        let store = MemoryCredentialStore::with_token("t1");
        let mut state = SessionState::new();

        assert_eq!(state.begin_resume(&store), ResumeStep::Resume("t1".into()));
        assert!(state.status().is_loading());

        state.resume_succeeded(user());
        assert_eq!(state.user().map(|u| u.name.as_str()), Some("Riley"));
        assert_eq!(state.token(), Some("t1"));
    }

    #[test]
    fn test_resume_failure_clears_credential() {
        let store = MemoryCredentialStore::with_token("expired");
        let mut state = SessionState::new();

        state.begin_resume(&store);
        state.resume_failed(&store);

        assert_eq!(state.status(), &SessionStatus::Absent);
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(state.token(), None);
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = MemoryCredentialStore::new();
        let mut state = SessionState::new();
        state.begin_resume(&store);

        state.signed_in(&store, "fresh".into(), user()).unwrap();
        assert!(state.status().is_present());
        assert_eq!(store.load().unwrap().as_deref(), Some("fresh"));

        state.signed_out(&store);
        assert_eq!(state.status(), &SessionStatus::Absent);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_unauthorized_clears_everything() {
        let store = MemoryCredentialStore::new();
        let mut state = SessionState::new();
        state.signed_in(&store, "t".into(), user()).unwrap();

        state.unauthorized(&store);
        assert!(!state.status().is_present());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_refresh_user_only_when_present() {
        let mut state = SessionState::new();
        state.refresh_user(user());
        assert!(state.status().is_loading());
    }
}
