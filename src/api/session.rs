//! Session Manager
//!
//! Drives [`SessionState`] transitions with real backend calls: silent
//! resume on start, login/register, logout.

use tokio::sync::RwLock;

use super::client::ApiClient;
use super::error::{ApiError, ApiResult};
use crate::forms::{LoginForm, RegisterForm};
use crate::models::User;
use crate::session::{ResumeStep, SessionState, SessionStatus};

/// Session context for one running application
pub struct SessionManager {
    client: ApiClient,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState::new()),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status().clone()
    }

    /// Resolve the loading state: resume a persisted credential if there is one
    pub async fn init(&self) -> SessionStatus {
        let step = {
            let mut state = self.state.write().await;
            state.begin_resume(self.client.credentials().as_ref())
        };

        if let ResumeStep::Resume(_) = step {
            let result = self.client.current_user().await;
            let mut state = self.state.write().await;
            match result {
                Ok(user) => state.resume_succeeded(user),
                Err(e) => {
                    tracing::debug!(error = %e, "Resume rejected");
                    state.resume_failed(self.client.credentials().as_ref());
                }
            }
        }

        self.status().await
    }

    pub async fn login(&self, form: &LoginForm) -> ApiResult<User> {
        let request = form.validate()?;
        let response = self.client.login(&request).await?;

        let mut state = self.state.write().await;
        state.signed_in(self.client.credentials().as_ref(), response.token, response.user.clone())?;
        Ok(response.user)
    }

    pub async fn register(&self, form: &RegisterForm) -> ApiResult<User> {
        let request = form.validate()?;
        let response = self.client.register(&request).await?;

        let mut state = self.state.write().await;
        state.signed_in(self.client.credentials().as_ref(), response.token, response.user.clone())?;
        Ok(response.user)
    }

    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        state.signed_out(self.client.credentials().as_ref());
    }

    /// Pass a call result through, ending the session if the backend
    /// rejected the credential
    pub async fn checked<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if matches!(&result, Err(e) if e.is_unauthorized()) {
            self.state.write().await.unauthorized(self.client.credentials().as_ref());
        }
        result
    }

    /// Current user, or [`ApiError::Unauthorized`] when signed out
    pub async fn require_user(&self) -> ApiResult<User> {
        match self.status().await {
            SessionStatus::Present(user) => Ok(user),
            _ => Err(ApiError::Unauthorized { message: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::mock::spawn_backend;
    use crate::session::{CredentialStore, MemoryCredentialStore};
    use axum::{
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/auth/login",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "hunter2" {
                        Json(json!({
                            "message": "Login successful",
                            "token": "tok-1",
                            "user": {"id": 1, "name": "Pat", "email": body["email"]}
                        }))
                        .into_response()
                    } else {
                        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"}))).into_response()
                    }
                }),
            )
            .route(
                "/api/auth/register",
                post(|Json(body): Json<Value>| async move {
                    assert!(body.get("confirm_password").is_none());
                    (
                        StatusCode::CREATED,
                        Json(json!({"token": "tok-new", "user": {"id": 2, "name": body["name"], "email": body["email"]}})),
                    )
                }),
            )
            .route(
                "/api/auth/profile",
                get(|headers: HeaderMap| async move {
                    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                        Some("Bearer tok-1") => {
                            Json(json!({"user": {"id": 1, "name": "Pat", "email": "pat@x.io"}})).into_response()
                        }
                        _ => StatusCode::UNAUTHORIZED.into_response(),
                    }
                }),
            )
    }

    async fn manager(token: Option<&str>) -> (SessionManager, Arc<MemoryCredentialStore>) {
        let base = spawn_backend(backend()).await;
        let store = Arc::new(match token {
            Some(t) => MemoryCredentialStore::with_token(t),
            None => MemoryCredentialStore::new(),
        });
        let client = ApiClient::new(ClientConfig::new(base), store.clone()).unwrap();
        (SessionManager::new(client), store)
    }

    #[tokio::test]
    async fn test_init_without_credential() {
        let (session, _store) = manager(None).await;
        assert!(session.status().await.is_loading());
        assert_eq!(session.init().await, SessionStatus::Absent);
    }

    #[tokio::test]
    async fn test_init_resumes_valid_credential() {
        let (session, _store) = manager(Some("tok-1")).await;
        let status = session.init().await;
        assert_eq!(status.user().map(|u| u.name.as_str()), Some("Pat"));
    }

    #[tokio::test]
    async fn test_init_discards_rejected_credential() {
        let (session, store) = manager(Some("revoked")).await;
        assert_eq!(session.init().await, SessionStatus::Absent);
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let (session, store) = manager(None).await;
        session.init().await;

        let user = session
            .login(&LoginForm {
                email: "pat@x.io".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.email, "pat@x.io");
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-1"));
        assert!(session.status().await.is_present());

        session.logout().await;
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(session.status().await, SessionStatus::Absent);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let (session, store) = manager(None).await;
        let err = session
            .login(&LoginForm {
                email: "pat@x.io".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.form_message("Login failed"), "Invalid credentials");
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_validates_before_sending() {
        let (session, _store) = manager(None).await;
        let mut form = RegisterForm {
            name: "Sky".into(),
            email: "sky@x.io".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
            ..Default::default()
        };

        let err = session.register(&form).await.unwrap_err();
        assert_eq!(err.form_message("Registration failed"), "Passwords do not match");

        form.confirm_password = "abc".into();
        let user = session.register(&form).await.unwrap();
        assert_eq!(user.name, "Sky");
        assert!(session.require_user().await.is_ok());
    }

    #[tokio::test]
    async fn test_checked_ends_session_on_401() {
        let (session, store) = manager(None).await;
        session
            .login(&LoginForm {
                email: "pat@x.io".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        let rejected: ApiResult<()> = Err(ApiError::Unauthorized { message: None });
        assert!(session.checked(rejected).await.is_err());
        assert_eq!(session.status().await, SessionStatus::Absent);
        assert_eq!(store.load().unwrap(), None);
    }
}
