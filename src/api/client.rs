//! SympTrack REST Client
//!
//! Single HTTP client wrapper for every backend call. Attaches the persisted
//! bearer token to each request, tags it with a request id, and handles a
//! 401 globally: the credential is cleared and the unauthorized hook is sent
//! to the public entry route, whichever call triggered it.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::dto::{
    decode_envelope, decode_list, error_message, AuthResponse, HospitalQuery, HospitalSearch,
    LoginRequest, NewComment, NewVlog, PredictionRequest, RegisterRequest,
};
use crate::models::{
    Alert, Comment, DashboardSummary, HealthStats, Hospital, Prediction, PredictionHistoryEntry,
    Profile, RiskAnalysis, User, Vlog,
};
use crate::session::{CredentialStore, Route};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix ("http://localhost:5000/api")
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_secs(config.api.request_timeout_secs),
        }
    }
}

/// Hook run after a 401 has cleared the credential
pub trait UnauthorizedHandler: Send + Sync {
    /// `entry` is the route unauthenticated users belong on
    fn on_unauthorized(&self, entry: Route);
}

/// Default hook: log and carry on
#[derive(Debug, Default)]
pub struct LogUnauthorized;

impl UnauthorizedHandler for LogUnauthorized {
    fn on_unauthorized(&self, entry: Route) {
        warn!(redirect = %entry, "Session expired");
    }
}

/// SympTrack backend client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
    on_unauthorized: Arc<dyn UnauthorizedHandler>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client that reads and clears its token through `credentials`
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            on_unauthorized: Arc::new(LogUnauthorized),
        })
    }

    /// Replace the hook run after a 401
    pub fn with_unauthorized_handler(mut self, handler: Arc<dyn UnauthorizedHandler>) -> Self {
        self.on_unauthorized = handler;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn token(&self) -> Option<String> {
        match self.credentials.load() {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not read credential, sending anonymously");
                None
            }
        }
    }

    fn handle_unauthorized(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear credential after 401");
        }
        self.on_unauthorized.on_unauthorized(Route::PUBLIC_ENTRY);
    }

    /// Issue one request and return the JSON body of a 2xx response
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ApiResult<Value> {
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .header(REQUEST_ID_HEADER, &request_id);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(%request_id, %method, path, error = %e, "Request failed");
            ApiError::from_reqwest(e)
        })?;

        let status = response.status();
        debug!(
            %request_id,
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API request"
        );

        let bytes = response.bytes().await.map_err(ApiError::from_reqwest)?;
        let parsed = if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice::<Value>(&bytes)
        };

        if status == reqwest::StatusCode::UNAUTHORIZED {
            let message = parsed.ok().as_ref().and_then(error_message);
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized { message });
        }

        if !status.is_success() {
            let message = parsed.ok().as_ref().and_then(error_message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed?)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        self.send::<()>(Method::GET, path, query, None).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
        Ok(serde_json::from_value(body)?)
    }

    // ============ Auth ============

    /// `POST /auth/login`. The caller persists the returned token.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        Self::decode(self.post("/auth/login", request).await?)
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        Self::decode(self.post("/auth/register", request).await?)
    }

    /// `GET /auth/profile`, used for silent resume
    pub async fn current_user(&self) -> ApiResult<User> {
        Ok(decode_envelope(self.get("/auth/profile", &[]).await?, "user")?)
    }

    // ============ Profile ============

    pub async fn profile(&self) -> ApiResult<Profile> {
        Ok(decode_envelope(self.get("/user/profile", &[]).await?, "profile")?)
    }

    pub async fn update_profile(&self, profile: &Profile) -> ApiResult<()> {
        self.put("/user/profile", profile).await?;
        Ok(())
    }

    pub async fn health_stats(&self) -> ApiResult<HealthStats> {
        Ok(decode_envelope(self.get("/user/health-stats", &[]).await?, "stats")?)
    }

    // ============ Predictions ============

    pub async fn predict(&self, request: &PredictionRequest) -> ApiResult<Prediction> {
        Self::decode(self.post("/predictions/predict", request).await?)
    }

    pub async fn prediction_history(&self) -> ApiResult<Vec<PredictionHistoryEntry>> {
        Ok(decode_list(self.get("/predictions/history", &[]).await?, "predictions")?)
    }

    // ============ Dashboard ============

    pub async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        Self::decode(self.get("/dashboard", &[]).await?)
    }

    pub async fn risk_analysis(&self) -> ApiResult<RiskAnalysis> {
        Self::decode(self.get("/dashboard-stats", &[]).await?)
    }

    // ============ Alerts ============

    pub async fn alerts(&self) -> ApiResult<Vec<Alert>> {
        Ok(decode_list(self.get("/alerts", &[]).await?, "alerts")?)
    }

    // ============ Stories ============

    pub async fn vlogs(&self) -> ApiResult<Vec<Vlog>> {
        Ok(decode_list(self.get("/vlogs", &[]).await?, "vlogs")?)
    }

    pub async fn create_vlog(&self, vlog: &NewVlog) -> ApiResult<()> {
        self.post("/vlogs", vlog).await?;
        Ok(())
    }

    pub async fn like_vlog(&self, vlog_id: &str) -> ApiResult<()> {
        let path = format!("/vlogs/{}/like", urlencoding::encode(vlog_id));
        self.send::<()>(Method::POST, &path, &[], None).await?;
        Ok(())
    }

    pub async fn comments(&self, vlog_id: &str) -> ApiResult<Vec<Comment>> {
        let path = format!("/comments/{}", urlencoding::encode(vlog_id));
        Ok(decode_list(self.get(&path, &[]).await?, "comments")?)
    }

    pub async fn add_comment(&self, comment: &NewComment) -> ApiResult<()> {
        self.post("/comments", comment).await?;
        Ok(())
    }

    // ============ Hospitals ============

    pub async fn hospitals(&self, query: &HospitalQuery) -> ApiResult<Vec<Hospital>> {
        Ok(decode_list(self.get("/hospitals", &query.to_pairs()).await?, "hospitals")?)
    }

    pub async fn search_hospitals(&self, search: &HospitalSearch) -> ApiResult<Vec<Hospital>> {
        Ok(decode_list(
            self.get("/hospitals/search", &search.to_pairs()).await?,
            "hospitals",
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{spawn_backend, RecordingHandler};
    use crate::models::GeoPoint;
    use crate::session::MemoryCredentialStore;
    use crate::severity::Severity;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn bearer(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    async fn client_for(router: Router, token: Option<&str>) -> (ApiClient, Arc<MemoryCredentialStore>) {
        let base = spawn_backend(router).await;
        let store = Arc::new(match token {
            Some(t) => MemoryCredentialStore::with_token(t),
            None => MemoryCredentialStore::new(),
        });
        let client = ApiClient::new(ClientConfig::new(base), store.clone()).unwrap();
        (client, store)
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let router = Router::new().route(
            "/api/alerts",
            get(|headers: HeaderMap| async move {
                assert!(headers.get(REQUEST_ID_HEADER).is_some());
                match bearer(&headers).as_deref() {
                    Some("Bearer t-123") => Json(json!({"alerts": [
                        {"id": 1, "type": "Emergency", "severity": "Critical", "title": "Flood"}
                    ]}))
                    .into_response(),
                    _ => StatusCode::FORBIDDEN.into_response(),
                }
            }),
        );

        let (client, _store) = client_for(router, Some("t-123")).await;
        let alerts = client.alerts().await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let router = Router::new().route(
            "/api/vlogs",
            get(|headers: HeaderMap| async move {
                assert!(bearer(&headers).is_none());
                Json(json!([]))
            }),
        );

        let (client, _store) = client_for(router, None).await;
        assert!(client.vlogs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_401_clears_credential_and_redirects() {
        let router = Router::new()
            .route(
                "/api/dashboard",
                get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"msg": "Token has expired"}))) }),
            )
            .route(
                "/api/hospitals",
                get(|| async { (StatusCode::UNAUTHORIZED, "") }),
            );

        let (client, store) = client_for(router, Some("stale")).await;
        let recorder = Arc::new(RecordingHandler::default());
        let client = client.with_unauthorized_handler(recorder.clone());

        let err = client.dashboard().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.form_message("Session expired"), "Token has expired");
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(recorder.redirects(), vec![Route::Login]);

        // Any call, any body
        store.store("stale-again").unwrap();
        let err = client.hospitals(&HospitalQuery::default()).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(recorder.redirects(), vec![Route::Login, Route::Login]);
    }

    #[tokio::test]
    async fn test_login_failure_message() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"}))) }),
        );

        let (client, _store) = client_for(router, None).await;
        let err = client
            .login(&LoginRequest {
                email: "a@b.c".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.form_message("Login failed"), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_error_field_precedence() {
        let router = Router::new()
            .route(
                "/api/auth/register",
                post(|| async {
                    (StatusCode::BAD_REQUEST, Json(json!({"error": "Email taken", "message": "ignored"})))
                }),
            )
            .route(
                "/api/predictions/predict",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let (client, store) = client_for(router, Some("ok")).await;

        let err = client
            .register(&RegisterRequest {
                name: "N".into(),
                email: "n@x.io".into(),
                password: "p".into(),
                phone: None,
                age: None,
                gender: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.form_message("Registration failed"), "Email taken");

        let err = client
            .predict(&PredictionRequest {
                symptoms: "cough".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.form_message("Prediction failed"), "Prediction failed");

        // Non-401 failures keep the credential
        assert_eq!(store.load().unwrap().as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_hospital_query_params() {
        let router = Router::new().route(
            "/api/hospitals",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("lat").map(String::as_str), Some("40.7128"));
                assert_eq!(params.get("radius").map(String::as_str), Some("25"));
                assert_eq!(params.get("specialty").map(String::as_str), Some("Cardiology"));
                Json(json!([{"id": 1, "name": "Mount Sinai", "address": "1 Gustave L. Levy Pl", "rating": 4.1}]))
            }),
        );

        let (client, _store) = client_for(router, Some("t")).await;
        let hospitals = client
            .hospitals(&HospitalQuery {
                origin: GeoPoint::FALLBACK,
                radius_miles: 25,
                specialty: "Cardiology".into(),
            })
            .await
            .unwrap();
        assert_eq!(hospitals[0].name, "Mount Sinai");
    }

    #[tokio::test]
    async fn test_like_and_comments_paths() {
        let router = Router::new()
            .route(
                "/api/vlogs/:id/like",
                post(|Path(id): Path<String>| async move {
                    assert_eq!(id, "42");
                    Json(json!({"message": "Vlog liked successfully"}))
                }),
            )
            .route(
                "/api/comments/:vlog_id",
                get(|Path(id): Path<String>| async move {
                    Json(json!([{"id": 1, "username": "Lisa T.", "comment_text": format!("on {}", id)}]))
                }),
            )
            .route(
                "/api/comments",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["vlog_id"], "42");
                    assert!(body.get("user_id").is_none());
                    StatusCode::CREATED
                }),
            );

        let (client, _store) = client_for(router, Some("t")).await;
        client.like_vlog("42").await.unwrap();

        let comments = client.comments("42").await.unwrap();
        assert_eq!(comments[0].comment_text, "on 42");

        client
            .add_comment(&NewComment {
                vlog_id: "42".into(),
                comment_text: "Stay strong".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_envelopes() {
        let router = Router::new()
            .route(
                "/api/auth/profile",
                get(|| async { Json(json!({"user": {"id": 3, "name": "Kai", "email": "kai@x.io"}})) }),
            )
            .route(
                "/api/user/health-stats",
                get(|| async { Json(json!({"stats": {"predictions_made": 4, "avg_risk_score": 31}})) }),
            );

        let (client, _store) = client_for(router, Some("t")).await;
        assert_eq!(client.current_user().await.unwrap().name, "Kai");
        assert_eq!(client.health_stats().await.unwrap().predictions_made, 4);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let store = Arc::new(MemoryCredentialStore::with_token("t"));
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9/api"), store.clone()).unwrap();

        let err = client.alerts().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
        assert_eq!(store.load().unwrap().as_deref(), Some("t"));
    }

    #[test]
    fn test_base_url_trimmed() {
        let store = Arc::new(MemoryCredentialStore::new());
        let client = ApiClient::new(ClientConfig::new("http://localhost:5000/api/"), store).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/alerts"), "http://localhost:5000/api/alerts");
    }
}
