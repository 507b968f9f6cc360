//! HTTP API Client
//!
//! Functions for communicating with the SympTrack REST API. Every request
//! carries the stored bearer token; a 401 from any endpoint clears it and
//! sends the browser back to the login screen.

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use symptrack::dto::{
    decode_envelope, decode_list, error_message, AuthResponse, HospitalQuery, HospitalSearch,
    LoginRequest, NewComment, NewVlog, PredictionRequest, RegisterRequest,
};
use symptrack::models::{
    Alert, Comment, DashboardSummary, HealthStats, Hospital, Prediction, PredictionHistoryEntry,
    Profile, RiskAnalysis, User, Vlog,
};
use symptrack::session::{CredentialStore, Route};

use super::storage::{get_api_base, LocalCredentialStore};

/// A failed request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestError {
    /// HTTP status, when the backend answered
    pub status: Option<u16>,
    /// The backend's own error text
    pub message: Option<String>,
    detail: String,
}

impl RequestError {
    fn network(e: impl fmt::Display) -> Self {
        Self {
            status: None,
            message: None,
            detail: format!("Network error: {}", e),
        }
    }

    fn decode(e: impl fmt::Display) -> Self {
        Self {
            status: None,
            message: None,
            detail: format!("Parse error: {}", e),
        }
    }

    fn status(status: u16, message: Option<String>) -> Self {
        Self {
            status: Some(status),
            detail: format!("HTTP {}", status),
            message,
        }
    }

    /// Inline text for a failed form: the backend's message, else `fallback`
    pub fn form_message(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.detail, message),
            None => f.write_str(&self.detail),
        }
    }
}

pub type ApiResult<T> = Result<T, RequestError>;

// ============ Transport ============

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

async fn send<B: Serialize + ?Sized>(builder: RequestBuilder, body: Option<&B>) -> ApiResult<Value> {
    let builder = match LocalCredentialStore.load() {
        Ok(Some(token)) => builder.header("Authorization", &format!("Bearer {}", token)),
        _ => builder,
    };

    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| RequestError::network(format!("request build error: {}", e)))?;

    let response = request.send().await.map_err(RequestError::network)?;
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let parsed = if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&text)
    };

    if status == 401 {
        let message = parsed.ok().as_ref().and_then(error_message);
        unauthorized();
        return Err(RequestError::status(status, message));
    }

    if !response.ok() {
        let message = parsed.ok().as_ref().and_then(error_message);
        return Err(RequestError::status(status, message));
    }

    parsed.map_err(RequestError::decode)
}

/// Clear the credential and leave for the login screen
fn unauthorized() {
    if let Err(e) = LocalCredentialStore.clear() {
        web_sys::console::error_1(&format!("Failed to clear token: {}", e).into());
    }

    let entry = Route::PUBLIC_ENTRY.path();
    if let Some(location) = web_sys::window().map(|w| w.location()) {
        // Already there: keep the form and its error on screen
        if location.pathname().ok().as_deref() != Some(entry) {
            let _ = location.set_href(entry);
        }
    }
}

async fn get(path: &str) -> ApiResult<Value> {
    send::<()>(Request::get(&url(path)), None).await
}

async fn get_with(path: &str, query: Vec<(&'static str, String)>) -> ApiResult<Value> {
    send::<()>(Request::get(&url(path)).query(query), None).await
}

async fn post<B: Serialize + ?Sized>(path: &str, body: &B) -> ApiResult<Value> {
    send(Request::post(&url(path)), Some(body)).await
}

async fn put<B: Serialize + ?Sized>(path: &str, body: &B) -> ApiResult<Value> {
    send(Request::put(&url(path)), Some(body)).await
}

fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(RequestError::decode)
}

fn list<T: DeserializeOwned>(body: Value, key: &str) -> ApiResult<Vec<T>> {
    decode_list(body, key).map_err(RequestError::decode)
}

fn envelope<T: DeserializeOwned>(body: Value, key: &str) -> ApiResult<T> {
    decode_envelope(body, key).map_err(RequestError::decode)
}

// ============ Auth ============

pub async fn login(request: &LoginRequest) -> ApiResult<AuthResponse> {
    decode(post("/auth/login", request).await?)
}

pub async fn register(request: &RegisterRequest) -> ApiResult<AuthResponse> {
    decode(post("/auth/register", request).await?)
}

/// Current user, for silent resume
pub async fn current_user() -> ApiResult<User> {
    envelope(get("/auth/profile").await?, "user")
}

// ============ Profile ============

pub async fn fetch_profile() -> ApiResult<Profile> {
    envelope(get("/user/profile").await?, "profile")
}

pub async fn update_profile(profile: &Profile) -> ApiResult<()> {
    put("/user/profile", profile).await.map(|_| ())
}

pub async fn fetch_health_stats() -> ApiResult<HealthStats> {
    envelope(get("/user/health-stats").await?, "stats")
}

// ============ Predictions ============

pub async fn predict(request: &PredictionRequest) -> ApiResult<Prediction> {
    decode(post("/predictions/predict", request).await?)
}

pub async fn fetch_prediction_history() -> ApiResult<Vec<PredictionHistoryEntry>> {
    list(get("/predictions/history").await?, "predictions")
}

// ============ Dashboard ============

pub async fn fetch_dashboard() -> ApiResult<DashboardSummary> {
    decode(get("/dashboard").await?)
}

pub async fn fetch_risk_analysis() -> ApiResult<RiskAnalysis> {
    decode(get("/dashboard-stats").await?)
}

// ============ Alerts ============

pub async fn fetch_alerts() -> ApiResult<Vec<Alert>> {
    list(get("/alerts").await?, "alerts")
}

// ============ Stories ============

pub async fn fetch_vlogs() -> ApiResult<Vec<Vlog>> {
    list(get("/vlogs").await?, "vlogs")
}

pub async fn create_vlog(vlog: &NewVlog) -> ApiResult<()> {
    post("/vlogs", vlog).await.map(|_| ())
}

pub async fn like_vlog(vlog_id: &str) -> ApiResult<()> {
    let path = format!("/vlogs/{}/like", String::from(js_sys::encode_uri_component(vlog_id)));
    send::<()>(Request::post(&url(&path)), None).await.map(|_| ())
}

pub async fn fetch_comments(vlog_id: &str) -> ApiResult<Vec<Comment>> {
    let path = format!("/comments/{}", String::from(js_sys::encode_uri_component(vlog_id)));
    list(get(&path).await?, "comments")
}

pub async fn add_comment(comment: &NewComment) -> ApiResult<()> {
    post("/comments", comment).await.map(|_| ())
}

// ============ Hospitals ============

pub async fn fetch_hospitals(query: &HospitalQuery) -> ApiResult<Vec<Hospital>> {
    list(get_with("/hospitals", query.to_pairs()).await?, "hospitals")
}

pub async fn search_hospitals(search: &HospitalSearch) -> ApiResult<Vec<Hospital>> {
    list(get_with("/hospitals/search", search.to_pairs()).await?, "hospitals")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_form_message_prefers_backend_text() {
        let err = RequestError::status(409, Some("User already exists".to_string()));
        assert_eq!(err.form_message("Registration failed"), "User already exists");
        assert_eq!(err.to_string(), "HTTP 409: User already exists");
    }

    #[wasm_bindgen_test]
    fn test_form_message_fallback() {
        let err = RequestError::network("connection refused");
        assert_eq!(err.status, None);
        assert_eq!(err.form_message("Login failed"), "Login failed");
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
