//! API Error Types
//!
//! Errors surfaced by the REST client, and the mapping from transport
//! failures and HTTP status codes onto them.

use thiserror::Error;

use crate::forms::ValidationError;
use crate::session::CredentialError;

/// REST client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend unreachable or the connection broke
    #[error("Backend unavailable: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// 401; the stored credential has already been cleared
    #[error("Not authorized: {}", .message.as_deref().unwrap_or("please sign in again"))]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx response
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status { status: u16, message: Option<String> },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Rejected before sending
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Credential storage error: {0}")]
    Credentials(#[from] CredentialError),
}

impl ApiError {
    /// Map a transport error the way every call site needs it
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Inline text for a failed form submission: the backend's message when
    /// it sent one, otherwise `fallback`
    pub fn form_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            }
            | ApiError::Unauthorized {
                message: Some(message),
            } => message.clone(),
            ApiError::Validation(e) => e.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Result alias for client calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_message_prefers_backend_text() {
        let err = ApiError::Status {
            status: 400,
            message: Some("User already exists".into()),
        };
        assert_eq!(err.form_message("Registration failed"), "User already exists");

        let err = ApiError::Unauthorized {
            message: Some("Invalid credentials".into()),
        };
        assert_eq!(err.form_message("Login failed"), "Invalid credentials");
    }

    #[test]
    fn test_form_message_fallback() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.form_message("Login failed"), "Login failed");
        assert_eq!(ApiError::Timeout.form_message("Login failed"), "Login failed");
        assert_eq!(err.to_string(), "API error 500: request failed");
    }

    #[test]
    fn test_validation_message() {
        let err = ApiError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.form_message("Registration failed"), "Passwords do not match");
        assert_eq!(err.status(), None);
    }
}
