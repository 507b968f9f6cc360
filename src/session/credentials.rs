//! Credential Persistence

use std::sync::Mutex;
use thiserror::Error;

/// Fixed key the bearer token is persisted under
pub const TOKEN_KEY: &str = "token";

/// Credential store errors
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential storage unavailable: {0}")]
    Unavailable(String),
}

/// Where the bearer token lives between runs
pub trait CredentialStore: Send + Sync {
    /// Persisted token, if any
    fn load(&self) -> Result<Option<String>, CredentialError>;

    fn store(&self, token: &str) -> Result<(), CredentialError>;

    /// Remove the token; clearing an empty store is not an error
    fn clear(&self) -> Result<(), CredentialError>;
}

/// Process-local store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, CredentialError> {
        self.token
            .lock()
            .map_err(|_| CredentialError::Unavailable("credential lock poisoned".to_string()))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, token: &str) -> Result<(), CredentialError> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.store("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
