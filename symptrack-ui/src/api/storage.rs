//! Browser Storage
//!
//! Bearer token and API base URL, both kept in `localStorage`.

use symptrack::session::{CredentialError, CredentialStore, TOKEN_KEY};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

const API_URL_KEY: &str = "symptrack_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

/// Token persisted in `localStorage` under [`TOKEN_KEY`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCredentialStore;

impl LocalCredentialStore {
    fn storage() -> Result<web_sys::Storage, CredentialError> {
        local_storage().ok_or_else(|| CredentialError::Unavailable("localStorage".to_string()))
    }
}

impl CredentialStore for LocalCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Self::storage()?
            .get_item(TOKEN_KEY)
            .map(|token| token.filter(|t| !t.trim().is_empty()))
            .map_err(|_| CredentialError::Unavailable("read failed".to_string()))
    }

    fn store(&self, token: &str) -> Result<(), CredentialError> {
        Self::storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|_| CredentialError::Unavailable("write failed".to_string()))
    }

    fn clear(&self) -> Result<(), CredentialError> {
        Self::storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|_| CredentialError::Unavailable("remove failed".to_string()))
    }
}
