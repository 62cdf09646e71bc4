//! Durable token storage.
//!
//! The session survives a page reload through two values in LocalStorage,
//! written on login and removed on logout or session invalidation. Nothing
//! else is persisted client-side.

use gloo_storage::{LocalStorage, Storage};

const ACCESS_TOKEN_KEY: &str = "token";
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Static accessor over the two token slots.
pub struct TokenStore;

impl TokenStore {
    pub fn access_token() -> Option<String> {
        LocalStorage::get(ACCESS_TOKEN_KEY).ok()
    }

    pub fn refresh_token() -> Option<String> {
        LocalStorage::get(REFRESH_TOKEN_KEY).ok()
    }

    /// Both slots at once, for session bootstrap.
    pub fn load() -> (Option<String>, Option<String>) {
        (Self::access_token(), Self::refresh_token())
    }

    /// Persist a fresh token pair. Storage failures (private browsing,
    /// quota) degrade to an in-memory-only session.
    pub fn store(access: &str, refresh: &str) {
        let _ = LocalStorage::set(ACCESS_TOKEN_KEY, access);
        let _ = LocalStorage::set(REFRESH_TOKEN_KEY, refresh);
    }

    pub fn clear() {
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        LocalStorage::delete(REFRESH_TOKEN_KEY);
    }
}
