//! Per-client session state: base URL, credentials, and the bearer token
//! cache. One `Session` per client instance; there is no process-wide
//! ambient state.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::sync::Mutex;
use std::time::Instant;

/// Service credentials.
#[derive(Debug, Clone, Default)]
pub struct AuthInfo {
    pub user_id: String,
    pub password: String,
}

impl AuthInfo {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Default)]
struct TokenCache {
    token: Option<(String, Instant)>,
    expires_minutes: Option<f64>,
}

/// Session context injected into the clients.
///
/// The token cache is refreshed on demand: a cached token is served while
/// it is inside the expiry window. Concurrent callers may race to refresh;
/// the last writer wins, which is harmless (both tokens are valid).
#[derive(Debug)]
pub struct Session {
    base_url: String,
    auth: AuthInfo,
    device_token_id: Option<String>,
    cache: Mutex<TokenCache>,
}

impl Session {
    pub fn new(base_url: impl Into<String>, auth: AuthInfo) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            auth,
            device_token_id: None,
            cache: Mutex::new(TokenCache::default()),
        }
    }

    /// Token issuance keyed to a registered device id instead of the
    /// default credential token.
    pub fn with_device_token_id(mut self, id: impl Into<String>) -> Self {
        self.device_token_id = Some(id.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn device_token_id(&self) -> Option<&str> {
        self.device_token_id.as_deref()
    }

    /// Credential blob for the `X-Imate-api-auth` header.
    pub fn auth_data(&self) -> String {
        BASE64.encode(format!("{}:{}", self.auth.user_id, self.auth.password))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TokenCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The cached bearer token, if it is still inside the expiry window.
    pub(crate) fn cached_token(&self) -> Option<String> {
        let cache = self.lock();
        let expires = cache.expires_minutes?;
        let (token, issued_at) = cache.token.as_ref()?;
        if expires > 0.0 && issued_at.elapsed().as_secs_f64() / 60.0 < expires {
            Some(token.clone())
        } else {
            None
        }
    }

    pub(crate) fn cached_expires(&self) -> Option<f64> {
        self.lock().expires_minutes
    }

    pub(crate) fn store_expires(&self, minutes: f64) {
        self.lock().expires_minutes = Some(minutes);
    }

    pub(crate) fn store_token(&self, token: String) {
        self.lock().token = Some((token, Instant::now()));
    }

    /// Drops the cached token; the next call refreshes it.
    pub fn invalidate_token(&self) {
        self.lock().token = None;
    }
}
