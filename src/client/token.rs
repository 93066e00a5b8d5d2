//! Blocking wrappers for the token service endpoints.

use crate::client::session::Session;
use crate::error::{ImateError, Result};
use crate::protocol::ImateAuthInfo;
use std::sync::Arc;
use ureq::Agent;

/// The service may deliver a scalar JSON-quoted or as plain text. Strips
/// exactly one balanced pair of quotes; an unbalanced quote is part of the
/// value and stays.
fn unquote(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
}

/// Token service client. Authenticates with the session's basic
/// credentials; the bearer token it issues is what the query service
/// endpoints then use.
#[derive(Debug, Clone)]
pub struct TokenClient {
    agent: Agent,
    session: Arc<Session>,
}

impl TokenClient {
    pub fn new(agent: Agent, session: Arc<Session>) -> Self {
        Self { agent, session }
    }

    fn get_text(&self, path: &str) -> Result<String> {
        let url = self.session.url(path);
        log::debug!("GET {}", url);
        let response = self
            .agent
            .get(&url)
            .set(
                "Authorization",
                &format!("Basic {}", self.session.auth_data()),
            )
            .call()?;
        let text = response.into_string()?;
        Ok(unquote(&text).to_string())
    }

    /// `GET api/TokenService/GetDefaultToken`
    pub fn default_token(&self) -> Result<String> {
        self.get_text("api/TokenService/GetDefaultToken")
    }

    /// `GET api/TokenService/GetToken/{id}`
    pub fn token_for_device(&self, device_id: &str) -> Result<String> {
        self.get_text(&format!("api/TokenService/GetToken/{}", device_id))
    }

    /// `GET api/TokenService/GetTokenExpires` - token lifetime in minutes.
    pub fn token_expires(&self) -> Result<f64> {
        let text = self.get_text("api/TokenService/GetTokenExpires")?;
        text.parse::<f64>()
            .map_err(|_| ImateError::Decode(format!("Invalid token expiry '{}'", text)))
    }

    /// `POST api/TokenService/otpauth` - one-time-password check.
    pub fn otp_auth(&self, auth_info: &ImateAuthInfo) -> Result<bool> {
        let url = self.session.url("api/TokenService/otpauth");
        log::debug!("POST {}", url);
        let response = self
            .agent
            .post(&url)
            .set(
                "Authorization",
                &format!("Basic {}", self.session.auth_data()),
            )
            .send_json(auth_info)?;
        let text = response.into_string()?;
        serde_json::from_str::<bool>(text.trim()).map_err(Into::into)
    }
}
