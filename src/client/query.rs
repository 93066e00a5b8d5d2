//! Blocking wrappers for the query service endpoints.

use crate::client::session::Session;
use crate::client::token::TokenClient;
use crate::error::Result;
use crate::protocol::{QueryMessage, QueryRunResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use ureq::Agent;

fn decode_reply<R: DeserializeOwned>(reader: impl Read) -> Result<R> {
    serde_json::from_reader(reader).map_err(Into::into)
}

/// Transport timeouts for one client instance.
#[derive(Debug, Clone, Copy)]
pub struct ClientConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        // Long read window: batch queries against the backend can be slow.
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(1200),
            write_timeout: Duration::from_secs(300),
        }
    }
}

/// Query service client. Each request carries the session's credential
/// header plus a bearer token fetched on demand through the token service
/// and cached in the session for its expiry window.
#[derive(Debug, Clone)]
pub struct QueryClient {
    agent: Agent,
    session: Arc<Session>,
    tokens: TokenClient,
}

impl QueryClient {
    pub fn new(session: Session) -> Self {
        Self::with_config(session, ClientConfig::default())
    }

    pub fn with_config(session: Session, config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .timeout_write(config.write_timeout)
            .build();
        let session = Arc::new(session);
        let tokens = TokenClient::new(agent.clone(), session.clone());
        Self {
            agent,
            session,
            tokens,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token_client(&self) -> &TokenClient {
        &self.tokens
    }

    /// The bearer token for the next request: cached while inside the
    /// expiry window, otherwise issued through the token service. Callers
    /// racing here may refresh twice; both tokens are valid.
    fn bearer_token(&self) -> Result<String> {
        if let Some(token) = self.session.cached_token() {
            return Ok(token);
        }

        let expires = match self.session.cached_expires() {
            Some(minutes) => minutes,
            None => {
                let minutes = self.tokens.token_expires()?;
                self.session.store_expires(minutes);
                minutes
            }
        };

        let token = match self.session.device_token_id() {
            Some(device_id) => self.tokens.token_for_device(device_id)?,
            None => self.tokens.default_token()?,
        };
        log::debug!("issued bearer token, expiry window {} min", expires);
        self.session.store_token(token.clone());
        Ok(token)
    }

    fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let token = self.bearer_token()?;
        let url = self.session.url(path);
        log::debug!("POST {}", url);
        let response = self
            .agent
            .post(&url)
            .set("X-Imate-api-auth", &self.session.auth_data())
            .set("Authorization", &format!("Bearer {}", token))
            .send_json(body)?;
        // Batch replies can be large; decode from the body stream rather
        // than buffering it into a capped string.
        decode_reply(response.into_reader())
    }

    /// `POST api/QueryService/ExecuteQueryBatch/{transactionId}`
    pub fn execute_query_batch(
        &self,
        transaction_id: &str,
        messages: &[QueryMessage],
    ) -> Result<QueryRunResult> {
        self.post_json(
            &format!("api/QueryService/ExecuteQueryBatch/{}", transaction_id),
            &messages,
        )
    }

    /// `POST api/QueryService/ExecuteQuery/{transactionId}/{dataSource}`
    pub fn execute_query(
        &self,
        transaction_id: &str,
        data_source: &str,
        query: &str,
    ) -> Result<QueryRunResult> {
        self.post_json(
            &format!(
                "api/QueryService/ExecuteQuery/{}/{}",
                transaction_id, data_source
            ),
            &query,
        )
    }

    /// `POST api/QueryService/ExecuteNoneQuery/{transactionId}/{dataSource}`
    /// - mutation path, the reply carries no result tables.
    pub fn execute_none_query(
        &self,
        transaction_id: &str,
        data_source: &str,
        query: &str,
    ) -> Result<QueryRunResult> {
        self.post_json(
            &format!(
                "api/QueryService/ExecuteNoneQuery/{}/{}",
                transaction_id, data_source
            ),
            &query,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::AuthInfo;
    use crate::error::ImateError;
    use std::io::Cursor;

    #[test]
    fn test_decode_reply_handles_bodies_beyond_string_buffer_sizes() {
        // A reply well past 10 MB decodes in full from the stream.
        let filler = "x".repeat(11 * 1024 * 1024);
        let json = format!(
            r#"{{"transactionId":"{}","results":[],"apiResult":"OK","apiMessage":"","userMessage":""}}"#,
            filler
        );
        let reply: QueryRunResult = decode_reply(Cursor::new(json.into_bytes())).unwrap();
        assert_eq!(reply.transaction_id.len(), 11 * 1024 * 1024);
        assert!(reply.is_ok());
    }

    #[test]
    fn test_decode_reply_invalid_json_is_decode_error() {
        let err = decode_reply::<QueryRunResult>(Cursor::new(b"{broken".to_vec())).unwrap_err();
        assert!(matches!(err, ImateError::Decode(_)));
    }

    #[test]
    fn test_default_config_timeouts() {
        let config = ClientConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.read_timeout, Duration::from_secs(1200));
        assert_eq!(config.write_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_client_shares_one_session() {
        let client = QueryClient::new(Session::new(
            "https://imate.example.com",
            AuthInfo::new("u", "p"),
        ));
        assert_eq!(client.session().base_url(), "https://imate.example.com");
        // No token cached yet; nothing has been issued.
        assert_eq!(client.session().cached_token(), None);
    }
}
