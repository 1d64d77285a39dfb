//! Hiscores API client
//!
//! Fetches the raw "lite" hiscores payload for a player. Parsing the payload is
//! left to [`super::parser`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

/// Default endpoint for the Old School hiscores lite API
pub const DEFAULT_BASE_URL: &str = "https://secure.runescape.com/m=hiscore_oldschool/index_lite.ws";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when reading a payload from the remote source
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The hiscores have no entry for this player
    #[error("Player '{0}' not found on the hiscores")]
    PlayerNotFound(String),

    /// The server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),
}

/// A source of raw hiscores payloads
///
/// Implemented by [`HiscoresClient`] for the live endpoint; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Returns the raw newline-delimited payload for a player
    async fn fetch_raw_payload(&self, identifier: &str) -> Result<String, TransportError>;
}

/// Configuration for [`HiscoresClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint URL; the player name is sent as the `player` query parameter
    pub base_url: String,
    /// Timeout for a single request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for the Old School RuneScape hiscores endpoint
#[derive(Debug, Clone)]
pub struct HiscoresClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl HiscoresClient {
    /// Creates a new HiscoresClient with default configuration
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a new HiscoresClient from explicit configuration
    ///
    /// # Returns
    /// * `Ok(HiscoresClient)` on success
    /// * `Err(TransportError::Http)` if the HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self, TransportError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url,
        })
    }

    /// Returns the endpoint this client queries
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HiscoresClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerSource for HiscoresClient {
    async fn fetch_raw_payload(&self, identifier: &str) -> Result<String, TransportError> {
        debug!(player = identifier, url = %self.base_url, "Fetching hiscores payload");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("player", identifier)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            StatusCode::NOT_FOUND => Err(TransportError::PlayerNotFound(identifier.to_string())),
            status => Err(TransportError::UnexpectedStatus(status.as_u16())),
        }
    }
}
