use crate::config::ClientConfig;
use crate::error::PokedexError;
use lazy_static::lazy_static;
use log::debug;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, PoisonError};
use time::OffsetDateTime;
use tokio::time::Instant;

const ACCEPT: &str = "application/json";
const MAX_API_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct ApiCall {
    pub url: String,
    pub timestamp: OffsetDateTime,
    pub status_code: u16,
    pub success: bool,
}

// Use a blocking mutex since we are only holding the lock to find out when we can call
lazy_static! {
    static ref LAST_API_CALL: Mutex<Option<Instant>> = Mutex::new(None);
    static ref API_CALL_HISTORY: Arc<Mutex<Vec<ApiCall>>> = Arc::new(Mutex::new(Vec::new()));
}

#[derive(Debug)]
pub struct PokeApiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl PokeApiClient {
    pub fn new() -> Result<Self, PokedexError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, PokedexError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| PokedexError::Config(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(ACCEPT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(PokeApiClient { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    async fn wait_for_cooldown(&self) {
        if self.config.cooldown.is_zero() {
            return;
        }
        let next_call = {
            let mut last = LAST_API_CALL.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            let next = match *last {
                Some(previous) => (previous + self.config.cooldown).max(now),
                None => now,
            };
            *last = Some(next);
            next
        };
        tokio::time::sleep_until(next_call).await;
    }

    /// Send a GET request and record it in the call history.
    /// Only calls against the configured API root are rate limited; sprite hosts are not.
    pub async fn call(&self, uri: &str) -> Result<reqwest::Response, PokedexError> {
        if uri.starts_with(&self.config.base_url) {
            self.wait_for_cooldown().await;
        }
        debug!("calling PokeAPI: {}", uri);

        let timestamp = OffsetDateTime::now_utc();
        match self.client.get(uri).send().await {
            Ok(response) => {
                record_api_call(ApiCall {
                    url: uri.to_string(),
                    timestamp,
                    status_code: response.status().as_u16(),
                    success: response.status().is_success(),
                });
                Ok(response)
            }
            Err(e) => {
                record_api_call(ApiCall {
                    url: uri.to_string(),
                    timestamp,
                    status_code: 0, // Unknown status for network errors
                    success: false,
                });
                Err(PokedexError::Network(e))
            }
        }
    }

    /// GET `uri` and decode the body as JSON.
    /// Non-success statuses become [`PokedexError::Status`], undecodable bodies [`PokedexError::Json`].
    pub async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> Result<T, PokedexError> {
        let response = self.call(uri).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                url: uri.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_image_bytes(&self, url: &str) -> Result<Vec<u8>, PokedexError> {
        if url.is_empty() {
            return Err(PokedexError::InvalidRecord("Empty sprite url".to_string()));
        }
        let response = self.call(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Get the API call history for debugging purposes
    pub fn get_api_call_history() -> Vec<ApiCall> {
        API_CALL_HISTORY
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn record_api_call(api_call: ApiCall) {
    if let Ok(mut history) = API_CALL_HISTORY.lock() {
        history.push(api_call);
        if history.len() > MAX_API_HISTORY {
            let excess = history.len() - MAX_API_HISTORY;
            history.drain(0..excess);
        }
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new().expect("Failed to create PokeApiClient")
    }
}
