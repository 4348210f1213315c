use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{EsError, Result};
use crate::config::CollectorConfig;

/// Celkový timeout jednoho requestu
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout navázání spojení včetně TLS handshake
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
const POOL_MAX_IDLE_PER_HOST: usize = 10;

#[derive(Debug, Clone)]
pub struct EsClient {
    base_url: String,
    client: Client,
    username: Option<String>,
    password: Option<String>,
}

impl EsClient {
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        // Ořízni trailing slash
        let base_url = config.es_url.trim_end_matches('/').to_string();

        // Přeskočení ověření certifikátu má smysl jen se zapnutým SSL
        let insecure = config.ssl_enable && config.ssl_skip_verify;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(EsError::Client)?;

        let (username, password) = match config.credentials() {
            Some((username, password)) => (Some(username), Some(password)),
            None => (None, None),
        };

        Ok(Self {
            base_url,
            client,
            username,
            password,
        })
    }

    /// Univerzální GET request, odpověď dekóduje z JSON
    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json");

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            request = request.basic_auth(username, Some(password));
        }

        let request = request.build().map_err(|source| EsError::Request {
            url: url.clone(),
            source,
        })?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| EsError::Transport {
                url: url.clone(),
                source,
            })?;

        self.handle_response(&url, response).await
    }

    async fn handle_response<T>(&self, url: &str, response: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(EsError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|source| EsError::Transport {
            url: url.to_string(),
            source,
        })?;

        Ok(serde_json::from_slice(&body)?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
