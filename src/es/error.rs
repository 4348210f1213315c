use thiserror::Error;

/// Chyby komunikace s Elasticsearch
#[derive(Debug, Error)]
pub enum EsError {
    /// HTTP klienta nelze sestavit (pouze při konstrukci)
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to create request for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Spojení, DNS, TLS, timeout nebo čtení těla odpovědi
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status code {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EsError>;
