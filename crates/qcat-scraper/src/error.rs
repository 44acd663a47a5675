use thiserror::Error;

/// Failures from a single request or from client construction.
///
/// Request-level variants never leave the crate's retry loop; callers of the
/// pipeline only ever see construction errors.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid value for header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ScraperError {
    /// Classifies a `reqwest` send/read failure into timeout or connection.
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScraperError::Timeout {
                url: url.to_owned(),
            }
        } else {
            ScraperError::Connection {
                url: url.to_owned(),
                source: err,
            }
        }
    }
}
