use thiserror::Error;

/// Main error type for the UptimeRobot → Cachet sync
#[derive(Error, Debug)]
pub enum SyncError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Network errors
    #[error("HTTP request {method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned status={status} body={body}")]
    Api {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    // Payload errors
    #[error("Invalid response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("UptimeRobot rejected the request (stat={stat}): {payload}")]
    ProviderRejected {
        stat: String,
        payload: serde_json::Value,
    },

    #[error("Invalid component status: {0}")]
    InvalidStatus(String),
}

impl SyncError {
    pub fn transport(method: &reqwest::Method, url: &str, source: reqwest::Error) -> Self {
        SyncError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        }
    }

    pub fn decode(url: &str, reason: impl Into<String>) -> Self {
        SyncError::Decode {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures raised before any payload could be interpreted.
    pub fn is_transport(&self) -> bool {
        matches!(self, SyncError::Transport { .. } | SyncError::Api { .. })
    }
}

/// Result type alias for SyncError
pub type Result<T> = std::result::Result<T, SyncError>;
