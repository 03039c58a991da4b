//! Error types for the recap bot

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, BotError>;

/// All errors the bot can produce
#[derive(Error, Debug)]
pub enum BotError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an unexpected response
    #[error("API error: {0}")]
    Api(String),

    /// Upstream fetch exhausted all retries
    #[error("source unavailable after {attempts} attempts: {message}")]
    SourceUnavailable { attempts: u32, message: String },

    /// A single position or fill failed numeric/shape parsing
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Notification dispatch did not confirm success
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// Config file could not be read or deserialized
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Required setting missing or invalid
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Checkpoint read or write failed
    #[error("state persistence error: {0}")]
    State(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
