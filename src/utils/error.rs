use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Football Data API key is required")]
    MissingCredential,

    #[error("API request failed: {status} {reason}")]
    Upstream { status: u16, reason: String },

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Username already taken: {username}")]
    DuplicateUser { username: String },
}

impl FeedError {
    /// True when the upstream API cannot be used at all for this call.
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, FeedError::MissingCredential)
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
