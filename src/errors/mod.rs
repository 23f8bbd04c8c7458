use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    // Parsing errors
    #[error("Sources file parsing failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Notification errors
    #[error("Notification failed: {0}")]
    Notification(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    pub fn selector(selector: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Transport-level failures are the only ones worth retrying
    pub fn is_transport(&self) -> bool {
        matches!(self, WatchError::Http(_) | WatchError::HttpStatus { .. })
    }
}

// Errors from the ServerChan library
impl From<serverchan::PushError> for WatchError {
    fn from(err: serverchan::PushError) -> Self {
        WatchError::Notification(err.to_string())
    }
}

pub type WatchResult<T> = Result<T, WatchError>;
