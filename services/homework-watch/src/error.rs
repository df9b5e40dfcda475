//! Error types for the homework watcher

/// Errors that can occur in the homework watcher
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("API returned status {status}")]
    Status { status: u16, body: String },

    #[error("Failed to decode API response: {0}")]
    Decode(String),

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Missing key in response: {0}")]
    MissingKey(String),

    #[error("Missing or invalid current_date: {0}")]
    MissingCursor(String),

    #[error("Undocumented homework status: {0}")]
    UnrecognizedStatus(String),

    #[error("Notifier error: {0}")]
    Notifier(String),
}

impl WatchError {
    /// Whether this error is reported to the chat when it occurs during polling.
    ///
    /// A missing cursor only stalls forward progress of `from_date`, so it is
    /// logged and never sent.
    pub fn is_notifiable(&self) -> bool {
        !matches!(self, WatchError::MissingCursor(_))
    }
}

/// Result type alias for homework watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;
