//! Error types for the wolt-watch control

/// Infrastructure errors: configuration, transport and host failures
#[derive(Debug, thiserror::Error)]
pub enum WoltWatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Home Assistant error: {0}")]
    Host(String),

    #[error("Registration error: {0}")]
    Registration(String),
}

/// Input rejected before any request is sent.
///
/// The display text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a restaurant slug")]
    MissingIdentifier,

    #[error("Please select a notification device")]
    MissingRecipient,

    #[error("Duration must be at least 60 seconds")]
    DurationTooShort,
}

/// Failure reported by the host while running a service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvocationError {
    pub message: String,
}

impl InvocationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<WoltWatchError> for InvocationError {
    fn from(err: WoltWatchError) -> Self {
        Self::new(err.to_string())
    }
}

/// Result type alias for wolt-watch operations
pub type Result<T> = std::result::Result<T, WoltWatchError>;
