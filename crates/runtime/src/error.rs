//! Error types for the player runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the player runtime and facade.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller configuration defined the events slot, which belongs to the
    /// event proxy.
    #[error("Event handlers cannot be overwritten.")]
    EventsOverride,

    /// A string element identifier did not resolve to an existing host
    /// element.
    #[error("Element \"#{0}\" does not exist.")]
    ElementNotFound(String),

    /// The host failed to load the provider script.
    #[error("Failed to load provider script: {0}")]
    LoadFailed(String),

    /// The provider failed to construct the real player.
    #[error("Failed to construct player: {0}")]
    ConstructionFailed(String),

    /// Method name not present in the active catalog.
    #[error("Unknown player method: {0}")]
    UnknownMethod(String),

    /// The real player rejected a forwarded call.
    #[error("{name}: {message}")]
    Player {
        /// Provider-side error name (e.g. "TypeError").
        name: String,
        /// Human-readable error message.
        message: String,
    },

    /// A provider response did not match the shape the facade expects.
    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),

    /// Dispatch channel closed before the call completed.
    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for the synchronous construction-time failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::EventsOverride | Error::ElementNotFound(_))
    }

    /// Returns the provider-side error name if this is a forwarded failure.
    pub fn player_error_name(&self) -> Option<&str> {
        match self {
            Error::Player { name, .. } => Some(name),
            _ => None,
        }
    }
}
