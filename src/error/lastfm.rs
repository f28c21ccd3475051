//! Last.fm API errors.

/// Errors produced by the Last.fm client.
///
/// Every public client method returns one of these; the renderer converts
/// them into a visible error fragment at its boundary.
#[derive(Debug, thiserror::Error)]
pub enum LastfmError {
    /// API key or username is missing; no request was attempted.
    #[error("Last.fm API is not configured. Please add your API key and username in the settings.")]
    NotConfigured,

    /// Network or timeout failure from the HTTP layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-200 status or an error payload.
    #[error("{message}")]
    Api { message: String },

    /// The payload did not have the expected shape.
    #[error("Invalid response from Last.fm API")]
    InvalidResponse(&'static str),
}

impl LastfmError {
    pub fn is_network_error(&self) -> bool {
        matches!(self, LastfmError::Transport(_))
    }

    /// Errors worth logging as faults. A missing configuration is an
    /// instructional state, not a fault.
    pub fn is_fault(&self) -> bool {
        !matches!(self, LastfmError::NotConfigured)
    }
}
