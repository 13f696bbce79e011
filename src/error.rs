use thiserror::Error;

/// Library error type for kiosk operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP failure while talking to the photo backend.
    #[error("transport failure: {0}")]
    Transport(String),

    /// An image resource failed to load into a render buffer.
    #[error("resource load failure for {url}: {reason}")]
    ResourceLoad { url: String, reason: String },

    /// Internal desynchronization between the photo list and the display
    /// state, e.g. an index outside the list bounds.
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
