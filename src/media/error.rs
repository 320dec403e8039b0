use std::error::Error;
use std::fmt;

/// Error types specific to the media playback surface.
#[derive(Debug)]
pub enum MediaError {
    /// A transport command arrived while no source was loaded.
    NoSource,
    InvalidState(String),
    TaskJoinError(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NoSource => write!(f, "No media source loaded"),
            MediaError::InvalidState(s) => write!(f, "Invalid state: {}", s),
            MediaError::TaskJoinError(e) => write!(f, "Async task join error: {}", e),
        }
    }
}

impl Error for MediaError {}

impl From<tokio::task::JoinError> for MediaError {
    fn from(e: tokio::task::JoinError) -> Self {
        MediaError::TaskJoinError(e.to_string())
    }
}
