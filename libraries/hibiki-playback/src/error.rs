//! Error types for queue management

use hibiki_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A track that was explicitly required is missing from the supplied
    /// list
    #[error("Track not found in queue: {0}")]
    TrackNotFound(TrackId),

    /// Malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external player rejected or failed a command
    #[error("Player error: {0}")]
    Player(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
