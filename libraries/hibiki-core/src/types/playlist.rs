/// Playlist domain types
use crate::types::{PlaylistId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Persisted playlist membership row.
///
/// Once normalized, the `position` values of a playlist's rows are exactly
/// `0..n` with no gaps or duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Playlist ID
    pub playlist_id: PlaylistId,

    /// Track ID
    pub track_id: TrackId,

    /// Position in the playlist (0-indexed)
    pub position: i64,
}
