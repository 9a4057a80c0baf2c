/// Track domain type
use crate::types::{ArtistId, TrackId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A library track as the playback engine sees it.
///
/// Owned by the library layer and immutable from the engine's point of
/// view. Queue membership is always decided by `id`, never by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist display name
    pub artist: String,

    /// File path handed to the player
    pub file_path: PathBuf,

    /// Track duration
    pub duration: Duration,
}

/// Fields for inserting a new library track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrack {
    /// Track title
    pub title: String,

    /// Owning artist
    pub artist_id: ArtistId,

    /// File path handed to the player
    pub file_path: PathBuf,

    /// Track duration
    pub duration: Duration,
}
