//! Core types for queue management

use hibiki_core::{ArtistId, PlaylistId};
use serde::{Deserialize, Serialize};

/// End-of-queue policy
///
/// Governs what advancing past the last track does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueMode {
    /// Stop when the queue ends
    NoRepeat,

    /// Loop the entire queue
    #[default]
    RepeatAll,

    /// Loop the current track only
    RepeatOne,
}

/// Where the live queue was built from
///
/// Used to decide whether a new "play from X" request should rebuild the
/// queue or merely reposition within the existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueueSource {
    /// No queue has been built
    None,

    /// A specific playlist
    Playlist {
        /// Originating playlist id
        id: PlaylistId,
        /// Cached display name
        name: String,
    },

    /// An artist's catalog
    Artist {
        /// Originating artist id
        id: ArtistId,
        /// Cached display name
        name: String,
    },

    /// The library-wide track listing
    Library,
}

impl QueueSource {
    /// Whether two sources name the same originating entity.
    ///
    /// Display names are cached cosmetics and do not participate.
    pub fn same_origin(&self, other: &QueueSource) -> bool {
        match (self, other) {
            (QueueSource::Playlist { id: a, .. }, QueueSource::Playlist { id: b, .. })
            | (QueueSource::Artist { id: a, .. }, QueueSource::Artist { id: b, .. }) => a == b,
            (QueueSource::Library, QueueSource::Library) => true,
            _ => false,
        }
    }

    /// Whether no queue source is active.
    pub fn is_none(&self) -> bool {
        matches!(self, QueueSource::None)
    }
}
