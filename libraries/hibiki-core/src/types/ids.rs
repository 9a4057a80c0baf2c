//! ID aliases for Hibiki entities
//!
//! All entities are keyed by database row ids.

/// Track identifier
pub type TrackId = i64;

/// Playlist identifier
pub type PlaylistId = i64;

/// Artist identifier
pub type ArtistId = i64;
