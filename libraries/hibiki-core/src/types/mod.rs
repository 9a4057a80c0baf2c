//! Domain types shared across the Hibiki crates

mod ids;
mod playlist;
mod track;

pub use ids::{ArtistId, PlaylistId, TrackId};
pub use playlist::{Playlist, PlaylistEntry};
pub use track::{NewTrack, Track};
