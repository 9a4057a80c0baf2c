//! Hibiki Core
//!
//! Shared kernel for the Hibiki media-library engine.
//!
//! This crate provides the foundational building blocks used by the
//! playback and storage layers:
//! - **Domain Types**: `Track`, `Playlist`, `PlaylistEntry`, id aliases
//! - **Error Handling**: Unified `HibikiError` and `Result` types
//! - **Mutation Relay**: the event seam through which committed library
//!   changes reach the live playback queue
//!
//! # Architecture
//!
//! `hibiki-playback` and `hibiki-storage` both depend on this crate and
//! never on each other. Storage publishes [`LibraryEvent`]s through the
//! [`MutationRelay`]; the queue controller in the playback crate
//! subscribes to them.
//!
//! # Example
//!
//! ```rust
//! use hibiki_core::{Track, TrackId};
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! let track = Track {
//!     id: 1,
//!     title: "My Favorite Song".to_string(),
//!     artist: "Some Artist".to_string(),
//!     file_path: PathBuf::from("uploads/song.mp3"),
//!     duration: Duration::from_secs(180),
//! };
//! let id: TrackId = track.id;
//! assert_eq!(id, 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod relay;
pub mod types;

// Re-export commonly used types
pub use error::{HibikiError, Result};
pub use relay::{LibraryEvent, LibrarySubscriber, MutationRelay};
pub use types::{ArtistId, NewTrack, Playlist, PlaylistEntry, PlaylistId, Track, TrackId};
