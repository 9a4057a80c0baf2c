//! Hibiki - Playback Queue Management
//!
//! The ordered-sequence engine of the Hibiki media library: an in-memory
//! playback queue with position tracking, shuffle/unshuffle, insert-next
//! semantics, and queue-mode looping, driving an external audio player.
//!
//! This crate provides:
//! - [`QueueController`]: the single owner of the live queue, queue mode,
//!   source tag, and shuffle state
//! - [`PlayerHandle`]: the trait the host implements to bind an actual
//!   audio output (the engine never decodes audio itself)
//! - [`PlaybackEvent`] + [`Listeners`]: change notifications for UI layers
//! - A bridge from the library [`MutationRelay`] so external membership
//!   changes keep the live queue consistent
//!
//! # Architecture
//!
//! `hibiki-playback` is storage-agnostic: it never talks to a database.
//! Library mutations arrive as [`LibraryEvent`]s through the relay; audio
//! I/O happens behind [`PlayerHandle`]. The controller is built for a
//! single logical writer - hosts that mutate it from several tasks wrap it
//! in `Arc<tokio::sync::Mutex<_>>` (which is also what the relay bridge
//! expects).
//!
//! # Example
//!
//! ```rust,no_run
//! use hibiki_playback::{PlayerHandle, QueueController, QueueSource, Result};
//! use hibiki_core::Track;
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct MyPlayer;
//!
//! #[async_trait::async_trait]
//! impl PlayerHandle for MyPlayer {
//!     async fn play(&self, _file_path: &Path) -> Result<f64> { Ok(180.0) }
//!     async fn pause(&self) -> Result<()> { Ok(()) }
//!     async fn resume(&self) -> Result<()> { Ok(()) }
//!     async fn set_volume(&self, _volume: f64) -> Result<()> { Ok(()) }
//!     async fn seek(&self, _seconds: f64) -> Result<()> { Ok(()) }
//!     async fn current_time(&self) -> Result<f64> { Ok(0.0) }
//!     async fn duration(&self) -> Result<f64> { Ok(180.0) }
//!     async fn is_paused(&self) -> Result<bool> { Ok(false) }
//!     async fn volume(&self) -> Result<f64> { Ok(1.0) }
//! }
//!
//! # async fn example() -> Result<()> {
//! let mut controller = QueueController::new(Arc::new(MyPlayer));
//!
//! let track = Track {
//!     id: 1,
//!     title: "My Song".to_string(),
//!     artist: "Artist".to_string(),
//!     file_path: PathBuf::from("uploads/song.mp3"),
//!     duration: Duration::from_secs(180),
//! };
//!
//! let source = QueueSource::Playlist { id: 5, name: "Favorites".to_string() };
//! controller.play_from(vec![track.clone()], track, source).await?;
//! controller.play_next().await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`MutationRelay`]: hibiki_core::MutationRelay
//! [`LibraryEvent`]: hibiki_core::LibraryEvent

mod controller;
mod error;
mod events;
mod player;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use controller::QueueController;
pub use error::{PlaybackError, Result};
pub use events::{Listeners, PlaybackEvent};
pub use player::PlayerHandle;
pub use types::{QueueMode, QueueSource};
