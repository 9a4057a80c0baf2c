//! Player handle abstraction
//!
//! The engine never decodes audio. It commands an external player by file
//! path and polls it for time and duration; everything else about audio
//! output is the host's business.

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// External audio player driven by the queue controller.
///
/// Implementations bind to whatever the host provides: an HTML audio
/// element behind JS interop, a native output, or a test fake. Every call
/// suspends until the player acknowledges it; `play` in particular must
/// not resolve before metadata is loaded and playback has begun, because
/// the controller keeps its loading flag raised for exactly that window.
///
/// The host is responsible for wiring the player's "track finished"
/// signal to [`QueueController::play_next`].
///
/// [`QueueController::play_next`]: crate::QueueController::play_next
#[async_trait]
pub trait PlayerHandle: Send + Sync {
    /// Start playback of the given file.
    ///
    /// Resolves with the track duration in seconds.
    async fn play(&self, file_path: &Path) -> Result<f64>;

    /// Pause playback.
    async fn pause(&self) -> Result<()>;

    /// Resume paused playback.
    async fn resume(&self) -> Result<()>;

    /// Set volume in `[0.0, 1.0]`.
    async fn set_volume(&self, volume: f64) -> Result<()>;

    /// Seek to an absolute position in seconds.
    async fn seek(&self, seconds: f64) -> Result<()>;

    /// Current playback position in seconds.
    async fn current_time(&self) -> Result<f64>;

    /// Duration of the loaded track in seconds.
    async fn duration(&self) -> Result<f64>;

    /// Whether the player is paused.
    async fn is_paused(&self) -> Result<bool>;

    /// Current volume in `[0.0, 1.0]`.
    async fn volume(&self) -> Result<f64>;
}
