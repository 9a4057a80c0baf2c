//! Playback change notifications
//!
//! The controller emits one event per observable state transition;
//! listeners (UI layers) react inline. Boolean and enum fields only emit
//! when the value actually changed.

use crate::types::QueueMode;
use hibiki_core::Track;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Events emitted by the queue controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// The current track changed (`None` when nothing is playing)
    TrackChanged(Option<Track>),

    /// Pause state flipped
    PauseChanged(bool),

    /// Loading state flipped
    ///
    /// `true` for the whole window while the player is loading a track.
    LoadingChanged(bool),

    /// Periodic position report from the poll timer, in seconds
    TimeTick(f64),

    /// Track duration became known, in seconds
    DurationChanged(f64),

    /// Queue mode changed
    QueueModeChanged(QueueMode),

    /// Queue membership or order changed
    QueueChanged,

    /// Shuffle flag flipped
    ShuffleChanged(bool),

    /// Volume changed
    VolumeChanged(f64),
}

type Listener = Box<dyn Fn(&PlaybackEvent) + Send + Sync>;

/// Registry of playback listeners.
///
/// Listeners are invoked synchronously, in registration order, on the task
/// that performed the mutation. There is no subscription state beyond the
/// registry itself.
#[derive(Default)]
pub struct Listeners {
    inner: Mutex<Vec<Listener>>,
}

impl Listeners {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every subsequent event.
    pub fn subscribe(&self, listener: impl Fn(&PlaybackEvent) + Send + Sync + 'static) {
        self.inner
            .lock()
            .expect("listener registry poisoned")
            .push(Box::new(listener));
    }

    /// Invoke every listener with `event`.
    pub fn emit(&self, event: &PlaybackEvent) {
        for listener in self
            .inner
            .lock()
            .expect("listener registry poisoned")
            .iter()
        {
            listener(event);
        }
    }
}
