//! Queue controller - core orchestration
//!
//! Owns the live queue, queue mode and source, shuffle state, and the
//! handle to the external player. UI-level actions land here directly;
//! library membership changes arrive through the mutation relay bridge.
//!
//! The controller assumes a single logical writer. Hosts that mutate it
//! from several tasks (or that attach it to the relay) wrap it in
//! `Arc<tokio::sync::Mutex<_>>` so direct calls and relay delivery are
//! serialized against each other.

use crate::{
    error::{PlaybackError, Result},
    events::{Listeners, PlaybackEvent},
    player::PlayerHandle,
    queue::{Queue, RemoveOutcome},
    types::{QueueMode, QueueSource},
};
use async_trait::async_trait;
use hibiki_core::{LibraryEvent, LibrarySubscriber, MutationRelay, PlaylistId, Track, TrackId};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Interval between position polls while a track is playing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Central queue and playback orchestration.
///
/// Public surface: queue construction (`build_queue`, `play_from`),
/// navigation (`play_next`, `play_previous`), transport passthrough
/// (`pause`, `resume`, `set_volume`, `seek`), shuffle control, incremental
/// queue mutation (`add_play_next`, `add_track_to_queue`,
/// `change_queue_order`, `remove_track_from_queue`), `clear_state`, and
/// read-only observation of every piece of state, with change
/// notifications through [`Listeners`].
pub struct QueueController {
    player: Arc<dyn PlayerHandle>,
    listeners: Arc<Listeners>,

    queue: Queue,
    mode: QueueMode,
    source: QueueSource,

    current_track: Option<Track>,
    paused: bool,
    loading: bool,

    poll: Option<JoinHandle<()>>,
}

impl QueueController {
    /// Create a controller driving the given player.
    pub fn new(player: Arc<dyn PlayerHandle>) -> Self {
        Self {
            player,
            listeners: Arc::new(Listeners::new()),
            queue: Queue::new(),
            mode: QueueMode::default(),
            source: QueueSource::None,
            current_track: None,
            paused: true,
            loading: false,
            poll: None,
        }
    }

    // === Observation ===

    /// Register a listener for playback events.
    pub fn subscribe(&self, listener: impl Fn(&PlaybackEvent) + Send + Sync + 'static) {
        self.listeners.subscribe(listener);
    }

    /// The currently playing track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a track is currently loading
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The queued tracks, in play order
    pub fn queue_tracks(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Current position in the queue, if any
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Where the queue was built from
    pub fn source(&self) -> &QueueSource {
        &self.source
    }

    /// The active queue mode
    pub fn mode(&self) -> QueueMode {
        self.mode
    }

    /// Whether the queue is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// Set the queue mode.
    pub fn set_mode(&mut self, mode: QueueMode) {
        if self.mode != mode {
            self.mode = mode;
            self.listeners.emit(&PlaybackEvent::QueueModeChanged(mode));
        }
    }

    // === Queue construction ===

    /// Replace the queue with `tracks`, positioned at `start_track`.
    ///
    /// Fails with [`PlaybackError::TrackNotFound`] when `start_track` is
    /// not a member of `tracks` - the caller handed us inconsistent data.
    /// Shuffle state is discarded and `source` recorded.
    ///
    /// [`PlaybackError::TrackNotFound`]: crate::PlaybackError::TrackNotFound
    pub fn build_queue(
        &mut self,
        tracks: Vec<Track>,
        start_track: TrackId,
        source: QueueSource,
    ) -> Result<()> {
        let was_shuffled = self.queue.is_shuffled();
        self.queue.set_tracks(tracks, start_track)?;
        self.source = source;

        if was_shuffled {
            self.listeners.emit(&PlaybackEvent::ShuffleChanged(false));
        }
        self.listeners.emit(&PlaybackEvent::QueueChanged);
        Ok(())
    }

    /// Entry point for "user picked a track from view X".
    ///
    /// Rebuilds the queue when the request originates from a different
    /// source than the active one (or no usable queue exists); otherwise
    /// just repositions within the existing queue. Then starts playback of
    /// `track`.
    pub async fn play_from(
        &mut self,
        source_tracks: Vec<Track>,
        track: Track,
        source: QueueSource,
    ) -> Result<()> {
        let needs_rebuild = self.source.is_none()
            || !self.source.same_origin(&source)
            || self.queue.is_empty()
            || self.queue.position_of(track.id).is_none();

        if needs_rebuild {
            self.build_queue(source_tracks, track.id, source)?;
        } else {
            self.queue.jump_to(track.id);
        }

        self.play_track(track).await
    }

    // === Navigation ===

    /// Advance playback according to the queue mode.
    ///
    /// RepeatOne replays the current track; otherwise the index advances,
    /// wrapping to 0 at the end only under RepeatAll (under NoRepeat
    /// playback simply stops advancing). No-op when the queue is empty or
    /// no source is active.
    pub async fn play_next(&mut self) -> Result<()> {
        if self.queue.is_empty() || self.source.is_none() {
            return Ok(());
        }

        if self.mode == QueueMode::RepeatOne {
            if let Some(track) = self.queue.current_track().cloned() {
                self.play_track(track).await?;
            }
            return Ok(());
        }

        let Some(current) = self.queue.current_index() else {
            return Ok(());
        };

        let target = if current + 1 < self.queue.len() {
            Some(current + 1)
        } else if self.mode == QueueMode::RepeatAll {
            Some(0)
        } else {
            None
        };

        if let Some(target) = target {
            if let Some(track) = self.queue.track_at(target).cloned() {
                self.play_track(track).await?;
            }
        }
        Ok(())
    }

    /// Step playback backward.
    ///
    /// Wraps from the head to the last element unconditionally, regardless
    /// of queue mode - a deliberate asymmetry with [`Self::play_next`].
    pub async fn play_previous(&mut self) -> Result<()> {
        if self.queue.is_empty() || self.source.is_none() {
            return Ok(());
        }

        let Some(current) = self.queue.current_index() else {
            return Ok(());
        };

        let target = if current == 0 {
            self.queue.len() - 1
        } else {
            current - 1
        };

        if let Some(track) = self.queue.track_at(target).cloned() {
            self.play_track(track).await?;
        }
        Ok(())
    }

    // === Shuffle ===

    /// Shuffle the queue with a thread-local generator.
    pub fn shuffle(&mut self) {
        let mut rng = rand::thread_rng();
        self.shuffle_with(&mut rng);
    }

    /// Shuffle the queue with the supplied generator.
    ///
    /// The currently playing track stays put (at position 0 post-shuffle);
    /// the pre-shuffle order is snapshotted for [`Self::unshuffle`].
    /// No-op when already shuffled or the queue is empty.
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        if self.queue.shuffle(rng) {
            self.listeners.emit(&PlaybackEvent::ShuffleChanged(true));
            self.listeners.emit(&PlaybackEvent::QueueChanged);
        }
    }

    /// Restore the pre-shuffle order. No-op when not shuffled.
    pub fn unshuffle(&mut self) {
        if self.queue.unshuffle() {
            self.listeners.emit(&PlaybackEvent::ShuffleChanged(false));
            self.listeners.emit(&PlaybackEvent::QueueChanged);
        }
    }

    /// Flip the shuffle state.
    pub fn toggle_shuffle(&mut self) {
        if self.queue.is_shuffled() {
            self.unshuffle();
        } else {
            self.shuffle();
        }
    }

    // === Incremental queue mutation ===

    /// Queue `track` immediately after the current position.
    ///
    /// An already-queued track is moved, not duplicated.
    pub fn add_play_next(&mut self, track: Track) {
        if self.queue.insert_next(track) {
            self.listeners.emit(&PlaybackEvent::QueueChanged);
        }
    }

    /// Append `track` to the queue unless it is already a member.
    pub fn add_track_to_queue(&mut self, track: Track) {
        if self.queue.push(track) {
            self.listeners.emit(&PlaybackEvent::QueueChanged);
        }
    }

    /// Move a queued track to `new_index` (clamped into range).
    ///
    /// The track that was current before the move is still current after.
    /// Unknown ids are a silent no-op.
    pub fn change_queue_order(&mut self, track_id: TrackId, new_index: usize) {
        if self.queue.move_to(track_id, new_index) {
            self.listeners.emit(&PlaybackEvent::QueueChanged);
        }
    }

    /// Remove a track from the queue by id.
    ///
    /// Unknown ids are a silent no-op. Removing the currently playing
    /// track moves playback forward: the track now occupying the clamped
    /// index starts playing, or, when the queue emptied, the current track
    /// is cleared.
    pub async fn remove_track_from_queue(&mut self, track_id: TrackId) -> Result<()> {
        match self.queue.remove(track_id) {
            RemoveOutcome::NotQueued => Ok(()),
            RemoveOutcome::Removed => {
                self.listeners.emit(&PlaybackEvent::QueueChanged);
                Ok(())
            }
            RemoveOutcome::RemovedCurrent => {
                self.listeners.emit(&PlaybackEvent::QueueChanged);
                if let Some(track) = self.queue.current_track().cloned() {
                    self.play_track(track).await?;
                }
                Ok(())
            }
            RemoveOutcome::RemovedLast => {
                self.listeners.emit(&PlaybackEvent::QueueChanged);
                self.stop_poll();
                self.set_current_track(None);
                Ok(())
            }
        }
    }

    // === Transport ===

    /// Pause playback.
    pub async fn pause(&mut self) -> Result<()> {
        self.player.pause().await?;
        self.set_paused(true);
        self.stop_poll();
        Ok(())
    }

    /// Resume paused playback.
    pub async fn resume(&mut self) -> Result<()> {
        self.player.resume().await?;
        self.set_paused(false);
        self.start_poll();
        Ok(())
    }

    /// Set player volume in `[0.0, 1.0]`.
    pub async fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.player.set_volume(volume).await?;
        self.listeners.emit(&PlaybackEvent::VolumeChanged(volume));
        Ok(())
    }

    /// Seek to an absolute position in seconds.
    pub async fn seek(&mut self, seconds: f64) -> Result<()> {
        self.player.seek(seconds).await
    }

    /// Drop all queue and playback state.
    ///
    /// Empties the queue and snapshot, resets the mode to its default and
    /// the source to none, stops the poll, pauses the player (best
    /// effort), and notifies listeners that nothing is playing.
    pub async fn clear_state(&mut self) {
        let was_shuffled = self.queue.is_shuffled();
        self.queue.clear();
        self.source = QueueSource::None;
        self.stop_poll();

        if let Err(err) = self.player.pause().await {
            warn!(error = %err, "failed to pause player while clearing state");
        }
        self.set_paused(true);
        self.set_mode(QueueMode::default());
        if was_shuffled {
            self.listeners.emit(&PlaybackEvent::ShuffleChanged(false));
        }
        self.listeners.emit(&PlaybackEvent::QueueChanged);
        self.set_current_track(None);
    }

    // === Internals ===

    /// Start playback of `track` and surface the transition.
    ///
    /// The loading flag stays raised for the whole player suspension; a
    /// play failure leaves the controller paused and propagates.
    async fn play_track(&mut self, track: Track) -> Result<()> {
        if track.file_path.as_os_str().is_empty() {
            return Err(PlaybackError::InvalidInput(
                "track has no file path".to_string(),
            ));
        }

        self.queue.jump_to(track.id);
        self.set_current_track(Some(track.clone()));
        self.set_paused(true);
        self.set_loading(true);

        let played = self.player.play(&track.file_path).await;
        self.set_loading(false);
        let duration = played?;

        self.set_paused(false);
        self.listeners
            .emit(&PlaybackEvent::DurationChanged(duration));
        self.start_poll();
        debug!(track_id = track.id, duration, "playback started");
        Ok(())
    }

    fn set_current_track(&mut self, track: Option<Track>) {
        self.current_track = track.clone();
        self.listeners.emit(&PlaybackEvent::TrackChanged(track));
    }

    fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            self.listeners.emit(&PlaybackEvent::PauseChanged(paused));
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.listeners.emit(&PlaybackEvent::LoadingChanged(loading));
        }
    }

    /// (Re)start the position poll, replacing any running one.
    ///
    /// The poll is a UI-refresh convenience only: failures are logged and
    /// swallowed, never allowed to disturb playback.
    fn start_poll(&mut self) {
        self.stop_poll();

        let player = Arc::clone(&self.player);
        let listeners = Arc::clone(&self.listeners);
        self.poll = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                match player.current_time().await {
                    Ok(seconds) => listeners.emit(&PlaybackEvent::TimeTick(seconds)),
                    Err(err) => warn!(error = %err, "time poll failed"),
                }
            }
        }));
    }

    /// Stop the position poll. Unconditional and idempotent.
    fn stop_poll(&mut self) {
        if let Some(handle) = self.poll.take() {
            handle.abort();
        }
    }

    // === Library event handling ===

    /// Subscribe a shared controller to library membership changes.
    pub fn attach_to_relay(
        relay: &MutationRelay,
        controller: Arc<tokio::sync::Mutex<QueueController>>,
    ) {
        relay.subscribe(Arc::new(RelayBridge { controller }));
    }

    /// Apply a committed library mutation to the live queue.
    ///
    /// Runs on the same single-writer context as direct calls; it only
    /// touches in-memory state and never re-invokes storage.
    pub async fn handle_library_event(&mut self, event: &LibraryEvent) {
        match event {
            LibraryEvent::TrackAddedToPlaylist { playlist_id, track } => {
                if self.source_is_playlist(*playlist_id) {
                    self.add_track_to_queue(track.clone());
                }
            }
            LibraryEvent::TrackRemovedFromPlaylist {
                playlist_id,
                track_id,
            } => {
                if self.source_is_playlist(*playlist_id) {
                    let removing_current =
                        self.current_track.as_ref().map(|t| t.id) == Some(*track_id);
                    if removing_current {
                        if let Err(err) = self.play_next().await {
                            warn!(error = %err, "failed to advance past a removed track");
                        }
                    }
                    if let Err(err) = self.remove_track_from_queue(*track_id).await {
                        warn!(error = %err, "failed to drop a removed track from the queue");
                    }
                }
            }
            LibraryEvent::TrackDeleted { track_id } => {
                // Library-wide: purge regardless of source.
                if let Err(err) = self.remove_track_from_queue(*track_id).await {
                    warn!(error = %err, "failed to drop a deleted track from the queue");
                }
            }
            LibraryEvent::PlaylistDeleted { playlist_id } => {
                if self.source_is_playlist(*playlist_id) {
                    self.clear_state().await;
                }
            }
            LibraryEvent::PlaylistRenamed { playlist_id, name } => {
                if let QueueSource::Playlist { id, name: cached } = &mut self.source {
                    if id == playlist_id {
                        cached.clone_from(name);
                    }
                }
            }
        }
    }

    fn source_is_playlist(&self, playlist_id: PlaylistId) -> bool {
        matches!(&self.source, QueueSource::Playlist { id, .. } if *id == playlist_id)
    }
}

impl Drop for QueueController {
    fn drop(&mut self) {
        self.stop_poll();
    }
}

/// Connects a shared controller to the library mutation relay.
///
/// Locking the controller's mutex is what serializes relay delivery
/// against direct API calls.
struct RelayBridge {
    controller: Arc<tokio::sync::Mutex<QueueController>>,
}

#[async_trait]
impl LibrarySubscriber for RelayBridge {
    async fn on_library_event(&self, event: &LibraryEvent) {
        let mut controller = self.controller.lock().await;
        controller.handle_library_event(event).await;
    }
}
