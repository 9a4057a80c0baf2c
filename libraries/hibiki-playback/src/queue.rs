//! Live playback queue
//!
//! Ordered sequence of tracks with a tracked current position and a saved
//! pre-shuffle snapshot. Membership is a set keyed by track id even though
//! the representation is a sequence. All index bookkeeping for inserts,
//! moves, and removals lives here; playback consequences live in the
//! controller.

use crate::error::{PlaybackError, Result};
use crate::shuffle::shuffle_tracks;
use hibiki_core::{Track, TrackId};
use rand::Rng;

/// Outcome of removing a track, so the controller can decide the playback
/// consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The id was not queued
    NotQueued,

    /// Removed a track other than the current one
    Removed,

    /// Removed the current track; `current_index` now points at the next
    /// track to play
    RemovedCurrent,

    /// Removed the current track and the queue is now empty
    RemovedLast,
}

/// The in-memory play order.
///
/// Invariants:
/// - no track id appears twice
/// - `current` is in range whenever it is `Some`
/// - the snapshot is non-empty iff `shuffled`
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current: Option<usize>,

    /// Original order before shuffle (for restoring)
    original_order: Vec<Track>,
    shuffled: bool,
}

impl Queue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale and position it at `start`.
    ///
    /// Duplicate ids in the input keep their first occurrence. Fails when
    /// `start` is not a member of the supplied tracks. Shuffle state is
    /// discarded.
    pub fn set_tracks(&mut self, tracks: Vec<Track>, start: TrackId) -> Result<()> {
        let mut deduped: Vec<Track> = Vec::with_capacity(tracks.len());
        for track in tracks {
            if !deduped.iter().any(|t| t.id == track.id) {
                deduped.push(track);
            }
        }

        let Some(index) = deduped.iter().position(|t| t.id == start) else {
            return Err(PlaybackError::TrackNotFound(start));
        };

        self.tracks = deduped;
        self.current = Some(index);
        self.original_order.clear();
        self.shuffled = false;
        Ok(())
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The queued tracks, in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The saved pre-shuffle order (empty unless shuffled)
    pub fn original_order(&self) -> &[Track] {
        &self.original_order
    }

    /// Current position, if any
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Track at the current position, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Track at `index`
    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Position of `id` in the queue
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Whether the queue is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Move the current position to `id`. Returns false when not queued.
    pub fn jump_to(&mut self, id: TrackId) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.current = Some(index);
                true
            }
            None => false,
        }
    }

    /// Insert `track` immediately after the current position, moving it
    /// there if it is already queued.
    ///
    /// Returns true when the queue changed. Already in the next slot, or
    /// being the current track itself, is a no-op.
    pub fn insert_next(&mut self, track: Track) -> bool {
        let slot_after_current = self.current.map_or(0, |i| i + 1);

        if let Some(existing) = self.position_of(track.id) {
            if existing == slot_after_current || Some(existing) == self.current {
                return false;
            }

            self.tracks.remove(existing);
            if let Some(current) = self.current {
                if existing < current {
                    self.current = Some(current - 1);
                }
            }
        }

        let insert_at = self
            .current
            .map_or(0, |i| i + 1)
            .min(self.tracks.len());
        self.tracks.insert(insert_at, track.clone());
        self.mirror_into_snapshot(track);
        true
    }

    /// Append `track` unless its id is already queued.
    ///
    /// Returns true when the queue changed. Appended to the snapshot too
    /// when shuffled.
    pub fn push(&mut self, track: Track) -> bool {
        if self.position_of(track.id).is_some() {
            return false;
        }
        self.tracks.push(track.clone());
        if self.shuffled {
            self.original_order.push(track);
        }
        true
    }

    /// Move an existing member to `new_index` (clamped into range).
    ///
    /// Returns true when the queue changed; unknown ids are a silent
    /// no-op. The current position is translated so the track that was
    /// current stays current.
    pub fn move_to(&mut self, id: TrackId, new_index: usize) -> bool {
        let Some(from) = self.position_of(id) else {
            return false;
        };
        let to = new_index.min(self.tracks.len() - 1);
        if from == to {
            return false;
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track.clone());

        if let Some(current) = self.current {
            self.current = Some(if current == from {
                to
            } else if from < current && current <= to {
                current - 1
            } else if to <= current && current < from {
                current + 1
            } else {
                current
            });
        }

        self.mirror_into_snapshot(track);
        true
    }

    /// Remove a track by id.
    ///
    /// Unknown ids are a silent no-op. When the removed slot preceded the
    /// current position the position shifts down; when it *was* the
    /// current position the index is clamped back into range (or cleared
    /// if the queue emptied) and the outcome tells the controller to act.
    pub fn remove(&mut self, id: TrackId) -> RemoveOutcome {
        let Some(index) = self.position_of(id) else {
            return RemoveOutcome::NotQueued;
        };

        self.tracks.remove(index);
        self.original_order.retain(|t| t.id != id);
        if self.original_order.is_empty() {
            self.shuffled = false;
        }

        match self.current {
            Some(current) if index < current => {
                self.current = Some(current - 1);
                RemoveOutcome::Removed
            }
            Some(current) if index == current => {
                if self.tracks.is_empty() {
                    self.current = None;
                    RemoveOutcome::RemovedLast
                } else {
                    self.current = Some(current.min(self.tracks.len() - 1));
                    RemoveOutcome::RemovedCurrent
                }
            }
            _ => RemoveOutcome::Removed,
        }
    }

    /// Shuffle the queue, keeping the current track at position 0.
    ///
    /// The full pre-shuffle order is snapshotted for [`Queue::unshuffle`].
    /// Returns false when already shuffled or empty.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.shuffled || self.tracks.is_empty() {
            return false;
        }

        self.original_order = self.tracks.clone();

        // The playing track never moves out from under the listener.
        let playing = self.current.map(|i| self.tracks.remove(i));
        shuffle_tracks(&mut self.tracks, rng);
        if let Some(track) = playing {
            self.tracks.insert(0, track);
            self.current = Some(0);
        }

        self.shuffled = true;
        true
    }

    /// Restore the pre-shuffle order.
    ///
    /// The current position follows the current track into the restored
    /// order, falling back to 0 when it is no longer present. Returns
    /// false when not shuffled.
    pub fn unshuffle(&mut self) -> bool {
        if !self.shuffled {
            return false;
        }

        let playing = self.current_track().map(|t| t.id);
        self.tracks = std::mem::take(&mut self.original_order);
        self.current = playing.map(|id| self.position_of(id).unwrap_or(0));
        self.shuffled = false;
        true
    }

    /// Empty the queue and reset all state
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
        self.original_order.clear();
        self.shuffled = false;
    }

    /// Mirror an insert or move into the pre-shuffle snapshot.
    ///
    /// The track lands right after wherever the current track sits in the
    /// snapshot, or at the end when the current track is absent there (or
    /// there is no current track). Moving the current track itself leaves
    /// its snapshot slot alone.
    fn mirror_into_snapshot(&mut self, track: Track) {
        if !self.shuffled {
            return;
        }

        let current_id = self.current_track().map(|t| t.id);
        if current_id == Some(track.id) {
            if !self.original_order.iter().any(|t| t.id == track.id) {
                self.original_order.push(track);
            }
            return;
        }

        self.original_order.retain(|t| t.id != track.id);
        let at = current_id
            .and_then(|id| self.original_order.iter().position(|t| t.id == id))
            .map_or(self.original_order.len(), |i| i + 1);
        self.original_order.insert(at, track);
    }
}
