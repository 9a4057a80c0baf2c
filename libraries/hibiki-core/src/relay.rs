//! Library mutation relay
//!
//! Narrow event seam between the persistence layer and the live playback
//! queue. Storage publishes after a mutation commits; the queue controller
//! subscribes so its in-memory sequence stays consistent with the outside
//! world without polling.

use crate::types::{PlaylistId, Track, TrackId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// A committed library mutation relevant to live playback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LibraryEvent {
    /// A track joined a playlist's membership
    TrackAddedToPlaylist {
        /// Playlist that gained the track
        playlist_id: PlaylistId,
        /// The new member, with enough metadata to queue it
        track: Track,
    },

    /// A track left a playlist's membership
    TrackRemovedFromPlaylist {
        /// Playlist that lost the track
        playlist_id: PlaylistId,
        /// The removed member
        track_id: TrackId,
    },

    /// A track was deleted from the library entirely
    TrackDeleted {
        /// The deleted track
        track_id: TrackId,
    },

    /// A playlist was deleted
    PlaylistDeleted {
        /// The deleted playlist
        playlist_id: PlaylistId,
    },

    /// A playlist's display name changed
    PlaylistRenamed {
        /// The renamed playlist
        playlist_id: PlaylistId,
        /// The new name
        name: String,
    },
}

/// Receiver side of the relay.
///
/// Handlers run inline on the publisher's task, possibly before the
/// originating persistence call has fully returned. They must only touch
/// in-memory state and never call back into storage.
#[async_trait]
pub trait LibrarySubscriber: Send + Sync {
    /// React to a committed library mutation.
    async fn on_library_event(&self, event: &LibraryEvent);
}

/// Publish/subscribe registry for [`LibraryEvent`]s.
///
/// Delivery is synchronous and ordered: each subscriber is awaited in
/// registration order before `publish` returns. There is no queueing or
/// batching, so subscribers observe mutations in commit order.
#[derive(Default)]
pub struct MutationRelay {
    subscribers: Mutex<Vec<Arc<dyn LibrarySubscriber>>>,
}

impl MutationRelay {
    /// Create an empty relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for every subsequent event.
    pub fn subscribe(&self, subscriber: Arc<dyn LibrarySubscriber>) {
        self.subscribers
            .lock()
            .expect("relay subscriber list poisoned")
            .push(subscriber);
    }

    /// Deliver `event` to every subscriber, in registration order.
    pub async fn publish(&self, event: LibraryEvent) {
        // Snapshot the list so the lock is never held across an await.
        let subscribers: Vec<_> = self
            .subscribers
            .lock()
            .expect("relay subscriber list poisoned")
            .clone();

        for subscriber in &subscribers {
            subscriber.on_library_event(&event).await;
        }
    }
}
