//! Test helpers and fixtures for storage integration tests
//!
//! Databases are real `SQLite` files under a tempdir (not `:memory:`) so
//! migrations, foreign keys, and WAL behave the way production does.

#![allow(dead_code)]

use async_trait::async_trait;
use hibiki_core::{LibraryEvent, LibrarySubscriber, MutationRelay, NewTrack, PlaylistId, TrackId};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = hibiki_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        hibiki_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: create a track owned by a (created-on-demand) artist
pub async fn create_test_track(pool: &SqlitePool, title: &str) -> TrackId {
    let artist_id = hibiki_storage::artists::get_or_create(pool, "Test Artist")
        .await
        .expect("Failed to create test artist");

    let track = hibiki_storage::tracks::insert(
        pool,
        &NewTrack {
            title: title.to_string(),
            artist_id,
            file_path: PathBuf::from(format!("uploads/{}.mp3", title)),
            duration: Duration::from_secs(180),
        },
    )
    .await
    .expect("Failed to create test track");

    track.id
}

/// Test fixture: create a playlist
pub async fn create_test_playlist(pool: &SqlitePool, name: &str) -> PlaylistId {
    hibiki_storage::playlists::create(pool, name)
        .await
        .expect("Failed to create test playlist")
        .id
}

/// The (track_id, position) pairs of a playlist, ascending by position
pub async fn playlist_order(pool: &SqlitePool, playlist_id: PlaylistId) -> Vec<(TrackId, i64)> {
    hibiki_storage::playlists::tracks(pool, playlist_id)
        .await
        .expect("Failed to read playlist tracks")
        .into_iter()
        .map(|(track, position)| (track.id, position))
        .collect()
}

struct Recorder {
    events: Arc<Mutex<Vec<LibraryEvent>>>,
}

#[async_trait]
impl LibrarySubscriber for Recorder {
    async fn on_library_event(&self, event: &LibraryEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A relay with a recording subscriber attached
pub fn recording_relay() -> (MutationRelay, Arc<Mutex<Vec<LibraryEvent>>>) {
    let relay = MutationRelay::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    relay.subscribe(Arc::new(Recorder {
        events: events.clone(),
    }));
    (relay, events)
}
