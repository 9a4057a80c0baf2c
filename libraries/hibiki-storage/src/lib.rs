//! Hibiki Storage
//!
//! `SQLite` persistence for the Hibiki media library, built around the
//! ordered-playlist store: per playlist, membership rows carry an integer
//! `position` that is kept dense (`0..n-1`, no gaps or duplicates) across
//! arbitrary appends, removals, and reorders.
//!
//! # Architecture
//!
//! - **Vertical slicing**: each feature owns its own queries
//!   ([`playlists`], [`tracks`], [`artists`])
//! - **Event seam**: mutating operations fire the
//!   [`MutationRelay`](hibiki_core::MutationRelay) after the change
//!   commits, so live playback state can follow along without polling
//! - **Transactional compaction**: the normalization pass runs inside a
//!   transaction per playlist - a reader never observes a partially
//!   renumbered ordering
//!
//! # Example
//!
//! ```rust,no_run
//! use hibiki_core::MutationRelay;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = hibiki_storage::create_pool("sqlite://hibiki.db").await?;
//! hibiki_storage::run_migrations(&pool).await?;
//!
//! let relay = MutationRelay::new();
//! let playlist = hibiki_storage::playlists::create(&pool, "Favorites").await?;
//! hibiki_storage::playlists::rename(&pool, &relay, playlist.id, "Evening").await?;
//! let ordered = hibiki_storage::playlists::tracks(&pool, playlist.id).await?;
//! # let _ = ordered;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod artists;
pub mod playlists;
pub mod tracks;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once when the application starts to bring the schema up to
/// date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://hibiki.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
