//! Tracks vertical slice.
//!
//! The track catalog itself (upload, tag extraction) lives outside this
//! engine; these queries are the persistence tail the order store's read
//! join and the library-wide delete event need.

use crate::playlists;
use hibiki_core::{
    error::Result, HibikiError, LibraryEvent, MutationRelay, NewTrack, PlaylistId, Track, TrackId,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;
use std::time::Duration;

/// Insert a library track
pub async fn insert(pool: &SqlitePool, new_track: &NewTrack) -> Result<Track> {
    let result = sqlx::query(
        "INSERT INTO tracks (title, artist_id, file_path, duration_ms) VALUES (?, ?, ?, ?)",
    )
    .bind(&new_track.title)
    .bind(new_track.artist_id)
    .bind(new_track.file_path.to_string_lossy().to_string())
    .bind(new_track.duration.as_millis() as i64)
    .execute(pool)
    .await?;

    get(pool, result.last_insert_rowid()).await
}

/// Get a track by ID
pub async fn get(pool: &SqlitePool, id: TrackId) -> Result<Track> {
    let row = sqlx::query(
        r#"
        SELECT t.id, t.title, t.file_path, t.duration_ms, ar.name AS artist_name
        FROM tracks t
        LEFT JOIN artists ar ON t.artist_id = ar.id
        WHERE t.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(HibikiError::TrackNotFound(id))?;

    Ok(read_track(&row))
}

/// All library tracks, ordered by title
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.title, t.file_path, t.duration_ms, ar.name AS artist_name
        FROM tracks t
        LEFT JOIN artists ar ON t.artist_id = ar.id
        ORDER BY t.title
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(read_track).collect())
}

/// Delete a track from the library entirely.
///
/// Membership rows cascade away; the playlists that held the track are
/// re-compacted so the cascade leaves no position gaps. Fires
/// [`LibraryEvent::TrackDeleted`].
pub async fn delete(pool: &SqlitePool, relay: &MutationRelay, id: TrackId) -> Result<()> {
    let affected: Vec<PlaylistId> =
        sqlx::query_scalar("SELECT playlist_id FROM playlist_tracks WHERE track_id = ?")
            .bind(id)
            .fetch_all(pool)
            .await?;

    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(HibikiError::TrackNotFound(id));
    }

    for playlist_id in affected {
        playlists::normalize(pool, playlist_id).await?;
    }

    relay
        .publish(LibraryEvent::TrackDeleted { track_id: id })
        .await;
    Ok(())
}

fn read_track(row: &SqliteRow) -> Track {
    Track {
        id: row.get("id"),
        title: row.get("title"),
        artist: row
            .get::<Option<String>, _>("artist_name")
            .unwrap_or_default(),
        file_path: PathBuf::from(row.get::<String, _>("file_path")),
        duration: Duration::from_millis(row.get::<i64, _>("duration_ms").max(0) as u64),
    }
}
