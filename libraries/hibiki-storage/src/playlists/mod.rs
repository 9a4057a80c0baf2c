//! Playlists vertical slice: CRUD plus the ordered-membership store.
//!
//! Every playlist's membership rows carry an integer `position`. The
//! operations here preserve the dense `0..n-1` invariant: appends land at
//! the current count, removals run the compaction pass, reorders shift
//! the interval between the old and new slots. Reads always come back
//! ascending by position - that ordering is the externally visible play
//! order.
//!
//! Mutations fire the [`MutationRelay`] after they commit, so a live queue
//! built from the playlist can follow along.

use hibiki_core::{
    error::Result, HibikiError, LibraryEvent, MutationRelay, Playlist, PlaylistId, Track, TrackId,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Create a new playlist
pub async fn create(pool: &SqlitePool, name: &str) -> Result<Playlist> {
    if name.trim().is_empty() {
        return Err(HibikiError::invalid_input("playlist name must not be empty"));
    }

    let result = sqlx::query("INSERT INTO playlists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| HibikiError::storage("failed to read back created playlist"))
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, created_at FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(read_playlist).transpose()
}

/// Get all playlists
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query("SELECT id, name, created_at FROM playlists ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(read_playlist).collect()
}

/// Rename a playlist. Fires [`LibraryEvent::PlaylistRenamed`].
pub async fn rename(
    pool: &SqlitePool,
    relay: &MutationRelay,
    id: PlaylistId,
    name: &str,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(HibikiError::invalid_input("playlist name must not be empty"));
    }

    let result = sqlx::query("UPDATE playlists SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(HibikiError::PlaylistNotFound(id));
    }

    relay
        .publish(LibraryEvent::PlaylistRenamed {
            playlist_id: id,
            name: name.to_string(),
        })
        .await;
    Ok(())
}

/// Delete a playlist and its membership rows.
/// Fires [`LibraryEvent::PlaylistDeleted`].
pub async fn delete(pool: &SqlitePool, relay: &MutationRelay, id: PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(HibikiError::PlaylistNotFound(id));
    }

    relay
        .publish(LibraryEvent::PlaylistDeleted { playlist_id: id })
        .await;
    Ok(())
}

/// A playlist's tracks with their stored positions, ascending by position.
///
/// This is the order the queue controller receives when building a queue
/// from the playlist.
pub async fn tracks(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<(Track, i64)>> {
    let rows = sqlx::query(
        r#"
        SELECT
            t.id, t.title, t.file_path, t.duration_ms, pt.position,
            ar.name AS artist_name
        FROM playlist_tracks pt
        INNER JOIN tracks t ON pt.track_id = t.id
        LEFT JOIN artists ar ON t.artist_id = ar.id
        WHERE pt.playlist_id = ?
        ORDER BY pt.position
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let position: i64 = row.get("position");
            (read_joined_track(&row), position)
        })
        .collect())
}

/// Append a track to a playlist's membership.
///
/// New members land at the end of the stored order (`position` = current
/// row count); re-adding an existing member changes nothing. Fires
/// [`LibraryEvent::TrackAddedToPlaylist`] only when a row was inserted.
pub async fn add_track(
    pool: &SqlitePool,
    relay: &MutationRelay,
    playlist_id: PlaylistId,
    track: &Track,
) -> Result<()> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM playlist_tracks WHERE playlist_id = ?")
            .bind(playlist_id)
            .fetch_one(pool)
            .await?;

    let result = sqlx::query(
        r#"
        INSERT INTO playlist_tracks (playlist_id, track_id, position)
        VALUES (?, ?, ?)
        ON CONFLICT(playlist_id, track_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(track.id)
    .bind(count)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        relay
            .publish(LibraryEvent::TrackAddedToPlaylist {
                playlist_id,
                track: track.clone(),
            })
            .await;
    }
    Ok(())
}

/// Remove a track from a playlist and compact the remaining positions.
///
/// Absent membership is a silent no-op. Fires
/// [`LibraryEvent::TrackRemovedFromPlaylist`] only when a row was deleted.
pub async fn remove_track(
    pool: &SqlitePool,
    relay: &MutationRelay,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(playlist_id)
        .bind(track_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(());
    }

    normalize_in_tx(&mut tx, playlist_id).await?;
    tx.commit().await?;

    relay
        .publish(LibraryEvent::TrackRemovedFromPlaylist {
            playlist_id,
            track_id,
        })
        .await;
    Ok(())
}

/// Move a track to `new_position` within a playlist's stored order.
///
/// The target is clamped to `[0, n-1]`. The rows between the old and new
/// slots shift by one to keep the ordering dense; everything happens in a
/// single transaction. Not-a-member and already-in-place are silent
/// no-ops.
pub async fn reorder_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
    new_position: i64,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let Some(old_position) = sqlx::query_scalar::<_, i64>(
        "SELECT position FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?",
    )
    .bind(playlist_id)
    .bind(track_id)
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(());
    };

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM playlist_tracks WHERE playlist_id = ?")
            .bind(playlist_id)
            .fetch_one(&mut *tx)
            .await?;
    let new_position = new_position.clamp(0, count - 1);

    if new_position == old_position {
        return Ok(());
    }

    if old_position < new_position {
        // Moving toward the tail: the interval slides one slot down.
        sqlx::query(
            r#"
            UPDATE playlist_tracks
            SET position = position - 1
            WHERE playlist_id = ? AND position > ? AND position <= ?
            "#,
        )
        .bind(playlist_id)
        .bind(old_position)
        .bind(new_position)
        .execute(&mut *tx)
        .await?;
    } else {
        // Moving toward the head: the interval slides one slot up.
        sqlx::query(
            r#"
            UPDATE playlist_tracks
            SET position = position + 1
            WHERE playlist_id = ? AND position >= ? AND position < ?
            "#,
        )
        .bind(playlist_id)
        .bind(new_position)
        .bind(old_position)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE playlist_tracks SET position = ? WHERE playlist_id = ? AND track_id = ?")
        .bind(new_position)
        .bind(playlist_id)
        .bind(track_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Compact a playlist's positions to the dense `0..n-1` sequence.
///
/// Touches only rows whose stored position disagrees with their rank, so
/// running it on an already-dense playlist writes nothing. Returns the
/// number of rows rewritten.
pub async fn normalize(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let rewritten = normalize_in_tx(&mut tx, playlist_id).await?;
    tx.commit().await?;

    if rewritten > 0 {
        debug!(playlist_id, rewritten, "compacted playlist ordering");
    }
    Ok(rewritten)
}

/// Compact every playlist's positions.
///
/// Maintenance/repair entry point (e.g. after bulk deletes); each playlist
/// is normalized in its own transaction. Returns the total number of rows
/// rewritten.
pub async fn normalize_all(pool: &SqlitePool) -> Result<u64> {
    let ids: Vec<PlaylistId> = sqlx::query_scalar("SELECT id FROM playlists ORDER BY id")
        .fetch_all(pool)
        .await?;

    let mut rewritten = 0;
    for id in ids {
        rewritten += normalize(pool, id).await?;
    }
    Ok(rewritten)
}

/// The compaction pass itself, inside the caller's transaction.
///
/// Rows are ranked by `(position, track_id)`; the tie-break keeps the pass
/// deterministic when legacy rows share a position.
async fn normalize_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    playlist_id: PlaylistId,
) -> Result<u64> {
    let rows = sqlx::query(
        r#"
        SELECT track_id, position FROM playlist_tracks
        WHERE playlist_id = ?
        ORDER BY position, track_id
        "#,
    )
    .bind(playlist_id)
    .fetch_all(&mut **tx)
    .await?;

    let mut rewritten = 0;
    for (rank, row) in rows.iter().enumerate() {
        let position: i64 = row.get("position");
        let rank = rank as i64;
        if position != rank {
            let track_id: TrackId = row.get("track_id");
            sqlx::query(
                "UPDATE playlist_tracks SET position = ? WHERE playlist_id = ? AND track_id = ?",
            )
            .bind(rank)
            .bind(playlist_id)
            .bind(track_id)
            .execute(&mut **tx)
            .await?;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

// Row mapping helpers

fn read_playlist(row: &SqliteRow) -> Result<Playlist> {
    Ok(Playlist {
        id: row.get("id"),
        name: row.get("name"),
        created_at: chrono::DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| HibikiError::storage("invalid timestamp"))?,
    })
}

fn read_joined_track(row: &SqliteRow) -> Track {
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
