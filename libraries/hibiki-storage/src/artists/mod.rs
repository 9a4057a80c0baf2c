//! Artists vertical slice.
//!
//! Thin: the artist catalog is managed outside this engine, but track rows
//! reference artists for display, and the import path wants
//! find-or-create.

use hibiki_core::{error::Result, ArtistId};
use sqlx::SqlitePool;

/// Insert an artist, returning its id
pub async fn insert(pool: &SqlitePool, name: &str) -> Result<ArtistId> {
    let result = sqlx::query("INSERT INTO artists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Look an artist up by exact name
pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<ArtistId>> {
    let id = sqlx::query_scalar::<_, ArtistId>("SELECT id FROM artists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Find an artist by name, creating it when absent
pub async fn get_or_create(pool: &SqlitePool, name: &str) -> Result<ArtistId> {
    match get_by_name(pool, name).await? {
        Some(id) => Ok(id),
        None => insert(pool, name).await,
    }
}
