//! Integration tests for the playlists vertical slice
//!
//! Covers CRUD, the append/remove membership operations, the relay events
//! they fire, and the ascending-position read contract.

mod test_helpers;

use hibiki_core::{HibikiError, LibraryEvent};
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let playlist = hibiki_storage::playlists::create(pool, "My Favorites")
        .await
        .expect("Failed to create playlist");

    assert_eq!(playlist.name, "My Favorites");

    let retrieved = hibiki_storage::playlists::get_by_id(pool, playlist.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(retrieved.id, playlist.id);
    assert_eq!(retrieved.name, "My Favorites");
}

#[tokio::test]
async fn test_get_all_playlists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_playlist(pool, "B Playlist").await;
    create_test_playlist(pool, "A Playlist").await;

    let playlists = hibiki_storage::playlists::get_all(pool).await.unwrap();

    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].name, "A Playlist");
    assert_eq!(playlists[1].name, "B Playlist");
}

#[tokio::test]
async fn test_rename_updates_and_fires_event() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, events) = recording_relay();

    let playlist_id = create_test_playlist(pool, "Old Name").await;

    hibiki_storage::playlists::rename(pool, &relay, playlist_id, "New Name")
        .await
        .unwrap();

    let renamed = hibiki_storage::playlists::get_by_id(pool, playlist_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "New Name");

    let events = events.lock().unwrap();
    assert_eq!(
        events.as_slice(),
        [LibraryEvent::PlaylistRenamed {
            playlist_id,
            name: "New Name".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, _) = recording_relay();

    let result = hibiki_storage::playlists::create(pool, "   ").await;
    assert!(matches!(result, Err(HibikiError::InvalidInput(_))));

    let playlist_id = create_test_playlist(pool, "Fine").await;
    let result = hibiki_storage::playlists::rename(pool, &relay, playlist_id, "").await;
    assert!(matches!(result, Err(HibikiError::InvalidInput(_))));
}

#[tokio::test]
async fn test_rename_missing_playlist_fails() {
    let test_db = TestDb::new().await;
    let (relay, events) = recording_relay();

    let result = hibiki_storage::playlists::rename(test_db.pool(), &relay, 999, "X").await;

    assert!(matches!(result, Err(HibikiError::PlaylistNotFound(999))));
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_playlist_cascades_membership() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, events) = recording_relay();

    let playlist_id = create_test_playlist(pool, "Doomed").await;
    let track_id = create_test_track(pool, "Track 1").await;
    let track = hibiki_storage::tracks::get(pool, track_id).await.unwrap();
    hibiki_storage::playlists::add_track(pool, &relay, playlist_id, &track)
        .await
        .unwrap();

    hibiki_storage::playlists::delete(pool, &relay, playlist_id)
        .await
        .unwrap();

    assert!(hibiki_storage::playlists::get_by_id(pool, playlist_id)
        .await
        .unwrap()
        .is_none());

    let orphan_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM playlist_tracks WHERE playlist_id = ?")
            .bind(playlist_id)
            .fetch_one(pool)
            .await
            .unwrap();
    assert_eq!(orphan_rows, 0);

    let events = events.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(LibraryEvent::PlaylistDeleted { playlist_id: id }) if *id == playlist_id
    ));
}

#[tokio::test]
async fn test_add_tracks_appends_in_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, events) = recording_relay();

    let playlist_id = create_test_playlist(pool, "Ordered").await;
    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;

    for id in [a, b, c] {
        let track = hibiki_storage::tracks::get(pool, id).await.unwrap();
        hibiki_storage::playlists::add_track(pool, &relay, playlist_id, &track)
            .await
            .unwrap();
    }

    assert_eq!(
        playlist_order(pool, playlist_id).await,
        vec![(a, 0), (b, 1), (c, 2)]
    );

    let added: Vec<_> = events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, LibraryEvent::TrackAddedToPlaylist { .. }))
        .cloned()
        .collect();
    assert_eq!(added.len(), 3);
}

#[tokio::test]
async fn test_re_adding_a_member_changes_nothing() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, events) = recording_relay();

    let playlist_id = create_test_playlist(pool, "Set Semantics").await;
    let a = create_test_track(pool, "A").await;
    let track = hibiki_storage::tracks::get(pool, a).await.unwrap();

    hibiki_storage::playlists::add_track(pool, &relay, playlist_id, &track)
        .await
        .unwrap();
    hibiki_storage::playlists::add_track(pool, &relay, playlist_id, &track)
        .await
        .unwrap();

    assert_eq!(playlist_order(pool, playlist_id).await, vec![(a, 0)]);
    // Only the first insert fired an event.
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_track_compacts_positions() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, events) = recording_relay();

    let playlist_id = create_test_playlist(pool, "Compacting").await;
    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;
    for id in [a, b, c] {
        let track = hibiki_storage::tracks::get(pool, id).await.unwrap();
        hibiki_storage::playlists::add_track(pool, &relay, playlist_id, &track)
            .await
            .unwrap();
    }

    hibiki_storage::playlists::remove_track(pool, &relay, playlist_id, b)
        .await
        .unwrap();

    // (A,0)(B,1)(C,2) minus B leaves (A,0)(C,1).
    assert_eq!(
        playlist_order(pool, playlist_id).await,
        vec![(a, 0), (c, 1)]
    );

    let events = events.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(LibraryEvent::TrackRemovedFromPlaylist { track_id, .. }) if *track_id == b
    ));
}

#[tokio::test]
async fn test_removing_a_non_member_is_silent() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, events) = recording_relay();

    let playlist_id = create_test_playlist(pool, "Quiet").await;
    let stranger = create_test_track(pool, "Stranger").await;

    hibiki_storage::playlists::remove_track(pool, &relay, playlist_id, stranger)
        .await
        .unwrap();

    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_read_contract_follows_reorders() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let (relay, _events) = recording_relay();

    let playlist_id = create_test_playlist(pool, "Reordered").await;
    let a = create_test_track(pool, "A").await;
    let b = create_test_track(pool, "B").await;
    let c = create_test_track(pool, "C").await;
    for id in [a, b, c] {
        let track = hibiki_storage::tracks::get(pool, id).await.unwrap();
        hibiki_storage::playlists::add_track(pool, &relay, playlist_id, &track)
            .await
            .unwrap();
    }

    hibiki_storage::playlists::reorder_track(pool, playlist_id, c, 0)
        .await
        .unwrap();

    let titles: Vec<String> = hibiki_storage::playlists::tracks(pool, playlist_id)
        .await
        .unwrap()
        .into_iter()
        .map(|(track, _)| track.title)
        .collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
}
