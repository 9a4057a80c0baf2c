//! Property-based tests for the queue controller
//!
//! Uses proptest to verify the ordering invariants across many random
//! inputs: shuffle round trips, current-track stability under reordering,
//! and membership uniqueness under arbitrary mutation sequences.

use async_trait::async_trait;
use hibiki_core::Track;
use hibiki_playback::{PlayerHandle, QueueController, QueueSource, Result};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ===== Helpers =====

/// Player that accepts everything; these properties never await it.
struct NullPlayer;

#[async_trait]
impl PlayerHandle for NullPlayer {
    async fn play(&self, _file_path: &Path) -> Result<f64> {
        Ok(0.0)
    }
    async fn pause(&self) -> Result<()> {
        Ok(())
    }
    async fn resume(&self) -> Result<()> {
        Ok(())
    }
    async fn set_volume(&self, _volume: f64) -> Result<()> {
        Ok(())
    }
    async fn seek(&self, _seconds: f64) -> Result<()> {
        Ok(())
    }
    async fn current_time(&self) -> Result<f64> {
        Ok(0.0)
    }
    async fn duration(&self) -> Result<f64> {
        Ok(0.0)
    }
    async fn is_paused(&self) -> Result<bool> {
        Ok(true)
    }
    async fn volume(&self) -> Result<f64> {
        Ok(1.0)
    }
}

fn create_track(id: i64) -> Track {
    Track {
        id,
        title: format!("Track {}", id),
        artist: "Test Artist".to_string(),
        file_path: PathBuf::from(format!("uploads/{}.mp3", id)),
        duration: Duration::from_secs(180),
    }
}

fn controller_with(ids: &[i64], start: i64) -> QueueController {
    let mut controller = QueueController::new(Arc::new(NullPlayer));
    let tracks: Vec<Track> = ids.iter().copied().map(create_track).collect();
    controller
        .build_queue(tracks, start, QueueSource::Library)
        .expect("start track is always a member");
    controller
}

fn queue_ids(controller: &QueueController) -> Vec<i64> {
    controller.queue_tracks().iter().map(|t| t.id).collect()
}

fn arbitrary_ids() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(1i64..1000, 1..40)
        .prop_map(|set| set.into_iter().collect::<Vec<i64>>())
}

// ===== Properties =====

proptest! {
    /// Shuffle then unshuffle reproduces the exact pre-shuffle order, and
    /// the current position follows the start track the whole way.
    #[test]
    fn shuffle_unshuffle_round_trip(ids in arbitrary_ids(), start_pick in any::<prop::sample::Index>(), seed in any::<u64>()) {
        let start = ids[start_pick.index(ids.len())];
        let mut controller = controller_with(&ids, start);
        let before = queue_ids(&controller);

        controller.shuffle_with(&mut StdRng::seed_from_u64(seed));
        prop_assert!(controller.is_shuffled());
        prop_assert_eq!(controller.current_index(), Some(0));
        prop_assert_eq!(controller.current_track().unwrap().id, start);

        controller.unshuffle();
        prop_assert!(!controller.is_shuffled());
        prop_assert_eq!(queue_ids(&controller), before);
        prop_assert_eq!(controller.current_track().unwrap().id, start);
    }

    /// A shuffled queue is a permutation: same membership, same length.
    #[test]
    fn shuffle_preserves_membership(ids in arbitrary_ids(), start_pick in any::<prop::sample::Index>(), seed in any::<u64>()) {
        let start = ids[start_pick.index(ids.len())];
        let mut controller = controller_with(&ids, start);

        controller.shuffle_with(&mut StdRng::seed_from_u64(seed));

        let shuffled: HashSet<i64> = queue_ids(&controller).into_iter().collect();
        let original: HashSet<i64> = ids.iter().copied().collect();
        prop_assert_eq!(shuffled, original);
        prop_assert_eq!(controller.queue_tracks().len(), ids.len());
    }

    /// The track that was current before a move is still current after,
    /// wherever it went.
    #[test]
    fn reorder_keeps_the_current_track_current(
        ids in arbitrary_ids(),
        start_pick in any::<prop::sample::Index>(),
        moves in prop::collection::vec((any::<prop::sample::Index>(), 0usize..50), 0..20),
    ) {
        let start = ids[start_pick.index(ids.len())];
        let mut controller = controller_with(&ids, start);

        for (pick, target) in moves {
            let moved = ids[pick.index(ids.len())];
            controller.change_queue_order(moved, target);

            prop_assert_eq!(controller.current_track().unwrap().id, start);
            let index = controller.current_index().unwrap();
            prop_assert_eq!(controller.queue_tracks()[index].id, start);
        }
    }

    /// Arbitrary insert/append/move sequences never create duplicates and
    /// never push the current index out of range.
    #[test]
    fn mutations_preserve_uniqueness_and_index_validity(
        ids in arbitrary_ids(),
        start_pick in any::<prop::sample::Index>(),
        ops in prop::collection::vec((0u8..3, 1i64..1000, 0usize..50), 0..30),
    ) {
        let start = ids[start_pick.index(ids.len())];
        let mut controller = controller_with(&ids, start);

        for (op, id, target) in ops {
            match op {
                0 => controller.add_play_next(create_track(id)),
                1 => controller.add_track_to_queue(create_track(id)),
                _ => controller.change_queue_order(id, target),
            }

            let queued = queue_ids(&controller);
            let unique: HashSet<i64> = queued.iter().copied().collect();
            prop_assert_eq!(unique.len(), queued.len(), "duplicate track id queued");

            let index = controller.current_index().unwrap();
            prop_assert!(index < queued.len());
        }
    }
}
