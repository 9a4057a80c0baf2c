//! Queue randomization

use hibiki_core::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform random shuffle of a track slice (Fisher-Yates).
///
/// The generator is injected so permutations are reproducible under test.
pub fn shuffle_tracks<R: Rng>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}
