//! Winner selection.

use rand::seq::SliceRandom;
use rand::Rng;

/// Picks `min(winner_count, candidates.len())` distinct candidates uniformly at random.
///
/// Order of the result is the draw order.
pub fn select_winners<T, R>(candidates: &[T], winner_count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let k = winner_count.min(candidates.len());
    if k == 0 {
        return Vec::new();
    }
    let mut pool = candidates.to_vec();
    pool.shuffle(rng);
    pool.truncate(k);
    pool
}
