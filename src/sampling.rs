//! Uniform selection without replacement

use rand::Rng;

/// Pick `k` candidates uniformly at random without replacement.
///
/// Returns fewer than `k` items when there are not enough candidates, and
/// nothing at all when `k <= 0`. Result order is draw order. Each pick is
/// removed by swapping in the last remaining candidate, so the leftover order
/// is scrambled; callers discard it.
pub fn sample_without_replacement<T, R: Rng + ?Sized>(
    rng: &mut R,
    mut candidates: Vec<T>,
    k: i64,
) -> Vec<T> {
    if k <= 0 || candidates.is_empty() {
        return Vec::new();
    }

    let count = usize::try_from(k).map_or(candidates.len(), |k| k.min(candidates.len()));
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.random_range(0..candidates.len());
        picked.push(candidates.swap_remove(index));
    }
    picked
}
