use rand::seq::index;
use rand::Rng;

pub const MAX_SUGGESTIONS: u64 = 3;

/// Picks distinct zero-based hit offsets for one request.
///
/// Offsets come from `[0, hit_count - 1)`. More than three hits give three
/// offsets, otherwise one. A single hit still yields offset 0.
pub fn sample_offsets<R: Rng + ?Sized>(hit_count: u64, rng: &mut R) -> Vec<u64> {
    if hit_count == 0 {
        return Vec::new();
    }
    let range = (hit_count - 1).max(1) as usize;
    let amount = if hit_count > MAX_SUGGESTIONS {
        MAX_SUGGESTIONS as usize
    } else {
        1
    };
    index::sample(rng, range, amount)
        .into_iter()
        .map(|i| i as u64)
        .collect()
}
