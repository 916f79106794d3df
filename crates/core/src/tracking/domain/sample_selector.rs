use crate::shared::constants::REPRESENTATIVE_SAMPLES;

/// Picks the early / middle / late items of a track's sample buffer.
///
/// Fewer than three items are returned unchanged; otherwise indices
/// `0`, `n / 2` and `n - 1` are taken, in that order.
pub fn select_representative<T>(samples: &[T]) -> Vec<&T> {
    let n = samples.len();
    if n < REPRESENTATIVE_SAMPLES {
        return samples.iter().collect();
    }
    [0, n / 2, n - 1].iter().map(|&i| &samples[i]).collect()
}
