//! Count normalization for display opacity
//!
//! Opacity is scaled against a robust reference count (the mean of the
//! largest few counts) instead of the single maximum, so one dominant color
//! does not wash out the rest.

use crate::constants::binning;

/// Reference count for tone-map opacity
///
/// Mean of the 10 largest non-zero counts, or the largest one when fewer than
/// 10 exist, or 1 when there are none.
pub fn tone_map_norm<I>(counts: I) -> f64
where
    I: IntoIterator<Item = u64>,
{
    let sorted = sorted_nonzero(counts);
    let top = binning::TONE_MAP_NORM_TOP;
    if sorted.len() >= top {
        sorted[..top].iter().sum::<u64>() as f64 / top as f64
    } else if let Some(&max) = sorted.first() {
        max as f64
    } else {
        1.0
    }
}

/// Opacity of a tone-map bin; 0 for empty bins, at least 0.12 otherwise
pub fn tone_map_opacity(count: u64, norm: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let min = binning::TONE_MAP_MIN_ALPHA;
    (min + (1.0 - min) * (count as f64 / norm).sqrt()).min(1.0)
}

/// Reference count for scatter opacity: integer mean of the 5 largest counts
///
/// Never below 1.
pub fn scatter_max_count<I>(counts: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let sorted = sorted_nonzero(counts);
    let top = &sorted[..sorted.len().min(binning::SCATTER_NORM_TOP)];
    if top.is_empty() {
        return 1;
    }
    (top.iter().sum::<u64>() / top.len() as u64).max(1)
}

/// `min(1, sqrt(count / max_count))`
pub fn scatter_opacity(count: u64, max_count: u64) -> f64 {
    (count as f64 / max_count.max(1) as f64).sqrt().min(1.0)
}

fn sorted_nonzero<I>(counts: I) -> Vec<u64>
where
    I: IntoIterator<Item = u64>,
{
    let mut sorted: Vec<u64> = counts.into_iter().filter(|&c| c > 0).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_map_norm_top_ten() {
        let counts: Vec<u64> = (1..=12).map(|i| i * 10).collect();
        // 30..=120 → mean 75
        assert!((tone_map_norm(counts) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_tone_map_norm_fallbacks() {
        assert_eq!(tone_map_norm(vec![3, 9, 4]), 9.0);
        assert_eq!(tone_map_norm(Vec::new()), 1.0);
        assert_eq!(tone_map_norm(vec![0, 0]), 1.0);
    }

    #[test]
    fn test_tone_map_opacity() {
        assert_eq!(tone_map_opacity(0, 10.0), 0.0);
        assert!((tone_map_opacity(10, 10.0) - 1.0).abs() < 1e-12);
        assert_eq!(tone_map_opacity(1000, 10.0), 1.0);
        let faint = tone_map_opacity(1, 10_000.0);
        assert!((faint - (0.12 + 0.88 * 0.01)).abs() < 1e-12);
    }

    #[test]
    fn test_scatter_max_count() {
        assert_eq!(scatter_max_count(vec![100, 1, 90, 80, 70, 60, 2]), 80);
        assert_eq!(scatter_max_count(vec![5, 4]), 4);
        assert_eq!(scatter_max_count(Vec::new()), 1);
    }

    #[test]
    fn test_scatter_opacity() {
        assert!((scatter_opacity(25, 100) - 0.5).abs() < 1e-12);
        assert_eq!(scatter_opacity(400, 100), 1.0);
        assert_eq!(scatter_opacity(0, 100), 0.0);
        assert_eq!(scatter_opacity(3, 0), 1.0);
    }
}
