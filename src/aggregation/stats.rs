//! Count-weighted statistics over OKLCH colors
//!
//! Lightness and chroma use ordinary weighted moments. Hue is an angle, so
//! its mean is taken on the unit circle: each color adds `count·(cos H, sin H)`
//! and the mean hue is the direction of the summed vector. Averaging the raw
//! degrees would put the mean of 359° and 1° at 180°.
//!
//! All sums are plain additions, so [`WeightedStats::merge`] gives the same
//! result in any grouping or order.

use serde::{Deserialize, Serialize};

use crate::color::{normalize_hue, Oklch};

/// Running sums for one group of colors
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedStats {
    weight: u64,
    colors: usize,
    sum_l: f64,
    sum_l2: f64,
    sum_c: f64,
    sum_c2: f64,
    sum_cos: f64,
    sum_sin: f64,
}

/// Finished statistics of a non-empty group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Weighted mean L and C, circular mean H
    pub mean: Oklch,
    pub std_l: f64,
    pub std_c: f64,
    pub total: u64,
    pub color_count: usize,
}

impl WeightedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one color carried by `count` pixels
    pub fn add(&mut self, color: Oklch, count: u64) {
        let w = count as f64;
        let rad = color.h.to_radians();
        self.weight += count;
        self.colors += 1;
        self.sum_l += color.l * w;
        self.sum_l2 += color.l * color.l * w;
        self.sum_c += color.c * w;
        self.sum_c2 += color.c * color.c * w;
        self.sum_cos += rad.cos() * w;
        self.sum_sin += rad.sin() * w;
    }

    pub fn merge(&mut self, other: &WeightedStats) {
        self.weight += other.weight;
        self.colors += other.colors;
        self.sum_l += other.sum_l;
        self.sum_l2 += other.sum_l2;
        self.sum_c += other.sum_c;
        self.sum_c2 += other.sum_c2;
        self.sum_cos += other.sum_cos;
        self.sum_sin += other.sum_sin;
    }

    /// Total pixel count
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Number of colors added
    pub fn color_count(&self) -> usize {
        self.colors
    }

    /// Means and standard deviations; `None` when the group has no weight
    pub fn summary(&self) -> Option<StatsSummary> {
        if self.weight == 0 {
            return None;
        }
        let w = self.weight as f64;
        let mean_l = self.sum_l / w;
        let mean_c = self.sum_c / w;

        Some(StatsSummary {
            mean: Oklch::new(mean_l, mean_c, circular_mean(self.sum_sin, self.sum_cos)),
            std_l: std_dev(self.sum_l2 / w, mean_l),
            std_c: std_dev(self.sum_c2 / w, mean_c),
            total: self.weight,
            color_count: self.colors,
        })
    }
}

/// Direction in degrees, in `[0, 360)`, of the vector `(sum_cos, sum_sin)`
///
/// A zero vector (e.g. two opposite hues of equal weight) yields 0.
pub fn circular_mean(sum_sin: f64, sum_cos: f64) -> f64 {
    normalize_hue(sum_sin.atan2(sum_cos).to_degrees())
}

fn std_dev(mean_of_squares: f64, mean: f64) -> f64 {
    // rounding can push the variance slightly below zero
    (mean_of_squares - mean * mean).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_mean_across_zero() {
        let mut stats = WeightedStats::new();
        stats.add(Oklch::new(0.5, 0.1, 359.0), 10);
        stats.add(Oklch::new(0.5, 0.1, 1.0), 10);
        let summary = stats.summary().unwrap();
        let h = summary.mean.h;
        assert!((0.0..360.0).contains(&h));
        assert!(h < 1e-9 || h > 360.0 - 1e-9, "got {}", h);
    }

    #[test]
    fn test_weighted_means_and_std() {
        let mut stats = WeightedStats::new();
        stats.add(Oklch::new(0.2, 0.1, 90.0), 1);
        stats.add(Oklch::new(0.6, 0.3, 90.0), 3);
        let summary = stats.summary().unwrap();
        assert!((summary.mean.l - 0.5).abs() < 1e-12);
        assert!((summary.mean.c - 0.25).abs() < 1e-12);
        assert!((summary.mean.h - 90.0).abs() < 1e-9);
        // E[L²] = (0.04 + 1.08) / 4 = 0.28; 0.28 - 0.25 = 0.03
        assert!((summary.std_l - 0.03f64.sqrt()).abs() < 1e-9);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.color_count, 2);
    }

    #[test]
    fn test_single_color_has_zero_spread() {
        let mut stats = WeightedStats::new();
        stats.add(Oklch::new(0.7, 0.123, 200.0), 7);
        let summary = stats.summary().unwrap();
        assert!(summary.std_l >= 0.0 && summary.std_l < 1e-7);
        assert!(summary.std_c >= 0.0 && summary.std_c < 1e-7);
    }

    #[test]
    fn test_empty_has_no_summary() {
        assert!(WeightedStats::new().summary().is_none());

        let mut stats = WeightedStats::new();
        stats.add(Oklch::new(0.5, 0.1, 10.0), 0);
        assert!(stats.summary().is_none());
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let colors = [
            (Oklch::new(0.3, 0.05, 350.0), 4),
            (Oklch::new(0.4, 0.12, 20.0), 9),
            (Oklch::new(0.8, 0.02, 5.0), 2),
        ];
        let mut whole = WeightedStats::new();
        for (c, n) in colors {
            whole.add(c, n);
        }

        let mut left = WeightedStats::new();
        left.add(colors[0].0, colors[0].1);
        let mut right = WeightedStats::new();
        right.add(colors[1].0, colors[1].1);
        right.add(colors[2].0, colors[2].1);
        right.merge(&left);

        let a = whole.summary().unwrap();
        let b = right.summary().unwrap();
        assert_eq!(a.total, b.total);
        assert!((a.mean.l - b.mean.l).abs() < 1e-12);
        assert!((a.mean.h - b.mean.h).abs() < 1e-9);
        assert!((a.std_c - b.std_c).abs() < 1e-12);
    }
}
