//! Selecting points by OKLCH range and by hue
//!
//! Hue bounds wrap: a range whose lower bound is above its upper bound, such
//! as 330°..=30°, selects the arc through 0°.

use serde::{Deserialize, Serialize};

use crate::aggregation::points::ColorPoint;
use crate::color::Oklch;
use crate::constants::binning;
use crate::{AnalysisError, Result};

/// Inclusive bounds on L, C and H
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OklchRange {
    pub l: (f64, f64),
    pub c: (f64, f64),
    /// Degrees; wraps through 0° when `h.0 > h.1`
    pub h: (f64, f64),
}

impl Default for OklchRange {
    /// Everything a sRGB image can produce
    fn default() -> Self {
        Self {
            l: (0.0, 1.0),
            c: (0.0, binning::VOXEL_CHROMA_MAX),
            h: (0.0, 360.0),
        }
    }
}

impl OklchRange {
    pub fn validate(&self) -> Result<()> {
        for (name, bounds) in [("range.l", self.l), ("range.c", self.c)] {
            if !ordered(bounds) {
                return Err(AnalysisError::invalid_parameter(
                    name,
                    format!("{}..={}", bounds.0, bounds.1),
                ));
            }
        }
        if !(self.h.0.is_finite() && self.h.1.is_finite()) {
            return Err(AnalysisError::invalid_parameter(
                "range.h",
                format!("{}..={}", self.h.0, self.h.1),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, color: Oklch) -> bool {
        (self.l.0..=self.l.1).contains(&color.l)
            && (self.c.0..=self.c.1).contains(&color.c)
            && hue_in_range(color.h, self.h.0, self.h.1)
    }

    /// Positions of the points inside the range
    pub fn filter_indices(&self, points: &[ColorPoint]) -> Result<Vec<usize>> {
        self.validate()?;
        Ok(points
            .iter()
            .enumerate()
            .filter(|(_, p)| self.contains(p.oklch))
            .map(|(i, _)| i)
            .collect())
    }
}

fn ordered(bounds: (f64, f64)) -> bool {
    bounds.0 <= bounds.1
}

/// Whether `h` lies on the arc from `lo` to `hi`, both ends included
pub fn hue_in_range(h: f64, lo: f64, hi: f64) -> bool {
    if lo <= hi {
        h >= lo && h <= hi
    } else {
        h >= lo || h <= hi
    }
}

/// Shortest angular distance between two hues, in `[0, 180]`
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

/// Points within `width` degrees of `hue` with chroma at least `min_chroma`
pub fn hue_slice(points: &[ColorPoint], hue: f64, width: f64, min_chroma: f64) -> Vec<ColorPoint> {
    points
        .iter()
        .filter(|p| p.oklch.c >= min_chroma && hue_distance(p.oklch.h, hue) <= width)
        .copied()
        .collect()
}

/// Pixel counts per hue bin of `bin_size` degrees, ignoring low-chroma points
///
/// `bin_size` must divide 360.
pub fn hue_histogram(points: &[ColorPoint], bin_size: u32, min_chroma: f64) -> Result<Vec<u64>> {
    if bin_size == 0 || 360 % bin_size != 0 {
        return Err(AnalysisError::invalid_parameter("hue_histogram.bin_size", bin_size));
    }
    let bins = 360 / bin_size;
    let mut histogram = vec![0u64; bins as usize];
    for point in points.iter().filter(|p| p.oklch.c >= min_chroma) {
        let bin = (point.oklch.h / f64::from(bin_size)).floor() as u32 % bins;
        histogram[bin as usize] += point.count;
    }
    Ok(histogram)
}

/// [`hue_histogram`] with 3° bins
pub fn default_hue_histogram(points: &[ColorPoint], min_chroma: f64) -> Vec<u64> {
    let bin_size = binning::HUE_HISTOGRAM_BIN_DEG;
    let bins = (360 / bin_size) as usize;
    hue_histogram(points, bin_size, min_chroma).unwrap_or_else(|_| vec![0; bins])
}
