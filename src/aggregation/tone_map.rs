//! Tone map: an L×C grid with a ring of hue sub-bins in every cell
//!
//! Coordinates are binned after rounding to the precision of the exported
//! records, so a color sits in the sub-bin its printed L, C and H point to.
//! Colors with chroma above the configured extent are left out rather than
//! clamped into the last column. A sub-bin is only part of the map when its
//! center color is inside the sRGB gamut; pixels that fall in an
//! out-of-gamut sub-bin still count toward the opacity reference.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::normalize::{tone_map_norm, tone_map_opacity};
use crate::aggregation::points::ColorPoint;
use crate::color::{GamutMapper, Oklch};
use crate::config::ToneMapConfig;
use crate::constants::binning;
use crate::{AnalysisError, Result};

/// One in-gamut hue sub-bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneMapCell {
    pub l_index: u32,
    pub c_index: u32,
    pub h_index: u32,
    /// Center of the sub-bin
    pub center: Oklch,
    /// Pixels in the sub-bin
    pub count: u64,
    /// Largest in-gamut chroma at the center's lightness and hue
    pub max_chroma: f64,
    /// Chroma used to paint the sub-bin: `max(center C, 0.8 · max_chroma)`
    pub fill_chroma: f64,
    pub opacity: f64,
    /// Center color
    pub border_hex: String,
    /// Center color at `fill_chroma`
    pub fill_hex: String,
}

/// Binned tone map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneMap {
    pub l_divs: u32,
    pub c_divs: u32,
    pub hue_bins: u32,
    pub chroma_max: f64,
    /// In-gamut sub-bins in (L, C, H) index order, populated or not
    pub cells: Vec<ToneMapCell>,
    /// Opacity reference count
    pub norm_count: f64,
    /// In-gamut sub-bins with at least one pixel
    pub bins_with_data: usize,
    /// Pixels in in-gamut sub-bins
    pub total_pixels: u64,
}

impl ToneMap {
    /// Cells with at least one pixel
    pub fn populated(&self) -> impl Iterator<Item = &ToneMapCell> {
        self.cells.iter().filter(|cell| cell.count > 0)
    }

    pub fn cell(&self, l_index: u32, c_index: u32, h_index: u32) -> Option<&ToneMapCell> {
        self.cells
            .iter()
            .find(|c| (c.l_index, c.c_index, c.h_index) == (l_index, c_index, h_index))
    }
}

struct Steps {
    l: f64,
    c: f64,
    h: f64,
}

/// Bin `points` into a tone map
pub fn build_tone_map(
    points: &[ColorPoint],
    config: &ToneMapConfig,
    mapper: &GamutMapper,
) -> Result<ToneMap> {
    config.validate()?;

    let (l_divs, c_divs, hue_bins) = (config.l_divs, config.c_divs, config.hue_bins);
    let steps = Steps {
        l: 1.0 / f64::from(l_divs),
        c: config.chroma_max / f64::from(c_divs),
        h: 360.0 / f64::from(hue_bins),
    };
    let slot = |li: u32, ci: u32, hi: u32| -> usize {
        (li as usize * c_divs as usize + ci as usize) * hue_bins as usize + hi as usize
    };
    let len = (l_divs as usize)
        .checked_mul(c_divs as usize)
        .and_then(|n| n.checked_mul(hue_bins as usize))
        .ok_or_else(|| {
            AnalysisError::invalid_parameter(
                "tone_map",
                format!("{}x{}x{}", l_divs, c_divs, hue_bins),
            )
        })?;

    let mut counts = vec![0u64; len];
    let mut skipped = 0usize;
    for point in points {
        let Oklch { l, c, h } = point.oklch.rounded();
        if c > config.chroma_max || l < 0.0 || c < 0.0 {
            skipped += 1;
            continue;
        }
        let li = ((l / steps.l).floor() as u32).min(l_divs - 1);
        let ci = ((c / steps.c).floor() as u32).min(c_divs - 1);
        let hi = (h / steps.h).floor() as u32 % hue_bins;
        counts[slot(li, ci, hi)] += point.count;
    }

    let norm_count = tone_map_norm(counts.iter().copied());

    // boundary chroma only depends on (L, H)
    let boundary: Vec<f64> = (0..l_divs)
        .flat_map(|li| (0..hue_bins).map(move |hi| (li, hi)))
        .map(|(li, hi)| mapper.max_chroma(bin_center(li, steps.l), bin_center(hi, steps.h)))
        .collect();

    let mut cells = Vec::new();
    let mut bins_with_data = 0;
    let mut total_pixels = 0;
    for li in 0..l_divs {
        for ci in 0..c_divs {
            for hi in 0..hue_bins {
                let center = Oklch::new(
                    bin_center(li, steps.l),
                    bin_center(ci, steps.c),
                    bin_center(hi, steps.h),
                );
                if !mapper.is_in_gamut(center) {
                    continue;
                }

                let count = counts[slot(li, ci, hi)];
                if count > 0 {
                    bins_with_data += 1;
                    total_pixels += count;
                }

                let max_chroma = boundary[li as usize * hue_bins as usize + hi as usize];
                let fill_chroma = center.c.max(max_chroma * binning::TONE_MAP_FILL_FRACTION);
                cells.push(ToneMapCell {
                    l_index: li,
                    c_index: ci,
                    h_index: hi,
                    center,
                    count,
                    max_chroma,
                    fill_chroma,
                    opacity: tone_map_opacity(count, norm_count),
                    border_hex: center.to_rgb().to_hex(),
                    fill_hex: Oklch { c: fill_chroma, ..center }.to_rgb().to_hex(),
                });
            }
        }
    }

    debug!(
        cells = cells.len(),
        bins_with_data,
        total_pixels,
        norm_count,
        skipped,
        "built tone map"
    );

    Ok(ToneMap {
        l_divs,
        c_divs,
        hue_bins,
        chroma_max: config.chroma_max,
        cells,
        norm_count,
        bins_with_data,
        total_pixels,
    })
}

fn bin_center(index: u32, step: f64) -> f64 {
    (f64::from(index) + 0.5) * step
}
