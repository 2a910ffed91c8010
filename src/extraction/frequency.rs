//! Exact-color frequency counting
//!
//! Every pixel's 8-bit RGB value is counted as-is; no color space conversion
//! happens here. Records come out ordered by descending count, with equal
//! counts kept in the order their colors were first seen during the
//! row-major scan.

use std::collections::HashMap;

use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::color::RgbColor;
use crate::config::ExtractionConfig;
use crate::extraction::downsample::{resample_nearest, Dimensions, ResamplePlan};
use crate::Result;

/// One distinct color and how many pixels carried it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub color: RgbColor,
    pub count: u64,
}

impl ColorRecord {
    pub const fn new(color: RgbColor, count: u64) -> Self {
        Self { color, count }
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}

/// Accumulates per-color counts, remembering first-seen order
///
/// Tallies built over disjoint pixel ranges can be combined with
/// [`ColorTally::merge`]; counts add, so the final counts do not depend on
/// how the pixels were partitioned.
#[derive(Debug, Clone, Default)]
pub struct ColorTally {
    index: HashMap<u32, usize>,
    entries: Vec<ColorRecord>,
    total: u64,
}

impl ColorTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one pixel of `color`
    pub fn add(&mut self, color: RgbColor) {
        self.add_count(color, 1);
    }

    /// Count `count` pixels of `color`
    pub fn add_count(&mut self, color: RgbColor, count: u64) {
        let key = color.to_packed();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].count += count,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(ColorRecord::new(color, count));
            }
        }
        self.total += count;
    }

    /// Fold another tally into this one; colors new to `self` go after its own
    pub fn merge(&mut self, other: ColorTally) {
        for record in other.entries {
            self.add_count(record.color, record.count);
        }
    }

    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pixels counted
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Records ordered by descending count, ties in first-seen order
    pub fn into_records(self) -> Vec<ColorRecord> {
        let mut records = self.entries;
        // stable: equal counts keep insertion order
        records.sort_by(|a, b| b.count.cmp(&a.count));
        records
    }
}

impl FromIterator<RgbColor> for ColorTally {
    fn from_iter<I: IntoIterator<Item = RgbColor>>(iter: I) -> Self {
        let mut tally = ColorTally::new();
        for color in iter {
            tally.add(color);
        }
        tally
    }
}

/// Frequency table of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTable {
    /// Size of the decoded image; `None` for tables not read from an image
    pub source_size: Option<Dimensions>,
    /// Size of the image actually counted
    pub sampled_size: Option<Dimensions>,
    /// Distinct colors, most frequent first
    pub records: Vec<ColorRecord>,
}

impl ColorTable {
    /// Table built from records that did not come from an image (e.g. a CSV file)
    pub fn from_records(records: Vec<ColorRecord>) -> Self {
        Self {
            source_size: None,
            sampled_size: None,
            records,
        }
    }

    /// Sum of all counts; equals the number of pixels counted
    pub fn total_count(&self) -> u64 {
        self.records.iter().map(|r| r.count).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorRecord> {
        self.records.iter()
    }
}

/// Count every pixel of `img` in row-major order
///
/// Emits a trace event every `progress_interval` pixels and at the end;
/// an interval of 0 disables the events.
pub fn count_colors(img: &RgbImage, progress_interval: u64) -> ColorTally {
    let total = u64::from(img.width()) * u64::from(img.height());
    let mut tally = ColorTally::new();

    for (i, pixel) in img.pixels().enumerate() {
        tally.add(RgbColor::from(*pixel));

        let done = i as u64 + 1;
        if progress_interval > 0 && (done % progress_interval == 0 || done == total) {
            trace!(
                done,
                total,
                percent = done as f64 / total as f64 * 100.0,
                "counting colors"
            );
        }
    }

    tally
}

/// Resample `img` to the pixel budget and count its colors
pub fn extract_from_image(img: &DynamicImage, config: &ExtractionConfig) -> Result<ColorTable> {
    config.validate()?;

    let rgb = img.to_rgb8();
    extract_from_rgb(&rgb, config)
}

/// Like [`extract_from_image`] for an image that is already 8-bit RGB
pub fn extract_from_rgb(rgb: &RgbImage, config: &ExtractionConfig) -> Result<ColorTable> {
    config.validate()?;

    let source = Dimensions::new(rgb.width(), rgb.height());
    let plan = ResamplePlan::for_budget(source, config.pixel_budget);
    debug!(
        width = source.width,
        height = source.height,
        pixels = source.pixel_count(),
        "source image"
    );

    let tally = if plan.is_resampled() {
        debug!(
            width = plan.target.width,
            height = plan.target.height,
            pixels = plan.target.pixel_count(),
            scale = plan.scale,
            "resampled to pixel budget"
        );
        let resampled = resample_nearest(rgb, plan.target);
        count_colors(&resampled, config.progress_interval)
    } else {
        debug!("within pixel budget, no resampling");
        count_colors(rgb, config.progress_interval)
    };

    debug!(colors = tally.len(), pixels = tally.total(), "extracted color table");

    Ok(ColorTable {
        source_size: Some(source),
        sampled_size: Some(plan.target),
        records: tally.into_records(),
    })
}
