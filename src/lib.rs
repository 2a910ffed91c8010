//! # OKLCH Scan
//!
//! A Rust crate for describing the color content of images in the
//! perceptually uniform OKLab/OKLCH color space.
//!
//! This library provides:
//! - Exact sRGB ↔ linear RGB ↔ OKLab ↔ OKLCH conversion with sRGB gamut tests
//! - Per-color pixel counts under a pixel budget
//! - Voxel and tone-map binning with circular hue statistics
//! - The `Hex,R,G,B,Count` CSV interchange format and rounded OKLCH records
//!
//! ## Example
//!
//! ```rust,no_run
//! use oklch_scan::{analyze_image, ScanConfig};
//! use std::path::Path;
//!
//! let report = analyze_image(Path::new("photo.jpg"), &ScanConfig::default())?;
//! for voxel in report.voxels.iter().take(5) {
//!     println!("{} {:>8} px", voxel.hex, voxel.total);
//! }
//! # Ok::<(), oklch_scan::AnalysisError>(())
//! ```
//!
//! The library emits `tracing` events and leaves installing a subscriber to
//! the application.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod aggregation;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod extraction;
pub mod image_loader;

pub use aggregation::{build_tone_map, to_points, voxelize, ColorPoint, ToneMap, Voxel};
pub use color::{GamutMapper, Oklab, Oklch, RgbColor};
pub use config::{ExtractionConfig, GamutConfig, ScanConfig, ToneMapConfig, VoxelConfig};
pub use error::{AnalysisError, Result};
pub use extraction::{ColorRecord, ColorTable};

/// Everything computed for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    /// Distinct colors, most frequent first
    pub table: ColorTable,
    /// Voxels above the density threshold, densest first
    pub voxels: Vec<Voxel>,
    pub tone_map: ToneMap,
}

/// Count the colors of an image file
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - The image cannot be opened or decoded
/// - `config` is invalid
pub fn extract_colors(image_path: &Path, config: &ExtractionConfig) -> Result<ColorTable> {
    config.validate()?;
    let img = image_loader::load_image(image_path)?;
    debug!(path = %image_path.display(), "decoded image");
    extraction::extract_from_image(&img, config)
}

/// Count the colors of an encoded image held in memory
pub fn extract_colors_from_memory(bytes: &[u8], config: &ExtractionConfig) -> Result<ColorTable> {
    config.validate()?;
    let img = image_loader::load_image_from_memory(bytes)?;
    extraction::extract_from_image(&img, config)
}

/// Extract, convert and bin the colors of an image file
///
/// The whole configuration is validated before the image is read.
pub fn analyze_image(image_path: &Path, config: &ScanConfig) -> Result<ColorReport> {
    config.validate()?;
    let table = extract_colors(image_path, &config.extraction)?;
    analyze_table(table, config)
}

/// Bin an existing color table, e.g. one read back from CSV
pub fn analyze_table(table: ColorTable, config: &ScanConfig) -> Result<ColorReport> {
    config.validate()?;
    let points = to_points(&table.records);
    let voxels = voxelize(&points, &config.voxel)?;
    let mapper = GamutMapper::from(&config.gamut);
    let tone_map = build_tone_map(&points, &config.tone_map, &mapper)?;

    Ok(ColorReport {
        table,
        voxels,
        tone_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_color_table() -> ColorTable {
        ColorTable::from_records(vec![
            ColorRecord::new(RgbColor::new(255, 0, 0), 3),
            ColorRecord::new(RgbColor::new(0, 0, 255), 1),
        ])
    }

    #[test]
    fn test_analyze_table() {
        let report = analyze_table(two_color_table(), &ScanConfig::default()).unwrap();
        assert_eq!(report.voxels.len(), 2);
        assert_eq!(report.voxels[0].total, 3);
        assert_eq!(report.voxels[0].members, vec![0]);
        // out-of-gamut sub-bins still set the opacity reference
        assert_eq!(report.tone_map.norm_count, 3.0);
        assert_eq!(report.tone_map.bins_with_data, 0);
    }

    #[test]
    fn test_empty_table_gives_empty_report() {
        let report =
            analyze_table(ColorTable::from_records(Vec::new()), &ScanConfig::default()).unwrap();
        assert!(report.voxels.is_empty());
        assert_eq!(report.tone_map.bins_with_data, 0);
        assert_eq!(report.tone_map.norm_count, 1.0);
    }

    #[test]
    fn test_invalid_config_rejected_first() {
        let mut config = ScanConfig::default();
        config.voxel.divisions = 0;
        let result = analyze_image(Path::new("does/not/exist.png"), &config);
        assert!(matches!(result, Err(AnalysisError::InvalidParameter { .. })));
    }

    #[test]
    fn test_color_report_serialization() {
        let report = analyze_table(two_color_table(), &ScanConfig::default()).unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: ColorReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report.table, deserialized.table);
        assert_eq!(report.voxels.len(), deserialized.voxels.len());
        assert_eq!(report.tone_map.cells.len(), deserialized.tone_map.cells.len());
    }
}
