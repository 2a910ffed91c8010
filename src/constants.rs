//! Color science constants and reference defaults
//!
//! This module contains compile-time constants for the sRGB transfer
//! function, Björn Ottosson's OKLab matrices and the default parameters
//! of the extraction and binning passes.

/// sRGB transfer function (IEC 61966-2-1)
pub mod srgb {
    /// Encoded value at or below which decoding is linear
    pub const DECODE_THRESHOLD: f64 = 0.04045;

    /// Linear value at or below which encoding is linear
    pub const ENCODE_THRESHOLD: f64 = 0.0031308;

    /// Slope of the linear segment
    pub const LINEAR_SCALE: f64 = 12.92;

    /// Offset of the power-law segment
    pub const OFFSET: f64 = 0.055;

    /// Scale of the power-law segment
    pub const SCALE: f64 = 1.055;

    /// Exponent of the power-law segment
    pub const GAMMA: f64 = 2.4;
}

/// OKLab matrices
///
/// Source: <https://bottosson.github.io/posts/oklab/>. Values are kept to the
/// published precision; do not round.
#[allow(clippy::excessive_precision)]
pub mod oklab {
    /// Linear sRGB to LMS
    pub const LINEAR_TO_LMS: [[f64; 3]; 3] = [
        [0.4122214708, 0.5363325363, 0.0514459929],
        [0.2119034982, 0.6806995451, 0.1073969566],
        [0.0883024619, 0.2817188376, 0.6299787005],
    ];

    /// Nonlinear LMS to OKLab
    pub const LMS_TO_OKLAB: [[f64; 3]; 3] = [
        [0.2104542553, 0.7936177850, -0.0040720468],
        [1.9779984951, -2.4285922050, 0.4505937099],
        [0.0259040371, 0.7827717662, -0.8086757660],
    ];

    /// OKLab to nonlinear LMS
    pub const OKLAB_TO_LMS: [[f64; 3]; 3] = [
        [1.0, 0.3963377774, 0.2158037573],
        [1.0, -0.1055613458, -0.0638541728],
        [1.0, -0.0894841775, -1.2914855480],
    ];

    /// LMS to linear sRGB
    pub const LMS_TO_LINEAR: [[f64; 3]; 3] = [
        [4.0767416621, -3.3077115913, 0.2309699292],
        [-1.2684380046, 2.6097574011, -0.3413193965],
        [-0.0041960863, -0.7034186147, 1.7076147010],
    ];
}

/// sRGB gamut boundary search
pub mod gamut {
    /// Per-channel tolerance when testing linear RGB against [0, 1]
    pub const EPSILON: f64 = 1e-6;

    /// Upper bound of the chroma bisection (covers every sRGB color)
    pub const MAX_CHROMA: f64 = 0.4;

    /// Bisection steps; 0.4 / 2^20 ≈ 3.8e-7
    pub const BISECTION_ITERATIONS: u32 = 20;
}

/// Color frequency extraction
pub mod extraction {
    /// Images larger than this are resampled before counting
    pub const TARGET_PIXELS: u64 = 500_000;

    /// Pixels between progress events
    pub const PROGRESS_INTERVAL: u64 = 50_000;
}

/// Spatial aggregation defaults
pub mod binning {
    /// Default voxel divisions per axis
    pub const VOXEL_DIVISIONS: u32 = 12;

    /// Smallest accepted voxel division count
    pub const MIN_VOXEL_DIVISIONS: u32 = 3;

    /// Largest accepted voxel division count
    pub const MAX_VOXEL_DIVISIONS: u32 = 40;

    /// Chroma extent of the voxel grid
    pub const VOXEL_CHROMA_MAX: f64 = 0.4;

    /// Default lightness divisions of the tone map
    pub const TONE_MAP_L_DIVS: u32 = 10;

    /// Default chroma divisions of the tone map
    pub const TONE_MAP_C_DIVS: u32 = 14;

    /// Hue sub-bins per tone map cell
    pub const TONE_MAP_HUE_BINS: u32 = 24;

    /// Largest accepted lightness or chroma division count of the tone map
    pub const MAX_TONE_MAP_DIVS: u32 = 100;

    /// Largest accepted hue sub-bin count of the tone map
    pub const MAX_TONE_MAP_HUE_BINS: u32 = 360;

    /// Chroma extent of the tone map; colors beyond it are skipped
    pub const TONE_MAP_CHROMA_MAX: f64 = 0.35;

    /// Number of largest bins averaged for tone map normalization
    pub const TONE_MAP_NORM_TOP: usize = 10;

    /// Opacity floor for populated tone map bins
    pub const TONE_MAP_MIN_ALPHA: f64 = 0.12;

    /// Fraction of the gamut-boundary chroma used for tone map fills
    pub const TONE_MAP_FILL_FRACTION: f64 = 0.8;

    /// Number of largest counts averaged for scatter opacity scaling
    pub const SCATTER_NORM_TOP: usize = 5;

    /// Default hue histogram bin width in degrees
    pub const HUE_HISTOGRAM_BIN_DEG: u32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oklab_matrices_are_inverse_pairs() {
        // White maps to L = 1, a = b = 0 through the forward pair
        let lms: Vec<f64> = oklab::LINEAR_TO_LMS.iter().map(|row| row.iter().sum()).collect();
        for v in &lms {
            assert!((v - 1.0).abs() < 1e-6);
        }
        let l: f64 = oklab::LMS_TO_OKLAB[0].iter().sum();
        let a: f64 = oklab::LMS_TO_OKLAB[1].iter().sum();
        let b: f64 = oklab::LMS_TO_OKLAB[2].iter().sum();
        assert!((l - 1.0).abs() < 1e-6);
        assert!(a.abs() < 1e-6);
        assert!(b.abs() < 1e-6);
    }

    #[test]
    fn test_transfer_thresholds_meet() {
        // Both segments of the decoding function agree at the threshold
        let linear = srgb::DECODE_THRESHOLD / srgb::LINEAR_SCALE;
        let power = ((srgb::DECODE_THRESHOLD + srgb::OFFSET) / srgb::SCALE).powf(srgb::GAMMA);
        assert!((linear - power).abs() < 1e-6);
        assert!((srgb::ENCODE_THRESHOLD * srgb::LINEAR_SCALE - srgb::DECODE_THRESHOLD).abs() < 1e-4);
    }

    #[test]
    fn test_binning_ranges() {
        assert!(binning::MIN_VOXEL_DIVISIONS <= binning::VOXEL_DIVISIONS);
        assert!(binning::VOXEL_DIVISIONS <= binning::MAX_VOXEL_DIVISIONS);
        assert!(binning::TONE_MAP_CHROMA_MAX <= gamut::MAX_CHROMA);
        assert_eq!(360 % binning::HUE_HISTOGRAM_BIN_DEG, 0);
        assert!(binning::TONE_MAP_L_DIVS <= binning::MAX_TONE_MAP_DIVS);
        assert!(binning::TONE_MAP_C_DIVS <= binning::MAX_TONE_MAP_DIVS);
        assert!(binning::TONE_MAP_HUE_BINS <= binning::MAX_TONE_MAP_HUE_BINS);
    }
}
