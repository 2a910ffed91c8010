//! Image to color-frequency extraction
//!
//! Large images are first shrunk to the pixel budget with nearest-neighbor
//! sampling, then every remaining pixel is counted by its exact 8-bit RGB
//! value.

pub mod downsample;
pub mod frequency;

pub use downsample::{resample_nearest, Dimensions, ResamplePlan};
pub use frequency::{
    count_colors, extract_from_image, extract_from_rgb, ColorRecord, ColorTable, ColorTally,
};
