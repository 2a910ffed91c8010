//! Color types, color space conversion and gamut queries
//!
//! Every OKLab/OKLCH computation in the crate goes through this module.

pub mod conversion;
pub mod gamut;
pub mod types;

pub use conversion::{
    linear_to_oklab, linear_to_srgb, normalize_hue, oklab_to_linear, oklab_to_oklch,
    oklch_to_linear, oklch_to_oklab, oklch_to_rgb, rgb_to_oklab, rgb_to_oklch, srgb_to_linear,
};
pub use gamut::{is_in_srgb_gamut, max_gamut_chroma, GamutMapper};
pub use types::{Oklab, Oklch, RgbColor};
