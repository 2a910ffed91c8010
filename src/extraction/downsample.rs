//! Pixel-budget resampling
//!
//! Images above the budget are shrunk by a uniform factor
//! `sqrt(budget / pixels)` with nearest-neighbor sampling. Nearest-neighbor
//! copies source pixels verbatim, so every color in the result exists in the
//! original image and exact-color counts stay meaningful.

use image::{ImageBuffer, RgbImage};
use serde::{Deserialize, Serialize};

/// Image size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Outcome of checking an image against the pixel budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResamplePlan {
    /// Original size
    pub source: Dimensions,
    /// Size after resampling; equal to `source` when no resampling is needed
    pub target: Dimensions,
    /// Linear scale factor applied to both axes
    pub scale: f64,
}

impl ResamplePlan {
    /// Plan the resample of a `source`-sized image under `budget` pixels
    ///
    /// Rounding of the scaled sides can land a few pixels on either side of
    /// the budget; each side is at least 1.
    pub fn for_budget(source: Dimensions, budget: u64) -> Self {
        let total = source.pixel_count();
        if total <= budget {
            return Self {
                source,
                target: source,
                scale: 1.0,
            };
        }

        let scale = (budget as f64 / total as f64).sqrt();
        let target = Dimensions::new(
            scale_side(source.width, scale),
            scale_side(source.height, scale),
        );
        Self {
            source,
            target,
            scale,
        }
    }

    pub fn is_resampled(&self) -> bool {
        self.source != self.target
    }
}

fn scale_side(side: u32, scale: f64) -> u32 {
    (f64::from(side) * scale).round().max(1.0) as u32
}

/// Nearest-neighbor resample to `target`
///
/// Each output pixel copies the source pixel under its center.
pub fn resample_nearest(img: &RgbImage, target: Dimensions) -> RgbImage {
    let (in_w, in_h) = img.dimensions();
    if (in_w, in_h) == (target.width, target.height) {
        return img.clone();
    }

    let scale_x = f64::from(in_w) / f64::from(target.width);
    let scale_y = f64::from(in_h) / f64::from(target.height);

    ImageBuffer::from_fn(target.width, target.height, |x, y| {
        let sx = source_index(x, scale_x, in_w);
        let sy = source_index(y, scale_y, in_h);
        *img.get_pixel(sx, sy)
    })
}

#[inline]
fn source_index(out: u32, scale: f64, limit: u32) -> u32 {
    let src = ((f64::from(out) + 0.5) * scale).floor() as u32;
    src.min(limit - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_plan_within_budget() {
        let plan = ResamplePlan::for_budget(Dimensions::new(500, 1000), 500_000);
        assert!(!plan.is_resampled());
        assert_eq!(plan.target, Dimensions::new(500, 1000));
        assert_eq!(plan.scale, 1.0);
    }

    #[test]
    fn test_plan_square_over_budget() {
        let plan = ResamplePlan::for_budget(Dimensions::new(2000, 2000), 500_000);
        assert!(plan.is_resampled());
        assert!((plan.scale - 0.353553).abs() < 1e-5);
        assert_eq!(plan.target, Dimensions::new(707, 707));
        assert!(plan.target.pixel_count() <= 500_000);
    }

    #[test]
    fn test_plan_extreme_aspect_keeps_one_pixel() {
        // Aspect ratio is kept, so the short side rounds to zero and is lifted to 1
        let plan = ResamplePlan::for_budget(Dimensions::new(1_000_000, 1), 1000);
        assert_eq!(plan.target.height, 1);
        assert_eq!(plan.target.width, 31_623);

        let plan = ResamplePlan::for_budget(Dimensions::new(4, 4), 1);
        assert_eq!(plan.target, Dimensions::new(1, 1));
    }

    #[test]
    fn test_resample_preserves_exact_colors() {
        let img: RgbImage = ImageBuffer::from_fn(10, 10, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([250, 10, 10])
            } else {
                Rgb([10, 10, 250])
            }
        });
        let small = resample_nearest(&img, Dimensions::new(3, 3));
        assert_eq!(small.dimensions(), (3, 3));
        for pixel in small.pixels() {
            assert!(*pixel == Rgb([250, 10, 10]) || *pixel == Rgb([10, 10, 250]));
        }
    }

    #[test]
    fn test_resample_samples_pixel_centers() {
        // 4 columns shrunk to 2 pick columns 1 and 3
        let img: RgbImage = ImageBuffer::from_fn(4, 1, |x, _| Rgb([x as u8, 0, 0]));
        let small = resample_nearest(&img, Dimensions::new(2, 1));
        assert_eq!(small.get_pixel(0, 0), &Rgb([1, 0, 0]));
        assert_eq!(small.get_pixel(1, 0), &Rgb([3, 0, 0]));
    }

    #[test]
    fn test_resample_same_size_is_copy() {
        let img: RgbImage = ImageBuffer::from_fn(5, 4, |x, y| Rgb([x as u8, y as u8, 9]));
        assert_eq!(resample_nearest(&img, Dimensions::new(5, 4)), img);
    }
}
