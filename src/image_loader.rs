//! Image loading for color extraction
//!
//! This module provides a single entry point for decoding images from disk or
//! memory with the `image` crate.
//!
//! ## Supported Formats
//!
//! - JPEG, PNG, GIF (first frame), WebP, TIFF, BMP, ICO, TGA, EXR, PNM, QOI,
//!   DDS, HDR
//!
//! ## Design
//!
//! The format is chosen from the file extension when it is recognized and
//! guessed from the file contents otherwise. Decoded images are returned as
//! [`DynamicImage`]; extraction converts them to 8-bit RGB.

use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// OpenEXR image
    Exr,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
    /// DDS image
    Dds,
    /// HDR image
    Hdr,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "exr" => Some(ImageFormat::Exr),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            "dds" => Some(ImageFormat::Dds),
            "hdr" => Some(ImageFormat::Hdr),
            _ => None,
        }
    }

    fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Ico => image::ImageFormat::Ico,
            ImageFormat::Tga => image::ImageFormat::Tga,
            ImageFormat::Exr => image::ImageFormat::OpenExr,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
            ImageFormat::Qoi => image::ImageFormat::Qoi,
            ImageFormat::Dds => image::ImageFormat::Dds,
            ImageFormat::Hdr => image::ImageFormat::Hdr,
        }
    }
}

/// Load and decode an image from disk
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoadError` if:
/// - File cannot be opened
/// - Format cannot be determined
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use oklch_scan::image_loader::load_image;
/// use std::path::Path;
///
/// let img = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", img.width(), img.height());
/// # Ok::<(), oklch_scan::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let mut reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    match ImageFormat::from_extension(path) {
        Some(format) => reader.set_format(format.to_image_format()),
        None => {
            debug!(path = %path.display(), "unknown extension, guessing format from contents");
            reader = reader.with_guessed_format().map_err(|e| {
                AnalysisError::image_load(
                    format!("Failed to read image header: {}", path.display()),
                    e,
                )
            })?;
        }
    }

    reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })
}

/// Decode an image held in memory; the format is guessed from its contents
pub fn load_image_from_memory(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::image_load("Failed to decode image from memory", e))
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "exr", "pbm",
        "pgm", "ppm", "pnm", "qoi", "dds", "hdr",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
