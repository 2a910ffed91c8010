//! Color space conversion
//!
//! Pure functions along the chain sRGB (8-bit) ↔ sRGB (unit) ↔ linear RGB ↔
//! OKLab ↔ OKLCH. All arithmetic is `f64` using the published OKLab matrices,
//! so every consumer in the crate sees the same numbers.
//!
//! Reference: Björn Ottosson, "A perceptual color space for image processing",
//! <https://bottosson.github.io/posts/oklab/>

use crate::color::types::{Oklab, Oklch, RgbColor};
use crate::constants::{oklab, srgb};

#[inline]
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Decode one sRGB component in [0, 1] to linear light
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= srgb::DECODE_THRESHOLD {
        c / srgb::LINEAR_SCALE
    } else {
        ((c + srgb::OFFSET) / srgb::SCALE).powf(srgb::GAMMA)
    }
}

/// Encode one linear component to sRGB
///
/// Callers clamp to [0, 1] first when they need a displayable value;
/// negative input stays on the linear segment.
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= srgb::ENCODE_THRESHOLD {
        srgb::LINEAR_SCALE * c
    } else {
        srgb::SCALE * c.powf(1.0 / srgb::GAMMA) - srgb::OFFSET
    }
}

/// Linear sRGB to OKLab
///
/// Uses the real cube root, so negative LMS values (out-of-gamut input) stay
/// finite.
pub fn linear_to_oklab(rgb: [f64; 3]) -> Oklab {
    let [l, m, s] = mul(&oklab::LINEAR_TO_LMS, rgb);
    let [lightness, a, b] = mul(&oklab::LMS_TO_OKLAB, [l.cbrt(), m.cbrt(), s.cbrt()]);
    Oklab::new(lightness, a, b)
}

/// OKLab to linear sRGB, unclamped
pub fn oklab_to_linear(lab: Oklab) -> [f64; 3] {
    let [l_, m_, s_] = mul(&oklab::OKLAB_TO_LMS, [lab.l, lab.a, lab.b]);
    mul(&oklab::LMS_TO_LINEAR, [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_])
}

/// Wrap a hue angle in degrees into `[0, 360)`
pub fn normalize_hue(degrees: f64) -> f64 {
    let h = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative input
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Cartesian to polar; hue in degrees
pub fn oklab_to_oklch(lab: Oklab) -> Oklch {
    let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
    let h = normalize_hue(lab.b.atan2(lab.a).to_degrees());
    Oklch::new(lab.l, c, h)
}

/// Polar to Cartesian
pub fn oklch_to_oklab(lch: Oklch) -> Oklab {
    let (sin, cos) = lch.h.to_radians().sin_cos();
    Oklab::new(lch.l, lch.c * cos, lch.c * sin)
}

/// 8-bit sRGB to OKLab
pub fn rgb_to_oklab(color: RgbColor) -> Oklab {
    let [r, g, b] = color.to_unit();
    linear_to_oklab([srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)])
}

/// 8-bit sRGB to OKLCH
pub fn rgb_to_oklch(color: RgbColor) -> Oklch {
    oklab_to_oklch(rgb_to_oklab(color))
}

/// OKLCH to linear sRGB, unclamped
pub fn oklch_to_linear(lch: Oklch) -> [f64; 3] {
    oklab_to_linear(oklch_to_oklab(lch))
}

/// OKLCH to 8-bit sRGB
///
/// Out-of-gamut colors are clipped per channel in linear light, not rejected.
pub fn oklch_to_rgb(lch: Oklch) -> RgbColor {
    let [r, g, b] = oklch_to_linear(lch);
    RgbColor::new(encode_channel(r), encode_channel(g), encode_channel(b))
}

fn encode_channel(linear: f64) -> u8 {
    let encoded = linear_to_srgb(linear.clamp(0.0, 1.0));
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

impl RgbColor {
    pub fn to_oklab(self) -> Oklab {
        rgb_to_oklab(self)
    }

    pub fn to_oklch(self) -> Oklch {
        rgb_to_oklch(self)
    }
}

impl Oklab {
    pub fn to_oklch(self) -> Oklch {
        oklab_to_oklch(self)
    }
}

impl Oklch {
    pub fn to_oklab(self) -> Oklab {
        oklch_to_oklab(self)
    }

    /// Clipped 8-bit sRGB; see [`oklch_to_rgb`]
    pub fn to_rgb(self) -> RgbColor {
        oklch_to_rgb(self)
    }
}
