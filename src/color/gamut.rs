//! sRGB gamut membership and boundary search in OKLCH
//!
//! The boundary search assumes that, for a fixed lightness and hue, gamut
//! membership is monotonically non-increasing in chroma: once a chroma value
//! leaves the gamut, every larger one is out as well. This holds for the sRGB
//! cube seen through OKLab and is a precondition of [`GamutMapper::max_chroma`],
//! not something re-checked per call.

use crate::color::conversion::oklch_to_linear;
use crate::color::types::Oklch;
use crate::config::GamutConfig;
use crate::constants::gamut;

/// Gamut tests with a fixed tolerance and search range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutMapper {
    epsilon: f64,
    chroma_limit: f64,
    iterations: u32,
}

impl Default for GamutMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&GamutConfig> for GamutMapper {
    fn from(config: &GamutConfig) -> Self {
        Self::with_params(config.epsilon, config.max_chroma, config.iterations)
    }
}

impl GamutMapper {
    /// Mapper with the reference tolerance (1e-6), range [0, 0.4] and 20 steps
    pub fn new() -> Self {
        Self {
            epsilon: gamut::EPSILON,
            chroma_limit: gamut::MAX_CHROMA,
            iterations: gamut::BISECTION_ITERATIONS,
        }
    }

    /// Mapper with custom parameters; see [`GamutConfig::validate`] for ranges
    pub fn with_params(epsilon: f64, chroma_limit: f64, iterations: u32) -> Self {
        Self {
            epsilon,
            chroma_limit,
            iterations,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Whether the color maps inside the sRGB cube, within `epsilon` per channel
    ///
    /// Checked in linear light without clamping.
    pub fn is_in_gamut(&self, color: Oklch) -> bool {
        oklch_to_linear(color)
            .iter()
            .all(|c| *c >= -self.epsilon && *c <= 1.0 + self.epsilon)
    }

    /// Largest chroma at (`l`, `h`) that is still in gamut
    ///
    /// Bisects [0, chroma_limit]; the result is the last in-gamut midpoint, so
    /// it never overshoots the boundary. Returns 0 when even the smallest
    /// midpoint is out of gamut (for example `l` outside [0, 1]).
    pub fn max_chroma(&self, l: f64, h: f64) -> f64 {
        let mut lo = 0.0;
        let mut hi = self.chroma_limit;
        for _ in 0..self.iterations {
            let mid = (lo + hi) / 2.0;
            if self.is_in_gamut(Oklch::new(l, mid, h)) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

/// Gamut test with an explicit tolerance
pub fn is_in_srgb_gamut(color: Oklch, epsilon: f64) -> bool {
    GamutMapper::with_params(epsilon, gamut::MAX_CHROMA, gamut::BISECTION_ITERATIONS).is_in_gamut(color)
}

/// Boundary chroma with the reference search parameters
pub fn max_gamut_chroma(l: f64, h: f64) -> f64 {
    GamutMapper::new().max_chroma(l, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::types::RgbColor;

    #[test]
    fn test_neutral_axis_in_gamut() {
        let mapper = GamutMapper::new();
        for i in 0..=10 {
            assert!(mapper.is_in_gamut(Oklch::new(i as f64 / 10.0, 0.0, 0.0)));
        }
    }

    #[test]
    fn test_srgb_colors_in_gamut() {
        let mapper = GamutMapper::new();
        for rgb in [
            RgbColor::new(255, 0, 0),
            RgbColor::new(0, 255, 0),
            RgbColor::new(0, 0, 255),
            RgbColor::new(255, 255, 0),
            RgbColor::new(17, 99, 201),
        ] {
            assert!(mapper.is_in_gamut(rgb.to_oklch()), "{} should be in gamut", rgb);
        }
    }

    #[test]
    fn test_saturated_mid_red_out_of_gamut() {
        assert!(!is_in_srgb_gamut(Oklch::new(0.5, 0.3, 0.0), 1e-6));
        assert!(is_in_srgb_gamut(Oklch::new(0.5, 0.05, 200.0), 1e-6));
    }

    #[test]
    fn test_max_chroma_mid_lightness_red_axis() {
        let c = max_gamut_chroma(0.5, 0.0);
        assert!((c - 0.20270).abs() < 1e-4, "got {}", c);
    }

    #[test]
    fn test_max_chroma_brackets_boundary() {
        let mapper = GamutMapper::new();
        let resolution = gamut::MAX_CHROMA / f64::from(1u32 << gamut::BISECTION_ITERATIONS);
        for &(l, h) in &[(0.5, 0.0), (0.5, 120.0), (0.9, 90.0), (0.3, 264.0), (0.75, 200.0)] {
            let c = mapper.max_chroma(l, h);
            for k in 0..=20 {
                let below = c * f64::from(k) / 20.0;
                assert!(mapper.is_in_gamut(Oklch::new(l, below, h)), "{} {} {}", l, below, h);
            }
            assert!(!mapper.is_in_gamut(Oklch::new(l, c + 2.0 * resolution, h)));
        }
    }

    #[test]
    fn test_max_chroma_of_white_is_zero() {
        let c = GamutMapper::new().max_chroma(1.0, 0.0);
        assert!(c < 1e-5);
        assert_eq!(GamutMapper::new().max_chroma(1.5, 0.0), 0.0);
    }

    #[test]
    fn test_epsilon_widens_gamut() {
        let loose = GamutMapper::with_params(1e-2, 0.4, 20);
        let strict = GamutMapper::new();
        assert!(loose.max_chroma(0.6, 30.0) >= strict.max_chroma(0.6, 30.0));
    }
}
