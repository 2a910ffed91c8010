//! Configuration structures for the oklch_scan pipeline.
//!
//! This module defines every tunable parameter of extraction and aggregation,
//! organized into one section per stage.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use oklch_scan::ScanConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = ScanConfig::from_json_file(Path::new("scan.json"))?;
//!
//! // Or use defaults
//! let config = ScanConfig::default();
//! config.validate()?;
//! # Ok::<(), oklch_scan::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ExtractionConfig`]: pixel budget and progress reporting
//! - [`GamutConfig`]: gamut tolerance and boundary search
//! - [`VoxelConfig`]: 3-D L/C/H grid
//! - [`ToneMapConfig`]: 2-D L×C grid with hue rings
//!
//! Sections missing from a JSON file fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{binning, extraction, gamut};
use crate::{AnalysisError, Result};

/// Complete configuration for extraction and aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Color frequency extraction
    pub extraction: ExtractionConfig,

    /// Gamut tests and boundary search
    pub gamut: GamutConfig,

    /// Voxel grid
    pub voxel: VoxelConfig,

    /// Tone map grid
    pub tone_map: ToneMapConfig,
}

/// Extraction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Images with more pixels than this are resampled before counting
    pub pixel_budget: u64,

    /// Pixels between progress events (0 disables them)
    pub progress_interval: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pixel_budget: extraction::TARGET_PIXELS,
            progress_interval: extraction::PROGRESS_INTERVAL,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pixel_budget == 0 {
            return Err(AnalysisError::invalid_parameter(
                "extraction.pixel_budget",
                self.pixel_budget,
            ));
        }
        Ok(())
    }
}

/// Gamut tolerance and boundary search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamutConfig {
    /// Per-channel tolerance in linear light
    pub epsilon: f64,

    /// Upper bound of the chroma bisection
    pub max_chroma: f64,

    /// Bisection steps
    pub iterations: u32,
}

impl Default for GamutConfig {
    fn default() -> Self {
        Self {
            epsilon: gamut::EPSILON,
            max_chroma: gamut::MAX_CHROMA,
            iterations: gamut::BISECTION_ITERATIONS,
        }
    }
}

impl GamutConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(AnalysisError::invalid_parameter("gamut.epsilon", self.epsilon));
        }
        if !self.max_chroma.is_finite() || self.max_chroma <= 0.0 {
            return Err(AnalysisError::invalid_parameter("gamut.max_chroma", self.max_chroma));
        }
        if self.iterations == 0 {
            return Err(AnalysisError::invalid_parameter("gamut.iterations", self.iterations));
        }
        Ok(())
    }
}

/// Voxel grid parameters.
///
/// The grid spans L ∈ [0, 1], C ∈ [0, chroma_max] and H ∈ [0, 360), each
/// axis cut into `divisions` equal bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelConfig {
    /// Bins per axis (3-40)
    pub divisions: u32,

    /// Chroma extent of the grid
    pub chroma_max: f64,

    /// Voxels with fewer pixels than this are dropped
    pub density_threshold: u64,
}

impl Default for VoxelConfig {
    fn default() -> Self {
        Self {
            divisions: binning::VOXEL_DIVISIONS,
            chroma_max: binning::VOXEL_CHROMA_MAX,
            density_threshold: 0,
        }
    }
}

impl VoxelConfig {
    pub fn validate(&self) -> Result<()> {
        let range = binning::MIN_VOXEL_DIVISIONS..=binning::MAX_VOXEL_DIVISIONS;
        if !range.contains(&self.divisions) {
            return Err(AnalysisError::invalid_parameter("voxel.divisions", self.divisions));
        }
        if !self.chroma_max.is_finite() || self.chroma_max <= 0.0 {
            return Err(AnalysisError::invalid_parameter("voxel.chroma_max", self.chroma_max));
        }
        Ok(())
    }
}

/// Tone map parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneMapConfig {
    /// Lightness divisions (1-100)
    pub l_divs: u32,

    /// Chroma divisions (1-100)
    pub c_divs: u32,

    /// Hue sub-bins per L×C cell (1-360)
    pub hue_bins: u32,

    /// Chroma extent; colors beyond it are left out of the map
    pub chroma_max: f64,
}

impl Default for ToneMapConfig {
    fn default() -> Self {
        Self {
            l_divs: binning::TONE_MAP_L_DIVS,
            c_divs: binning::TONE_MAP_C_DIVS,
            hue_bins: binning::TONE_MAP_HUE_BINS,
            chroma_max: binning::TONE_MAP_CHROMA_MAX,
        }
    }
}

impl ToneMapConfig {
    pub fn validate(&self) -> Result<()> {
        let divs = 1..=binning::MAX_TONE_MAP_DIVS;
        if !divs.contains(&self.l_divs) {
            return Err(AnalysisError::invalid_parameter("tone_map.l_divs", self.l_divs));
        }
        if !divs.contains(&self.c_divs) {
            return Err(AnalysisError::invalid_parameter("tone_map.c_divs", self.c_divs));
        }
        if !(1..=binning::MAX_TONE_MAP_HUE_BINS).contains(&self.hue_bins) {
            return Err(AnalysisError::invalid_parameter("tone_map.hue_bins", self.hue_bins));
        }
        if !self.chroma_max.is_finite() || self.chroma_max <= 0.0 {
            return Err(AnalysisError::invalid_parameter("tone_map.chroma_max", self.chroma_max));
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.gamut.validate()?;
        self.voxel.validate()?;
        self.tone_map.validate()
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| AnalysisError::config("Failed to parse configuration", e))
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })
    }
}
