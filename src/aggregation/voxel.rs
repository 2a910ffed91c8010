//! 3-D voxel grid over L, C and H
//!
//! The grid spans L ∈ [0, 1], C ∈ [0, chroma_max] and H ∈ [0, 360), each cut
//! into `divisions` equal half-open bins. Values at or beyond the top edge of
//! an axis land in the last bin and negative values in the first, so every
//! color belongs to exactly one voxel.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::points::ColorPoint;
use crate::aggregation::stats::WeightedStats;
use crate::color::Oklch;
use crate::config::VoxelConfig;
use crate::{AnalysisError, Result};

/// Bin indices along L, C and H
///
/// Orders by L, then C, then H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoxelIndex {
    pub l: u32,
    pub c: u32,
    pub h: u32,
}

/// Geometry of a voxel grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelGrid {
    divisions: u32,
    step_l: f64,
    step_c: f64,
    step_h: f64,
}

impl VoxelGrid {
    pub fn new(config: &VoxelConfig) -> Result<Self> {
        config.validate()?;
        let n = f64::from(config.divisions);
        Ok(Self {
            divisions: config.divisions,
            step_l: 1.0 / n,
            step_c: config.chroma_max / n,
            step_h: 360.0 / n,
        })
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Voxel containing `color`
    pub fn index_of(&self, color: Oklch) -> VoxelIndex {
        VoxelIndex {
            l: self.bin(color.l, self.step_l),
            c: self.bin(color.c, self.step_c),
            h: self.bin(color.h, self.step_h),
        }
    }

    /// Center of a voxel
    pub fn center(&self, index: VoxelIndex) -> Oklch {
        Oklch::new(
            (f64::from(index.l) + 0.5) * self.step_l,
            (f64::from(index.c) + 0.5) * self.step_c,
            (f64::from(index.h) + 0.5) * self.step_h,
        )
    }

    fn bin(&self, value: f64, step: f64) -> u32 {
        let k = (value / step).floor().max(0.0) as u32;
        k.min(self.divisions - 1)
    }
}

/// Aggregate of the colors in one voxel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voxel {
    pub index: VoxelIndex,
    /// Geometric center of the cell
    pub center: Oklch,
    /// Count-weighted mean L and C with the circular mean of H
    pub mean: Oklch,
    pub std_l: f64,
    pub std_c: f64,
    /// Pixels in the voxel
    pub total: u64,
    /// Distinct colors in the voxel
    pub color_count: usize,
    /// Positions of the member colors in the input slice
    pub members: Vec<usize>,
    /// `mean` converted back to sRGB (clamped)
    pub hex: String,
}

/// Bin every point into the grid
///
/// Voxels with fewer than `density_threshold` pixels are dropped. The rest
/// are ordered by total descending, equal totals by index ascending.
pub fn voxelize(points: &[ColorPoint], config: &VoxelConfig) -> Result<Vec<Voxel>> {
    let all: Vec<usize> = (0..points.len()).collect();
    voxelize_subset(points, &all, config)
}

/// Like [`voxelize`] restricted to the points at `indices`
///
/// `members` still refer to positions in `points` and come out ascending.
/// A repeated index counts once.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidParameter` if an index is past the end of
/// `points`, or if `config` is invalid.
pub fn voxelize_subset(
    points: &[ColorPoint],
    indices: &[usize],
    config: &VoxelConfig,
) -> Result<Vec<Voxel>> {
    let grid = VoxelGrid::new(config)?;

    let unique: BTreeSet<usize> = indices.iter().copied().collect();
    let mut cells: BTreeMap<VoxelIndex, (WeightedStats, Vec<usize>)> = BTreeMap::new();
    for i in unique {
        let point = points
            .get(i)
            .ok_or_else(|| AnalysisError::invalid_parameter("voxel.indices", i))?;
        let (stats, members) = cells.entry(grid.index_of(point.oklch)).or_default();
        stats.add(point.oklch, point.count);
        members.push(i);
    }

    let occupied = cells.len();
    let mut voxels: Vec<Voxel> = cells
        .into_iter()
        .filter(|(_, (stats, _))| stats.weight() >= config.density_threshold)
        .filter_map(|(index, (stats, members))| {
            let summary = stats.summary()?;
            Some(Voxel {
                index,
                center: grid.center(index),
                mean: summary.mean,
                std_l: summary.std_l,
                std_c: summary.std_c,
                total: summary.total,
                color_count: summary.color_count,
                members,
                hex: summary.mean.to_rgb().to_hex(),
            })
        })
        .collect();

    // stable: BTreeMap order breaks ties by index
    voxels.sort_by(|a, b| b.total.cmp(&a.total));

    debug!(
        divisions = grid.divisions(),
        occupied,
        kept = voxels.len(),
        threshold = config.density_threshold,
        "voxelized colors"
    );
    Ok(voxels)
}
