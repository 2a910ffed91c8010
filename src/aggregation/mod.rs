//! Spatial aggregation of OKLCH colors
//!
//! Every function here takes the full list of points and returns a fresh
//! result; changing a resolution or threshold means calling it again.

pub mod filter;
pub mod normalize;
pub mod points;
pub mod stats;
pub mod tone_map;
pub mod voxel;

pub use filter::{
    default_hue_histogram, hue_distance, hue_histogram, hue_in_range, hue_slice, OklchRange,
};
pub use normalize::{scatter_max_count, scatter_opacity, tone_map_norm, tone_map_opacity};
pub use points::{to_points, ColorPoint};
pub use stats::{circular_mean, StatsSummary, WeightedStats};
pub use tone_map::{build_tone_map, ToneMap, ToneMapCell};
pub use voxel::{voxelize, voxelize_subset, Voxel, VoxelGrid, VoxelIndex};
