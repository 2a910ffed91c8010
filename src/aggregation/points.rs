//! Batch conversion of a frequency table into OKLCH points

use serde::{Deserialize, Serialize};

use crate::color::{Oklch, RgbColor};
use crate::extraction::ColorRecord;

/// A distinct color together with its OKLCH coordinates and pixel count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPoint {
    pub color: RgbColor,
    pub oklch: Oklch,
    pub count: u64,
}

impl ColorPoint {
    pub fn new(color: RgbColor, count: u64) -> Self {
        Self {
            color,
            oklch: color.to_oklch(),
            count,
        }
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}

impl From<&ColorRecord> for ColorPoint {
    fn from(record: &ColorRecord) -> Self {
        Self::new(record.color, record.count)
    }
}

impl From<ColorRecord> for ColorPoint {
    fn from(record: ColorRecord) -> Self {
        Self::from(&record)
    }
}

/// Convert every record, keeping the table order
pub fn to_points(records: &[ColorRecord]) -> Vec<ColorPoint> {
    records.iter().map(ColorPoint::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_keep_order_and_counts() {
        let records = vec![
            ColorRecord::new(RgbColor::new(255, 0, 0), 3),
            ColorRecord::new(RgbColor::new(0, 0, 255), 1),
        ];
        let points = to_points(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].count, 3);
        assert_eq!(points[1].hex(), "#0000FF");
        assert!((points[0].oklch.l - 0.627955).abs() < 1e-5);
        assert!((points[0].oklch.h - 29.2339).abs() < 1e-3);
        assert!((points[1].oklch.h - 264.052).abs() < 1e-3);
    }
}
