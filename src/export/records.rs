//! Rounded OKLCH records for presentation layers
//!
//! L and C keep 4 decimals and H keeps 2. A hue that rounds up to 360 is
//! written as 0 so the range stays `[0, 360)`.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::aggregation::ColorPoint;
use crate::color::Oklch;
use crate::extraction::ColorRecord;
use crate::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OklchRecord {
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "H")]
    pub h: f64,
    pub hex: String,
    pub count: u64,
}

impl From<&ColorPoint> for OklchRecord {
    fn from(point: &ColorPoint) -> Self {
        let Oklch { l, c, h } = point.oklch.rounded();
        Self {
            l,
            c,
            h,
            hex: point.hex(),
            count: point.count,
        }
    }
}

impl From<&ColorRecord> for OklchRecord {
    fn from(record: &ColorRecord) -> Self {
        Self::from(&ColorPoint::from(record))
    }
}

pub fn to_oklch_records(points: &[ColorPoint]) -> Vec<OklchRecord> {
    points.iter().map(OklchRecord::from).collect()
}

/// Serialize records as a compact JSON array
pub fn write_json<W: Write>(writer: W, records: &[OklchRecord]) -> Result<()> {
    serde_json::to_writer(writer, records)
        .map_err(|e| AnalysisError::interchange("Failed to write JSON records", e))
}

pub fn to_json_string(records: &[OklchRecord]) -> Result<String> {
    serde_json::to_string(records)
        .map_err(|e| AnalysisError::interchange("Failed to serialize JSON records", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RgbColor;

    #[test]
    fn test_rounding() {
        let record = OklchRecord::from(&ColorRecord::new(RgbColor::new(255, 0, 0), 3));
        assert_eq!(record.l, 0.628);
        assert_eq!(record.c, 0.2577);
        assert_eq!(record.h, 29.23);
        assert_eq!(record.hex, "#FF0000");
        assert_eq!(record.count, 3);
    }

    #[test]
    fn test_hue_near_360_wraps() {
        let point = ColorPoint {
            color: RgbColor::new(200, 40, 90),
            oklch: Oklch::new(0.5, 0.1, 359.996),
            count: 1,
        };
        assert_eq!(OklchRecord::from(&point).h, 0.0);
    }

    #[test]
    fn test_json_keys() {
        let records = vec![OklchRecord::from(&ColorRecord::new(RgbColor::new(0, 0, 255), 1))];
        let json = to_json_string(&records).unwrap();
        assert!(json.starts_with(r##"[{"L":0.452,"C":0.3132,"H":264.05,"hex":"#0000FF","count":1}"##));

        let mut out = Vec::new();
        write_json(&mut out, &records).unwrap();
        let parsed: Vec<OklchRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, records);
    }
}
