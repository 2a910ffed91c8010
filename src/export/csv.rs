//! `Hex,R,G,B,Count` interchange files
//!
//! One row per distinct color, in table order, with the hex code as
//! uppercase `#RRGGBB`. Reading checks that every row's hex code agrees with
//! its R, G and B columns and that no color appears twice.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::RgbColor;
use crate::extraction::{ColorRecord, ColorTable};
use crate::{AnalysisError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Hex")]
    hex: String,
    #[serde(rename = "R")]
    r: u8,
    #[serde(rename = "G")]
    g: u8,
    #[serde(rename = "B")]
    b: u8,
    #[serde(rename = "Count")]
    count: u64,
}

impl From<&ColorRecord> for CsvRow {
    fn from(record: &ColorRecord) -> Self {
        Self {
            hex: record.hex(),
            r: record.color.r,
            g: record.color.g,
            b: record.color.b,
            count: record.count,
        }
    }
}

impl CsvRow {
    fn into_record(self, line: u64) -> Result<ColorRecord> {
        let color = RgbColor::new(self.r, self.g, self.b);
        let parsed = RgbColor::from_hex(&self.hex).map_err(|_| {
            AnalysisError::malformed(format!("line {}: invalid hex code {:?}", line, self.hex))
        })?;
        if parsed != color {
            return Err(AnalysisError::malformed(format!(
                "line {}: hex {} does not match RGB ({}, {}, {})",
                line, self.hex, self.r, self.g, self.b
            )));
        }
        Ok(ColorRecord::new(color, self.count))
    }
}

/// Write records with a `Hex,R,G,B,Count` header
pub fn write_csv<W: Write>(writer: W, records: &[ColorRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        csv.serialize(CsvRow::from(record))
            .map_err(|e| AnalysisError::interchange("Failed to write CSV row", e))?;
    }
    // the header is only emitted with the first row
    if records.is_empty() {
        csv.write_record(["Hex", "R", "G", "B", "Count"])
            .map_err(|e| AnalysisError::interchange("Failed to write CSV header", e))?;
    }
    csv.flush()
        .map_err(|e| AnalysisError::interchange("Failed to flush CSV output", e))
}

/// Read records in file order
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ColorRecord>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for row in csv.deserialize::<CsvRow>() {
        let row = row.map_err(|e| AnalysisError::interchange("Malformed CSV row", e))?;
        // header is line 1
        let line = records.len() as u64 + 2;
        let record = row.into_record(line)?;
        if !seen.insert(record.color.to_packed()) {
            return Err(AnalysisError::malformed(format!(
                "line {}: duplicate color {}",
                line,
                record.color.to_hex()
            )));
        }
        records.push(record);
    }
    Ok(records)
}

/// Write a table to `path`
pub fn write_csv_file(path: &Path, table: &ColorTable) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        AnalysisError::interchange(format!("Failed to create {}", path.display()), e)
    })?;
    write_csv(file, &table.records)?;
    debug!(path = %path.display(), colors = table.len(), "wrote color table");
    Ok(())
}

/// Read a table from `path`
pub fn read_csv_file(path: &Path) -> Result<ColorTable> {
    let file = File::open(path).map_err(|e| {
        AnalysisError::interchange(format!("Failed to open {}", path.display()), e)
    })?;
    let records = read_csv(file)?;
    debug!(path = %path.display(), colors = records.len(), "read color table");
    Ok(ColorTable::from_records(records))
}
