//! Output formats: the CSV color table and rounded OKLCH records

pub mod csv;
pub mod records;

pub use self::csv::{read_csv, read_csv_file, write_csv, write_csv_file};
pub use records::{to_json_string, to_oklch_records, write_json, OklchRecord};
