//! Row ingest: Statcast CSV → typed `PitchRow` records

pub mod columns;
pub mod reader;
pub mod row;

pub use columns::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
pub use reader::{
    parse_row, read_csv, read_csv_path, read_csv_str, CsvRecord, FieldSource, HeaderIndex,
};
pub use row::{Bases, Handedness, HalfInning, PitchRow, ScoreLine};
