//! FILENAME: grid-csv/src/lib.rs
//! Grid CSV Module
//!
//! Handles loading and saving heading-addressed grids as CSV, with explicit
//! or sniffed dialects and pluggable value codecs.

mod dialect;
mod error;
mod reader;
mod sniff;
mod writer;

pub use dialect::{Dialect, LineTerminator, QuoteStyle};
pub use error::CsvError;
pub use reader::CsvReader;
pub use sniff::{sniff, SNIFF_SAMPLE_LEN};
pub use writer::CsvWriter;

use grid::Grid;
use std::path::Path;

/// Parses CSV text into a text grid, sniffing the dialect.
pub fn from_csv_text(text: &str) -> Result<Grid, CsvError> {
    CsvReader::new().read_str(text)
}

/// Serializes a text grid with the default dialect.
pub fn to_csv_text(grid: &Grid) -> Result<String, CsvError> {
    CsvWriter::new().to_string(grid)
}

/// Opens `path`, sniffs its dialect and reads it as a text grid.
pub fn load_csv(path: &Path) -> Result<Grid, CsvError> {
    CsvReader::new().read_path(path)
}

/// Writes a text grid to `path` with the default dialect, replacing any
/// existing file.
pub fn save_csv(grid: &Grid, path: &Path) -> Result<(), CsvError> {
    CsvWriter::new().write_path(grid, path)
}
