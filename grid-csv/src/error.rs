//! FILENAME: grid-csv/src/error.rs

use grid::GridError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The text is not a usable table: no detectable dialect, no records,
    /// ragged records, or invalid UTF-8.
    #[error("Invalid CSV format{}: {message}", at_line(.line))]
    Format { line: Option<u64>, message: String },

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

impl CsvError {
    pub(crate) fn format(line: Option<u64>, message: impl Into<String>) -> Self {
        CsvError::Format {
            line,
            message: message.into(),
        }
    }
}

fn at_line(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}
