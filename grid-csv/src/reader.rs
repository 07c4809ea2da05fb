//! FILENAME: grid-csv/src/reader.rs
//! PURPOSE: Builds grids from CSV text.
//! CONTEXT: The whole input is read into memory first so the dialect can be
//! sniffed from its opening bytes when none was configured. Records are then
//! checked for a rectangular shape and handed to `Grid::from_lines_with`,
//! which decodes each value through the supplied codec.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use grid::{Grid, TextCodec, ValueCodec};

use crate::dialect::Dialect;
use crate::error::CsvError;
use crate::sniff::sniff;

/// Reads CSV into a `Grid`, with an explicit or sniffed dialect.
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    dialect: Option<Dialect>,
}

impl CsvReader {
    /// A reader that sniffs the dialect of each input.
    pub fn new() -> Self {
        CsvReader { dialect: None }
    }

    /// Skips sniffing and parses with `dialect`.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn dialect(&self) -> Option<&Dialect> {
        self.dialect.as_ref()
    }

    pub fn read<R: Read>(&self, input: R) -> Result<Grid, CsvError> {
        self.read_with(input, &TextCodec)
    }

    pub fn read_str(&self, text: &str) -> Result<Grid, CsvError> {
        self.read_with(text.as_bytes(), &TextCodec)
    }

    pub fn read_path(&self, path: &Path) -> Result<Grid, CsvError> {
        self.read_path_with(path, &TextCodec)
    }

    pub fn read_path_with<V, C>(&self, path: &Path, codec: &C) -> Result<Grid<V>, CsvError>
    where
        C: ValueCodec<V> + ?Sized,
    {
        let file = File::open(path)?;
        log::debug!("reading grid from {}", path.display());
        self.read_with(file, codec)
    }

    /// Reads the whole of `input` and decodes every value with `codec`.
    pub fn read_with<R, V, C>(&self, mut input: R, codec: &C) -> Result<Grid<V>, CsvError>
    where
        R: Read,
        C: ValueCodec<V> + ?Sized,
    {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;

        let dialect = match &self.dialect {
            Some(dialect) => dialect.clone(),
            None => sniff(&bytes)?,
        };

        let lines = read_records(&dialect, &bytes)?;
        let grid = Grid::from_lines_with(lines, codec)?;
        log::debug!(
            "read grid with {} rows and {} columns",
            grid.row_count(),
            grid.col_count()
        );
        Ok(grid)
    }
}

/// Parses every record, requiring all of them to be as wide as the first.
fn read_records(dialect: &Dialect, bytes: &[u8]) -> Result<Vec<Vec<String>>, CsvError> {
    let mut reader = dialect.reader_builder().from_reader(bytes);
    let mut lines: Vec<Vec<String>> = Vec::new();

    for result in reader.records() {
        let record = result.map_err(utf8_as_format)?;
        let line = record.position().map(|pos| pos.line());

        if let Some(first) = lines.first() {
            if record.len() != first.len() {
                return Err(CsvError::format(
                    line,
                    format!(
                        "record has {} fields, header has {}",
                        record.len(),
                        first.len()
                    ),
                ));
            }
        }
        log::trace!("record at line {:?}: {} fields", line, record.len());
        lines.push(record.iter().map(str::to_string).collect());
    }

    if lines.is_empty() {
        return Err(CsvError::format(None, "input contains no records"));
    }
    Ok(lines)
}

fn utf8_as_format(err: csv::Error) -> CsvError {
    if let csv::ErrorKind::Utf8 { pos, err: utf8 } = err.kind() {
        return CsvError::format(
            pos.as_ref().map(|pos| pos.line()),
            format!("invalid UTF-8: {}", utf8),
        );
    }
    CsvError::Csv(err)
}
