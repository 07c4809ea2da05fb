//! FILENAME: grid-csv/src/writer.rs
//! PURPOSE: Writes grids as CSV text.
//! CONTEXT: The header record is the grid title followed by the column
//! headings; each following record is a row heading followed by that row's
//! values, encoded through the supplied codec, in current heading order.

use std::fs::File;
use std::io::Write;
use std::iter;
use std::path::Path;

use grid::{Grid, TextCodec, ValueCodec};

use crate::dialect::Dialect;
use crate::error::CsvError;

/// Writes a `Grid` as CSV using a fixed dialect.
#[derive(Debug, Clone, Default)]
pub struct CsvWriter {
    dialect: Dialect,
}

impl CsvWriter {
    pub fn new() -> Self {
        CsvWriter::default()
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn write<W: Write>(&self, grid: &Grid, output: W) -> Result<(), CsvError> {
        self.write_with(grid, output, &TextCodec)
    }

    pub fn to_string(&self, grid: &Grid) -> Result<String, CsvError> {
        self.to_string_with(grid, &TextCodec)
    }

    pub fn to_string_with<V, C>(&self, grid: &Grid<V>, codec: &C) -> Result<String, CsvError>
    where
        C: ValueCodec<V> + ?Sized,
    {
        let mut buffer = Vec::new();
        self.write_with(grid, &mut buffer, codec)?;
        String::from_utf8(buffer).map_err(|e| CsvError::format(None, e.to_string()))
    }

    pub fn write_path(&self, grid: &Grid, path: &Path) -> Result<(), CsvError> {
        self.write_path_with(grid, path, &TextCodec)
    }

    pub fn write_path_with<V, C>(&self, grid: &Grid<V>, path: &Path, codec: &C) -> Result<(), CsvError>
    where
        C: ValueCodec<V> + ?Sized,
    {
        let file = File::create(path)?;
        log::debug!("writing grid to {}", path.display());
        self.write_with(grid, file, codec)
    }

    /// Writes the header and every row, encoding values with `codec`.
    pub fn write_with<W, V, C>(&self, grid: &Grid<V>, output: W, codec: &C) -> Result<(), CsvError>
    where
        W: Write,
        C: ValueCodec<V> + ?Sized,
    {
        let mut writer = self.dialect.writer_builder().from_writer(output);

        let header = iter::once(grid.title()).chain(grid.col_headings().iter().map(String::as_str));
        writer.write_record(header)?;

        let mut record: Vec<String> = Vec::with_capacity(grid.col_count() + 1);
        for (heading, row) in grid.rows() {
            record.clear();
            record.push(heading.to_string());
            for (col, value) in row {
                record.push(codec.encode(heading, col, value)?);
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        log::debug!(
            "wrote grid with {} rows and {} columns",
            grid.row_count(),
            grid.col_count()
        );
        Ok(())
    }
}
