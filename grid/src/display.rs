//! FILENAME: grid/src/display.rs
//! PURPOSE: Plain-text renderings of a grid for logs and terminals.

use std::fmt::{self, Display};

use crate::grid::Grid;

/// Tab-separated: the header line (title, then column headings), followed by
/// one line per row.
impl<V: Display> Display for Grid<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for heading in self.cols.iter() {
            write!(f, "\t{}", heading)?;
        }
        for (heading, line) in self.rows.iter().zip(&self.data) {
            write!(f, "\n{}", heading)?;
            for value in line {
                write!(f, "\t{}", value)?;
            }
        }
        Ok(())
    }
}

impl<V: Display> Grid<V> {
    /// Renders the grid with every column left-aligned and padded to its
    /// widest entry plus `padding` spaces. Lines end with `\n`.
    pub fn render_aligned(&self, padding: usize) -> String {
        let mut columns: Vec<Vec<String>> = Vec::with_capacity(self.cols.len() + 1);

        let mut headings = vec![self.title.clone()];
        headings.extend(self.rows.iter().map(str::to_string));
        columns.push(headings);

        for (c, heading) in self.cols.iter().enumerate() {
            let mut column = vec![heading.to_string()];
            column.extend(self.data.iter().map(|line| line[c].to_string()));
            columns.push(column);
        }

        let widths: Vec<usize> = columns
            .iter()
            .map(|column| column.iter().map(|text| text.chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for r in 0..=self.rows.len() {
            let line: String = columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| format!("{:<w$}", column[r], w = width + padding))
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
