//! FILENAME: grid/src/grid.rs
//! PURPOSE: The heading-addressed grid container.
//! CONTEXT: This file defines the `Grid` struct which holds a dense,
//! rectangular block of values. Rows and columns are identified by their
//! headings; each axis keeps a `HeadingIndex` that maps a heading to the
//! position of its line in storage. Every operation that changes heading
//! order applies the same permutation to the stored values.

use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

use crate::codec::{TextCodec, ValueCodec};
use crate::error::GridError;
use crate::heading::{permute, Axis, HeadingIndex};

/// A dense 2D table addressed by (row heading, column heading).
///
/// Storage is row-major: `data[row_position][col_position]`. Every row holds
/// exactly `col_count()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<V = String> {
    /// Label for the top-left corner of the table.
    pub(crate) title: String,
    pub(crate) rows: HeadingIndex,
    pub(crate) cols: HeadingIndex,
    pub(crate) data: Vec<Vec<V>>,
}

impl<V> Grid<V> {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Creates a grid with the given headings and every cell set to
    /// `V::default()`.
    ///
    /// ```
    /// use grid::Grid;
    ///
    /// let mut grid: Grid = Grid::with_headings(["Mon", "Tue"], ["Breakfast", "Lunch"]).unwrap();
    /// grid[("Mon", "Breakfast")] = "Toast".to_string();
    /// grid[("Mon", "Lunch")] = "Soup".to_string();
    /// assert_eq!(grid.row("Mon").unwrap(), ["Toast", "Soup"]);
    /// ```
    pub fn with_headings<R, C, S, T>(row_headings: R, col_headings: C) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = T>,
        T: Into<String>,
        V: Default,
    {
        let rows = HeadingIndex::from_headings(Axis::Row, row_headings)?;
        let cols = HeadingIndex::from_headings(Axis::Column, col_headings)?;
        let data = (0..rows.len())
            .map(|_| (0..cols.len()).map(|_| V::default()).collect::<Vec<V>>())
            .collect();

        Ok(Grid {
            title: String::new(),
            rows,
            cols,
            data,
        })
    }

    /// Creates a grid with the given headings and every cell set to `fill`.
    pub fn filled<R, C, S, T>(row_headings: R, col_headings: C, fill: V) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = T>,
        T: Into<String>,
        V: Clone,
    {
        let rows = HeadingIndex::from_headings(Axis::Row, row_headings)?;
        let cols = HeadingIndex::from_headings(Axis::Column, col_headings)?;
        let data = vec![vec![fill; cols.len()]; rows.len()];

        Ok(Grid {
            title: String::new(),
            rows,
            cols,
            data,
        })
    }

    /// Builds a grid from column headings and `(row heading, values)` pairs.
    pub fn from_rows<C, T, R, H>(col_headings: C, rows: R) -> Result<Self, GridError>
    where
        C: IntoIterator<Item = T>,
        T: Into<String>,
        R: IntoIterator<Item = (H, Vec<V>)>,
        H: Into<String>,
    {
        let cols = HeadingIndex::from_headings(Axis::Column, col_headings)?;
        let mut grid = Grid {
            title: String::new(),
            rows: HeadingIndex::new(Axis::Row),
            cols,
            data: Vec::new(),
        };
        for (heading, values) in rows {
            grid.append_row(heading, values)?;
        }
        Ok(grid)
    }

    /// Builds a grid from text lines, decoding each value with `codec`.
    ///
    /// The first line is `(title, col1, col2, ...)`; each following line is
    /// `(row_heading, v1, v2, ...)` and must be as long as the first.
    pub fn from_lines_with<L, I, S, C>(lines: L, codec: &C) -> Result<Self, GridError>
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: ValueCodec<V> + ?Sized,
    {
        let mut lines = lines.into_iter();
        let mut header = match lines.next() {
            Some(line) => line.into_iter().map(Into::<String>::into),
            None => return Err(GridError::MalformedInput("no header line".to_string())),
        };
        let title = header
            .next()
            .ok_or_else(|| GridError::MalformedInput("header line is empty".to_string()))?;
        let cols = HeadingIndex::from_headings(Axis::Column, header)?;
        let width = cols.len() + 1;

        let mut grid = Grid {
            title,
            rows: HeadingIndex::new(Axis::Row),
            cols,
            data: Vec::new(),
        };

        for (offset, line) in lines.enumerate() {
            let fields: Vec<String> = line.into_iter().map(Into::into).collect();
            if fields.len() != width {
                return Err(GridError::MalformedInput(format!(
                    "line {} has {} fields, header has {}",
                    offset + 2,
                    fields.len(),
                    width
                )));
            }

            let mut fields = fields.into_iter();
            let heading = fields.next().unwrap_or_default();
            grid.rows.check_new(&heading)?;
            let values = fields
                .zip(grid.cols.iter())
                .map(|(text, col)| codec.decode(&heading, col, text))
                .collect::<Result<Vec<V>, GridError>>()?;

            grid.rows.push(heading)?;
            grid.data.push(values);
        }

        Ok(grid)
    }

    /// Sets the top-left label.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    // ========================================================================
    // SHAPE
    // ========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn row_headings(&self) -> &[String] {
        self.rows.as_slice()
    }

    pub fn col_headings(&self) -> &[String] {
        self.cols.as_slice()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    /// True when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    pub fn contains_row(&self, heading: &str) -> bool {
        self.rows.contains(heading)
    }

    pub fn contains_col(&self, heading: &str) -> bool {
        self.cols.contains(heading)
    }

    /// True when both grids have the same row and column heading sets,
    /// regardless of order and values.
    pub fn same_headings<W>(&self, other: &Grid<W>) -> bool {
        self.rows.same_set(&other.rows) && self.cols.same_set(&other.cols)
    }

    // ========================================================================
    // CELL ACCESS
    // ========================================================================

    pub fn get(&self, row: &str, col: &str) -> Result<&V, GridError> {
        let r = self.rows.require(row)?;
        let c = self.cols.require(col)?;
        Ok(&self.data[r][c])
    }

    pub fn get_mut(&mut self, row: &str, col: &str) -> Result<&mut V, GridError> {
        let r = self.rows.require(row)?;
        let c = self.cols.require(col)?;
        Ok(&mut self.data[r][c])
    }

    /// Writes a cell and returns the value it replaced.
    pub fn set(&mut self, row: &str, col: &str, value: V) -> Result<V, GridError> {
        let cell = self.get_mut(row, col)?;
        Ok(std::mem::replace(cell, value))
    }

    /// The values of one row, in column heading order.
    pub fn row(&self, heading: &str) -> Result<&[V], GridError> {
        let r = self.rows.require(heading)?;
        Ok(&self.data[r])
    }

    /// The values of one column, in row heading order.
    pub fn col(&self, heading: &str) -> Result<Vec<&V>, GridError> {
        let c = self.cols.require(heading)?;
        Ok(self.data.iter().map(|line| &line[c]).collect())
    }

    // ========================================================================
    // LINE MUTATION
    // ========================================================================

    /// Adds a row at the bottom of the grid.
    pub fn append_row<H, I>(&mut self, heading: H, values: I) -> Result<(), GridError>
    where
        H: Into<String>,
        I: IntoIterator<Item = V>,
    {
        let heading = heading.into();
        let values: Vec<V> = values.into_iter().collect();
        self.rows.check_new(&heading)?;
        self.check_length(Axis::Row, values.len())?;

        self.rows.push(heading)?;
        self.data.push(values);
        Ok(())
    }

    /// Adds a column at the right edge of the grid.
    pub fn append_col<H, I>(&mut self, heading: H, values: I) -> Result<(), GridError>
    where
        H: Into<String>,
        I: IntoIterator<Item = V>,
    {
        let heading = heading.into();
        let values: Vec<V> = values.into_iter().collect();
        self.cols.check_new(&heading)?;
        self.check_length(Axis::Column, values.len())?;

        self.cols.push(heading)?;
        for (line, value) in self.data.iter_mut().zip(values) {
            line.push(value);
        }
        Ok(())
    }

    /// Replaces every value of an existing row, returning the old values.
    pub fn set_row<I>(&mut self, heading: &str, values: I) -> Result<Vec<V>, GridError>
    where
        I: IntoIterator<Item = V>,
    {
        let r = self.rows.require(heading)?;
        let values: Vec<V> = values.into_iter().collect();
        self.check_length(Axis::Row, values.len())?;
        Ok(std::mem::replace(&mut self.data[r], values))
    }

    /// Replaces every value of an existing column, returning the old values.
    pub fn set_col<I>(&mut self, heading: &str, values: I) -> Result<Vec<V>, GridError>
    where
        I: IntoIterator<Item = V>,
    {
        let c = self.cols.require(heading)?;
        let values: Vec<V> = values.into_iter().collect();
        self.check_length(Axis::Column, values.len())?;
        Ok(self
            .data
            .iter_mut()
            .zip(values)
            .map(|(line, value)| std::mem::replace(&mut line[c], value))
            .collect())
    }

    /// A new row needs one value per column, a new column one per row.
    fn check_length(&self, axis: Axis, actual: usize) -> Result<(), GridError> {
        let expected = match axis {
            Axis::Row => self.cols.len(),
            Axis::Column => self.rows.len(),
        };
        if actual != expected {
            return Err(GridError::LengthMismatch {
                axis,
                expected,
                actual,
            });
        }
        Ok(())
    }

    // ========================================================================
    // REORDERING
    // ========================================================================

    pub fn swap_rows(&mut self, a: &str, b: &str) -> Result<(), GridError> {
        let pa = self.rows.require(a)?;
        let pb = self.rows.require(b)?;
        self.rows.swap(pa, pb);
        self.data.swap(pa, pb);
        Ok(())
    }

    pub fn swap_cols(&mut self, a: &str, b: &str) -> Result<(), GridError> {
        let pa = self.cols.require(a)?;
        let pb = self.cols.require(b)?;
        self.cols.swap(pa, pb);
        for line in &mut self.data {
            line.swap(pa, pb);
        }
        Ok(())
    }

    /// Puts the rows in the order given. `order` must list every row heading
    /// exactly once; otherwise nothing changes.
    pub fn reorder_rows<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), GridError> {
        let perm = self.rows.permutation_for(order)?;
        self.permute_rows(&perm);
        Ok(())
    }

    /// Puts the columns in the order given. `order` must list every column
    /// heading exactly once; otherwise nothing changes.
    pub fn reorder_cols<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), GridError> {
        let perm = self.cols.permutation_for(order)?;
        self.permute_cols(&perm);
        Ok(())
    }

    /// Stable sort of the rows by heading.
    pub fn sort_rows_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        let mut perm: Vec<usize> = (0..self.rows.len()).collect();
        let headings = self.rows.as_slice();
        perm.sort_by(|&a, &b| compare(headings[a].as_str(), headings[b].as_str()));
        self.permute_rows(&perm);
    }

    /// Stable sort of the columns by heading.
    pub fn sort_cols_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        let mut perm: Vec<usize> = (0..self.cols.len()).collect();
        let headings = self.cols.as_slice();
        perm.sort_by(|&a, &b| compare(headings[a].as_str(), headings[b].as_str()));
        self.permute_cols(&perm);
    }

    fn permute_rows(&mut self, perm: &[usize]) {
        log::trace!("permuting {} rows", perm.len());
        self.rows.apply_permutation(perm);
        let data = std::mem::take(&mut self.data);
        self.data = permute(data, perm);
    }

    fn permute_cols(&mut self, perm: &[usize]) {
        log::trace!("permuting {} columns", perm.len());
        self.cols.apply_permutation(perm);
        let data = std::mem::take(&mut self.data);
        self.data = data.into_iter().map(|line| permute(line, perm)).collect();
    }
}

impl Grid<String> {
    /// Builds a text grid from lines, keeping every value as-is.
    ///
    /// See `from_lines_with` for the expected layout.
    pub fn from_lines<L, I, S>(lines: L) -> Result<Self, GridError>
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_lines_with(lines, &TextCodec)
    }
}

/// `grid[(row, col)]` panics on an unknown heading, like map indexing.
/// Use `Grid::get` for the fallible form.
impl<V> Index<(&str, &str)> for Grid<V> {
    type Output = V;

    fn index(&self, (row, col): (&str, &str)) -> &V {
        match self.get(row, col) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<V> IndexMut<(&str, &str)> for Grid<V> {
    fn index_mut(&mut self, (row, col): (&str, &str)) -> &mut V {
        match self.get_mut(row, col) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ParseCodec;

    fn sample() -> Grid<i64> {
        Grid::from_rows(
            ["Col 1", "Col 2", "Col 3", "Col 4"],
            [("Row 1", vec![1, 2, 3, 4]), ("Row 2", vec![5, 6, 7, 8])],
        )
        .unwrap()
        .with_title("Test Grid")
    }

    #[test]
    fn test_meal_plan() {
        let mut grid: Grid = Grid::with_headings(["Mon", "Tue"], ["Breakfast", "Lunch"]).unwrap();
        grid[("Mon", "Breakfast")] = "Toast".to_string();
        grid.set("Mon", "Lunch", "Soup".to_string()).unwrap();

        assert_eq!(grid.row("Mon").unwrap(), ["Toast", "Soup"]);
        assert_eq!(grid.row("Tue").unwrap(), ["", ""]);
    }

    #[test]
    fn test_filled_uses_fill_value() {
        let grid = Grid::filled(["a", "b"], ["x"], 9u8).unwrap();
        assert_eq!(grid.col("x").unwrap(), [&9u8, &9u8]);
    }

    #[test]
    fn test_duplicate_headings_rejected() {
        let result: Result<Grid, _> = Grid::with_headings(["Mon", "Mon"], ["Lunch"]);
        assert!(matches!(
            result,
            Err(GridError::DuplicateHeading { axis: Axis::Row, .. })
        ));

        let result: Result<Grid, _> = Grid::with_headings(["Mon"], ["Lunch", "Lunch"]);
        assert!(matches!(
            result,
            Err(GridError::DuplicateHeading { axis: Axis::Column, .. })
        ));
    }

    #[test]
    fn test_from_lines_decodes_values() {
        let lines = [["", "A", "B"], ["R1", "1", "2"], ["R2", "3", "4"]];
        let grid = Grid::from_lines_with(lines, &ParseCodec::<i64>::new()).unwrap();

        assert_eq!(grid[("R2", "A")], 3);
        assert_eq!(grid.title(), "");
        assert_eq!(grid.row_headings(), ["R1", "R2"]);
        assert_eq!(grid.col_headings(), ["A", "B"]);
    }

    #[test]
    fn test_from_lines_keeps_title() {
        let lines = vec![vec!["Meals", "Mon"], vec!["Lunch", "Soup"]];
        let grid = Grid::from_lines(lines).unwrap();
        assert_eq!(grid.title(), "Meals");
        assert_eq!(grid.get("Lunch", "Mon").unwrap(), "Soup");
    }

    #[test]
    fn test_from_lines_malformed() {
        let empty: Vec<Vec<&str>> = Vec::new();
        assert!(matches!(
            Grid::from_lines(empty),
            Err(GridError::MalformedInput(_))
        ));

        let ragged = vec![vec!["", "A", "B"], vec!["R1", "1"]];
        assert!(matches!(
            Grid::from_lines(ragged),
            Err(GridError::MalformedInput(_))
        ));

        let repeated = vec![vec!["", "A"], vec!["R1", "1"], vec!["R1", "2"]];
        assert!(matches!(
            Grid::from_lines(repeated),
            Err(GridError::DuplicateHeading { axis: Axis::Row, .. })
        ));

        let repeated = vec![vec!["", "A", "A"], vec!["R1", "1", "2"]];
        assert!(matches!(
            Grid::from_lines(repeated),
            Err(GridError::DuplicateHeading { axis: Axis::Column, .. })
        ));
    }

    #[test]
    fn test_subscripting() {
        let grid = sample();
        assert_eq!(grid[("Row 1", "Col 3")], 3);
        assert_eq!(grid[("Row 2", "Col 2")], 6);
        assert_eq!(*grid.get("Row 2", "Col 4").unwrap(), 8);
        assert!(matches!(
            grid.get("Row ?", "Col 1"),
            Err(GridError::UnknownHeading { axis: Axis::Row, .. })
        ));
        assert!(matches!(
            grid.get("Row 1", "Col ?"),
            Err(GridError::UnknownHeading { axis: Axis::Column, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "Unknown row heading")]
    fn test_index_panics_on_unknown_row() {
        let grid = sample();
        let _ = grid[("Row 3", "Col 1")];
    }

    #[test]
    fn test_col_row() {
        let grid = sample();
        assert_eq!(grid.col("Col 1").unwrap(), [&1i64, &5]);
        assert_eq!(grid.col("Col 4").unwrap(), [&4i64, &8]);
        assert_eq!(grid.row("Row 2").unwrap(), [5, 6, 7, 8]);
        assert!(grid.col("Col ?").is_err());
        assert!(grid.row("Row ?").is_err());

        for heading in grid.row_headings() {
            assert_eq!(grid.row(heading).unwrap().len(), grid.col_count());
        }
        for heading in grid.col_headings() {
            assert_eq!(grid.col(heading).unwrap().len(), grid.row_count());
        }
    }

    #[test]
    fn test_appends() {
        let mut grid = sample();
        grid.append_row("Row 3", [9, 10, 11, 12]).unwrap();
        assert_eq!(grid.row("Row 3").unwrap(), [9, 10, 11, 12]);

        assert_eq!(
            grid.append_row("Row 4", [1, 2, 3, 4, 5]),
            Err(GridError::LengthMismatch {
                axis: Axis::Row,
                expected: 4,
                actual: 5
            })
        );
        assert!(matches!(
            grid.append_row("Row 1", [9, 10, 11, 12]),
            Err(GridError::DuplicateHeading { .. })
        ));
        assert_eq!(grid.row_count(), 3);

        grid.append_col("Col 5", [1, 2, 3]).unwrap();
        assert_eq!(grid.col("Col 5").unwrap(), [&1i64, &2, &3]);
        assert_eq!(grid.row("Row 1").unwrap(), [1, 2, 3, 4, 1]);

        assert!(matches!(
            grid.append_col("Col 6", [1, 2, 3, 4]),
            Err(GridError::LengthMismatch { axis: Axis::Column, .. })
        ));
        assert!(matches!(
            grid.append_col("Col 1", [9, 10, 11]),
            Err(GridError::DuplicateHeading { .. })
        ));
        assert_eq!(grid.col_count(), 5);
    }

    #[test]
    fn test_sets() {
        let mut grid = sample();
        let old = grid.set_row("Row 1", [10, 20, 30, 40]).unwrap();
        assert_eq!(old, [1, 2, 3, 4]);
        assert_eq!(grid.row("Row 1").unwrap(), [10, 20, 30, 40]);
        assert!(matches!(
            grid.set_row("Row ?", [1, 2, 3, 4]),
            Err(GridError::UnknownHeading { .. })
        ));
        assert!(matches!(
            grid.set_row("Row 1", [1, 2, 3, 4, 5]),
            Err(GridError::LengthMismatch { .. })
        ));
        assert_eq!(grid.row("Row 1").unwrap(), [10, 20, 30, 40]);

        grid.set_col("Col 2", [90, 100]).unwrap();
        assert_eq!(grid.col("Col 2").unwrap(), [&90i64, &100]);
        assert!(grid.set_col("Col ?", [1, 2]).is_err());
        assert!(grid.set_col("Col 2", [1, 2, 3]).is_err());
    }

    #[test]
    fn test_swaps() {
        let mut grid = sample();
        grid.swap_rows("Row 1", "Row 2").unwrap();
        grid.swap_cols("Col 4", "Col 2").unwrap();

        assert_eq!(grid.row_headings(), ["Row 2", "Row 1"]);
        assert_eq!(grid.col_headings(), ["Col 1", "Col 4", "Col 3", "Col 2"]);
        assert_eq!(grid.row("Row 2").unwrap(), [5, 8, 7, 6]);
        assert_eq!(grid.row("Row 1").unwrap(), [1, 4, 3, 2]);
        assert_eq!(grid[("Row 1", "Col 2")], 2);

        assert!(grid.swap_rows("Row 1", "Row ?").is_err());
        assert!(grid.swap_cols("Col ?", "Col 1").is_err());
    }

    #[test]
    fn test_swap_twice_restores() {
        let original = sample();
        let mut grid = original.clone();
        grid.swap_rows("Row 1", "Row 2").unwrap();
        grid.swap_rows("Row 1", "Row 2").unwrap();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_reorder_and_sort() {
        let mut grid = sample();
        grid.reorder_cols(&["Col 3", "Col 1", "Col 4", "Col 2"]).unwrap();
        assert_eq!(grid.row("Row 1").unwrap(), [3, 1, 4, 2]);
        assert_eq!(grid[("Row 2", "Col 2")], 6);

        assert!(grid.reorder_cols(&["Col 1"]).is_err());
        assert_eq!(grid.col_headings(), ["Col 3", "Col 1", "Col 4", "Col 2"]);

        grid.sort_cols_by(|a, b| a.cmp(b));
        assert_eq!(grid.row("Row 1").unwrap(), [1, 2, 3, 4]);

        grid.sort_rows_by(|a, b| b.cmp(a));
        assert_eq!(grid.row_headings(), ["Row 2", "Row 1"]);
        assert_eq!(grid.col("Col 1").unwrap(), [&5i64, &1]);

        grid.reorder_rows(&["Row 1", "Row 2"]).unwrap();
        assert_eq!(grid, sample());
    }

    #[test]
    fn test_same_headings() {
        let grid = sample();
        let mut other = sample();
        other.swap_cols("Col 1", "Col 3").unwrap();
        other.set("Row 1", "Col 1", 100).unwrap();
        assert!(grid.same_headings(&other));

        other.append_row("Row 3", [0, 0, 0, 0]).unwrap();
        assert!(!grid.same_headings(&other));
    }
}
