//! FILENAME: grid/src/view.rs
//! PURPOSE: Borrowed views over a single row or column, and the grid iterators.
//! CONTEXT: Views are created on demand from a heading lookup and hold the
//! storage position of their line. Shared views read; the `*Mut` views write
//! straight through to the owning grid. Iterators walk the grid in the current
//! heading order, so they always reflect the grid as it is when iterated.

use std::iter::Enumerate;
use std::slice;

use crate::cell::Cell;
use crate::error::GridError;
use crate::grid::Grid;

// ============================================================================
// ROW VIEWS
// ============================================================================

/// Read-only view of one row.
#[derive(Debug)]
pub struct RowView<'a, V> {
    grid: &'a Grid<V>,
    pos: usize,
}

impl<V> Clone for RowView<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for RowView<'_, V> {}

impl<'a, V> RowView<'a, V> {
    pub fn heading(&self) -> &'a str {
        &self.grid.rows.as_slice()[self.pos]
    }

    pub fn get(&self, col: &str) -> Result<&'a V, GridError> {
        let c = self.grid.cols.require(col)?;
        Ok(&self.grid.data[self.pos][c])
    }

    /// Values in column heading order.
    pub fn values(&self) -> &'a [V] {
        &self.grid.data[self.pos]
    }

    pub fn len(&self) -> usize {
        self.grid.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.cols.is_empty()
    }

    /// `(column heading, value)` pairs in column heading order.
    pub fn iter(&self) -> RowIter<'a, V> {
        RowIter {
            headings: self.grid.cols.as_slice().iter(),
            values: self.grid.data[self.pos].iter(),
        }
    }
}

impl<'a, V> IntoIterator for RowView<'a, V> {
    type Item = (&'a str, &'a V);
    type IntoIter = RowIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mutable view of one row.
#[derive(Debug)]
pub struct RowViewMut<'a, V> {
    grid: &'a mut Grid<V>,
    pos: usize,
}

impl<V> RowViewMut<'_, V> {
    pub fn heading(&self) -> &str {
        &self.grid.rows.as_slice()[self.pos]
    }

    pub fn get(&self, col: &str) -> Result<&V, GridError> {
        let c = self.grid.cols.require(col)?;
        Ok(&self.grid.data[self.pos][c])
    }

    pub fn get_mut(&mut self, col: &str) -> Result<&mut V, GridError> {
        let c = self.grid.cols.require(col)?;
        Ok(&mut self.grid.data[self.pos][c])
    }

    /// Writes one cell of the row and returns the value it replaced.
    pub fn set(&mut self, col: &str, value: V) -> Result<V, GridError> {
        let cell = self.get_mut(col)?;
        Ok(std::mem::replace(cell, value))
    }

    pub fn values(&self) -> &[V] {
        &self.grid.data[self.pos]
    }

    pub fn iter(&self) -> RowIter<'_, V> {
        RowIter {
            headings: self.grid.cols.as_slice().iter(),
            values: self.grid.data[self.pos].iter(),
        }
    }
}

// ============================================================================
// COLUMN VIEWS
// ============================================================================

/// Read-only view of one column.
#[derive(Debug)]
pub struct ColumnView<'a, V> {
    grid: &'a Grid<V>,
    pos: usize,
}

impl<V> Clone for ColumnView<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ColumnView<'_, V> {}

impl<'a, V> ColumnView<'a, V> {
    pub fn heading(&self) -> &'a str {
        &self.grid.cols.as_slice()[self.pos]
    }

    pub fn get(&self, row: &str) -> Result<&'a V, GridError> {
        let r = self.grid.rows.require(row)?;
        Ok(&self.grid.data[r][self.pos])
    }

    /// Values in row heading order.
    pub fn values(&self) -> Vec<&'a V> {
        self.iter().map(|(_, value)| value).collect()
    }

    pub fn len(&self) -> usize {
        self.grid.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.rows.is_empty()
    }

    /// `(row heading, value)` pairs in row heading order.
    pub fn iter(&self) -> ColumnIter<'a, V> {
        ColumnIter {
            headings: self.grid.rows.as_slice().iter().enumerate(),
            data: &self.grid.data,
            pos: self.pos,
        }
    }
}

impl<'a, V> IntoIterator for ColumnView<'a, V> {
    type Item = (&'a str, &'a V);
    type IntoIter = ColumnIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mutable view of one column.
#[derive(Debug)]
pub struct ColumnViewMut<'a, V> {
    grid: &'a mut Grid<V>,
    pos: usize,
}

impl<V> ColumnViewMut<'_, V> {
    pub fn heading(&self) -> &str {
        &self.grid.cols.as_slice()[self.pos]
    }

    pub fn get(&self, row: &str) -> Result<&V, GridError> {
        let r = self.grid.rows.require(row)?;
        Ok(&self.grid.data[r][self.pos])
    }

    pub fn get_mut(&mut self, row: &str) -> Result<&mut V, GridError> {
        let r = self.grid.rows.require(row)?;
        Ok(&mut self.grid.data[r][self.pos])
    }

    /// Writes one cell of the column and returns the value it replaced.
    pub fn set(&mut self, row: &str, value: V) -> Result<V, GridError> {
        let cell = self.get_mut(row)?;
        Ok(std::mem::replace(cell, value))
    }

    pub fn iter(&self) -> ColumnIter<'_, V> {
        ColumnIter {
            headings: self.grid.rows.as_slice().iter().enumerate(),
            data: &self.grid.data,
            pos: self.pos,
        }
    }
}

// ============================================================================
// LINE ITERATORS
// ============================================================================

/// Walks one row as `(column heading, value)`.
#[derive(Debug)]
pub struct RowIter<'a, V> {
    headings: slice::Iter<'a, String>,
    values: slice::Iter<'a, V>,
}

impl<'a, V> Iterator for RowIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let heading = self.headings.next()?;
        let value = self.values.next()?;
        Some((heading.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.headings.size_hint()
    }
}

impl<V> ExactSizeIterator for RowIter<'_, V> {}

/// Walks one column as `(row heading, value)`.
#[derive(Debug)]
pub struct ColumnIter<'a, V> {
    headings: Enumerate<slice::Iter<'a, String>>,
    data: &'a [Vec<V>],
    pos: usize,
}

impl<'a, V> Iterator for ColumnIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (r, heading) = self.headings.next()?;
        Some((heading.as_str(), &self.data[r][self.pos]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.headings.size_hint()
    }
}

impl<V> ExactSizeIterator for ColumnIter<'_, V> {}

// ============================================================================
// GRID ITERATORS
// ============================================================================

/// Yields `(row heading, RowView)` in row heading order.
#[derive(Debug)]
pub struct Rows<'a, V> {
    grid: &'a Grid<V>,
    next: usize,
}

impl<'a, V> Iterator for Rows<'a, V> {
    type Item = (&'a str, RowView<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let heading = self.grid.rows.get(self.next)?;
        let view = RowView {
            grid: self.grid,
            pos: self.next,
        };
        self.next += 1;
        Some((heading, view))
    }
}

/// Yields `(column heading, ColumnView)` in column heading order.
#[derive(Debug)]
pub struct Cols<'a, V> {
    grid: &'a Grid<V>,
    next: usize,
}

impl<'a, V> Iterator for Cols<'a, V> {
    type Item = (&'a str, ColumnView<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let heading = self.grid.cols.get(self.next)?;
        let view = ColumnView {
            grid: self.grid,
            pos: self.next,
        };
        self.next += 1;
        Some((heading, view))
    }
}

/// Yields every cell, left to right, top to bottom.
#[derive(Debug)]
pub struct Cells<'a, V> {
    grid: &'a Grid<V>,
    row: usize,
    col: usize,
}

impl<'a, V> Iterator for Cells<'a, V> {
    type Item = Cell<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.grid.cols.len() {
            if self.grid.cols.is_empty() {
                return None;
            }
            self.col = 0;
            self.row += 1;
        }
        let row = self.grid.rows.get(self.row)?;
        let col = self.grid.cols.get(self.col)?;
        let value = &self.grid.data[self.row][self.col];
        self.col += 1;
        Some(Cell::new(row, col, value))
    }
}

// ============================================================================
// GRID ENTRY POINTS
// ============================================================================

impl<V> Grid<V> {
    pub fn row_view(&self, heading: &str) -> Result<RowView<'_, V>, GridError> {
        let pos = self.rows.require(heading)?;
        Ok(RowView { grid: self, pos })
    }

    pub fn row_view_mut(&mut self, heading: &str) -> Result<RowViewMut<'_, V>, GridError> {
        let pos = self.rows.require(heading)?;
        Ok(RowViewMut { grid: self, pos })
    }

    pub fn col_view(&self, heading: &str) -> Result<ColumnView<'_, V>, GridError> {
        let pos = self.cols.require(heading)?;
        Ok(ColumnView { grid: self, pos })
    }

    pub fn col_view_mut(&mut self, heading: &str) -> Result<ColumnViewMut<'_, V>, GridError> {
        let pos = self.cols.require(heading)?;
        Ok(ColumnViewMut { grid: self, pos })
    }

    pub fn rows(&self) -> Rows<'_, V> {
        Rows { grid: self, next: 0 }
    }

    pub fn cols(&self) -> Cols<'_, V> {
        Cols { grid: self, next: 0 }
    }

    pub fn cells(&self) -> Cells<'_, V> {
        Cells {
            grid: self,
            row: 0,
            col: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::Axis;

    fn sample() -> Grid<i64> {
        Grid::from_rows(
            ["Col 1", "Col 2", "Col 3", "Col 4"],
            [("Row 1", vec![1, 2, 3, 4]), ("Row 2", vec![5, 6, 7, 8])],
        )
        .unwrap()
    }

    #[test]
    fn test_row_view_lookup() {
        let grid = sample();
        let row = grid.row_view("Row 2").unwrap();
        assert_eq!(row.heading(), "Row 2");
        assert_eq!(*row.get("Col 1").unwrap(), 5);
        assert_eq!(row.values(), [5, 6, 7, 8]);
        assert!(matches!(
            row.get("Col ?"),
            Err(GridError::UnknownHeading { axis: Axis::Column, .. })
        ));
        assert!(matches!(
            grid.row_view("R3"),
            Err(GridError::UnknownHeading { axis: Axis::Row, .. })
        ));
    }

    #[test]
    fn test_mut_views_write_through() {
        let mut grid: Grid = Grid::with_headings(["Mon", "Tue"], ["Breakfast", "Lunch"]).unwrap();
        {
            let mut mon = grid.row_view_mut("Mon").unwrap();
            mon.set("Breakfast", "Toast".to_string()).unwrap();
            mon.set("Lunch", "Soup".to_string()).unwrap();
            assert!(mon.set("Dinner", "Curry".to_string()).is_err());
        }
        {
            let mut lunch = grid.col_view_mut("Lunch").unwrap();
            let previous = lunch.set("Tue", "Salad".to_string()).unwrap();
            assert_eq!(previous, "");
            lunch.get_mut("Mon").unwrap().push('!');
        }
        assert_eq!(grid.row("Mon").unwrap(), ["Toast", "Soup!"]);
        assert_eq!(grid.row("Tue").unwrap(), ["", "Salad"]);
    }

    #[test]
    fn test_iters() {
        let grid = sample();

        let cols: Vec<(&str, Vec<(&str, i64)>)> = grid
            .cols()
            .map(|(heading, col)| (heading, col.iter().map(|(r, v)| (r, *v)).collect()))
            .collect();
        assert_eq!(cols.len(), 4);
        assert_eq!(cols[0], ("Col 1", vec![("Row 1", 1), ("Row 2", 5)]));
        assert_eq!(cols[3], ("Col 4", vec![("Row 1", 4), ("Row 2", 8)]));

        let rows: Vec<(&str, Vec<(&str, i64)>)> = grid
            .rows()
            .map(|(heading, row)| (heading, row.into_iter().map(|(c, v)| (c, *v)).collect()))
            .collect();
        assert_eq!(
            rows[1],
            (
                "Row 2",
                vec![("Col 1", 5), ("Col 2", 6), ("Col 3", 7), ("Col 4", 8)]
            )
        );

        let cells: Vec<(String, String, i64)> =
            grid.cells().map(|cell| cell.to_owned_parts()).collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], ("Row 1".to_string(), "Col 1".to_string(), 1));
        assert_eq!(cells[5], ("Row 2".to_string(), "Col 2".to_string(), 6));
    }

    #[test]
    fn test_iteration_follows_current_order() {
        let mut grid = sample();
        let before: Vec<i64> = grid.cells().map(|cell| *cell.value).collect();
        assert_eq!(before, [1, 2, 3, 4, 5, 6, 7, 8]);

        grid.swap_rows("Row 1", "Row 2").unwrap();
        let after: Vec<i64> = grid.cells().map(|cell| *cell.value).collect();
        assert_eq!(after, [5, 6, 7, 8, 1, 2, 3, 4]);
    }

    #[test]
    fn test_cells_on_degenerate_grids() {
        let no_cols: Grid = Grid::with_headings(["a", "b"], Vec::<String>::new()).unwrap();
        assert_eq!(no_cols.cells().count(), 0);
        assert_eq!(no_cols.rows().count(), 2);

        let no_rows: Grid = Grid::with_headings(Vec::<String>::new(), ["x"]).unwrap();
        assert_eq!(no_rows.cells().count(), 0);
        assert_eq!(no_rows.cols().count(), 1);
    }

    #[test]
    fn test_column_view_values() {
        let grid = sample();
        let col = grid.col_view("Col 3").unwrap();
        assert_eq!(col.heading(), "Col 3");
        assert_eq!(col.len(), 2);
        assert_eq!(col.values(), [&3i64, &7]);
        assert_eq!(*col.get("Row 2").unwrap(), 7);
        assert_eq!(col.iter().len(), 2);
    }
}
