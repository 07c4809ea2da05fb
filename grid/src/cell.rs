//! FILENAME: grid/src/cell.rs
//! PURPOSE: The value object yielded when walking every cell of a grid.
//! CONTEXT: A `Cell` borrows its headings and value from the grid it was
//! produced from. It has no identity beyond those coordinates.

use serde::Serialize;

/// One (row heading, column heading, value) triple.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Cell<'a, V> {
    pub row: &'a str,
    pub col: &'a str,
    pub value: &'a V,
}

impl<'a, V> Cell<'a, V> {
    pub fn new(row: &'a str, col: &'a str, value: &'a V) -> Self {
        Cell { row, col, value }
    }

    /// Copies the cell out of the grid.
    pub fn to_owned_parts(&self) -> (String, String, V)
    where
        V: Clone,
    {
        (self.row.to_string(), self.col.to_string(), self.value.clone())
    }
}

// Manual impls: a derive would demand `V: Clone`/`V: Copy`.
impl<V> Clone for Cell<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Cell<'_, V> {}
