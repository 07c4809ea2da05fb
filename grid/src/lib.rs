//! FILENAME: grid/src/lib.rs
//! PURPOSE: Main library entry point for the heading-addressed grid.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cell;
pub mod codec;
pub mod combine;
pub mod display;
pub mod error;
pub mod grid;
pub mod heading;
pub mod view;

// Re-export commonly used types at the crate root
pub use cell::Cell;
pub use codec::{OptionalCodec, ParseCodec, TextCodec, ValueCodec};
pub use error::GridError;
pub use grid::Grid;
pub use heading::{Axis, HeadingIndex};
pub use view::{
    Cells, Cols, ColumnIter, ColumnView, ColumnViewMut, RowIter, RowView, RowViewMut, Rows,
};
