//! FILENAME: grid/src/error.rs

use thiserror::Error;

use crate::heading::Axis;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Duplicate {axis} heading: {heading:?}")]
    DuplicateHeading { axis: Axis, heading: String },

    #[error("Unknown {axis} heading: {heading:?}")]
    UnknownHeading { axis: Axis, heading: String },

    /// `axis` is the kind of line being written; `expected` is the length of
    /// the opposite heading sequence.
    #[error("A {axis} needs {expected} values, got {actual}")]
    LengthMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Incompatible grids: {0}")]
    IncompatibleGrids(String),

    #[error("Cannot decode value at ({row:?}, {col:?}): {message}")]
    Decode {
        row: String,
        col: String,
        message: String,
    },

    #[error("Cannot encode value at ({row:?}, {col:?}): {message}")]
    Encode {
        row: String,
        col: String,
        message: String,
    },
}
