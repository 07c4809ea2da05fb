//! FILENAME: grid/src/combine.rs
//! PURPOSE: Joining two grids along one axis.
//! CONTEXT: `combine` is the strict form: the shared axis must carry exactly
//! the same heading set, and the other grid's lines are appended after being
//! re-aligned to this grid's order. `merge` is the upsert form: new lines are
//! appended and overlapping lines are optionally overwritten. Both validate
//! everything before touching storage, so a failure leaves the grid unchanged.

use std::ops::Add;

use crate::error::GridError;
use crate::grid::Grid;
use crate::heading::{permute, HeadingIndex};

impl<V> Grid<V> {
    /// Appends the rows (or columns) of `other` to this grid.
    ///
    /// If both grids have the same column headings, in any order, the rows of
    /// `other` are appended. Otherwise, if they have the same row headings,
    /// the columns of `other` are appended. Anything else is
    /// `IncompatibleGrids`. A heading that already exists on the appended
    /// axis is `DuplicateHeading`.
    pub fn combine(&mut self, other: Grid<V>) -> Result<(), GridError> {
        if self.cols.same_set(&other.cols) {
            log::debug!("combine: appending {} rows", other.rows.len());
            self.append_rows_from(other)
        } else if self.rows.same_set(&other.rows) {
            log::debug!("combine: appending {} columns", other.cols.len());
            self.append_cols_from(other)
        } else {
            Err(GridError::IncompatibleGrids(
                "grids share neither their row headings nor their column headings".to_string(),
            ))
        }
    }

    /// Folds `other` into this grid, growing along at most one axis.
    ///
    /// Rows (or columns) of `other` that are new here are appended; those that
    /// already exist are overwritten cell by cell when `overwrite` is set and
    /// left alone otherwise. When `other` brings no new headings at all, its
    /// cells are copied over the matching cells (again only with `overwrite`).
    pub fn merge(&mut self, other: Grid<V>, overwrite: bool) -> Result<(), GridError> {
        let new_rows = count_new(&other.rows, &self.rows);
        let new_cols = count_new(&other.cols, &self.cols);

        if new_rows > 0 && new_cols > 0 {
            return Err(GridError::IncompatibleGrids(format!(
                "merge would add {} rows and {} columns; only one axis may grow",
                new_rows, new_cols
            )));
        }
        if new_rows > 0 && !self.cols.same_set(&other.cols) {
            return Err(GridError::IncompatibleGrids(
                "new rows must cover every column".to_string(),
            ));
        }
        if new_cols > 0 && !self.rows.same_set(&other.rows) {
            return Err(GridError::IncompatibleGrids(
                "new columns must cover every row".to_string(),
            ));
        }

        log::debug!(
            "merge: {} new rows, {} new columns, overwrite={}",
            new_rows,
            new_cols,
            overwrite
        );

        // Every heading of `other` on the non-growing axis exists here, so the
        // position maps below cannot miss.
        let Grid {
            rows: other_rows,
            cols: other_cols,
            data: other_data,
            ..
        } = other;

        if new_cols > 0 {
            let targets = target_positions(&other_cols, &self.cols);
            for (q, line) in other_data.into_iter().enumerate() {
                let Some(p) = self.rows.position(other_rows.as_slice()[q].as_str()) else {
                    continue;
                };
                for (j, value) in line.into_iter().enumerate() {
                    match targets[j] {
                        Target::Existing(c) => {
                            if overwrite {
                                self.data[p][c] = value;
                            }
                        }
                        Target::New => self.data[p].push(value),
                    }
                }
            }
            for heading in other_cols.as_slice() {
                if !self.cols.contains(heading) {
                    self.cols.push(heading.clone())?;
                }
            }
            return Ok(());
        }

        let col_targets = target_positions(&other_cols, &self.cols);
        let alignment = alignment(&self.cols, &other_cols);
        for (q, line) in other_data.into_iter().enumerate() {
            let heading = &other_rows.as_slice()[q];
            match self.rows.position(heading) {
                Some(p) => {
                    if overwrite {
                        for (j, value) in line.into_iter().enumerate() {
                            if let Target::Existing(c) = col_targets[j] {
                                self.data[p][c] = value;
                            }
                        }
                    }
                }
                None => {
                    self.rows.push(heading.clone())?;
                    self.data.push(permute(line, &alignment));
                }
            }
        }
        Ok(())
    }

    fn append_rows_from(&mut self, other: Grid<V>) -> Result<(), GridError> {
        check_disjoint(&self.rows, &other.rows)?;
        let alignment = alignment(&self.cols, &other.cols);

        for (heading, line) in other.rows.as_slice().iter().zip(other.data) {
            self.rows.push(heading.clone())?;
            self.data.push(permute(line, &alignment));
        }
        Ok(())
    }

    fn append_cols_from(&mut self, other: Grid<V>) -> Result<(), GridError> {
        check_disjoint(&self.cols, &other.cols)?;
        let alignment = alignment(&self.rows, &other.rows);

        for (line, extra) in self.data.iter_mut().zip(permute(other.data, &alignment)) {
            line.extend(extra);
        }
        for heading in other.cols.as_slice() {
            self.cols.push(heading.clone())?;
        }
        Ok(())
    }
}

/// `a + b` is `a.combine(b)` on an owned grid.
impl<V> Add for Grid<V> {
    type Output = Result<Grid<V>, GridError>;

    fn add(mut self, rhs: Grid<V>) -> Self::Output {
        self.combine(rhs)?;
        Ok(self)
    }
}

enum Target {
    Existing(usize),
    New,
}

/// Where each heading of `incoming` lands in `receiver`.
fn target_positions(incoming: &HeadingIndex, receiver: &HeadingIndex) -> Vec<Target> {
    incoming
        .iter()
        .map(|heading| match receiver.position(heading) {
            Some(position) => Target::Existing(position),
            None => Target::New,
        })
        .collect()
}

/// For two indexes over the same heading set, `perm[i]` is the position in
/// `incoming` of the heading at position `i` in `receiver`.
fn alignment(receiver: &HeadingIndex, incoming: &HeadingIndex) -> Vec<usize> {
    receiver
        .iter()
        .filter_map(|heading| incoming.position(heading))
        .collect()
}

fn count_new(incoming: &HeadingIndex, receiver: &HeadingIndex) -> usize {
    incoming.iter().filter(|heading| !receiver.contains(heading)).count()
}

fn check_disjoint(receiver: &HeadingIndex, incoming: &HeadingIndex) -> Result<(), GridError> {
    match incoming.iter().find(|heading| receiver.contains(heading)) {
        Some(heading) => Err(GridError::DuplicateHeading {
            axis: receiver.axis(),
            heading: heading.to_string(),
        }),
        None => Ok(()),
    }
}
