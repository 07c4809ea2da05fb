//! FILENAME: grid/src/heading.rs
//! PURPOSE: Ordered, duplicate-free heading sequences for one grid axis.
//! CONTEXT: A `HeadingIndex` pairs the ordered list of headings with a
//! heading -> position map, so the grid can translate a label into a storage
//! index in O(1). Reordering only happens through `swap` and
//! `apply_permutation`, which the grid mirrors on its value storage.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Which heading sequence a heading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn opposite(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// The headings of one axis, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingIndex {
    axis: Axis,
    headings: Vec<String>,
    positions: FxHashMap<String, usize>,
}

impl HeadingIndex {
    pub fn new(axis: Axis) -> Self {
        HeadingIndex {
            axis,
            headings: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    /// Builds an index from `headings`, failing on the first repeat.
    pub fn from_headings<I, S>(axis: Axis, headings: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HeadingIndex::new(axis);
        for heading in headings {
            index.push(heading.into())?;
        }
        Ok(index)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.headings
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.headings.iter().map(String::as_str)
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.headings.get(position).map(String::as_str)
    }

    pub fn contains(&self, heading: &str) -> bool {
        self.positions.contains_key(heading)
    }

    pub fn position(&self, heading: &str) -> Option<usize> {
        self.positions.get(heading).copied()
    }

    /// Like `position`, but an absent heading is an `UnknownHeading` error.
    pub fn require(&self, heading: &str) -> Result<usize, GridError> {
        self.position(heading).ok_or_else(|| GridError::UnknownHeading {
            axis: self.axis,
            heading: heading.to_string(),
        })
    }

    /// Fails with `DuplicateHeading` if `heading` is already present.
    pub fn check_new(&self, heading: &str) -> Result<(), GridError> {
        if self.contains(heading) {
            return Err(GridError::DuplicateHeading {
                axis: self.axis,
                heading: heading.to_string(),
            });
        }
        Ok(())
    }

    /// Appends a heading and returns its position.
    pub fn push(&mut self, heading: String) -> Result<usize, GridError> {
        self.check_new(&heading)?;
        let position = self.headings.len();
        self.positions.insert(heading.clone(), position);
        self.headings.push(heading);
        Ok(position)
    }

    /// Swaps the headings at two positions. Both must be in bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.headings.swap(a, b);
        self.positions.insert(self.headings[a].clone(), a);
        self.positions.insert(self.headings[b].clone(), b);
    }

    /// True when both indexes hold the same headings, in any order.
    pub fn same_set(&self, other: &HeadingIndex) -> bool {
        self.len() == other.len() && self.iter().all(|heading| other.contains(heading))
    }

    /// Validates `order` as a permutation of the current headings.
    ///
    /// Returns `perm` where `perm[new_position] == old_position`.
    pub fn permutation_for<S: AsRef<str>>(&self, order: &[S]) -> Result<Vec<usize>, GridError> {
        if order.len() != self.len() {
            return Err(GridError::MalformedInput(format!(
                "new {} order lists {} headings, grid has {}",
                self.axis,
                order.len(),
                self.len()
            )));
        }

        let mut seen = vec![false; self.len()];
        let mut perm = Vec::with_capacity(order.len());
        for heading in order {
            let heading = heading.as_ref();
            let old = self.require(heading)?;
            if seen[old] {
                return Err(GridError::MalformedInput(format!(
                    "{} heading {:?} listed twice in new order",
                    self.axis, heading
                )));
            }
            seen[old] = true;
            perm.push(old);
        }
        Ok(perm)
    }

    /// Reorders headings so that position `i` holds the heading that was at
    /// `perm[i]`. `perm` must come from `permutation_for` or be otherwise valid.
    pub fn apply_permutation(&mut self, perm: &[usize]) {
        let headings = std::mem::take(&mut self.headings);
        self.headings = permute(headings, perm);
        for (position, heading) in self.headings.iter().enumerate() {
            self.positions.insert(heading.clone(), position);
        }
    }
}

/// Moves `items[perm[i]]` to position `i` without cloning.
pub(crate) fn permute<T>(items: Vec<T>, perm: &[usize]) -> Vec<T> {
    let mut target = vec![0; perm.len()];
    for (new, &old) in perm.iter().enumerate() {
        target[old] = new;
    }

    let mut tagged: Vec<(usize, T)> = items
        .into_iter()
        .enumerate()
        .map(|(old, item)| (target[old], item))
        .collect();
    tagged.sort_by_key(|(new, _)| *new);
    tagged.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_rejects_duplicates() {
        let mut index = HeadingIndex::from_headings(Axis::Row, ["a", "b"]).unwrap();
        let err = index.push("a".to_string()).unwrap_err();
        assert_eq!(
            err,
            GridError::DuplicateHeading {
                axis: Axis::Row,
                heading: "a".to_string()
            }
        );
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_from_headings_with_repeat_fails() {
        let result = HeadingIndex::from_headings(Axis::Column, ["x", "y", "x"]);
        assert!(matches!(
            result,
            Err(GridError::DuplicateHeading { axis: Axis::Column, .. })
        ));
    }

    #[test]
    fn test_swap_keeps_positions_in_sync() {
        let mut index = HeadingIndex::from_headings(Axis::Row, ["a", "b", "c"]).unwrap();
        index.swap(0, 2);
        assert_eq!(index.as_slice(), ["c", "b", "a"]);
        assert_eq!(index.position("a"), Some(2));
        assert_eq!(index.position("c"), Some(0));
    }

    #[test]
    fn test_permutation_round_trip() {
        let mut index = HeadingIndex::from_headings(Axis::Row, ["a", "b", "c"]).unwrap();
        let perm = index.permutation_for(&["c", "a", "b"]).unwrap();
        assert_eq!(perm, vec![2, 0, 1]);

        index.apply_permutation(&perm);
        assert_eq!(index.as_slice(), ["c", "a", "b"]);
        assert_eq!(index.position("b"), Some(2));
    }

    #[test]
    fn test_permutation_validation() {
        let index = HeadingIndex::from_headings(Axis::Row, ["a", "b"]).unwrap();
        assert!(matches!(
            index.permutation_for(&["a"]),
            Err(GridError::MalformedInput(_))
        ));
        assert!(matches!(
            index.permutation_for(&["a", "a"]),
            Err(GridError::MalformedInput(_))
        ));
        assert!(matches!(
            index.permutation_for(&["a", "z"]),
            Err(GridError::UnknownHeading { .. })
        ));
    }

    #[test]
    fn test_permute_moves_items() {
        let items = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        assert_eq!(permute(items, &[1, 2, 0]), ["y", "z", "x"]);
    }

    #[test]
    fn test_same_set_ignores_order() {
        let a = HeadingIndex::from_headings(Axis::Column, ["p", "q"]).unwrap();
        let b = HeadingIndex::from_headings(Axis::Column, ["q", "p"]).unwrap();
        let c = HeadingIndex::from_headings(Axis::Column, ["p", "r"]).unwrap();
        assert!(a.same_set(&b));
        assert!(!a.same_set(&c));
    }
}
