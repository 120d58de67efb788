//! Structural edits: inserting, deleting and moving whole rows or columns.
//!
//! All indices are pre-edit indices. A [`StructuralEdit`] knows where every
//! pre-edit line ends up afterwards ([`StructuralEdit::remap`]) and can apply
//! itself to an ordered index-keyed map or to a dense vector of lines.

use crate::engine::CellRef;
use std::collections::BTreeMap;
use std::fmt;

/// Dimension a structural edit acts on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Get the coordinate value from a CellRef for this axis
    pub fn coord(&self, cell_ref: &CellRef) -> usize {
        match self {
            Axis::Row => cell_ref.row,
            Axis::Column => cell_ref.col,
        }
    }

    /// Create a new CellRef with modified coordinate on this axis
    pub fn with_coord(&self, cell_ref: &CellRef, new_coord: usize) -> CellRef {
        match self {
            Axis::Row => CellRef::new(cell_ref.col, new_coord),
            Axis::Column => CellRef::new(new_coord, cell_ref.row),
        }
    }

    /// Largest number of lines a sheet may hold along this axis.
    pub fn max_len(&self) -> usize {
        match self {
            Axis::Row => 1_048_576,
            Axis::Column => 16_384,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// One insert/delete/move of whole lines along an axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StructuralEdit {
    /// `count` new lines appear before pre-edit line `at`.
    Insert { axis: Axis, at: usize, count: usize },
    /// Lines `at..at + count` disappear.
    Delete { axis: Axis, at: usize, count: usize },
    /// Lines `from` and `to` exchange places.
    Move { axis: Axis, from: usize, to: usize },
}

impl StructuralEdit {
    pub fn axis(&self) -> Axis {
        match *self {
            StructuralEdit::Insert { axis, .. }
            | StructuralEdit::Delete { axis, .. }
            | StructuralEdit::Move { axis, .. } => axis,
        }
    }

    /// True when applying the edit cannot change anything.
    pub fn is_noop(&self) -> bool {
        match *self {
            StructuralEdit::Insert { count, .. } | StructuralEdit::Delete { count, .. } => {
                count == 0
            }
            StructuralEdit::Move { from, to, .. } => from == to,
        }
    }

    /// Whether the edit is valid for an axis that currently holds `len` lines.
    pub fn fits(&self, len: usize) -> bool {
        match *self {
            StructuralEdit::Insert { axis, at, count } => {
                at <= len && len.checked_add(count).is_some_and(|n| n <= axis.max_len())
            }
            StructuralEdit::Delete { at, count, .. } => {
                at.checked_add(count).is_some_and(|end| end <= len)
            }
            StructuralEdit::Move { from, to, .. } => from < len && to < len,
        }
    }

    /// Where pre-edit line `index` ends up, or `None` if it no longer exists.
    pub fn remap(&self, index: usize) -> Option<usize> {
        match *self {
            StructuralEdit::Insert { at, count, .. } => {
                if index >= at {
                    index.checked_add(count)
                } else {
                    Some(index)
                }
            }
            StructuralEdit::Delete { at, count, .. } => {
                if index < at {
                    Some(index)
                } else if index - at < count {
                    None
                } else {
                    Some(index - count)
                }
            }
            StructuralEdit::Move { from, to, .. } => {
                if index == from {
                    Some(to)
                } else if index == to {
                    Some(from)
                } else {
                    Some(index)
                }
            }
        }
    }

    /// Remap a cell; coordinates on the other axis are untouched.
    pub fn remap_cell(&self, cell_ref: &CellRef) -> Option<CellRef> {
        let axis = self.axis();
        self.remap(axis.coord(cell_ref))
            .map(|coord| axis.with_coord(cell_ref, coord))
    }

    /// Re-key an index-keyed map in place.
    ///
    /// The map is partitioned with `split_off` before anything is re-inserted,
    /// so no entry can be overwritten, skipped or shifted twice. Entries whose
    /// new key would overflow `usize` are dropped.
    pub fn apply_to_keys<V>(&self, map: &mut BTreeMap<usize, V>) {
        if self.is_noop() {
            return;
        }
        match *self {
            StructuralEdit::Insert { at, count, .. } => {
                let tail = map.split_off(&at);
                for (key, value) in tail {
                    if let Some(new_key) = key.checked_add(count) {
                        map.insert(new_key, value);
                    }
                }
            }
            StructuralEdit::Delete { at, count, .. } => {
                let mut removed = map.split_off(&at);
                let Some(end) = at.checked_add(count) else {
                    return;
                };
                let survivors = removed.split_off(&end);
                for (key, value) in survivors {
                    map.insert(key - count, value);
                }
            }
            StructuralEdit::Move { from, to, .. } => {
                let source = map.remove(&from);
                let target = map.remove(&to);
                if let Some(value) = source {
                    map.insert(to, value);
                }
                if let Some(value) = target {
                    map.insert(from, value);
                }
            }
        }
    }

    /// Splice a dense vector of lines. New lines are produced by `fill`.
    /// Does nothing if the edit does not fit the vector's length.
    pub fn apply_to_vec<T>(&self, lines: &mut Vec<T>, mut fill: impl FnMut() -> T) {
        if self.is_noop() || !self.fits(lines.len()) {
            return;
        }
        match *self {
            StructuralEdit::Insert { at, count, .. } => {
                lines.splice(at..at, (0..count).map(|_| fill()));
            }
            StructuralEdit::Delete { at, count, .. } => {
                lines.drain(at..at + count);
            }
            StructuralEdit::Move { from, to, .. } => {
                lines.swap(from, to);
            }
        }
    }
}

impl fmt::Display for StructuralEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralEdit::Insert { axis, at, count } => {
                write!(f, "insert {} {}(s) at {}", count, axis, at)
            }
            StructuralEdit::Delete { axis, at, count } => {
                write!(f, "delete {} {}(s) at {}", count, axis, at)
            }
            StructuralEdit::Move { axis, from, to } => {
                write!(f, "move {} {} <-> {}", axis, from, to)
            }
        }
    }
}
