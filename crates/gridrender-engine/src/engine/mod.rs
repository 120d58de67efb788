//! Coordinate model for the grid.
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ column/row indices)
//! - [`CellValue`] - Raw values held in the data matrix
//! - [`Axis`], [`StructuralEdit`] - Row/column insert, delete and move, and
//!   how they re-key index-addressed data

mod cell_ref;
mod shift;
mod value;

pub use cell_ref::CellRef;
pub use shift::{Axis, StructuralEdit};
pub use value::CellValue;
