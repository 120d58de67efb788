//! Worksheet host: grid data, row elements and the overrides drawn into them.

mod ops;
mod render;
mod state;

pub use state::{ColumnKind, ColumnOptions, Sheet, Worksheet};
