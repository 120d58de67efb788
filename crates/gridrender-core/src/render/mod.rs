//! Per-cell render overrides.
//!
//! A [`Renderer`] replaces the default display of a cell: it receives the
//! live [`CellElement`] together with the cell's raw value, coordinates, the
//! owning host and the column options, and updates the element in place.

mod element;
mod registry;

pub use element::{CellElement, ElementState, RowElement};
pub use registry::RenderRegistry;
pub(crate) use registry::run_renderer;

use crate::document::ColumnOptions;
use gridrender_engine::engine::CellValue;
use std::rc::Rc;
use thiserror::Error;

/// Failure reported by a renderer. Passed through to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        RenderError {
            message: message.into(),
        }
    }
}

/// Everything a renderer may look at while drawing one cell.
pub struct RenderContext<'a> {
    pub element: &'a CellElement,
    pub value: &'a CellValue,
    pub x: usize,
    pub y: usize,
    pub host: &'a dyn RenderHost,
    pub column: Option<&'a ColumnOptions>,
}

/// A render override. Identity is pointer identity (`Rc::ptr_eq`).
pub type Renderer = Rc<dyn Fn(&RenderContext<'_>) -> Result<(), RenderError>>;

/// Wrap a closure as a [`Renderer`].
pub fn renderer<F>(f: F) -> Renderer
where
    F: Fn(&RenderContext<'_>) -> Result<(), RenderError> + 'static,
{
    Rc::new(f)
}

/// What the registry needs from the grid that owns it.
pub trait RenderHost {
    /// The live node displaying data cell `(x, y)`, if it has been rendered.
    fn cell_element(&self, x: usize, y: usize) -> Option<&CellElement>;

    /// The raw value stored for `(x, y)`.
    fn cell_value(&self, x: usize, y: usize) -> Option<&CellValue>;

    /// Configuration of column `x`.
    fn column_options(&self, x: usize) -> Option<&ColumnOptions>;
}
