//! Error types for Gridrender core.

use gridrender_engine::engine::{Axis, CellRef};
use thiserror::Error;

use crate::render::RenderError;

/// Errors that can occur while editing or rendering a worksheet
#[derive(Error, Debug)]
pub enum GridrenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid cell name: {0}")]
    InvalidCellName(String),

    #[error("{axis} index {index} is out of bounds (sheet has {len})")]
    OutOfBounds { axis: Axis, index: usize, len: usize },

    #[error("Renderer failed at {cell}: {source}")]
    Render {
        cell: CellRef,
        #[source]
        source: RenderError,
    },
}

pub type Result<T> = std::result::Result<T, GridrenderError>;
