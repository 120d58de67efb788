//! gridrender-core - Worksheet host, per-cell render overrides, storage.

pub mod document;
pub mod error;
pub mod render;
pub mod storage;

pub use document::{ColumnKind, ColumnOptions, Sheet, Worksheet};
pub use error::{GridrenderError, Result};
pub use render::{RenderContext, RenderError, RenderHost, RenderRegistry, Renderer, renderer};

pub use gridrender_engine::engine::{Axis, CellRef, CellValue, StructuralEdit};
