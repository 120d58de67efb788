use super::{ColumnKind, Worksheet};
use crate::error::{GridrenderError, Result};
use crate::render::{RenderHost, Renderer, run_renderer};
use gridrender_engine::engine::{Axis, CellRef};

impl Worksheet {
    /// Override installed on a named cell (e.g. "B3"), if any.
    pub fn get_render(&self, name: &str) -> Option<Renderer> {
        self.renders.get_by_name(name)
    }

    pub fn get_render_at(&self, x: i64, y: i64) -> Option<Renderer> {
        self.renders.get_by_coords(x, y)
    }

    /// Install or remove the override on a named cell.
    /// Names that do not resolve to a cell are ignored.
    pub fn set_render(&mut self, name: &str, renderer: Option<Renderer>) -> Result<()> {
        let Some(cell_ref) = CellRef::from_str(name) else {
            return Ok(());
        };
        self.set_render_at(cell_ref.col as i64, cell_ref.row as i64, renderer)
    }

    /// Install or remove the override at host coordinates.
    ///
    /// Installing runs the renderer once on the live cell. Removing redraws the
    /// cell with its column renderer or plain value. Negative coordinates and
    /// cells outside the sheet are ignored.
    pub fn set_render_at(&mut self, x: i64, y: i64, renderer: Option<Renderer>) -> Result<()> {
        let Some(cell_ref) = CellRef::from_coords(x, y) else {
            return Ok(());
        };
        let removing = renderer.is_none();
        if !removing {
            if let Some(element) = self.sheet.cell_element(cell_ref.col, cell_ref.row) {
                element.clear();
            }
        }
        self.renders.set(&self.sheet, cell_ref, renderer)?;
        if removing {
            self.render_cell(cell_ref)?;
        }
        Ok(())
    }

    /// Install or remove the column-level renderer and redraw the column.
    pub fn set_column_render(&mut self, col: usize, renderer: Option<Renderer>) -> Result<()> {
        let len = self.num_columns();
        let options = self
            .sheet
            .columns
            .get_mut(col)
            .ok_or(GridrenderError::OutOfBounds {
                axis: Axis::Column,
                index: col,
                len,
            })?;
        options.render = renderer;
        self.render_column(col)
    }

    /// Redraw one cell: cell override, then column renderer, then plain value.
    pub fn render_cell(&self, cell_ref: CellRef) -> Result<()> {
        let Some(element) = self.sheet.cell_element(cell_ref.col, cell_ref.row) else {
            return Ok(());
        };
        element.clear();

        let column = self.sheet.column_options(cell_ref.col);
        let renderer = self
            .renders
            .get(&cell_ref)
            .or_else(|| column.and_then(|c| c.render.as_ref()));
        if let Some(renderer) = renderer {
            run_renderer(renderer, &self.sheet, cell_ref)?;
            return Ok(());
        }

        if column.is_some_and(|c| c.kind == ColumnKind::Hidden) {
            return Ok(());
        }
        if let Some(value) = self.sheet.cell_value(cell_ref.col, cell_ref.row) {
            element.set_content(value.to_string());
        }
        Ok(())
    }

    pub fn render_column(&self, col: usize) -> Result<()> {
        for row in 0..self.num_rows() {
            self.render_cell(CellRef::new(col, row))?;
        }
        Ok(())
    }

    /// Redraw every cell and refresh the row-number labels.
    pub fn render_all(&self) -> Result<()> {
        self.sheet.label_rows();
        for row in 0..self.num_rows() {
            for col in 0..self.num_columns() {
                self.render_cell(CellRef::new(col, row))?;
            }
        }
        Ok(())
    }
}
