use super::{ColumnOptions, Worksheet};
use crate::error::{GridrenderError, Result};
use crate::render::{CellElement, RowElement};
use gridrender_engine::engine::{Axis, CellValue, StructuralEdit};
use tracing::debug;

impl Worksheet {
    /// Apply a row or column edit given in pre-edit indices.
    ///
    /// Overrides are re-keyed with the pre-edit indices first, then the sheet
    /// is spliced and redrawn.
    pub fn apply_edit(&mut self, edit: StructuralEdit) -> Result<()> {
        if edit.is_noop() {
            return Ok(());
        }
        let axis = edit.axis();
        let len = self.sheet.axis_len(axis);
        if !edit.fits(len) {
            let index = match edit {
                StructuralEdit::Insert { at, count, .. } if at <= len => {
                    len.saturating_add(count)
                }
                StructuralEdit::Insert { at, .. } => at,
                StructuralEdit::Delete { at, count, .. } => at.saturating_add(count),
                StructuralEdit::Move { from, to, .. } => from.max(to),
            };
            return Err(GridrenderError::OutOfBounds { axis, index, len });
        }

        self.renders.apply(&edit);

        let columns = self.num_columns();
        match axis {
            Axis::Column => {
                edit.apply_to_vec(&mut self.sheet.columns, ColumnOptions::default);
                for values in &mut self.sheet.data {
                    edit.apply_to_vec(values, CellValue::default);
                }
                for row in &mut self.sheet.rows {
                    // Child 0 is the row number; the edit addresses data cells only.
                    let mut cells = row.children.split_off(1);
                    edit.apply_to_vec(&mut cells, CellElement::new);
                    row.children.append(&mut cells);
                }
            }
            Axis::Row => {
                edit.apply_to_vec(&mut self.sheet.data, || vec![CellValue::Empty; columns]);
                edit.apply_to_vec(&mut self.sheet.rows, || RowElement::new(columns));
            }
        }
        self.modified = true;
        debug!(
            %edit,
            columns = self.num_columns(),
            rows = self.num_rows(),
            "applied structural edit"
        );

        self.render_all()
    }

    /// Insert `count` empty columns before column `at`.
    pub fn insert_columns(&mut self, at: usize, count: usize) -> Result<()> {
        self.apply_edit(StructuralEdit::Insert {
            axis: Axis::Column,
            at,
            count,
        })
    }

    /// Delete columns `at..at + count`.
    pub fn delete_columns(&mut self, at: usize, count: usize) -> Result<()> {
        self.apply_edit(StructuralEdit::Delete {
            axis: Axis::Column,
            at,
            count,
        })
    }

    /// Exchange columns `from` and `to`, together with their overrides.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        self.apply_edit(StructuralEdit::Move {
            axis: Axis::Column,
            from,
            to,
        })
    }

    /// Insert `count` empty rows above row `at`.
    pub fn insert_rows(&mut self, at: usize, count: usize) -> Result<()> {
        self.apply_edit(StructuralEdit::Insert {
            axis: Axis::Row,
            at,
            count,
        })
    }

    /// Delete rows `at..at + count`.
    pub fn delete_rows(&mut self, at: usize, count: usize) -> Result<()> {
        self.apply_edit(StructuralEdit::Delete {
            axis: Axis::Row,
            at,
            count,
        })
    }

    /// Exchange rows `from` and `to`, together with their overrides.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<()> {
        self.apply_edit(StructuralEdit::Move {
            axis: Axis::Row,
            from,
            to,
        })
    }
}
