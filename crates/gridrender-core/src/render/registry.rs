use super::{RenderContext, RenderHost, Renderer};
use crate::error::{GridrenderError, Result};
use gridrender_engine::engine::{Axis, CellRef, CellValue, StructuralEdit};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Sparse column-major map of render overrides: column -> (row -> renderer).
///
/// Structural hooks take pre-edit indices and must be called before the host
/// splices its own rows/columns.
#[derive(Clone, Default)]
pub struct RenderRegistry {
    columns: BTreeMap<usize, BTreeMap<usize, Renderer>>,
}

impl RenderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells carrying an override.
    pub fn len(&self) -> usize {
        self.columns.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }

    pub fn get(&self, cell_ref: &CellRef) -> Option<&Renderer> {
        self.columns.get(&cell_ref.col)?.get(&cell_ref.row)
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        self.get(cell_ref).is_some()
    }

    /// Look up by host coordinates. Negative coordinates have no override.
    pub fn get_by_coords(&self, x: i64, y: i64) -> Option<Renderer> {
        let cell_ref = CellRef::from_coords(x, y)?;
        self.get(&cell_ref).cloned()
    }

    /// Look up by A1-style name. Unresolvable names have no override.
    pub fn get_by_name(&self, name: &str) -> Option<Renderer> {
        let cell_ref = CellRef::from_str(name)?;
        self.get(&cell_ref).cloned()
    }

    /// Overrides in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Renderer)> + '_ {
        self.columns.iter().flat_map(|(&col, rows)| {
            rows.iter()
                .map(move |(&row, renderer)| (CellRef::new(col, row), renderer))
        })
    }

    /// Store a renderer without invoking it. Returns the one it replaced.
    pub fn insert(&mut self, cell_ref: CellRef, renderer: Renderer) -> Option<Renderer> {
        self.columns
            .entry(cell_ref.col)
            .or_default()
            .insert(cell_ref.row, renderer)
    }

    /// Remove an override, pruning the column bucket once it is empty.
    pub fn remove(&mut self, cell_ref: &CellRef) -> Option<Renderer> {
        let rows = self.columns.get_mut(&cell_ref.col)?;
        let removed = rows.remove(&cell_ref.row);
        if rows.is_empty() {
            self.columns.remove(&cell_ref.col);
        }
        removed
    }

    /// Install (`Some`) or remove (`None`) the override at `(x, y)`.
    ///
    /// A newly installed renderer is run once against the host's live element
    /// before this returns. The entry is committed first, so a failing
    /// renderer leaves it installed and its error is returned as-is.
    /// Coordinates with no live element are ignored.
    pub fn set_by_coords(
        &mut self,
        host: &dyn RenderHost,
        x: i64,
        y: i64,
        renderer: Option<Renderer>,
    ) -> Result<()> {
        let Some(cell_ref) = CellRef::from_coords(x, y) else {
            return Ok(());
        };
        self.set(host, cell_ref, renderer)
    }

    /// Resolve an A1-style name and forward to [`Self::set_by_coords`].
    /// Unresolvable names are ignored.
    pub fn set_by_name(
        &mut self,
        host: &dyn RenderHost,
        name: &str,
        renderer: Option<Renderer>,
    ) -> Result<()> {
        let Some(cell_ref) = CellRef::from_str(name) else {
            return Ok(());
        };
        self.set(host, cell_ref, renderer)
    }

    pub fn set(
        &mut self,
        host: &dyn RenderHost,
        cell_ref: CellRef,
        renderer: Option<Renderer>,
    ) -> Result<()> {
        match renderer {
            None => {
                if self.remove(&cell_ref).is_some() {
                    debug!(cell = %cell_ref, "removed render override");
                }
                Ok(())
            }
            Some(renderer) => {
                if host.cell_element(cell_ref.col, cell_ref.row).is_none() {
                    debug!(cell = %cell_ref, "ignored override outside the grid");
                    return Ok(());
                }
                self.insert(cell_ref, renderer.clone());
                debug!(cell = %cell_ref, "installed render override");
                run_renderer(&renderer, host, cell_ref).map(|_| ())
            }
        }
    }

    /// Re-key every override for a structural edit given in pre-edit indices.
    pub fn apply(&mut self, edit: &StructuralEdit) {
        if edit.is_noop() || self.columns.is_empty() {
            return;
        }
        match edit.axis() {
            Axis::Column => edit.apply_to_keys(&mut self.columns),
            Axis::Row => {
                for rows in self.columns.values_mut() {
                    edit.apply_to_keys(rows);
                }
                self.columns.retain(|_, rows| !rows.is_empty());
            }
        }
        debug!(%edit, overrides = self.len(), "re-keyed render overrides");
    }

    pub fn on_columns_inserted(&mut self, at: usize, count: usize) {
        self.apply(&StructuralEdit::Insert {
            axis: Axis::Column,
            at,
            count,
        });
    }

    pub fn on_columns_deleted(&mut self, at: usize, count: usize) {
        self.apply(&StructuralEdit::Delete {
            axis: Axis::Column,
            at,
            count,
        });
    }

    pub fn on_column_moved(&mut self, from: usize, to: usize) {
        self.apply(&StructuralEdit::Move {
            axis: Axis::Column,
            from,
            to,
        });
    }

    pub fn on_rows_inserted(&mut self, at: usize, count: usize) {
        self.apply(&StructuralEdit::Insert {
            axis: Axis::Row,
            at,
            count,
        });
    }

    pub fn on_rows_deleted(&mut self, at: usize, count: usize) {
        self.apply(&StructuralEdit::Delete {
            axis: Axis::Row,
            at,
            count,
        });
    }

    pub fn on_row_moved(&mut self, from: usize, to: usize) {
        self.apply(&StructuralEdit::Move {
            axis: Axis::Row,
            from,
            to,
        });
    }
}

impl fmt::Debug for RenderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|(cell_ref, _)| cell_ref.to_string()))
            .finish()
    }
}

/// Run `renderer` against the host's element for `cell_ref`.
/// Returns `Ok(false)` when the cell has no live element yet.
pub(crate) fn run_renderer(
    renderer: &Renderer,
    host: &dyn RenderHost,
    cell_ref: CellRef,
) -> Result<bool> {
    let Some(element) = host.cell_element(cell_ref.col, cell_ref.row) else {
        return Ok(false);
    };
    let empty = CellValue::Empty;
    let ctx = RenderContext {
        element,
        value: host.cell_value(cell_ref.col, cell_ref.row).unwrap_or(&empty),
        x: cell_ref.col,
        y: cell_ref.row,
        host,
        column: host.column_options(cell_ref.col),
    };
    trace!(cell = %cell_ref, "running renderer");
    renderer(&ctx).map_err(|source| GridrenderError::Render {
        cell: cell_ref,
        source,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::RenderRegistry;
    use crate::document::Sheet;
    use crate::error::GridrenderError;
    use crate::render::{RenderError, Renderer, renderer};
    use gridrender_engine::engine::{CellRef, CellValue};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn noop() -> Renderer {
        renderer(|_| Ok(()))
    }

    fn same(a: Option<Renderer>, b: &Renderer) -> bool {
        a.is_some_and(|a| Rc::ptr_eq(&a, b))
    }

    #[test]
    fn test_set_then_get_returns_same_renderer() {
        let sheet = Sheet::new(12, 12);
        let mut reg = RenderRegistry::new();
        let f = noop();
        reg.set_by_coords(&sheet, 3, 7, Some(f.clone())).unwrap();
        assert!(same(reg.get_by_coords(3, 7), &f));
        assert!(same(reg.get_by_name("D8"), &f));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_set_none_removes_override() {
        let sheet = Sheet::new(4, 4);
        let mut reg = RenderRegistry::new();
        reg.set_by_coords(&sheet, 1, 1, Some(noop())).unwrap();
        reg.set_by_coords(&sheet, 1, 1, None).unwrap();
        assert!(reg.get_by_coords(1, 1).is_none());
        assert!(reg.is_empty());

        // Removing what is not there is fine too.
        reg.set_by_coords(&sheet, 2, 2, None).unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn test_negative_coordinates_are_ignored() {
        let sheet = Sheet::new(4, 4);
        let mut reg = RenderRegistry::new();
        reg.set_by_coords(&sheet, -1, 0, Some(noop())).unwrap();
        reg.set_by_coords(&sheet, 0, -3, Some(noop())).unwrap();
        assert!(reg.get_by_coords(-1, 0).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_unresolvable_names_are_ignored() {
        let sheet = Sheet::new(4, 4);
        let mut reg = RenderRegistry::new();
        reg.set_by_name(&sheet, "not a cell", Some(noop())).unwrap();
        assert!(reg.is_empty());
        assert!(reg.get_by_name("A0").is_none());
    }

    #[test]
    fn test_set_by_name_forwards_resolved_coordinates() {
        let sheet = Sheet::new(4, 4);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();
        let f = renderer(move |ctx| {
            seen.borrow_mut().push((ctx.x, ctx.y));
            Ok(())
        });
        let mut reg = RenderRegistry::new();
        reg.set_by_name(&sheet, "C2", Some(f.clone())).unwrap();
        assert!(same(reg.get_by_coords(2, 1), &f));
        assert_eq!(*calls.borrow(), vec![(2, 1)]);
    }

    #[test]
    fn test_install_runs_renderer_once_with_live_element_and_value() {
        let mut sheet = Sheet::new(3, 3);
        sheet.data[1][2] = CellValue::new_text("hello");
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let f = renderer(move |ctx| {
            counter.set(counter.get() + 1);
            ctx.element.set_content(format!("<b>{}</b>", ctx.value));
            assert_eq!(ctx.column.map(|c| c.title.is_none()), Some(true));
            Ok(())
        });

        let mut reg = RenderRegistry::new();
        reg.set_by_coords(&sheet, 2, 1, Some(f)).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(sheet.rows[1].children[3].content(), "<b>hello</b>");
    }

    #[test]
    fn test_install_outside_grid_is_ignored() {
        let sheet = Sheet::new(2, 2);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let f = renderer(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        let mut reg = RenderRegistry::new();
        reg.set_by_coords(&sheet, 9, 9, Some(f.clone())).unwrap();
        reg.set_by_coords(&sheet, 5, 0, Some(f.clone())).unwrap();
        reg.set_by_name(&sheet, "A3", Some(f)).unwrap();
        assert_eq!(calls.get(), 0);
        assert!(reg.get_by_coords(9, 9).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_second_install_replaces_first() {
        let sheet = Sheet::new(2, 2);
        let (f, g) = (noop(), noop());
        let mut reg = RenderRegistry::new();
        reg.set_by_coords(&sheet, 0, 0, Some(f.clone())).unwrap();
        reg.set_by_coords(&sheet, 0, 0, Some(g.clone())).unwrap();
        assert!(same(reg.get_by_coords(0, 0), &g));
        assert!(!same(reg.get_by_coords(0, 0), &f));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_failing_renderer_keeps_entry_and_reports_cell() {
        let sheet = Sheet::new(2, 2);
        let f = renderer(|_| Err(RenderError::new("boom")));
        let mut reg = RenderRegistry::new();
        let err = reg.set_by_coords(&sheet, 1, 0, Some(f.clone())).unwrap_err();
        match err {
            GridrenderError::Render { cell, source } => {
                assert_eq!(cell, CellRef::new(1, 0));
                assert_eq!(source.message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(same(reg.get_by_coords(1, 0), &f));
    }

    #[test]
    fn test_columns_inserted_shift_right() {
        let mut reg = RenderRegistry::new();
        let f = noop();
        reg.insert(CellRef::new(5, 0), f.clone());
        reg.on_columns_inserted(2, 3);
        assert!(same(reg.get_by_coords(8, 0), &f));
        assert!(reg.get_by_coords(5, 0).is_none());
    }

    #[test]
    fn test_columns_inserted_leave_left_side_alone() {
        let mut reg = RenderRegistry::new();
        let (f, g) = (noop(), noop());
        reg.insert(CellRef::new(1, 0), f.clone());
        reg.insert(CellRef::new(2, 4), g.clone());
        reg.on_columns_inserted(2, 1);
        assert!(same(reg.get_by_coords(1, 0), &f));
        assert!(same(reg.get_by_coords(3, 4), &g));
        assert!(reg.get_by_coords(2, 4).is_none());
    }

    #[test]
    fn test_columns_deleted_remove_and_shift_left() {
        let mut reg = RenderRegistry::new();
        let (f, g) = (noop(), noop());
        reg.insert(CellRef::new(5, 0), f.clone());
        reg.insert(CellRef::new(10, 0), g.clone());
        reg.on_columns_deleted(4, 3);
        assert!(reg.get_by_coords(5, 0).is_none());
        assert!(same(reg.get_by_coords(7, 0), &g));
        assert!(reg.get_by_coords(10, 0).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_columns_deleted_with_dense_keys_shift_each_once() {
        let mut reg = RenderRegistry::new();
        let renderers: Vec<Renderer> = (0..8).map(|_| noop()).collect();
        for (col, r) in renderers.iter().enumerate() {
            reg.insert(CellRef::new(col, 0), r.clone());
        }
        reg.on_columns_deleted(2, 2);
        assert_eq!(reg.len(), 6);
        assert!(same(reg.get_by_coords(1, 0), &renderers[1]));
        for old_col in 4..8 {
            assert!(same(reg.get_by_coords(old_col as i64 - 2, 0), &renderers[old_col]));
        }
        assert!(reg.get_by_coords(6, 0).is_none());
    }

    #[test]
    fn test_column_move_relocates_single_side() {
        let mut reg = RenderRegistry::new();
        let f = noop();
        reg.insert(CellRef::new(2, 0), f.clone());
        reg.on_column_moved(2, 6);
        assert!(reg.get_by_coords(2, 0).is_none());
        assert!(same(reg.get_by_coords(6, 0), &f));
    }

    #[test]
    fn test_column_move_swaps_both_sides_without_duplicates() {
        let mut reg = RenderRegistry::new();
        let (f, g) = (noop(), noop());
        reg.insert(CellRef::new(1, 0), f.clone());
        reg.insert(CellRef::new(4, 0), g.clone());
        reg.insert(CellRef::new(4, 3), g.clone());
        reg.on_column_moved(1, 4);
        assert!(same(reg.get_by_coords(4, 0), &f));
        assert!(same(reg.get_by_coords(1, 0), &g));
        assert!(same(reg.get_by_coords(1, 3), &g));
        assert!(reg.get_by_coords(4, 3).is_none());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_row_edits_are_isolated_per_column() {
        let mut reg = RenderRegistry::new();
        let (f, g) = (noop(), noop());
        reg.insert(CellRef::new(3, 2), f.clone());
        reg.insert(CellRef::new(4, 0), g.clone());
        reg.on_rows_inserted(1, 2);
        assert!(same(reg.get_by_coords(3, 4), &f));
        assert!(same(reg.get_by_coords(4, 0), &g));
        assert!(reg.get_by_coords(3, 2).is_none());
    }

    #[test]
    fn test_rows_deleted_prune_empty_columns() {
        let mut reg = RenderRegistry::new();
        let (f, g) = (noop(), noop());
        reg.insert(CellRef::new(0, 1), f.clone());
        reg.insert(CellRef::new(2, 5), g.clone());
        reg.on_rows_deleted(0, 3);
        assert!(reg.get_by_coords(0, 1).is_none());
        assert!(same(reg.get_by_coords(2, 2), &g));
        assert_eq!(reg.iter().map(|(c, _)| c).collect::<Vec<_>>(), vec![CellRef::new(2, 2)]);
    }

    #[test]
    fn test_row_move_swaps_inside_each_column() {
        let mut reg = RenderRegistry::new();
        let (f, g, h) = (noop(), noop(), noop());
        reg.insert(CellRef::new(0, 0), f.clone());
        reg.insert(CellRef::new(0, 3), g.clone());
        reg.insert(CellRef::new(5, 3), h.clone());
        reg.on_row_moved(0, 3);
        assert!(same(reg.get_by_coords(0, 3), &f));
        assert!(same(reg.get_by_coords(0, 0), &g));
        assert!(same(reg.get_by_coords(5, 0), &h));
        assert!(reg.get_by_coords(5, 3).is_none());
    }

    #[test]
    fn test_zero_count_and_same_index_edits_change_nothing() {
        let mut reg = RenderRegistry::new();
        let f = noop();
        reg.insert(CellRef::new(2, 2), f.clone());
        reg.on_columns_inserted(0, 0);
        reg.on_columns_deleted(0, 0);
        reg.on_column_moved(2, 2);
        reg.on_rows_inserted(0, 0);
        reg.on_rows_deleted(2, 0);
        reg.on_row_moved(2, 2);
        assert!(same(reg.get_by_coords(2, 2), &f));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_debug_lists_cell_names() {
        let mut reg = RenderRegistry::new();
        reg.insert(CellRef::new(1, 0), noop());
        reg.insert(CellRef::new(0, 2), noop());
        assert_eq!(format!("{:?}", reg), r#"{"A3", "B1"}"#);
    }
}
