use crate::error::{GridrenderError, Result};
use crate::render::{CellElement, RenderHost, RenderRegistry, Renderer, RowElement};
use gridrender_engine::engine::{Axis, CellRef, CellValue};
use std::fmt;
use std::str::FromStr;

/// Cell type of a column. Passed through to renderers untouched, except that
/// hidden columns render empty by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnKind {
    #[default]
    Text,
    Numeric,
    Html,
    Hidden,
}

impl FromStr for ColumnKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ColumnKind::Text),
            "numeric" => Ok(ColumnKind::Numeric),
            "html" => Ok(ColumnKind::Html),
            "hidden" => Ok(ColumnKind::Hidden),
            other => Err(format!("Unknown column type: {}", other)),
        }
    }
}

/// Column configuration (title, width, type, column-level renderer).
#[derive(Clone, Default)]
pub struct ColumnOptions {
    pub title: Option<String>,
    pub width: Option<u32>,
    pub kind: ColumnKind,
    pub read_only: bool,
    /// Used for every cell in the column that has no override of its own.
    pub render: Option<Renderer>,
}

impl fmt::Debug for ColumnOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnOptions")
            .field("title", &self.title)
            .field("width", &self.width)
            .field("kind", &self.kind)
            .field("read_only", &self.read_only)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// The grid the registry renders into: row elements, raw values, column options.
///
/// `data` is row-major (`data[y][x]`), and data column `x` of row `y` is
/// displayed by `rows[y].children[x + 1]`.
#[derive(Debug, Default)]
pub struct Sheet {
    pub rows: Vec<RowElement>,
    pub data: Vec<Vec<CellValue>>,
    pub columns: Vec<ColumnOptions>,
}

impl Sheet {
    pub fn new(columns: usize, rows: usize) -> Self {
        let sheet = Sheet {
            rows: (0..rows).map(|_| RowElement::new(columns)).collect(),
            data: vec![vec![CellValue::Empty; columns]; rows],
            columns: vec![ColumnOptions::default(); columns],
        };
        sheet.label_rows();
        sheet
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.data.len()
    }

    /// Number of lines along an axis.
    pub fn axis_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.num_rows(),
            Axis::Column => self.num_columns(),
        }
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        cell_ref.col < self.num_columns() && cell_ref.row < self.num_rows()
    }

    /// Write 1-based row numbers into each row's number cell.
    pub(crate) fn label_rows(&self) {
        for (y, row) in self.rows.iter().enumerate() {
            if let Some(number) = row.number_cell() {
                number.set_content((y + 1).to_string());
            }
        }
    }
}

impl RenderHost for Sheet {
    fn cell_element(&self, x: usize, y: usize) -> Option<&CellElement> {
        self.rows.get(y)?.data_cell(x)
    }

    fn cell_value(&self, x: usize, y: usize) -> Option<&CellValue> {
        self.data.get(y)?.get(x)
    }

    fn column_options(&self, x: usize) -> Option<&ColumnOptions> {
        self.columns.get(x)
    }
}

/// A worksheet: the grid plus the render overrides attached to its cells.
#[derive(Debug, Default)]
pub struct Worksheet {
    pub sheet: Sheet,
    /// Per-cell render overrides, keyed by the sheet's current coordinates.
    pub renders: RenderRegistry,
    /// Whether the sheet has been edited since it was created
    pub modified: bool,
}

impl Worksheet {
    /// Create an empty worksheet of the given dimensions.
    pub fn new(columns: usize, rows: usize) -> Self {
        Worksheet {
            sheet: Sheet::new(columns, rows),
            renders: RenderRegistry::new(),
            modified: false,
        }
    }

    /// Create a worksheet from row-major values, padded to at least
    /// `min_columns` x `min_rows`. Cells show their plain values.
    pub fn from_rows(values: Vec<Vec<CellValue>>, min_columns: usize, min_rows: usize) -> Self {
        let columns = values
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(min_columns);
        let rows = values.len().max(min_rows);
        let mut ws = Worksheet::new(columns, rows);

        for (y, row) in values.into_iter().enumerate() {
            for (x, value) in row.into_iter().enumerate() {
                if let Some(element) = ws.sheet.cell_element(x, y) {
                    element.set_content(value.to_string());
                }
                ws.sheet.data[y][x] = value;
            }
        }
        ws
    }

    pub fn num_columns(&self) -> usize {
        self.sheet.num_columns()
    }

    pub fn num_rows(&self) -> usize {
        self.sheet.num_rows()
    }

    pub fn value(&self, cell_ref: &CellRef) -> Option<&CellValue> {
        self.sheet.cell_value(cell_ref.col, cell_ref.row)
    }

    /// Displayed content of a data cell.
    pub fn display(&self, cell_ref: &CellRef) -> Option<String> {
        self.sheet
            .cell_element(cell_ref.col, cell_ref.row)
            .map(CellElement::content)
    }

    pub fn check_bounds(&self, cell_ref: &CellRef) -> Result<()> {
        if cell_ref.col >= self.num_columns() {
            return Err(GridrenderError::OutOfBounds {
                axis: Axis::Column,
                index: cell_ref.col,
                len: self.num_columns(),
            });
        }
        if cell_ref.row >= self.num_rows() {
            return Err(GridrenderError::OutOfBounds {
                axis: Axis::Row,
                index: cell_ref.row,
                len: self.num_rows(),
            });
        }
        Ok(())
    }

    /// Store a raw value and redraw that cell.
    pub fn set_value(&mut self, cell_ref: CellRef, value: CellValue) -> Result<()> {
        self.check_bounds(&cell_ref)?;
        self.sheet.data[cell_ref.row][cell_ref.col] = value;
        self.modified = true;
        self.render_cell(cell_ref)
    }

    /// Parse user input (numbers, booleans, text) and store it.
    pub fn set_value_from_input(&mut self, cell_ref: CellRef, input: &str) -> Result<()> {
        self.set_value(cell_ref, CellValue::parse_input(input))
    }

    /// Replace a column's configuration and redraw the column.
    pub fn set_column_options(&mut self, col: usize, options: ColumnOptions) -> Result<()> {
        let len = self.num_columns();
        let Some(slot) = self.sheet.columns.get_mut(col) else {
            return Err(GridrenderError::OutOfBounds {
                axis: Axis::Column,
                index: col,
                len,
            });
        };
        *slot = options;
        self.render_column(col)
    }
}
