//! Markdown export of what the sheet currently displays

use crate::document::Worksheet;
use gridrender_engine::engine::CellRef;
use std::io::Write;
use std::path::Path;

/// Write the rendered grid as a markdown table.
///
/// The header uses column titles where set and column letters otherwise; each
/// body cell is the element content, so overrides show exactly as drawn.
pub fn write_markdown<W: Write>(w: &mut W, ws: &Worksheet) -> std::io::Result<()> {
    if ws.num_columns() == 0 || ws.num_rows() == 0 {
        writeln!(w, "*Empty sheet*")?;
        return Ok(());
    }

    write!(w, "|   |")?;
    for (col, options) in ws.sheet.columns.iter().enumerate() {
        let title = options
            .title
            .clone()
            .unwrap_or_else(|| CellRef::col_to_letters(col));
        write!(w, " {} |", escape_markdown(&title))?;
    }
    writeln!(w)?;

    write!(w, "|---|")?;
    for _ in 0..ws.num_columns() {
        write!(w, "---|")?;
    }
    writeln!(w)?;

    for (y, row) in ws.sheet.rows.iter().enumerate() {
        let label = row
            .number_cell()
            .map(|cell| cell.content())
            .unwrap_or_else(|| (y + 1).to_string());
        write!(w, "| {} |", label)?;
        for x in 0..ws.num_columns() {
            let content = row.data_cell(x).map(|cell| cell.content()).unwrap_or_default();
            write!(w, " {} |", escape_markdown(&content))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write the rendered grid to a markdown file
pub fn write_markdown_file(path: &Path, ws: &Worksheet) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_markdown(&mut file, ws)
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
