//! CSV import

use crate::error::Result;
use gridrender_engine::engine::CellValue;
use std::path::Path;

/// Read a CSV file into row-major values.
pub fn parse_csv(path: &Path) -> Result<Vec<Vec<CellValue>>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_csv_str(&content))
}

/// Parse CSV text into row-major values. Blank lines become empty rows.
pub fn parse_csv_str(content: &str) -> Vec<Vec<CellValue>> {
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                return Vec::new();
            }
            parse_csv_line(line)
                .iter()
                .map(|field| CellValue::parse_input(field))
                .collect()
        })
        .collect()
}

/// Split one CSV line, handling quoted fields and `""` escapes.
/// Unquoted fields are trimmed; quoted ones are kept verbatim.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    let finish = |current: &mut String, quoted: bool, fields: &mut Vec<String>| {
        let field = std::mem::take(current);
        fields.push(if quoted { field } else { field.trim().to_string() });
    };

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                if !quoted && current.trim().is_empty() {
                    current.clear();
                }
                in_quotes = true;
                quoted = true;
            }
            ',' => {
                finish(&mut current, quoted, &mut fields);
                quoted = false;
            }
            _ => current.push(c),
        }
    }
    finish(&mut current, quoted, &mut fields);
    fields
}
