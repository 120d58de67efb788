//! Raw cell values as stored in the sheet's data matrix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw value held by one cell, before any renderer touches it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn new_text(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Interpret user or CSV input.
    /// - Empty string -> Empty
    /// - Valid number -> Number (unless it has leading zeros like "007")
    /// - `true`/`false` -> Bool
    /// - Otherwise -> Text
    pub fn parse_input(input: &str) -> Self {
        if input.is_empty() {
            return CellValue::Empty;
        }

        // Keep explicit surrounding whitespace (typically from quoted CSV fields).
        let trimmed = input.trim();
        if input != trimmed {
            return CellValue::new_text(input);
        }

        if trimmed.starts_with('0')
            && trimmed.len() > 1
            && !trimmed.starts_with("0.")
            && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            return CellValue::new_text(trimmed);
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return CellValue::Number(n);
        }

        match trimmed {
            "true" | "TRUE" => CellValue::Bool(true),
            "false" | "FALSE" => CellValue::Bool(false),
            _ => CellValue::new_text(trimmed),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}
