//! `-c` operations: a `;`-separated list of edits applied to the worksheet.
//!
//! ```text
//! set A1 hello; render A1 badge; insert-col B 2; move-row 1 3
//! ```
//!
//! Columns are given by letter and rows by 1-based number.

use crate::error::{CliError, Result};
use crate::presets::preset;
use gridrender_core::{CellRef, Worksheet};
use gridrender_engine::engine::{Axis, StructuralEdit};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { cell: CellRef, input: String },
    Render { cell: CellRef, preset: String },
    Unrender { cell: CellRef },
    Edit(StructuralEdit),
}

/// Parse a whole `-c` script.
pub fn parse_commands(script: &str) -> Result<Vec<Command>> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_command)
        .collect()
}

pub fn parse_command(text: &str) -> Result<Command> {
    let (name, rest) = text
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .unwrap_or((text, ""));
    let name = name.to_ascii_lowercase();
    let args: Vec<&str> = rest.split_whitespace().collect();
    let invalid = |message: &str| CliError::InvalidArgument {
        command: name.clone(),
        message: message.to_string(),
    };

    let command = match name.as_str() {
        "set" => {
            let (cell, input) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            Command::Set {
                cell: parse_cell(cell).ok_or_else(|| invalid("expected a cell like A1"))?,
                input: input.trim().to_string(),
            }
        }
        "render" => match args.as_slice() {
            [cell, preset] => Command::Render {
                cell: parse_cell(cell).ok_or_else(|| invalid("expected a cell like A1"))?,
                preset: preset.to_string(),
            },
            _ => return Err(invalid("usage: render <cell> <preset>")),
        },
        "unrender" => match args.as_slice() {
            [cell] => Command::Unrender {
                cell: parse_cell(cell).ok_or_else(|| invalid("expected a cell like A1"))?,
            },
            _ => return Err(invalid("usage: unrender <cell>")),
        },
        "insert-col" | "delete-col" | "insert-row" | "delete-row" => {
            let axis = if name.ends_with("col") {
                Axis::Column
            } else {
                Axis::Row
            };
            let (at, count) = match args.as_slice() {
                [at] => (*at, "1"),
                [at, count] => (*at, *count),
                _ => return Err(invalid("usage: <index> [count]")),
            };
            let at = parse_index(axis, at).ok_or_else(|| invalid("bad index"))?;
            let count = count
                .parse::<usize>()
                .map_err(|_| invalid("count must be a non-negative integer"))?;
            if name.starts_with("insert") {
                Command::Edit(StructuralEdit::Insert { axis, at, count })
            } else {
                Command::Edit(StructuralEdit::Delete { axis, at, count })
            }
        }
        "move-col" | "move-row" => {
            let axis = if name == "move-col" {
                Axis::Column
            } else {
                Axis::Row
            };
            match args.as_slice() {
                [from, to] => Command::Edit(StructuralEdit::Move {
                    axis,
                    from: parse_index(axis, from).ok_or_else(|| invalid("bad source index"))?,
                    to: parse_index(axis, to).ok_or_else(|| invalid("bad target index"))?,
                }),
                _ => return Err(invalid("usage: <from> <to>")),
            }
        }
        _ => return Err(CliError::UnknownCommand(name.clone())),
    };
    Ok(command)
}

fn parse_cell(text: &str) -> Option<CellRef> {
    CellRef::from_str(text)
}

/// Column letters or a 1-based row number, converted to a 0-based index.
fn parse_index(axis: Axis, text: &str) -> Option<usize> {
    match axis {
        Axis::Column => CellRef::letters_to_col(text),
        Axis::Row => text.parse::<usize>().ok()?.checked_sub(1),
    }
}

/// Run one command against the worksheet.
pub fn apply(ws: &mut Worksheet, command: &Command) -> Result<()> {
    match command {
        Command::Set { cell, input } => ws.set_value_from_input(*cell, input)?,
        Command::Render { cell, preset: name } => {
            let renderer = preset(name).ok_or_else(|| CliError::UnknownPreset(name.clone()))?;
            ws.check_bounds(cell)?;
            ws.set_render(&cell.to_string(), Some(renderer))?;
        }
        Command::Unrender { cell } => ws.set_render(&cell.to_string(), None)?,
        Command::Edit(edit) => ws.apply_edit(*edit)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_with_all_commands() {
        let commands =
            parse_commands("set A1 hello world; render B2 badge ;unrender B2; insert-col C 2; delete-row 3; move-col A D;")
                .unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Set {
                    cell: CellRef::new(0, 0),
                    input: "hello world".into()
                },
                Command::Render {
                    cell: CellRef::new(1, 1),
                    preset: "badge".into()
                },
                Command::Unrender {
                    cell: CellRef::new(1, 1)
                },
                Command::Edit(StructuralEdit::Insert {
                    axis: Axis::Column,
                    at: 2,
                    count: 2
                }),
                Command::Edit(StructuralEdit::Delete {
                    axis: Axis::Row,
                    at: 2,
                    count: 1
                }),
                Command::Edit(StructuralEdit::Move {
                    axis: Axis::Column,
                    from: 0,
                    to: 3
                }),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_command("explode A1"),
            Err(CliError::UnknownCommand(name)) if name == "explode"
        ));
        assert!(matches!(
            parse_command("insert-row 0"),
            Err(CliError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_command("render A1"),
            Err(CliError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_command("delete-col B -1"),
            Err(CliError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_apply_render_then_shift() {
        let mut ws = Worksheet::new(3, 2);
        for command in parse_commands("set B1 x; render B1 bold; insert-col A 2").unwrap() {
            apply(&mut ws, &command).unwrap();
        }
        assert_eq!(ws.display(&CellRef::new(3, 0)).as_deref(), Some("<b>x</b>"));
        assert!(ws.get_render("D1").is_some());
    }

    #[test]
    fn test_apply_unknown_preset_and_out_of_bounds() {
        let mut ws = Worksheet::new(2, 2);
        let err = apply(&mut ws, &parse_command("render A1 sparkle").unwrap()).unwrap_err();
        assert!(matches!(err, CliError::UnknownPreset(_)));

        let err = apply(&mut ws, &parse_command("render Z9 bold").unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Sheet(_)));
        assert!(ws.renders.is_empty());
    }
}
