//! Gridrender - apply per-cell renderers and structural edits to a sheet,
//! then print what it displays.

mod command;
mod config;
mod error;
mod presets;

use anyhow::Context;
use gridrender_core::{Axis, Worksheet, storage};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_COLUMNS: usize = 4;
const DEFAULT_ROWS: usize = 4;

fn print_usage() {
    eprintln!("Usage: gridrender [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    CSV file to load");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <OPS>       ';'-separated operations, e.g. \"set A1 hi; render A1 badge\"");
    eprintln!("  -o, --output <FILE>       Write the rendered sheet to a markdown file");
    eprintln!("  --size <COLSxROWS>        Minimum sheet size (default 4x4 without a file)");
    eprintln!("  --config <FILE>           Load columns and cell renderers from a TOML file");
    eprintln!("  --no-config               Do not load the user config file");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Operations:");
    eprintln!("  set <cell> <value>        render <cell> <preset>    unrender <cell>");
    eprintln!("  insert-col <col> [n]      delete-col <col> [n]      move-col <col> <col>");
    eprintln!("  insert-row <row> [n]      delete-row <row> [n]      move-row <row> <row>");
    eprintln!();
    eprintln!("Presets: {}", presets::PRESET_NAMES.join(", "));
}

#[derive(Default)]
struct Args {
    file_path: Option<PathBuf>,
    commands: Vec<String>,
    output_file: Option<PathBuf>,
    size: Option<(usize, usize)>,
    config_file: Option<PathBuf>,
    no_config: bool,
}

fn parse_size(text: &str) -> Option<(usize, usize)> {
    let (cols, rows) = text.split_once(['x', 'X'])?;
    let cols: usize = cols.trim().parse().ok()?;
    let rows: usize = rows.trim().parse().ok()?;
    if cols > Axis::Column.max_len() || rows > Axis::Row.max_len() {
        return None;
    }
    Some((cols, rows))
}

fn require_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires {}", flag, what);
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-c" | "--command" => {
                i += 1;
                parsed
                    .commands
                    .push(require_value(&args, i, "--command", "operations"));
            }
            "-o" | "--output" => {
                i += 1;
                parsed.output_file = Some(PathBuf::from(require_value(
                    &args, i, "--output", "a file path",
                )));
            }
            "--size" => {
                i += 1;
                let value = require_value(&args, i, "--size", "a value like 5x3");
                match parse_size(&value) {
                    Some(size) => parsed.size = Some(size),
                    None => {
                        eprintln!("Error: invalid --size: {}", value);
                        std::process::exit(1);
                    }
                }
            }
            "--config" => {
                i += 1;
                parsed.config_file = Some(PathBuf::from(require_value(
                    &args, i, "--config", "a file path",
                )));
            }
            "--no-config" => parsed.no_config = true,
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if parsed.file_path.is_none() {
                    parsed.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }
    parsed
}

fn run(args: Args) -> anyhow::Result<()> {
    let (config, warnings) = if args.no_config {
        (None, Vec::new())
    } else {
        config::load_config(args.config_file.as_ref())
    };
    for warning in warnings {
        tracing::warn!("{}", warning);
    }

    let (config_cols, config_rows) = config
        .as_ref()
        .map(config::ConfigFile::min_dimensions)
        .unwrap_or((0, 0));
    let (min_cols, min_rows) = match (args.size, &args.file_path) {
        (Some(size), _) => size,
        (None, Some(_)) => (0, 0),
        (None, None) => (DEFAULT_COLUMNS, DEFAULT_ROWS),
    };
    let min_cols = min_cols.max(config_cols);
    let min_rows = min_rows.max(config_rows);

    let mut ws = match &args.file_path {
        Some(path) => {
            let values = storage::parse_csv(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            Worksheet::from_rows(values, min_cols, min_rows)
        }
        None => Worksheet::new(min_cols, min_rows),
    };

    if let Some(config) = &config {
        for warning in config::apply_config(&mut ws, config) {
            tracing::warn!("{}", warning);
        }
    }

    for script in &args.commands {
        for cmd in command::parse_commands(script)? {
            command::apply(&mut ws, &cmd).with_context(|| format!("while running {:?}", cmd))?;
        }
    }
    tracing::debug!(overrides = ws.renders.len(), "rendering sheet");

    match &args.output_file {
        Some(path) => {
            storage::write_markdown_file(path, &ws)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            storage::write_markdown(&mut out, &ws)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = parse_args();
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
