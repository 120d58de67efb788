//! Import of raw values and export of rendered content.

mod csv;
mod md;

pub use csv::{parse_csv, parse_csv_str};
pub use md::{write_markdown, write_markdown_file};
