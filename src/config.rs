//! TOML sheet configuration: dimensions, column options and cell renderers.
//!
//! ```toml
//! [sheet]
//! columns = 4
//! rows = 3
//!
//! [[columns]]
//! title = "Name"
//! width = 200
//! type = "text"
//! render = "badge"
//!
//! [cells]
//! B2 = "coords"
//! ```

use crate::presets::{PRESET_NAMES, preset};
use directories::ProjectDirs;
use gridrender_core::{CellRef, ColumnKind, ColumnOptions, GridrenderError, Worksheet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub sheet: Option<SheetSection>,
    #[serde(default)]
    pub columns: Vec<ColumnSection>,
    /// Cell name -> preset name
    #[serde(default)]
    pub cells: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetSection {
    pub columns: Option<usize>,
    pub rows: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSection {
    pub title: Option<String>,
    pub width: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub read_only: Option<bool>,
    pub render: Option<String>,
}

impl ConfigFile {
    /// Minimum sheet size requested by the file.
    pub fn min_dimensions(&self) -> (usize, usize) {
        let sheet = self.sheet.as_ref();
        let columns = sheet
            .and_then(|s| s.columns)
            .unwrap_or(0)
            .max(self.columns.len());
        let rows = sheet.and_then(|s| s.rows).unwrap_or(0);
        (columns, rows)
    }
}

/// Load the configuration from `config_file`, or from the user config
/// directory when none is given. Problems are returned as warnings.
pub fn load_config(config_file: Option<&PathBuf>) -> (Option<ConfigFile>, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (None, warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (None, warnings);
    }

    let config = match read_config(&path) {
        Ok(config) => Some(config),
        Err(message) => {
            warnings.push(message);
            None
        }
    };
    (config, warnings)
}

fn read_config(path: &Path) -> Result<ConfigFile, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<ConfigFile>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridrender")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Apply column options and cell renderers. Entries that cannot be applied
/// are skipped and reported.
pub fn apply_config(ws: &mut Worksheet, config: &ConfigFile) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    for (col, section) in config.columns.iter().enumerate() {
        let kind = match section.kind.as_deref().map(str::parse::<ColumnKind>) {
            None => ColumnKind::default(),
            Some(Ok(kind)) => kind,
            Some(Err(err)) => {
                warnings.push(format!("Column {}: {}", col + 1, err));
                ColumnKind::default()
            }
        };
        let render = section.render.as_deref().and_then(|name| {
            let found = preset(name);
            if found.is_none() {
                warnings.push(unknown_preset(name));
            }
            found
        });
        let options = ColumnOptions {
            title: section.title.clone(),
            width: section.width,
            kind,
            read_only: section.read_only.unwrap_or(false),
            render,
        };
        if let Err(err) = ws.set_column_options(col, options) {
            warnings.push(format!("Column {}: {}", col + 1, err));
        }
    }

    for (name, preset_name) in &config.cells {
        let Some(renderer) = preset(preset_name) else {
            warnings.push(unknown_preset(preset_name));
            continue;
        };
        let applied = match CellRef::from_str(name) {
            Some(cell_ref) => ws
                .check_bounds(&cell_ref)
                .and_then(|_| ws.set_render(name, Some(renderer))),
            None => Err(GridrenderError::InvalidCellName(name.clone())),
        };
        if let Err(err) = applied {
            warnings.push(format!("Cell {}: {}", name, err));
        }
    }

    warnings
}

fn unknown_preset(name: &str) -> String {
    format!(
        "Unknown renderer preset '{}' (expected one of: {})",
        name,
        PRESET_NAMES.join(", ")
    )
}
