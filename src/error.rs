//! Error types for the gridrender command line

use gridrender_core::GridrenderError;
use thiserror::Error;

/// Errors raised while parsing or running `-c` operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {message}")]
    InvalidArgument { command: String, message: String },

    #[error("Unknown renderer preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Sheet(#[from] GridrenderError),
}

pub type Result<T> = std::result::Result<T, CliError>;
