use std::path::PathBuf;
use thiserror::Error;

use listkit::PromptError;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("{0}")]
    PromptError(#[from] PromptError),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid choices file: {0}")]
    SerdeError(#[from] serde_yaml::Error),
}

impl SelectError {
    /// Process exit status reported for this error.
    ///
    /// Ctrl+C follows the shell convention for SIGINT.
    pub fn exit_code(&self) -> i32 {
        match self {
            SelectError::PromptError(PromptError::Interrupted) => 130,
            _ => 1,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Choices file not found: {0}")]
    ChoicesFileNotFound(PathBuf),

    #[error("No choices given: pass them as arguments or with --choices-file")]
    NoChoices,

    #[error("No selectable choices: every entry is a separator")]
    NoSelectableChoices,

    #[error("Page size must be greater than 0")]
    InvalidPageSize,

    #[error("Search key {0:?} is not a printable character")]
    InvalidSearchKey(char),
}

pub type Result<T, E = SelectError> = std::result::Result<T, E>;
