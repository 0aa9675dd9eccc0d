use listkit_core::{ConfigError, ConsoleError};
use thiserror::Error;

/// Error types specific to prompt operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// User interrupted the prompt (Ctrl+C)
    #[error("Prompt was interrupted")]
    Interrupted,
    /// Submitted while the search keyword matched no choice
    #[error("no entry matching {keyword:?}")]
    NoMatchingEntry { keyword: String },
    /// Invalid prompt configuration
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    /// Terminal I/O failed
    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),
}

/// Result type for prompt operations
pub type PromptResult<T> = Result<T, PromptError>;
