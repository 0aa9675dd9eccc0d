//! Error types shared by the listkit crates.

use std::io;

use thiserror::Error;

/// Console operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Platform-specific I/O error
    #[error("I/O error: {0}")]
    IoError(String),
    /// Feature not supported on this platform
    #[error("Feature '{feature}' not supported on platform '{platform}'")]
    UnsupportedFeature { feature: String, platform: String },
    /// Terminal setup/teardown error
    #[error("Terminal error: {0}")]
    TerminalError(String),
    /// The input stream reached end of file
    #[error("input closed")]
    InputClosed,
}

impl From<io::Error> for ConsoleError {
    fn from(e: io::Error) -> Self {
        ConsoleError::IoError(e.to_string())
    }
}

/// Result type for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Invalid prompt configuration, reported before anything is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required parameter: choices")]
    MissingChoices,
    #[error("choices must contain at least one selectable entry")]
    NoSelectableChoices,
    #[error("page size must be at least 1")]
    InvalidPageSize,
    #[error("search key {0:?} is not a printable character")]
    InvalidSearchKey(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_error_display() {
        let err = ConsoleError::UnsupportedFeature {
            feature: "console input".to_string(),
            platform: "plan9".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Feature 'console input' not supported on platform 'plan9'"
        );
        assert_eq!(ConsoleError::InputClosed.to_string(), "input closed");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ConsoleError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert_eq!(err, ConsoleError::IoError("pipe closed".to_string()));
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::MissingChoices.to_string(),
            "missing required parameter: choices"
        );
        assert_eq!(
            ConfigError::InvalidSearchKey('\t').to_string(),
            "search key '\\t' is not a printable character"
        );
    }
}
