//! Terminal backends for listkit.
//!
//! Provides the platform implementation of the console traits defined in
//! `listkit-core`:
//! - `UnixConsoleInput` / `UnixConsoleOutput` (POSIX terminals, VT100 sequences)
//! - `MockConsoleInput` / `MockConsoleOutput` (in-memory, for tests)

use std::io;

// Re-export core types and traits
pub use listkit_core::{
    ClearType, ConsoleError, ConsoleInput, ConsoleOutput, ConsoleResult, KeyEvent, KeyParser,
    RawModeGuard,
};

// Helper function to convert io::Error to ConsoleError
pub fn io_error_to_console_error(e: io::Error) -> ConsoleError {
    ConsoleError::IoError(e.to_string())
}

/// VT100 sequence moving the cursor by the given deltas.
pub fn cursor_move_sequence(row_delta: i16, col_delta: i16) -> String {
    let mut sequence = String::new();
    if row_delta > 0 {
        sequence.push_str(&format!("\x1b[{row_delta}B"));
    } else if row_delta < 0 {
        sequence.push_str(&format!("\x1b[{}A", -row_delta));
    }
    if col_delta > 0 {
        sequence.push_str(&format!("\x1b[{col_delta}C"));
    } else if col_delta < 0 {
        sequence.push_str(&format!("\x1b[{}D", -col_delta));
    }
    sequence
}

/// VT100 sequence showing or hiding the cursor.
pub fn cursor_visibility_sequence(visible: bool) -> &'static str {
    if visible {
        "\x1b[?25h"
    } else {
        "\x1b[?25l"
    }
}

/// Create both console input and output for the current platform
pub fn create_console_io() -> ConsoleResult<(Box<dyn ConsoleInput>, Box<dyn ConsoleOutput>)> {
    let input = create_console_input()?;
    let output = create_console_output()?;
    Ok((input, output))
}

/// Create console input for the current platform
pub fn create_console_input() -> ConsoleResult<Box<dyn ConsoleInput>> {
    #[cfg(unix)]
    {
        let input = unix::UnixConsoleInput::new().map_err(io_error_to_console_error)?;
        Ok(Box::new(input))
    }

    #[cfg(not(unix))]
    {
        Err(ConsoleError::UnsupportedFeature {
            feature: "console input".to_string(),
            platform: std::env::consts::OS.to_string(),
        })
    }
}

/// Create console output for the current platform.
///
/// Paints on stdout when it is a terminal, otherwise on stderr, so that a
/// caller can redirect stdout to capture the answer.
pub fn create_console_output() -> ConsoleResult<Box<dyn ConsoleOutput>> {
    #[cfg(unix)]
    {
        let output = unix::UnixConsoleOutput::new()
            .or_else(|_| unix::UnixConsoleOutput::stderr())?;
        Ok(Box::new(output))
    }

    #[cfg(not(unix))]
    {
        Err(ConsoleError::UnsupportedFeature {
            feature: "console output".to_string(),
            platform: std::env::consts::OS.to_string(),
        })
    }
}

/// Create mock console I/O for testing
pub fn create_mock_console_io() -> (mock::MockConsoleInput, mock::MockConsoleOutput) {
    (mock::MockConsoleInput::new(), mock::MockConsoleOutput::new())
}

// Platform-specific modules
#[cfg(unix)]
mod unix;

// Mock implementation for testing
pub mod mock;

#[cfg(unix)]
pub use unix::{UnixConsoleInput, UnixConsoleOutput};

pub use mock::{MockConsoleInput, MockConsoleOutput};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_sequence() {
        assert_eq!(cursor_move_sequence(-3, 0), "\x1b[3A");
        assert_eq!(cursor_move_sequence(2, -1), "\x1b[2B\x1b[1D");
        assert_eq!(cursor_move_sequence(0, 0), "");
    }

    #[test]
    fn test_cursor_visibility_sequence() {
        assert_eq!(cursor_visibility_sequence(false), "\x1b[?25l");
        assert_eq!(cursor_visibility_sequence(true), "\x1b[?25h");
    }

    #[test]
    fn test_io_error_conversion() {
        let err = io_error_to_console_error(io::Error::other("boom"));
        assert_eq!(err, ConsoleError::IoError("boom".to_string()));
    }
}
