//! Console input/output abstraction traits and types
//!
//! The prompt talks to the terminal only through these traits, so the same
//! code runs against a real TTY or against the in-memory mocks used in
//! tests.

use crate::error::ConsoleResult;
use crate::key::KeyEvent;

/// Console input interface
pub trait ConsoleInput: Send {
    /// Enable raw terminal mode with automatic restoration
    fn enable_raw_mode(&self) -> ConsoleResult<RawModeGuard>;

    /// Get current terminal window size (columns, rows)
    fn get_window_size(&self) -> ConsoleResult<(u16, u16)>;

    /// Read one key without blocking
    fn try_read_key(&self) -> ConsoleResult<Option<KeyEvent>>;

    /// Read one key, waiting at most `timeout_ms` milliseconds.
    ///
    /// `None` waits until a key arrives. Returns
    /// [`ConsoleError::InputClosed`](crate::error::ConsoleError::InputClosed) once the input stream has ended.
    fn read_key_timeout(&self, timeout_ms: Option<u32>) -> ConsoleResult<Option<KeyEvent>>;
}

/// Console output interface
pub trait ConsoleOutput: Send {
    /// Write text at current cursor position
    fn write_text(&self, text: &str) -> ConsoleResult<()>;

    /// Move cursor relative to current position
    fn move_cursor_relative(&self, row_delta: i16, col_delta: i16) -> ConsoleResult<()>;

    /// Clear screen or specific areas
    fn clear(&self, clear_type: ClearType) -> ConsoleResult<()>;

    /// Show/hide cursor
    fn set_cursor_visible(&self, visible: bool) -> ConsoleResult<()>;

    /// Flush buffered output to terminal
    fn flush(&self) -> ConsoleResult<()>;
}

/// RAII guard for terminal raw mode.
///
/// The terminal is restored exactly once, when the guard is dropped.
pub struct RawModeGuard {
    restore_fn: Option<Box<dyn FnOnce() + Send>>,
    platform_info: String,
}

impl RawModeGuard {
    pub fn new<F>(restore_fn: F, platform_info: String) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            restore_fn: Some(Box::new(restore_fn)),
            platform_info,
        }
    }

    /// Backend that entered raw mode
    pub fn platform_info(&self) -> &str {
        &self.platform_info
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Some(restore_fn) = self.restore_fn.take() {
            restore_fn();
        }
    }
}

impl std::fmt::Debug for RawModeGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawModeGuard")
            .field("platform_info", &self.platform_info)
            .finish()
    }
}

/// Screen clearing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearType {
    /// Clear from cursor to end of screen
    FromCursor,
}

impl ClearType {
    /// VT100 sequence performing this clear
    pub fn to_ansi(self) -> &'static str {
        match self {
            ClearType::FromCursor => "\x1b[0J",
        }
    }
}
