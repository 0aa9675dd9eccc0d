//! Repainting a multi-line prompt in place.

use listkit_core::{rows_for_width, visible_width, ClearType, ConsoleOutput, ConsoleResult};

/// Paints a message over the previous one.
///
/// Each [`render`](ScreenManager::render) erases what the last call drew
/// and writes the new message in its place. The manager only needs to know
/// how many terminal rows the last paint took, which depends on the
/// terminal width because long lines wrap.
pub struct ScreenManager {
    console: Box<dyn ConsoleOutput>,
    columns: u16,
    height: usize,
}

impl ScreenManager {
    pub fn new(console: Box<dyn ConsoleOutput>) -> Self {
        Self {
            console,
            columns: 80,
            height: 0,
        }
    }

    pub fn update_terminal_width(&mut self, columns: u16) {
        if columns > 0 {
            self.columns = columns;
        }
    }

    pub fn terminal_width(&self) -> u16 {
        self.columns
    }

    /// Rows taken by the last paint, zero before the first one
    pub fn height(&self) -> usize {
        self.height
    }

    /// Replace the previous paint with `message`.
    pub fn render(&mut self, message: &str) -> ConsoleResult<()> {
        self.clean()?;

        let lines: Vec<&str> = message.split('\n').collect();
        self.console.write_text(&lines.join("\r\n"))?;
        self.height = lines
            .iter()
            .map(|line| rows_for_width(visible_width(line), self.columns))
            .sum();

        self.console.flush()
    }

    /// Leave the last paint on screen and move to a fresh line.
    pub fn done(&mut self) -> ConsoleResult<()> {
        if self.height > 0 {
            self.console.write_text("\r\n")?;
        }
        self.height = 0;
        self.console.flush()
    }

    pub fn set_cursor_visible(&self, visible: bool) -> ConsoleResult<()> {
        self.console.set_cursor_visible(visible)?;
        self.console.flush()
    }

    fn clean(&self) -> ConsoleResult<()> {
        if self.height == 0 {
            return Ok(());
        }
        if self.height > 1 {
            let up = i16::try_from(self.height - 1).unwrap_or(i16::MAX);
            self.console.move_cursor_relative(-up, 0)?;
        }
        self.console.write_text("\r")?;
        self.console.clear(ClearType::FromCursor)
    }
}
