// Shared helpers for the prompt integration tests: a mock console pair and
// a minimal terminal emulator that replays what the prompt wrote.

#![allow(dead_code)]

use listkit::prelude::*;
use listkit::{MockConsoleInput, MockConsoleOutput};

/// Replays VT100 output into a grid of rows.
///
/// Understands what the screen manager emits: text, CR, LF, cursor up and
/// down, clear to end of screen, cursor visibility and SGR styling (which
/// is dropped). One character takes one cell.
pub struct TerminalEmulator {
    rows: Vec<Vec<char>>,
    cursor: (usize, usize),
    cursor_visible: bool,
}

impl TerminalEmulator {
    pub fn new() -> Self {
        Self {
            rows: vec![Vec::new()],
            cursor: (0, 0),
            cursor_visible: true,
        }
    }

    pub fn feed(&mut self, output: &str) {
        let mut chars = output.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\x1b' => {
                    if chars.peek() != Some(&'[') {
                        continue;
                    }
                    chars.next();
                    let mut params = String::new();
                    let mut final_byte = None;
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            final_byte = Some(next);
                            break;
                        }
                        params.push(next);
                    }
                    self.apply_csi(&params, final_byte);
                }
                '\r' => self.cursor.1 = 0,
                '\n' => {
                    self.cursor.0 += 1;
                    self.ensure_row(self.cursor.0);
                }
                _ => self.put(ch),
            }
        }
    }

    fn apply_csi(&mut self, params: &str, final_byte: Option<char>) {
        let count = params.parse::<usize>().unwrap_or(1);
        match (params, final_byte) {
            ("?25", Some('l')) => self.cursor_visible = false,
            ("?25", Some('h')) => self.cursor_visible = true,
            (_, Some('A')) => self.cursor.0 = self.cursor.0.saturating_sub(count),
            (_, Some('B')) => {
                self.cursor.0 += count;
                self.ensure_row(self.cursor.0);
            }
            ("0", Some('J')) | ("", Some('J')) => {
                let (row, col) = self.cursor;
                self.rows.truncate(row + 1);
                self.rows[row].truncate(col);
            }
            _ => {}
        }
    }

    fn ensure_row(&mut self, row: usize) {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
    }

    fn put(&mut self, ch: char) {
        let (row, col) = self.cursor;
        self.ensure_row(row);
        let line = &mut self.rows[row];
        while line.len() < col {
            line.push(' ');
        }
        if col < line.len() {
            line[col] = ch;
        } else {
            line.push(ch);
        }
        self.cursor.1 += 1;
    }

    /// Visible text, trailing blanks and empty trailing rows removed
    pub fn screen(&self) -> String {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

/// Prompt wired to mock consoles, with handles to drive and inspect them.
pub struct Harness {
    pub input: MockConsoleInput,
    pub output: MockConsoleOutput,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            input: MockConsoleInput::new(),
            output: MockConsoleOutput::new(),
        }
    }

    /// Builder preconfigured with the mocks and an uncolored theme
    pub fn builder(&self) -> ListPromptBuilder {
        ListPrompt::builder()
            .with_console_input(Box::new(self.input.clone()))
            .with_console_output(Box::new(self.output.clone()))
            .with_theme(Theme::plain())
    }

    /// What the terminal shows after replaying all output
    pub fn screen(&self) -> String {
        let mut emulator = TerminalEmulator::new();
        emulator.feed(&self.output.get_output_string());
        emulator.screen()
    }
}

pub fn fruit() -> Vec<&'static str> {
    vec!["apple", "banana", "cherry"]
}
