//! Text styling and the prompt theme.
//!
//! Styles are applied as inline SGR escape sequences so that rendered
//! blocks stay plain `String`s: the list renderer and the render
//! orchestrator are pure functions of their inputs, and the screen layer
//! only needs to know how wide the visible part of each line is.

use crate::unicode::display_width;

/// Foreground colors used by the prompt theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Cyan,
}

impl Color {
    fn fg_code(self) -> &'static str {
        match self {
            Color::Green => "32",
            Color::Cyan => "36",
        }
    }
}

/// Text styling configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub foreground: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl TextStyle {
    pub fn fg(color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..Default::default()
        }
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    pub fn dim() -> Self {
        Self {
            dim: true,
            ..Default::default()
        }
    }

    /// SGR sequence selecting this style, empty for the default style.
    pub fn to_ansi(&self) -> String {
        let mut codes = Vec::new();

        if let Some(fg) = self.foreground {
            codes.push(fg.fg_code());
        }
        if self.bold {
            codes.push("1");
        }
        if self.dim {
            codes.push("2");
        }

        if codes.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", codes.join(";"))
        }
    }

    /// Wrap `text` in this style. The default style returns `text` as is.
    pub fn paint(&self, text: &str) -> String {
        let start = self.to_ansi();
        if start.is_empty() {
            text.to_string()
        } else {
            format!("{start}{text}\x1b[0m")
        }
    }
}

/// Glyphs and styles used when drawing a list prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Glyph in front of the selected entry
    pub pointer: String,
    /// Leading `?` of the question line
    pub prefix: TextStyle,
    /// The question text
    pub message: TextStyle,
    /// Selected entry, including its pointer
    pub highlight: TextStyle,
    /// Hints, search indicator and separators
    pub hint: TextStyle,
    /// Echo of the answer once submitted
    pub answer: TextStyle,
}

impl Theme {
    /// Same glyphs, no escape sequences at all.
    pub fn plain() -> Self {
        Self {
            pointer: "❯".to_string(),
            prefix: TextStyle::default(),
            message: TextStyle::default(),
            highlight: TextStyle::default(),
            hint: TextStyle::default(),
            answer: TextStyle::default(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            pointer: "❯".to_string(),
            prefix: TextStyle::fg(Color::Green),
            message: TextStyle::bold(),
            highlight: TextStyle::fg(Color::Cyan),
            hint: TextStyle::dim(),
            answer: TextStyle::fg(Color::Cyan),
        }
    }
}

/// Remove CSI escape sequences, leaving the visible text.
pub fn strip_ansi(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            output.push(ch);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // Parameters and intermediates run until the final byte
            for next in chars.by_ref() {
                if ('@'..='~').contains(&next) {
                    break;
                }
            }
        }
    }

    output
}

/// Terminal columns taken by the visible part of `text`.
pub fn visible_width(text: &str) -> usize {
    display_width(&strip_ansi(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_paints_nothing() {
        assert_eq!(TextStyle::default().paint("apple"), "apple");
        assert_eq!(TextStyle::default().to_ansi(), "");
    }

    #[test]
    fn test_style_sequences() {
        assert_eq!(TextStyle::fg(Color::Cyan).paint("x"), "\x1b[36mx\x1b[0m");
        assert_eq!(TextStyle::dim().paint("x"), "\x1b[2mx\x1b[0m");

        let combined = TextStyle {
            foreground: Some(Color::Green),
            bold: true,
            ..Default::default()
        };
        assert_eq!(combined.to_ansi(), "\x1b[32;1m");
    }

    #[test]
    fn test_strip_ansi() {
        let painted = format!("{} {}", TextStyle::fg(Color::Green).paint("?"), TextStyle::bold().paint("Pick"));
        assert_eq!(strip_ansi(&painted), "? Pick");
        assert_eq!(strip_ansi("no escapes"), "no escapes");
    }

    #[test]
    fn test_visible_width_ignores_escapes_and_counts_wide_chars() {
        let painted = TextStyle::fg(Color::Cyan).paint("> りんご");
        assert_eq!(visible_width(&painted), 2 + 6);
    }

    #[test]
    fn test_plain_theme_has_no_styles() {
        let theme = Theme::plain();
        assert_eq!(theme.highlight.paint("a"), "a");
        assert_eq!(theme.pointer, Theme::default().pointer);
    }
}
