//! Key definitions and key event structures for terminal input parsing.
//!
//! Only the keys a list prompt reacts to (or must recognise in order to
//! ignore them) get their own variant. Printable characters are reported as
//! `Key::NotDefined` carrying their text, the same convention the parser
//! uses for any byte run it cannot name.

/// Key represents the key inputs that can be parsed from terminal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key
    Escape,

    // Control characters the prompt cares about
    ControlA,
    ControlC,
    ControlD,
    ControlE,
    ControlN,
    ControlP,
    ControlU,
    ControlW,

    // Navigation keys (arrow keys)
    Up,
    Down,
    Right,
    Left,

    // Navigation and editing keys
    Home,
    End,
    Delete,
    PageUp,
    PageDown,
    BackTab,
    Insert,
    Backspace,

    // Aliases for common keys
    Tab,
    Enter,

    /// Key which should be ignored (no action should be taken)
    Ignore,
    /// Key is not defined, or a printable character carried in `text`
    NotDefined,
}

/// KeyEvent represents a parsed key input event with associated metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The parsed key type
    pub key: Key,
    /// The raw bytes that were parsed to produce this key event
    pub raw_bytes: Vec<u8>,
    /// Text content for printable characters
    pub text: Option<String>,
}

impl KeyEvent {
    /// Create a new KeyEvent with the specified key, raw bytes, and optional text
    pub fn new(key: Key, raw_bytes: Vec<u8>, text: Option<String>) -> Self {
        Self {
            key,
            raw_bytes,
            text,
        }
    }

    /// Create a KeyEvent for a simple key without text content
    pub fn simple(key: Key, raw_bytes: Vec<u8>) -> Self {
        Self::new(key, raw_bytes, None)
    }

    /// Create a KeyEvent for a printable character
    pub fn char(ch: char) -> Self {
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        Self::new(
            Key::NotDefined,
            encoded.as_bytes().to_vec(),
            Some(ch.to_string()),
        )
    }

    /// Check if this key event has associated text content
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Get the text content, returning an empty string if none exists
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// The single printable character this event carries, if any.
    pub fn printable_char(&self) -> Option<char> {
        let mut chars = self.text.as_deref()?.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_control() => Some(ch),
            _ => None,
        }
    }
}

impl Default for KeyEvent {
    fn default() -> Self {
        Self {
            key: Key::NotDefined,
            raw_bytes: Vec::new(),
            text: None,
        }
    }
}
