//! State machine-based key parser for handling raw terminal input.
//!
//! The parser keeps state between calls so that escape sequences and UTF-8
//! characters split across reads are still reported as a single key.

use crate::key::{Key, KeyEvent};
use crate::sequence_matcher::{MatchResult, SequenceMatcher};

/// Longest escape sequence the parser will buffer before giving up on it
const MAX_BUFFER_SIZE: usize = 32;

/// Parser state for handling different types of input sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Plain ASCII input and known single-byte sequences
    Normal,
    /// After ESC (0x1B)
    EscapeSequence,
    /// After ESC[ (Control Sequence Introducer)
    CsiSequence,
    /// Inside a multi-byte UTF-8 character, waiting for `remaining` bytes
    Utf8 { remaining: usize },
}

/// Converts raw terminal input bytes to key events
pub struct KeyParser {
    state: ParserState,
    buffer: Vec<u8>,
    sequence_matcher: SequenceMatcher,
}

impl KeyParser {
    /// Create a new KeyParser with default configuration
    pub fn new() -> Self {
        Self {
            state: ParserState::Normal,
            buffer: Vec::new(),
            sequence_matcher: SequenceMatcher::new(),
        }
    }

    /// Current parser state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Feed raw bytes to the parser and return any complete key events.
    ///
    /// Partial sequences stay buffered until a later `feed` completes them
    /// or `flush` gives up on them.
    pub fn feed(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        let mut events = Vec::new();

        for &byte in data {
            if self.buffer.len() >= MAX_BUFFER_SIZE {
                events.push(KeyEvent::simple(Key::NotDefined, self.buffer.clone()));
                self.reset_to_normal();
            }

            match self.state {
                ParserState::Normal => self.handle_normal_byte(byte, &mut events),
                ParserState::EscapeSequence => self.handle_escape_byte(byte, &mut events),
                ParserState::CsiSequence => self.handle_csi_byte(byte, &mut events),
                ParserState::Utf8 { remaining } => {
                    self.handle_utf8_byte(byte, remaining, &mut events)
                }
            }
        }

        if !events.is_empty() {
            log::trace!("parsed {} key event(s) from {} byte(s)", events.len(), data.len());
        }
        events
    }

    /// Flush any incomplete sequence as key events.
    ///
    /// Called when input goes quiet; this is how a lone ESC press is told
    /// apart from the start of an escape sequence.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let mut events = Vec::new();

        if !self.buffer.is_empty() {
            if let ParserState::Utf8 { .. } = self.state {
                events.push(KeyEvent::simple(Key::NotDefined, self.buffer.clone()));
            } else if let Some(longest) = self.sequence_matcher.find_longest_match(&self.buffer) {
                events.push(KeyEvent::simple(
                    longest.key,
                    self.buffer[..longest.consumed_bytes].to_vec(),
                ));
                for &byte in &self.buffer[longest.consumed_bytes..] {
                    events.push(create_char_event(byte));
                }
            } else {
                for &byte in &self.buffer {
                    events.push(create_char_event(byte));
                }
            }
        }

        self.reset_to_normal();
        events
    }

    /// Reset the parser state and clear the buffer
    pub fn reset(&mut self) {
        self.reset_to_normal();
    }

    fn handle_normal_byte(&mut self, byte: u8, events: &mut Vec<KeyEvent>) {
        if byte == 0x1b {
            self.buffer.push(byte);
            self.state = ParserState::EscapeSequence;
            return;
        }

        if let Some(remaining) = utf8_continuation_count(byte) {
            self.buffer.push(byte);
            self.state = ParserState::Utf8 { remaining };
            return;
        }

        match self.sequence_matcher.match_sequence(&[byte]) {
            MatchResult::Exact(key) => events.push(KeyEvent::simple(key, vec![byte])),
            _ => events.push(create_char_event(byte)),
        }
    }

    fn handle_escape_byte(&mut self, byte: u8, events: &mut Vec<KeyEvent>) {
        self.buffer.push(byte);

        if byte == b'[' {
            self.state = ParserState::CsiSequence;
            return;
        }

        match self.sequence_matcher.match_sequence(&self.buffer) {
            MatchResult::Exact(key) => {
                events.push(KeyEvent::simple(key, self.buffer.clone()));
                self.reset_to_normal();
            }
            MatchResult::Prefix => {}
            MatchResult::NoMatch => {
                // Not a sequence we know: a lone ESC followed by a regular byte
                events.push(KeyEvent::simple(Key::Escape, vec![0x1b]));
                self.reset_to_normal();
                self.handle_normal_byte(byte, events);
            }
        }
    }

    fn handle_csi_byte(&mut self, byte: u8, events: &mut Vec<KeyEvent>) {
        self.buffer.push(byte);

        match self.sequence_matcher.match_sequence(&self.buffer) {
            MatchResult::Exact(Key::Ignore) => self.reset_to_normal(),
            MatchResult::Exact(key) => {
                events.push(KeyEvent::simple(key, self.buffer.clone()));
                self.reset_to_normal();
            }
            MatchResult::Prefix => {}
            MatchResult::NoMatch => {
                if is_csi_parameter_byte(byte) {
                    // Parameterised sequence (modifiers etc.), keep reading
                } else if is_csi_final_byte(byte) {
                    events.push(KeyEvent::simple(Key::NotDefined, self.buffer.clone()));
                    self.reset_to_normal();
                } else {
                    events.push(KeyEvent::simple(Key::Escape, vec![0x1b]));
                    events.push(create_char_event(b'['));

                    let remaining_bytes: Vec<u8> = self.buffer[2..].to_vec();
                    self.reset_to_normal();
                    for b in remaining_bytes {
                        self.handle_normal_byte(b, events);
                    }
                }
            }
        }
    }

    fn handle_utf8_byte(&mut self, byte: u8, remaining: usize, events: &mut Vec<KeyEvent>) {
        if !(0x80..=0xbf).contains(&byte) {
            // Truncated character: report what we had, then start over
            events.push(KeyEvent::simple(Key::NotDefined, self.buffer.clone()));
            self.reset_to_normal();
            self.handle_normal_byte(byte, events);
            return;
        }

        self.buffer.push(byte);
        if remaining > 1 {
            self.state = ParserState::Utf8 {
                remaining: remaining - 1,
            };
            return;
        }

        let raw = std::mem::take(&mut self.buffer);
        match std::str::from_utf8(&raw) {
            Ok(text) => {
                let text = text.to_string();
                events.push(KeyEvent::new(Key::NotDefined, raw, Some(text)));
            }
            Err(_) => events.push(KeyEvent::simple(Key::NotDefined, raw)),
        }
        self.reset_to_normal();
    }

    fn reset_to_normal(&mut self) {
        self.state = ParserState::Normal;
        self.buffer.clear();
    }
}

impl Default for KeyParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of continuation bytes announced by a UTF-8 lead byte.
fn utf8_continuation_count(byte: u8) -> Option<usize> {
    match byte {
        0xc2..=0xdf => Some(1),
        0xe0..=0xef => Some(2),
        0xf0..=0xf4 => Some(3),
        _ => None,
    }
}

fn is_csi_parameter_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b';' | b':' | b'<' | b'=' | b'>' | b'?')
}

fn is_csi_final_byte(byte: u8) -> bool {
    matches!(byte, b'@'..=b'~')
}

fn create_char_event(byte: u8) -> KeyEvent {
    if byte.is_ascii() && !byte.is_ascii_control() {
        KeyEvent::char(byte as char)
    } else {
        KeyEvent::simple(Key::NotDefined, vec![byte])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(events: &[KeyEvent]) -> Vec<Key> {
        events.iter().map(|e| e.key).collect()
    }

    #[test]
    fn test_control_characters() {
        let mut parser = KeyParser::new();
        let events = parser.feed(&[0x03, 0x0d, 0x7f, 0x08, 0x0e, 0x10]);
        assert_eq!(
            keys(&events),
            vec![
                Key::ControlC,
                Key::Enter,
                Key::Backspace,
                Key::Backspace,
                Key::ControlN,
                Key::ControlP,
            ]
        );
    }

    #[test]
    fn test_arrow_keys_csi_and_ss3() {
        let mut parser = KeyParser::new();
        let events = parser.feed(b"\x1b[A\x1b[B\x1bOA\x1bOB");
        assert_eq!(keys(&events), vec![Key::Up, Key::Down, Key::Up, Key::Down]);
        assert_eq!(events[0].raw_bytes, b"\x1b[A");
    }

    #[test]
    fn test_printable_characters() {
        let mut parser = KeyParser::new();
        let events = parser.feed(b"an/");
        let text: Vec<&str> = events.iter().map(|e| e.text_or_empty()).collect();
        assert_eq!(text, vec!["a", "n", "/"]);
        assert!(events.iter().all(|e| e.key == Key::NotDefined));
    }

    #[test]
    fn test_partial_sequences_across_feeds() {
        let mut parser = KeyParser::new();
        assert!(parser.feed(b"\x1b").is_empty());
        assert_eq!(parser.state(), ParserState::EscapeSequence);
        assert!(parser.feed(b"[").is_empty());
        assert_eq!(parser.state(), ParserState::CsiSequence);
        let events = parser.feed(b"B");
        assert_eq!(keys(&events), vec![Key::Down]);
        assert_eq!(parser.state(), ParserState::Normal);
    }

    #[test]
    fn test_lone_escape_is_reported_on_flush() {
        let mut parser = KeyParser::new();
        assert!(parser.feed(&[0x1b]).is_empty());
        let events = parser.flush();
        assert_eq!(keys(&events), vec![Key::Escape]);
        assert_eq!(parser.state(), ParserState::Normal);
    }

    #[test]
    fn test_escape_followed_by_letter() {
        let mut parser = KeyParser::new();
        let events = parser.feed(b"\x1bx");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].key, Key::Escape);
        assert_eq!(events[1].text_or_empty(), "x");
    }

    #[test]
    fn test_tilde_sequences() {
        let mut parser = KeyParser::new();
        let events = parser.feed(b"\x1b[3~\x1b[5~\x1b[6~");
        assert_eq!(keys(&events), vec![Key::Delete, Key::PageUp, Key::PageDown]);
    }

    #[test]
    fn test_unknown_parameterised_csi() {
        let mut parser = KeyParser::new();
        let events = parser.feed(b"\x1b[1;5A");
        assert_eq!(keys(&events), vec![Key::NotDefined]);
        assert_eq!(events[0].raw_bytes, b"\x1b[1;5A");
        assert!(!events[0].has_text());
    }

    #[test]
    fn test_focus_reports_are_dropped() {
        let mut parser = KeyParser::new();
        let events = parser.feed(b"\x1b[Ia\x1b[O");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text_or_empty(), "a");
    }

    #[test]
    fn test_utf8_character_split_across_feeds() {
        let mut parser = KeyParser::new();
        let bytes = "é".as_bytes();
        assert!(parser.feed(&bytes[..1]).is_empty());
        assert_eq!(parser.state(), ParserState::Utf8 { remaining: 1 });
        let events = parser.feed(&bytes[1..]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].printable_char(), Some('é'));
    }

    #[test]
    fn test_truncated_utf8_then_ascii() {
        let mut parser = KeyParser::new();
        let events = parser.feed(&[0xe3, 0x81, b'a']);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].raw_bytes, vec![0xe3, 0x81]);
        assert!(!events[0].has_text());
        assert_eq!(events[1].text_or_empty(), "a");
    }

    #[test]
    fn test_reset_clears_pending_sequence() {
        let mut parser = KeyParser::new();
        parser.feed(b"\x1b[");
        parser.reset();
        assert_eq!(parser.state(), ParserState::Normal);
        assert!(parser.flush().is_empty());
    }
}
