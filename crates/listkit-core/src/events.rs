//! Classification of key events into the channels a list prompt listens on.
//!
//! One keystroke may feed several channels at once: `k` is both a
//! normalized "up" and a plain keypress, `3` is both a number key and a
//! keypress. The state machine decides which of them matter in the
//! current mode, so [`classify`] reports all of them, in dispatch order.

use crate::key::{Key, KeyEvent};

/// Character of the search trigger unless configured otherwise
pub const DEFAULT_SEARCH_KEY: char = '/';

/// Raw input to the keyword editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Erase,
}

/// A classified event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// Move up. `raw` holds the character when the move came from a letter
    /// binding (`k`) rather than an arrow or control key.
    Up { raw: Option<char> },
    /// Move down, see [`ListEvent::Up`].
    Down { raw: Option<char> },
    /// Number key `1`..=`9`
    Number(usize),
    SearchTrigger,
    Keypress(KeyInput),
    /// Submit
    Line,
    Interrupt,
}

/// Map `event` to every channel it belongs to, in dispatch order:
/// up, down, number, search trigger, keypress, then line or interrupt.
pub fn classify(event: &KeyEvent, search_key: char) -> Vec<ListEvent> {
    let mut events = Vec::new();
    let ch = event.printable_char();

    match (event.key, ch) {
        (Key::Up | Key::ControlP, _) => events.push(ListEvent::Up { raw: None }),
        (_, Some('k')) => events.push(ListEvent::Up { raw: Some('k') }),
        (Key::Down | Key::ControlN, _) => events.push(ListEvent::Down { raw: None }),
        (_, Some('j')) => events.push(ListEvent::Down { raw: Some('j') }),
        _ => {}
    }

    if let Some(digit) = ch.and_then(|c| c.to_digit(10)).filter(|d| *d >= 1) {
        events.push(ListEvent::Number(digit as usize));
    }

    if ch == Some(search_key) {
        events.push(ListEvent::SearchTrigger);
    }

    match (event.key, ch) {
        (Key::Backspace, _) => events.push(ListEvent::Keypress(KeyInput::Erase)),
        (_, Some(c)) => events.push(ListEvent::Keypress(KeyInput::Char(c))),
        _ => {}
    }

    match event.key {
        Key::Enter => events.push(ListEvent::Line),
        Key::ControlC => events.push(ListEvent::Interrupt),
        _ => {}
    }

    log::trace!("classified {:?} as {:?}", event.key, events);
    events
}
