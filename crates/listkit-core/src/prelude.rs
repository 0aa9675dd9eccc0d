//! Convenient re-exports for common usage patterns
//!
//! ```
//! use listkit_core::prelude::*;
//!
//! let choices: ChoiceList = ["apple", "banana"].into_iter().collect();
//! let mut machine = ListMachine::new(choices, None, DEFAULT_SEARCH_KEY).unwrap();
//! machine.handle(ListEvent::Down { raw: None });
//! assert_eq!(machine.selected_item().map(|c| c.value.as_str()), Some("banana"));
//! ```

// Choices and state
pub use crate::choice::{Choice, ChoiceItem, ChoiceList};
pub use crate::machine::{DefaultChoice, ListMachine, Mode, Status, Transition};

// Key input handling
pub use crate::events::{classify, KeyInput, ListEvent, DEFAULT_SEARCH_KEY};
pub use crate::key::{Key, KeyEvent};
pub use crate::key_parser::KeyParser;

// Rendering
pub use crate::style::{Color, TextStyle, Theme};
pub use crate::view::ListView;

// Console I/O
pub use crate::console::{ClearType, ConsoleInput, ConsoleOutput, RawModeGuard};
pub use crate::error::{ConfigError, ConsoleError, ConsoleResult};
