//! Listkit Core Library
//!
//! Terminal-independent building blocks of a searchable single-select list
//! prompt: choice lists, key parsing and classification, the selection
//! state machine, search filtering, list rendering and pagination. The
//! console traits let the same logic drive a real terminal or an in-memory
//! mock.

pub mod key;
pub mod key_parser;
pub mod sequence_matcher;

pub mod choice;
pub mod error;
pub mod events;
pub mod filter;
pub mod machine;
pub mod paginator;
pub mod render;
pub mod style;
pub mod unicode;
pub mod view;

// Console I/O abstraction
pub mod console;

pub mod prelude;

// Re-export commonly used types for convenience
pub use key::{Key, KeyEvent};
pub use key_parser::{KeyParser, ParserState};
pub use sequence_matcher::{LongestMatchResult, MatchResult, SequenceMatcher};

pub use choice::{Choice, ChoiceItem, ChoiceList, DEFAULT_SEPARATOR};
pub use error::{ConfigError, ConsoleError, ConsoleResult};
pub use events::{classify, KeyInput, ListEvent, DEFAULT_SEARCH_KEY};
pub use filter::{apply_filter, FilterOutcome, FilteredView, NO_MATCH_MESSAGE};
pub use machine::{
    DefaultChoice, DefaultResolution, ListMachine, Mode, PromptState, Status, Transition,
};
pub use paginator::{Paginator, DEFAULT_PAGE_SIZE, MORE_CHOICES_HINT};
pub use render::render_list;
pub use style::{strip_ansi, visible_width, Color, TextStyle, Theme};
pub use unicode::{display_width, rows_for_width};
pub use view::ListView;

pub use console::{ClearType, ConsoleInput, ConsoleOutput, RawModeGuard};
