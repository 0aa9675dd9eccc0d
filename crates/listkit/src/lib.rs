//! # Listkit: searchable list prompts
//!
//! Listkit asks the user to pick one entry from a list in the terminal.
//! The list can be navigated with the arrow keys, vi keys or number keys,
//! and narrowed down with an incremental search.
//!
//! ## Quick Start
//!
//! ```no_run
//! use listkit::prelude::*;
//!
//! let answer = ListPrompt::builder()
//!     .with_message("Pick a fruit")
//!     .with_choices(vec![
//!         Choice::plain("apple"),
//!         Choice::separator(),
//!         Choice::item("Banana (ripe)", "banana"),
//!     ])
//!     .build()?
//!     .run()?;
//! println!("{}", answer.value);
//! # Ok::<(), PromptError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Core logic** (`listkit-core`): choices, key parsing, state machine, rendering
//! - **Platform I/O** (`listkit-io`): terminal and mock console implementations
//! - **High-level API** (`listkit`): `ListPrompt` and the screen manager, this crate

// Re-export the building blocks from listkit-core
pub use listkit_core::{
    apply_filter, classify, render_list, Choice, ChoiceItem, ChoiceList, ClearType, Color,
    ConfigError, ConsoleError, ConsoleInput, ConsoleOutput, ConsoleResult, DefaultChoice,
    DefaultResolution, Key, KeyEvent, KeyInput, KeyParser, ListEvent, ListMachine, ListView,
    Mode, Paginator, PromptState, RawModeGuard, Status, TextStyle, Theme, Transition,
    DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_KEY, DEFAULT_SEPARATOR, NO_MATCH_MESSAGE,
};

// Re-export I/O implementations from listkit-io
pub use listkit_io::*;

pub mod error;
pub mod prompt;
pub mod screen;

pub use error::{PromptError, PromptResult};
pub use prompt::{ListPrompt, ListPromptBuilder};
pub use screen::ScreenManager;

/// Convenient re-exports for common usage patterns
///
/// Import everything you need with `use listkit::prelude::*;`
pub mod prelude {
    pub use crate::{ListPrompt, ListPromptBuilder, PromptError, PromptResult};

    pub use listkit_core::{Choice, ChoiceItem, ChoiceList, DefaultChoice, Theme};

    pub use listkit_core::{ConsoleInput, ConsoleOutput};
}

/// Convenience functions for common use cases
pub mod convenience {
    use crate::prelude::*;

    /// Ask `message` with plain string choices on the real terminal.
    ///
    /// ```no_run
    /// use listkit::convenience::select;
    ///
    /// let value = select("Pick a fruit", ["apple", "banana"]).unwrap();
    /// ```
    pub fn select<I, S>(message: &str, choices: I) -> PromptResult<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let answer = ListPrompt::builder()
            .with_message(message)
            .with_choices(choices.into_iter().map(Choice::plain))
            .build()?
            .run()?;
        Ok(answer.value)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let builder: ListPromptBuilder = ListPrompt::builder();
        let _ = builder.with_choices([Choice::plain("a")]).with_theme(Theme::plain());
        let _item = ChoiceItem::new("A", "a");
        let _err = PromptError::Interrupted;
    }
}
