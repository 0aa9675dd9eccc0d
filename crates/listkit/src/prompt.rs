//! Searchable list prompt with builder pattern
//!
//! # Examples
//!
//! ```no_run
//! use listkit::prelude::*;
//!
//! let prompt = ListPrompt::builder()
//!     .with_message("Pick a fruit")
//!     .with_choices(["apple", "banana", "cherry"])
//!     .with_default("banana")
//!     .build()
//!     .expect("Failed to create prompt");
//!
//! match prompt.run() {
//!     Ok(answer) => println!("You picked {}", answer.value),
//!     Err(PromptError::Interrupted) => println!("Cancelled"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use listkit_core::{
    classify, Choice, ChoiceItem, ChoiceList, ConfigError, ConsoleInput, ConsoleOutput,
    DefaultChoice, ListMachine, ListView, Theme, Transition, DEFAULT_PAGE_SIZE,
    DEFAULT_SEARCH_KEY,
};

use crate::error::{PromptError, PromptResult};
use crate::screen::ScreenManager;

/// An interactive single-select list.
///
/// Arrow keys (or `j`/`k`, Ctrl-N/Ctrl-P) move the pointer, `1`-`9` jump to
/// an entry, the search key switches to incremental search and Enter
/// submits.
pub struct ListPrompt {
    machine: ListMachine,
    view: ListView,
    input: Box<dyn ConsoleInput>,
    screen: ScreenManager,
}

impl ListPrompt {
    /// Create a new prompt builder
    pub fn builder() -> ListPromptBuilder {
        ListPromptBuilder::new()
    }

    /// Choices offered by this prompt
    pub fn choices(&self) -> &ChoiceList {
        self.machine.choices()
    }

    /// Index the pointer starts on
    pub fn initial_index(&self) -> usize {
        self.machine.state().selected
    }

    /// Run the prompt until the user submits or cancels.
    ///
    /// The terminal is in raw mode and the cursor hidden for the whole
    /// session; both are restored on every exit path.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::Interrupted` on Ctrl+C,
    /// `PromptError::NoMatchingEntry` when Enter is pressed while the search
    /// keyword matches nothing, and `PromptError::Console` on I/O failure.
    pub fn run(mut self) -> PromptResult<ChoiceItem> {
        let raw_guard = self.input.enable_raw_mode()?;
        log::debug!("raw mode enabled ({})", raw_guard.platform_info());

        self.screen.set_cursor_visible(false)?;
        let outcome = self.event_loop();
        let restored = self.screen.set_cursor_visible(true);

        let answer = outcome?;
        restored?;
        Ok(answer)
    }

    fn event_loop(&mut self) -> PromptResult<ChoiceItem> {
        self.paint()?;

        loop {
            let key_event = match self.input.read_key_timeout(None) {
                Ok(Some(key_event)) => key_event,
                Ok(None) => continue,
                Err(e) => {
                    if let Err(done_error) = self.screen.done() {
                        log::debug!("could not finish the paint after {e}: {done_error}");
                    }
                    return Err(e.into());
                }
            };

            let mut repaint = false;
            for event in classify(&key_event, self.machine.search_key()) {
                match self.machine.handle(event) {
                    Transition::Render => repaint = true,
                    Transition::Ignored => {}
                    Transition::Answered(item) => {
                        self.paint()?;
                        self.screen.done()?;
                        log::debug!("answered with {:?}", item.value);
                        return Ok(item);
                    }
                    Transition::NoMatch { keyword } => {
                        self.screen.done()?;
                        return Err(PromptError::NoMatchingEntry { keyword });
                    }
                    Transition::Interrupted => {
                        self.screen.done()?;
                        return Err(PromptError::Interrupted);
                    }
                }
            }

            if repaint {
                self.paint()?;
            }
        }
    }

    fn paint(&mut self) -> PromptResult<()> {
        if let Ok((cols, _rows)) = self.input.get_window_size() {
            self.screen.update_terminal_width(cols);
        }
        let message = self.view.render(&mut self.machine);
        self.screen.render(&message)?;
        Ok(())
    }
}

/// Builder for configuring and creating `ListPrompt` instances
///
/// # Examples
///
/// ```
/// use listkit::prelude::*;
/// use listkit::{MockConsoleInput, MockConsoleOutput};
///
/// let prompt = ListPromptBuilder::new()
///     .with_message("Pick a fruit")
///     .with_choices(["apple", "banana"])
///     .with_console_input(Box::new(MockConsoleInput::new()))
///     .with_console_output(Box::new(MockConsoleOutput::new()))
///     .build()
///     .unwrap();
/// assert_eq!(prompt.choices().real_len(), 2);
/// ```
pub struct ListPromptBuilder {
    message: String,
    choices: Option<ChoiceList>,
    default: Option<DefaultChoice>,
    page_size: usize,
    search_key: char,
    theme: Theme,
    console_output: Option<Box<dyn ConsoleOutput>>,
    console_input: Option<Box<dyn ConsoleInput>>,
}

impl ListPromptBuilder {
    /// Create a new builder with default settings
    ///
    /// Default settings:
    /// - Empty message
    /// - No choices (required before `build`)
    /// - Page size 7, search key `/`, colored theme
    /// - Console I/O will be auto-created if not specified
    pub fn new() -> Self {
        Self {
            message: String::new(),
            choices: None,
            default: None,
            page_size: DEFAULT_PAGE_SIZE,
            search_key: DEFAULT_SEARCH_KEY,
            theme: Theme::default(),
            console_output: None,
            console_input: None,
        }
    }

    /// Set the question shown above the list
    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = message.into();
        self
    }

    /// Set the choices from anything convertible to [`Choice`]
    pub fn with_choices<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        self.choices = Some(choices.into_iter().collect());
        self
    }

    pub fn with_choice_list(mut self, choices: ChoiceList) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Preselect an entry by real index (`usize`) or by value (`&str`)
    pub fn with_default<D: Into<DefaultChoice>>(mut self, default: D) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Number of list lines visible at once
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Key that switches to search mode
    pub fn with_search_key(mut self, search_key: char) -> Self {
        self.search_key = search_key;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the console output implementation
    pub fn with_console_output(mut self, output: Box<dyn ConsoleOutput>) -> Self {
        self.console_output = Some(output);
        self
    }

    /// Set the console input implementation
    pub fn with_console_input(mut self, input: Box<dyn ConsoleInput>) -> Self {
        self.console_input = Some(input);
        self
    }

    /// Set both console input and output using the platform implementations
    pub fn with_default_console(mut self) -> PromptResult<Self> {
        let (input, output) = listkit_io::create_console_io()?;
        self.console_input = Some(input);
        self.console_output = Some(output);
        Ok(self)
    }

    /// Build the configured prompt
    ///
    /// # Errors
    ///
    /// Configuration problems (no choices, no selectable entry, page size
    /// zero, unprintable search key) are reported before any console is
    /// touched. Console creation errors are reported afterwards.
    pub fn build(self) -> PromptResult<ListPrompt> {
        let choices = self.choices.ok_or(ConfigError::MissingChoices)?;
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize.into());
        }
        let machine = ListMachine::new(choices, self.default, self.search_key)?;

        let console_output = match self.console_output {
            Some(output) => output,
            None => listkit_io::create_console_output()?,
        };
        let console_input = match self.console_input {
            Some(input) => input,
            None => listkit_io::create_console_input()?,
        };

        Ok(ListPrompt {
            machine,
            view: ListView::new(self.message, self.page_size, self.theme),
            input: console_input,
            screen: ScreenManager::new(console_output),
        })
    }
}

impl Default for ListPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listkit_core::{ClearType, ConsoleError, ConsoleResult};
    use listkit_io::{MockConsoleInput, MockConsoleOutput};

    fn builder() -> ListPromptBuilder {
        ListPromptBuilder::new()
            .with_console_input(Box::new(MockConsoleInput::new()))
            .with_console_output(Box::new(MockConsoleOutput::new()))
    }

    fn build_err(builder: ListPromptBuilder) -> PromptError {
        match builder.build() {
            Ok(_) => panic!("expected a configuration error"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_missing_choices_fails_at_build() {
        assert_eq!(
            build_err(builder()),
            PromptError::Configuration(ConfigError::MissingChoices)
        );
    }

    #[test]
    fn test_missing_choices_checked_before_console() {
        // No console configured: the error must not come from console setup
        assert_eq!(
            build_err(ListPromptBuilder::new()),
            PromptError::Configuration(ConfigError::MissingChoices)
        );
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            build_err(builder().with_choices(["a"]).with_page_size(0)),
            PromptError::Configuration(ConfigError::InvalidPageSize)
        );
        assert_eq!(
            build_err(builder().with_choices(vec![Choice::separator()])),
            PromptError::Configuration(ConfigError::NoSelectableChoices)
        );
        assert_eq!(
            build_err(builder().with_choices(["a"]).with_search_key('\u{7}')),
            PromptError::Configuration(ConfigError::InvalidSearchKey('\u{7}'))
        );
    }

    #[test]
    fn test_default_by_value_and_index() {
        let prompt = builder()
            .with_choices(["apple", "banana", "cherry"])
            .with_default("cherry")
            .build()
            .unwrap();
        assert_eq!(prompt.initial_index(), 2);

        let prompt = builder()
            .with_choices(["apple", "banana", "cherry"])
            .with_default(1usize)
            .build()
            .unwrap();
        assert_eq!(prompt.initial_index(), 1);
    }

    /// Output whose line break after the last paint cannot be written
    struct BrokenLineBreakOutput;

    impl ConsoleOutput for BrokenLineBreakOutput {
        fn write_text(&self, text: &str) -> ConsoleResult<()> {
            if text == "\r\n" {
                return Err(ConsoleError::IoError("broken pipe".to_string()));
            }
            Ok(())
        }

        fn move_cursor_relative(&self, _row_delta: i16, _col_delta: i16) -> ConsoleResult<()> {
            Ok(())
        }

        fn clear(&self, _clear_type: ClearType) -> ConsoleResult<()> {
            Ok(())
        }

        fn set_cursor_visible(&self, _visible: bool) -> ConsoleResult<()> {
            Ok(())
        }

        fn flush(&self) -> ConsoleResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_error_wins_over_cleanup_error() {
        let input = MockConsoleInput::new();
        let result = ListPromptBuilder::new()
            .with_choices(["apple"])
            .with_console_input(Box::new(input.clone()))
            .with_console_output(Box::new(BrokenLineBreakOutput))
            .build()
            .unwrap()
            .run();

        assert_eq!(result, Err(PromptError::Console(ConsoleError::InputClosed)));
        assert!(!input.is_raw_mode_active());
    }
}
