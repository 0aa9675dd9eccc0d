//! Selection state machine for a searchable list prompt.
//!
//! [`ListMachine`] owns the prompt state and is the only thing that mutates
//! it. Each classified [`ListEvent`] goes through [`ListMachine::handle`],
//! which reports what the caller should do next as a [`Transition`].

use crate::choice::{ChoiceItem, ChoiceList};
use crate::error::ConfigError;
use crate::events::{KeyInput, ListEvent};
use crate::filter::{apply_filter, FilterOutcome, FilteredView};

/// Interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Answered,
}

/// Initially selected entry as configured by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultChoice {
    /// Real index into the choice list
    Index(usize),
    /// Value of the entry to select
    Value(String),
}

impl From<usize> for DefaultChoice {
    fn from(index: usize) -> Self {
        DefaultChoice::Index(index)
    }
}

impl From<&str> for DefaultChoice {
    fn from(value: &str) -> Self {
        DefaultChoice::Value(value.to_string())
    }
}

impl From<String> for DefaultChoice {
    fn from(value: String) -> Self {
        DefaultChoice::Value(value)
    }
}

/// Outcome of looking up a [`DefaultChoice`] in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultResolution {
    /// No default was configured
    Unset,
    /// The default refers to this real index
    Found(usize),
    /// The default names no entry of the list
    NotFound,
}

impl DefaultResolution {
    /// Resolve `default` against `choices`.
    ///
    /// A value is looked up with [`ChoiceList::index_of_value`] first.
    pub fn resolve(choices: &ChoiceList, default: Option<&DefaultChoice>) -> Self {
        match default {
            None => DefaultResolution::Unset,
            Some(DefaultChoice::Index(index)) if *index < choices.real_len() => {
                DefaultResolution::Found(*index)
            }
            Some(DefaultChoice::Index(_)) => DefaultResolution::NotFound,
            Some(DefaultChoice::Value(value)) => match choices.index_of_value(value) {
                Some(index) => DefaultResolution::Found(index),
                // A numeric string that names no value is read as an index
                None => match value.parse::<usize>() {
                    Ok(index) if index < choices.real_len() => DefaultResolution::Found(index),
                    _ => DefaultResolution::NotFound,
                },
            },
        }
    }

    /// Index to start on: the resolved default, or the first entry.
    pub fn initial_index(self) -> usize {
        match self {
            DefaultResolution::Found(index) => index,
            DefaultResolution::Unset | DefaultResolution::NotFound => 0,
        }
    }
}

/// Mutable state of one prompt session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub mode: Mode,
    /// Search keyword, only meaningful in [`Mode::Search`]
    pub keyword: String,
    /// Real index into the effective list
    pub selected: usize,
    /// Set while searching and the keyword matches nothing
    pub invalid_selection: bool,
    /// Cleared by the first paint
    pub first_render: bool,
    pub status: Status,
}

impl PromptState {
    fn new(selected: usize) -> Self {
        Self {
            mode: Mode::Normal,
            keyword: String::new(),
            selected,
            invalid_selection: false,
            first_render: true,
            status: Status::Pending,
        }
    }
}

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// State changed, repaint
    Render,
    /// Nothing changed
    Ignored,
    /// The user submitted this entry. Repaint, then finish the prompt.
    Answered(ChoiceItem),
    /// The user submitted while the keyword matched nothing
    NoMatch { keyword: String },
    /// The user pressed Ctrl-C
    Interrupted,
}

/// State machine driving a list prompt.
#[derive(Debug, Clone)]
pub struct ListMachine {
    choices: ChoiceList,
    search_key: char,
    state: PromptState,
    /// Filtered view while in search mode
    search: Option<FilterOutcome>,
    search_used: bool,
    answer: Option<ChoiceItem>,
    finished: bool,
}

impl ListMachine {
    /// Create a machine over `choices`.
    ///
    /// A default that does not resolve is not an error: the prompt starts
    /// on the first entry and a warning is logged.
    pub fn new(
        choices: ChoiceList,
        default: Option<DefaultChoice>,
        search_key: char,
    ) -> Result<Self, ConfigError> {
        if choices.real_len() == 0 {
            return Err(ConfigError::NoSelectableChoices);
        }
        if search_key.is_control() {
            return Err(ConfigError::InvalidSearchKey(search_key));
        }

        let resolution = DefaultResolution::resolve(&choices, default.as_ref());
        if resolution == DefaultResolution::NotFound {
            log::warn!(
                "default {:?} does not match any choice, starting at the first entry",
                default
            );
        }

        Ok(Self {
            choices,
            search_key,
            state: PromptState::new(resolution.initial_index()),
            search: None,
            search_used: false,
            answer: None,
            finished: false,
        })
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// The full, unfiltered list
    pub fn choices(&self) -> &ChoiceList {
        &self.choices
    }

    pub fn search_key(&self) -> char {
        self.search_key
    }

    /// Filtered view, present while in search mode
    pub fn filtered(&self) -> Option<&FilteredView> {
        self.search.as_ref().map(|outcome| &outcome.view)
    }

    /// The list the selection currently indexes into.
    pub fn effective_list(&self) -> &ChoiceList {
        match &self.search {
            Some(outcome) => outcome.view.list(),
            None => &self.choices,
        }
    }

    /// Entry under the pointer, if the selection is valid.
    pub fn selected_item(&self) -> Option<&ChoiceItem> {
        if self.state.invalid_selection {
            return None;
        }
        self.effective_list().try_get(self.state.selected)
    }

    /// The submitted entry once the prompt is answered
    pub fn answer(&self) -> Option<&ChoiceItem> {
        self.answer.as_ref()
    }

    /// True once the session was answered, aborted or interrupted
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Record that the prompt has been painted at least once.
    pub fn mark_rendered(&mut self) {
        self.state.first_render = false;
    }

    /// Apply one classified event.
    pub fn handle(&mut self, event: ListEvent) -> Transition {
        if self.finished {
            return Transition::Ignored;
        }

        let transition = match event {
            ListEvent::Up { raw } => self.on_up(raw),
            ListEvent::Down { raw } => self.on_down(raw),
            ListEvent::Number(number) => self.on_number(number),
            ListEvent::SearchTrigger => self.on_search_trigger(),
            ListEvent::Keypress(input) => self.on_keypress(input),
            ListEvent::Line => self.on_submit(),
            ListEvent::Interrupt => {
                self.finished = true;
                Transition::Interrupted
            }
        };

        if transition != Transition::Ignored {
            log::debug!(
                "{:?} -> {:?} (mode {:?}, keyword {:?}, selected {})",
                event,
                transition,
                self.state.mode,
                self.state.keyword,
                self.state.selected
            );
        }
        transition
    }

    fn real_len(&self) -> usize {
        self.effective_list().real_len()
    }

    fn is_letter_binding_in_search(&self, raw: Option<char>, letter: char) -> bool {
        self.state.mode == Mode::Search && raw == Some(letter)
    }

    fn on_up(&mut self, raw: Option<char>) -> Transition {
        let len = self.real_len();
        if self.is_letter_binding_in_search(raw, 'k') || len == 0 {
            return Transition::Ignored;
        }
        self.state.selected = (self.state.selected + len - 1) % len;
        Transition::Render
    }

    fn on_down(&mut self, raw: Option<char>) -> Transition {
        let len = self.real_len();
        if self.is_letter_binding_in_search(raw, 'j') || len == 0 {
            return Transition::Ignored;
        }
        self.state.selected = (self.state.selected + 1) % len;
        Transition::Render
    }

    fn on_number(&mut self, number: usize) -> Transition {
        if number == 0 || number > self.real_len() {
            return Transition::Ignored;
        }
        self.state.selected = number - 1;
        Transition::Render
    }

    fn on_search_trigger(&mut self) -> Transition {
        if self.search_used {
            return Transition::Ignored;
        }
        self.search_used = true;
        self.state.mode = Mode::Search;
        self.refilter();
        Transition::Render
    }

    fn on_keypress(&mut self, input: KeyInput) -> Transition {
        if self.state.mode != Mode::Search {
            return Transition::Ignored;
        }
        match input {
            KeyInput::Erase => {
                if self.state.keyword.pop().is_none() {
                    return Transition::Ignored;
                }
            }
            KeyInput::Char(ch) if ch == self.search_key && self.state.keyword.is_empty() => {
                return Transition::Ignored;
            }
            KeyInput::Char(ch) => self.state.keyword.push(ch),
        }
        self.refilter();
        Transition::Render
    }

    fn on_submit(&mut self) -> Transition {
        self.finished = true;

        if self.state.invalid_selection {
            return Transition::NoMatch {
                keyword: self.state.keyword.clone(),
            };
        }

        let selected = self.state.selected;
        let source_index = match &self.search {
            Some(outcome) => outcome.view.source_index(selected).unwrap_or(selected),
            None => selected,
        };
        let item = self.choices.get(source_index).clone();

        self.search = None;
        self.state.mode = Mode::Normal;
        self.state.selected = source_index;
        self.state.status = Status::Answered;
        self.answer = Some(item.clone());
        Transition::Answered(item)
    }

    fn refilter(&mut self) {
        let outcome = apply_filter(&self.choices, &self.state.keyword);
        self.state.invalid_selection = !outcome.has_match();
        self.state.selected = outcome.selected.unwrap_or(0);
        self.search = Some(outcome);
    }
}
