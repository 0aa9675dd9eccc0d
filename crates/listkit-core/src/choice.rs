//! Choices and choice lists.
//!
//! A list mixes selectable entries with separators. Everything that counts
//! or indexes choices (wraparound, number keys, defaults) works on the
//! *real* index, which skips separators.

use std::fmt;

/// Line drawn by a separator created without its own text.
pub const DEFAULT_SEPARATOR: &str = "──────────────";

/// A selectable entry: what the user sees and what the prompt resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    pub name: String,
    pub value: String,
}

impl ChoiceItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One entry of a [`ChoiceList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Item(ChoiceItem),
    /// Inert divider line, never selectable
    Separator(String),
}

impl Choice {
    /// A choice whose name and value are the same string.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Choice::Item(ChoiceItem::new(text.clone(), text))
    }

    pub fn item(name: impl Into<String>, value: impl Into<String>) -> Self {
        Choice::Item(ChoiceItem::new(name, value))
    }

    pub fn separator() -> Self {
        Choice::Separator(DEFAULT_SEPARATOR.to_string())
    }

    pub fn separator_with(line: impl Into<String>) -> Self {
        Choice::Separator(line.into())
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Choice::Separator(_))
    }

    pub fn as_item(&self) -> Option<&ChoiceItem> {
        match self {
            Choice::Item(item) => Some(item),
            Choice::Separator(_) => None,
        }
    }
}

impl From<&str> for Choice {
    fn from(text: &str) -> Self {
        Choice::plain(text)
    }
}

impl From<String> for Choice {
    fn from(text: String) -> Self {
        Choice::plain(text)
    }
}

impl From<ChoiceItem> for Choice {
    fn from(item: ChoiceItem) -> Self {
        Choice::Item(item)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Item(item) => f.write_str(&item.name),
            Choice::Separator(line) => f.write_str(line),
        }
    }
}

/// Ordered sequence of choices and separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceList {
    choices: Vec<Choice>,
    real_len: usize,
}

impl ChoiceList {
    pub fn new(choices: Vec<Choice>) -> Self {
        let real_len = choices.iter().filter(|c| !c.is_separator()).count();
        Self { choices, real_len }
    }

    /// Number of selectable entries.
    pub fn real_len(&self) -> usize {
        self.real_len
    }

    /// Number of entries including separators.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// All entries, separators included, in list order.
    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }

    /// Selectable entries in order; the n-th item has real index n.
    pub fn items(&self) -> impl Iterator<Item = &ChoiceItem> {
        self.choices.iter().filter_map(Choice::as_item)
    }

    /// The selectable entry at real index `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.real_len()`. Callers keep their selection
    /// in range, so hitting this is a bug rather than user error.
    pub fn get(&self, index: usize) -> &ChoiceItem {
        match self.try_get(index) {
            Some(item) => item,
            None => panic!(
                "choice index {index} out of range (real length {})",
                self.real_len
            ),
        }
    }

    pub fn try_get(&self, index: usize) -> Option<&ChoiceItem> {
        self.items().nth(index)
    }

    /// Real index of the first entry whose value equals `value`.
    pub fn index_of_value(&self, value: &str) -> Option<usize> {
        self.items().position(|item| item.value == value)
    }

    /// New list holding the selectable entries that satisfy `predicate`.
    /// Separators are always dropped.
    pub fn filter<P>(&self, mut predicate: P) -> ChoiceList
    where
        P: FnMut(&ChoiceItem) -> bool,
    {
        let kept = self
            .items()
            .filter(|item| predicate(item))
            .cloned()
            .map(Choice::Item)
            .collect();
        ChoiceList::new(kept)
    }

    /// List position of every selectable entry, indexed by real index.
    pub fn selectable_positions(&self) -> Vec<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, choice)| !choice.is_separator())
            .map(|(position, _)| position)
            .collect()
    }
}

impl<C: Into<Choice>> FromIterator<C> for ChoiceList {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        ChoiceList::new(iter.into_iter().map(Into::into).collect())
    }
}
