//! Incremental substring search over a choice list.
//!
//! Filtering never touches the source list: it derives a new
//! [`FilteredView`] that remembers where each kept entry came from.

use crate::choice::{ChoiceItem, ChoiceList};

/// Block shown in place of the list when nothing matches the keyword.
pub const NO_MATCH_MESSAGE: &str = "NO ENTRY MATCHING";

/// Entries of a source list whose value contains a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    list: ChoiceList,
    /// `source_indices[i]` is the real index in the source list of the
    /// filtered entry with real index `i`.
    source_indices: Vec<usize>,
}

impl FilteredView {
    pub fn list(&self) -> &ChoiceList {
        &self.list
    }

    pub fn is_empty(&self) -> bool {
        self.source_indices.is_empty()
    }

    pub fn real_len(&self) -> usize {
        self.source_indices.len()
    }

    /// Real index in the source list of filtered entry `index`.
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.source_indices.get(index).copied()
    }

    pub fn get(&self, index: usize) -> Option<&ChoiceItem> {
        self.list.try_get(index)
    }
}

/// Result of applying a keyword to a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub view: FilteredView,
    /// Selection inside the view: the first match, or `None` when the
    /// keyword matches nothing.
    pub selected: Option<usize>,
}

impl FilterOutcome {
    pub fn has_match(&self) -> bool {
        self.selected.is_some()
    }
}

/// Keep the entries whose value contains `keyword`.
///
/// Matching is case-sensitive literal containment. The empty keyword keeps
/// every selectable entry.
pub fn apply_filter(full: &ChoiceList, keyword: &str) -> FilterOutcome {
    let source_indices: Vec<usize> = full
        .items()
        .enumerate()
        .filter(|(_, item)| item.value.contains(keyword))
        .map(|(index, _)| index)
        .collect();
    let list = full.filter(|item| item.value.contains(keyword));
    let selected = if source_indices.is_empty() { None } else { Some(0) };

    log::debug!(
        "keyword {:?} matched {} of {} choices",
        keyword,
        source_indices.len(),
        full.real_len()
    );

    FilterOutcome {
        view: FilteredView {
            list,
            source_indices,
        },
        selected,
    }
}
