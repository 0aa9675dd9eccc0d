//! Windowing of long rendered lists.

use crate::style::TextStyle;

/// Lines shown at once when no page size is configured
pub const DEFAULT_PAGE_SIZE: usize = 7;

/// Hint appended below a clipped list
pub const MORE_CHOICES_HINT: &str = "(Move up and down to reveal more choices)";

/// Row the active line settles on while scrolling down
const POINTER_ROW_LIMIT: usize = 3;

/// Jumps larger than this (number keys, wraparound) do not move the pointer row
const POINTER_STEP_LIMIT: usize = 9;

/// Clips a rendered block to a window around the active line.
///
/// The block is treated as an endless loop: the window is cut from the
/// block repeated three times, so scrolling past either end wraps around
/// the way the selection does. The paginator remembers where the active
/// line sat in the previous window, which keeps the view steady while the
/// user moves one line at a time.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    pointer: usize,
    last_index: usize,
    hint_style: TextStyle,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paginator drawing its hint line with `style`.
    pub fn with_hint_style(hint_style: TextStyle) -> Self {
        Self {
            hint_style,
            ..Self::default()
        }
    }

    /// Window `block` around line `active`.
    ///
    /// Blocks of at most `page_size + 2` lines are returned unchanged.
    pub fn paginate(&mut self, block: &str, active: usize, page_size: usize) -> String {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() <= page_size + 2 {
            return block.to_string();
        }

        if self.pointer < POINTER_ROW_LIMIT
            && self.last_index < active
            && active - self.last_index < POINTER_STEP_LIMIT
        {
            self.pointer = POINTER_ROW_LIMIT.min(self.pointer + active - self.last_index);
        }
        self.last_index = active;

        let top = (active + lines.len()).saturating_sub(self.pointer);
        let window: Vec<&str> = lines
            .iter()
            .cycle()
            .skip(top)
            .take(page_size)
            .copied()
            .collect();

        format!(
            "{}\n{}",
            window.join("\n"),
            self.hint_style.paint(MORE_CHOICES_HINT)
        )
    }
}
