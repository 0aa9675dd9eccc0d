//! Unicode width helpers for terminal layout.

use unicode_width::UnicodeWidthStr;

/// Get the display width of a string, accounting for wide characters.
///
/// # Examples
///
/// ```
/// use listkit_core::unicode::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("こんにちは"), 10);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Number of terminal rows a line of `width` columns occupies when the
/// terminal is `columns` wide. An empty line still takes one row.
pub fn rows_for_width(width: usize, columns: u16) -> usize {
    let columns = usize::from(columns.max(1));
    if width == 0 {
        1
    } else {
        width.div_ceil(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_rows_for_width() {
        assert_eq!(rows_for_width(0, 80), 1);
        assert_eq!(rows_for_width(80, 80), 1);
        assert_eq!(rows_for_width(81, 80), 2);
        assert_eq!(rows_for_width(5, 0), 5);
    }
}
