//! Rendering a choice list into a text block.

use crate::choice::{Choice, ChoiceList};
use crate::style::Theme;

/// Render `list` with the pointer on the entry at real index `selected`.
///
/// Separators are drawn dim and indented like unselected entries. The
/// block has one line per entry and no trailing newline. The output only
/// depends on the arguments, so equal inputs give byte-identical blocks.
pub fn render_list(list: &ChoiceList, selected: usize, theme: &Theme) -> String {
    let selected_position = list.selectable_positions().get(selected).copied();

    let lines: Vec<String> = list
        .iter()
        .enumerate()
        .map(|(position, choice)| match choice {
            Choice::Separator(line) => format!("  {}", theme.hint.paint(line)),
            Choice::Item(item) if Some(position) == selected_position => {
                theme.highlight.paint(&format!("{} {}", theme.pointer, item.name))
            }
            Choice::Item(item) => format!("  {}", item.name),
        })
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextStyle;

    fn fruit() -> ChoiceList {
        ChoiceList::new(vec![
            Choice::plain("apple"),
            Choice::separator_with("--"),
            Choice::item("Banana", "banana"),
            Choice::plain("cherry"),
        ])
    }

    #[test]
    fn test_pointer_on_selected_entry() {
        let block = render_list(&fruit(), 1, &Theme::plain());
        assert_eq!(block, "  apple\n  --\n❯ Banana\n  cherry");
    }

    #[test]
    fn test_separator_offsets_are_skipped() {
        let block = render_list(&fruit(), 2, &Theme::plain());
        assert_eq!(block.lines().last(), Some("❯ cherry"));
        assert_eq!(block.matches('❯').count(), 1);
    }

    #[test]
    fn test_out_of_range_selection_draws_no_pointer() {
        let block = render_list(&fruit(), 7, &Theme::plain());
        assert!(!block.contains('❯'));
        assert_eq!(block.lines().count(), 4);
    }

    #[test]
    fn test_render_is_pure() {
        let list = fruit();
        let theme = Theme::default();
        assert_eq!(render_list(&list, 0, &theme), render_list(&list, 0, &theme));
    }

    #[test]
    fn test_highlight_style_wraps_pointer_and_name() {
        let block = render_list(&fruit(), 0, &Theme::default());
        let first = block.lines().next().unwrap();
        assert_eq!(first, TextStyle::fg(crate::style::Color::Cyan).paint("❯ apple"));
        assert!(block.contains("  \x1b[2m--\x1b[0m"));
    }

    #[test]
    fn test_empty_list_renders_empty_block() {
        assert_eq!(render_list(&ChoiceList::default(), 0, &Theme::plain()), "");
    }
}
