//! Composition of the full prompt message from the machine state.

use crate::filter::NO_MATCH_MESSAGE;
use crate::machine::{ListMachine, Mode, Status};
use crate::paginator::Paginator;
use crate::render::render_list;
use crate::style::Theme;

/// Builds the text painted on every state change.
///
/// The view keeps the paginator, whose scroll position carries over from
/// one paint to the next; everything else is read from the machine.
#[derive(Debug, Clone)]
pub struct ListView {
    message: String,
    page_size: usize,
    theme: Theme,
    paginator: Paginator,
}

impl ListView {
    pub fn new(message: impl Into<String>, page_size: usize, theme: Theme) -> Self {
        let paginator = Paginator::with_hint_style(theme.hint.clone());
        Self {
            message: message.into(),
            page_size,
            theme,
            paginator,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// `? <message>` with the prompt styles applied.
    pub fn question(&self) -> String {
        format!(
            "{} {}",
            self.theme.prefix.paint("?"),
            self.theme.message.paint(&self.message)
        )
    }

    /// Compose the message for the current state and clear the machine's
    /// first-render flag.
    pub fn render(&mut self, machine: &mut ListMachine) -> String {
        let message = self.compose(machine);
        machine.mark_rendered();
        message
    }

    fn compose(&mut self, machine: &ListMachine) -> String {
        let state = machine.state();
        let mut header = self.question();

        if state.status == Status::Answered {
            if let Some(answer) = machine.answer() {
                header.push('\n');
                header.push_str(&self.theme.answer.paint(&answer.name));
            }
            return header;
        }

        if state.mode == Mode::Search {
            header.push(' ');
            header.push_str(
                &self
                    .theme
                    .hint
                    .paint(&format!("(Searching: {} )", state.keyword)),
            );
        }

        if state.first_render {
            header.push(' ');
            header.push_str(&self.theme.hint.paint(&format!(
                "(Use arrow keys, {} to search)",
                machine.search_key()
            )));
        }

        if state.mode == Mode::Search && state.invalid_selection {
            return format!("{header}\n{NO_MATCH_MESSAGE}");
        }

        let list = machine.effective_list();
        let block = render_list(list, state.selected, &self.theme);
        let active_line = list
            .selectable_positions()
            .get(state.selected)
            .copied()
            .unwrap_or(0);
        format!(
            "{header}\n{}",
            self.paginator.paginate(&block, active_line, self.page_size)
        )
    }
}
