use clap::Parser;
use std::path::PathBuf;

use listkit::Choice;

/// Positional argument that stands for a separator line
pub const SEPARATOR_ARG: &str = "---";

#[derive(Debug, Parser)]
#[command(name = "listkit-select")]
#[command(about = "Pick one entry from a searchable list and print its value")]
#[command(version)]
pub struct Cli {
    /// Question shown above the list
    #[arg(long, short)]
    pub message: Option<String>,

    /// Entry selected at start, by value or by zero-based index
    #[arg(long, short)]
    pub default: Option<String>,

    /// Number of list lines visible at once
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Key that starts an incremental search
    #[arg(long)]
    pub search_key: Option<char>,

    /// YAML file with the choices and prompt settings
    #[arg(long, short = 'f')]
    pub choices_file: Option<PathBuf>,

    /// Disable colored output (also set by the NO_COLOR environment variable)
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file instead of stderr (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Choices to pick from; `---` inserts a separator (pass choices after `--`
    /// when using it)
    pub choices: Vec<String>,
}

impl Cli {
    /// Positional choices, with separator markers turned into separators
    pub fn positional_choices(&self) -> Vec<Choice> {
        choices_from_args(&self.choices)
    }
}

pub fn choices_from_args(args: &[String]) -> Vec<Choice> {
    args.iter()
        .map(|arg| {
            if arg == SEPARATOR_ARG {
                Choice::separator()
            } else {
                Choice::plain(arg.as_str())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "listkit-select",
            "--message",
            "Pick a fruit",
            "--default",
            "banana",
            "--page-size",
            "5",
            "--search-key",
            "?",
            "--no-color",
            "apple",
            "banana",
        ])
        .unwrap();

        assert_eq!(cli.message.as_deref(), Some("Pick a fruit"));
        assert_eq!(cli.default.as_deref(), Some("banana"));
        assert_eq!(cli.page_size, Some(5));
        assert_eq!(cli.search_key, Some('?'));
        assert!(cli.no_color);
        assert_eq!(cli.choices, vec!["apple", "banana"]);
    }

    #[test]
    fn test_separator_marker() {
        let cli =
            Cli::try_parse_from(["listkit-select", "--", "apple", "---", "banana"]).unwrap();
        assert_eq!(
            cli.positional_choices(),
            vec![
                Choice::plain("apple"),
                Choice::separator(),
                Choice::plain("banana"),
            ]
        );
    }

    #[test]
    fn test_invalid_page_size_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["listkit-select", "--page-size", "many"]).is_err());
        assert!(Cli::try_parse_from(["listkit-select", "--search-key", "ab"]).is_err());
    }
}
