use serde::{Deserialize, Serialize};
use std::path::Path;

use listkit::{Choice, DefaultChoice, ListPrompt, ListPromptBuilder, Theme};
use listkit::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_KEY};

use crate::cli::Cli;
use crate::error::{ConfigError, Result};

pub const DEFAULT_MESSAGE: &str = "Pick one";

/// Contents of a `--choices-file`.
///
/// ```yaml
/// message: Pick a fruit
/// default: banana
/// page_size: 5
/// search_key: "?"
/// choices:
///   - apple
///   - separator: "-- tropical --"
///   - name: Banana (ripe)
///     value: banana
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChoicesFile {
    pub message: Option<String>,
    pub default: Option<DefaultSpec>,
    pub page_size: Option<usize>,
    pub search_key: Option<char>,
    #[serde(default)]
    pub choices: Vec<ChoiceSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DefaultSpec {
    Index(usize),
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ChoiceSpec {
    Plain(String),
    Item(ItemSpec),
    Separator(SeparatorSpec),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    pub name: String,
    /// Falls back to the name
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeparatorSpec {
    /// Empty or null draws the default line
    pub separator: Option<String>,
}

impl From<ChoiceSpec> for Choice {
    fn from(spec: ChoiceSpec) -> Self {
        match spec {
            ChoiceSpec::Plain(text) => Choice::plain(text),
            ChoiceSpec::Item(ItemSpec { name, value }) => {
                let value = value.unwrap_or_else(|| name.clone());
                Choice::item(name, value)
            }
            ChoiceSpec::Separator(SeparatorSpec { separator }) => match separator {
                Some(line) if !line.is_empty() => Choice::separator_with(line),
                _ => Choice::separator(),
            },
        }
    }
}

impl ChoicesFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::ChoicesFileNotFound(path.as_ref().to_path_buf()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Settings for one run, after merging the choices file with the flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectConfig {
    pub message: String,
    pub default: Option<DefaultSpec>,
    pub page_size: usize,
    pub search_key: char,
    pub choices: Vec<Choice>,
    pub color: bool,
}

impl SelectConfig {
    /// Read the choices file named by `cli` (if any), apply the flags on
    /// top and validate the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.choices_file {
            Some(path) => ChoicesFile::from_file(path)?,
            None => ChoicesFile::default(),
        };
        let no_color = cli.no_color || no_color_requested();

        let config = Self::merge(file, cli, no_color);
        config.validate()?;
        Ok(config)
    }

    /// Flags win over file values. Positional choices replace the file's.
    pub fn merge(file: ChoicesFile, cli: &Cli, no_color: bool) -> Self {
        let choices = if cli.choices.is_empty() {
            file.choices.into_iter().map(Choice::from).collect()
        } else {
            cli.positional_choices()
        };

        Self {
            message: cli
                .message
                .clone()
                .or(file.message)
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            default: cli
                .default
                .clone()
                .map(DefaultSpec::Value)
                .or(file.default),
            page_size: cli.page_size.or(file.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
            search_key: cli
                .search_key
                .or(file.search_key)
                .unwrap_or(DEFAULT_SEARCH_KEY),
            choices,
            color: !no_color,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.choices.is_empty() {
            return Err(ConfigError::NoChoices.into());
        }
        if self.choices.iter().all(Choice::is_separator) {
            return Err(ConfigError::NoSelectableChoices.into());
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize.into());
        }
        if self.search_key.is_control() {
            return Err(ConfigError::InvalidSearchKey(self.search_key).into());
        }
        Ok(())
    }

    /// String defaults are resolved by the prompt: a value first, then a
    /// zero-based index.
    pub fn default_choice(&self) -> Option<DefaultChoice> {
        self.default.as_ref().map(|spec| match spec {
            DefaultSpec::Index(index) => DefaultChoice::Index(*index),
            DefaultSpec::Value(value) => DefaultChoice::Value(value.clone()),
        })
    }

    pub fn theme(&self) -> Theme {
        if self.color {
            Theme::default()
        } else {
            Theme::plain()
        }
    }

    pub fn into_builder(self) -> ListPromptBuilder {
        let default = self.default_choice();
        let theme = self.theme();

        let builder = ListPrompt::builder()
            .with_message(self.message)
            .with_choices(self.choices)
            .with_page_size(self.page_size)
            .with_search_key(self.search_key)
            .with_theme(theme);

        match default {
            Some(default) => builder.with_default(default),
            None => builder,
        }
    }
}

fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["listkit-select"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_choices_file() {
        let yaml_content = r#"
message: Pick a fruit
default: 2
page_size: 5
search_key: "?"
choices:
  - apple
  - separator: "-- tropical --"
  - name: Banana (ripe)
    value: banana
  - name: cherry
  - separator:
"#;

        let file = ChoicesFile::parse(yaml_content).unwrap();
        assert_eq!(file.message.as_deref(), Some("Pick a fruit"));
        assert_eq!(file.default, Some(DefaultSpec::Index(2)));
        assert_eq!(file.page_size, Some(5));
        assert_eq!(file.search_key, Some('?'));

        let choices: Vec<Choice> = file.choices.into_iter().map(Choice::from).collect();
        assert_eq!(
            choices,
            vec![
                Choice::plain("apple"),
                Choice::separator_with("-- tropical --"),
                Choice::item("Banana (ripe)", "banana"),
                Choice::item("cherry", "cherry"),
                Choice::separator(),
            ]
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ChoicesFile::parse("colour: red\nchoices: [a]\n").is_err());
        assert!(ChoicesFile::parse("choices:\n  - name: a\n    label: b\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "choices:\n  - apple\n  - banana").unwrap();

        let file = ChoicesFile::from_file(temp_file.path()).unwrap();
        assert_eq!(file.choices.len(), 2);

        let missing = ChoicesFile::from_file("/nonexistent/choices.yaml");
        assert!(matches!(
            missing,
            Err(crate::SelectError::ConfigError(ConfigError::ChoicesFileNotFound(_)))
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let file = ChoicesFile::parse(
            "message: From file\npage_size: 3\ndefault: apple\nchoices: [apple, banana]\n",
        )
        .unwrap();
        let config = SelectConfig::merge(
            file,
            &cli(&["--message", "From flags", "--default", "banana"]),
            false,
        );

        assert_eq!(config.message, "From flags");
        assert_eq!(config.page_size, 3);
        assert_eq!(config.default, Some(DefaultSpec::Value("banana".to_string())));
        assert_eq!(config.choices.len(), 2);
        assert!(config.color);
    }

    #[test]
    fn test_positional_choices_replace_file_choices() {
        let file = ChoicesFile::parse("choices: [apple, banana]\n").unwrap();
        let config = SelectConfig::merge(file, &cli(&["kiwi"]), true);

        assert_eq!(config.choices, vec![Choice::plain("kiwi")]);
        assert_eq!(config.message, DEFAULT_MESSAGE);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.search_key, DEFAULT_SEARCH_KEY);
        assert_eq!(config.theme(), Theme::plain());
    }

    #[test]
    fn test_validate() {
        let base = SelectConfig::merge(ChoicesFile::default(), &cli(&["apple"]), true);
        assert!(base.validate().is_ok());

        let empty = SelectConfig::merge(ChoicesFile::default(), &cli(&[]), true);
        assert!(matches!(
            empty.validate(),
            Err(crate::SelectError::ConfigError(ConfigError::NoChoices))
        ));

        let only_separators = SelectConfig {
            choices: vec![Choice::separator()],
            ..base.clone()
        };
        assert!(matches!(
            only_separators.validate(),
            Err(crate::SelectError::ConfigError(ConfigError::NoSelectableChoices))
        ));

        let zero_page = SelectConfig {
            page_size: 0,
            ..base.clone()
        };
        assert!(matches!(
            zero_page.validate(),
            Err(crate::SelectError::ConfigError(ConfigError::InvalidPageSize))
        ));

        let tab_key = SelectConfig {
            search_key: '\t',
            ..base
        };
        assert!(matches!(
            tab_key.validate(),
            Err(crate::SelectError::ConfigError(ConfigError::InvalidSearchKey('\t')))
        ));
    }

    fn initial_index(args: &[&str]) -> usize {
        SelectConfig::merge(ChoicesFile::default(), &cli(args), true)
            .into_builder()
            .with_console_input(Box::new(listkit::MockConsoleInput::new()))
            .with_console_output(Box::new(listkit::MockConsoleOutput::new()))
            .build()
            .unwrap()
            .initial_index()
    }

    #[test]
    fn test_default_resolution() {
        assert_eq!(initial_index(&["--default", "1", "apple", "banana", "cherry"]), 1);
        assert_eq!(initial_index(&["--default", "banana", "apple", "banana"]), 1);
        // A value that looks like an index still wins when a choice has it
        assert_eq!(initial_index(&["--default", "2024", "2023", "2024"]), 1);
        assert_eq!(initial_index(&["--default", "durian", "apple", "banana"]), 0);
        assert_eq!(initial_index(&["apple", "banana"]), 0);

        let file = ChoicesFile::parse("default: 2
choices: [a, b, c]
").unwrap();
        let config = SelectConfig::merge(file, &cli(&[]), true);
        assert_eq!(config.default_choice(), Some(DefaultChoice::Index(2)));
    }

    #[test]
    fn test_into_builder() {
        let config = SelectConfig::merge(
            ChoicesFile::default(),
            &cli(&["--default", "cherry", "apple", "banana", "cherry"]),
            true,
        );
        let prompt = config
            .into_builder()
            .with_console_input(Box::new(listkit::MockConsoleInput::new()))
            .with_console_output(Box::new(listkit::MockConsoleOutput::new()))
            .build()
            .unwrap();
        assert_eq!(prompt.initial_index(), 2);
    }
}
