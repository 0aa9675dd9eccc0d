pub mod cli;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::{ChoicesFile, SelectConfig};
pub use error::{ConfigError, Result, SelectError};
