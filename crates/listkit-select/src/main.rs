use clap::Parser;
use listkit_select::{Cli, Result, SelectConfig, SelectError};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    match run(&cli) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            let code = e.exit_code();
            if !matches!(e, SelectError::PromptError(listkit::PromptError::Interrupted)) {
                eprintln!("Error: {e}");
            }
            tracing::debug!(code, "exiting after error");
            process::exit(code);
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = SelectConfig::load(cli)?;
    tracing::info!(
        choices = config.choices.len(),
        page_size = config.page_size,
        "starting prompt"
    );

    let answer = config.into_builder().build()?.run()?;
    tracing::info!(value = %answer.value, "answered");
    Ok(answer.value)
}

/// Logs stay off unless RUST_LOG asks for them, so nothing interleaves
/// with the prompt on the terminal.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
