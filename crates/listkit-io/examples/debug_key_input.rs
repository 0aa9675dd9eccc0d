//! Key input debug tool
//!
//! Prints every key event read from the terminal together with the list
//! events it turns into, which is handy when a terminal sends unusual
//! sequences for the arrow keys.
//!
//! Usage: cargo run -p listkit-io --example debug_key_input
//! Press Ctrl+C to exit.

use listkit_core::{classify, Key, KeyEvent, DEFAULT_SEARCH_KEY};
use listkit_io::{ConsoleError, ConsoleInput};
use std::io::{self, Write};

/// Format raw bytes for display
fn format_bytes(bytes: &[u8]) -> String {
    let hex: String = bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");

    let ascii: String = bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect();

    format!("[{hex}] \"{ascii}\"")
}

fn display_key_event(event: &KeyEvent) {
    let events = classify(event, DEFAULT_SEARCH_KEY);

    // Raw mode needs explicit carriage returns
    print!(
        "Key: {:?} | Raw: {} | Text: {:?} | List events: {:?}\r\n",
        event.key,
        format_bytes(&event.raw_bytes),
        event.text,
        events
    );
    let _ = io::stdout().flush();
}

fn read_loop(input: &dyn ConsoleInput) -> Result<(), ConsoleError> {
    let _raw_guard = input.enable_raw_mode()?;

    match input.get_window_size() {
        Ok((cols, rows)) => print!("[window size] cols={cols}, rows={rows}\r\n"),
        Err(e) => print!("[window size] error: {e}\r\n"),
    }
    print!("Ready for input...\r\n");
    let _ = io::stdout().flush();

    loop {
        // Short timeout so a lone Escape shows up promptly
        match input.read_key_timeout(Some(50))? {
            Some(key_event) => {
                display_key_event(&key_event);
                if key_event.key == Key::ControlC {
                    print!("Received Ctrl+C, shutting down...\r\n");
                    return Ok(());
                }
            }
            None => continue,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Key Input Debug Tool");
    println!("Press keys to see their events. Press Ctrl+C to exit.");
    println!();

    let input = listkit_io::create_console_input()?;
    if let Err(e) = read_loop(input.as_ref()) {
        print!("Input error: {e}\r\n");
    }

    print!("Done. Goodbye!\r\n");
    io::stdout().flush()?;
    Ok(())
}
