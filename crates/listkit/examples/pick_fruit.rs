//! Pick one entry from a list on the real terminal.
//!
//! Use the arrow keys or j/k to move, 1-9 to jump, `/` to search and Enter
//! to submit. The chosen value is printed on stdout.
//!
//! Run with: cargo run --example pick_fruit

use listkit::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let prompt = ListPrompt::builder()
        .with_message("Which fruit do you want?")
        .with_choices(vec![
            Choice::plain("apple"),
            Choice::plain("banana"),
            Choice::plain("cherry"),
            Choice::separator(),
            Choice::item("Dragon fruit (pitaya)", "dragonfruit"),
            Choice::plain("elderberry"),
            Choice::plain("fig"),
            Choice::plain("grape"),
            Choice::plain("honeydew"),
            Choice::plain("kiwi"),
        ])
        .with_default("cherry")
        .with_page_size(5)
        .build()?;

    match prompt.run() {
        Ok(answer) => println!("You picked {}", answer.value),
        Err(PromptError::Interrupted) => eprintln!("Cancelled"),
        Err(PromptError::NoMatchingEntry { keyword }) => {
            eprintln!("Nothing matches {keyword:?}");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
