//! The `leitner add` command.

use anyhow::{Context, Result};

use leitner_core::CardStore;

pub fn execute(
    store: &mut CardStore,
    question: &str,
    answer: &str,
    category: Option<&str>,
) -> Result<()> {
    let card = store
        .add_card(question, answer, category)
        .context("failed to add card")?;

    match &card.category {
        Some(category) => println!(
            "Added '{}' to box {} ({category})",
            card.question, card.box_index
        ),
        None => println!("Added '{}' to box {}", card.question, card.box_index),
    }
    Ok(())
}
