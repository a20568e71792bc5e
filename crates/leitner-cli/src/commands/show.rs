//! The `leitner show` command.

use anyhow::Result;

use leitner_core::scheduler::{format_remaining, is_due};
use leitner_core::CardStore;

pub fn execute(store: &CardStore, question: &str) -> Result<()> {
    let Some(card) = store.get_card_by_question(question) else {
        anyhow::bail!("no card with question '{question}'");
    };

    println!("Question: {}", card.question);
    println!("Answer:   {}", card.answer);
    println!("Box:      {}", card.box_index);
    println!("Category: {}", card.category.as_deref().unwrap_or("-"));

    match card.last_revision {
        Some(last) => {
            println!("Revised:  {}", last.format("%Y-%m-%d %H:%M"));
            let now = store.now();
            let check = is_due(last, card.box_index, now);
            if check.due {
                println!("Status:   due");
            } else {
                let remaining = format_remaining(check.next_revision - now);
                println!("Status:   next review in {remaining}");
            }
        }
        None => println!("Status:   due (never revised)"),
    }
    Ok(())
}
