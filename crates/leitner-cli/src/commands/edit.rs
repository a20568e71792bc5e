//! The `leitner edit` command.

use anyhow::{Context, Result};

use leitner_core::{CardStore, CardUpdate};

pub fn execute(
    store: &mut CardStore,
    question: &str,
    new_question: Option<String>,
    answer: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let update = CardUpdate {
        question: new_question,
        answer,
        category,
        ..CardUpdate::default()
    };
    if update.is_empty() {
        anyhow::bail!("nothing to change: pass --question, --answer or --category");
    }

    let touched = store
        .update_card(question, &update)
        .with_context(|| format!("failed to edit '{question}'"))?;
    if touched == 0 {
        anyhow::bail!("no card with question '{question}'");
    }
    println!("Updated {touched} card(s)");
    Ok(())
}
