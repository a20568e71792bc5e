//! The `leitner delete` command.

use anyhow::{Context, Result};

use leitner_core::CardStore;

pub fn execute(store: &mut CardStore, question: &str) -> Result<()> {
    let removed = store
        .delete_card(question)
        .with_context(|| format!("failed to delete '{question}'"))?;
    if removed == 0 {
        println!("No card with question '{question}'");
    } else {
        println!("Deleted {removed} card(s)");
    }
    Ok(())
}
