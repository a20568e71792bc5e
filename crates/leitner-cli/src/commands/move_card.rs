//! The `leitner move` command.

use anyhow::{Context, Result};

use leitner_core::CardStore;

pub fn execute(store: &mut CardStore, question: &str, target: i64) -> Result<()> {
    let moved = store
        .move_card(question, target)
        .with_context(|| format!("failed to move '{question}'"))?;
    if moved == 0 {
        anyhow::bail!("no card with question '{question}'");
    }
    println!("Moved {moved} card(s) to box {target}");
    Ok(())
}
