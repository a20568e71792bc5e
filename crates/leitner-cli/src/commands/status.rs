//! The `leitner status` command.

use anyhow::{Context, Result};

use leitner_core::scheduler::box_overview;
use leitner_core::CardStore;

pub fn execute(store: &mut CardStore, category: &str) -> Result<()> {
    super::check_category_filter(store, category)?;
    let overview = box_overview(store, category).context("failed to read boxes")?;

    println!("Boxes ({category}):");
    for (box_index, status) in overview {
        println!("  Box {box_index}: {status}");
    }
    Ok(())
}
