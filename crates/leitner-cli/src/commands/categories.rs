//! The `leitner categories` and `leitner add-category` commands.

use anyhow::{Context, Result};

use leitner_core::CardStore;

pub fn execute(store: &CardStore) -> Result<()> {
    let categories = store.get_all_categories();
    if categories.is_empty() {
        println!("No categories. Run `leitner add-category <name>` to create one.");
        return Ok(());
    }
    for name in categories {
        println!("{name}");
    }
    Ok(())
}

pub fn add(store: &mut CardStore, name: &str) -> Result<()> {
    let created = store
        .add_category(name)
        .with_context(|| format!("failed to add category '{name}'"))?;
    if created {
        println!("Added category '{}'", name.trim());
    } else {
        println!("Category '{}' already exists", name.trim());
    }
    Ok(())
}
