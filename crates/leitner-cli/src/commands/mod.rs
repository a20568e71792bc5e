pub mod add;
pub mod categories;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod move_card;
pub mod review;
pub mod show;
pub mod status;

use anyhow::Result;

use leitner_core::CardStore;

/// Reject a `--category` filter that is neither `All` nor registered.
pub fn check_category_filter(store: &CardStore, category: &str) -> Result<()> {
    let choices = store.category_choices();
    if !choices.iter().any(|c| c == category) {
        anyhow::bail!(
            "unknown category '{category}' (choose from: {})",
            choices.join(", ")
        );
    }
    Ok(())
}
