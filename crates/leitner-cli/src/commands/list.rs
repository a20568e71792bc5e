//! The `leitner list` command.

use anyhow::Result;

use leitner_core::{BoxIndex, Card, CardStore, ALL_CATEGORIES};

pub fn execute(
    store: &CardStore,
    box_index: Option<i64>,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let category = category.unwrap_or(ALL_CATEGORIES);
    super::check_category_filter(store, category)?;
    let box_index = box_index.map(BoxIndex::new).transpose()?;

    let mut cards = store.search_cards(search.unwrap_or(""), Some(category));
    if let Some(box_index) = box_index {
        cards.retain(|c| c.box_index == box_index);
    }

    if cards.is_empty() {
        println!("No cards.");
        return Ok(());
    }

    println!("{}", render_table(&cards));
    println!("{} card(s)", cards.len());
    Ok(())
}

fn render_table(cards: &[Card]) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Box", "Question", "Answer", "Category", "Next review"]);

    for card in cards {
        table.add_row(vec![
            Cell::new(card.box_index),
            Cell::new(&card.question),
            Cell::new(&card.answer),
            Cell::new(card.category.as_deref().unwrap_or("-")),
            Cell::new(
                card.due_at()
                    .map(|due| due.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "now".to_string()),
            ),
        ]);
    }
    table
}
