//! The `leitner init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("leitner.toml").exists() {
        println!("leitner.toml already exists, skipping.");
    } else {
        std::fs::write("leitner.toml", SAMPLE_CONFIG)?;
        println!("Created leitner.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit data_dir in leitner.toml if the cards should live elsewhere");
    println!("  2. Run: leitner add --question \"list files\" --answer ls --category linux");
    println!("  3. Run: leitner review --box 0");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# leitner configuration

# Directory holding the card and category files. ${VAR} references are
# expanded; LEITNER_DATA_DIR and --data-dir take precedence.
data_dir = "."

cards_file = "leitner_cards.json"
categories_file = "categories.json"
"#;
