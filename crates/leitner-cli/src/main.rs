//! leitner CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

const DEFAULT_LOG_DIRECTIVES: &str = "leitner=info,leitner_core=warn";

#[derive(Parser)]
#[command(name = "leitner", version, about = "Leitner-box flashcard trainer")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the card and category files (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter leitner.toml
    Init,

    /// Add a card to the first box
    Add {
        #[arg(long)]
        question: String,

        #[arg(long)]
        answer: String,

        #[arg(long)]
        category: Option<String>,
    },

    /// Show one card
    Show {
        /// Exact question text
        question: String,
    },

    /// Change the question, answer or category of every matching card
    Edit {
        /// Exact question text
        question: String,

        /// New question text
        #[arg(long = "question", id = "new_question")]
        new_question: Option<String>,

        #[arg(long)]
        answer: Option<String>,

        /// New category (empty to clear)
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete every card with this question
    Delete {
        /// Exact question text
        question: String,
    },

    /// Move every card with this question to another box
    Move {
        /// Exact question text
        question: String,

        /// Target box (0-4)
        #[arg(value_name = "BOX", allow_negative_numbers = true)]
        target: i64,
    },

    /// List cards
    List {
        /// Only cards in this box (0-4)
        #[arg(long = "box", allow_negative_numbers = true)]
        box_index: Option<i64>,

        /// Only cards in this category ("All" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive keyword matched against question and answer
        #[arg(long)]
        search: Option<String>,
    },

    /// List registered categories
    Categories,

    /// Register a category
    AddCategory {
        name: String,
    },

    /// Show whether each box is due
    Status {
        #[arg(long, default_value = leitner_core::ALL_CATEGORIES)]
        category: String,
    },

    /// Review a box, one answer per line on stdin
    Review {
        /// Box to review (0-4)
        #[arg(long = "box", allow_negative_numbers = true)]
        box_index: i64,

        #[arg(long, default_value = leitner_core::ALL_CATEGORIES)]
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_DIRECTIVES)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Init = cli.command {
        return commands::init::execute();
    }

    let mut config = config::load_config_from(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!("using cards file {}", config.cards_path().display());
    let mut store = config.open_store();

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Add {
            question,
            answer,
            category,
        } => commands::add::execute(&mut store, &question, &answer, category.as_deref()),
        Commands::Show { question } => commands::show::execute(&store, &question),
        Commands::Edit {
            question,
            new_question,
            answer,
            category,
        } => commands::edit::execute(&mut store, &question, new_question, answer, category),
        Commands::Delete { question } => commands::delete::execute(&mut store, &question),
        Commands::Move { question, target } => {
            commands::move_card::execute(&mut store, &question, target)
        }
        Commands::List {
            box_index,
            category,
            search,
        } => commands::list::execute(&store, box_index, category.as_deref(), search.as_deref()),
        Commands::Categories => commands::categories::execute(&store),
        Commands::AddCategory { name } => commands::categories::add(&mut store, &name),
        Commands::Status { category } => commands::status::execute(&mut store, &category),
        Commands::Review {
            box_index,
            category,
        } => commands::review::execute(&mut store, box_index, &category),
    }
}
