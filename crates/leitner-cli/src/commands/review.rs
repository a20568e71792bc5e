//! The `leitner review` command.
//!
//! Questions are printed to stdout, answers are read one per line from
//! stdin. End of input finishes the session early; cards not yet shown are
//! left alone.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use leitner_core::{BoxIndex, CardStore, ReviewResult, ReviewSession};

pub fn execute(store: &mut CardStore, box_index: i64, category: &str) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(store, box_index, category, stdin.lock(), stdout.lock())
}

fn run(
    store: &mut CardStore,
    box_index: i64,
    category: &str,
    mut input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    let box_index = BoxIndex::new(box_index)?;
    super::check_category_filter(store, category)?;
    let mut session = ReviewSession::new();
    let total = session
        .start(store, box_index, category)
        .context("failed to start review")?
        .len();

    if total == 0 {
        writeln!(out, "No cards in box {box_index} ({category}).")?;
        return Ok(());
    }
    writeln!(out, "Reviewing box {box_index} ({category}): {total} card(s)")?;

    let mut line = String::new();
    while let Some((answered, total)) = session.progress() {
        let Some(card) = session.current_card() else {
            break;
        };
        writeln!(out, "\n[{}/{total}] {}", answered + 1, card.question)?;
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            session.finish_early()?;
            break;
        }

        let outcome = session
            .submit(store, &line)
            .context("failed to record answer")?;
        if outcome.correct {
            writeln!(out, "Correct! Moved to box {}", outcome.card.box_index)?;
        } else {
            writeln!(
                out,
                "Incorrect. Expected: {} (moved to box {})",
                outcome.card.answer.trim(),
                outcome.card.box_index
            )?;
        }
    }

    print_report(&mut out, session.results())?;
    Ok(())
}

fn print_report(out: &mut impl Write, results: &[ReviewResult]) -> Result<()> {
    let correct = results.iter().filter(|r| r.correct).count();
    writeln!(out, "\nResults: {correct}/{} correct", results.len())?;
    for result in results {
        if result.correct {
            writeln!(out, "  ✔ {}", result.question)?;
        } else {
            writeln!(
                out,
                "  ✘ {} (expected: {})",
                result.question, result.expected_answer
            )?;
        }
    }
    Ok(())
}
