//! Leitner review scheduling.
//!
//! Each box has a fixed review interval:
//!
//! | box | interval |
//! |-----|----------|
//! | 0   | 10 minutes |
//! | 1   | 1 day |
//! | 2   | 1 week |
//! | 3   | 4 weeks |
//! | 4   | 24 weeks |
//!
//! A correct answer moves a card one box up, a wrong one moves it one box
//! down; both saturate at the ends of the ladder.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::error::{LeitnerError, Result};
use crate::model::{BoxIndex, Card, CardUpdate};
use crate::session::ReviewResult;
use crate::store::CardStore;

pub use crate::model::parse_timestamp;

/// Review interval of a box.
pub fn interval(box_index: BoxIndex) -> Duration {
    match box_index.get() {
        0 => Duration::minutes(10),
        1 => Duration::days(1),
        2 => Duration::weeks(1),
        3 => Duration::weeks(4),
        _ => Duration::weeks(24),
    }
}

/// Outcome of a due check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueCheck {
    pub due: bool,
    pub next_revision: DateTime<Utc>,
}

/// Whether something last revised at `last_revision` in `box_index` is due
/// at `now`.
pub fn is_due(last_revision: DateTime<Utc>, box_index: BoxIndex, now: DateTime<Utc>) -> DueCheck {
    let next_revision = last_revision + interval(box_index);
    DueCheck {
        due: now >= next_revision,
        next_revision,
    }
}

/// [`is_due`] over unvalidated input: a raw box number and a timestamp string.
pub fn is_due_at(last_revision: &str, box_index: i64, now: DateTime<Utc>) -> Result<DueCheck> {
    let box_index = BoxIndex::new(box_index)?;
    let last_revision = parse_timestamp(last_revision)?;
    Ok(is_due(last_revision, box_index, now))
}

/// Readiness of a whole box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStatus {
    NoCards,
    Due,
    NextReviewIn(Duration),
}

impl fmt::Display for BoxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxStatus::NoCards => write!(f, "no cards to review"),
            BoxStatus::Due => write!(f, "due"),
            BoxStatus::NextReviewIn(remaining) => {
                write!(f, "next review in {}", format_remaining(*remaining))
            }
        }
    }
}

/// Status of `box_index` holding `cards`.
///
/// The box is due once its least recently revised card is due. A card
/// without a revision date counts as revised at `now`, the same date the box
/// queries give it.
pub fn box_status(cards: &[Card], box_index: BoxIndex, now: DateTime<Utc>) -> BoxStatus {
    let Some(earliest) = cards.iter().map(|c| c.last_revision.unwrap_or(now)).min() else {
        return BoxStatus::NoCards;
    };

    let check = is_due(earliest, box_index, now);
    if check.due {
        BoxStatus::Due
    } else {
        BoxStatus::NextReviewIn(check.next_revision - now)
    }
}

/// Status of every box for one category (`"All"` for every category).
pub fn box_overview(store: &mut CardStore, category: &str) -> Result<Vec<(BoxIndex, BoxStatus)>> {
    let now = store.now();
    BoxIndex::all()
        .map(|b| {
            let cards = store.get_cards_by_box_and_category(b, category)?;
            Ok((b, box_status(&cards, b, now)))
        })
        .collect()
}

/// Format a remaining duration as `1d 2h 3m`, `2h 3m` or `3m`.
///
/// Negative durations are shown as zero.
pub fn format_remaining(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    if hours >= 24 {
        format!("{}d {}h {}m", hours / 24, hours % 24, minutes)
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Exact, whitespace-trimmed, case-sensitive comparison.
pub fn grade(card: &Card, user_answer: &str) -> bool {
    user_answer.trim() == card.answer.trim()
}

/// One step up on success, one step down on failure.
pub fn next_box(current: BoxIndex, correct: bool) -> BoxIndex {
    if correct {
        current.promote()
    } else {
        current.demote()
    }
}

/// Result of answering one card.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub card: Card,
}

impl AnswerOutcome {
    pub fn to_result(&self) -> ReviewResult {
        ReviewResult {
            question: self.card.question.clone(),
            correct: self.correct,
            expected_answer: self.card.answer.trim().to_string(),
        }
    }
}

/// Grade `user_answer`, move the card one box and stamp its revision date.
///
/// If the card has been removed from the store in the meantime, the outcome
/// is still returned but nothing is persisted.
pub fn apply_answer(
    store: &mut CardStore,
    card: &Card,
    user_answer: &str,
) -> Result<AnswerOutcome> {
    let correct = grade(card, user_answer);
    let new_box = next_box(card.box_index, correct);
    let update = CardUpdate::default()
        .box_index(new_box)
        .last_revision(store.now());

    let card = match store.update_card_by_id(card.id, &update) {
        Ok(updated) => updated,
        Err(LeitnerError::NotFound(_)) => {
            tracing::warn!("answered card '{}' is no longer stored", card.question);
            let mut detached = card.clone();
            update.apply(&mut detached);
            detached
        }
        Err(e) => return Err(e),
    };

    tracing::debug!(
        "'{}' answered {}, now in box {}",
        card.question,
        if correct { "correctly" } else { "incorrectly" },
        card.box_index
    );
    Ok(AnswerOutcome { correct, card })
}
