//! Review session state machine.
//!
//! ```text
//! SelectingBoxCategory --start--> InSession { index, total, results }
//! InSession --submit (index + 1 < total)--> InSession
//! InSession --submit (index + 1 == total) | finish_early--> SessionComplete
//! ```
//!
//! A session works on a snapshot of the selected cards taken at `start`.
//! Cards not answered before `finish_early` are left untouched in the store.

use serde::{Deserialize, Serialize};

use crate::error::{LeitnerError, Result};
use crate::model::{BoxIndex, Card};
use crate::scheduler::{apply_answer, AnswerOutcome};
use crate::store::CardStore;

/// One answered card, as reported at the end of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub question: String,
    pub correct: bool,
    pub expected_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    SelectingBoxCategory,
    InSession {
        index: usize,
        total: usize,
        results: Vec<ReviewResult>,
    },
    SessionComplete {
        results: Vec<ReviewResult>,
    },
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::SelectingBoxCategory => "selecting a box",
            SessionState::InSession { .. } => "in progress",
            SessionState::SessionComplete { .. } => "complete",
        }
    }
}

/// Drives one review of a box and category.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    state: SessionState,
    cards: Vec<Card>,
    box_index: Option<BoxIndex>,
    category: Option<String>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::SelectingBoxCategory,
            cards: Vec::new(),
            box_index: None,
            category: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn box_index(&self) -> Option<BoxIndex> {
        self.box_index
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Snapshot the cards of `box_index` in `category` and begin.
    ///
    /// Returns the snapshot. With no matching cards the session is complete
    /// straight away.
    pub fn start(
        &mut self,
        store: &mut CardStore,
        box_index: BoxIndex,
        category: &str,
    ) -> Result<&[Card]> {
        self.expect_selecting()?;
        let cards = store.get_cards_by_box_and_category(box_index, category)?;
        tracing::info!(
            "starting review of box {box_index} ({category}) with {} card(s)",
            cards.len()
        );

        self.state = if cards.is_empty() {
            SessionState::SessionComplete {
                results: Vec::new(),
            }
        } else {
            SessionState::InSession {
                index: 0,
                total: cards.len(),
                results: Vec::new(),
            }
        };
        self.cards = cards;
        self.box_index = Some(box_index);
        self.category = Some(category.to_string());
        Ok(&self.cards)
    }

    /// The card waiting for an answer, if a session is in progress.
    pub fn current_card(&self) -> Option<&Card> {
        match &self.state {
            SessionState::InSession { index, .. } => self.cards.get(*index),
            _ => None,
        }
    }

    /// `(answered, total)` while in progress.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match &self.state {
            SessionState::InSession { index, total, .. } => Some((*index, *total)),
            _ => None,
        }
    }

    /// Answer the current card and advance.
    pub fn submit(&mut self, store: &mut CardStore, answer: &str) -> Result<AnswerOutcome> {
        let (index, total) = match &self.state {
            SessionState::InSession { index, total, .. } => (*index, *total),
            other => {
                return Err(LeitnerError::InvalidSessionState {
                    expected: "in progress",
                    actual: other.name(),
                })
            }
        };

        let card = self
            .cards
            .get(index)
            .ok_or_else(|| LeitnerError::NotFound(format!("session card #{index}")))?;
        let outcome = apply_answer(store, card, answer)?;
        let answered = index + 1;

        self.state = match std::mem::replace(&mut self.state, SessionState::SelectingBoxCategory) {
            SessionState::InSession { mut results, .. } => {
                results.push(outcome.to_result());
                if answered == total {
                    tracing::info!(
                        "review complete: {}/{} correct",
                        results.iter().filter(|r| r.correct).count(),
                        results.len()
                    );
                    SessionState::SessionComplete { results }
                } else {
                    SessionState::InSession {
                        index: answered,
                        total,
                        results,
                    }
                }
            }
            other => other,
        };
        Ok(outcome)
    }

    /// Stop before every card has been answered.
    pub fn finish_early(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, SessionState::SelectingBoxCategory) {
            SessionState::InSession {
                index,
                total,
                results,
            } => {
                tracing::info!("review finished early after {index} of {total} card(s)");
                self.state = SessionState::SessionComplete { results };
                Ok(())
            }
            complete @ SessionState::SessionComplete { .. } => {
                self.state = complete;
                Ok(())
            }
            SessionState::SelectingBoxCategory => Err(LeitnerError::InvalidSessionState {
                expected: "in progress",
                actual: "selecting a box",
            }),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::SessionComplete { .. })
    }

    /// Answers recorded so far, in order.
    pub fn results(&self) -> &[ReviewResult] {
        match &self.state {
            SessionState::InSession { results, .. }
            | SessionState::SessionComplete { results } => results,
            SessionState::SelectingBoxCategory => &[],
        }
    }

    /// Final results of a completed session.
    pub fn into_results(self) -> Result<Vec<ReviewResult>> {
        match self.state {
            SessionState::SessionComplete { results } => Ok(results),
            other => Err(LeitnerError::InvalidSessionState {
                expected: "complete",
                actual: other.name(),
            }),
        }
    }

    fn expect_selecting(&self) -> Result<()> {
        match self.state {
            SessionState::SelectingBoxCategory => Ok(()),
            _ => Err(LeitnerError::InvalidSessionState {
                expected: "selecting a box",
                actual: self.state.name(),
            }),
        }
    }
}
