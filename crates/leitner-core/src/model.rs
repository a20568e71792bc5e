//! Core data model types for leitner.
//!
//! A [`Card`] is the unit of study material. Its persisted shape is
//! `{id, question, answer, box, category?, last_revision, next_revision}`;
//! older collections that use `command` for the answer, carry naive local
//! timestamps or have no `id` still load.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{LeitnerError, Result};
use crate::scheduler;

/// Reserved pseudo-category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Number of Leitner boxes.
pub const BOX_COUNT: usize = 5;

/// Index of a Leitner box, always in `0..=4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct BoxIndex(u8);

impl BoxIndex {
    pub const FIRST: BoxIndex = BoxIndex(0);
    pub const LAST: BoxIndex = BoxIndex(BOX_COUNT as u8 - 1);

    /// Validate a raw box number.
    pub fn new(raw: i64) -> Result<Self> {
        if (0..BOX_COUNT as i64).contains(&raw) {
            Ok(BoxIndex(raw as u8))
        } else {
            Err(LeitnerError::Range(raw))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// One box up, saturating at the last box.
    pub fn promote(self) -> Self {
        BoxIndex((self.0 + 1).min(Self::LAST.0))
    }

    /// One box down, saturating at the first box.
    pub fn demote(self) -> Self {
        BoxIndex(self.0.saturating_sub(1))
    }

    /// All boxes in ascending order.
    pub fn all() -> impl Iterator<Item = BoxIndex> {
        (0..BOX_COUNT as u8).map(BoxIndex)
    }
}

impl TryFrom<i64> for BoxIndex {
    type Error = LeitnerError;

    fn try_from(raw: i64) -> Result<Self> {
        BoxIndex::new(raw)
    }
}

impl From<BoxIndex> for u8 {
    fn from(b: BoxIndex) -> Self {
        b.0
    }
}

impl fmt::Display for BoxIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A flashcard: a question and the literal answer expected back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Surrogate identifier, stable across edits of the question text.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub question: String,
    /// Expected response. Older collections call this `command`.
    #[serde(alias = "command")]
    pub answer: String,
    #[serde(rename = "box", default)]
    pub box_index: BoxIndex,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_category"
    )]
    pub category: Option<String>,
    /// Last time the card was answered. Only absent on damaged records,
    /// which the box queries heal.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub last_revision: Option<DateTime<Utc>>,
    /// Cached `last_revision + interval(box)`, refreshed on every save.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub next_revision: Option<DateTime<Utc>>,
}

impl Card {
    pub(crate) fn new(
        question: String,
        answer: String,
        category: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut card = Self {
            id: Uuid::new_v4(),
            question,
            answer,
            box_index: BoxIndex::FIRST,
            category,
            last_revision: Some(now),
            next_revision: None,
        };
        card.refresh_next_revision();
        card
    }

    /// When this card becomes due again, if it has a revision date.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.last_revision
            .map(|last| last + scheduler::interval(self.box_index))
    }

    /// Whether the card passes a category filter (`"All"` passes everything).
    pub fn matches_category(&self, filter: &str) -> bool {
        filter == ALL_CATEGORIES || self.category.as_deref() == Some(filter)
    }

    /// Case-insensitive keyword match against question or answer.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.question.to_lowercase().contains(&keyword)
            || self.answer.to_lowercase().contains(&keyword)
    }

    pub(crate) fn refresh_next_revision(&mut self) {
        self.next_revision = self.due_at();
    }
}

/// Fields to merge into an existing card. `None` leaves a field unchanged.
///
/// An empty `category` clears the card's category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub box_index: Option<BoxIndex>,
    pub last_revision: Option<DateTime<Utc>>,
}

impl CardUpdate {
    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn box_index(mut self, box_index: BoxIndex) -> Self {
        self.box_index = Some(box_index);
        self
    }

    pub fn last_revision(mut self, at: DateTime<Utc>) -> Self {
        self.last_revision = Some(at);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == CardUpdate::default()
    }

    /// Check the update before it touches any card.
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(q) = &self.question {
            require_text("question", q)?;
        }
        if let Some(a) = &self.answer {
            require_text("answer", a)?;
        }
        if let Some(c) = &self.category {
            check_category(c)?;
        }
        Ok(())
    }

    pub(crate) fn apply(&self, card: &mut Card) {
        if let Some(q) = &self.question {
            card.question = q.clone();
        }
        if let Some(a) = &self.answer {
            card.answer = a.clone();
        }
        if let Some(c) = &self.category {
            card.category = normalize_category(Some(c));
        }
        if let Some(b) = self.box_index {
            card.box_index = b;
        }
        if let Some(at) = self.last_revision {
            card.last_revision = Some(at);
        }
        card.refresh_next_revision();
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LeitnerError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Reject the reserved wildcard as a real category name.
pub(crate) fn check_category(name: &str) -> Result<()> {
    if name.trim() == ALL_CATEGORIES {
        return Err(LeitnerError::validation(
            "category",
            format!("'{ALL_CATEGORIES}' is reserved"),
        ));
    }
    Ok(())
}

/// Trim a category label; blank labels mean "uncategorized".
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Parse a revision timestamp.
///
/// Accepts RFC 3339 and naive ISO-8601 (`2024-05-01T09:30:00.123456`), the
/// latter interpreted in the local time zone.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| LeitnerError::Parse {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| LeitnerError::Parse {
            input: input.to_string(),
            reason: "time does not exist in the local time zone".into(),
        })
}

fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match parse_timestamp(&s) {
        Ok(dt) => Some(dt),
        Err(e) => {
            tracing::warn!("dropping unreadable revision date: {e}");
            None
        }
    }))
}

fn deserialize_category<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_category(raw.as_deref()))
}
