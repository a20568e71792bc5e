//! Seams between the engine and the outside world.
//!
//! The card store reads wall-clock time through [`Clock`] and writes its
//! collections through [`CollectionStorage`], so both can be swapped for
//! deterministic implementations in tests.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::Card;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

// ---------------------------------------------------------------------------
// Durable storage
// ---------------------------------------------------------------------------

/// Durable home of the two flat collections.
///
/// Every save replaces the whole collection. Loading a collection that has
/// never been saved returns an empty one; any other failure is an error and
/// it is up to the caller whether to recover.
pub trait CollectionStorage {
    /// Short description used in log messages (e.g. a directory path).
    fn describe(&self) -> String;

    fn load_cards(&self) -> Result<Vec<Card>>;

    fn save_cards(&self, cards: &[Card]) -> Result<()>;

    fn load_categories(&self) -> Result<Vec<String>>;

    fn save_categories(&self, categories: &[String]) -> Result<()>;
}
