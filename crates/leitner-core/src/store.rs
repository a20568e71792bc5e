//! The card store: sole owner of the card and category collections.
//!
//! Every mutation is staged on a copy of the collection, written through the
//! [`CollectionStorage`] backend, and only then swapped in. A failed save
//! therefore leaves the in-memory state as it was before the call.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{LeitnerError, Result};
use crate::model::{
    check_category, normalize_category, require_text, BoxIndex, Card, CardUpdate, ALL_CATEGORIES,
};
use crate::traits::{Clock, CollectionStorage};

/// Ordered collection of cards plus the registered categories.
///
/// Cards keep insertion order. Question text is the external lookup key but
/// is not unique: question-addressed mutations apply to every match, lookups
/// return the first.
pub struct CardStore {
    cards: Vec<Card>,
    categories: Vec<String>,
    storage: Box<dyn CollectionStorage>,
    clock: Box<dyn Clock>,
}

impl CardStore {
    /// Load both collections from `storage`.
    ///
    /// Unreadable collections are logged and replaced by empty ones; the next
    /// successful save overwrites whatever was on disk.
    pub fn open(storage: impl CollectionStorage + 'static, clock: impl Clock + 'static) -> Self {
        let cards = storage.load_cards().unwrap_or_else(|e| {
            tracing::warn!(
                "failed to load cards from {}: {e}; starting with an empty collection",
                storage.describe()
            );
            Vec::new()
        });

        let stored_categories = storage.load_categories().unwrap_or_else(|e| {
            tracing::warn!(
                "failed to load categories from {}: {e}; starting with none",
                storage.describe()
            );
            Vec::new()
        });

        // Categories used by cards but never registered (older files) are
        // appended after the stored ones.
        let mut categories: Vec<String> = Vec::new();
        let used = cards.iter().filter_map(|c| c.category.clone());
        for name in stored_categories.into_iter().chain(used) {
            if let Some(name) = normalize_category(Some(&name)) {
                if name != ALL_CATEGORIES && !categories.contains(&name) {
                    categories.push(name);
                }
            }
        }

        tracing::debug!(
            "opened {} with {} cards and {} categories",
            storage.describe(),
            cards.len(),
            categories.len()
        );

        Self {
            cards,
            categories,
            storage: Box::new(storage),
            clock: Box::new(clock),
        }
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    // ==================== Card Operations ====================

    /// Create a card in the first box, revised now.
    pub fn add_card(
        &mut self,
        question: &str,
        answer: &str,
        category: Option<&str>,
    ) -> Result<Card> {
        require_text("question", question)?;
        require_text("answer", answer)?;
        if let Some(c) = category {
            check_category(c)?;
        }
        let category = normalize_category(category);

        if self.cards.iter().any(|c| c.question == question) {
            tracing::warn!("adding duplicate question '{question}'");
        }

        if let Some(name) = &category {
            self.register_category(name)?;
        }

        let card = Card::new(
            question.to_string(),
            answer.to_string(),
            category,
            self.clock.now(),
        );
        let mut staged = self.cards.clone();
        staged.push(card.clone());
        self.commit_cards(staged)?;

        tracing::info!("added card '{}' ({})", card.question, card.id);
        Ok(card)
    }

    /// First card with exactly this question.
    pub fn get_card_by_question(&self, question: &str) -> Option<Card> {
        self.cards.iter().find(|c| c.question == question).cloned()
    }

    pub fn get_card(&self, id: Uuid) -> Option<Card> {
        self.cards.iter().find(|c| c.id == id).cloned()
    }

    /// Merge `update` into every card with this question.
    ///
    /// Returns how many cards were touched; zero is not an error.
    pub fn update_card(&mut self, question: &str, update: &CardUpdate) -> Result<usize> {
        update.validate()?;
        self.apply_where(|c| c.question == question, update)
    }

    /// Merge `update` into the card with this id.
    pub fn update_card_by_id(&mut self, id: Uuid, update: &CardUpdate) -> Result<Card> {
        update.validate()?;
        if self.apply_where(|c| c.id == id, update)? == 0 {
            return Err(LeitnerError::NotFound(id.to_string()));
        }
        self.get_card(id)
            .ok_or_else(|| LeitnerError::NotFound(id.to_string()))
    }

    /// Remove every card with this question. Returns how many were removed.
    pub fn delete_card(&mut self, question: &str) -> Result<usize> {
        let mut staged = self.cards.clone();
        staged.retain(|c| c.question != question);
        let removed = self.cards.len() - staged.len();
        if removed == 0 {
            tracing::debug!("delete: no card matches '{question}'");
            return Ok(0);
        }
        self.commit_cards(staged)?;
        tracing::info!("deleted {removed} card(s) '{question}'");
        Ok(removed)
    }

    /// Put every card with this question into `new_box`.
    ///
    /// The revision date is left alone, so the card's due time follows its
    /// old revision date.
    pub fn move_card(&mut self, question: &str, new_box: i64) -> Result<usize> {
        let target = BoxIndex::new(new_box)?;
        self.update_card(question, &CardUpdate::default().box_index(target))
    }

    /// All cards in `box_index`, healing missing revision dates.
    pub fn get_cards_by_box(&mut self, box_index: BoxIndex) -> Result<Vec<Card>> {
        self.get_cards_by_box_and_category(box_index, ALL_CATEGORIES)
    }

    /// Cards in `box_index` and `category` (`"All"` for any category).
    ///
    /// Any selected card without a revision date gets one set to now, and the
    /// collection is saved.
    pub fn get_cards_by_box_and_category(
        &mut self,
        box_index: BoxIndex,
        category: &str,
    ) -> Result<Vec<Card>> {
        let selected = |c: &Card| c.box_index == box_index && c.matches_category(category);

        if self
            .cards
            .iter()
            .any(|c| selected(c) && c.last_revision.is_none())
        {
            let now = self.clock.now();
            let mut staged = self.cards.clone();
            let mut healed = 0;
            for card in staged.iter_mut().filter(|c| selected(c)) {
                if card.last_revision.is_none() {
                    card.last_revision = Some(now);
                    healed += 1;
                }
            }
            self.commit_cards(staged)?;
            tracing::debug!("initialized revision date on {healed} card(s) in box {box_index}");
        }

        Ok(self.cards.iter().filter(|c| selected(c)).cloned().collect())
    }

    pub fn get_all_cards(&self) -> Vec<Card> {
        self.cards.clone()
    }

    /// Case-insensitive keyword search over question and answer.
    ///
    /// `category` of `None` or `"All"` searches every category.
    pub fn search_cards(&self, keyword: &str, category: Option<&str>) -> Vec<Card> {
        let category = category.unwrap_or(ALL_CATEGORIES);
        self.cards
            .iter()
            .filter(|c| c.matches_category(category) && c.matches_keyword(keyword))
            .cloned()
            .collect()
    }

    // ==================== Category Operations ====================

    /// Registered categories in registration order, without `"All"`.
    pub fn get_all_categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    /// `"All"` followed by the registered categories.
    pub fn category_choices(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    /// Register a category. Returns `false` if it already existed.
    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        require_text("category", name)?;
        check_category(name)?;
        self.register_category(name.trim())
    }

    fn register_category(&mut self, name: &str) -> Result<bool> {
        if self.categories.iter().any(|c| c == name) {
            return Ok(false);
        }
        let mut staged = self.categories.clone();
        staged.push(name.to_string());
        self.storage.save_categories(&staged)?;
        self.categories = staged;
        tracing::info!("registered category '{name}'");
        Ok(true)
    }

    // ==================== Internals ====================

    fn apply_where(
        &mut self,
        matches: impl Fn(&Card) -> bool,
        update: &CardUpdate,
    ) -> Result<usize> {
        let touched = self.cards.iter().filter(|c| matches(c)).count();
        if touched == 0 {
            tracing::debug!("update matched no card");
            return Ok(0);
        }

        if let Some(name) = normalize_category(update.category.as_deref()) {
            self.register_category(&name)?;
        }

        let mut staged = self.cards.clone();
        for card in staged.iter_mut().filter(|c| matches(c)) {
            update.apply(card);
        }
        self.commit_cards(staged)?;
        tracing::info!("updated {touched} card(s)");
        Ok(touched)
    }

    fn commit_cards(&mut self, mut staged: Vec<Card>) -> Result<()> {
        for card in &mut staged {
            card.refresh_next_revision();
        }
        self.storage.save_cards(&staged)?;
        self.cards = staged;
        Ok(())
    }
}

impl std::fmt::Debug for CardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStore")
            .field("storage", &self.storage.describe())
            .field("cards", &self.cards.len())
            .field("categories", &self.categories)
            .finish()
    }
}
