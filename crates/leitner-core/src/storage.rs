//! [`CollectionStorage`] backends.
//!
//! ```text
//! {data_dir}/
//! ├── leitner_cards.json   # Array of card records, insertion order
//! └── categories.json      # Array of category names
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{LeitnerError, Result};
use crate::model::Card;
use crate::traits::CollectionStorage;

pub const DEFAULT_CARDS_FILE: &str = "leitner_cards.json";
pub const DEFAULT_CATEGORIES_FILE: &str = "categories.json";

/// Two pretty-printed JSON files in a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    cards_path: PathBuf,
    categories_path: PathBuf,
}

impl JsonFileStorage {
    /// Storage in `data_dir` with the default file names.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            cards_path: dir.join(DEFAULT_CARDS_FILE),
            categories_path: dir.join(DEFAULT_CATEGORIES_FILE),
        }
    }

    /// Storage with explicit file paths.
    pub fn with_paths(cards_path: PathBuf, categories_path: PathBuf) -> Self {
        Self {
            cards_path,
            categories_path,
        }
    }

    pub fn cards_path(&self) -> &Path {
        &self.cards_path
    }

    pub fn categories_path(&self) -> &Path {
        &self.categories_path
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            LeitnerError::Persistence(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            LeitnerError::Persistence(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Atomic write: write to `<file>.tmp`, then rename over the target.
    fn write<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(items)?;
        let tmp_path = tmp_path_for(path);
        fs::write(&tmp_path, json).map_err(|e| {
            LeitnerError::Persistence(format!("failed to write {}: {e}", tmp_path.display()))
        })?;
        fs::rename(&tmp_path, path).map_err(|e| {
            LeitnerError::Persistence(format!("failed to replace {}: {e}", path.display()))
        })?;
        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl CollectionStorage for JsonFileStorage {
    fn describe(&self) -> String {
        self.cards_path.display().to_string()
    }

    fn load_cards(&self) -> Result<Vec<Card>> {
        Self::read(&self.cards_path)
    }

    fn save_cards(&self, cards: &[Card]) -> Result<()> {
        Self::write(&self.cards_path, cards)
    }

    fn load_categories(&self) -> Result<Vec<String>> {
        Self::read(&self.categories_path)
    }

    fn save_categories(&self, categories: &[String]) -> Result<()> {
        Self::write(&self.categories_path, categories)
    }
}

/// In-memory storage for tests.
///
/// Collections are kept serialized so loads go through the same serde path
/// as the file backend. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    cards: Mutex<Option<String>>,
    categories: Mutex<Option<String>>,
    fail_saves: AtomicBool,
    save_count: AtomicU32,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the card collection with raw JSON (may be invalid on purpose).
    pub fn with_cards_json(self, json: &str) -> Self {
        *lock(&self.inner.cards) = Some(json.to_string());
        self
    }

    /// Seed the category collection with raw JSON.
    pub fn with_categories_json(self, json: &str) -> Self {
        *lock(&self.inner.categories) = Some(json.to_string());
        self
    }

    /// Make every subsequent save fail.
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::Relaxed);
    }

    /// Number of successful saves (cards and categories).
    pub fn save_count(&self) -> u32 {
        self.inner.save_count.load(Ordering::Relaxed)
    }

    fn read<T: DeserializeOwned>(slot: &Mutex<Option<String>>) -> Result<Vec<T>> {
        match lock(slot).as_deref() {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn write<T: Serialize>(&self, slot: &Mutex<Option<String>>, items: &[T]) -> Result<()> {
        if self.inner.fail_saves.load(Ordering::Relaxed) {
            return Err(LeitnerError::Persistence("simulated write failure".into()));
        }
        *lock(slot) = Some(serde_json::to_string(items)?);
        self.inner.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

fn lock(slot: &Mutex<Option<String>>) -> std::sync::MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

impl CollectionStorage for MemoryStorage {
    fn describe(&self) -> String {
        "memory".into()
    }

    fn load_cards(&self) -> Result<Vec<Card>> {
        Self::read(&self.inner.cards)
    }

    fn save_cards(&self, cards: &[Card]) -> Result<()> {
        self.write(&self.inner.cards, cards)
    }

    fn load_categories(&self) -> Result<Vec<String>> {
        Self::read(&self.inner.categories)
    }

    fn save_categories(&self, categories: &[String]) -> Result<()> {
        self.write(&self.inner.categories, categories)
    }
}
