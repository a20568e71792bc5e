//! `leitner.toml` loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use leitner_core::clock::SystemClock;
use leitner_core::storage::{JsonFileStorage, DEFAULT_CARDS_FILE, DEFAULT_CATEGORIES_FILE};
use leitner_core::CardStore;

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "LEITNER_DATA_DIR";

/// Where the card and category collections live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeitnerConfig {
    /// Directory holding both JSON files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Card collection file name, relative to `data_dir`.
    #[serde(default = "default_cards_file")]
    pub cards_file: String,
    /// Category collection file name, relative to `data_dir`.
    #[serde(default = "default_categories_file")]
    pub categories_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_cards_file() -> String {
    DEFAULT_CARDS_FILE.to_string()
}
fn default_categories_file() -> String {
    DEFAULT_CATEGORIES_FILE.to_string()
}

impl Default for LeitnerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cards_file: default_cards_file(),
            categories_file: default_categories_file(),
        }
    }
}

impl LeitnerConfig {
    pub fn cards_path(&self) -> PathBuf {
        self.data_dir.join(&self.cards_file)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.data_dir.join(&self.categories_file)
    }

    /// Open the card store described by this config.
    pub fn open_store(&self) -> CardStore {
        let storage = JsonFileStorage::with_paths(self.cards_path(), self.categories_path());
        CardStore::open(storage, SystemClock)
    }

    fn resolve_env(self) -> Self {
        Self {
            data_dir: PathBuf::from(resolve_env_vars(&self.data_dir.to_string_lossy())),
            cards_file: resolve_env_vars(&self.cards_file),
            categories_file: resolve_env_vars(&self.categories_file),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Unset variables expand to the empty string. Substituted values are not
/// expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut cursor = 0;
    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        cursor = start + value.len();
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `path`, which must exist when given
/// 2. `leitner.toml` in the current directory
/// 3. `~/.config/leitner/config.toml`
///
/// `LEITNER_DATA_DIR` replaces whatever `data_dir` the file set.
pub fn load_config_from(path: Option<&Path>) -> Result<LeitnerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("leitner.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LeitnerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LeitnerConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    Ok(config.resolve_env())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("leitner"))
}
