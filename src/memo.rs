//! Flat answer memo keyed by the normalized ingredient list.
//!
//! There is no eviction and no expiry: an entry lives until `clear` or until
//! the process ends. The optional file is a JSON object of scope to
//! (key to recipe set); the scope names the provider, model and prompt style
//! that produced the answers, so one file can serve several backends.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::recipe_parser::RecipeSet;

#[derive(Debug, Default, Clone)]
pub struct RecipeMemo {
    entries: HashMap<String, Arc<RecipeSet>>,
}

impl RecipeMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<RecipeSet>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, recipes: RecipeSet) -> Arc<RecipeSet> {
        let recipes = Arc::new(recipes);
        self.entries.insert(key, Arc::clone(&recipes));
        recipes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort();
        keys
    }

    /// Loads one scope of a memo file; a missing file or scope yields an
    /// empty memo.
    pub async fn load(path: &Path, scope: &str) -> Result<Self> {
        let mut file = read_memo_file(path).await?;
        let entries = file.remove(scope).unwrap_or_default();

        let memo = Self {
            entries: entries.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
        };
        tracing::info!(path = %path.display(), scope, entries = memo.len(), "loaded recipe memo");
        Ok(memo)
    }

    /// Writes this memo as `scope` in the file, keeping every other scope.
    pub async fn save(&self, path: &Path, scope: &str) -> Result<()> {
        let mut file = read_memo_file(path).await?;
        file.insert(
            scope.to_string(),
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.as_ref().clone()))
                .collect(),
        );

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write memo file '{}'", path.display()))?;
        tracing::info!(path = %path.display(), scope, entries = self.len(), "saved recipe memo");
        Ok(())
    }
}

/// Scope name to (normalized key to recipe set).
type MemoFile = BTreeMap<String, BTreeMap<String, RecipeSet>>;

async fn read_memo_file(path: &Path) -> Result<MemoFile> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!(path = %path.display(), "no memo file yet, starting empty");
        return Ok(MemoFile::new());
    }
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read memo file '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Memo file '{}' is not valid JSON", path.display()))
}
