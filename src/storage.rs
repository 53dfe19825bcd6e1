use crate::models::{Recipe, RecipeDraft};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Failures surfaced by the recipe and user stores.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("no document with id {0}")]
    NotFound(String),

    #[error("document rejected: {0}")]
    ValidationFailed(String),
}

impl StorageError {
    pub(crate) fn unavailable(context: &str, err: impl std::fmt::Display) -> Self {
        StorageError::Unavailable(format!("{context}: {err}"))
    }
}

/// Recipe collection backed by a JSON file on disk.
///
/// All reads and writes go through one `RwLock`, so multi-step operations
/// such as seeding hold a single write guard and stay atomic. Insertion order
/// of the backing vec is the only ordering the store knows about.
pub struct RecipeStorage {
    path: PathBuf,
    recipes: RwLock<Vec<Recipe>>,
}

impl RecipeStorage {
    /// Opens the store at `path`, loading any existing recipes.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let recipes = load_json(&path)?;

        Ok(Self {
            path,
            recipes: RwLock::new(recipes),
        })
    }

    /// Returns up to `limit` recipes, most recently inserted first.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Recipe>, StorageError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().rev().take(limit).cloned().collect())
    }

    /// Returns every recipe in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Recipe>, StorageError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.clone())
    }

    /// Finds one recipe by its `postURL` slug.
    ///
    /// Slugs carry no uniqueness constraint; when several recipes share one,
    /// the match with the lowest insertion order wins.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Recipe>, StorageError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().find(|r| r.post_url == slug).cloned())
    }

    /// Returns all recipes tagged with `tag` (exact, case-sensitive).
    pub async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, StorageError> {
        let recipes = self.recipes.read().await;
        Ok(recipes
            .iter()
            .filter(|r| r.post_tags.iter().any(|t| t == tag))
            .cloned()
            .collect())
    }

    /// Text search over title, summary and content.
    ///
    /// The query is split on whitespace and lowercased; a recipe matches when
    /// any token appears as a substring of any of the three fields. An empty
    /// or all-whitespace query returns no recipes.
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>, StorageError> {
        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let recipes = self.recipes.read().await;
        Ok(recipes
            .iter()
            .filter(|r| {
                let title = r.title.to_lowercase();
                let summary = r.summary.to_lowercase();
                let content = r.content.to_lowercase();
                tokens
                    .iter()
                    .any(|t| title.contains(t) || summary.contains(t) || content.contains(t))
            })
            .cloned()
            .collect())
    }

    /// Persists a draft, assigning its id, and returns the stored recipe.
    pub async fn insert(&self, draft: RecipeDraft) -> Result<Recipe, StorageError> {
        if draft.title.trim().is_empty() {
            return Err(StorageError::ValidationFailed(
                "recipe title must not be empty".to_string(),
            ));
        }

        let recipe = with_id(draft);
        let mut recipes = self.recipes.write().await;
        recipes.push(recipe.clone());
        self.save_to_disk(&recipes)?;
        Ok(recipe)
    }

    /// Replaces every field of the recipe with `id` except the id itself.
    pub async fn update_by_id(&self, id: &str, draft: RecipeDraft) -> Result<Recipe, StorageError> {
        let mut recipes = self.recipes.write().await;

        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Err(StorageError::NotFound(id.to_string()));
        };

        recipe.title = draft.title;
        recipe.post_url = draft.post_url;
        recipe.image_url = draft.image_url;
        recipe.post_tags = draft.post_tags;
        recipe.summary = draft.summary;
        recipe.content = draft.content;
        recipe.posted_on = draft.posted_on;

        let updated = recipe.clone();
        self.save_to_disk(&recipes)?;
        Ok(updated)
    }

    /// Removes the recipe with `id`.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);

        if recipes.len() == before {
            return Err(StorageError::NotFound(id.to_string()));
        }

        self.save_to_disk(&recipes)?;
        Ok(())
    }

    pub async fn count_all(&self) -> Result<usize, StorageError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.len())
    }

    pub async fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.count_all().await? == 0)
    }

    /// Inserts the seed drafts when the collection is empty.
    ///
    /// The emptiness check and the insert happen under one write guard, so
    /// concurrent first visits cannot both seed. Returns whether seeding ran.
    pub async fn insert_defaults_if_empty(
        &self,
        seeds: &[RecipeDraft],
    ) -> Result<bool, StorageError> {
        let mut recipes = self.recipes.write().await;
        if !recipes.is_empty() {
            return Ok(false);
        }

        for seed in seeds {
            recipes.push(with_id(seed.clone()));
        }
        self.save_to_disk(&recipes)?;
        Ok(true)
    }

    fn save_to_disk(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        save_json(&self.path, recipes)
    }
}

fn with_id(draft: RecipeDraft) -> Recipe {
    Recipe {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        post_url: draft.post_url,
        image_url: draft.image_url,
        post_tags: draft.post_tags,
        summary: draft.summary,
        content: draft.content,
        posted_on: draft.posted_on,
    }
}

pub(crate) fn load_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Vec<T>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let data = fs::read_to_string(path)
        .map_err(|e| StorageError::unavailable("failed to read storage file", e))?;
    serde_json::from_str(&data)
        .map_err(|e| StorageError::unavailable("failed to parse storage file", e))
}

pub(crate) fn save_json<T: serde::Serialize>(path: &Path, items: &[T]) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(items)
        .map_err(|e| StorageError::unavailable("failed to serialize documents", e))?;
    fs::write(path, json)
        .map_err(|e| StorageError::unavailable("failed to write storage file", e))
}
