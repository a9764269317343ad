//! Persistence boundary for saved recipes.
//!
//! The store is a collaborator behind a narrow trait; the backing database
//! is swappable. The boundary re-enforces the same invariant the
//! normalizer guarantees internally: a payload without ingredients or
//! instructions is rejected, never stored.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::RecipeDetail;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Payload is missing a required field or is not cookable
    #[error("invalid recipe: {0}")]
    InvalidRecipe(String),

    /// No saved recipe with this id under this owner
    #[error("recipe not found")]
    NotFound,
}

/// Validate that a payload satisfies the save contract: title and image
/// present, ingredients non-empty, instructions non-empty after trimming.
pub fn validate_saveable(recipe: &RecipeDetail) -> Result<(), StoreError> {
    if recipe.title.trim().is_empty() {
        return Err(StoreError::InvalidRecipe("title is required".to_string()));
    }
    if recipe.image.as_deref().map(str::trim).unwrap_or("").is_empty() {
        return Err(StoreError::InvalidRecipe("image is required".to_string()));
    }
    if recipe.ingredients.is_empty() {
        return Err(StoreError::InvalidRecipe(
            "ingredients are required and cannot be empty".to_string(),
        ));
    }
    if recipe.instructions.trim().is_empty() {
        return Err(StoreError::InvalidRecipe(
            "instructions are required".to_string(),
        ));
    }
    Ok(())
}

/// Saved-recipe collection, scoped per owner.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a recipe snapshot under the owner's account, returning the
    /// stored entry's id. Rejects uncookable payloads.
    async fn save(&self, owner: &str, recipe: RecipeDetail) -> Result<u64, StoreError>;

    /// Remove a saved recipe. Fails with `NotFound` when the id does not
    /// exist under this owner.
    async fn remove(&self, owner: &str, id: u64) -> Result<(), StoreError>;

    /// All recipes saved by the owner, in insertion order.
    async fn list(&self, owner: &str) -> Result<Vec<RecipeDetail>, StoreError>;
}

/// In-memory store used by tests and the CLI.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    next_id: u64,
    by_owner: HashMap<String, Vec<(u64, RecipeDetail)>>,
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn save(&self, owner: &str, recipe: RecipeDetail) -> Result<u64, StoreError> {
        validate_saveable(&recipe)?;
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .by_owner
            .entry(owner.to_string())
            .or_default()
            .push((id, recipe));
        Ok(id)
    }

    async fn remove(&self, owner: &str, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let entries = inner.by_owner.get_mut(owner).ok_or(StoreError::NotFound)?;
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        if entries.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, owner: &str) -> Result<Vec<RecipeDetail>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .by_owner
            .get(owner)
            .map(|entries| entries.iter().map(|(_, r)| r.clone()).collect())
            .unwrap_or_default())
    }
}
