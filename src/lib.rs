pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod search;
pub mod store;
pub mod upstream;

pub use crate::config::AppConfig;
pub use crate::error::SearchError;
pub use crate::model::{IngredientLine, RecipeDetail, SearchCandidate};
pub use crate::search::SearchService;
pub use crate::store::{MemoryStore, RecipeStore, StoreError};

/// Run one recipe search with configuration loaded from the environment.
///
/// Convenience wrapper for callers that do not need to hold a
/// [`SearchService`] of their own; note that each call builds a fresh
/// service, so results are only memoized within a held service.
pub async fn search_recipes(
    query: &str,
    offset: u32,
    count: u32,
) -> Result<Vec<RecipeDetail>, SearchError> {
    let config = AppConfig::load()?;
    let service = SearchService::from_config(&config)?;
    service.search(query, offset, count).await
}
