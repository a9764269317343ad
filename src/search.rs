//! Search orchestration: validate, consult the cache, run the two-phase
//! upstream pipeline, normalize, cache, return.

use log::{debug, info};

use crate::cache::{CacheKey, Clock, ResultCache, SystemClock};
use crate::config::AppConfig;
use crate::error::SearchError;
use crate::model::RecipeDetail;
use crate::normalize::to_recipe_detail;
use crate::upstream::UpstreamClient;

pub struct SearchService<C: Clock = SystemClock> {
    upstream: UpstreamClient,
    cache: ResultCache<C>,
    max_page_size: u32,
}

impl SearchService<SystemClock> {
    /// Build the service from configuration. Fails with a configuration
    /// error when the upstream credential is unset.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let upstream = UpstreamClient::from_config(config)?;
        let cache = ResultCache::new(config.cache_ttl());
        Ok(Self::with_parts(upstream, cache, config.max_page_size))
    }
}

impl<C: Clock> SearchService<C> {
    pub fn with_parts(upstream: UpstreamClient, cache: ResultCache<C>, max_page_size: u32) -> Self {
        Self {
            upstream,
            cache,
            max_page_size,
        }
    }

    /// Search for cookable recipes matching `query`.
    ///
    /// Returns only recipes with both ingredients and instructions; an
    /// empty list is a valid outcome. `count` is clamped to
    /// `[1, max_page_size]`. Dropping the returned future aborts any
    /// in-flight upstream request.
    pub async fn search(
        &self,
        query: &str,
        offset: u32,
        count: u32,
    ) -> Result<Vec<RecipeDetail>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }
        let count = count.clamp(1, self.max_page_size);

        let key = CacheKey::new(query, offset, count);
        if let Some(cached) = self.cache.get(&key) {
            debug!("cache hit: query={:?} offset={} count={}", query, offset, count);
            return Ok(cached);
        }

        let candidates = self.upstream.search(query, offset, count).await?;
        if candidates.is_empty() {
            // Cache the empty outcome too, so known-empty queries do not
            // keep hitting upstream within the TTL window.
            self.cache.set(key, Vec::new());
            return Ok(Vec::new());
        }

        let ids: Vec<u64> = candidates.iter().map(|c| c.id).collect();
        let details = self.upstream.fetch_details(&ids).await?;

        let recipes: Vec<RecipeDetail> = details.into_iter().filter_map(to_recipe_detail).collect();
        info!(
            "search: query={:?} offset={} count={} candidates={} cookable={}",
            query,
            offset,
            count,
            ids.len(),
            recipes.len()
        );

        self.cache.set(key, recipes.clone());
        Ok(recipes)
    }
}
