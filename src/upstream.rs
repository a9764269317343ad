//! Client for the upstream recipe provider.
//!
//! A search is always a two-phase pipeline: a light keyword search for
//! candidate IDs, then a single bulk detail lookup for the whole ID list.
//! Details are never fetched per candidate, so external-call cost stays
//! constant regardless of result-set size.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;

use crate::config::AppConfig;
use crate::error::SearchError;
use crate::model::{RawDetail, SearchCandidate, SearchResponse};

#[derive(Debug)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    /// Build a client from configuration. Fails with a configuration error
    /// when the API key is unset, so searches never reach the provider
    /// without a credential.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("RECIPE_SCOUT__API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SearchError::Configuration("upstream API key is not set".to_string())
            })?;

        Self::new(api_key, config.base_url.clone(), config.timeout())
    }

    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Keyword search returning candidate IDs. Asks the provider for
    /// recipes with instructions only; the normalizer still re-checks.
    pub async fn search(
        &self,
        query: &str,
        offset: u32,
        count: u32,
    ) -> Result<Vec<SearchCandidate>, SearchError> {
        let response = self
            .client
            .get(format!("{}/recipes/complexSearch", self.base_url))
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("query", query),
                ("number", &count.to_string()),
                ("offset", &offset.to_string()),
                ("instructionsRequired", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("complexSearch failed: query={:?} offset={} count={} status={}", query, offset, count, status);
            return Err(SearchError::UpstreamStatus(status));
        }

        let body: SearchResponse = response.json().await?;
        debug!("complexSearch: query={:?} candidates={}", query, body.results.len());
        Ok(body.results)
    }

    /// Bulk detail lookup for a candidate ID list. Called at most once per
    /// search; callers must skip it entirely when the ID list is empty.
    pub async fn fetch_details(&self, ids: &[u64]) -> Result<Vec<RawDetail>, SearchError> {
        let ids_param = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(format!("{}/recipes/informationBulk", self.base_url))
            .query(&[("apiKey", self.api_key.as_str()), ("ids", &ids_param)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("informationBulk failed: ids={} status={}", ids_param, status);
            return Err(SearchError::UpstreamStatus(status));
        }

        let details: Vec<RawDetail> = response.json().await?;
        debug!("informationBulk: requested={} received={}", ids.len(), details.len());
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: String) -> UpstreamClient {
        UpstreamClient::new("test-key".to_string(), base_url, Duration::from_secs(10)).unwrap()
    }

    #[tokio::test]
    async fn test_search_parses_candidates() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes/complexSearch")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("query".into(), "pasta".into()),
                mockito::Matcher::UrlEncoded("number".into(), "10".into()),
                mockito::Matcher::UrlEncoded("offset".into(), "0".into()),
                mockito::Matcher::UrlEncoded("instructionsRequired".into(), "true".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results":[{"id":111,"title":"Pasta","image":"p.jpg"}]}"#)
            .create_async()
            .await;

        let candidates = client(server.url()).search("pasta", 0, 10).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, 111);
        assert_eq!(candidates[0].title, "Pasta");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/recipes/complexSearch")
            .match_query(mockito::Matcher::Any)
            .with_status(402)
            .with_body(r#"{"message":"quota exceeded"}"#)
            .create_async()
            .await;

        let err = client(server.url()).search("pasta", 0, 10).await.unwrap_err();
        assert!(matches!(err, SearchError::UpstreamStatus(status) if status.as_u16() == 402));
    }

    #[tokio::test]
    async fn test_fetch_details_joins_ids() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes/informationBulk")
            .match_query(mockito::Matcher::UrlEncoded("ids".into(), "111,222".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":111},{"id":222}]"#)
            .create_async()
            .await;

        let details = client(server.url()).fetch_details(&[111, 222]).await.unwrap();
        assert_eq!(details.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_from_config_without_key() {
        std::env::remove_var("RECIPE_SCOUT__API_KEY");
        let config = AppConfig::default();
        let err = UpstreamClient::from_config(&config).unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }
}
