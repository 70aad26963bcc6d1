//! Organic search snippets from SerpAPI

use async_trait::async_trait;
use log::info;

use ads_tool_sdk::serpapi::{GoogleSearchParams, SerpApiClient};
use ads_tool_sdk::Result;

use crate::model::SearchResult;

/// Number of snippets requested per run
pub const DEFAULT_SNIPPET_LIMIT: usize = 10;

#[async_trait]
pub trait SnippetSearch: Send + Sync {
    /// At most `limit` organic results for `query`, in result order
    async fn fetch_search_snippets(
        &self,
        query: &str,
        language_hint: &str,
        country_hint: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>>;
}

/// `SnippetSearch` backed by SerpAPI's Google engine
pub struct SerpApiSnippetSearch {
    client: SerpApiClient,
}

impl SerpApiSnippetSearch {
    pub fn new(client: SerpApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnippetSearch for SerpApiSnippetSearch {
    async fn fetch_search_snippets(
        &self,
        query: &str,
        language_hint: &str,
        country_hint: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let params = GoogleSearchParams {
            q: query.to_string(),
            hl: Some(language_hint.to_string()),
            gl: Some(country_hint.to_string()),
            num: Some(u32::try_from(limit).unwrap_or(u32::MAX)),
        };

        let response = self.client.google_search(params).await?;

        let snippets: Vec<SearchResult> = response
            .organic()
            .iter()
            .take(limit)
            .map(|r| SearchResult::from_parts(r.title.as_deref(), r.snippet.as_deref()))
            .collect();

        info!("Collected {} search snippets for {:?}", snippets.len(), query);
        Ok(snippets)
    }
}
