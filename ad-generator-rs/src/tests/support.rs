//! Fakes and helpers for tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wiremock::MockServer;

use ads_tool_sdk::{ConfigProvider, MemoryConfigProvider, Result, ServiceError};

use crate::copywriter::CopyGeneration;
use crate::keywords::KeywordResearch;
use crate::locale::{find_country, find_language};
use crate::model::{AdCopyResult, CompetitionLevel, GenerationRequest, KeywordIdea, RunParams, SearchResult};
use crate::report::RunReporter;
use crate::snippets::SnippetSearch;

/// Everything a reporter was told, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    TopKeywords(Vec<KeywordIdea>),
    Snippets(Vec<SearchResult>),
    AdCopy(AdCopyResult),
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Reported>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Reported> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Reported::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Reported) {
        self.events.lock().unwrap().push(event);
    }
}

impl RunReporter for RecordingReporter {
    fn top_keywords(&self, keywords: &[KeywordIdea]) {
        self.push(Reported::TopKeywords(keywords.to_vec()));
    }

    fn snippets(&self, snippets: &[SearchResult]) {
        self.push(Reported::Snippets(snippets.to_vec()));
    }

    fn ad_copy(&self, ad_copy: &AdCopyResult) {
        self.push(Reported::AdCopy(ad_copy.clone()));
    }

    fn error(&self, message: &str) {
        self.push(Reported::Error(message.to_string()));
    }
}

/// Arguments of one keyword research call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCall {
    pub account_id: String,
    pub geo_ids: Vec<u32>,
    pub language_id: u32,
    pub seed_keywords: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeKeywordResearch {
    pub ideas: Vec<KeywordIdea>,
    /// Report this rejection and return nothing
    pub rejection: Option<String>,
    pub calls: Arc<Mutex<Vec<KeywordCall>>>,
}

#[async_trait]
impl KeywordResearch for FakeKeywordResearch {
    async fn fetch_keyword_ideas(
        &self,
        account_id: &str,
        geo_ids: &[u32],
        language_id: u32,
        seed_keywords: &[String],
        reporter: &dyn RunReporter,
    ) -> Result<Vec<KeywordIdea>> {
        self.calls.lock().unwrap().push(KeywordCall {
            account_id: account_id.to_string(),
            geo_ids: geo_ids.to_vec(),
            language_id,
            seed_keywords: seed_keywords.to_vec(),
        });

        if let Some(ref rejection) = self.rejection {
            reporter.error(&format!("Error with request: {}", rejection));
            return Ok(Vec::new());
        }

        Ok(self.ideas.clone())
    }
}

/// Arguments of one snippet search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCall {
    pub query: String,
    pub language_hint: String,
    pub country_hint: String,
    pub limit: usize,
}

#[derive(Clone, Default)]
pub struct FakeSnippetSearch {
    pub results: Vec<SearchResult>,
    pub fail_with: Option<String>,
    pub calls: Arc<Mutex<Vec<SnippetCall>>>,
}

#[async_trait]
impl SnippetSearch for FakeSnippetSearch {
    async fn fetch_search_snippets(
        &self,
        query: &str,
        language_hint: &str,
        country_hint: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        self.calls.lock().unwrap().push(SnippetCall {
            query: query.to_string(),
            language_hint: language_hint.to_string(),
            country_hint: country_hint.to_string(),
            limit,
        });

        match self.fail_with {
            Some(ref message) => Err(ServiceError::network(message.clone())),
            None => Ok(self.results.iter().take(limit).cloned().collect()),
        }
    }
}

#[derive(Clone)]
pub struct FakeCopyGeneration {
    pub text: String,
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl Default for FakeCopyGeneration {
    fn default() -> Self {
        Self {
            text: "1. Jouw vakantiehuis wacht".to_string(),
            requests: Arc::default(),
        }
    }
}

#[async_trait]
impl CopyGeneration for FakeCopyGeneration {
    async fn generate_ad_copy(&self, request: &GenerationRequest) -> Result<AdCopyResult> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(AdCopyResult { text: self.text.clone() })
    }
}

/// Twelve ideas `idea-{i}` with distinct volumes in shuffled order.
///
/// `idea-0` (50) and `idea-5` (150) are the two lowest.
pub fn shuffled_ideas() -> Vec<KeywordIdea> {
    (0..12u64)
        .map(|i| KeywordIdea::new(format!("idea-{}", i), (i * 5) % 12 * 100 + 50, CompetitionLevel::Medium))
        .collect()
}

pub fn search_result(i: usize) -> SearchResult {
    SearchResult {
        title: format!("Result {}", i),
        snippet: format!("Snippet {}", i),
    }
}

/// English / Netherlands run for the seed `vakantiehuis`
pub fn run_params() -> RunParams {
    RunParams {
        seed_keywords: vec!["vakantiehuis".to_string()],
        language: find_language("English").unwrap(),
        country: find_country("Netherlands").unwrap(),
        brand: "Belvilla".to_string(),
        headline_count: 20,
        description_count: 8,
        customer_id: "7186856567".to_string(),
    }
}

/// Credentials pointing every service at `mock_server`
pub fn mock_provider(mock_server: &MockServer) -> Arc<dyn ConfigProvider> {
    let mut provider = MemoryConfigProvider::new();
    provider.set("developer_token", "mock-dev-token");
    provider.set("client_id", "mock-client-id");
    provider.set("client_secret", "mock-client-secret");
    provider.set("refresh_token", "mock-refresh-token");
    provider.set("google_ads_base_url", mock_server.uri());
    provider.set("google_oauth_token_url", format!("{}/token", mock_server.uri()));
    provider.set("serp_api", "mock-serp-key");
    provider.set("serpapi_base_url", mock_server.uri());
    provider.set("openai_api", "mock-azure-key");
    provider.set("openai_endpoint", mock_server.uri());
    Arc::new(provider)
}
