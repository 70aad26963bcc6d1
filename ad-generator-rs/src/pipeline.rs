//! The ad generation run
//!
//! Keyword research, ranking, snippet search and copy generation run
//! strictly in sequence. Each output goes to the `RunReporter` as soon as it
//! exists, so a later failure leaves the earlier outputs on screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};

use ads_tool_sdk::azure_openai::AzureOpenAiClient;
use ads_tool_sdk::google_ads::{self, GoogleAdsClient};
use ads_tool_sdk::serpapi::SerpApiClient;
use ads_tool_sdk::{ConfigProvider, ErrorContext, Result, ServiceError};

use crate::copywriter::{AzureCopyGenerator, CopyGeneration};
use crate::keywords::{top_keywords, GoogleAdsKeywordResearch, KeywordResearch, TOP_KEYWORD_LIMIT};
use crate::model::{AdCopyResult, GenerationRequest, KeywordIdea, Locale, RunOutput, RunParams, SearchResult};
use crate::report::RunReporter;
use crate::snippets::{SerpApiSnippetSearch, SnippetSearch, DEFAULT_SNIPPET_LIMIT};

/// What to do when keyword research was rejected and produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordFailurePolicy {
    /// Keep going with an empty keyword list
    #[default]
    Continue,
    /// Stop before the snippet search
    Abort,
}

pub struct Pipeline {
    keywords: Box<dyn KeywordResearch>,
    snippets: Box<dyn SnippetSearch>,
    copywriter: Box<dyn CopyGeneration>,
    policy: KeywordFailurePolicy,
}

impl Pipeline {
    pub fn new(
        keywords: impl KeywordResearch + 'static,
        snippets: impl SnippetSearch + 'static,
        copywriter: impl CopyGeneration + 'static,
    ) -> Self {
        Self {
            keywords: Box::new(keywords),
            snippets: Box::new(snippets),
            copywriter: Box::new(copywriter),
            policy: KeywordFailurePolicy::default(),
        }
    }

    /// Pipeline over the real services, all reading credentials from `provider`
    pub fn from_provider(provider: Arc<dyn ConfigProvider>) -> Self {
        Self::new(
            GoogleAdsKeywordResearch::new(GoogleAdsClient::new(provider.clone())),
            SerpApiSnippetSearch::new(SerpApiClient::new(provider.clone())),
            AzureCopyGenerator::new(AzureOpenAiClient::new(provider)),
        )
    }

    pub fn with_policy(mut self, policy: KeywordFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> KeywordFailurePolicy {
        self.policy
    }

    /// Execute one run
    pub async fn run(&self, params: &RunParams, reporter: &dyn RunReporter) -> Result<RunOutput> {
        let run_id = ads_tool_sdk::util::generate_request_id();
        info!(
            "Starting run {} ({} seeds, {}, {}, brand {})",
            run_id,
            params.seed_keywords.len(),
            params.language,
            params.country,
            params.brand
        );

        let tracker = RejectionTracker::new(reporter);
        let ideas = self
            .keywords
            .fetch_keyword_ideas(
                &params.customer_id,
                &[params.country.geo_id],
                params.language.id,
                &params.seed_keywords,
                &tracker,
            )
            .await?;

        if ideas.is_empty() && tracker.rejected() {
            match self.policy {
                KeywordFailurePolicy::Continue => {
                    warn!("Run {} continues without keyword ideas", run_id);
                }
                KeywordFailurePolicy::Abort => {
                    return Err(ServiceError::service("Keyword research failed, run aborted")
                        .with_context(ErrorContext::for_service(google_ads::SERVICE_NAME).with("run_id", &run_id)));
                }
            }
        }

        let top = top_keywords(ideas, TOP_KEYWORD_LIMIT);
        reporter.top_keywords(&top);

        let query = params.seed_keywords.join(",");
        let locale = Locale::new(&params.language, &params.country);
        let snippets = self
            .snippets
            .fetch_search_snippets(&query, &locale.language_code, &locale.country_code, DEFAULT_SNIPPET_LIMIT)
            .await?;
        reporter.snippets(&snippets);

        let request = GenerationRequest {
            top_keywords: top.iter().map(|k| k.text.clone()).collect(),
            brand: params.brand.clone(),
            snippets: snippets.clone(),
            headline_count: params.headline_count,
            description_count: params.description_count,
            locale,
        };
        let ad_copy = self.copywriter.generate_ad_copy(&request).await?;
        reporter.ad_copy(&ad_copy);

        info!("Run {} finished", run_id);

        Ok(RunOutput {
            top_keywords: top,
            snippets,
            ad_copy,
        })
    }

    /// Execute one run, reporting any failure instead of returning it
    pub async fn run_and_report(&self, params: &RunParams, reporter: &dyn RunReporter) -> Option<RunOutput> {
        match self.run(params, reporter).await {
            Ok(output) => Some(output),
            Err(e) => {
                error!("Run failed: {}", e);
                reporter.error(&format!("An error occurred: {}", e));
                None
            }
        }
    }
}

/// Forwards to the real reporter and remembers whether an error was reported
struct RejectionTracker<'a> {
    inner: &'a dyn RunReporter,
    rejected: AtomicBool,
}

impl<'a> RejectionTracker<'a> {
    fn new(inner: &'a dyn RunReporter) -> Self {
        Self {
            inner,
            rejected: AtomicBool::new(false),
        }
    }

    fn rejected(&self) -> bool {
        self.rejected.load(Ordering::Relaxed)
    }
}

impl RunReporter for RejectionTracker<'_> {
    fn top_keywords(&self, keywords: &[KeywordIdea]) {
        self.inner.top_keywords(keywords);
    }

    fn snippets(&self, snippets: &[SearchResult]) {
        self.inner.snippets(snippets);
    }

    fn ad_copy(&self, ad_copy: &AdCopyResult) {
        self.inner.ad_copy(ad_copy);
    }

    fn error(&self, message: &str) {
        self.rejected.store(true, Ordering::Relaxed);
        self.inner.error(message);
    }
}
