//! Keyword research against the Google Ads keyword planner

use async_trait::async_trait;
use log::{debug, error, info, warn};

use ads_tool_sdk::google_ads::{
    self, GenerateKeywordIdeaResult, GenerateKeywordIdeasRequest, GoogleAdsClient, KeywordPlanCompetitionLevel,
};
use ads_tool_sdk::Result;

use crate::model::{CompetitionLevel, KeywordIdea};
use crate::report::RunReporter;

/// Number of keywords kept after ranking
pub const TOP_KEYWORD_LIMIT: usize = 10;

/// Upper bound on followed result pages
const MAX_PAGES: usize = 20;

#[async_trait]
pub trait KeywordResearch: Send + Sync {
    /// Keyword ideas for `seed_keywords` in the given locations and language.
    ///
    /// When the provider rejects the request the rejection is reported
    /// through `reporter` and an empty list is returned. Every other failure
    /// is returned as an error.
    async fn fetch_keyword_ideas(
        &self,
        account_id: &str,
        geo_ids: &[u32],
        language_id: u32,
        seed_keywords: &[String],
        reporter: &dyn RunReporter,
    ) -> Result<Vec<KeywordIdea>>;
}

/// `KeywordResearch` backed by the Google Ads REST API
pub struct GoogleAdsKeywordResearch {
    client: GoogleAdsClient,
}

impl GoogleAdsKeywordResearch {
    pub fn new(client: GoogleAdsClient) -> Self {
        Self { client }
    }

    async fn fetch_all_pages(
        &self,
        account_id: &str,
        request: &mut GenerateKeywordIdeasRequest,
    ) -> Result<Vec<GenerateKeywordIdeaResult>> {
        let mut results = Vec::new();

        for page in 1..=MAX_PAGES {
            let response = self.client.generate_keyword_ideas(account_id, request).await?;
            results.extend(response.results);

            match response.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    debug!("Fetching keyword idea page {}", page + 1);
                    request.page_token = Some(token);
                }
                None => return Ok(results),
            }
        }

        warn!("Stopped after {} pages of keyword ideas", MAX_PAGES);
        Ok(results)
    }
}

#[async_trait]
impl KeywordResearch for GoogleAdsKeywordResearch {
    async fn fetch_keyword_ideas(
        &self,
        account_id: &str,
        geo_ids: &[u32],
        language_id: u32,
        seed_keywords: &[String],
        reporter: &dyn RunReporter,
    ) -> Result<Vec<KeywordIdea>> {
        let mut request = GenerateKeywordIdeasRequest::for_seeds(geo_ids, language_id, seed_keywords);

        match self.fetch_all_pages(account_id, &mut request).await {
            Ok(results) => {
                let ideas: Vec<KeywordIdea> = results.into_iter().map(keyword_idea_from).collect();
                info!("Received {} keyword ideas", ideas.len());
                Ok(ideas)
            }
            Err(e) if e.is_rejection_from(google_ads::SERVICE_NAME) => {
                error!(
                    "Google Ads rejected the keyword request (status {:?}, request id {:?}): {}",
                    e.status_code(),
                    e.request_id(),
                    e
                );
                reporter.error(&format!("Error with request: {}", e));
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

fn keyword_idea_from(result: GenerateKeywordIdeaResult) -> KeywordIdea {
    let (avg_monthly_searches, competition) = match result.keyword_idea_metrics {
        Some(metrics) => (
            metrics.avg_monthly_searches.map_or(0, |v| v.max(0) as u64),
            competition_from(metrics.competition),
        ),
        None => (0, CompetitionLevel::Unspecified),
    };

    KeywordIdea {
        text: result.text,
        avg_monthly_searches,
        competition,
    }
}

fn competition_from(level: KeywordPlanCompetitionLevel) -> CompetitionLevel {
    match level {
        KeywordPlanCompetitionLevel::Unspecified => CompetitionLevel::Unspecified,
        KeywordPlanCompetitionLevel::Unknown => CompetitionLevel::Unknown,
        KeywordPlanCompetitionLevel::Low => CompetitionLevel::Low,
        KeywordPlanCompetitionLevel::Medium => CompetitionLevel::Medium,
        KeywordPlanCompetitionLevel::High => CompetitionLevel::High,
    }
}

/// The `limit` ideas with the highest search volume, highest first.
///
/// Ideas with equal volume keep their provider order.
pub fn top_keywords(mut ideas: Vec<KeywordIdea>, limit: usize) -> Vec<KeywordIdea> {
    ideas.sort_by(|a, b| b.avg_monthly_searches.cmp(&a.avg_monthly_searches));
    ideas.truncate(limit);
    ideas
}
