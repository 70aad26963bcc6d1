//! Ad copy generation with an Azure OpenAI chat deployment

use async_trait::async_trait;
use log::{info, warn};

use ads_tool_sdk::azure_openai::AzureOpenAiClient;
use ads_tool_sdk::Result;

use crate::model::{AdCopyResult, GenerationRequest, DESCRIPTION_MAX_CHARS, HEADLINE_MAX_CHARS};

/// Text returned when the completion carries no content
pub const FALLBACK_AD_COPY: &str = "Error generating ads.";

#[async_trait]
pub trait CopyGeneration: Send + Sync {
    async fn generate_ad_copy(&self, request: &GenerationRequest) -> Result<AdCopyResult>;
}

/// Render the single user prompt sent to the model.
///
/// Snippets are embedded as JSON. The length limits are instructions to the
/// model only.
pub fn build_prompt(request: &GenerationRequest) -> Result<String> {
    let snippets = serde_json::to_string(&request.snippets)?;

    Ok(format!(
        "Generate {headlines} headlines and {descriptions} descriptions in {hl} for {gl} incorporating {snippets}. \
         Guidelines: 1. Write compelling, genuine ad copy based on {keywords}. \
         2. Reflect our brand {brand} in the messaging. \
         Headlines: max {headline_max} chars, Descriptions: max {description_max} chars.",
        headlines = request.headline_count,
        descriptions = request.description_count,
        hl = request.locale.language_code,
        gl = request.locale.country_code,
        snippets = snippets,
        keywords = request.top_keywords.join(", "),
        brand = request.brand,
        headline_max = HEADLINE_MAX_CHARS,
        description_max = DESCRIPTION_MAX_CHARS,
    ))
}

/// `CopyGeneration` backed by Azure OpenAI chat completions
pub struct AzureCopyGenerator {
    client: AzureOpenAiClient,
}

impl AzureCopyGenerator {
    pub fn new(client: AzureOpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CopyGeneration for AzureCopyGenerator {
    async fn generate_ad_copy(&self, request: &GenerationRequest) -> Result<AdCopyResult> {
        let prompt = build_prompt(request)?;

        let text = match self.client.complete_prompt(&prompt).await? {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                warn!("Completion returned no content");
                FALLBACK_AD_COPY.to_string()
            }
        };

        info!("Generated {} characters of ad copy", text.chars().count());
        Ok(AdCopyResult { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Locale, SearchResult};

    #[test]
    fn test_build_prompt() {
        let request = GenerationRequest {
            top_keywords: vec!["vakantiehuis".to_string(), "chalet".to_string()],
            brand: "Belvilla".to_string(),
            snippets: vec![SearchResult::from_parts(Some("Ardennen"), None)],
            headline_count: 20,
            description_count: 8,
            locale: Locale {
                language_code: "nl".to_string(),
                country_code: "BE".to_string(),
            },
        };

        let prompt = build_prompt(&request).unwrap();

        assert_eq!(
            prompt,
            "Generate 20 headlines and 8 descriptions in nl for BE incorporating \
             [{\"title\":\"Ardennen\",\"snippet\":\"N/A\"}]. \
             Guidelines: 1. Write compelling, genuine ad copy based on vakantiehuis, chalet. \
             2. Reflect our brand Belvilla in the messaging. \
             Headlines: max 30 chars, Descriptions: max 90 chars."
        );
    }
}
