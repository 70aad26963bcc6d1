//! Google Ads keyword planning data models
//!
//! REST (JSON) shapes of `KeywordPlanIdeaService.GenerateKeywordIdeas`.
//! Field names follow the API's camelCase wire format; int64 fields arrive
//! as JSON strings.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Resource name of a geo target constant
pub fn geo_target_constant_path(location_id: u32) -> String {
    format!("geoTargetConstants/{}", location_id)
}

/// Resource name of a language constant
pub fn language_constant_path(language_id: u32) -> String {
    format!("languageConstants/{}", language_id)
}

/// Network targeted by keyword planning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordPlanNetwork {
    /// Google Search only
    #[default]
    GoogleSearch,
}

/// Seed keywords for idea generation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct KeywordSeed {
    pub keywords: Vec<String>,
}

/// Request body of `customers/{id}:generateKeywordIdeas`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeywordIdeasRequest {
    /// Language constant resource name
    pub language: String,

    /// Geo target constant resource names
    pub geo_target_constants: Vec<String>,

    pub include_adult_keywords: bool,

    pub keyword_plan_network: KeywordPlanNetwork,

    pub keyword_seed: KeywordSeed,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl GenerateKeywordIdeasRequest {
    /// Search-network request without adult keywords, seeded with `keywords`
    pub fn for_seeds(location_ids: &[u32], language_id: u32, keywords: &[String]) -> Self {
        Self {
            language: language_constant_path(language_id),
            geo_target_constants: location_ids.iter().copied().map(geo_target_constant_path).collect(),
            include_adult_keywords: false,
            keyword_plan_network: KeywordPlanNetwork::GoogleSearch,
            keyword_seed: KeywordSeed {
                keywords: keywords.to_vec(),
            },
            page_size: None,
            page_token: None,
        }
    }
}

/// Competition level of a keyword
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordPlanCompetitionLevel {
    #[default]
    Unspecified,
    Low,
    Medium,
    High,
    /// Also used for any value this client does not know
    #[serde(other)]
    Unknown,
}

impl KeywordPlanCompetitionLevel {
    /// Enum name as the API spells it
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Unknown => "UNKNOWN",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for KeywordPlanCompetitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Historical metrics of a keyword idea
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordPlanHistoricalMetrics {
    #[serde(default, deserialize_with = "deserialize_int64")]
    pub avg_monthly_searches: Option<i64>,

    #[serde(default)]
    pub competition: KeywordPlanCompetitionLevel,

    #[serde(default, deserialize_with = "deserialize_int64")]
    pub competition_index: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_int64")]
    pub low_top_of_page_bid_micros: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_int64")]
    pub high_top_of_page_bid_micros: Option<i64>,
}

/// One generated keyword idea
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeywordIdeaResult {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub keyword_idea_metrics: Option<KeywordPlanHistoricalMetrics>,
}

/// Response of `customers/{id}:generateKeywordIdeas`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeywordIdeasResponse {
    #[serde(default)]
    pub results: Vec<GenerateKeywordIdeaResult>,

    #[serde(default)]
    pub next_page_token: Option<String>,

    #[serde(default, deserialize_with = "deserialize_int64")]
    pub total_size: Option<i64>,
}

/// Successful OAuth refresh-token exchange
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,

    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,

    #[serde(default)]
    pub token_type: Option<String>,
}

/// Accepts int64 values encoded either as JSON numbers or as strings
fn deserialize_int64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Number(i64),
        Text(String),
    }

    match Option::<Int64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Int64::Number(n)) => Ok(Some(n)),
        Some(Int64::Text(s)) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
    }
}
