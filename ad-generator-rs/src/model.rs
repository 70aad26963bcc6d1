//! Domain types shared by the pipeline steps
//!
//! Every value here lives for a single run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locale::{Country, Language};

/// Placeholder shown for a search result field the provider left out
pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

/// Advisory length limits passed to the copy model; never enforced
pub const HEADLINE_MAX_CHARS: usize = 30;
pub const DESCRIPTION_MAX_CHARS: usize = 90;

/// Competition level of a keyword as reported by Google Ads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionLevel {
    #[default]
    Unspecified,
    Unknown,
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CompetitionLevel::Unspecified => "UNSPECIFIED",
            CompetitionLevel::Unknown => "UNKNOWN",
            CompetitionLevel::Low => "LOW",
            CompetitionLevel::Medium => "MEDIUM",
            CompetitionLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A keyword suggestion with its search statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordIdea {
    pub text: String,
    pub avg_monthly_searches: u64,
    pub competition: CompetitionLevel,
}

impl KeywordIdea {
    pub fn new(text: impl Into<String>, avg_monthly_searches: u64, competition: CompetitionLevel) -> Self {
        Self {
            text: text.into(),
            avg_monthly_searches,
            competition,
        }
    }
}

/// One organic search result; both fields are always populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
}

impl SearchResult {
    /// Build a result, substituting the placeholder for missing fields
    pub fn from_parts(title: Option<&str>, snippet: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or(MISSING_FIELD_PLACEHOLDER).to_string(),
            snippet: snippet.unwrap_or(MISSING_FIELD_PLACEHOLDER).to_string(),
        }
    }
}

/// Language and country hints (`hl`, `gl`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub language_code: String,
    pub country_code: String,
}

impl Locale {
    pub fn new(language: &Language, country: &Country) -> Self {
        Self {
            language_code: language.code.to_string(),
            country_code: country.code.to_string(),
        }
    }
}

/// Everything the copy generator needs for one completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub top_keywords: Vec<String>,
    pub brand: String,
    pub snippets: Vec<SearchResult>,
    pub headline_count: u32,
    pub description_count: u32,
    pub locale: Locale,
}

/// Raw, unstructured completion text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopyResult {
    pub text: String,
}

/// User parameters of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    pub seed_keywords: Vec<String>,
    pub language: Language,
    pub country: Country,
    pub brand: String,
    pub headline_count: u32,
    pub description_count: u32,
    pub customer_id: String,
}

/// The three outputs of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub top_keywords: Vec<KeywordIdea>,
    pub snippets: Vec<SearchResult>,
    pub ad_copy: AdCopyResult,
}

/// Split comma-separated seed keywords, trimming entries and dropping empty ones
pub fn parse_seed_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_keywords() {
        assert_eq!(
            parse_seed_keywords(" vakantiehuis , ardennen,,  "),
            vec!["vakantiehuis".to_string(), "ardennen".to_string()]
        );
        assert!(parse_seed_keywords(" , ").is_empty());
    }

    #[test]
    fn test_search_result_placeholders() {
        let result = SearchResult::from_parts(None, Some("Boek nu"));
        assert_eq!(result.title, "N/A");
        assert_eq!(result.snippet, "Boek nu");
    }

    #[test]
    fn test_competition_labels() {
        assert_eq!(CompetitionLevel::default().to_string(), "UNSPECIFIED");
        assert_eq!(CompetitionLevel::High.to_string(), "HIGH");
        assert_eq!(serde_json::to_string(&CompetitionLevel::Medium).unwrap(), "\"MEDIUM\"");
    }
}
