//! SerpAPI data models
//!
//! This module contains type definitions for SerpAPI requests and responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Google search parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GoogleSearchParams {
    /// Search query
    pub q: String,

    /// Country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,

    /// Language code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,

    /// Number of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
}

impl GoogleSearchParams {
    /// Convert parameters to query parameters for the API request
    pub fn to_query_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();

        params.insert("q".to_string(), self.q.clone());

        if let Some(ref gl) = self.gl {
            params.insert("gl".to_string(), gl.clone());
        }

        if let Some(ref hl) = self.hl {
            params.insert("hl".to_string(), hl.clone());
        }

        if let Some(num) = self.num {
            params.insert("num".to_string(), num.to_string());
        }

        params
    }
}

/// Search response from SerpAPI
///
/// Only the parts the snippet search reads are modeled; the rest of the
/// document is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_metadata: Option<SearchMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organic_results: Option<Vec<OrganicResult>>,

    /// Error message, sent with any status (200 included)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Organic results in response order, empty when the block is absent
    pub fn organic(&self) -> &[OrganicResult] {
        self.organic_results.as_deref().unwrap_or(&[])
    }
}

/// Search metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Status (Success, Error, Processing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_endpoint: Option<String>,

    /// Total time taken in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time_taken: Option<f64>,
}

/// One organic search result
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrganicResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}
