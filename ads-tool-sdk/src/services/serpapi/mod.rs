//! SerpAPI client implementation
//!
//! This module provides a client for the SerpAPI search engine API.
//! Authentication travels as the `api_key` query parameter.
//!
//! SerpAPI describes failures with an `{"error": "..."}` document. Such a
//! document is returned as a response without organic results, whatever the
//! status; only transport failures and non-JSON error bodies are errors.

mod models;
pub use models::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::{ConfigProvider, SerpApiConfig};
use crate::core::ServiceClient;
use crate::error::{Result, ServiceError};
use crate::services::common::{build_http_client, endpoint_url, map_error_body, read_json, ClientMetrics, UserAgent};
use crate::util::sanitize_for_logging;

/// Service name used in error contexts
pub const SERVICE_NAME: &str = "serpapi";

const SEARCH_ENDPOINT: &str = "search.json";

/// Message SerpAPI sends in `error` when a query simply has no results
const NO_RESULTS_MESSAGE: &str = "hasn't returned any results";

/// SerpAPI client
pub struct SerpApiClient {
    /// Source of the API key, read on every call
    provider: Arc<dyn ConfigProvider>,

    metrics: ClientMetrics,
}

impl SerpApiClient {
    /// Create a client that reads its API key from `provider`
    pub fn new(provider: Arc<dyn ConfigProvider>) -> Self {
        Self {
            provider,
            metrics: ClientMetrics::default(),
        }
    }

    /// Resolve the current configuration
    pub fn config(&self) -> Result<SerpApiConfig> {
        SerpApiConfig::from_provider(&*self.provider)
    }

    /// Perform a search using the configured engine (Google by default)
    pub async fn google_search(&self, params: GoogleSearchParams) -> Result<SearchResponse> {
        let config = self.config()?;
        let query_params = params.to_query_params();
        self.search_with_engine(&config, &config.engine, query_params).await
    }

    /// Execute a search against `engine` with raw query parameters
    pub async fn search_with_engine(
        &self,
        config: &SerpApiConfig,
        engine: &str,
        mut params: HashMap<String, String>,
    ) -> Result<SearchResponse> {
        params.insert("engine".to_string(), engine.to_string());
        params.insert("api_key".to_string(), config.api_key.clone());

        let http = build_http_client(
            Some(UserAgent::for_client("serpapi-client")),
            Some(Duration::from_secs(config.timeout_seconds)),
        )?;
        let url = endpoint_url(&config.base_url, SEARCH_ENDPOINT)?;

        let start_time = Instant::now();
        let request = http.get(url).query(&params).build()?;
        debug!("Sending request to SerpAPI: GET {}", sanitize_for_logging(request.url().as_str()));

        let response = http.execute(request).await.map_err(|e| {
            self.metrics.record(start_time, false, None);
            ServiceError::from(e).with_context_value("endpoint", SEARCH_ENDPOINT)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("Failed to read error response: {}", e),
            };
            self.metrics.record(start_time, false, None);

            // JSON error documents are answered like a search without results
            if let Some(search) = error_document(&body) {
                warn!(
                    "SerpAPI returned {}: {}",
                    status,
                    search.error.as_deref().unwrap_or_default()
                );
                return Ok(search);
            }

            return Err(map_error_body(SERVICE_NAME, SEARCH_ENDPOINT, status, &body));
        }

        let (search, bytes): (SearchResponse, u64) = read_json(SERVICE_NAME, response).await.map_err(|e| {
            self.metrics.record(start_time, false, None);
            e
        })?;

        match search.error {
            Some(ref message) if search.organic_results.is_none() && message.contains(NO_RESULTS_MESSAGE) => {
                self.metrics.record(start_time, true, Some(bytes));
                info!("SerpAPI returned no results: {}", message);
            }
            Some(ref message) => {
                self.metrics.record(start_time, false, Some(bytes));
                warn!("SerpAPI reported an error: {}", message);
            }
            None => {
                self.metrics.record(start_time, true, Some(bytes));
                info!("SerpAPI returned {} organic results", search.organic().len());
            }
        }

        Ok(search)
    }
}

/// A SerpAPI error document (`{"error": "..."}`), if `body` is one
fn error_document(body: &str) -> Option<SearchResponse> {
    serde_json::from_str::<SearchResponse>(body)
        .ok()
        .filter(|search| search.error.is_some())
}

impl ServiceClient for SerpApiClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn metrics(&self) -> HashMap<String, String> {
        self.metrics.as_map()
    }
}
