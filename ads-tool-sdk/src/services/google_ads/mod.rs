//! Google Ads API client
//!
//! Covers the part of the Ads API the keyword planner needs: the OAuth
//! refresh-token exchange and `KeywordPlanIdeaService.GenerateKeywordIdeas`
//! over the REST interface.

mod models;
pub use models::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::config::{ConfigProvider, GoogleAdsConfig};
use crate::core::{AuthenticatedClient, ServiceClient};
use crate::error::{Result, ServiceError};
use crate::services::common::{build_http_client, endpoint_url, parse_error_response, read_json, ClientMetrics, UserAgent};

/// Service name used in error contexts
pub const SERVICE_NAME: &str = "google_ads";

/// Service name of the OAuth token endpoint
pub const OAUTH_SERVICE_NAME: &str = "google_oauth";

/// Tokens are refreshed this long before they expire
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// Strip the dashes of a customer id written as `123-456-7890`
pub fn normalize_customer_id(customer_id: &str) -> Result<String> {
    let digits: String = customer_id.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ServiceError::validation(format!("Invalid customer id: {:?}", customer_id)));
    }

    Ok(digits)
}

/// Google Ads API client
pub struct GoogleAdsClient {
    /// Source of credentials, read on every call
    provider: Arc<dyn ConfigProvider>,

    token: Mutex<Option<CachedToken>>,

    metrics: ClientMetrics,
}

impl GoogleAdsClient {
    /// Create a client that reads its credentials from `provider`
    pub fn new(provider: Arc<dyn ConfigProvider>) -> Self {
        Self {
            provider,
            token: Mutex::new(None),
            metrics: ClientMetrics::default(),
        }
    }

    /// Resolve the current configuration
    pub fn config(&self) -> Result<GoogleAdsConfig> {
        GoogleAdsConfig::from_provider(&*self.provider)
    }

    fn http_client(config: &GoogleAdsConfig) -> Result<Client> {
        build_http_client(
            Some(UserAgent::for_client("google-ads-client")),
            Some(Duration::from_secs(config.timeout_seconds)),
        )
    }

    /// Generate keyword ideas for `customer_id`
    pub async fn generate_keyword_ideas(
        &self,
        customer_id: &str,
        request: &GenerateKeywordIdeasRequest,
    ) -> Result<GenerateKeywordIdeasResponse> {
        let config = self.config()?;
        let http = Self::http_client(&config)?;
        let customer_id = normalize_customer_id(customer_id)?;

        let endpoint = format!("{}/customers/{}:generateKeywordIdeas", config.api_version, customer_id);
        let url = endpoint_url(&config.base_url, &endpoint)?;

        let headers = self.auth_headers_for(&config, &http).await?;

        debug!(
            "Sending request to Google Ads: POST {} ({} seed keywords, {} locations)",
            url,
            request.keyword_seed.keywords.len(),
            request.geo_target_constants.len()
        );

        let start_time = Instant::now();
        let mut builder = http.post(url).json(request);
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| {
                self.metrics.record(start_time, false, None);
                ServiceError::from(e).with_context_value("endpoint", &endpoint)
            })?;

        if !response.status().is_success() {
            let error = parse_error_response(SERVICE_NAME, &endpoint, response).await;
            self.metrics.record(start_time, false, None);
            return Err(error);
        }

        let (ideas, bytes): (GenerateKeywordIdeasResponse, u64) = read_json(SERVICE_NAME, response).await.map_err(|e| {
            self.metrics.record(start_time, false, None);
            e
        })?;
        self.metrics.record(start_time, true, Some(bytes));

        info!("Google Ads returned {} keyword ideas", ideas.results.len());
        Ok(ideas)
    }

    /// Current access token, refreshed through the OAuth endpoint when stale
    async fn access_token(&self, config: &GoogleAdsConfig, http: &Client) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = (*cached).as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.access_token.clone());
        }

        debug!("Refreshing Google Ads access token");

        let form = [
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("refresh_token", config.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = http
            .post(&config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ServiceError::from(e).with_context_value("endpoint", "oauth token"))?;

        if !response.status().is_success() {
            return Err(parse_error_response(OAUTH_SERVICE_NAME, "token", response).await);
        }

        let (token, _): (OAuthTokenResponse, u64) = read_json(OAUTH_SERVICE_NAME, response).await?;
        if token.access_token.is_empty() {
            return Err(ServiceError::authentication("OAuth token endpoint returned an empty access token"));
        }

        let lifetime = token.expires_in.map(Duration::from_secs).unwrap_or(DEFAULT_TOKEN_LIFETIME);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + lifetime,
        });

        Ok(access_token)
    }

    async fn auth_headers_for(&self, config: &GoogleAdsConfig, http: &Client) -> Result<HashMap<String, String>> {
        let access_token = self.access_token(config, http).await?;

        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", access_token));
        headers.insert("developer-token".to_string(), config.developer_token.clone());

        if let Some(ref login_customer_id) = config.login_customer_id {
            headers.insert("login-customer-id".to_string(), normalize_customer_id(login_customer_id)?);
        }

        Ok(headers)
    }
}

impl ServiceClient for GoogleAdsClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn version(&self) -> &str {
        "rest"
    }

    fn metrics(&self) -> HashMap<String, String> {
        self.metrics.as_map()
    }
}

#[async_trait]
impl AuthenticatedClient for GoogleAdsClient {
    fn auth_type(&self) -> &str {
        "Bearer"
    }

    async fn auth_headers(&self) -> Result<HashMap<String, String>> {
        let config = self.config()?;
        let http = Self::http_client(&config)?;
        self.auth_headers_for(&config, &http).await
    }
}
