//! Azure OpenAI client implementation
//!
//! Chat completions against a single deployment:
//! `POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
//! with the key in the `api-key` header.

mod models;
pub use models::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, info};

use crate::config::{AzureOpenAiConfig, ConfigProvider};
use crate::core::{AuthenticatedClient, ServiceClient};
use crate::error::{Result, ServiceError};
use crate::services::common::{build_http_client, endpoint_url, parse_error_response, read_json, ClientMetrics, UserAgent};

/// Service name used in error contexts
pub const SERVICE_NAME: &str = "azure_openai";

/// Azure OpenAI client
pub struct AzureOpenAiClient {
    provider: Arc<dyn ConfigProvider>,

    metrics: ClientMetrics,
}

impl AzureOpenAiClient {
    /// Create a client that reads key, endpoint and deployment from `provider`
    pub fn new(provider: Arc<dyn ConfigProvider>) -> Self {
        Self {
            provider,
            metrics: ClientMetrics::default(),
        }
    }

    pub fn config(&self) -> Result<AzureOpenAiConfig> {
        AzureOpenAiConfig::from_provider(&*self.provider)
    }

    /// Create a chat completion on the configured deployment
    pub async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let config = self.config()?;
        let http = build_http_client(
            Some(UserAgent::for_client("azure-openai-client")),
            Some(Duration::from_secs(config.timeout_seconds)),
        )?;

        let endpoint = format!("openai/deployments/{}/chat/completions", config.deployment);
        let url = endpoint_url(&config.endpoint, &endpoint)?;

        debug!(
            "Sending request to Azure OpenAI: POST {} ({} messages)",
            url,
            request.messages.len()
        );

        let start_time = Instant::now();
        let response = http
            .post(url)
            .query(&[("api-version", config.api_version.as_str())])
            .header("api-key", config.api_key.as_str())
            .json(request)
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

        let (completion, bytes): (ChatCompletionResponse, u64) = read_json(SERVICE_NAME, response).await.map_err(|e| {
            self.metrics.record(start_time, false, None);
            e
        })?;
        self.metrics.record(start_time, true, Some(bytes));

        if let Some(ref usage) = completion.usage {
            info!(
                "Azure OpenAI completion used {} tokens ({} prompt, {} completion)",
                usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }

    /// Send a single user prompt and return the first choice's content
    pub async fn complete_prompt(&self, prompt: &str) -> Result<Option<String>> {
        let request = ChatCompletionRequest::new(vec![ChatMessage::user(prompt)]);
        let response = self.chat_completion(&request).await?;
        Ok(response.first_content().map(str::to_string))
    }
}

impl ServiceClient for AzureOpenAiClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn version(&self) -> &str {
        "chat-completions"
    }

    fn metrics(&self) -> HashMap<String, String> {
        self.metrics.as_map()
    }
}

#[async_trait]
impl AuthenticatedClient for AzureOpenAiClient {
    fn auth_type(&self) -> &str {
        "ApiKey"
    }

    async fn auth_headers(&self) -> Result<HashMap<String, String>> {
        let config = self.config()?;

        let mut headers = HashMap::new();
        headers.insert("api-key".to_string(), config.api_key);
        Ok(headers)
    }
}
