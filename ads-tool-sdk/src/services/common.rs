//! Common utilities for service clients
//!
//! HTTP client construction, error response parsing and the request
//! counters every client keeps.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::{header, Client};
use url::Url;

use crate::error::{mapping, ErrorContext, Result, ServiceError};
use crate::util::sanitize_for_logging;

/// UserAgent structure for identifying the client to upstream services
#[derive(Debug, Clone)]
pub struct UserAgent {
    pub app_name: String,

    pub version: String,

    /// Optional extra info, usually the client name
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "ad-generator".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("ads-tool-sdk".to_string()),
        }
    }
}

impl UserAgent {
    /// User agent naming a specific client
    pub fn for_client(client: &str) -> Self {
        Self {
            extra: Some(client.to_string()),
            ..Self::default()
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Request counters kept by each client
#[derive(Debug, Default)]
pub struct ClientMetrics {
    request_count: AtomicU64,
    success_count: AtomicU64,
    error_count: AtomicU64,
    bytes_received: AtomicU64,
    /// Latency of the most recent request in milliseconds
    last_latency_ms: AtomicU64,
}

impl ClientMetrics {
    /// Record a finished request
    pub fn record(&self, start_time: Instant, is_success: bool, bytes_received: Option<u64>) {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        if is_success {
            self.success_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }

        if let Some(bytes) = bytes_received {
            self.bytes_received.fetch_add(bytes, Ordering::Relaxed);
        }

        let elapsed = start_time.elapsed().as_millis() as u64;
        self.last_latency_ms.store(elapsed, Ordering::Relaxed);
    }

    /// Get all metrics as a map
    pub fn as_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("request_count".to_string(), self.request_count.load(Ordering::Relaxed).to_string());
        map.insert("success_count".to_string(), self.success_count.load(Ordering::Relaxed).to_string());
        map.insert("error_count".to_string(), self.error_count.load(Ordering::Relaxed).to_string());
        map.insert("bytes_received".to_string(), self.bytes_received.load(Ordering::Relaxed).to_string());
        map.insert("last_latency_ms".to_string(), self.last_latency_ms.load(Ordering::Relaxed).to_string());

        map
    }
}

/// Build a standard HTTP client with default settings
pub fn build_http_client(user_agent: Option<UserAgent>, timeout: Option<Duration>) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    let ua = user_agent.unwrap_or_default().to_string();

    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&ua)
            .map_err(|e| ServiceError::configuration(format!("Invalid user agent: {}", e)))?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout.unwrap_or_else(|| Duration::from_secs(30)))
        .gzip(true)
        .build()
        .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Join a base URL and an endpoint path into a request URL
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&raw).map_err(|e| ServiceError::configuration(format!("Invalid endpoint URL {}: {}", raw, e)))
}

/// Create error context for HTTP requests
pub fn create_error_context(service_name: &str, endpoint: &str, status: reqwest::StatusCode) -> ErrorContext {
    ErrorContext::for_service(service_name)
        .endpoint(endpoint)
        .status_code(status.as_u16())
}

/// Parse an error response into a ServiceError carrying the status code
pub async fn parse_error_response(service_name: &str, endpoint: &str, response: reqwest::Response) -> ServiceError {
    let status = response.status();

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("Failed to read error response: {}", e),
    };

    map_error_body(service_name, endpoint, status, &body)
}

/// Map an already read error body into a ServiceError carrying the status code
pub fn map_error_body(service_name: &str, endpoint: &str, status: reqwest::StatusCode, body: &str) -> ServiceError {
    let mut context = create_error_context(service_name, endpoint, status);

    log::debug!(
        "{} returned {} ({}): {}",
        service_name,
        status,
        mapping::classify_http_error(status),
        sanitize_for_logging(body)
    );

    mapping::map_http_error(status, body, &mut context).with_context(context)
}

/// Read a successful response body as JSON
pub async fn read_json<R>(service_name: &str, response: reqwest::Response) -> Result<(R, u64)>
where
    R: serde::de::DeserializeOwned,
{
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ServiceError::network(format!("Failed to read {} response: {}", service_name, e)))?;

    let value = serde_json::from_slice::<R>(&bytes).map_err(|e| {
        ServiceError::parsing(format!("Failed to parse {} response: {}", service_name, e))
            .with_context(ErrorContext::for_service(service_name))
    })?;

    Ok((value, bytes.len() as u64))
}
