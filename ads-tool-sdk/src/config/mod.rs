//! Configuration management for service clients
//!
//! Credentials and endpoints reach the clients through the `ConfigProvider`
//! trait, so no client knows where a secret is stored. Providers exist for
//! environment variables, a flat TOML secrets file, in-memory maps and an
//! ordered chain of other providers.
//!
//! Service configurations are resolved lazily: a client asks its provider
//! only when it is about to call its service, so a missing secret surfaces
//! as an error of that call and nothing earlier.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get an integer configuration value
    fn get_int(&self, key: &str) -> Result<i64> {
        let value = self.get_string(key)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| ServiceError::configuration(format!("Invalid integer for key {}: {}", key, e)))
    }

    /// Get a string configuration value, `None` when the key is absent or blank
    fn get_optional(&self, key: &str) -> Option<String> {
        self.get_string(key).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get an integer configuration value with a default
    fn get_int_or(&self, key: &str, default: i64) -> i64 {
        self.get_int(key).unwrap_or(default)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                ServiceError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => ServiceError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// Secrets file provider
///
/// Reads a flat TOML document such as
///
/// ```toml
/// developer_token = "..."
/// serp_api = "..."
/// login_customer_id = 1234567890
/// ```
///
/// Scalar values of any type are returned in their string form. Keys inside
/// tables are addressed with a dotted path (`section.key`).
#[derive(Debug, Clone, Default)]
pub struct TomlConfigProvider {
    values: HashMap<String, String>,
}

impl TomlConfigProvider {
    /// Parse secrets from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e| ServiceError::configuration(format!("Invalid secrets file: {}", e)))?;

        let mut values = HashMap::new();
        flatten_toml("", &table, &mut values);

        Ok(Self { values })
    }

    /// Load secrets from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ServiceError::configuration(format!("Cannot read secrets file {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Number of keys loaded
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn flatten_toml(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            toml::Value::Table(inner) => flatten_toml(&full_key, inner, out),
            toml::Value::String(s) => {
                out.insert(full_key, s.clone());
            }
            toml::Value::Array(_) => {
                log::debug!("Skipping array value for secrets key {}", full_key);
            }
            other => {
                out.insert(full_key, other.to_string());
            }
        }
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Secret not found: {}", key)))
    }
}

/// A composite config provider that tries multiple providers in order
#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain
    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Builder-style variant of `add_provider`
    pub fn with_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.add_provider(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        for provider in &self.providers {
            if let Ok(value) = provider.get_string(key) {
                return Ok(value);
            }
        }

        Err(ServiceError::configuration(format!(
            "Configuration key not found in any provider: {}",
            key
        )))
    }
}

/// Environment prefix of the ad generator's variables (`ADGEN_SERP_API`, ...)
pub const ENV_PREFIX: &str = "ADGEN";

/// Trait for service-specific configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;

    /// Service name
    fn service_name(&self) -> &str;
}

fn timeout_or_default<P: ConfigProvider + ?Sized>(provider: &P, key: &str) -> u64 {
    let seconds = provider.get_int_or(key, 30);
    if seconds <= 0 {
        30
    } else {
        seconds as u64
    }
}

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::configuration(format!("{} is required", what)));
    }
    Ok(())
}

/// Configuration for the Google Ads keyword planning API
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleAdsConfig {
    /// Developer token issued for the Ads API
    pub developer_token: String,

    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// OAuth refresh token
    pub refresh_token: String,

    /// Manager account used to log in, if any
    pub login_customer_id: Option<String>,

    /// API version path segment, e.g. "v21"
    pub api_version: String,

    pub base_url: String,

    /// OAuth token endpoint
    pub token_url: String,

    pub timeout_seconds: u64,
}

impl Default for GoogleAdsConfig {
    fn default() -> Self {
        Self {
            developer_token: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            login_customer_id: None,
            api_version: "v21".to_string(),
            base_url: "https://googleads.googleapis.com".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            timeout_seconds: 30,
        }
    }
}

// Secrets must never reach the logs through a {:?}
impl Debug for GoogleAdsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAdsConfig")
            .field("login_customer_id", &self.login_customer_id)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl GoogleAdsConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            developer_token: provider.get_string("developer_token")?,
            client_id: provider.get_string("client_id")?,
            client_secret: provider.get_string("client_secret")?,
            refresh_token: provider.get_string("refresh_token")?,
            login_customer_id: provider.get_optional("login_customer_id"),
            api_version: provider.get_string_or("google_ads_api_version", &defaults.api_version),
            base_url: provider.get_string_or("google_ads_base_url", &defaults.base_url),
            token_url: provider.get_string_or("google_oauth_token_url", &defaults.token_url),
            timeout_seconds: timeout_or_default(provider, "google_ads_timeout_seconds"),
        };

        config.validate()?;
        Ok(config)
    }
}

impl ServiceConfig for GoogleAdsConfig {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.developer_token, "Google Ads developer token")?;
        require_non_empty(&self.client_id, "Google Ads OAuth client id")?;
        require_non_empty(&self.client_secret, "Google Ads OAuth client secret")?;
        require_non_empty(&self.refresh_token, "Google Ads OAuth refresh token")?;
        require_non_empty(&self.base_url, "Google Ads base URL")?;
        require_non_empty(&self.token_url, "Google OAuth token URL")?;
        Ok(())
    }

    fn service_name(&self) -> &str {
        "google_ads"
    }
}

/// Configuration for SerpAPI
#[derive(Clone, Serialize, Deserialize)]
pub struct SerpApiConfig {
    pub api_key: String,

    pub base_url: String,

    /// Search engine to query
    pub engine: String,

    pub timeout_seconds: u64,
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://serpapi.com".to_string(),
            engine: "google".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Debug for SerpApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiConfig")
            .field("base_url", &self.base_url)
            .field("engine", &self.engine)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl SerpApiConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            api_key: provider.get_string("serp_api")?,
            base_url: provider.get_string_or("serpapi_base_url", &defaults.base_url),
            engine: provider.get_string_or("serpapi_engine", &defaults.engine),
            timeout_seconds: timeout_or_default(provider, "serpapi_timeout_seconds"),
        };

        config.validate()?;
        Ok(config)
    }
}

impl ServiceConfig for SerpApiConfig {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.api_key, "SerpAPI key")?;
        require_non_empty(&self.base_url, "SerpAPI base URL")?;
        require_non_empty(&self.engine, "SerpAPI engine")?;
        Ok(())
    }

    fn service_name(&self) -> &str {
        "serpapi"
    }
}

/// Configuration for an Azure OpenAI chat deployment
#[derive(Clone, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    pub api_key: String,

    /// Resource endpoint, e.g. https://my-resource.openai.azure.com
    pub endpoint: String,

    /// Deployment name of the chat model
    pub deployment: String,

    /// Value of the `api-version` query parameter
    pub api_version: String,

    pub timeout_seconds: u64,
}

impl Default for AzureOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            deployment: "gpt-data".to_string(),
            api_version: "2023-12-01-preview".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Debug for AzureOpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiConfig")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl AzureOpenAiConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            api_key: provider.get_string("openai_api")?,
            endpoint: provider.get_string("openai_endpoint")?,
            deployment: provider.get_string_or("openai_deployment", &defaults.deployment),
            api_version: provider.get_string_or("openai_api_version", &defaults.api_version),
            timeout_seconds: timeout_or_default(provider, "openai_timeout_seconds"),
        };

        config.validate()?;
        Ok(config)
    }
}

impl ServiceConfig for AzureOpenAiConfig {
    fn validate(&self) -> Result<()> {
        require_non_empty(&self.api_key, "Azure OpenAI API key")?;
        require_non_empty(&self.endpoint, "Azure OpenAI endpoint")?;
        require_non_empty(&self.deployment, "Azure OpenAI deployment")?;
        require_non_empty(&self.api_version, "Azure OpenAI API version")?;
        Ok(())
    }

    fn service_name(&self) -> &str {
        "azure_openai"
    }
}
