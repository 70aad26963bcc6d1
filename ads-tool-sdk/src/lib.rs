//! # Ads Tool SDK
//!
//! Typed clients for the external services behind the ad generator.
//!
//! This crate provides:
//!
//! - A Google Ads keyword planning client (OAuth refresh flow included)
//! - A SerpAPI search client
//! - An Azure OpenAI chat completion client
//! - A shared error system with provider-specific error mapping
//! - Configuration providers (environment, TOML secrets, in-memory)
//!
//! ## Architecture
//!
//! - `ServiceClient`: The base trait for all external service clients
//! - `AuthenticatedClient`: Exposes the authentication headers a client sends
//! - `ConfigProvider`: Source of credentials; clients read it on every call
//!   so a missing secret only fails the call that needs it
//! - `ServiceError`: Comprehensive error handling system

// Re-export core modules
pub mod core;
pub use core::{AuthenticatedClient, ServiceClient};

// Re-export service-specific modules
pub mod services;
pub use services::{azure_openai, google_ads, serpapi};

// Re-export error handling
pub mod error;
pub use error::{ErrorContext, Result, ServiceError};

// Re-export configuration management
pub mod config;
pub use config::{
    CompositeConfigProvider, ConfigProvider, ConfigProviderExt, EnvConfigProvider, MemoryConfigProvider,
    ServiceConfig, TomlConfigProvider,
};

pub mod util;

#[cfg(test)]
mod tests;
