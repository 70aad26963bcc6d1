//! Core abstractions for the Ads Tool SDK
//!
//! - `ServiceClient`: identity and request counters shared by every client
//! - `AuthenticatedClient`: produces the auth headers a request needs

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

/// Base trait for all service clients
pub trait ServiceClient: Send + Sync {
    /// The client name/identifier, also used as the error context service
    fn name(&self) -> &str;

    /// Provider API version the client speaks
    fn version(&self) -> &str;

    /// Request counters collected by this client
    fn metrics(&self) -> HashMap<String, String>;
}

/// Trait for clients whose requests carry credentials in headers
#[async_trait]
pub trait AuthenticatedClient: Send + Sync {
    /// Authentication type (e.g., "Bearer", "ApiKey")
    fn auth_type(&self) -> &str;

    /// Build the authentication headers for the next request.
    ///
    /// Credentials are looked up here, so a missing secret fails the
    /// request being prepared and nothing before it.
    async fn auth_headers(&self) -> Result<HashMap<String, String>>;
}
