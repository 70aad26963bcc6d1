//! Service-specific client implementations
//!
//! This module contains client implementations for specific external services.

pub mod azure_openai;
pub mod google_ads;
pub mod serpapi;
mod common;

pub use common::{ClientMetrics, UserAgent};
