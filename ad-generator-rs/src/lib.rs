//! # Ad Generator
//!
//! Turns seed keywords into Google Ads copy:
//!
//! 1. keyword ideas and search volumes from the Google Ads keyword planner
//! 2. the ten highest-volume ideas
//! 3. organic search snippets from SerpAPI
//! 4. headlines and descriptions from an Azure OpenAI deployment
//!
//! The service clients live in `ads_tool_sdk`; this crate holds the domain
//! adapters, the run orchestration and the terminal front end.

pub mod cli;
pub mod copywriter;
pub mod keywords;
pub mod locale;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod snippets;

pub use copywriter::{AzureCopyGenerator, CopyGeneration, FALLBACK_AD_COPY};
pub use keywords::{GoogleAdsKeywordResearch, KeywordResearch, TOP_KEYWORD_LIMIT};
pub use model::*;
pub use pipeline::{KeywordFailurePolicy, Pipeline};
pub use render::TerminalReporter;
pub use report::RunReporter;
pub use snippets::{SerpApiSnippetSearch, SnippetSearch};

#[cfg(test)]
mod tests;
