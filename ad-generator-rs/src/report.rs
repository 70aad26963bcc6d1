//! Progress reporting seam between the pipeline and whatever shows results

use crate::model::{AdCopyResult, KeywordIdea, SearchResult};

/// Receives each pipeline output as soon as it exists.
///
/// Outputs reported before a failure stay reported; nothing is rolled back.
pub trait RunReporter: Send + Sync {
    fn top_keywords(&self, keywords: &[KeywordIdea]);

    fn snippets(&self, snippets: &[SearchResult]);

    fn ad_copy(&self, ad_copy: &AdCopyResult);

    /// A user-facing error message
    fn error(&self, message: &str);
}
