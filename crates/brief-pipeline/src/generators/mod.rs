//! Narrative generators
//!
//! One generator per request mode. All three consume pre-formatted text
//! plus the structured indicators from the request context and produce a
//! grounded narrative. Overview is single-pass (its inputs are already
//! numeric ground truth, so there is no external grounding to violate);
//! Answer and History run the draft/verify two-pass pattern.

pub mod answer;
pub mod history;
pub mod overview;

pub use answer::AnswerGenerator;
pub use history::HistoryGenerator;
pub use overview::OverviewGenerator;

use crate::error::Result;
use async_trait::async_trait;
use brief_core::RequestContext;

/// A narrative generator for one request mode
///
/// Generators are side-effect free: they read the context, call the model,
/// and return the narrative. They never mutate shared state, so a generator
/// call is retry-safe given identical inputs (modulo model non-determinism).
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Produce the narrative for this request
    async fn generate(&self, ctx: &RequestContext) -> Result<String>;

    /// Get the generator's name
    fn name(&self) -> &str;
}
