//! Overview generator: single-pass price-action summary

use super::NarrativeGenerator;
use crate::error::Result;
use crate::pipeline::GenerationParams;
use crate::prompts;
use crate::twopass::complete_text;
use async_trait::async_trait;
use brief_core::RequestContext;
use brief_llm::LLMProvider;
use std::sync::Arc;

/// Generates a 3-5 sentence description of direction, magnitude,
/// volatility, and major turning points from indicators and the sampled
/// chart. Single-pass: the inputs are numeric ground truth, so no
/// grounding-verification rewrite is needed.
pub struct OverviewGenerator {
    provider: Arc<dyn LLMProvider>,
    params: GenerationParams,
}

impl OverviewGenerator {
    /// Create a new overview generator
    pub fn new(provider: Arc<dyn LLMProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }
}

#[async_trait]
impl NarrativeGenerator for OverviewGenerator {
    async fn generate(&self, ctx: &RequestContext) -> Result<String> {
        let prompt = prompts::overview_prompt(ctx)?;
        complete_text(
            self.provider.as_ref(),
            &self.params,
            prompts::ANALYST_SYSTEM,
            prompt,
        )
        .await
    }

    fn name(&self) -> &str {
        "overview"
    }
}
