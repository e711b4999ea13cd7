//! History generator: two-pass long-term background brief from sources

use super::NarrativeGenerator;
use crate::error::Result;
use crate::pipeline::GenerationParams;
use crate::prompts;
use crate::stages;
use crate::twopass::draft_then_verify;
use async_trait::async_trait;
use brief_core::RequestContext;
use brief_llm::LLMProvider;
use std::sync::Arc;

/// Writes a 2-4 paragraph long-term background narrative (origin, creator,
/// purpose, technical milestones, forks, major events) from the numbered
/// source block, optionally citing `(Source N)`. The verify pass removes
/// unsupported specifics and names the aspects the sources do not cover.
pub struct HistoryGenerator {
    provider: Arc<dyn LLMProvider>,
    params: GenerationParams,
}

impl HistoryGenerator {
    /// Create a new history generator
    pub fn new(provider: Arc<dyn LLMProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }
}

#[async_trait]
impl NarrativeGenerator for HistoryGenerator {
    async fn generate(&self, ctx: &RequestContext) -> Result<String> {
        // The context stage guarantees Some after the pipeline runs; when a
        // caller invokes the generator directly, fall back the same way the
        // stage would so the model always sees an explicit gap statement.
        let context_text = ctx
            .context_text
            .clone()
            .unwrap_or_else(|| stages::empty_context_fallback(&ctx.symbol));

        let draft_prompt = prompts::history_draft_prompt(&ctx.symbol, &context_text)?;

        draft_then_verify(
            self.provider.as_ref(),
            &self.params,
            prompts::HISTORIAN_SYSTEM,
            draft_prompt,
            prompts::HISTORY_VERIFIER_SYSTEM,
            |draft| prompts::history_verify_prompt(&ctx.symbol, &context_text, draft),
        )
        .await
    }

    fn name(&self) -> &str {
        "history"
    }
}
