//! Answer generator: two-pass question answering over indicators and news

use super::NarrativeGenerator;
use crate::error::Result;
use crate::pipeline::GenerationParams;
use crate::prompts;
use crate::twopass::draft_then_verify;
use async_trait::async_trait;
use brief_core::RequestContext;
use brief_llm::LLMProvider;
use std::sync::Arc;

/// Admission injected when the news stage produced nothing, so the model
/// reasons from an explicit gap instead of an absent input
pub const NO_NEWS_AVAILABLE: &str =
    "No relevant news articles were available for this period.";

/// Answers a free-text question about the asset's move using the numeric
/// indicators and recent news. The draft pass hedges causal claims; the
/// verify pass rewrites the draft against the same inputs, stripping
/// anything ungrounded, and states explicitly when the inputs do not
/// answer the question.
pub struct AnswerGenerator {
    provider: Arc<dyn LLMProvider>,
    params: GenerationParams,
}

impl AnswerGenerator {
    /// Create a new answer generator
    pub fn new(provider: Arc<dyn LLMProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }
}

#[async_trait]
impl NarrativeGenerator for AnswerGenerator {
    async fn generate(&self, ctx: &RequestContext) -> Result<String> {
        let news_text = ctx
            .news_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_NEWS_AVAILABLE);

        let draft_prompt = prompts::answer_draft_prompt(ctx, news_text)?;

        draft_then_verify(
            self.provider.as_ref(),
            &self.params,
            prompts::ANALYST_SYSTEM,
            draft_prompt,
            prompts::ANSWER_VERIFIER_SYSTEM,
            |draft| prompts::answer_verify_prompt(ctx, news_text, draft),
        )
        .await
    }

    fn name(&self) -> &str {
        "answer"
    }
}
