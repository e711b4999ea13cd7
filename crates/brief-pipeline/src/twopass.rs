//! The draft/verify two-pass generation pattern
//!
//! The system's central design idea: separate fluency from faithfulness.
//! A first call drafts for coverage and fluent prose (cautious speculation
//! allowed); a second call rewrites the draft against the same grounding
//! inputs, removing anything it cannot trace to them. The verify call sees
//! the draft text plus the original inputs and nothing else, which is what
//! makes it a closed-loop grounding check rather than a second independent
//! generation.
//!
//! The two calls are strictly sequential (the verify prompt does not exist
//! until the draft returns) and single-shot: no streaming, no multi-turn
//! memory, no retries.

use crate::error::Result;
use crate::pipeline::GenerationParams;
use brief_llm::{CompletionRequest, LLMProvider, Message};
use tracing::debug;

/// Issue one completion call and return its text
pub async fn complete_text(
    provider: &dyn LLMProvider,
    params: &GenerationParams,
    system: &str,
    prompt: String,
) -> Result<String> {
    let mut builder = CompletionRequest::builder(&params.model)
        .add_message(Message::user(prompt))
        .system(system)
        .max_tokens(params.max_tokens);

    if let Some(temperature) = params.temperature {
        builder = builder.temperature(temperature);
    }

    let response = provider.complete(builder.build()).await?;
    Ok(response.text)
}

/// Run the Draft -> Verify sub-pipeline
///
/// `build_verify_prompt` receives the draft text and renders the verify
/// prompt from it plus whatever grounding inputs the caller closed over.
pub async fn draft_then_verify<F>(
    provider: &dyn LLMProvider,
    params: &GenerationParams,
    draft_system: &str,
    draft_prompt: String,
    verify_system: &str,
    build_verify_prompt: F,
) -> Result<String>
where
    F: FnOnce(&str) -> Result<String>,
{
    let draft = complete_text(provider, params, draft_system, draft_prompt).await?;
    debug!("draft pass complete ({} chars)", draft.len());

    let verify_prompt = build_verify_prompt(&draft)?;
    let verified = complete_text(provider, params, verify_system, verify_prompt).await?;
    debug!("verify pass complete ({} chars)", verified.len());

    Ok(verified)
}
