//! Pipeline orchestration
//!
//! Wires the formatting stages, router, and generators into the fixed
//! control flow: compress chart -> format news -> build context -> route ->
//! generate -> done. The three formatting stages run unconditionally and in
//! fixed order regardless of mode; a stage whose input is absent is a safe
//! no-op, which keeps the pipeline mode-agnostic. Routing then runs exactly
//! one generator and the pipeline terminates the moment it returns; there is
//! no branching back.

use crate::error::Result;
use crate::router::Router;
use crate::stages;
use brief_core::{ChartPoint, Indicators, NewsArticle, RequestContext, SourceDoc};
use brief_llm::LLMProvider;
use std::sync::Arc;
use tracing::{debug, info};

/// Model parameters for one generator
///
/// Model choice and sampling settings are swappable configuration, not part
/// of the pipeline contract.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Model identifier passed to the provider
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature; None leaves the provider default
    pub temperature: Option<f32>,
}

impl GenerationParams {
    /// Create parameters with the given model and defaults otherwise
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: 1024,
            temperature: None,
        }
    }
}

/// Configuration for the pipeline's three generators
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Overview generation parameters
    pub overview: GenerationParams,

    /// Answer generation parameters (draft and verify passes)
    pub answer: GenerationParams,

    /// History generation parameters (draft and verify passes)
    pub history: GenerationParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            overview: GenerationParams::new("gpt-5-nano"),
            answer: GenerationParams {
                model: "gpt-5-mini".to_string(),
                max_tokens: 2048,
                temperature: None,
            },
            history: GenerationParams {
                model: "gpt-5-nano".to_string(),
                max_tokens: 2048,
                temperature: None,
            },
        }
    }
}

/// The orchestration pipeline
///
/// One instance serves all requests: it holds no per-request state, so it is
/// shareable via `Arc` across concurrent tasks with no locking. Each request
/// threads its own [`RequestContext`] through the stages.
pub struct Pipeline {
    router: Router,
}

impl Pipeline {
    /// Create a pipeline over the given provider and configuration
    pub fn new(provider: Arc<dyn LLMProvider>, config: PipelineConfig) -> Self {
        Self {
            router: Router::new(provider, &config),
        }
    }

    /// Run a request through the full pipeline
    ///
    /// Validates the caller contract synchronously, runs the three
    /// formatting stages in fixed order, dispatches to exactly one
    /// generator, and returns the context with `answer` populated.
    pub async fn run(&self, ctx: RequestContext) -> Result<RequestContext> {
        ctx.validate()?;

        info!(mode = %ctx.mode, symbol = %ctx.symbol, "running pipeline");

        let ctx = stages::compress_chart(ctx);
        let ctx = stages::format_news(ctx);
        let mut ctx = stages::build_context(ctx);

        let generator = self.router.route(ctx.mode);
        debug!("dispatching to {} generator", generator.name());

        let answer = generator.generate(&ctx).await?;
        ctx.answer = Some(answer);

        Ok(ctx)
    }

    /// Generate a price-action overview for a date range
    pub async fn run_overview(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        indicators: Indicators,
        chart: Vec<ChartPoint>,
    ) -> Result<String> {
        let ctx = RequestContext::overview(symbol, start_date, end_date, indicators, chart);
        let ctx = self.run(ctx).await?;
        Ok(ctx.answer.unwrap_or_default())
    }

    /// Answer a free-text question from indicators and news
    pub async fn run_answer(
        &self,
        symbol: &str,
        indicators: Indicators,
        news: Vec<NewsArticle>,
        question: &str,
    ) -> Result<String> {
        let ctx = RequestContext::answer(symbol, indicators, news, question);
        let ctx = self.run(ctx).await?;
        Ok(ctx.answer.unwrap_or_default())
    }

    /// Generate a long-term background brief from source documents
    pub async fn run_history(&self, symbol: &str, docs: Vec<SourceDoc>) -> Result<String> {
        let ctx = RequestContext::history(symbol, docs);
        let ctx = self.run(ctx).await?;
        Ok(ctx.answer.unwrap_or_default())
    }
}
