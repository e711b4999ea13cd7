//! Mode routing
//!
//! Maps a request mode to the one generator that handles it. `Mode` is a
//! closed enum, so the match is exhaustive and an unrecognized-mode failure
//! cannot exist for typed callers; string callers are rejected earlier, in
//! `Mode::from_str`, before any formatting or model call.

use crate::generators::{AnswerGenerator, HistoryGenerator, NarrativeGenerator, OverviewGenerator};
use crate::pipeline::PipelineConfig;
use brief_core::Mode;
use brief_llm::LLMProvider;
use std::sync::Arc;

/// Owns the three generators and dispatches exactly one per request
pub struct Router {
    overview: OverviewGenerator,
    answer: AnswerGenerator,
    history: HistoryGenerator,
}

impl Router {
    /// Create a router with generators wired to the given provider
    pub fn new(provider: Arc<dyn LLMProvider>, config: &PipelineConfig) -> Self {
        Self {
            overview: OverviewGenerator::new(Arc::clone(&provider), config.overview.clone()),
            answer: AnswerGenerator::new(Arc::clone(&provider), config.answer.clone()),
            history: HistoryGenerator::new(provider, config.history.clone()),
        }
    }

    /// Select the generator for a mode
    pub fn route(&self, mode: Mode) -> &dyn NarrativeGenerator {
        match mode {
            Mode::Overview => &self.overview,
            Mode::Answer => &self.answer,
            Mode::History => &self.history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineConfig;
    use async_trait::async_trait;
    use brief_llm::{CompletionRequest, CompletionResponse, LLMProvider};

    struct NullProvider;

    #[async_trait]
    impl LLMProvider for NullProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> brief_llm::Result<CompletionResponse> {
            Err(brief_llm::LLMError::RequestFailed("null provider".to_string()))
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_each_mode_routes_to_its_generator() {
        let router = Router::new(Arc::new(NullProvider), &PipelineConfig::default());

        assert_eq!(router.route(Mode::Overview).name(), "overview");
        assert_eq!(router.route(Mode::Answer).name(), "answer");
        assert_eq!(router.route(Mode::History).name(), "history");
    }
}
