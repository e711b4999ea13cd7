//! Error types for the orchestration pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Caller-contract violation, rejected before any model call
    #[error("Invalid request: {0}")]
    Contract(#[from] brief_core::Error),

    /// The language-model capability failed on a draft or verify call
    #[error("Generation failed: {0}")]
    Generation(#[from] brief_llm::LLMError),

    /// A prompt template failed to render (internal defect)
    #[error("Prompt rendering failed: {0}")]
    Prompt(String),
}

impl PipelineError {
    /// Whether this failure is a caller-contract violation (as opposed to a
    /// runtime or environment fault)
    pub fn is_contract(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}
