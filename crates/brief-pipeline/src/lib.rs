//! Narrative orchestration pipeline for marketbrief
//!
//! This crate is the control-flow heart of the workspace. Per request it:
//!
//! 1. Validates the caller contract synchronously (mode fields present).
//! 2. Runs three formatting stages unconditionally and in fixed order:
//!    chart compression, news formatting, source-context building. Stages
//!    are pure by-value transforms; absent inputs are safe no-ops.
//! 3. Routes to exactly one narrative generator by mode.
//! 4. Generates the narrative - single-pass for the overview, the
//!    draft/verify two-pass grounding pattern for answers and history
//!    briefs - and terminates.
//!
//! The pipeline holds no per-request state; share one instance across tasks
//! via `Arc`. Callers substitute the deterministic [`fallback`] narratives
//! when generation fails, so end users always receive some answer.
//!
//! # Example
//!
//! ```rust,ignore
//! use brief_llm::providers::OpenAIProvider;
//! use brief_pipeline::{Pipeline, PipelineConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(OpenAIProvider::from_env()?);
//!     let pipeline = Pipeline::new(provider, PipelineConfig::default());
//!
//!     let brief = pipeline.run_history("BTC", docs).await?;
//!     println!("{brief}");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fallback;
pub mod generators;
pub mod pipeline;
pub mod prompts;
pub mod router;
pub mod stages;
pub mod twopass;

// Re-export main types for convenience
pub use error::{PipelineError, Result};
pub use generators::{AnswerGenerator, HistoryGenerator, NarrativeGenerator, OverviewGenerator};
pub use pipeline::{GenerationParams, Pipeline, PipelineConfig};
pub use router::Router;
