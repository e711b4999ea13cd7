//! LLM provider abstraction for marketbrief
//!
//! This crate provides provider-agnostic types for the one capability the
//! pipeline needs from a language model: submit a prompt, receive text.
//! It includes:
//!
//! - Message types for chat-style completion APIs
//! - Completion request/response types with a fluent builder
//! - The [`LLMProvider`] trait
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
