//! Core domain types for marketbrief
//!
//! This crate defines the types shared by every layer of the workspace:
//! the per-request pipeline state ([`RequestContext`]), the request
//! [`Mode`], the numeric and record types produced by the data
//! collaborators, and the caller-contract error type.

pub mod context;
pub mod error;
pub mod types;

pub use context::{Mode, RequestContext};
pub use error::{Error, Result};
pub use types::{ChartPoint, Indicators, NewsArticle, SourceDoc};
