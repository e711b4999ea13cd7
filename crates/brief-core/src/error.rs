//! Caller-contract errors
//!
//! These errors reject a malformed request synchronously, before any
//! formatting stage runs or any model call is made. Collaborator and
//! generation failures live in their own crates.

use crate::context::Mode;
use thiserror::Error;

/// Result type alias for brief-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for caller-contract violations
#[derive(Error, Debug)]
pub enum Error {
    /// The request named a mode outside the three recognized values
    #[error("unsupported request mode: {0}")]
    UnsupportedMode(String),

    /// A field required by the selected mode was missing or empty
    #[error("{mode} request is missing required field `{field}`")]
    MissingField {
        mode: Mode,
        field: &'static str,
    },
}
