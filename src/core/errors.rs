//! Shared error types for the analysis engine.

use thiserror::Error;

/// Error taxonomy for one analysis call.
///
/// Only `Request` and `Syntax` abort a request; failures inside a single
/// metric extractor are recovered locally and reported through
/// [`crate::core::MetricResult::error`] instead. A missing or failing
/// linter collaborator drops the optional quality field and is never an
/// error at this level.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Malformed or missing input; user-fixable, maps to HTTP 400.
    #[error("{0}")]
    Request(String),

    /// Input not parseable under the declared grammar; maps to HTTP 400
    /// with the parser's message surfaced verbatim.
    #[error("{0}")]
    Syntax(String),

    /// Unexpected internal failure; maps to HTTP 500 with the error
    /// chain as diagnostic detail.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AnalyzeError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }
}

/// Result type alias using the engine error taxonomy.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
