//! Analyzer error types.

use thiserror::Error;

/// Errors raised by an analyzer. Callers are expected to catch these
/// and substitute an empty result with a logged warning rather than
/// propagate them to the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("invalid window: since ({since}) must be before until ({until})")]
    InvalidWindow { since: String, until: String },
}
