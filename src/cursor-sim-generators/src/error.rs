//! Generator error types.

use thiserror::Error;

/// Errors raised while producing entities from a seed document.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A generator referenced a developer or repository not present in
    /// the seed roster. Fatal — generation preconditions, not
    /// recoverable per-entity failures.
    #[error("unknown {kind} referenced during generation: {id}")]
    UnknownReference { kind: &'static str, id: String },

    /// The store rejected an insert (duplicate primary key, or a
    /// generator ran against a read-only store).
    #[error("store rejected insert: {0}")]
    Store(#[from] cursor_sim_store::StoreError),
}
