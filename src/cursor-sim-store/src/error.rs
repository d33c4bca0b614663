//! Store error types.

use thiserror::Error;

/// Errors raised by the in-memory store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// An `insert_*` call reused an existing primary key.
    #[error("{entity} with key {key:?} already exists")]
    Conflict { entity: &'static str, key: String },

    /// A commit/PR/etc. referenced a developer or repository that was
    /// never inserted.
    #[error("{entity} referenced unknown {reference_kind} {reference:?}")]
    DanglingReference {
        entity: &'static str,
        reference_kind: &'static str,
        reference: String,
    },

    /// An insert was attempted against a read-only (replay-mode) store
    ///.
    #[error("store is read-only (replay mode)")]
    ReadOnly,
}
