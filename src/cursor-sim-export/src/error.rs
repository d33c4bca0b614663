use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown progress id: {0}")]
    UnknownProgress(String),

    #[error("unknown file id: {0}")]
    UnknownFile(String),

    #[error("failed to materialize export: {0}")]
    Materialization(String),
}
