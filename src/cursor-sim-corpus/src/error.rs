use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to encode corpus: {0}")]
    Encode(String),

    #[error("failed to decode corpus: {0}")]
    Decode(String),

    #[error("corpus row rejected by the store on replay: {0}")]
    Replay(#[from] cursor_sim_store::StoreError),
}
