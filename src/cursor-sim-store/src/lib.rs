//! The in-memory entity store for `cursor-sim` (component C3).
//!
//! `Store` holds every entity produced by a generation run and exposes
//! the indexed lookups the HTTP surfaces and analyzers need: primary-key
//! inserts that are idempotent (duplicate keys are a precondition
//! violation, not silently ignored), `[from, to)` range queries ordered
//! by canonical timestamp with primary-key tiebreak, and owner/repo
//! filters. A `Store` built from a replayed corpus (C7) is read-only;
//! every `insert_*` on it fails with `StoreError::ReadOnly`.

mod entities;
mod error;
mod store;

pub use entities::{
    ActivityLevel, AiAssistDailyAggregate, AiAssistEvent, AiAssistKind, Commit, CopilotActivityEvent,
    CopilotApp, Developer, LegalAiEvent, LegalSource, LegalTask, PrState, PullRequest,
    ResearchDataPoint, Repository, ReviewComment, Seniority, Sentiment, SurveyResponse,
    WorkingHours,
};
pub use error::StoreError;
pub use store::Store;
