//! Corpus codec: a single columnar file covering every
//! entity the store holds, plus the research-metrics row shape, so a
//! replay-mode process can reconstruct a read-only store with
//! identical query semantics to the one that generated it.

mod error;

use cursor_sim_store::{
    AiAssistDailyAggregate, AiAssistEvent, Commit, CopilotActivityEvent, Developer, LegalAiEvent,
    PullRequest, ResearchDataPoint, Repository, ReviewComment, Store, SurveyResponse,
};
use serde::{Deserialize, Serialize};

pub use error::CorpusError;

/// The full contents of the store, flattened to plain vectors for a
/// stable on-disk schema independent of the store's internal indexes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusFile {
    pub developers: Vec<Developer>,
    pub repositories: Vec<Repository>,
    pub commits: Vec<Commit>,
    pub pull_requests: Vec<PullRequest>,
    pub review_comments: Vec<ReviewComment>,
    pub ai_assist_events: Vec<AiAssistEvent>,
    pub ai_assist_daily: Vec<AiAssistDailyAggregate>,
    pub legal_ai_events: Vec<LegalAiEvent>,
    pub copilot_activity_events: Vec<CopilotActivityEvent>,
    pub survey_responses: Vec<SurveyResponse>,
    pub research_data_points: Vec<ResearchDataPoint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub developer_count: usize,
    pub repository_count: usize,
    pub commit_count: usize,
    pub pull_request_count: usize,
    pub review_comment_count: usize,
    pub ai_assist_event_count: usize,
    pub ai_assist_daily_count: usize,
    pub legal_ai_event_count: usize,
    pub copilot_activity_event_count: usize,
    pub survey_response_count: usize,
    pub research_data_point_count: usize,
}

impl CorpusFile {
    /// Snapshot every entity currently in `store`, plus the
    /// already-computed `research_data_points` (typically produced by
    /// the research-metrics aggregator over the same generation run).
    pub fn from_store(store: &Store, research_data_points: Vec<ResearchDataPoint>) -> Self {
        Self {
            developers: store.developers().cloned().collect(),
            repositories: store.repositories().cloned().collect(),
            commits: store.all_commits().into_iter().cloned().collect(),
            pull_requests: store.all_pull_requests().into_iter().cloned().collect(),
            review_comments: store.all_review_comments().into_iter().cloned().collect(),
            ai_assist_events: store.all_ai_assist_events().into_iter().cloned().collect(),
            ai_assist_daily: store.all_ai_assist_daily().into_iter().cloned().collect(),
            legal_ai_events: store.all_legal_ai_events().into_iter().cloned().collect(),
            copilot_activity_events: store.all_copilot_activity_events().into_iter().cloned().collect(),
            survey_responses: store.all_survey_responses().into_iter().cloned().collect(),
            research_data_points,
        }
    }

    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary {
            developer_count: self.developers.len(),
            repository_count: self.repositories.len(),
            commit_count: self.commits.len(),
            pull_request_count: self.pull_requests.len(),
            review_comment_count: self.review_comments.len(),
            ai_assist_event_count: self.ai_assist_events.len(),
            ai_assist_daily_count: self.ai_assist_daily.len(),
            legal_ai_event_count: self.legal_ai_events.len(),
            copilot_activity_event_count: self.copilot_activity_events.len(),
            survey_response_count: self.survey_responses.len(),
            research_data_point_count: self.research_data_points.len(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, CorpusError> {
        bincode::serialize(self).map_err(|e| CorpusError::Encode(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CorpusError> {
        bincode::deserialize(bytes).map_err(|e| CorpusError::Decode(e.to_string()))
    }

    /// Rebuild a read-only store from this corpus. Rows replay through the same precondition checks
    /// as live generation, in dependency order, before the store is
    /// sealed read-only.
    pub fn into_store(self) -> Result<Store, CorpusError> {
        let mut store = Store::new();
        for d in self.developers {
            store.insert_developer(d)?;
        }
        for r in self.repositories {
            store.insert_repository(r)?;
        }
        for c in self.commits {
            store.insert_commit(c)?;
        }
        for pr in self.pull_requests {
            store.insert_pull_request(pr)?;
        }
        for rc in self.review_comments {
            store.insert_review_comment(rc)?;
        }
        for e in self.ai_assist_events {
            store.insert_ai_assist_event(e)?;
        }
        for a in self.ai_assist_daily {
            store.insert_ai_assist_daily(a)?;
        }
        for l in self.legal_ai_events {
            store.insert_legal_ai_event(l)?;
        }
        for c in self.copilot_activity_events {
            store.insert_copilot_activity_event(c)?;
        }
        for s in self.survey_responses {
            store.insert_survey_response(s)?;
        }
        Ok(store.read_only())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cursor_sim_store::{ActivityLevel, Seniority, WorkingHours};

    fn sample_store() -> Store {
        let mut store = Store::new();
        store
            .insert_developer(Developer {
                user_id: "alice".to_string(),
                email: "alice@co".to_string(),
                name: "Alice".to_string(),
                seniority: Seniority::Mid,
                activity_level: ActivityLevel::Medium,
                acceptance_rate: 0.4,
                working_hours: WorkingHours { start: 9, end: 17 },
                preferred_models: vec!["gpt-4o".to_string()],
                model_weights: None,
            })
            .unwrap();
        store
            .insert_repository(cursor_sim_store::Repository {
                name: "r1".to_string(),
                primary_language: "rust".to_string(),
                age_days: 10,
            })
            .unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store
            .insert_commit(Commit {
                commit_hash: "c1".to_string(),
                user_id: "alice".to_string(),
                user_email: "alice@co".to_string(),
                repo_name: "r1".to_string(),
                commit_ts: ts,
                total_lines_added: 20,
                total_lines_deleted: 4,
                tab_lines_added: 10,
                composer_lines_added: 5,
                non_ai_lines_added: 5,
                model_used: "gpt-4o".to_string(),
                message: "initial commit".to_string(),
                pr_number: None,
            })
            .unwrap();
        store
    }

    #[test]
    fn encode_then_decode_preserves_every_row() {
        let store = sample_store();
        let file = CorpusFile::from_store(&store, Vec::new());
        let bytes = file.encode().unwrap();
        let decoded = CorpusFile::decode(&bytes).unwrap();
        assert_eq!(decoded.summary(), file.summary());
        assert_eq!(decoded.commits, file.commits);
    }

    #[test]
    fn replayed_store_is_read_only() {
        let store = sample_store();
        let file = CorpusFile::from_store(&store, Vec::new());
        let replayed = file.into_store().unwrap();
        assert!(replayed.is_read_only());
        assert_eq!(replayed.commit_count(), 1);
    }

    #[test]
    fn read_only_replay_rejects_further_inserts() {
        let store = sample_store();
        let file = CorpusFile::from_store(&store, Vec::new());
        let mut replayed = file.into_store().unwrap();
        let err = replayed
            .insert_repository(cursor_sim_store::Repository {
                name: "r2".to_string(),
                primary_language: "rust".to_string(),
                age_days: 1,
            })
            .unwrap_err();
        assert_eq!(err, cursor_sim_store::StoreError::ReadOnly);
    }
}
