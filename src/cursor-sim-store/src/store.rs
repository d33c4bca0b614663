//! The in-memory entity store.
//!
//! Every entity kind is held in a `BTreeMap` keyed by `(canonical
//! timestamp, primary key string)`. Tuple ordering gives range queries
//! ascending-by-timestamp-with-primary-key-tiebreak for free; secondary
//! indexes (`by_owner`, `by_repo`) hold the same composite keys so a
//! lookup by owner or repo stays in timestamp order without a second
//! sort at read time.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

use chrono::{DateTime, Utc};

use crate::entities::{
    AiAssistDailyAggregate, AiAssistEvent, Commit, CopilotActivityEvent, Developer, LegalAiEvent,
    PrState, PullRequest, Repository, ReviewComment, SurveyResponse,
};
use crate::error::StoreError;

type Key = (DateTime<Utc>, String);

/// Lower-inclusive/upper-exclusive range bound over a composite
/// `(timestamp, primary key)` key, independent of the primary key's
/// own value.
fn range_bounds(from: DateTime<Utc>, to: DateTime<Utc>) -> (Bound<Key>, Bound<Key>) {
    (
        Bound::Included((from, String::new())),
        Bound::Excluded((to, String::new())),
    )
}

#[derive(Debug, Default)]
struct TimeIndexed<V> {
    by_key: BTreeMap<Key, V>,
    by_owner: HashMap<String, BTreeSet<Key>>,
    by_repo: HashMap<String, BTreeSet<Key>>,
}

impl<V> TimeIndexed<V> {
    fn insert(
        &mut self,
        entity: &'static str,
        key: Key,
        owner: Option<&str>,
        repo: Option<&str>,
        value: V,
    ) -> Result<(), StoreError> {
        if self.by_key.contains_key(&key) {
            return Err(StoreError::Conflict {
                entity,
                key: format!("{:?}", key),
            });
        }
        if let Some(owner) = owner {
            self.by_owner
                .entry(owner.to_string())
                .or_default()
                .insert(key.clone());
        }
        if let Some(repo) = repo {
            self.by_repo
                .entry(repo.to_string())
                .or_default()
                .insert(key.clone());
        }
        self.by_key.insert(key, value);
        Ok(())
    }

    fn range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<&V> {
        self.by_key.range(range_bounds(from, to)).map(|(_, v)| v).collect()
    }

    fn by_owner(&self, owner: &str) -> Vec<&V> {
        self.by_owner
            .get(owner)
            .into_iter()
            .flatten()
            .filter_map(|k| self.by_key.get(k))
            .collect()
    }

    fn by_repo(&self, repo: &str) -> Vec<&V> {
        self.by_repo
            .get(repo)
            .into_iter()
            .flatten()
            .filter_map(|k| self.by_key.get(k))
            .collect()
    }

    fn len(&self) -> usize {
        self.by_key.len()
    }
}

/// The simulation's entity store. Cheap to query concurrently once
/// built: callers wrap a `Store` in an `Arc` (runtime mode builds it
/// once up front; see `cursor-sim-server`'s orchestrator).
#[derive(Debug, Default)]
pub struct Store {
    read_only: bool,
    developers: HashMap<String, Developer>,
    repositories: HashMap<String, Repository>,
    commits: TimeIndexed<Commit>,
    pull_requests: TimeIndexed<PullRequest>,
    review_comments: TimeIndexed<ReviewComment>,
    ai_assist_events: TimeIndexed<AiAssistEvent>,
    ai_assist_daily: HashMap<(String, chrono::NaiveDate), AiAssistDailyAggregate>,
    legal_ai_events: TimeIndexed<LegalAiEvent>,
    copilot_activity_events: TimeIndexed<CopilotActivityEvent>,
    survey_responses: HashMap<String, Vec<SurveyResponse>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store loaded from a corpus (C7 replay mode) rejects all
    /// writes.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        Ok(())
    }

    // -- developers / repositories ---------------------------------

    pub fn insert_developer(&mut self, developer: Developer) -> Result<(), StoreError> {
        self.check_writable()?;
        if self.developers.contains_key(&developer.user_id) {
            return Err(StoreError::Conflict {
                entity: "developer",
                key: developer.user_id,
            });
        }
        self.developers.insert(developer.user_id.clone(), developer);
        Ok(())
    }

    pub fn get_developer(&self, user_id: &str) -> Option<&Developer> {
        self.developers.get(user_id)
    }

    pub fn developers(&self) -> impl Iterator<Item = &Developer> {
        self.developers.values()
    }

    pub fn insert_repository(&mut self, repository: Repository) -> Result<(), StoreError> {
        self.check_writable()?;
        if self.repositories.contains_key(&repository.name) {
            return Err(StoreError::Conflict {
                entity: "repository",
                key: repository.name,
            });
        }
        self.repositories.insert(repository.name.clone(), repository);
        Ok(())
    }

    pub fn get_repository(&self, name: &str) -> Option<&Repository> {
        self.repositories.get(name)
    }

    pub fn repositories(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.values()
    }

    fn require_developer(&self, user_id: &str, entity: &'static str) -> Result<(), StoreError> {
        if self.developers.contains_key(user_id) {
            Ok(())
        } else {
            Err(StoreError::DanglingReference {
                entity,
                reference_kind: "developer",
                reference: user_id.to_string(),
            })
        }
    }

    fn require_repository(&self, name: &str, entity: &'static str) -> Result<(), StoreError> {
        if self.repositories.contains_key(name) {
            Ok(())
        } else {
            Err(StoreError::DanglingReference {
                entity,
                reference_kind: "repository",
                reference: name.to_string(),
            })
        }
    }

    // -- commits ------------------------------------------------------

    pub fn insert_commit(&mut self, commit: Commit) -> Result<(), StoreError> {
        self.check_writable()?;
        self.require_developer(&commit.user_id, "commit")?;
        self.require_repository(&commit.repo_name, "commit")?;
        let key = (commit.commit_ts, commit.commit_hash.clone());
        self.commits.insert(
            "commit",
            key,
            Some(&commit.user_id),
            Some(&commit.repo_name),
            commit,
        )
    }

    pub fn get_commits_by_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<&Commit> {
        self.commits.range(from, to)
    }

    pub fn get_commits_by_owner(&self, user_id: &str) -> Vec<&Commit> {
        self.commits.by_owner(user_id)
    }

    pub fn get_commits_by_repo(&self, repo_name: &str) -> Vec<&Commit> {
        self.commits.by_repo(repo_name)
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Every commit, ascending by `(commit_ts, commit_hash)`. Used by the
    /// corpus codec (C7) to dump the full table.
    pub fn all_commits(&self) -> Vec<&Commit> {
        self.commits.by_key.values().collect()
    }

    // -- pull requests -------------------------------------------------

    pub fn insert_pull_request(&mut self, pr: PullRequest) -> Result<(), StoreError> {
        self.check_writable()?;
        self.require_developer(&pr.author_id, "pull_request")?;
        self.require_repository(&pr.repo_name, "pull_request")?;
        let pk = format!("{}:{:020}", pr.repo_name, pr.number);
        let key = (pr.canonical_ts(), pk);
        self.pull_requests
            .insert("pull_request", key, Some(&pr.author_id), Some(&pr.repo_name), pr)
    }

    pub fn get_prs_by_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<&PullRequest> {
        self.pull_requests.range(from, to)
    }

    pub fn get_prs_by_owner(&self, author_id: &str) -> Vec<&PullRequest> {
        self.pull_requests.by_owner(author_id)
    }

    pub fn get_prs_by_repo(&self, repo_name: &str) -> Vec<&PullRequest> {
        self.pull_requests.by_repo(repo_name)
    }

    pub fn get_prs_by_repo_and_state(&self, repo_name: &str, state: PrState) -> Vec<&PullRequest> {
        self.pull_requests
            .by_repo(repo_name)
            .into_iter()
            .filter(|pr| pr.state == state)
            .collect()
    }

    pub fn get_pr(&self, repo_name: &str, number: u64) -> Option<&PullRequest> {
        self.pull_requests
            .by_repo(repo_name)
            .into_iter()
            .find(|pr| pr.number == number)
    }

    /// Every pull request, ascending by `(created_at, repo:number)`.
    pub fn all_pull_requests(&self) -> Vec<&PullRequest> {
        self.pull_requests.by_key.values().collect()
    }

    // -- review comments -------------------------------------------------

    pub fn insert_review_comment(&mut self, comment: ReviewComment) -> Result<(), StoreError> {
        self.check_writable()?;
        self.require_repository(&comment.repo_name, "review_comment")?;
        self.require_developer(&comment.author_id, "review_comment")?;
        let pk = format!(
            "{}:{:020}:{:010}",
            comment.repo_name, comment.pr_number, comment.seq
        );
        let key = (comment.ts, pk);
        self.review_comments.insert(
            "review_comment",
            key,
            Some(&comment.author_id),
            Some(&comment.repo_name),
            comment,
        )
    }

    pub fn get_reviews_by_pr(&self, repo_name: &str, pr_number: u64) -> Vec<&ReviewComment> {
        let mut rows: Vec<&ReviewComment> = self
            .review_comments
            .by_repo(repo_name)
            .into_iter()
            .filter(|c| c.pr_number == pr_number)
            .collect();
        rows.sort_by_key(|c| c.seq);
        rows
    }

    /// Every review comment, ascending by `(ts, repo:pr:seq)`.
    pub fn all_review_comments(&self) -> Vec<&ReviewComment> {
        self.review_comments.by_key.values().collect()
    }

    // -- developer-AI assist events -------------------------------------

    pub fn insert_ai_assist_event(&mut self, event: AiAssistEvent) -> Result<(), StoreError> {
        self.check_writable()?;
        self.require_developer(&event.user_id, "ai_assist_event")?;
        let key = (event.ts, event.event_id.clone());
        self.ai_assist_events
            .insert("ai_assist_event", key, Some(&event.user_id), None, event)
    }

    pub fn get_ai_assist_events_by_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<&AiAssistEvent> {
        self.ai_assist_events.range(from, to)
    }

    pub fn get_ai_assist_events_by_owner(&self, user_id: &str) -> Vec<&AiAssistEvent> {
        self.ai_assist_events.by_owner(user_id)
    }

    /// Every developer-AI assist event, ascending by `(ts, event_id)`.
    pub fn all_ai_assist_events(&self) -> Vec<&AiAssistEvent> {
        self.ai_assist_events.by_key.values().collect()
    }

    pub fn insert_ai_assist_daily(
        &mut self,
        aggregate: AiAssistDailyAggregate,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        self.require_developer(&aggregate.user_id, "ai_assist_daily_aggregate")?;
        let key = (aggregate.user_id.clone(), aggregate.date);
        if self.ai_assist_daily.contains_key(&key) {
            return Err(StoreError::Conflict {
                entity: "ai_assist_daily_aggregate",
                key: format!("{:?}", key),
            });
        }
        self.ai_assist_daily.insert(key, aggregate);
        Ok(())
    }

    pub fn get_ai_assist_daily_by_owner(&self, user_id: &str) -> Vec<&AiAssistDailyAggregate> {
        let mut rows: Vec<&AiAssistDailyAggregate> = self
            .ai_assist_daily
            .values()
            .filter(|a| a.user_id == user_id)
            .collect();
        rows.sort_by_key(|a| a.date);
        rows
    }

    /// Every daily AI-assist aggregate, in arbitrary order.
    pub fn all_ai_assist_daily(&self) -> Vec<&AiAssistDailyAggregate> {
        self.ai_assist_daily.values().collect()
    }

    // -- legal-AI events -------------------------------------------------

    pub fn insert_legal_ai_event(&mut self, event: LegalAiEvent) -> Result<(), StoreError> {
        self.check_writable()?;
        let key = (event.ts, format!("{:020}", event.event_id));
        self.legal_ai_events
            .insert("legal_ai_event", key, Some(&event.user), None, event)
    }

    pub fn get_legal_ai_events_by_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<&LegalAiEvent> {
        self.legal_ai_events.range(from, to)
    }

    pub fn get_legal_ai_events_by_owner(&self, user: &str) -> Vec<&LegalAiEvent> {
        self.legal_ai_events.by_owner(user)
    }

    /// Every legal-AI event, ascending by `(ts, event_id)`.
    pub fn all_legal_ai_events(&self) -> Vec<&LegalAiEvent> {
        self.legal_ai_events.by_key.values().collect()
    }

    // -- productivity-assistant (Copilot-shaped) activity ----------------

    pub fn insert_copilot_activity_event(
        &mut self,
        event: CopilotActivityEvent,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let pk = format!("{}:{:?}", event.user_principal_name, event.app);
        let key = (event.ts, pk);
        self.copilot_activity_events.insert(
            "copilot_activity_event",
            key,
            Some(&event.user_principal_name),
            None,
            event,
        )
    }

    pub fn get_copilot_activity_by_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<&CopilotActivityEvent> {
        self.copilot_activity_events.range(from, to)
    }

    pub fn get_copilot_activity_by_owner(&self, user: &str) -> Vec<&CopilotActivityEvent> {
        self.copilot_activity_events.by_owner(user)
    }

    /// Every productivity-assistant activity event, ascending by
    /// `(ts, user:app)`.
    pub fn all_copilot_activity_events(&self) -> Vec<&CopilotActivityEvent> {
        self.copilot_activity_events.by_key.values().collect()
    }

    // -- survey responses --------------------------------------------------

    pub fn insert_survey_response(&mut self, response: SurveyResponse) -> Result<(), StoreError> {
        self.check_writable()?;
        let bucket = self.survey_responses.entry(response.survey_id.clone()).or_default();
        if bucket.iter().any(|r| r.response_id == response.response_id) {
            return Err(StoreError::Conflict {
                entity: "survey_response",
                key: response.response_id,
            });
        }
        bucket.push(response);
        Ok(())
    }

    pub fn get_survey_responses(&self, survey_id: &str) -> Vec<&SurveyResponse> {
        self.survey_responses
            .get(survey_id)
            .map(|rows| rows.iter().collect())
            .unwrap_or_default()
    }

    /// Every survey response across every survey, in arbitrary order.
    pub fn all_survey_responses(&self) -> Vec<&SurveyResponse> {
        self.survey_responses.values().flatten().collect()
    }
}
