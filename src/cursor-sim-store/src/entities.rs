//! Entity types held by the in-memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use cursor_sim_seed::{ActivityLevel, Seniority, WorkingHours};

/// A developer after replication (C2); identity + behavior, immutable
/// once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub seniority: Seniority,
    pub activity_level: ActivityLevel,
    pub acceptance_rate: f64,
    pub working_hours: WorkingHours,
    pub preferred_models: Vec<String>,
    pub model_weights: Option<Vec<f64>>,
}

/// A repository, stable for the store's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub primary_language: String,
    pub age_days: u32,
}

/// A single commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub commit_hash: String,
    pub user_id: String,
    pub user_email: String,
    pub repo_name: String,
    pub commit_ts: DateTime<Utc>,
    pub total_lines_added: u32,
    pub total_lines_deleted: u32,
    pub tab_lines_added: u32,
    pub composer_lines_added: u32,
    pub non_ai_lines_added: u32,
    pub model_used: String,
    pub message: String,
    pub pr_number: Option<u64>,
}

impl Commit {
    /// AI-attributed lines, i.e. tab + composer.
    pub fn ai_lines_added(&self) -> u32 {
        self.tab_lines_added + self.composer_lines_added
    }
}

/// Pull request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrState {
    Open,
    Merged,
    Closed,
}

/// A pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub repo_name: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    pub state: PrState,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub changed_files: u32,
    pub ai_ratio: f64,
    pub review_iterations: u32,
    pub linked_commits: Vec<String>,
}

impl PullRequest {
    /// Canonical ordering timestamp for range queries: `created_at`.
    pub fn canonical_ts(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The composite primary key used for tiebreaks and cross-repo
    /// identity: PR numbers are only unique *within* a repo.
    pub fn primary_key(&self) -> (String, u64) {
        (self.repo_name.clone(), self.number)
    }
}

/// One review comment / iteration on a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub repo_name: String,
    pub pr_number: u64,
    /// Monotonically increasing sequence number within the PR.
    pub seq: u32,
    pub author_id: String,
    pub ts: DateTime<Utc>,
    pub body: String,
}

impl ReviewComment {
    pub fn primary_key(&self) -> (String, u64, u32) {
        (self.repo_name.clone(), self.pr_number, self.seq)
    }
}

/// The kind of developer-AI assist event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AiAssistKind {
    SuggestionShown,
    SuggestionAccepted,
    ChatMessage { chars: u32 },
    CommandPrompt,
}

/// A single developer-AI assist event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssistEvent {
    pub event_id: String,
    pub user_id: String,
    pub ts: DateTime<Utc>,
    pub kind: AiAssistKind,
}

/// Daily aggregate derived deterministically from a developer's
/// `AiAssistEvent`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssistDailyAggregate {
    pub user_id: String,
    pub date: chrono::NaiveDate,
    pub lines_added: u32,
    pub ai_lines_added: u32,
    pub chat_interactions: u32,
    pub cmd_k_usages: u32,
}

/// Legal-AI task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalTask {
    Assist,
    Draft,
    Review,
    Research,
}

impl LegalTask {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assist => "Assist",
            Self::Draft => "Draft",
            Self::Review => "Review",
            Self::Research => "Research",
        }
    }
}

/// Legal-AI event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalSource {
    Files,
    Web,
    Knowledge,
}

impl LegalSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Files => "Files",
            Self::Web => "Web",
            Self::Knowledge => "Knowledge",
        }
    }
}

/// Feedback sentiment recorded on a legal-AI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// A legal-AI usage event. `event_id` is a monotonically
/// increasing integer seeded from a large offset so it never collides
/// with a fresh run's low range; `message_id` is a UUID-shaped string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalAiEvent {
    pub event_id: i64,
    pub message_id: String,
    pub ts: DateTime<Utc>,
    pub user: String,
    pub task: LegalTask,
    pub client_matter: String,
    pub source: LegalSource,
    pub document_count: u32,
    pub feedback_comment: String,
    pub feedback_sentiment: Sentiment,
}

/// One productivity-assistant application-activity instant for one
/// tenant user. The report surface computes adoption/last-activity-date
/// views over these by filtering to a requested period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord)]
pub enum CopilotApp {
    Teams,
    Word,
    Excel,
    PowerPoint,
    Outlook,
    OneNote,
    Loop,
    Chat,
}

impl CopilotApp {
    pub const ALL: [CopilotApp; 8] = [
        Self::Teams,
        Self::Word,
        Self::Excel,
        Self::PowerPoint,
        Self::Outlook,
        Self::OneNote,
        Self::Loop,
        Self::Chat,
    ];

    pub fn column_label(self) -> &'static str {
        match self {
            Self::Teams => "Teams",
            Self::Word => "Word",
            Self::Excel => "Excel",
            Self::PowerPoint => "PowerPoint",
            Self::Outlook => "Outlook",
            Self::OneNote => "OneNote",
            Self::Loop => "Loop",
            Self::Chat => "Chat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopilotActivityEvent {
    pub user_principal_name: String,
    pub display_name: String,
    pub app: CopilotApp,
    pub ts: DateTime<Utc>,
}

/// A survey respondent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub response_id: String,
    pub survey_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_seconds: u32,
    pub status: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub tenure: String,
    /// Q1..Q8 Likert answers, 1..=5.
    pub likert_answers: [u8; 8],
    /// Q9 free-text answer.
    pub additional_comments: String,
}

/// Per-PR row used by the research-metrics aggregator. Construction
/// lives in `cursor-sim-analyzers`; the shape is part of the data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchDataPoint {
    pub repo_name: String,
    pub pr_number: u64,
    pub ai_ratio: f64,
    pub coding_lead_time_hours: f64,
    pub review_lead_time_hours: f64,
    pub total_lines_added: u32,
    pub total_lines_deleted: u32,
    pub review_iterations: u32,
    pub reverted: bool,
    pub hotfixed: bool,
}
