//! Fixtures shared by the handler test modules: a small, fully wired
//! [`AppState`] with one developer and a handful of entities across
//! every surface.

#![cfg(test)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use cursor_sim_export::ExportManager;
use cursor_sim_store::{
    ActivityLevel, AiAssistDailyAggregate, CopilotActivityEvent, CopilotApp, Commit, Developer,
    LegalAiEvent, LegalSource, LegalTask, Repository, Seniority, Sentiment, Store, SurveyResponse,
    WorkingHours,
};

use crate::config::{AuthConfig, LoggingConfig, Mode, ServerConfig, Velocity};
use crate::state::{AppState, EnabledSurfaces};

pub fn epoch() -> DateTime<Utc> {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

pub fn developer(user_id: &str) -> Developer {
    Developer {
        user_id: user_id.to_string(),
        email: format!("{user_id}@example.com"),
        name: user_id.to_string(),
        seniority: Seniority::Mid,
        activity_level: ActivityLevel::Medium,
        acceptance_rate: 0.5,
        working_hours: WorkingHours { start: 9, end: 17 },
        preferred_models: vec!["gpt-4o".to_string()],
        model_weights: None,
    }
}

pub fn repository(name: &str) -> Repository {
    Repository { name: name.to_string(), primary_language: "rust".to_string(), age_days: 400 }
}

pub fn commit(hash: &str, user_id: &str, repo_name: &str, ts: DateTime<Utc>, model: &str) -> Commit {
    Commit {
        commit_hash: hash.to_string(),
        user_id: user_id.to_string(),
        user_email: format!("{user_id}@example.com"),
        repo_name: repo_name.to_string(),
        commit_ts: ts,
        total_lines_added: 10,
        total_lines_deleted: 2,
        tab_lines_added: 4,
        composer_lines_added: 0,
        non_ai_lines_added: 6,
        model_used: model.to_string(),
        message: "a change".to_string(),
        pr_number: None,
    }
}

pub fn ai_assist_daily(user_id: &str, date: chrono::NaiveDate, chat: u32, cmd_k: u32) -> AiAssistDailyAggregate {
    AiAssistDailyAggregate { user_id: user_id.to_string(), date, lines_added: 20, ai_lines_added: 8, chat_interactions: chat, cmd_k_usages: cmd_k }
}

pub fn survey_response(response_id: &str, survey_id: &str, ts: DateTime<Utc>) -> SurveyResponse {
    SurveyResponse {
        response_id: response_id.to_string(),
        survey_id: survey_id.to_string(),
        start_date: ts,
        end_date: ts + Duration::minutes(5),
        duration_seconds: 300,
        status: "Complete".to_string(),
        email: "alice@example.com".to_string(),
        department: "Legal".to_string(),
        role: "Associate".to_string(),
        tenure: "1-3 years".to_string(),
        likert_answers: [4, 4, 5, 3, 4, 5, 4, 4],
        additional_comments: "fine".to_string(),
    }
}

fn legal_ai_event(id: i64, ts: DateTime<Utc>, user: &str) -> LegalAiEvent {
    LegalAiEvent {
        event_id: id,
        message_id: format!("msg-{id}"),
        ts,
        user: user.to_string(),
        task: LegalTask::Draft,
        client_matter: "CM-100".to_string(),
        source: LegalSource::Files,
        document_count: 3,
        feedback_comment: "looks good".to_string(),
        feedback_sentiment: Sentiment::Positive,
    }
}

pub fn copilot_event(user_principal_name: &str, app: CopilotApp, ts: DateTime<Utc>) -> CopilotActivityEvent {
    CopilotActivityEvent {
        user_principal_name: user_principal_name.to_string(),
        display_name: user_principal_name.to_string(),
        app,
        ts,
    }
}

fn server_config(mode: Mode) -> ServerConfig {
    ServerConfig {
        mode,
        seed_path: None,
        corpus_path: None,
        corpus_out_path: None,
        port: 8080,
        days: 30,
        velocity: Velocity::Medium,
        max_commits: 0,
        prng_seed: Some(1),
        auth: AuthConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// An `AppState` with all three optional surfaces enabled, one
/// developer, a couple of Harvey events, and a couple of Copilot
/// activity events spread a few days apart.
pub fn state_with_all_surfaces() -> Arc<AppState> {
    let mut store = Store::new();
    store.insert_developer(developer("alice")).unwrap();
    store.insert_legal_ai_event(legal_ai_event(1, epoch(), "alice")).unwrap();
    store.insert_legal_ai_event(legal_ai_event(2, epoch() + Duration::hours(1), "alice")).unwrap();
    store.insert_copilot_activity_event(copilot_event("alice@example.com", CopilotApp::Teams, epoch())).unwrap();
    store
        .insert_copilot_activity_event(copilot_event("alice@example.com", CopilotApp::Word, epoch() + Duration::days(2)))
        .unwrap();

    let surfaces = EnabledSurfaces { harvey: true, copilot: true, qualtrics: true };
    Arc::new(AppState::new(
        server_config(Mode::Runtime),
        Arc::new(store),
        None,
        surfaces,
        vec!["SV_test".to_string()],
        true,
    ))
}

/// An `AppState` with every optional surface disabled.
pub fn state_with_no_surfaces() -> Arc<AppState> {
    let store = Store::new();
    Arc::new(AppState::new(
        server_config(Mode::Runtime),
        Arc::new(store),
        None,
        EnabledSurfaces::default(),
        Vec::new(),
        true,
    ))
}

/// An `AppState` with two developers, two commits on different models,
/// and matching daily AI-assist aggregates, for the developer-AI
/// surface.
pub fn state_with_commits() -> Arc<AppState> {
    let mut store = Store::new();
    store.insert_developer(developer("alice")).unwrap();
    store.insert_developer(developer("bob")).unwrap();
    store.insert_repository(repository("svc")).unwrap();
    store.insert_commit(commit("c1", "alice", "svc", epoch(), "gpt-4o")).unwrap();
    store.insert_commit(commit("c2", "bob", "svc", epoch() + Duration::hours(2), "claude-4-sonnet")).unwrap();
    store.insert_ai_assist_daily(ai_assist_daily("alice", epoch().date_naive(), 5, 2)).unwrap();
    store.insert_ai_assist_daily(ai_assist_daily("bob", epoch().date_naive(), 1, 7)).unwrap();

    Arc::new(AppState::new(
        server_config(Mode::Runtime),
        Arc::new(store),
        None,
        EnabledSurfaces::default(),
        Vec::new(),
        true,
    ))
}

/// An `AppState` with one Copilot activity event and the `ALL`-period
/// full-window flag set as requested, for testing the period-window
/// resolution directly.
pub fn state_with_copilot_window_flag(all_period_is_full_window: bool) -> Arc<AppState> {
    let mut store = Store::new();
    store.insert_copilot_activity_event(copilot_event("alice@example.com", CopilotApp::Teams, epoch())).unwrap();

    Arc::new(AppState::new(
        server_config(Mode::Runtime),
        Arc::new(store),
        None,
        EnabledSurfaces { harvey: false, copilot: true, qualtrics: false },
        Vec::new(),
        all_period_is_full_window,
    ))
}

/// An `AppState` with the Qualtrics surface enabled and backed by a
/// live `ExportManager` over a store with one survey response.
pub fn state_with_export_manager() -> Arc<AppState> {
    let mut store = Store::new();
    store.insert_survey_response(survey_response("R_1", "SV_test", epoch())).unwrap();
    let store = Arc::new(store);
    let manager = Arc::new(ExportManager::with_increment(Arc::clone(&store), 100));

    Arc::new(AppState::new(
        server_config(Mode::Runtime),
        store,
        Some(manager),
        EnabledSurfaces { harvey: false, copilot: false, qualtrics: true },
        vec!["SV_test".to_string()],
        true,
    ))
}
