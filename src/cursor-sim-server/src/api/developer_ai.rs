//! The always-on developer-AI surface: commit history, team usage
//! rollups, and the developer roster.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};

use crate::api::types::{CommitsQuery, CommitsResponse, ModelRollup, TeamMember, UserUsageRollup};
use crate::error::AppResult;
use crate::state::AppState;

pub async fn list_commits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CommitsQuery>,
) -> AppResult<Json<CommitsResponse>> {
    let from = query.from.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let to = query.to.unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut commits: Vec<_> = state
        .store
        .get_commits_by_range(from, to)
        .into_iter()
        .filter(|c| query.user.as_deref().is_none_or(|u| c.user_id == u))
        .filter(|c| query.repo.as_deref().is_none_or(|r| c.repo_name == r))
        .cloned()
        .collect();
    commits.sort_by(|a, b| a.commit_ts.cmp(&b.commit_ts).then_with(|| a.commit_hash.cmp(&b.commit_hash)));

    Ok(Json(CommitsResponse { commits }))
}

pub async fn team_models(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<ModelRollup>>> {
    let mut by_model: BTreeMap<String, ModelRollup> = BTreeMap::new();
    for commit in state.store.all_commits() {
        let entry = by_model.entry(commit.model_used.clone()).or_insert_with(|| ModelRollup {
            model: commit.model_used.clone(),
            commit_count: 0,
            total_lines_added: 0,
            ai_lines_added: 0,
        });
        entry.commit_count += 1;
        entry.total_lines_added += commit.total_lines_added;
        entry.ai_lines_added += commit.ai_lines_added();
    }
    Ok(Json(by_model.into_values().collect()))
}

pub async fn team_mcp(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<UserUsageRollup>>> {
    let rollups = state
        .store
        .all_ai_assist_daily()
        .into_iter()
        .fold(BTreeMap::<String, u32>::new(), |mut acc, day| {
            *acc.entry(day.user_id.clone()).or_default() += day.chat_interactions;
            acc
        })
        .into_iter()
        .map(|(user_id, total)| UserUsageRollup { user_id, total })
        .collect();
    Ok(Json(rollups))
}

pub async fn team_commands(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<UserUsageRollup>>> {
    let rollups = state
        .store
        .all_ai_assist_daily()
        .into_iter()
        .fold(BTreeMap::<String, u32>::new(), |mut acc, day| {
            *acc.entry(day.user_id.clone()).or_default() += day.cmd_k_usages;
            acc
        })
        .into_iter()
        .map(|(user_id, total)| UserUsageRollup { user_id, total })
        .collect();
    Ok(Json(rollups))
}

pub async fn team_members(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<TeamMember>>> {
    let mut members: Vec<_> = state
        .store
        .developers()
        .map(|d| TeamMember {
            user_id: d.user_id.clone(),
            name: d.name.clone(),
            email: d.email.clone(),
            seniority: d.seniority,
            activity_level: d.activity_level,
        })
        .collect();
    members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    Ok(Json(members))
}
