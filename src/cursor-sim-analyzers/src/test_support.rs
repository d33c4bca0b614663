//! Shared fixtures for analyzer unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use cursor_sim_seed::{ActivityLevel, Seniority, WorkingHours};
use cursor_sim_store::{Commit, Developer, PrState, PullRequest, Repository};
use rand::SeedableRng;

use crate::Prng;

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn rng(seed: u64) -> Prng {
    Prng::seed_from_u64(seed)
}

pub fn developer(id: &str, seniority: Seniority, activity: ActivityLevel) -> Developer {
    Developer {
        user_id: id.to_string(),
        email: format!("{id}@co"),
        name: id.to_string(),
        seniority,
        activity_level: activity,
        acceptance_rate: 0.5,
        working_hours: WorkingHours { start: 9, end: 17 },
        preferred_models: vec!["gpt-4o".to_string()],
        model_weights: None,
    }
}

pub fn repository(name: &str) -> Repository {
    Repository { name: name.to_string(), primary_language: "rust".to_string(), age_days: 30 }
}

pub fn commit(hash: &str, user_id: &str, repo_name: &str, ts: DateTime<Utc>, total_added: u32) -> Commit {
    Commit {
        commit_hash: hash.to_string(),
        user_id: user_id.to_string(),
        user_email: format!("{user_id}@co"),
        repo_name: repo_name.to_string(),
        commit_ts: ts,
        total_lines_added: total_added,
        total_lines_deleted: total_added / 5,
        tab_lines_added: total_added / 2,
        composer_lines_added: total_added / 4,
        non_ai_lines_added: total_added - total_added / 2 - total_added / 4,
        model_used: "gpt-4o".to_string(),
        message: "fix edge case".to_string(),
        pr_number: None,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn merged_pr(
    number: u64,
    repo_name: &str,
    author_id: &str,
    created_at: DateTime<Utc>,
    lead_hours: i64,
    changed_files: u32,
    ai_ratio: f64,
) -> PullRequest {
    PullRequest {
        number,
        repo_name: repo_name.to_string(),
        author_id: author_id.to_string(),
        title: "fix edge case (1 commits)".to_string(),
        body: String::new(),
        state: PrState::Merged,
        created_at,
        merged_at: Some(created_at + Duration::hours(lead_hours)),
        closed_at: None,
        changed_files,
        ai_ratio,
        review_iterations: 1,
        linked_commits: vec!["c1".to_string()],
    }
}
