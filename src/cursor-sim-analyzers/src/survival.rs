//! Code-survival analyzer.

use chrono::{DateTime, Utc};
use cursor_sim_store::Store;
use rand::Rng;

use crate::error::AnalyzerError;
use crate::Prng;

fn deletion_probability(days_since_cohort: f64) -> f64 {
    (days_since_cohort / 200.0).clamp(0.0, 0.5)
}

fn file_count_for_commit(commit_hash: &str) -> usize {
    // Deterministic 1..=3 spread derived from the commit hash, not the
    // PRNG — keeps the file layout stable across re-seeded analyzer runs.
    1 + (commit_hash.bytes().map(|b| b as usize).sum::<usize>() % 3)
}

fn split_lines(total: u32, parts: usize) -> Vec<u32> {
    if parts == 0 {
        return Vec::new();
    }
    let base = total / parts as u32;
    let mut remainder = total % parts as u32;
    (0..parts)
        .map(|_| {
            let extra = if remainder > 0 { remainder -= 1; 1 } else { 0 };
            base + extra
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperSurvival {
    pub email: String,
    pub lines_added: u32,
    pub lines_surviving: u32,
    pub survival_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalReport {
    pub total_lines_added: u32,
    pub total_lines_surviving: u32,
    pub survival_rate: f64,
    pub by_developer: Vec<DeveloperSurvival>,
}

/// Analyze the code-survival cohort `[cohort_start, cohort_end)` as
/// observed at `observed_at`.
pub fn analyze(
    store: &Store,
    cohort_start: DateTime<Utc>,
    cohort_end: DateTime<Utc>,
    observed_at: DateTime<Utc>,
    rng: &mut Prng,
) -> Result<SurvivalReport, AnalyzerError> {
    if cohort_start >= cohort_end {
        return Err(AnalyzerError::InvalidWindow {
            since: cohort_start.to_string(),
            until: cohort_end.to_string(),
        });
    }

    let commits = store.get_commits_by_range(cohort_start, cohort_end);

    let mut by_email: std::collections::BTreeMap<String, (u32, u32)> = std::collections::BTreeMap::new();
    let mut total_added = 0u32;
    let mut total_surviving = 0u32;

    for commit in commits {
        let days_since = (observed_at - commit.commit_ts).num_days().max(0) as f64;
        let p_delete = deletion_probability(days_since);

        let parts = file_count_for_commit(&commit.commit_hash);
        let shares = split_lines(commit.total_lines_added, parts);

        let mut commit_surviving = 0u32;
        for lines in shares {
            if rng.random_bool(1.0 - p_delete) {
                commit_surviving += lines;
            }
        }

        total_added += commit.total_lines_added;
        total_surviving += commit_surviving;

        let entry = by_email.entry(commit.user_email.clone()).or_insert((0, 0));
        entry.0 += commit.total_lines_added;
        entry.1 += commit_surviving;
    }

    let by_developer = by_email
        .into_iter()
        .map(|(email, (added, surviving))| DeveloperSurvival {
            email,
            lines_added: added,
            lines_surviving: surviving,
            survival_rate: if added == 0 { 0.0 } else { surviving as f64 / added as f64 },
        })
        .collect();

    let survival_rate = if total_added == 0 { 0.0 } else { total_surviving as f64 / total_added as f64 };

    Ok(SurvivalReport {
        total_lines_added: total_added,
        total_lines_surviving: total_surviving,
        survival_rate,
        by_developer,
    })
}
