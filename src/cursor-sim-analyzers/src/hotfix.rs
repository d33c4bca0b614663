//! Hotfix analyzer.

use chrono::{DateTime, Duration, Utc};
use cursor_sim_store::{PrState, PullRequest, Store};

use crate::error::AnalyzerError;
use crate::keywords::is_hotfix_candidate;

/// Fraction of `min(changed_files)` treated as the synthetic file
/// overlap between two PRs.
const OVERLAP_FRACTION: f64 = 0.25;

/// Extension palette cycled through when synthesizing overlap file
/// paths.
const EXTENSION_PALETTE: &[&str] = &["rs", "ts", "py", "go", "md"];

/// Deterministic synthetic set of file paths shared between two PRs in
/// the same repo: ~25% of `min(changed_files)`, built from the repo
/// name and a small extension palette cycled by index.
fn overlapping_files(repo_name: &str, a_changed_files: u32, b_changed_files: u32) -> Vec<String> {
    let count = ((a_changed_files.min(b_changed_files) as f64) * OVERLAP_FRACTION).round() as u32;
    (0..count)
        .map(|i| {
            let ext = EXTENSION_PALETTE[i as usize % EXTENSION_PALETTE.len()];
            format!("{repo_name}/file_{i}.{ext}")
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotfixPair {
    pub repo_name: String,
    pub original_pr: u64,
    pub hotfix_pr: u64,
    pub hotfix_merged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotfixReport {
    pub window_hours: u32,
    pub total_prs_merged: usize,
    pub prs_with_hotfix: usize,
    pub hotfix_rate: f64,
    pub hotfix_prs: Vec<HotfixPair>,
}

fn qualifies(p: &PullRequest, q: &PullRequest, window_hours: u32) -> bool {
    let (Some(p_merged), Some(q_merged)) = (p.merged_at, q.merged_at) else { return false };
    let gap = q_merged - p_merged;
    if gap <= Duration::zero() || gap > Duration::hours(window_hours as i64) {
        return false;
    }
    if !is_hotfix_candidate(&q.title, &q.body) {
        return false;
    }
    !overlapping_files(&p.repo_name, p.changed_files, q.changed_files).is_empty()
}

/// Analyze merged PRs in `[since, until)` for hotfix relationships: a
/// subsequent merged PR `Q` in the same repo within `window_hours` of
/// `P`, matching a hotfix keyword and overlapping synthetic files.
pub fn analyze(
    store: &Store,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    window_hours: u32,
) -> Result<HotfixReport, AnalyzerError> {
    if since >= until {
        return Err(AnalyzerError::InvalidWindow { since: since.to_string(), until: until.to_string() });
    }

    let merged: Vec<_> = store
        .get_prs_by_range(since, until)
        .into_iter()
        .filter(|pr| pr.state == PrState::Merged)
        .collect();

    let mut hotfix_prs = Vec::new();
    let mut prs_with_hotfix = std::collections::HashSet::new();

    for p in &merged {
        for q in &merged {
            if p.repo_name != q.repo_name || p.number == q.number {
                continue;
            }
            if qualifies(p, q, window_hours) {
                hotfix_prs.push(HotfixPair {
                    repo_name: p.repo_name.clone(),
                    original_pr: p.number,
                    hotfix_pr: q.number,
                    hotfix_merged_at: q.merged_at.expect("qualifies checked merged_at"),
                });
                prs_with_hotfix.insert((p.repo_name.clone(), p.number));
            }
        }
    }

    let total_prs_merged = merged.len();
    let hotfix_rate = if total_prs_merged == 0 {
        0.0
    } else {
        prs_with_hotfix.len() as f64 / total_prs_merged as f64
    };

    Ok(HotfixReport {
        window_hours,
        total_prs_merged,
        prs_with_hotfix: prs_with_hotfix.len(),
        hotfix_rate,
        hotfix_prs,
    })
}
