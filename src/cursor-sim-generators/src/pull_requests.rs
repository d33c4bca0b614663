//! Pull-request generation: contiguous
//! commits per `(user, repo)` are grouped into PRs by a gap heuristic.

use std::collections::HashMap;

use chrono::Duration;
use cursor_sim_store::{Commit, PrState, PullRequest};

use crate::context::Prng;
use crate::dist::{bernoulli, lognormal_like};

/// Commits further apart than this (on the same repo, by the same
/// author) start a new PR.
const GAP_HOURS: i64 = 48;
/// A PR never absorbs more commits than this, even within the gap
/// window.
const MAX_COMMITS_PER_PR: usize = 15;
/// Probability a PR resolves as closed-without-merge rather than
/// merged or left open.
const CLOSED_UNMERGED_PROBABILITY: f64 = 0.05;

fn ai_ratio(commits: &[&Commit]) -> f64 {
    let total_added: u32 = commits.iter().map(|c| c.total_lines_added).sum();
    if total_added == 0 {
        return 0.0;
    }
    let ai: u32 = commits.iter().map(|c| c.ai_lines_added()).sum();
    (ai as f64 / total_added as f64).clamp(0.0, 1.0)
}

fn synthetic_changed_files(commits: &[&Commit]) -> u32 {
    (commits.len() as u32 * 2).clamp(1, 60)
}

fn pr_title(commits: &[&Commit]) -> String {
    commits
        .first()
        .map(|c| format!("{} ({} commits)", c.message, commits.len()))
        .unwrap_or_default()
}

/// Group `commits` (already filtered to one `(user, repo)` pair,
/// ascending by timestamp) into PR-sized chunks by the gap heuristic.
fn group_by_gap<'a>(commits: &[&'a Commit]) -> Vec<Vec<&'a Commit>> {
    let mut groups: Vec<Vec<&Commit>> = Vec::new();
    for &commit in commits {
        let starts_new_group = match groups.last() {
            Some(group) if group.len() < MAX_COMMITS_PER_PR => {
                let last = group.last().expect("non-empty group");
                (commit.commit_ts - last.commit_ts) > Duration::hours(GAP_HOURS)
            }
            Some(_) => true,
            None => true,
        };
        if starts_new_group {
            groups.push(vec![commit]);
        } else {
            groups.last_mut().expect("just pushed or matched").push(commit);
        }
    }
    groups
}

/// Generate pull requests from every commit in the window, assigning
/// each consumed commit its PR number, and returning the PRs alongside
/// the updated commits (with `pr_number` populated).
pub fn generate(
    commits: &mut [Commit],
    window_end: chrono::DateTime<chrono::Utc>,
    rng: &mut Prng,
) -> Vec<PullRequest> {
    let mut by_pair: HashMap<(String, String), Vec<usize>> = HashMap::new();
    for (idx, c) in commits.iter().enumerate() {
        by_pair
            .entry((c.user_id.clone(), c.repo_name.clone()))
            .or_default()
            .push(idx);
    }

    let mut next_number: HashMap<String, u64> = HashMap::new();
    let mut prs = Vec::new();

    let mut pairs: Vec<(String, String)> = by_pair.keys().cloned().collect();
    pairs.sort();

    for pair in pairs {
        let mut indices = by_pair.remove(&pair).unwrap_or_default();
        indices.sort_by_key(|&i| commits[i].commit_ts);
        let refs: Vec<&Commit> = indices.iter().map(|&i| &commits[i]).collect();
        let groups = group_by_gap(&refs);

        for group in groups {
            let repo_name = group[0].repo_name.clone();
            let author_id = group[0].user_id.clone();
            let created_at = group[0].commit_ts;
            let changed_files = synthetic_changed_files(&group);
            let ratio = ai_ratio(&group);
            let linked_commits: Vec<String> = group.iter().map(|c| c.commit_hash.clone()).collect();
            let title = pr_title(&group);

            let number_slot = next_number.entry(repo_name.clone()).or_insert(0);
            *number_slot += 1;
            let number = *number_slot;

            let (state, merged_at, closed_at, review_iterations) = if bernoulli(rng, CLOSED_UNMERGED_PROBABILITY)
            {
                let closed_at = created_at + Duration::hours(lognormal_like(rng, 24.0, 0.5) as i64);
                (PrState::Closed, None, Some(closed_at), 0)
            } else {
                let lead_hours = lognormal_like(rng, 12.0 + changed_files as f64 * 1.5, 0.6);
                let candidate_merge = created_at + Duration::hours(lead_hours as i64 + 1);
                if candidate_merge >= window_end {
                    (PrState::Open, None, None, 0)
                } else {
                    let iterations = crate::dist::geometric_like(rng, 1.6, 8);
                    (PrState::Merged, Some(candidate_merge), None, iterations)
                }
            };

            for &idx in &indices {
                commits[idx].pr_number = Some(number);
            }

            prs.push(PullRequest {
                number,
                repo_name,
                author_id,
                title,
                body: "Generated change set.".to_string(),
                state,
                created_at,
                merged_at,
                closed_at,
                changed_files,
                ai_ratio: ratio,
                review_iterations,
                linked_commits,
            });
        }
    }

    prs
}
