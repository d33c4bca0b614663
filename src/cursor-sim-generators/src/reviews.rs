//! Review-comment generation.

use cursor_sim_store::{Developer, PrState, PullRequest, ReviewComment};

use crate::context::Prng;
use crate::dist::weighted_index;

const REVIEW_TEMPLATES: &[&str] = &[
    "LGTM, one nit below.",
    "Can you add a test for this branch?",
    "Why is this synchronous?",
    "Looks good, merging after CI.",
    "Please rebase on main.",
];

fn pick_reviewer<'a>(developers: &'a [Developer], author_id: &str, rng: &mut Prng) -> &'a str {
    let candidates: Vec<&Developer> = developers.iter().filter(|d| d.user_id != author_id).collect();
    if candidates.is_empty() {
        return author_id;
    }
    let idx = weighted_index(rng, candidates.len(), None);
    &candidates[idx].user_id
}

/// Produce review comments for every merged PR's recorded
/// `review_iterations`, timestamped strictly between `created_at` and
/// `merged_at`.
pub fn generate(prs: &[PullRequest], developers: &[Developer], rng: &mut Prng) -> Vec<ReviewComment> {
    let mut out = Vec::new();
    for pr in prs {
        if pr.state != PrState::Merged || pr.review_iterations == 0 {
            continue;
        }
        let Some(merged_at) = pr.merged_at else { continue };
        let span = (merged_at - pr.created_at).num_milliseconds().max(2);
        for seq in 1..=pr.review_iterations {
            let offset_ms = (span as f64 * (seq as f64 / (pr.review_iterations as f64 + 1.0))) as i64;
            let ts = pr.created_at + chrono::Duration::milliseconds(offset_ms.clamp(1, span - 1));
            let reviewer = pick_reviewer(developers, &pr.author_id, rng);
            let idx = weighted_index(rng, REVIEW_TEMPLATES.len(), None);
            out.push(ReviewComment {
                repo_name: pr.repo_name.clone(),
                pr_number: pr.number,
                seq,
                author_id: reviewer.to_string(),
                ts,
                body: REVIEW_TEMPLATES[idx].to_string(),
            });
        }
    }
    out
}
