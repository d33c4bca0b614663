//! Entity generation for `cursor-sim` (components C2 and C4).
//!
//! [`replicate`] is the pure C2 replicator. [`run`] drives every C4
//! generator in the dependency order from the data-flow diagram
//! (commits → PRs → reviews → AI-assist → legal-AI →
//! productivity-assistant → survey responses), inserting everything it
//! produces into a [`cursor_sim_store::Store`].

mod ai_assist;
mod commits;
mod context;
mod copilot_activity;
mod dist;
mod error;
mod legal_ai;
mod pull_requests;
mod replicate;
mod reviews;
mod survey;

pub use context::{simulation_epoch, Prng, SeedContext};
pub use error::GeneratorError;
pub use replicate::replicate;

use cursor_sim_store::Store;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Summary of one generation pass, used for the startup log line.
#[derive(Debug, Default, Clone)]
pub struct GenerationSummary {
    pub developer_count: usize,
    pub repository_count: usize,
    pub commit_count: usize,
    pub pull_request_count: usize,
    pub review_count: usize,
    pub ai_assist_event_count: usize,
    pub legal_ai_event_count: usize,
    pub copilot_activity_event_count: usize,
    pub survey_response_count: usize,
    pub cap_reached: bool,
    pub cancelled: bool,
}

/// Run every C4 generator over `ctx`, writing the result into `store`.
/// Checked for cancellation at each generator's own day-boundary loop;
/// a cancellation mid-run stops remaining generators from being
/// invoked, leaving the store's partial contents usable.
pub fn run(
    ctx: &SeedContext,
    store: &mut Store,
    rng: &mut Prng,
    cancel: &CancellationToken,
) -> Result<GenerationSummary, GeneratorError> {
    let mut summary = GenerationSummary {
        developer_count: ctx.developers.len(),
        repository_count: ctx.repositories.len(),
        ..Default::default()
    };

    for dev in &ctx.developers {
        store.insert_developer(dev.clone())?;
    }
    for repo in &ctx.repositories {
        store.insert_repository(repo.clone())?;
    }

    let commit_batch = commits::generate(ctx, rng, cancel);
    summary.cap_reached = commit_batch.cap_reached;
    summary.cancelled = commit_batch.cancelled;
    let mut commit_rows = commit_batch.commits;
    summary.commit_count = commit_rows.len();

    if summary.cancelled {
        for commit in &commit_rows {
            store.insert_commit(commit.clone())?;
        }
        info!(?summary, "generation cancelled before completion");
        return Ok(summary);
    }

    let prs = pull_requests::generate(&mut commit_rows, ctx.window_end, rng);
    summary.pull_request_count = prs.len();

    for commit in &commit_rows {
        store.insert_commit(commit.clone())?;
    }
    for pr in &prs {
        store.insert_pull_request(pr.clone())?;
    }

    let review_rows = reviews::generate(&prs, &ctx.developers, rng);
    summary.review_count = review_rows.len();
    for review in &review_rows {
        store.insert_review_comment(review.clone())?;
    }

    let ai_assist_batch = ai_assist::generate(ctx, rng, cancel);
    summary.ai_assist_event_count = ai_assist_batch.events.len();
    summary.cancelled = summary.cancelled || ai_assist_batch.cancelled;
    for event in &ai_assist_batch.events {
        store.insert_ai_assist_event(event.clone())?;
    }
    for aggregate in &ai_assist_batch.daily {
        store.insert_ai_assist_daily(aggregate.clone())?;
    }

    let legal_ai_batch = legal_ai::generate(ctx, rng, cancel);
    summary.legal_ai_event_count = legal_ai_batch.events.len();
    summary.cancelled = summary.cancelled || legal_ai_batch.cancelled;
    for event in &legal_ai_batch.events {
        store.insert_legal_ai_event(event.clone())?;
    }

    let copilot_batch = copilot_activity::generate(ctx, rng, cancel);
    summary.copilot_activity_event_count = copilot_batch.events.len();
    for event in &copilot_batch.events {
        store.insert_copilot_activity_event(event.clone())?;
    }

    let survey_rows = survey::generate(ctx, rng);
    summary.survey_response_count = survey_rows.len();
    for response in survey_rows {
        store.insert_survey_response(response)?;
    }

    info!(?summary, "generation complete");
    Ok(summary)
}
