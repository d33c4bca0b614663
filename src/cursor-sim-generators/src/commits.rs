//! Commit generation.

use chrono::{DateTime, Duration, Utc};
use cursor_sim_seed::Seniority;
use cursor_sim_store::Commit;
use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::context::{Prng, SeedContext};
use crate::dist::{lognormal_like, poisson, uniform_f64, weighted_index};

/// Per-developer-per-day daily base arrival rate, before the
/// activity/velocity multipliers are applied.
const BASE_DAILY_RATE: f64 = 1.1;

fn seniority_median_lines(seniority: Seniority) -> f64 {
    match seniority {
        Seniority::Junior => 35.0,
        Seniority::Mid => 65.0,
        Seniority::Senior => 110.0,
    }
}

fn commit_timestamp(day: DateTime<Utc>, start_hour: u8, end_hour: u8, rng: &mut Prng) -> DateTime<Utc> {
    let span_seconds = ((end_hour.max(start_hour) - start_hour) as i64 + 1) * 3600 - 1;
    let offset = if span_seconds > 0 {
        rng.random_range(0..=span_seconds)
    } else {
        0
    };
    day + Duration::hours(start_hour as i64) + Duration::seconds(offset)
}

fn pick_model(rng: &mut Prng, models: &[String], weights: Option<&[f64]>) -> String {
    if models.is_empty() {
        return "gpt-4o".to_string();
    }
    let idx = weighted_index(rng, models.len(), weights);
    models[idx].clone()
}

/// The outcome of a single generation pass: the commits produced, and
/// whether `max_commits`/cancellation cut it short.
#[derive(Debug, Default)]
pub struct CommitBatch {
    pub commits: Vec<Commit>,
    pub cap_reached: bool,
    pub cancelled: bool,
}

/// Generate every commit in the context's window, honoring
/// `max_commits` (0 = unlimited) and the cancellation token, checked at
/// day boundaries.
pub fn generate(ctx: &SeedContext, rng: &mut Prng, cancel: &CancellationToken) -> CommitBatch {
    let mut batch = CommitBatch::default();
    if ctx.repositories.is_empty() || ctx.developers.is_empty() {
        return batch;
    }

    for day in ctx.days() {
        if cancel.is_cancelled() {
            batch.cancelled = true;
            break;
        }

        let mut day_commits: Vec<Commit> = Vec::new();
        for dev in &ctx.developers {
            let lambda =
                BASE_DAILY_RATE * dev.activity_level.multiplier() * ctx.velocity.multiplier();
            let count = poisson(rng, lambda);
            for _ in 0..count {
                let repo_idx = weighted_index(rng, ctx.repositories.len(), None);
                let repo = &ctx.repositories[repo_idx];
                let ts = commit_timestamp(day, dev.working_hours.start, dev.working_hours.end, rng);

                let total_added = lognormal_like(rng, seniority_median_lines(dev.seniority), 0.6)
                    .round()
                    .max(1.0) as u32;
                let total_deleted =
                    (total_added as f64 * uniform_f64(rng, 0.05, 0.35)).round() as u32;

                let ai_lines = (total_added as f64 * dev.acceptance_rate).round() as u32;
                let tab_share = uniform_f64(rng, 0.6, 0.8);
                let tab_lines = (ai_lines as f64 * tab_share).round() as u32;
                let composer_lines = ai_lines - tab_lines;
                let non_ai_lines = total_added - ai_lines;

                let model = pick_model(
                    rng,
                    &dev.preferred_models,
                    dev.model_weights.as_deref(),
                );

                let ts_nanos = ts.timestamp_nanos_opt().unwrap_or_default();
                let label = format!("{}-{}-{ts_nanos}", dev.user_id, repo.name);
                let hash = format!("{:x}", md5_like_hash(&label, rng));

                day_commits.push(Commit {
                    commit_hash: hash,
                    user_id: dev.user_id.clone(),
                    user_email: dev.email.clone(),
                    repo_name: repo.name.clone(),
                    commit_ts: ts,
                    total_lines_added: total_added,
                    total_lines_deleted: total_deleted,
                    tab_lines_added: tab_lines,
                    composer_lines_added: composer_lines,
                    non_ai_lines_added: non_ai_lines,
                    model_used: model,
                    message: commit_message(rng),
                    pr_number: None,
                });
            }
        }
        day_commits.sort_by(|a, b| a.commit_ts.cmp(&b.commit_ts).then(a.commit_hash.cmp(&b.commit_hash)));
        batch.commits.extend(day_commits);

        if ctx.max_commits > 0 && batch.commits.len() as u64 >= ctx.max_commits {
            batch.commits.truncate(ctx.max_commits as usize);
            batch.cap_reached = true;
            debug!(max_commits = ctx.max_commits, "commit cap reached, halting generation");
            break;
        }
    }

    batch
}

/// A 128-bit-looking hex id derived from the PRNG stream plus a
/// distinguishing label, standing in for a real VCS commit hash.
fn md5_like_hash(label: &str, rng: &mut Prng) -> u128 {
    let mut acc: u128 = 0;
    for byte in label.bytes() {
        acc = acc.wrapping_mul(31).wrapping_add(byte as u128);
    }
    acc ^= (rng.random::<u64>() as u128) << 32;
    acc
}

const COMMIT_MESSAGE_TEMPLATES: &[&str] = &[
    "update logic",
    "refactor module",
    "add tests",
    "fix edge case",
    "improve performance",
    "wire up config",
    "clean up imports",
    "address review feedback",
];

fn commit_message(rng: &mut Prng) -> String {
    let idx = weighted_index(rng, COMMIT_MESSAGE_TEMPLATES.len(), None);
    COMMIT_MESSAGE_TEMPLATES[idx].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_sim_seed::Velocity;
    use cursor_sim_store::{ActivityLevel, Developer, Repository, WorkingHours};
    use rand::SeedableRng;

    fn ctx(max_commits: u64, days: u32) -> SeedContext {
        let dev = Developer {
            user_id: "alice".to_string(),
            email: "alice@co".to_string(),
            name: "Alice".to_string(),
            seniority: Seniority::Senior,
            activity_level: ActivityLevel::High,
            acceptance_rate: 0.8,
            working_hours: WorkingHours { start: 9, end: 17 },
            preferred_models: vec!["gpt-4o".to_string()],
            model_weights: None,
        };
        let repo = Repository {
            name: "repo1".to_string(),
            primary_language: "rust".to_string(),
            age_days: 100,
        };
        let window_start = crate::context::simulation_epoch();
        SeedContext {
            developers: vec![dev],
            repositories: vec![repo],
            window_start,
            window_end: window_start + Duration::days(days as i64),
            velocity: Velocity::High,
            max_commits,
            external: None,
        }
    }

    #[test]
    fn every_commit_satisfies_the_line_split_invariant() {
        let context = ctx(0, 14);
        let mut rng = Prng::seed_from_u64(42);
        let batch = generate(&context, &mut rng, &CancellationToken::new());
        assert!(!batch.commits.is_empty());
        for c in &batch.commits {
            assert_eq!(
                c.tab_lines_added + c.composer_lines_added + c.non_ai_lines_added,
                c.total_lines_added
            );
        }
    }

    #[test]
    fn commits_are_within_the_window() {
        let context = ctx(0, 7);
        let mut rng = Prng::seed_from_u64(42);
        let batch = generate(&context, &mut rng, &CancellationToken::new());
        for c in &batch.commits {
            assert!(c.commit_ts >= context.window_start);
            assert!(c.commit_ts < context.window_end);
        }
    }

    #[test]
    fn max_commits_caps_the_total() {
        let context = ctx(50, 30);
        let mut rng = Prng::seed_from_u64(42);
        let batch = generate(&context, &mut rng, &CancellationToken::new());
        assert!(batch.commits.len() as u64 <= 50);
        assert!(batch.cap_reached);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let context = ctx(0, 7);
        let mut rng_a = Prng::seed_from_u64(42);
        let mut rng_b = Prng::seed_from_u64(42);
        let a = generate(&context, &mut rng_a, &CancellationToken::new());
        let b = generate(&context, &mut rng_b, &CancellationToken::new());
        assert_eq!(a.commits.len(), b.commits.len());
        assert_eq!(a.commits.first().map(|c| c.commit_ts), b.commits.first().map(|c| c.commit_ts));
        let sum_a: u32 = a.commits.iter().map(|c| c.total_lines_added).sum();
        let sum_b: u32 = b.commits.iter().map(|c| c.total_lines_added).sum();
        assert_eq!(sum_a, sum_b);
    }

    #[test]
    fn cancellation_stops_generation_at_a_day_boundary() {
        let context = ctx(0, 30);
        let mut rng = Prng::seed_from_u64(42);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let batch = generate(&context, &mut rng, &cancel);
        assert!(batch.cancelled);
        assert!(batch.commits.is_empty());
    }
}
