//! Legal-AI usage event generation.

use cursor_sim_seed::HarveyConfig;
use cursor_sim_store::{LegalAiEvent, LegalSource, LegalTask, Sentiment};
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::context::{Prng, SeedContext};
use crate::dist::{poisson, uniform_f64, weighted_index};

/// `event_id`s start here so a fresh run's ids never collide with a
/// prior run's low range.
const EVENT_ID_OFFSET: i64 = 900_000_000;

const TASKS: [LegalTask; 4] = [LegalTask::Assist, LegalTask::Draft, LegalTask::Review, LegalTask::Research];
const SOURCES: [LegalSource; 3] = [LegalSource::Files, LegalSource::Web, LegalSource::Knowledge];

fn task_weights(config: &HarveyConfig) -> Vec<f64> {
    TASKS.iter().map(|t| *config.task_distribution.get(t.as_str()).unwrap_or(&0.0)).collect()
}

fn document_count(task: LegalTask, rng: &mut Prng) -> u32 {
    let (lo, hi) = match task {
        LegalTask::Assist => (1.0, 3.0),
        LegalTask::Draft | LegalTask::Review => (1.0, 5.0),
        LegalTask::Research => (2.0, 8.0),
    };
    uniform_f64(rng, lo, hi + 1.0) as u32
}

fn sentiment(rng: &mut Prng) -> Sentiment {
    let x = rng.random::<f64>();
    if x < 0.70 {
        Sentiment::Positive
    } else if x < 0.90 {
        Sentiment::Neutral
    } else {
        Sentiment::Negative
    }
}

fn feedback_comment(sentiment: Sentiment, rng: &mut Prng) -> String {
    let pool: &[&str] = match sentiment {
        Sentiment::Positive => &["Saved me an hour of review.", "Exactly the citation I needed.", "Great first draft."],
        Sentiment::Neutral => &["Did the job.", "About what I expected.", "No complaints."],
        Sentiment::Negative => &["Missed the key clause.", "Citation was wrong.", "Took longer than doing it by hand."],
    };
    let idx = weighted_index(rng, pool.len(), None);
    pool[idx].to_string()
}

fn uuid_like(rng: &mut Prng) -> String {
    let bytes: [u8; 16] = std::array::from_fn(|_| rng.random::<u8>());
    uuid::Uuid::from_bytes(bytes).to_string()
}

fn client_matter(config: &HarveyConfig, rng: &mut Prng) -> String {
    if config.client_matters.is_empty() {
        let n = 100 + (rng.random::<u32>() % 900);
        return format!("CM-{n}");
    }
    let idx = weighted_index(rng, config.client_matters.len(), None);
    config.client_matters[idx].clone()
}

#[derive(Debug, Default)]
pub struct LegalAiBatch {
    pub events: Vec<LegalAiEvent>,
    pub cancelled: bool,
}

/// Generate legal-AI usage events for every configured user across the
/// window. A no-op (empty batch) when Harvey is not configured/enabled.
pub fn generate(ctx: &SeedContext, rng: &mut Prng, cancel: &CancellationToken) -> LegalAiBatch {
    let mut batch = LegalAiBatch::default();
    let Some(config) = ctx.external.as_ref().and_then(|e| e.harvey.as_ref()).filter(|h| h.enabled) else {
        return batch;
    };
    let weights = task_weights(config);
    let mut next_id = EVENT_ID_OFFSET;

    for day in ctx.days() {
        if cancel.is_cancelled() {
            batch.cancelled = true;
            break;
        }
        for user in &config.users {
            let activity_mult = ctx
                .developers
                .iter()
                .find(|d| &d.user_id == user)
                .map(|d| d.activity_level.multiplier())
                .unwrap_or(1.0);
            let count = poisson(rng, config.events_per_user_per_day * activity_mult);
            for _ in 0..count {
                let task_idx = weighted_index(rng, TASKS.len(), Some(&weights));
                let task = TASKS[task_idx];
                let source_idx = weighted_index(rng, SOURCES.len(), None);
                let source = SOURCES[source_idx];
                let sent = sentiment(rng);
                let ts = day + chrono::Duration::minutes((uniform_f64(rng, 0.0, 24.0 * 60.0)) as i64);

                batch.events.push(LegalAiEvent {
                    event_id: next_id,
                    message_id: uuid_like(rng),
                    ts,
                    user: user.clone(),
                    task,
                    client_matter: client_matter(config, rng),
                    source,
                    document_count: document_count(task, rng),
                    feedback_comment: feedback_comment(sent, rng),
                    feedback_sentiment: sent,
                });
                next_id += 1;
            }
        }
    }

    batch
}
