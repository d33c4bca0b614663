//! Developer-AI assist event generation.

use std::collections::BTreeMap;

use cursor_sim_store::{AiAssistDailyAggregate, AiAssistEvent, AiAssistKind, Developer};
use tokio_util::sync::CancellationToken;

use crate::context::{Prng, SeedContext};
use crate::dist::{bernoulli, poisson, uniform_f64};

const SUGGESTIONS_BASE_RATE: f64 = 6.0;
const CHAT_BASE_RATE: f64 = 1.2;
const COMMAND_BASE_RATE: f64 = 0.8;

#[derive(Debug, Default)]
pub struct AiAssistBatch {
    pub events: Vec<AiAssistEvent>,
    pub daily: Vec<AiAssistDailyAggregate>,
    pub cancelled: bool,
}

fn event_id(user_id: &str, day_index: usize, seq: usize) -> String {
    format!("aie-{user_id}-{day_index}-{seq}")
}

fn gen_for_developer_day(
    dev: &Developer,
    day: chrono::DateTime<chrono::Utc>,
    day_index: usize,
    velocity_mult: f64,
    rng: &mut Prng,
    events: &mut Vec<AiAssistEvent>,
) -> AiAssistDailyAggregate {
    let act_mult = dev.activity_level.multiplier() * velocity_mult;
    let mut seq = 0usize;
    let mut ai_lines_added = 0u32;
    let mut chat_interactions = 0u32;
    let mut cmd_k_usages = 0u32;

    let shown = poisson(rng, SUGGESTIONS_BASE_RATE * act_mult);
    for _ in 0..shown {
        let ts = day + chrono::Duration::minutes(rng_minute_offset(rng));
        events.push(AiAssistEvent {
            event_id: event_id(&dev.user_id, day_index, seq),
            user_id: dev.user_id.clone(),
            ts,
            kind: AiAssistKind::SuggestionShown,
        });
        seq += 1;

        if bernoulli(rng, dev.acceptance_rate) {
            events.push(AiAssistEvent {
                event_id: event_id(&dev.user_id, day_index, seq),
                user_id: dev.user_id.clone(),
                ts: ts + chrono::Duration::seconds(1),
                kind: AiAssistKind::SuggestionAccepted,
            });
            seq += 1;
            ai_lines_added += uniform_f64(rng, 1.0, 12.0).round() as u32;
        }
    }

    let chats = poisson(rng, CHAT_BASE_RATE * act_mult);
    for _ in 0..chats {
        let ts = day + chrono::Duration::minutes(rng_minute_offset(rng));
        let chars = uniform_f64(rng, 20.0, 400.0).round() as u32;
        events.push(AiAssistEvent {
            event_id: event_id(&dev.user_id, day_index, seq),
            user_id: dev.user_id.clone(),
            ts,
            kind: AiAssistKind::ChatMessage { chars },
        });
        seq += 1;
        chat_interactions += 1;
    }

    let commands = poisson(rng, COMMAND_BASE_RATE * act_mult);
    for _ in 0..commands {
        let ts = day + chrono::Duration::minutes(rng_minute_offset(rng));
        events.push(AiAssistEvent {
            event_id: event_id(&dev.user_id, day_index, seq),
            user_id: dev.user_id.clone(),
            ts,
            kind: AiAssistKind::CommandPrompt,
        });
        seq += 1;
        cmd_k_usages += 1;
    }

    AiAssistDailyAggregate {
        user_id: dev.user_id.clone(),
        date: day.date_naive(),
        lines_added: ai_lines_added,
        ai_lines_added,
        chat_interactions,
        cmd_k_usages,
    }
}

fn rng_minute_offset(rng: &mut Prng) -> i64 {
    uniform_f64(rng, 0.0, 24.0 * 60.0) as i64
}

/// Generate developer-AI assist events and their per-day aggregates
/// for every developer in the window, checked for cancellation at
/// each day boundary.
pub fn generate(ctx: &SeedContext, rng: &mut Prng, cancel: &CancellationToken) -> AiAssistBatch {
    let mut batch = AiAssistBatch::default();
    let velocity_mult = ctx.velocity.multiplier();
    let mut aggregates: BTreeMap<(String, chrono::NaiveDate), AiAssistDailyAggregate> = BTreeMap::new();

    for (day_index, day) in ctx.days().enumerate() {
        if cancel.is_cancelled() {
            batch.cancelled = true;
            break;
        }
        for dev in &ctx.developers {
            let aggregate = gen_for_developer_day(dev, day, day_index, velocity_mult, rng, &mut batch.events);
            aggregates.insert((dev.user_id.clone(), aggregate.date), aggregate);
        }
    }

    batch.daily = aggregates.into_values().collect();
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use cursor_sim_seed::{ActivityLevel, Seniority, Velocity};
    use cursor_sim_store::WorkingHours;
    use rand::SeedableRng;

    fn ctx(days: u32) -> SeedContext {
        let dev = Developer {
            user_id: "alice".to_string(),
            email: "alice@co".to_string(),
            name: "Alice".to_string(),
            seniority: Seniority::Senior,
            activity_level: ActivityLevel::High,
            acceptance_rate: 0.6,
            working_hours: WorkingHours { start: 9, end: 17 },
            preferred_models: vec!["gpt-4o".to_string()],
            model_weights: None,
        };
        let window_start = crate::context::simulation_epoch();
        SeedContext {
            developers: vec![dev],
            repositories: Vec::new(),
            window_start,
            window_end: window_start + Duration::days(days as i64),
            velocity: Velocity::Medium,
            max_commits: 0,
            external: None,
        }
    }

    #[test]
    fn chat_interaction_count_matches_chat_events() {
        let context = ctx(10);
        let batch = generate(&context, &mut Prng::seed_from_u64(5), &CancellationToken::new());
        let total_chat_events = batch
            .events
            .iter()
            .filter(|e| matches!(e.kind, AiAssistKind::ChatMessage { .. }))
            .count() as u32;
        let total_aggregate_chat: u32 = batch.daily.iter().map(|a| a.chat_interactions).sum();
        assert_eq!(total_chat_events, total_aggregate_chat);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let context = ctx(5);
        let a = generate(&context, &mut Prng::seed_from_u64(11), &CancellationToken::new());
        let b = generate(&context, &mut Prng::seed_from_u64(11), &CancellationToken::new());
        assert_eq!(a.events.len(), b.events.len());
        assert_eq!(a.daily.len(), b.daily.len());
    }

    #[test]
    fn cancellation_stops_at_a_day_boundary() {
        let context = ctx(30);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let batch = generate(&context, &mut Prng::seed_from_u64(1), &cancel);
        assert!(batch.cancelled);
        assert!(batch.events.is_empty());
    }
}
