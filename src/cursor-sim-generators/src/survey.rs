//! Survey-response generation.

use cursor_sim_seed::SurveyDefinition;
use cursor_sim_store::SurveyResponse;
use rand::Rng;

use crate::context::{Prng, SeedContext};
use crate::dist::{uniform_f64, weighted_index};

const DEPARTMENTS: &[&str] = &["Engineering", "Product", "Design", "Data", "Security", "Platform"];
const ROLES: &[&str] = &["Software Engineer", "Senior Engineer", "Engineering Manager", "Product Manager", "Designer"];
const TENURES: &[&str] = &["<6 months", "6-12 months", "1-2 years", "2-5 years", "5+ years"];

const POSITIVE_COMMENTS: &[&str] = &[
    "Cursor has meaningfully sped up our delivery.",
    "The AI suggestions are usually spot on.",
    "Best tooling change we've made this year.",
];
const NEUTRAL_COMMENTS: &[&str] = &["It's fine, does what it says.", "No strong opinion either way."];
const NEGATIVE_COMMENTS: &[&str] = &[
    "Suggestions are often off-base for our codebase.",
    "Too many false starts, wish it understood context better.",
];

fn draw_likert(dist: &std::collections::BTreeMap<u8, f64>, rng: &mut Prng) -> u8 {
    let scores: Vec<u8> = dist.keys().copied().collect();
    let weights: Vec<f64> = dist.values().copied().collect();
    if scores.is_empty() {
        return 3;
    }
    let idx = weighted_index(rng, scores.len(), Some(&weights));
    scores[idx]
}

fn jitter(base: u8, rng: &mut Prng) -> u8 {
    let delta: i8 = [-1, 0, 0, 1][rng.random_range(0..4)];
    (base as i8 + delta).clamp(1, 5) as u8
}

fn respondent(ctx: &SeedContext, idx: usize, rng: &mut Prng) -> (String, String, String, String) {
    if !ctx.developers.is_empty() {
        let dev_idx = weighted_index(rng, ctx.developers.len(), None);
        let dev = &ctx.developers[dev_idx];
        let role_idx = weighted_index(rng, ROLES.len(), None);
        let tenure_idx = weighted_index(rng, TENURES.len(), None);
        let dept_idx = weighted_index(rng, DEPARTMENTS.len(), None);
        return (
            dev.email.clone(),
            DEPARTMENTS[dept_idx].to_string(),
            ROLES[role_idx].to_string(),
            TENURES[tenure_idx].to_string(),
        );
    }
    let dept_idx = weighted_index(rng, DEPARTMENTS.len(), None);
    let role_idx = weighted_index(rng, ROLES.len(), None);
    let tenure_idx = weighted_index(rng, TENURES.len(), None);
    (
        format!("respondent{idx}@example.com"),
        DEPARTMENTS[dept_idx].to_string(),
        ROLES[role_idx].to_string(),
        TENURES[tenure_idx].to_string(),
    )
}

fn additional_comment(overall: u8, rng: &mut Prng) -> String {
    let pool: &[&str] = match overall {
        1 | 2 => NEGATIVE_COMMENTS,
        3 => NEUTRAL_COMMENTS,
        _ => POSITIVE_COMMENTS,
    };
    let idx = weighted_index(rng, pool.len(), None);
    pool[idx].to_string()
}

fn response_id(survey_id: &str, idx: usize, rng: &mut Prng) -> String {
    format!("R_{survey_id}_{idx}_{:06x}", rng.random::<u32>() & 0xFFFFFF)
}

/// Generate `response_count` survey responses for `definition`.
pub fn generate_for_survey(
    ctx: &SeedContext,
    definition: &SurveyDefinition,
    rng: &mut Prng,
) -> Vec<SurveyResponse> {
    let mut out = Vec::with_capacity(definition.response_count);
    for idx in 0..definition.response_count {
        let overall = draw_likert(&definition.satisfaction_distribution.0, rng);
        let likert_answers: [u8; 8] = std::array::from_fn(|_| jitter(overall, rng));
        let (email, department, role, tenure) = respondent(ctx, idx, rng);

        let start_offset_days = uniform_f64(rng, 0.0, (ctx.window_end - ctx.window_start).num_days().max(1) as f64);
        let start_date = ctx.window_start + chrono::Duration::seconds((start_offset_days * 86_400.0) as i64);
        let duration_seconds = uniform_f64(rng, 60.0, 900.0) as u32;
        let end_date = start_date + chrono::Duration::seconds(duration_seconds as i64);

        out.push(SurveyResponse {
            response_id: response_id(&definition.survey_id, idx, rng),
            survey_id: definition.survey_id.clone(),
            start_date,
            end_date,
            duration_seconds,
            status: "0".to_string(),
            email,
            department,
            role,
            tenure,
            likert_answers,
            additional_comments: additional_comment(overall, rng),
        });
    }
    out
}

/// Generate responses for every configured survey, keyed by survey id.
pub fn generate(ctx: &SeedContext, rng: &mut Prng) -> Vec<SurveyResponse> {
    let Some(config) = ctx.external.as_ref().and_then(|e| e.qualtrics.as_ref()).filter(|q| q.enabled) else {
        return Vec::new();
    };
    config.surveys.iter().flat_map(|s| generate_for_survey(ctx, s, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use cursor_sim_seed::{CopilotConfig, ExternalDataSources, HarveyConfig, QualtricsConfig, SatisfactionDistribution, Velocity};
    use rand::SeedableRng;

    fn ctx_with_survey(response_count: usize) -> SeedContext {
        let window_start = crate::context::simulation_epoch();
        SeedContext {
            developers: Vec::new(),
            repositories: Vec::new(),
            window_start,
            window_end: window_start + Duration::days(30),
            velocity: Velocity::Medium,
            max_commits: 0,
            external: Some(ExternalDataSources {
                harvey: None::<HarveyConfig>,
                copilot: None::<CopilotConfig>,
                qualtrics: Some(QualtricsConfig {
                    enabled: true,
                    surveys: vec![SurveyDefinition {
                        survey_id: "SV_1".to_string(),
                        response_count,
                        satisfaction_distribution: SatisfactionDistribution::default(),
                    }],
                    progress_increment: 20,
                }),
            }),
        }
    }

    #[test]
    fn produces_the_requested_response_count() {
        let ctx = ctx_with_survey(25);
        let responses = generate(&ctx, &mut Prng::seed_from_u64(1));
        assert_eq!(responses.len(), 25);
    }

    #[test]
    fn likert_answers_are_in_range() {
        let ctx = ctx_with_survey(10);
        let responses = generate(&ctx, &mut Prng::seed_from_u64(2));
        for r in &responses {
            assert!(r.likert_answers.iter().all(|&a| (1..=5).contains(&a)));
        }
    }

    #[test]
    fn response_ids_are_unique() {
        let ctx = ctx_with_survey(50);
        let responses = generate(&ctx, &mut Prng::seed_from_u64(3));
        let mut ids: Vec<&str> = responses.iter().map(|r| r.response_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}
