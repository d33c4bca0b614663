//! Enterprise-productivity-assistant activity generation.
//!
//! Generates discrete per-`(user, app)` activity instants rather than
//! precomputed per-period reports; the HTTP surface (in
//! `cursor-sim-server`) buckets these by the requested report period at
//! query time.

use cursor_sim_store::{CopilotActivityEvent, CopilotApp};
use tokio_util::sync::CancellationToken;

use crate::context::{Prng, SeedContext};
use crate::dist::{bernoulli, poisson, uniform_f64};

/// Relative usage-cadence multiplier per application — Teams/Outlook
/// are used near-daily, OneNote/Loop/Chat are occasional.
fn app_cadence(app: CopilotApp) -> f64 {
    match app {
        CopilotApp::Teams | CopilotApp::Outlook => 0.9,
        CopilotApp::Word | CopilotApp::Excel | CopilotApp::PowerPoint => 0.5,
        CopilotApp::Chat => 0.4,
        CopilotApp::OneNote | CopilotApp::Loop => 0.2,
    }
}

/// The app-name key `CopilotConfig`'s per-app/per-user adoption-rate
/// maps are keyed by.
fn app_key(app: CopilotApp) -> &'static str {
    match app {
        CopilotApp::Teams => "teams",
        CopilotApp::Word => "word",
        CopilotApp::Excel => "excel",
        CopilotApp::PowerPoint => "powerpoint",
        CopilotApp::Outlook => "outlook",
        CopilotApp::OneNote => "onenote",
        CopilotApp::Loop => "loop",
        CopilotApp::Chat => "chat",
    }
}

#[derive(Debug, Default)]
pub struct CopilotActivityBatch {
    pub events: Vec<CopilotActivityEvent>,
}

fn display_name(upn: &str) -> String {
    upn.split('@').next().unwrap_or(upn).replace('.', " ")
}

/// Generate per-app activity instants for every tenant user. A no-op
/// when the productivity-assistant surface isn't configured/enabled.
pub fn generate(ctx: &SeedContext, rng: &mut Prng, _cancel: &CancellationToken) -> CopilotActivityBatch {
    let mut batch = CopilotActivityBatch::default();
    let Some(config) = ctx.external.as_ref().and_then(|e| e.copilot.as_ref()).filter(|c| c.enabled) else {
        return batch;
    };

    let days: Vec<chrono::DateTime<chrono::Utc>> = ctx.days().collect();
    if days.is_empty() {
        return batch;
    }

    for user in &config.tenant_users {
        for app in CopilotApp::ALL {
            if !bernoulli(rng, config.adoption_rate(user, app_key(app))) {
                continue;
            }
            let lambda = app_cadence(app);
            for day in &days {
                if bernoulli(rng, lambda / 7.0) {
                    let ts = *day + chrono::Duration::minutes(uniform_f64(rng, 0.0, 24.0 * 60.0) as i64);
                    batch.events.push(CopilotActivityEvent {
                        user_principal_name: user.clone(),
                        display_name: display_name(user),
                        app,
                        ts,
                    });
                }
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use cursor_sim_seed::{CopilotConfig, ExternalDataSources, HarveyConfig, QualtricsConfig, Velocity};
    use rand::SeedableRng;

    fn copilot_ctx(users: Vec<&str>, days: u32, adoption: f64) -> SeedContext {
        let window_start = crate::context::simulation_epoch();
        SeedContext {
            developers: Vec::new(),
            repositories: Vec::new(),
            window_start,
            window_end: window_start + Duration::days(days as i64),
            velocity: Velocity::Medium,
            max_commits: 0,
            external: Some(ExternalDataSources {
                harvey: None::<HarveyConfig>,
                copilot: Some(CopilotConfig {
                    enabled: true,
                    tenant_users: users.into_iter().map(str::to_string).collect(),
                    default_adoption_rate: adoption,
                    per_app_adoption_rate: Default::default(),
                    per_user_adoption_rate: Default::default(),
                    all_period_is_full_window: false,
                }),
                qualtrics: None::<QualtricsConfig>,
            }),
        }
    }

    #[test]
    fn zero_adoption_rate_yields_no_events() {
        let ctx = copilot_ctx(vec!["alice@co"], 30, 0.0);
        let batch = generate(&ctx, &mut Prng::seed_from_u64(1), &CancellationToken::new());
        assert!(batch.events.is_empty());
    }

    #[test]
    fn full_adoption_produces_events_for_every_app() {
        let ctx = copilot_ctx(vec!["alice@co"], 60, 1.0);
        let batch = generate(&ctx, &mut Prng::seed_from_u64(1), &CancellationToken::new());
        let apps_seen: std::collections::BTreeSet<_> = batch.events.iter().map(|e| e.app).collect();
        assert_eq!(apps_seen.len(), CopilotApp::ALL.len());
    }

    #[test]
    fn events_stay_within_the_window() {
        let ctx = copilot_ctx(vec!["alice@co"], 14, 1.0);
        let batch = generate(&ctx, &mut Prng::seed_from_u64(2), &CancellationToken::new());
        for e in &batch.events {
            assert!(e.ts >= ctx.window_start && e.ts < ctx.window_end);
        }
    }

    #[test]
    fn per_user_override_beats_both_per_app_and_default_rates() {
        let window_start = crate::context::simulation_epoch();
        let per_app: std::collections::BTreeMap<String, f64> = [("teams".to_string(), 0.0)].into_iter().collect();
        let per_user: std::collections::BTreeMap<String, std::collections::BTreeMap<String, f64>> =
            [("alice@co".to_string(), [("teams".to_string(), 1.0)].into_iter().collect())].into_iter().collect();

        let ctx = SeedContext {
            developers: Vec::new(),
            repositories: Vec::new(),
            window_start,
            window_end: window_start + Duration::days(14),
            velocity: Velocity::Medium,
            max_commits: 0,
            external: Some(ExternalDataSources {
                harvey: None::<HarveyConfig>,
                copilot: Some(CopilotConfig {
                    enabled: true,
                    tenant_users: vec!["alice@co".to_string(), "bob@co".to_string()],
                    default_adoption_rate: 0.0,
                    per_app_adoption_rate: per_app,
                    per_user_adoption_rate: per_user,
                    all_period_is_full_window: false,
                }),
                qualtrics: None::<QualtricsConfig>,
            }),
        };

        let batch = generate(&ctx, &mut Prng::seed_from_u64(3), &CancellationToken::new());
        assert!(!batch.events.is_empty());
        assert!(batch
            .events
            .iter()
            .all(|e| e.app == CopilotApp::Teams && e.user_principal_name == "alice@co"));
    }
}
