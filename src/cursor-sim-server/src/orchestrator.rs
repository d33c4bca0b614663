//! The orchestrator: composes the seed/store/generators/analyzers
//! crates into the runtime lifecycle, or the corpus codec into the
//! replay lifecycle, and decides which external surfaces are active.

use std::sync::Arc;

use cursor_sim_analyzers::{analyze_hotfix, analyze_revert, build_data_points};
use cursor_sim_corpus::CorpusFile;
use cursor_sim_export::ExportManager;
use cursor_sim_generators::{simulation_epoch, SeedContext};
use cursor_sim_seed::SeedDocument;
use cursor_sim_store::Store;
use rand::SeedableRng;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{Mode, ServerConfig};
use crate::state::{AppState, EnabledSurfaces};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("failed to read {path}: {source}")]
    ReadFile { path: String, source: std::io::Error },

    #[error("failed to parse seed document: {0}")]
    SeedParse(#[from] serde_json::Error),

    #[error("seed document failed validation: {0:?}")]
    SeedInvalid(Vec<cursor_sim_seed::SeedError>),

    #[error("generation failed: {0}")]
    Generation(#[from] cursor_sim_generators::GeneratorError),

    #[error("failed to write corpus to {path}: {source}")]
    WriteFile { path: String, source: std::io::Error },

    #[error("corpus error: {0}")]
    Corpus(#[from] cursor_sim_corpus::CorpusError),

    #[error("post-generation analysis failed: {0}")]
    Analysis(#[from] cursor_sim_analyzers::AnalyzerError),
}

/// Build the fully-assembled [`AppState`] for either lifecycle.
pub async fn bootstrap(
    config: ServerConfig,
    cancel: CancellationToken,
) -> Result<AppState, OrchestratorError> {
    match config.mode {
        Mode::Runtime => bootstrap_runtime(config, cancel).await,
        Mode::Replay => bootstrap_replay(config).await,
    }
}

async fn bootstrap_runtime(
    config: ServerConfig,
    cancel: CancellationToken,
) -> Result<AppState, OrchestratorError> {
    let seed_path = config.seed_path.clone().expect("validated by ServerConfig::validate");
    let raw = std::fs::read_to_string(&seed_path)
        .map_err(|source| OrchestratorError::ReadFile { path: seed_path.display().to_string(), source })?;
    let seed: SeedDocument = serde_json::from_str(&raw)?;

    let report = seed.validate();
    for warning in &report.warnings {
        warn!(%warning, "seed validation warning");
    }
    if report.is_fatal() {
        return Err(OrchestratorError::SeedInvalid(report.errors));
    }

    let prng_seed = config.prng_seed.or(seed.prng_seed).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let mut rng = cursor_sim_generators::Prng::seed_from_u64(prng_seed);

    let developers = match seed.target_headcount {
        Some(n) if n != seed.developers.len() => {
            cursor_sim_generators::replicate(&seed.developers, n, &mut rng)
        }
        _ => seed
            .developers
            .iter()
            .map(|d| cursor_sim_store::Developer {
                user_id: d.user_id.clone(),
                email: d.email.clone(),
                name: d.name.clone(),
                seniority: d.seniority,
                activity_level: d.activity_level,
                acceptance_rate: d.acceptance_rate,
                working_hours: d.working_hours,
                preferred_models: d.preferred_models.clone(),
                model_weights: d.model_weights.clone(),
            })
            .collect(),
    };

    let mut working_seed = seed.clone();
    working_seed.days = config.days;
    working_seed.velocity = config.velocity;
    working_seed.max_commits = config.max_commits;

    let ctx = SeedContext::new(&working_seed, developers);
    let mut store = Store::new();

    let generation_cancel = cancel.clone();
    let summary = tokio::task::spawn_blocking(move || {
        cursor_sim_generators::run(&ctx, &mut store, &mut rng, &generation_cancel).map(|s| (s, store))
    })
    .await
    .expect("generation task panicked")?;
    let (summary, store) = summary;

    info!(
        developer_count = summary.developer_count,
        commit_count = summary.commit_count,
        days = config.days,
        velocity = ?config.velocity,
        cap_reached = summary.cap_reached,
        "runtime generation complete"
    );

    let surfaces = EnabledSurfaces {
        harvey: working_seed.external_data_sources.as_ref().and_then(|e| e.harvey.as_ref()).is_some_and(|h| h.enabled),
        copilot: working_seed.external_data_sources.as_ref().and_then(|e| e.copilot.as_ref()).is_some_and(|c| c.enabled),
        qualtrics: working_seed.external_data_sources.as_ref().and_then(|e| e.qualtrics.as_ref()).is_some_and(|q| q.enabled),
    };

    let known_survey_ids = working_seed
        .external_data_sources
        .as_ref()
        .and_then(|e| e.qualtrics.as_ref())
        .map(|q| q.surveys.iter().map(|s| s.survey_id.clone()).collect())
        .unwrap_or_default();

    if let Some(out_path) = &config.corpus_out_path {
        let mut analyzer_rng = cursor_sim_generators::Prng::seed_from_u64(prng_seed ^ 0xC0FF_EE00);
        let since = simulation_epoch();
        let until = since + chrono::Duration::days(config.days as i64);
        let revert_report = analyze_revert(&store, since, until, 30, &mut analyzer_rng)?;
        let reverted: std::collections::HashSet<(String, u64)> =
            revert_report.reverted_prs.iter().map(|r| (r.repo_name.clone(), r.pr_number)).collect();
        let hotfix_report = analyze_hotfix(&store, since, until, 72)?;
        let hotfixed: std::collections::HashSet<(String, u64)> =
            hotfix_report.hotfix_prs.iter().map(|h| (h.repo_name.clone(), h.original_pr)).collect();
        let data_points = build_data_points(&store, since, until, &reverted, &hotfixed)?;

        let corpus = CorpusFile::from_store(&store, data_points);
        let bytes = corpus.encode()?;
        std::fs::write(out_path, &bytes)
            .map_err(|source| OrchestratorError::WriteFile { path: out_path.display().to_string(), source })?;
        info!(path = %out_path.display(), summary = ?corpus.summary(), "corpus written");
    }

    let copilot_all_period_is_full_window = working_seed
        .external_data_sources
        .as_ref()
        .and_then(|e| e.copilot.as_ref())
        .map(|c| c.all_period_is_full_window)
        .unwrap_or(true);

    let store = Arc::new(store);
    let export_manager = surfaces.qualtrics.then(|| Arc::new(ExportManager::new(Arc::clone(&store))));

    Ok(AppState::new(config, store, export_manager, surfaces, known_survey_ids, copilot_all_period_is_full_window))
}

async fn bootstrap_replay(config: ServerConfig) -> Result<AppState, OrchestratorError> {
    let corpus_path = config.corpus_path.clone().expect("validated by ServerConfig::validate");
    let bytes = std::fs::read(&corpus_path)
        .map_err(|source| OrchestratorError::ReadFile { path: corpus_path.display().to_string(), source })?;
    let corpus = CorpusFile::decode(&bytes)?;
    let summary = corpus.summary();
    let store = Arc::new(corpus.into_store()?);

    info!(path = %corpus_path.display(), ?summary, "replay corpus loaded");

    // The corpus carries entities, not the seed's surface-enablement
    // flags, so replay infers which surfaces were active from whether
    // their entity kind has any rows.
    let surfaces = EnabledSurfaces {
        harvey: summary.legal_ai_event_count > 0,
        copilot: summary.copilot_activity_event_count > 0,
        qualtrics: summary.survey_response_count > 0,
    };
    let known_survey_ids = store
        .all_survey_responses()
        .iter()
        .map(|r| r.survey_id.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    // Export state machine is inert in replay mode: there is no
    // generator run to materialize against and no prior job state was
    // serialized, so `start_export` has nothing to do.
    Ok(AppState::new(config, store, None, surfaces, known_survey_ids, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, LoggingConfig, Velocity};
    use cursor_sim_seed::{
        ActivityLevel, CopilotConfig, ExternalDataSources, HarveyConfig, SeedDeveloper,
        SeedRepository, Seniority, WorkingHours,
    };

    fn base_config(mode: Mode) -> ServerConfig {
        ServerConfig {
            mode,
            seed_path: None,
            corpus_path: None,
            corpus_out_path: None,
            port: 8080,
            days: 3,
            velocity: Velocity::Medium,
            max_commits: 50,
            prng_seed: Some(7),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    fn minimal_seed() -> SeedDocument {
        SeedDocument {
            developers: vec![SeedDeveloper {
                user_id: "alice".to_string(),
                email: "alice@example.com".to_string(),
                name: "Alice".to_string(),
                seniority: Seniority::Senior,
                activity_level: ActivityLevel::High,
                acceptance_rate: 0.7,
                working_hours: WorkingHours { start: 9, end: 17 },
                preferred_models: vec!["gpt-4o".to_string()],
                model_weights: None,
            }],
            repositories: vec![SeedRepository { name: "repo-a".to_string(), primary_language: "rust".to_string(), age_days: 200 }],
            external_data_sources: Some(ExternalDataSources {
                harvey: Some(HarveyConfig {
                    enabled: true,
                    users: vec!["alice".to_string()],
                    events_per_user_per_day: 5.0,
                    client_matters: vec!["CM-1".to_string()],
                    task_distribution: Default::default(),
                }),
                copilot: Some(CopilotConfig {
                    enabled: true,
                    tenant_users: vec!["alice".to_string()],
                    default_adoption_rate: 0.6,
                    per_app_adoption_rate: Default::default(),
                    per_user_adoption_rate: Default::default(),
                    all_period_is_full_window: true,
                }),
                qualtrics: None,
            }),
            target_headcount: None,
            days: 3,
            velocity: Velocity::Medium,
            max_commits: 50,
            prng_seed: Some(7),
        }
    }

    fn write_seed(seed: &SeedDocument) -> tempfile::TempPath {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, seed).unwrap();
        file.into_temp_path()
    }

    #[tokio::test]
    async fn runtime_bootstrap_generates_and_enables_configured_surfaces() {
        let seed_path = write_seed(&minimal_seed());
        let mut config = base_config(Mode::Runtime);
        config.seed_path = Some(seed_path.to_path_buf());

        let state = bootstrap(config, CancellationToken::new()).await.unwrap();
        assert!(state.surfaces.harvey);
        assert!(state.surfaces.copilot);
        assert!(!state.surfaces.qualtrics);
        assert!(state.export_manager.is_none());
        assert!(state.store.commit_count() > 0 || state.store.developers().count() == 1);
    }

    #[tokio::test]
    async fn runtime_bootstrap_rejects_an_invalid_seed() {
        let mut seed = minimal_seed();
        seed.developers.clear();
        let seed_path = write_seed(&seed);
        let mut config = base_config(Mode::Runtime);
        config.seed_path = Some(seed_path.to_path_buf());

        let err = bootstrap(config, CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::SeedInvalid(_)));
    }

    #[tokio::test]
    async fn replay_bootstrap_infers_surfaces_from_corpus_contents() {
        let mut store = Store::new();
        store
            .insert_developer(cursor_sim_store::Developer {
                user_id: "alice".to_string(),
                email: "alice@example.com".to_string(),
                name: "Alice".to_string(),
                seniority: cursor_sim_store::Seniority::Mid,
                activity_level: cursor_sim_store::ActivityLevel::Medium,
                acceptance_rate: 0.5,
                working_hours: cursor_sim_store::WorkingHours { start: 9, end: 17 },
                preferred_models: vec!["gpt-4o".to_string()],
                model_weights: None,
            })
            .unwrap();
        store
            .insert_repository(cursor_sim_store::Repository {
                name: "repo-a".to_string(),
                primary_language: "rust".to_string(),
                age_days: 200,
            })
            .unwrap();
        let corpus = CorpusFile::from_store(&store, Vec::new());
        let bytes = corpus.encode().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &bytes).unwrap();
        let corpus_path = file.into_temp_path();

        let mut config = base_config(Mode::Replay);
        config.corpus_path = Some(corpus_path.to_path_buf());

        let state = bootstrap(config, CancellationToken::new()).await.unwrap();
        assert!(!state.surfaces.harvey);
        assert!(!state.surfaces.copilot);
        assert!(!state.surfaces.qualtrics);
        assert!(state.export_manager.is_none());
        assert_eq!(state.store.developers().count(), 1);
    }
}
