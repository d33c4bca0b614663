//! Application state shared across request handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cursor_sim_store::Store;

use crate::config::ServerConfig;
use cursor_sim_export::ExportManager;

/// One-shot download tokens for the CSV-redirect flavor of the
/// productivity-assistant report: a token is minted, handed back as a
/// redirect `Location`, and consumed (removed) the first time it is
/// fetched.
#[derive(Default)]
pub struct DownloadCache {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl DownloadCache {
    pub fn stash(&self, bytes: Vec<u8>) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.files.lock().expect("download cache poisoned").insert(token.clone(), bytes);
        token
    }

    pub fn take(&self, token: &str) -> Option<Vec<u8>> {
        self.files.lock().expect("download cache poisoned").remove(token)
    }
}

/// Which of the three optional external surfaces are active for this
/// run. The developer-AI surface has no flag — it is always on.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnabledSurfaces {
    pub harvey: bool,
    pub copilot: bool,
    pub qualtrics: bool,
}

/// Shared, read-only-after-startup state handed to every handler.
///
/// The store is the only thing handlers read entity data from; it is
/// writer-exclusive during the startup generation pass (owned by the
/// orchestrator) and reader-shared for the lifetime of serving. The
/// export manager is `None` in replay mode, where the survey surface
/// (if enabled) serves only pre-materialized responses and rejects new
/// export jobs.
pub struct AppState {
    pub config: ServerConfig,
    pub store: Arc<Store>,
    pub export_manager: Option<Arc<ExportManager>>,
    pub surfaces: EnabledSurfaces,
    /// Survey ids valid for the export surface, used to return 404 on
    /// an unknown `surveyId` before ever touching the export manager.
    pub known_survey_ids: Vec<String>,
    /// Whether the `ALL` period of the productivity-assistant report
    /// aggregates over every observed event, or a fixed trailing
    /// window. Defaults to "full window" when undetermined (replay
    /// mode, or the surface disabled).
    pub copilot_all_period_is_full_window: bool,
    pub downloads: DownloadCache,
    start_time: Instant,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mode", &self.config.mode)
            .field("surfaces", &self.surfaces)
            .field("commit_count", &self.store.commit_count())
            .field("start_time", &self.start_time)
            .finish()
    }
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        store: Arc<Store>,
        export_manager: Option<Arc<ExportManager>>,
        surfaces: EnabledSurfaces,
        known_survey_ids: Vec<String>,
        copilot_all_period_is_full_window: bool,
    ) -> Self {
        Self {
            config,
            store,
            export_manager,
            surfaces,
            known_survey_ids,
            copilot_all_period_is_full_window,
            downloads: DownloadCache::default(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn knows_survey(&self, survey_id: &str) -> bool {
        self.known_survey_ids.iter().any(|id| id == survey_id)
    }
}
