//! The generation context: a replicated roster plus the logical time
//! window generators draw against.

use chrono::{DateTime, TimeZone, Utc};
use cursor_sim_seed::{ExternalDataSources, SeedDocument, Velocity};
use cursor_sim_store::{Developer, Repository};

/// The PRNG type every generator consumes. Fixed to a concrete,
/// reproducible generator rather than a generic `Rng` bound so that
/// "same seed, same bytes" does not depend on
/// which algorithm a caller happens to plug in.
pub type Prng = rand_chacha::ChaCha8Rng;

/// The simulator never reads the wall clock. Every run's logical window starts at
/// this fixed instant, so two runs launched on different days still
/// produce byte-identical corpora for the same seed and PRNG seed.
pub fn simulation_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid fixed epoch")
}

/// Everything the C4 generators need, assembled once by the
/// orchestrator after C1 validation and C2 replication.
#[derive(Debug, Clone)]
pub struct SeedContext {
    pub developers: Vec<Developer>,
    pub repositories: Vec<Repository>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub velocity: Velocity,
    pub max_commits: u64,
    pub external: Option<ExternalDataSources>,
}

impl SeedContext {
    /// Build a context from a validated seed document and an already
    /// replicated developer roster (C2's output).
    pub fn new(seed: &SeedDocument, developers: Vec<Developer>) -> Self {
        let repositories = seed
            .repositories
            .iter()
            .map(|r| Repository {
                name: r.name.clone(),
                primary_language: r.primary_language.clone(),
                age_days: r.age_days,
            })
            .collect();
        let window_start = simulation_epoch();
        let window_end = window_start + chrono::Duration::days(seed.days as i64);
        Self {
            developers,
            repositories,
            window_start,
            window_end,
            velocity: seed.velocity,
            max_commits: seed.max_commits,
            external: seed.external_data_sources.clone(),
        }
    }

    /// Inclusive day-boundary iterator from `window_start` to
    /// `window_end`, exclusive of the end — one entry per calendar day
    /// in the generation window.
    pub fn days(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        let mut day = self.window_start;
        std::iter::from_fn(move || {
            if day >= self.window_end {
                None
            } else {
                let current = day;
                day += chrono::Duration::days(1);
                Some(current)
            }
        })
    }
}
