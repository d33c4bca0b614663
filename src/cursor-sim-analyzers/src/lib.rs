//! Read-only analyzers over a [`cursor_sim_store::Store`]: revert risk,
//! hotfix detection, code survival, and the research-metrics aggregator.

mod error;
mod hotfix;
mod keywords;
mod research_metrics;
mod revert;
mod survival;

#[cfg(test)]
mod test_support;

/// Seeded RNG shared by the analyzers that draw synthetic outcomes
/// (revert scheduling, survival coin-flips).
pub type Prng = rand_chacha::ChaCha8Rng;

pub use error::AnalyzerError;
pub use hotfix::{HotfixPair, HotfixReport};
pub use keywords::{is_hotfix_candidate, is_revert_message};
pub use research_metrics::{aggregate as aggregate_research_metrics, build_data_points, BandMetrics, BANDS};
pub use revert::{revert_risk, RevertReport, RevertedPr};
pub use survival::{DeveloperSurvival, SurvivalReport};

pub use hotfix::analyze as analyze_hotfix;
pub use revert::analyze as analyze_revert;
pub use survival::analyze as analyze_survival;
