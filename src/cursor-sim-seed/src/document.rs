//! The seed document: structure of the input handed to a runtime-mode run.

use serde::{Deserialize, Serialize};

/// Model identifiers recognized without a validation warning.
///
/// An unknown identifier is not fatal: it is still accepted and
/// generators will still attribute commits to it, but
/// `SeedDocument::validate` records a warning.
pub const KNOWN_MODEL_IDS: &[&str] = &[
    "gpt-4o",
    "gpt-4.1",
    "o3",
    "claude-3-opus",
    "claude-3-sonnet",
    "claude-3-5-sonnet",
    "claude-4-sonnet",
    "gemini-1.5-pro",
    "gemini-2.0-flash",
];

/// Coarse developer seniority band, used by generators to scale commit
/// size/risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
}

/// Coarse developer activity band, used to scale Poisson arrival rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// Multiplier applied to the base commit arrival rate.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 1.0,
            Self::High => 1.8,
        }
    }
}

/// Coarse generation-speed knob, scaling every developer's arrival rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Velocity {
    Low,
    Medium,
    High,
}

impl Velocity {
    /// Multiplier applied on top of the per-developer activity multiplier.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Low => 0.6,
            Self::Medium => 1.0,
            Self::High => 1.6,
        }
    }
}

/// Inclusive hour-of-day working window, `start <= end`, both in `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: u8,
    pub end: u8,
}

impl WorkingHours {
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end && self.end <= 23
    }
}

/// A developer as described in the seed document, before replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDeveloper {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub seniority: Seniority,
    pub activity_level: ActivityLevel,
    pub acceptance_rate: f64,
    pub working_hours: WorkingHours,
    pub preferred_models: Vec<String>,
    /// Optional explicit weights for `preferred_models`; when absent,
    /// models are drawn uniformly.
    #[serde(default)]
    pub model_weights: Option<Vec<f64>>,
}

/// A repository as described in the seed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRepository {
    pub name: String,
    pub primary_language: String,
    #[serde(default)]
    pub age_days: u32,
}

/// Configuration for the legal-AI (Harvey-shaped) usage surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarveyConfig {
    pub enabled: bool,
    pub users: Vec<String>,
    #[serde(default = "default_events_per_user_per_day")]
    pub events_per_user_per_day: f64,
    /// Client matter identifiers available to draw from.
    #[serde(default)]
    pub client_matters: Vec<String>,
    /// Task distribution; renormalized with a warning if it does not
    /// sum to 1.0.
    #[serde(default = "default_task_distribution")]
    pub task_distribution: std::collections::BTreeMap<String, f64>,
}

fn default_events_per_user_per_day() -> f64 {
    5.0
}

fn default_task_distribution() -> std::collections::BTreeMap<String, f64> {
    [
        ("Assist".to_string(), 0.35),
        ("Draft".to_string(), 0.30),
        ("Review".to_string(), 0.25),
        ("Research".to_string(), 0.10),
    ]
    .into_iter()
    .collect()
}

/// Configuration for the enterprise-productivity-assistant (Copilot-shaped)
/// usage-report surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopilotConfig {
    pub enabled: bool,
    pub tenant_users: Vec<String>,
    /// Fallback adoption probability for an app with no entry in
    /// `per_app_adoption_rate`.
    #[serde(default = "default_adoption_rate")]
    pub default_adoption_rate: f64,
    /// Per-application adoption-rate overrides, keyed by app name (e.g.
    /// `"teams"`, `"word"`); an app absent here falls back to
    /// `default_adoption_rate`. String-keyed to match
    /// `HarveyConfig::task_distribution`'s style.
    #[serde(default)]
    pub per_app_adoption_rate: std::collections::BTreeMap<String, f64>,
    /// Per-user overrides, keyed by `user_id` then app name; entries
    /// here take precedence over `per_app_adoption_rate`.
    #[serde(default)]
    pub per_user_adoption_rate: std::collections::BTreeMap<String, std::collections::BTreeMap<String, f64>>,
    /// Whether the `ALL` report period aggregates the full generation
    /// window (`true`) or a fixed 180-day window (`false`), exposed as
    /// a knob rather than decided silently.
    #[serde(default)]
    pub all_period_is_full_window: bool,
}

impl CopilotConfig {
    /// Resolve the adoption rate for one `(user, app)` pair: a per-user
    /// override wins, then a per-app rate, then `default_adoption_rate`.
    pub fn adoption_rate(&self, user_id: &str, app_name: &str) -> f64 {
        self.per_user_adoption_rate
            .get(user_id)
            .and_then(|apps| apps.get(app_name))
            .or_else(|| self.per_app_adoption_rate.get(app_name))
            .copied()
            .unwrap_or(self.default_adoption_rate)
    }
}

fn default_adoption_rate() -> f64 {
    0.6
}

/// A single configured survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    pub survey_id: String,
    pub response_count: usize,
    #[serde(default)]
    pub satisfaction_distribution: SatisfactionDistribution,
}

/// Likert-scale satisfaction distribution used to draw `Q1_OverallSatisfaction`
/// and friends; keys are Likert scores `1..=5`, values are probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionDistribution(pub std::collections::BTreeMap<u8, f64>);

impl Default for SatisfactionDistribution {
    fn default() -> Self {
        Self(
            [(1, 0.05), (2, 0.10), (3, 0.20), (4, 0.35), (5, 0.30)]
                .into_iter()
                .collect(),
        )
    }
}

/// Configuration for the survey-export (Qualtrics-shaped) surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualtricsConfig {
    pub enabled: bool,
    pub surveys: Vec<SurveyDefinition>,
    /// Percent-complete increment applied on every `get_progress` poll.
    #[serde(default = "default_progress_increment")]
    pub progress_increment: u8,
}

fn default_progress_increment() -> u8 {
    20
}

/// The optional external-source block; each sub-config gates one HTTP
/// surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalDataSources {
    pub harvey: Option<HarveyConfig>,
    pub copilot: Option<CopilotConfig>,
    pub qualtrics: Option<QualtricsConfig>,
}

/// The top-level seed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDocument {
    pub developers: Vec<SeedDeveloper>,
    pub repositories: Vec<SeedRepository>,
    #[serde(default)]
    pub external_data_sources: Option<ExternalDataSources>,
    /// Requested developer headcount after replication (C2). Absent or
    /// equal to `developers.len()` means no replication.
    #[serde(default)]
    pub target_headcount: Option<usize>,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub velocity: Velocity,
    /// `0` means unlimited.
    #[serde(default)]
    pub max_commits: u64,
    /// Explicit PRNG seed; when absent the orchestrator falls back to a
    /// time-derived seed.
    #[serde(default)]
    pub prng_seed: Option<u64>,
}

fn default_days() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CopilotConfig {
        CopilotConfig {
            enabled: true,
            tenant_users: vec!["alice".to_string()],
            default_adoption_rate: 0.6,
            per_app_adoption_rate: [("teams".to_string(), 0.9)].into_iter().collect(),
            per_user_adoption_rate: [("alice".to_string(), [("teams".to_string(), 0.2)].into_iter().collect())]
                .into_iter()
                .collect(),
            all_period_is_full_window: false,
        }
    }

    #[test]
    fn per_user_rate_wins_over_per_app_and_default() {
        assert_eq!(config().adoption_rate("alice", "teams"), 0.2);
    }

    #[test]
    fn per_app_rate_wins_over_default_with_no_user_override() {
        assert_eq!(config().adoption_rate("bob", "teams"), 0.9);
    }

    #[test]
    fn default_rate_applies_with_no_overrides_at_all() {
        assert_eq!(config().adoption_rate("bob", "word"), 0.6);
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::Medium
    }
}
