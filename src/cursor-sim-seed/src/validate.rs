//! Seed document validation.
//!
//! Validation rules are split into fatal errors (abort load) and
//! warnings (logged, load proceeds with a renormalized/best-effort
//! value) — mirroring the distinction `cursor-sim-server`'s error
//! module draws between client-facing `AppError` variants and
//! logged-but-swallowed degradations.

use thiserror::Error;

use crate::document::{KNOWN_MODEL_IDS, SeedDocument};

/// Fatal seed validation failures. A document with any of these is
/// rejected outright.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SeedError {
    #[error("seed document has no developers")]
    NoDevelopers,

    #[error("seed document has no repositories")]
    NoRepositories,

    #[error("developer {user_id:?} has malformed working hours: start={start} end={end}")]
    MalformedWorkingHours { user_id: String, start: u8, end: u8 },

    #[error("developer {user_id:?} has acceptance_rate {rate} outside [0,1]")]
    AcceptanceRateOutOfRange { user_id: String, rate: f64 },

    #[error("developer {user_id:?} has no preferred_models")]
    NoPreferredModels { user_id: String },

    #[error("duplicate developer user_id {user_id:?}")]
    DuplicateDeveloperId { user_id: String },

    #[error("duplicate repository name {name:?}")]
    DuplicateRepositoryName { name: String },

    #[error("days must be > 0")]
    NonPositiveDays,

    #[error("harvey surface enabled with no configured users")]
    HarveyNoUsers,

    #[error("copilot surface enabled with no configured tenant users")]
    CopilotNoUsers,

    #[error("qualtrics surface enabled with no configured surveys")]
    QualtricsNoSurveys,

    #[error("survey {survey_id:?} has response_count 0")]
    SurveyZeroResponses { survey_id: String },
}

/// Non-fatal validation warnings. The document still loads; the caller
/// should log these.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedWarning {
    /// A developer references a model identifier outside the known set.
    UnknownModelId { user_id: String, model_id: String },
    /// A distribution's probabilities did not sum to 1.0 within epsilon
    /// and was renormalized.
    RenormalizedDistribution { owner: String, original_sum: f64 },
}

impl std::fmt::Display for SeedWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownModelId { user_id, model_id } => write!(
                f,
                "developer {user_id:?} references unknown model {model_id:?}"
            ),
            Self::RenormalizedDistribution { owner, original_sum } => write!(
                f,
                "distribution for {owner:?} summed to {original_sum:.4}; renormalized to 1.0"
            ),
        }
    }
}

/// Outcome of validating a `SeedDocument`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedValidationReport {
    pub errors: Vec<SeedError>,
    pub warnings: Vec<SeedWarning>,
}

impl SeedValidationReport {
    pub fn is_fatal(&self) -> bool {
        !self.errors.is_empty()
    }
}

const DISTRIBUTION_EPSILON: f64 = 1e-6;

impl SeedDocument {
    /// Validate the document, returning every error and warning found
    /// rather than stopping at the first.
    pub fn validate(&self) -> SeedValidationReport {
        let mut report = SeedValidationReport::default();

        if self.developers.is_empty() {
            report.errors.push(SeedError::NoDevelopers);
        }
        if self.repositories.is_empty() {
            report.errors.push(SeedError::NoRepositories);
        }
        if self.days == 0 {
            report.errors.push(SeedError::NonPositiveDays);
        }

        let mut seen_devs = std::collections::HashSet::new();
        for dev in &self.developers {
            if !seen_devs.insert(dev.user_id.clone()) {
                report.errors.push(SeedError::DuplicateDeveloperId {
                    user_id: dev.user_id.clone(),
                });
            }
            if !dev.working_hours.is_well_formed() {
                report.errors.push(SeedError::MalformedWorkingHours {
                    user_id: dev.user_id.clone(),
                    start: dev.working_hours.start,
                    end: dev.working_hours.end,
                });
            }
            if !(0.0..=1.0).contains(&dev.acceptance_rate) {
                report.errors.push(SeedError::AcceptanceRateOutOfRange {
                    user_id: dev.user_id.clone(),
                    rate: dev.acceptance_rate,
                });
            }
            if dev.preferred_models.is_empty() {
                report.errors.push(SeedError::NoPreferredModels {
                    user_id: dev.user_id.clone(),
                });
            }
            for model in &dev.preferred_models {
                if !KNOWN_MODEL_IDS.contains(&model.as_str()) {
                    report.warnings.push(SeedWarning::UnknownModelId {
                        user_id: dev.user_id.clone(),
                        model_id: model.clone(),
                    });
                }
            }
        }

        let mut seen_repos = std::collections::HashSet::new();
        for repo in &self.repositories {
            if !seen_repos.insert(repo.name.clone()) {
                report.errors.push(SeedError::DuplicateRepositoryName {
                    name: repo.name.clone(),
                });
            }
        }

        if let Some(sources) = &self.external_data_sources {
            if let Some(harvey) = &sources.harvey
                && harvey.enabled
            {
                if harvey.users.is_empty() {
                    report.errors.push(SeedError::HarveyNoUsers);
                }
                check_distribution(
                    "harvey.task_distribution",
                    harvey.task_distribution.values().copied(),
                    &mut report,
                );
            }
            if let Some(copilot) = &sources.copilot
                && copilot.enabled
                && copilot.tenant_users.is_empty()
            {
                report.errors.push(SeedError::CopilotNoUsers);
            }
            if let Some(qualtrics) = &sources.qualtrics && qualtrics.enabled {
                if qualtrics.surveys.is_empty() {
                    report.errors.push(SeedError::QualtricsNoSurveys);
                }
                for survey in &qualtrics.surveys {
                    if survey.response_count == 0 {
                        report.errors.push(SeedError::SurveyZeroResponses {
                            survey_id: survey.survey_id.clone(),
                        });
                    }
                    check_distribution(
                        &survey.survey_id,
                        survey.satisfaction_distribution.0.values().copied(),
                        &mut report,
                    );
                }
            }
        }

        report
    }
}

fn check_distribution(
    owner: &str,
    values: impl Iterator<Item = f64>,
    report: &mut SeedValidationReport,
) {
    let sum: f64 = values.sum();
    if sum > 0.0 && (sum - 1.0).abs() > DISTRIBUTION_EPSILON {
        report.warnings.push(SeedWarning::RenormalizedDistribution {
            owner: owner.to_string(),
            original_sum: sum,
        });
    }
}
