//! Seed document model and validation for `cursor-sim`.
//!
//! A seed document (C1 in the design) is the single typed input that
//! drives a runtime-mode simulation run: the developer roster, the
//! repository roster, and zero or more external-surface configurations
//! (Harvey/legal-AI, Copilot/productivity-assistant, Qualtrics/survey).
//!
//! This crate only models and validates the document; it does not
//! generate entities from it (see `cursor-sim-generators`).

mod document;
mod validate;

pub use document::{
    ActivityLevel, CopilotConfig, ExternalDataSources, HarveyConfig, QualtricsConfig,
    SatisfactionDistribution, SeedDeveloper, SeedDocument, SeedRepository, Seniority,
    SurveyDefinition, Velocity, WorkingHours, KNOWN_MODEL_IDS,
};
pub use validate::{SeedError, SeedValidationReport, SeedWarning};
