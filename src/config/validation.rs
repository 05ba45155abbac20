//! Run configuration validation.
//!
//! # Responsibilities
//! - Semantic checks clap cannot express for library callers
//! - Runs before the source kubeconfig is loaded
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RunConfig → Result<(), ConfigError>

use thiserror::Error;

use crate::config::schema::{OutputTarget, RunConfig, Selection};

/// A single semantic problem with a [`RunConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("must specify context names or --all")]
    NoContextsRequested,

    #[error("output directory must not be empty")]
    EmptyOutputDir,
}

/// Error type for run configuration checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a run configuration before any work starts.
pub fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if matches!(&config.selection, Selection::Names(names) if names.is_empty()) {
        errors.push(ValidationError::NoContextsRequested);
    }
    if matches!(&config.output, OutputTarget::Directory(dir) if dir.as_os_str().is_empty()) {
        errors.push(ValidationError::EmptyOutputDir);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors))
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)
    }
}
