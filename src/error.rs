//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::explode::{ProjectError, SelectionError};
use crate::kubeconfig::LoadError;
use crate::output::SinkError;

/// Any failure that ends a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, Error>;
