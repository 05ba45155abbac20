//! Explode a multi-context kubeconfig into standalone single-context files.

pub mod config;
pub mod error;
pub mod explode;
pub mod kubeconfig;
pub mod observability;
pub mod output;

pub use config::{OutputTarget, RunConfig, Selection};
pub use error::{Error, Result};
pub use explode::{explode, project, RunSummary};
pub use kubeconfig::{Config, LoadingRules};
