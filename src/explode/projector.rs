//! Context projection.
//!
//! # Responsibilities
//! - Extract one context with the cluster and user it references
//! - Point the new document's current context at the extracted one
//! - Carry document-wide preferences and extensions through unchanged
//!
//! # Design Decisions
//! - Pure function over a borrowed source; the source is never mutated
//! - Entry names are kept as-is, nothing is renamed or namespaced
//! - Each broken reference is reported with its own error variant

use thiserror::Error;

use crate::kubeconfig::Config;

/// A reference inside the source document that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("cannot find context {0:?}")]
    ContextNotFound(String),

    #[error("cannot find cluster {cluster:?} referenced by context {context:?}")]
    ClusterNotFound { context: String, cluster: String },

    #[error("cannot find user {auth_info:?} referenced by context {context:?}")]
    AuthInfoNotFound { context: String, auth_info: String },
}

/// Build a standalone document holding only `context_name` and what it needs.
pub fn project(source: &Config, context_name: &str) -> Result<Config, ProjectError> {
    let context = source
        .contexts
        .get(context_name)
        .ok_or_else(|| ProjectError::ContextNotFound(context_name.to_string()))?;

    let cluster = source
        .clusters
        .get(&context.cluster)
        .ok_or_else(|| ProjectError::ClusterNotFound {
            context: context_name.to_string(),
            cluster: context.cluster.clone(),
        })?;

    let auth_info = source
        .auth_infos
        .get(&context.auth_info)
        .ok_or_else(|| ProjectError::AuthInfoNotFound {
            context: context_name.to_string(),
            auth_info: context.auth_info.clone(),
        })?;

    let mut projected = Config::default();
    projected
        .contexts
        .insert(context_name.to_string(), context.clone());
    projected
        .clusters
        .insert(context.cluster.clone(), cluster.clone());
    projected
        .auth_infos
        .insert(context.auth_info.clone(), auth_info.clone());

    projected.current_context = context_name.to_string();
    projected.extensions = source.extensions.clone();
    projected.preferences = source.preferences.clone();

    Ok(projected)
}
