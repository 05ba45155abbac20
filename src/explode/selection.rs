//! Selection of the contexts to explode.
//!
//! # Design Decisions
//! - Every explicit name is checked before anything is written
//! - All unknown names are reported together, in request order
//! - Repeated explicit names are processed once
//! - All-contexts mode is lexicographic by name

use thiserror::Error;

use crate::config::Selection;
use crate::kubeconfig::Config;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no contexts found")]
    NoContexts,

    #[error("could not find context(s): {}", format_names(.0))]
    UnknownContexts(Vec<String>),
}

fn format_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("{name:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve the ordered list of context names to process.
pub fn resolve(source: &Config, selection: &Selection) -> Result<Vec<String>, SelectionError> {
    if source.contexts.is_empty() {
        return Err(SelectionError::NoContexts);
    }

    match selection {
        Selection::All => Ok(source.context_names().map(str::to_string).collect()),
        Selection::Names(names) => {
            let mut todo: Vec<String> = Vec::with_capacity(names.len());
            let mut unknown: Vec<String> = Vec::new();

            for name in names {
                if !source.contexts.contains_key(name) {
                    if !unknown.contains(name) {
                        unknown.push(name.clone());
                    }
                } else if !todo.contains(name) {
                    todo.push(name.clone());
                }
            }

            if unknown.is_empty() {
                Ok(todo)
            } else {
                Err(SelectionError::UnknownContexts(unknown))
            }
        }
    }
}
