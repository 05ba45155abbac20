//! The explode loop.
//!
//! # Responsibilities
//! - Load the source document once
//! - Resolve the selection before producing any output
//! - Project and emit each selected context in order
//!
//! # Design Decisions
//! - Strictly sequential; output order is selection order
//! - First fatal error stops the run, earlier output stays in place

use std::io;
use std::path::PathBuf;

use crate::config::{OutputTarget, RunConfig};
use crate::error::Result;
use crate::explode::projector::project;
use crate::explode::selection::resolve;
use crate::kubeconfig::Config;
use crate::output::{Emitted, FileSink, Sink, StreamSink};

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of contexts selected.
    pub selected: usize,
    /// Documents written to the output stream.
    pub streamed: usize,
    /// Files written.
    pub written: Vec<PathBuf>,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
}

/// Validate `config`, load its source and explode into the configured output.
pub fn explode(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;

    let source = config.source.load()?;
    tracing::debug!(contexts = source.contexts.len(), "Source kubeconfig loaded");

    match &config.output {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut sink = StreamSink::new(stdout.lock());
            run(config, &source, &mut sink)
        }
        OutputTarget::Directory(dir) => {
            let mut sink = FileSink::new(dir, config.force);
            run(config, &source, &mut sink)
        }
    }
}

/// Explode the selected contexts of an already loaded `source` into `sink`.
pub fn run(config: &RunConfig, source: &Config, sink: &mut dyn Sink) -> Result<RunSummary> {
    let todo = resolve(source, &config.selection)?;
    tracing::debug!(count = todo.len(), "Contexts selected");

    let mut summary = RunSummary {
        selected: todo.len(),
        ..Default::default()
    };

    for name in &todo {
        let projected = project(source, name)?;
        match sink.emit(name, &projected)? {
            Emitted::Streamed => summary.streamed += 1,
            Emitted::Written(path) => summary.written.push(path),
            Emitted::Skipped(path) => summary.skipped.push(path),
        }
    }

    Ok(summary)
}
