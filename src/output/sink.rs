//! Output sinks for projected documents.
//!
//! # Responsibilities
//! - Stream sink: append each document to one writer
//! - File sink: one file per context, skipping existing files unless forced
//!
//! # Design Decisions
//! - Chosen once per run; every document goes to the same sink
//! - A skipped file is a result, not an error
//! - Stat and write failures are errors and stop the run

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::kubeconfig::{writer, Config};
use crate::output::naming::destination_for;

/// Separator written between consecutive documents on a stream.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// What happened to one projected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// Appended to the output stream.
    Streamed,
    /// Written to this file.
    Written(PathBuf),
    /// Left alone because this file already exists.
    Skipped(PathBuf),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("unable to encode context {context:?}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unable to write to output stream: {0}")]
    Stream(#[source] io::Error),

    #[error("unable to stat file {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Destination for projected documents.
pub trait Sink {
    /// Hand over the projected document for `context_name`.
    fn emit(&mut self, context_name: &str, document: &Config) -> Result<Emitted, SinkError>;
}

/// Writes every document to one stream, separated by `---`.
pub struct StreamSink<W: Write> {
    out: W,
    documents: usize,
}

impl<W: Write> StreamSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, documents: 0 }
    }

    /// Number of documents written so far.
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn emit(&mut self, context_name: &str, document: &Config) -> Result<Emitted, SinkError> {
        let content = writer::to_yaml(document).map_err(|source| SinkError::Encode {
            context: context_name.to_string(),
            source,
        })?;

        if self.documents > 0 {
            self.out
                .write_all(DOCUMENT_SEPARATOR.as_bytes())
                .map_err(SinkError::Stream)?;
        }
        self.out
            .write_all(content.as_bytes())
            .map_err(SinkError::Stream)?;
        self.out.flush().map_err(SinkError::Stream)?;

        self.documents += 1;
        tracing::debug!(context = context_name, "Context streamed");
        Ok(Emitted::Streamed)
    }
}

/// Writes each document to `<dir>/<context name with "/" replaced by "_">`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    force: bool,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            dir: dir.into(),
            force,
        }
    }
}

impl Sink for FileSink {
    fn emit(&mut self, context_name: &str, document: &Config) -> Result<Emitted, SinkError> {
        let path = destination_for(&self.dir, context_name);

        match fs::metadata(&path) {
            Ok(_) if !self.force => {
                tracing::warn!(
                    context = context_name,
                    path = %path.display(),
                    "file already exists, use --force to overwrite"
                );
                return Ok(Emitted::Skipped(path));
            }
            Ok(_) => {
                tracing::debug!(path = %path.display(), "Overwriting existing file");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(SinkError::Stat { path, source }),
        }

        if let Err(source) = writer::write_to_file(document, &path) {
            return Err(SinkError::Write { path, source });
        }

        tracing::info!(context = context_name, path = %path.display(), "Context written");
        Ok(Emitted::Written(path))
    }
}
