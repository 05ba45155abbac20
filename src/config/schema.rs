//! Run configuration definitions.
//!
//! A [`RunConfig`] is built once at startup from the command line and passed
//! by reference to the rest of the program.

use std::path::PathBuf;

use crate::kubeconfig::LoadingRules;
use crate::kubeconfig::loader::RECOMMENDED_HOME_FILE;

/// Everything one run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Where the source kubeconfig comes from.
    pub source: LoadingRules,

    /// Which contexts to explode.
    pub selection: Selection,

    /// Where projected documents go.
    pub output: OutputTarget,

    /// Replace destination files that already exist. Ignored for stdout.
    pub force: bool,
}

impl RunConfig {
    /// Explicit contexts from the default sources into `~/.kube`.
    pub fn new(selection: Selection) -> Self {
        Self {
            source: LoadingRules::from_env(),
            selection,
            output: OutputTarget::Directory(default_output_dir()),
            force: false,
        }
    }

    pub fn with_source(mut self, source: LoadingRules) -> Self {
        self.source = source;
        self
    }

    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Which contexts to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every context in the source document.
    All,
    /// The named contexts, in the given order.
    Names(Vec<String>),
}

/// Destination of projected documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One concatenated YAML stream on standard output.
    Stdout,
    /// One file per context inside this directory.
    Directory(PathBuf),
}

/// The directory kubectl keeps its configuration in (`~/.kube`).
pub fn default_output_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_default();
    match PathBuf::from(RECOMMENDED_HOME_FILE).parent() {
        Some(dir) => home.join(dir),
        None => home,
    }
}
