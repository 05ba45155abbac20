//! kube-explode
//!
//! Splits a kubeconfig holding many contexts into one self-contained file per
//! context, each carrying only the cluster and user that context references.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──▶ RunConfig ──▶ kubeconfig loader ──▶ source Config (immutable)
//!                                                        │
//!                                   selection (all names checked first)
//!                                                        │
//!                              ┌──── for each context ───┴──────────────┐
//!                              │  projector ──▶ sink (stdout | ~/.kube) │
//!                              └────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use kube_explode::config::{default_output_dir, OutputTarget, RunConfig, Selection};
use kube_explode::kubeconfig::LoadingRules;
use kube_explode::observability::init_logging;

#[derive(Parser)]
#[command(name = "kube-explode", version)]
#[command(about = "Explode kubeconfig contexts into standalone files", long_about = None)]
struct Cli {
    /// Context names to explode
    #[arg(value_name = "CONTEXT", required_unless_present = "all")]
    contexts: Vec<String>,

    /// explode all contexts into separate files
    #[arg(long)]
    all: bool,

    /// write exploded contexts to stdout instead of files
    #[arg(long)]
    stdout: bool,

    /// force overwriting of destination files. Ignored when --stdout is used
    #[arg(short, long)]
    force: bool,

    /// path to the kubeconfig file to explode
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// destination directory for exploded files [default: ~/.kube]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn into_run_config(self) -> RunConfig {
        let selection = if self.all {
            if !self.contexts.is_empty() {
                tracing::warn!(ignored = ?self.contexts, "context names are ignored with --all");
            }
            Selection::All
        } else {
            Selection::Names(self.contexts)
        };

        let source = match self.kubeconfig {
            Some(path) => LoadingRules::explicit(path),
            None => LoadingRules::from_env(),
        };

        let output = if self.stdout {
            if self.force {
                tracing::debug!("--force has no effect with --stdout");
            }
            OutputTarget::Stdout
        } else {
            OutputTarget::Directory(self.output_dir.unwrap_or_else(default_output_dir))
        };

        RunConfig::new(selection)
            .with_source(source)
            .with_output(output)
            .with_force(self.force)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let config = cli.into_run_config();
    match kube_explode::explode(&config) {
        Ok(summary) => {
            tracing::debug!(
                selected = summary.selected,
                streamed = summary.streamed,
                written = summary.written.len(),
                skipped = summary.skipped.len(),
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
