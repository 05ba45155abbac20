//! Run configuration subsystem.
//!
//! # Data Flow
//! ```text
//! command line (clap)
//!     → schema.rs (RunConfig: source, selection, output, force)
//!     → validation.rs (semantic checks)
//!     → RunConfig (validated, immutable)
//!     → passed by reference to the explode runner
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no process-wide state
//! - Defaults follow kubectl: `KUBECONFIG`, then `~/.kube/config`, output to `~/.kube`

pub mod schema;
pub mod validation;

pub use schema::{default_output_dir, OutputTarget, RunConfig, Selection};
pub use validation::{validate_config, ConfigError, ValidationError};
