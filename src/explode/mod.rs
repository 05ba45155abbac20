//! Context explosion subsystem.
//!
//! # Data Flow
//! ```text
//! RunConfig + source Config
//!     → selection.rs (explicit names checked up front, or all names sorted)
//!     → for each name, in order:
//!         projector.rs (context + its cluster + its user → new Config)
//!         → output sink (stream or file)
//!     → RunSummary
//! ```
//!
//! # Design Decisions
//! - The source document is borrowed immutably for the whole run
//! - No output is produced until the whole selection has resolved
//! - Projection is pure; sinks own all side effects

pub mod projector;
pub mod runner;
pub mod selection;

pub use projector::{project, ProjectError};
pub use runner::{explode, run, RunSummary};
pub use selection::{resolve, SelectionError};
