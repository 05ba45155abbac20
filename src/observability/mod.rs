//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader, selection, sinks
//!     → tracing events (debug: progress, info: files written, warn: files skipped)
//!     → logging.rs subscriber → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
