//! Output subsystem.
//!
//! # Data Flow
//! ```text
//! (context name, projected Config)
//!     → sink.rs
//!         StreamSink: YAML → shared writer (stdout), "---" between documents
//!         FileSink:   naming.rs (sanitized path) → exists? skip : write
//! ```

pub mod naming;
pub mod sink;

pub use naming::{destination_for, file_name_for};
pub use sink::{Emitted, FileSink, Sink, SinkError, StreamSink};
