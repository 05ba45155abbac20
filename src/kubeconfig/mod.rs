//! Kubeconfig document model and persistence.
//!
//! # Data Flow
//! ```text
//! KUBECONFIG / --kubeconfig / ~/.kube/config
//!     → loader.rs (loading rules, parse, merge, resolve relative paths)
//!     → wire.rs (v1 named lists → keyed maps)
//!     → Config (schema.rs, immutable for the rest of the run)
//!
//! Projected Config
//!     → wire.rs (keyed maps → v1 named lists)
//!     → writer.rs (YAML text, file on disk)
//! ```
//!
//! # Design Decisions
//! - Cluster and user entries are carried through, never interpreted
//! - Plugin configurations (`exec`, `auth-provider`) stay opaque YAML values
//! - Maps are ordered so output is deterministic

pub mod loader;
pub mod schema;
pub mod wire;
pub mod writer;

pub use loader::{LoadError, LoadingRules};
pub use schema::{AuthInfo, Cluster, Config, Context, Extensions, Preferences};
