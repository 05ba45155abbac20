//! In-memory kubeconfig document.
//!
//! The on-disk format stores clusters, users and contexts as lists of
//! `{name, <entry>}` pairs. In memory they are keyed maps so lookups by
//! reference are direct. `BTreeMap` keeps serialization order stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::kubeconfig::wire::{ConfigV1, WireError};

/// Free-form extension payloads keyed by extension name.
pub type Extensions = BTreeMap<String, Value>;

/// A complete kubeconfig document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "ConfigV1", into = "ConfigV1")]
pub struct Config {
    /// Document-wide preferences.
    pub preferences: Preferences,

    /// Cluster entries by name.
    pub clusters: BTreeMap<String, Cluster>,

    /// Credential entries by name (the `users` list on disk).
    pub auth_infos: BTreeMap<String, AuthInfo>,

    /// Context entries by name.
    pub contexts: BTreeMap<String, Context>,

    /// Name of the context used by default. Empty when unset.
    pub current_context: String,

    /// Document-wide extensions.
    pub extensions: Extensions,
}

impl Config {
    /// Parse a document from YAML (or JSON) text.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, empty kubeconfig.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// True when the document holds no clusters, users or contexts.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.auth_infos.is_empty() && self.contexts.is_empty()
    }

    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

impl TryFrom<ConfigV1> for Config {
    type Error = WireError;

    fn try_from(wire: ConfigV1) -> Result<Self, Self::Error> {
        wire.into_config()
    }
}

/// Document-wide preferences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub colors: bool,
    pub extensions: Extensions,
}

impl Preferences {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// How to reach one API server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    pub server: String,
    pub tls_server_name: Option<String>,
    pub insecure_skip_tls_verify: bool,
    /// Path to a CA bundle file.
    pub certificate_authority: Option<String>,
    /// Inline base64 CA bundle.
    pub certificate_authority_data: Option<String>,
    pub proxy_url: Option<String>,
    pub disable_compression: bool,
    pub extensions: Extensions,
}

/// Client credentials for one identity.
///
/// `auth_provider` and `exec` are plugin configurations whose shape this
/// crate does not interpret; they are carried through verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthInfo {
    pub client_certificate: Option<String>,
    pub client_certificate_data: Option<String>,
    pub client_key: Option<String>,
    pub client_key_data: Option<String>,
    pub token: Option<String>,
    pub token_file: Option<String>,
    pub impersonate: Option<String>,
    pub impersonate_uid: Option<String>,
    pub impersonate_groups: Vec<String>,
    pub impersonate_user_extra: BTreeMap<String, Vec<String>>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auth_provider: Option<Value>,
    pub exec: Option<Value>,
    pub extensions: Extensions,
}

/// Binding of a cluster to a set of credentials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// Name of the referenced [`Cluster`].
    pub cluster: String,
    /// Name of the referenced [`AuthInfo`].
    pub auth_info: String,
    pub namespace: Option<String>,
    pub extensions: Extensions,
}
