//! Kubeconfig loading from disk.
//!
//! # Responsibilities
//! - Decide which files make up the source document (loading rules)
//! - Parse each file and merge them into one [`Config`]
//! - Rewrite relative file references so they survive being moved
//!
//! # Design Decisions
//! - An explicit path must exist; files from `KUBECONFIG` may be missing
//! - Merging is first-wins per entry name, as kubectl does
//! - The document is returned by value and never touched again by the loader

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use serde_yaml::Value;
use thiserror::Error;

use crate::kubeconfig::schema::Config;

/// Environment variable holding a path list of kubeconfig files.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Location of the default kubeconfig, relative to the home directory.
pub const RECOMMENDED_HOME_FILE: &str = ".kube/config";

/// Error type for kubeconfig loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read kubeconfig {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse kubeconfig {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Which files to read, and in what order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingRules {
    explicit_path: Option<PathBuf>,
    precedence: Vec<PathBuf>,
}

impl LoadingRules {
    /// Load exactly one file, which must exist.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit_path: Some(path.into()),
            precedence: Vec::new(),
        }
    }

    /// Resolve the precedence list from `KUBECONFIG` and the home directory.
    pub fn from_env() -> Self {
        Self::from_parts(env::var_os(KUBECONFIG_ENV), dirs::home_dir())
    }

    /// Build the precedence list from an optional `KUBECONFIG` value.
    ///
    /// Empty entries and repeated paths are dropped. Without any usable entry
    /// the list falls back to `<home>/.kube/config`.
    pub fn from_parts(kubeconfig: Option<OsString>, home: Option<PathBuf>) -> Self {
        let mut precedence: Vec<PathBuf> = Vec::new();
        if let Some(list) = kubeconfig {
            for path in env::split_paths(&list) {
                if path.as_os_str().is_empty() || precedence.contains(&path) {
                    continue;
                }
                precedence.push(path);
            }
        }

        if precedence.is_empty() {
            precedence.push(home.unwrap_or_default().join(RECOMMENDED_HOME_FILE));
        }

        Self {
            explicit_path: None,
            precedence,
        }
    }

    pub fn explicit_path(&self) -> Option<&Path> {
        self.explicit_path.as_deref()
    }

    pub fn precedence(&self) -> &[PathBuf] {
        &self.precedence
    }

    /// Load and merge the configured files.
    pub fn load(&self) -> Result<Config, LoadError> {
        if let Some(path) = &self.explicit_path {
            return load_file(path);
        }

        let mut merged = Config::default();
        for path in &self.precedence {
            match load_file(path) {
                Ok(config) => merge_into(&mut merged, config),
                Err(e) if e.is_not_found() => {
                    tracing::debug!(path = %path.display(), "Kubeconfig not found, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(merged)
    }
}

/// Read and parse a single kubeconfig file.
pub fn load_file(path: &Path) -> Result<Config, LoadError> {
    let io_error = |source: io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read_to_string(path).map_err(io_error)?;
    let mut config = Config::from_yaml(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = absolute_parent(path).map_err(io_error)?;
    resolve_local_paths(&mut config, &base);

    tracing::debug!(
        path = %path.display(),
        contexts = config.contexts.len(),
        clusters = config.clusters.len(),
        users = config.auth_infos.len(),
        "Kubeconfig loaded"
    );
    Ok(config)
}

fn absolute_parent(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    Ok(absolute.parent().map(Path::to_path_buf).unwrap_or(absolute))
}

/// Make every relative file reference absolute against `base`.
pub fn resolve_local_paths(config: &mut Config, base: &Path) {
    for cluster in config.clusters.values_mut() {
        resolve_path(&mut cluster.certificate_authority, base);
    }
    for auth in config.auth_infos.values_mut() {
        resolve_path(&mut auth.client_certificate, base);
        resolve_path(&mut auth.client_key, base);
        resolve_path(&mut auth.token_file, base);
        if let Some(exec) = auth.exec.as_mut() {
            resolve_exec_command(exec, base);
        }
    }
}

/// Bare command names are looked up on `PATH`; only paths are rewritten.
fn resolve_exec_command(exec: &mut Value, base: &Path) {
    let Some(Value::String(command)) = exec.as_mapping_mut().and_then(|m| m.get_mut("command")) else {
        return;
    };
    if command.contains(MAIN_SEPARATOR) && Path::new(command.as_str()).is_relative() {
        *command = base.join(command.as_str()).to_string_lossy().into_owned();
    }
}

fn resolve_path(reference: &mut Option<String>, base: &Path) {
    if let Some(value) = reference {
        if !value.is_empty() && Path::new(value.as_str()).is_relative() {
            *value = base.join(value.as_str()).to_string_lossy().into_owned();
        }
    }
}

/// Merge `next` into `merged`; entries already present win.
fn merge_into(merged: &mut Config, next: Config) {
    if merged.preferences.is_default() {
        merged.preferences = next.preferences;
    }
    if merged.current_context.is_empty() {
        merged.current_context = next.current_context;
    }
    merge_map(&mut merged.clusters, next.clusters);
    merge_map(&mut merged.auth_infos, next.auth_infos);
    merge_map(&mut merged.contexts, next.contexts);
    merge_map(&mut merged.extensions, next.extensions);
}

fn merge_map<T>(into: &mut BTreeMap<String, T>, from: BTreeMap<String, T>) {
    for (name, entry) in from {
        into.entry(name).or_insert(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const FIRST: &str = r#"
current-context: a
clusters:
- name: shared
  cluster: {server: https://first}
users:
- name: shared-user
  user: {token: first}
contexts:
- name: a
  context: {cluster: shared, user: shared-user}
"#;

    const SECOND: &str = r#"
current-context: b
preferences: {colors: true}
clusters:
- name: shared
  cluster: {server: https://second}
- name: other
  cluster: {server: https://other}
users:
- name: other-user
  user: {token: second}
contexts:
- name: b
  context: {cluster: other, user: other-user}
"#;

    #[test]
    fn test_from_parts_defaults_to_home_file() {
        let rules = LoadingRules::from_parts(None, Some(PathBuf::from("/home/op")));
        assert_eq!(rules.precedence(), &[PathBuf::from("/home/op/.kube/config")]);
        assert!(rules.explicit_path().is_none());
    }

    #[test]
    fn test_from_parts_splits_and_dedups_env_list() {
        let list = env::join_paths(["/a/one", "", "/b/two", "/a/one"]).unwrap();
        let rules = LoadingRules::from_parts(Some(list), Some(PathBuf::from("/home/op")));
        assert_eq!(
            rules.precedence(),
            &[PathBuf::from("/a/one"), PathBuf::from("/b/two")]
        );
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = LoadingRules::explicit(dir.path().join("nope")).load().unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "broken", "clusters: [unterminated");
        let err = LoadingRules::explicit(&path).load().unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_precedence_merge_first_wins() {
        let dir = tempdir().unwrap();
        let first = write(dir.path(), "first", FIRST);
        let second = write(dir.path(), "second", SECOND);
        let missing = dir.path().join("missing");

        let list = env::join_paths([&missing, &first, &second]).unwrap();
        let config = LoadingRules::from_parts(Some(list), None).load().unwrap();

        assert_eq!(config.current_context, "a");
        assert_eq!(config.clusters["shared"].server, "https://first");
        assert_eq!(config.clusters["other"].server, "https://other");
        assert_eq!(config.contexts.len(), 2);
        assert_eq!(config.auth_infos.len(), 2);
        assert!(config.preferences.colors);
    }

    #[test]
    fn test_relative_references_are_resolved() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "config",
            r#"
clusters:
- name: c
  cluster:
    server: https://c
    certificate-authority: ca.crt
users:
- name: u
  user:
    client-certificate: certs/u.crt
    client-key: /abs/u.key
    tokenFile: ""
    exec:
      command: ./bin/get-token
- name: plugin
  user:
    exec:
      command: aws
      args: [eks, get-token]
"#,
        );

        let config = load_file(&path).unwrap();
        let ca = config.clusters["c"].certificate_authority.clone().unwrap();
        assert_eq!(PathBuf::from(ca), dir.path().join("ca.crt"));

        let user = &config.auth_infos["u"];
        assert_eq!(
            PathBuf::from(user.client_certificate.clone().unwrap()),
            dir.path().join("certs/u.crt")
        );
        assert_eq!(user.client_key.as_deref(), Some("/abs/u.key"));
        assert_eq!(user.token_file.as_deref(), Some(""));

        let command = user.exec.as_ref().and_then(|exec| exec["command"].as_str()).unwrap();
        assert_eq!(PathBuf::from(command), dir.path().join("./bin/get-token"));
        assert!(Path::new(command).is_absolute());

        let plugin = config.auth_infos["plugin"].exec.as_ref().unwrap();
        assert_eq!(plugin["command"].as_str(), Some("aws"));
    }
}
