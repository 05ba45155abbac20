//! Shared fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use kube_explode::Config;

/// Three contexts, one of them with a `/` in its name, sharing a cluster.
pub const MULTI_CONTEXT: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
preferences:
  colors: true
clusters:
- name: dev-cluster
  cluster:
    server: https://dev.example.com:6443
    certificate-authority-data: ZGV2LWNh
- name: prod-cluster
  cluster:
    server: https://prod.example.com:6443
    certificate-authority-data: cHJvZC1jYQ==
- name: unused-cluster
  cluster:
    server: https://unused.example.com
users:
- name: dev-user
  user:
    token: dev-secret
- name: prod-user
  user:
    client-certificate-data: cHJvZC1jZXJ0
    client-key-data: cHJvZC1rZXk=
- name: unused-user
  user:
    token: unused-secret
contexts:
- name: dev
  context:
    cluster: dev-cluster
    user: dev-user
    namespace: sandbox
- name: prod
  context:
    cluster: prod-cluster
    user: prod-user
- name: team/cluster-1
  context:
    cluster: prod-cluster
    user: dev-user
extensions:
- name: owner
  extension:
    team: platform
"#;

/// Write `content` as a kubeconfig under `dir` and return its path.
pub fn write_kubeconfig(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config");
    fs::write(&path, content).unwrap();
    path
}

/// Parse an output file, asserting it exists.
pub fn read_config(path: &Path) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    Config::from_yaml(&text).unwrap()
}

/// Every reference in `config` resolves inside `config`.
pub fn assert_closed(config: &Config) {
    for (name, context) in &config.contexts {
        assert!(
            config.clusters.contains_key(&context.cluster),
            "context {name} references missing cluster {}",
            context.cluster
        );
        assert!(
            config.auth_infos.contains_key(&context.auth_info),
            "context {name} references missing user {}",
            context.auth_info
        );
    }
}

/// Names of the files directly inside `dir`, sorted.
#[allow(dead_code)]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
