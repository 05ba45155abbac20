//! Library-level explode runs against real files.

use std::fs;

use kube_explode::config::{OutputTarget, RunConfig, Selection};
use kube_explode::{explode, Error, LoadingRules};
use tempfile::tempdir;

mod common;

fn names(list: &[&str]) -> Selection {
    Selection::Names(list.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_all_contexts_produce_one_closed_file_each() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let kubeconfig = common::write_kubeconfig(src.path(), common::MULTI_CONTEXT);

    let config = RunConfig::new(Selection::All)
        .with_source(LoadingRules::explicit(&kubeconfig))
        .with_output(OutputTarget::Directory(out.path().to_path_buf()));
    let summary = explode(&config).unwrap();

    assert_eq!(summary.selected, 3);
    assert_eq!(summary.written.len(), 3);
    assert!(summary.skipped.is_empty());
    assert_eq!(
        common::file_names(out.path()),
        vec!["dev", "prod", "team_cluster-1"]
    );

    for (file, context) in [("dev", "dev"), ("prod", "prod"), ("team_cluster-1", "team/cluster-1")] {
        let doc = common::read_config(&out.path().join(file));
        common::assert_closed(&doc);
        assert_eq!(doc.current_context, context);
        assert_eq!(doc.contexts.len(), 1);
        assert_eq!(doc.clusters.len(), 1);
        assert_eq!(doc.auth_infos.len(), 1);
        assert!(doc.preferences.colors);
        assert!(doc.extensions.contains_key("owner"));
    }
}

#[test]
fn test_projected_file_holds_no_unrelated_credentials() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let kubeconfig = common::write_kubeconfig(src.path(), common::MULTI_CONTEXT);

    let config = RunConfig::new(names(&["prod"]))
        .with_source(LoadingRules::explicit(&kubeconfig))
        .with_output(OutputTarget::Directory(out.path().to_path_buf()));
    explode(&config).unwrap();

    let text = fs::read_to_string(out.path().join("prod")).unwrap();
    assert!(!text.contains("dev-secret"));
    assert!(!text.contains("unused"));
    assert!(text.contains("current-context: prod"));
}

#[test]
fn test_missing_name_writes_nothing() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let kubeconfig = common::write_kubeconfig(src.path(), common::MULTI_CONTEXT);

    let config = RunConfig::new(names(&["dev", "missing"]))
        .with_source(LoadingRules::explicit(&kubeconfig))
        .with_output(OutputTarget::Directory(out.path().to_path_buf()));
    let err = explode(&config).unwrap_err();

    assert!(matches!(err, Error::Selection(_)));
    assert!(err.to_string().contains("\"missing\""));
    assert!(common::file_names(out.path()).is_empty());
}

#[test]
fn test_existing_file_is_skipped_then_forced() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let kubeconfig = common::write_kubeconfig(src.path(), common::MULTI_CONTEXT);
    let existing = out.path().join("dev");
    fs::write(&existing, "keep me").unwrap();

    let config = RunConfig::new(names(&["dev", "prod"]))
        .with_source(LoadingRules::explicit(&kubeconfig))
        .with_output(OutputTarget::Directory(out.path().to_path_buf()));

    let summary = explode(&config).unwrap();
    assert_eq!(summary.skipped, vec![existing.clone()]);
    assert_eq!(summary.written, vec![out.path().join("prod")]);
    assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");

    let summary = explode(&config.clone().with_force(true)).unwrap();
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.written.len(), 2);
    assert_eq!(common::read_config(&existing).current_context, "dev");
}

#[test]
fn test_empty_kubeconfig_is_fatal() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let kubeconfig = common::write_kubeconfig(src.path(), "apiVersion: v1\nkind: Config\n");

    let config = RunConfig::new(Selection::All)
        .with_source(LoadingRules::explicit(&kubeconfig))
        .with_output(OutputTarget::Directory(out.path().to_path_buf()));
    let err = explode(&config).unwrap_err();

    assert_eq!(err.to_string(), "no contexts found");
}

#[test]
fn test_source_file_is_unchanged() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let kubeconfig = common::write_kubeconfig(src.path(), common::MULTI_CONTEXT);

    let config = RunConfig::new(Selection::All)
        .with_source(LoadingRules::explicit(&kubeconfig))
        .with_output(OutputTarget::Directory(out.path().to_path_buf()));
    explode(&config).unwrap();

    assert_eq!(fs::read_to_string(&kubeconfig).unwrap(), common::MULTI_CONTEXT);
}
