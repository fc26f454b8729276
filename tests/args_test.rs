use std::path::PathBuf;

use clap::Parser;
use pypublish::cli::Args;
use pypublish::domain::{Workflow, WorkflowKind};
use serial_test::serial;

fn parse(argv: &[&str]) -> Args {
    let mut full = vec!["pypublish"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).expect("arguments should parse")
}

#[test]
fn test_positional_is_version_for_publish() {
    let options = parse(&["0.2.0", "--no-upload"]).workflow_options();
    assert_eq!(options.version.as_deref(), Some("0.2.0"));
    assert_eq!(options.repo_name, None);
    assert!(options.no_upload);
}

#[test]
fn test_positional_is_repo_name_for_init() {
    let options = parse(&["--init-repo", "myproject", "--private"]).workflow_options();
    assert_eq!(options.repo_name.as_deref(), Some("myproject"));
    assert_eq!(options.version, None);
    assert!(options.private);

    let workflow = Workflow::from_options(options).unwrap();
    assert_eq!(workflow.kind(), WorkflowKind::Init);
}

#[test]
fn test_delete_tag_flag_before_version() {
    let options = parse(&["--delete-tag", "v0.2.0"]).workflow_options();
    let workflow = Workflow::from_options(options).unwrap();
    match workflow {
        Workflow::DeleteTag { version } => assert_eq!(version.tag_name(), "v0.2.0"),
        other => panic!("expected delete-tag, got {:?}", other),
    }
}

#[test]
fn test_bare_delete_tag_is_usage_error() {
    let options = parse(&["--delete-tag"]).workflow_options();
    let err = Workflow::from_options(options).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn test_unknown_flag_rejected_by_clap() {
    assert!(Args::try_parse_from(["pypublish", "1.0.0", "--upload-twice"]).is_err());
}

#[test]
fn test_commit_message_override() {
    let options = parse(&["--init-repo", "-m", "chore: scaffold"]).workflow_options();
    assert_eq!(options.commit_message, "chore: scaffold");
}

#[test]
fn test_verbose_counts() {
    assert_eq!(parse(&["1.0.0"]).verbose, 0);
    assert_eq!(parse(&["1.0.0", "-vv"]).verbose, 2);
}

#[test]
#[serial]
fn test_config_defaults() {
    std::env::remove_var("PYPUBLISH_REMOTE");
    std::env::remove_var("PYPUBLISH_REPOSITORY");

    let config = parse(&["1.0.0"]).config(PathBuf::from("/work/pkg"));
    assert_eq!(config.project_dir, PathBuf::from("/work/pkg"));
    assert_eq!(config.remote, "origin");
    assert_eq!(config.dist_path(), PathBuf::from("/work/pkg/dist"));
    assert_eq!(config.repository, None);
    assert_eq!(config.tools.git, "git");
}

#[test]
#[serial]
fn test_config_from_flags() {
    let config = parse(&[
        "1.0.0",
        "--remote",
        "upstream",
        "--python",
        "python3.12",
        "--repository",
        "testpypi",
        "--dist-dir",
        "out",
        "-C",
        "pkg",
    ])
    .config(PathBuf::from("/work"));

    assert_eq!(config.project_dir, PathBuf::from("/work/pkg"));
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.tools.python, "python3.12");
    assert_eq!(config.repository.as_deref(), Some("testpypi"));
    assert_eq!(config.dist_path(), PathBuf::from("/work/pkg/out"));
}

#[test]
#[serial]
fn test_config_from_environment() {
    std::env::set_var("PYPUBLISH_REMOTE", "mirror");
    std::env::set_var("PYPUBLISH_REPOSITORY", "testpypi");

    let config = parse(&["1.0.0"]).config(PathBuf::from("/work"));

    std::env::remove_var("PYPUBLISH_REMOTE");
    std::env::remove_var("PYPUBLISH_REPOSITORY");

    assert_eq!(config.remote, "mirror");
    assert_eq!(config.repository.as_deref(), Some("testpypi"));
}

#[test]
#[serial]
fn test_flag_overrides_environment() {
    std::env::set_var("PYPUBLISH_REMOTE", "mirror");
    let config = parse(&["1.0.0", "--remote", "origin"]).config(PathBuf::from("/work"));
    std::env::remove_var("PYPUBLISH_REMOTE");

    assert_eq!(config.remote, "origin");
}
