//! Tests for invoking a backend on a single case.
//!
//! These tests verify:
//! - Generated files are collected in a deterministic order
//! - Invoking twice into fresh roots produces identical files
//! - A missing IR file or a non-empty output root is rejected up front
//! - Backend errors and panics come back as `InvocationError`s

use crate::CodegenConfiguration;
use crate::backend;
use crate::backend::InvocationError;
use crate::tests::utils::FailingBackend;
use crate::tests::utils::FixtureBackend;
use crate::tests::utils::PanickingBackend;
use crate::tests::utils::write_file;
use std::path::Path;
use std::path::PathBuf;

const HERO_IR: &str = r#"{
  "scalars": ["Date"],
  "operations": [{ "name": "TestQuery", "fields": [{ "name": "hero", "type": "Hero" }] }],
  "types": [{ "name": "Hero", "fields": [{ "name": "birthDate", "type": "Date" }] }],
  "fragments": [{ "name": "HeroDetails", "fields": [{ "name": "name", "type": "String" }] }]
}"#;

fn relative_paths(output: &backend::GeneratedOutput) -> Vec<PathBuf> {
    output.artifacts
        .iter()
        .map(|artifact| artifact.relative_path.to_owned())
        .collect()
}

// =============================================================================
// Successful invocations
// =============================================================================

#[test]
fn invoke_collects_generated_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "case/TestOperation.json", HERO_IR);
    let output_root = dir.path().join("out");

    let output = backend::invoke(
        &FixtureBackend::java(),
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &output_root,
    ).unwrap();

    assert_eq!(output.backend, "java");
    assert_eq!(output.output_root, output_root);
    assert_eq!(output.package_dir, output_root.join("com/example/case"));
    assert_eq!(relative_paths(&output), vec![
        PathBuf::from("com/example/case/TestQuery.java"),
        PathBuf::from("com/example/case/fragment/HeroDetails.java"),
        PathBuf::from("com/example/case/type/Hero.java"),
    ]);
    assert!(output.artifacts.iter().all(|artifact| artifact.path.is_file()));
    assert!(output.artifacts.iter().all(|artifact| artifact.backend == "java"));
}

#[test]
fn invoke_creates_missing_output_root() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", HERO_IR);
    let output_root = dir.path().join("deeply/nested/out");

    let output = backend::invoke(
        &FixtureBackend::kotlin(),
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &output_root,
    ).unwrap();

    assert!(output_root.is_dir());
    assert_eq!(output.artifacts.len(), 3);
}

#[test]
fn invoke_accepts_existing_empty_output_root() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", HERO_IR);
    let output_root = dir.path().join("out");
    std::fs::create_dir(&output_root).unwrap();

    let result = backend::invoke(
        &FixtureBackend::java(),
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &output_root,
    );

    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn invoke_is_deterministic_across_output_roots() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", HERO_IR);
    let backend = FixtureBackend::java();
    let config = CodegenConfiguration::default();

    let first = backend::invoke(&backend, &ir, &config, "com.example.case", &dir.path().join("a"))
        .unwrap();
    let second = backend::invoke(&backend, &ir, &config, "com.example.case", &dir.path().join("b"))
        .unwrap();

    assert_eq!(relative_paths(&first), relative_paths(&second));
    for (a, b) in first.artifacts.iter().zip(second.artifacts.iter()) {
        assert_eq!(
            std::fs::read(&a.path).unwrap(),
            std::fs::read(&b.path).unwrap(),
            "{:?} differs between invocations",
            a.relative_path,
        );
    }
}

// =============================================================================
// Rejected invocations
// =============================================================================

#[test]
fn missing_ir_file_is_rejected_without_running_backend() {
    let dir = tempfile::tempdir().unwrap();
    let output_root = dir.path().join("out");

    let err = backend::invoke(
        &PanickingBackend,
        &dir.path().join("TestOperation.json"),
        &CodegenConfiguration::default(),
        "com.example.case",
        &output_root,
    ).unwrap_err();

    assert!(matches!(err, InvocationError::IrFileNotFound { .. }), "{err:?}");
    assert_eq!(err.backend(), "panicking");
    assert!(!output_root.exists());
}

#[test]
fn non_empty_output_root_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", HERO_IR);
    let output_root = dir.path().join("out");
    // A stale file that would otherwise satisfy a golden file.
    write_file(&output_root, "com/example/case/TestQuery.java", "stale");

    let err = backend::invoke(
        &FixtureBackend::java(),
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &output_root,
    ).unwrap_err();

    assert!(matches!(err, InvocationError::OutputRootNotEmpty { .. }), "{err:?}");
    let stale = std::fs::read_to_string(output_root.join("com/example/case/TestQuery.java"))
        .unwrap();
    assert_eq!(stale, "stale");
}

#[test]
fn backend_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", HERO_IR);

    let err = backend::invoke(
        &FailingBackend,
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &dir.path().join("out"),
    ).unwrap_err();

    assert!(matches!(err, InvocationError::BackendFailed { .. }), "{err:?}");
    assert_eq!(err.backend(), "failing");
    assert!(err.to_string().contains("unsupported selection"), "{err}");
}

#[test]
fn backend_panic_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", HERO_IR);

    let err = backend::invoke(
        &PanickingBackend,
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &dir.path().join("out"),
    ).unwrap_err();

    match err {
        InvocationError::BackendPanicked { backend, message } => {
            assert_eq!(backend, "panicking");
            assert_eq!(message, "template exploded");
        },
        other => panic!("Expected a BackendPanicked error, got {other:?}"),
    }
}

#[test]
fn malformed_ir_is_a_backend_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", "{ not json");

    let err = backend::invoke(
        &FixtureBackend::java(),
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &dir.path().join("out"),
    ).unwrap_err();

    assert!(matches!(err, InvocationError::BackendFailed { .. }), "{err:?}");
}

// =============================================================================
// Package paths
// =============================================================================

#[test]
fn package_path_splits_on_dots() {
    assert_eq!(backend::package_path("com.example.hero_name"), Path::new("com/example/hero_name"));
    assert_eq!(backend::package_path("hero_name"), Path::new("hero_name"));
    assert_eq!(backend::package_path(""), PathBuf::new());
}
