//! Tests for generators run as external processes.
//!
//! These tests verify:
//! - The generator receives the per-case arguments and the configuration
//!   as JSON on stdin
//! - A non-zero exit status fails the invocation with the generator's stderr
//! - A generator that can't be spawned is reported
//! - An abandoned generator process is killed and reaped

use crate::CodegenConfiguration;
use crate::TargetLanguage;
use crate::backend;
use crate::backend::BackendError;
use crate::backend::CommandBackend;
use crate::backend::InvocationError;
use crate::case_configuration;
use crate::tests::utils::write_file;
use std::path::Path;

/// A generator script that saves its stdin and the package/IR arguments into
/// the output directory instead of generating anything.
fn recording_backend(dir: &Path) -> CommandBackend {
    let script = write_file(dir, "generate.sh", concat!(
        "while [ $# -gt 0 ]; do\n",
        "  case \"$1\" in\n",
        "    --output-dir) out=\"$2\"; shift 2 ;;\n",
        "    --package-name) pkg=\"$2\"; shift 2 ;;\n",
        "    --ir-file) ir=\"$2\"; shift 2 ;;\n",
        "    *) shift ;;\n",
        "  esac\n",
        "done\n",
        "cat > \"$out/configuration.json\"\n",
        "printf '%s\\n%s\\n' \"$pkg\" \"$ir\" > \"$out/args.txt\"\n",
    ));
    CommandBackend::new("recording", TargetLanguage::Java, "sh")
        .with_args([script.to_string_lossy().into_owned()])
}

#[test]
fn generator_receives_arguments_and_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", "{}");
    let output_root = dir.path().join("out");
    let config = case_configuration::configuration("custom_scalar_type");

    let output = backend::invoke(
        &recording_backend(dir.path()),
        &ir,
        &config,
        "com.example.custom_scalar_type",
        &output_root,
    ).unwrap();

    assert_eq!(output.artifacts.len(), 2);
    let received_json = std::fs::read_to_string(output_root.join("configuration.json")).unwrap();
    let received: CodegenConfiguration = serde_json::from_str(&received_json).unwrap();
    assert_eq!(received, config);

    let args = std::fs::read_to_string(output_root.join("args.txt")).unwrap();
    assert_eq!(args, format!("com.example.custom_scalar_type\n{}\n", ir.display()));
}

#[test]
fn non_zero_exit_carries_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", "{}");
    let generator = CommandBackend::new("broken", TargetLanguage::Kotlin, "sh")
        .with_args(["-c", "echo 'unknown type Hero' >&2; exit 3", "gen"]);

    let err = backend::invoke(
        &generator,
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &dir.path().join("out"),
    ).unwrap_err();

    match err {
        InvocationError::BackendFailed {
            backend,
            err: BackendError::ExitStatus { status, stderr, .. },
        } => {
            assert_eq!(backend, "broken");
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr.trim(), "unknown type Hero");
        },
        other => panic!("Expected an ExitStatus failure, got {other:?}"),
    }
}

#[test]
fn generator_ignoring_stdin_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", "{}");
    let generator = CommandBackend::new("quiet", TargetLanguage::Java, "sh")
        .with_args(["-c", "exit 0", "gen"]);

    let output = backend::invoke(
        &generator,
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &dir.path().join("out"),
    ).unwrap();

    assert!(output.artifacts.is_empty());
}

#[test]
fn missing_generator_is_a_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let ir = write_file(dir.path(), "TestOperation.json", "{}");
    let generator = CommandBackend::new(
        "missing",
        TargetLanguage::Java,
        dir.path().join("no-such-generator"),
    );

    let err = backend::invoke(
        &generator,
        &ir,
        &CodegenConfiguration::default(),
        "com.example.case",
        &dir.path().join("out"),
    ).unwrap_err();

    assert!(
        matches!(err, InvocationError::BackendFailed { err: BackendError::SpawnError { .. }, .. }),
        "{err:?}",
    );
}

#[test]
fn command_backend_accessors() {
    let generator = CommandBackend::new("java", TargetLanguage::Java, "/usr/bin/gen")
        .with_args(["--lang", "java"]);

    assert_eq!(generator.program(), Path::new("/usr/bin/gen"));
    assert_eq!(generator.args(), ["--lang".to_string(), "java".to_string()]);
}

#[test]
fn abandoned_generator_is_killed_and_reaped() {
    let mut running = std::process::Command::new("sleep").arg("30").spawn().unwrap();

    backend::kill_and_reap(&mut running);

    let status = running.try_wait().unwrap();
    assert!(matches!(status, Some(status) if !status.success()), "{status:?}");
}

#[test]
fn reaping_an_exited_generator_is_harmless() {
    let mut exited = std::process::Command::new("sh").args(["-c", "exit 0"]).spawn().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(50));

    backend::kill_and_reap(&mut exited);

    assert!(exited.try_wait().unwrap().is_some());
}
