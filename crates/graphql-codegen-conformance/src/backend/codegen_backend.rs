use crate::CodegenConfiguration;
use crate::TargetLanguage;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Everything a backend needs to generate sources for one case.
#[derive(Clone, Copy, Debug)]
pub struct GenerationRequest<'a> {
    pub ir_file_path: &'a Path,
    pub configuration: &'a CodegenConfiguration,

    /// Fully-qualified package the generated sources belong to.
    pub package_name: &'a str,

    /// Directory the backend writes into. The backend decides the layout
    /// below it.
    pub output_root: &'a Path,
}

/// A code generator under test.
///
/// Implementations must be deterministic: the same request always produces
/// byte-identical files. Cases run concurrently, so a backend is shared
/// across threads and may be invoked for several cases at once (each with
/// its own output root).
pub trait CodegenBackend: std::fmt::Debug + Send + Sync {
    /// Short, filesystem-safe identifier (e.g. `java`).
    fn name(&self) -> &str;

    fn target(&self) -> TargetLanguage;

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), BackendError>;
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to serialize the codegen configuration: {0}")]
    ConfigurationEncodeError(#[from] serde_json::Error),

    #[error("Generator `{}` exited with {status}:\n{stderr}", program.display())]
    ExitStatus {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Code generation failed: {0}")]
    GenerationFailed(String),

    #[error("Failed to read IR file {path:?}: {err}")]
    IrReadError {
        path: PathBuf,
        err: std::io::Error,
    },

    #[error("Failed to write generated file {path:?}: {err}")]
    OutputWriteError {
        path: PathBuf,
        err: std::io::Error,
    },

    #[error("Failed to run generator `{}`: {err}", program.display())]
    SpawnError {
        program: PathBuf,
        err: std::io::Error,
    },
}
