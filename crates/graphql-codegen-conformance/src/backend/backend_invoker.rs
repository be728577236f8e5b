use crate::CodegenConfiguration;
use crate::backend::BackendError;
use crate::backend::CodegenBackend;
use crate::backend::GenerationRequest;
use std::fs;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use walkdir::WalkDir;

type Result<T> = std::result::Result<T, InvocationError>;

/// A file a backend wrote during one invocation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GeneratedArtifact {
    pub backend: String,

    /// Path relative to the invocation's output root.
    pub relative_path: PathBuf,

    pub path: PathBuf,
}

/// Everything one backend invocation produced.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedOutput {
    pub backend: String,
    pub output_root: PathBuf,

    /// `output_root` joined with the package path. Golden files are resolved
    /// relative to this directory.
    pub package_dir: PathBuf,

    /// Every file under `output_root`, sorted by relative path.
    pub artifacts: Vec<GeneratedArtifact>,
}

/// Converts a dotted package name (`com.example.hero_name`) into the
/// relative directory path sources of that package live under.
pub fn package_path(package_name: &str) -> PathBuf {
    package_name
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Runs `backend` for one case.
///
/// `output_root` must be absent or empty: an invocation owns its output root
/// exclusively so that leftovers from another run can never satisfy a golden
/// file. A backend error or panic is reported as an [`InvocationError`]
/// instead of unwinding into the caller, so one broken case can't take its
/// sibling cases down with it.
pub fn invoke(
    backend: &dyn CodegenBackend,
    ir_file_path: &Path,
    configuration: &CodegenConfiguration,
    package_name: &str,
    output_root: &Path,
) -> Result<GeneratedOutput> {
    let backend_name = backend.name().to_string();
    if !ir_file_path.is_file() {
        return Err(InvocationError::IrFileNotFound {
            backend: backend_name,
            ir_file_path: ir_file_path.to_path_buf(),
        });
    }
    prepare_output_root(&backend_name, output_root)?;

    let request = GenerationRequest {
        ir_file_path,
        configuration,
        package_name,
        output_root,
    };
    log::debug!(
        "Invoking the `{backend_name}` backend for package `{package_name}` \
        into {output_root:#?}...",
    );
    match std::panic::catch_unwind(AssertUnwindSafe(|| backend.generate(&request))) {
        Ok(Ok(())) => (),
        Ok(Err(err)) => return Err(InvocationError::BackendFailed {
            backend: backend_name,
            err,
        }),
        Err(panic_payload) => return Err(InvocationError::BackendPanicked {
            backend: backend_name,
            message: panic_message(panic_payload.as_ref()),
        }),
    }

    let artifacts = collect_artifacts(&backend_name, output_root)?;
    log::debug!(
        "The `{backend_name}` backend generated {} files.",
        artifacts.len(),
    );

    Ok(GeneratedOutput {
        backend: backend_name,
        output_root: output_root.to_path_buf(),
        package_dir: output_root.join(package_path(package_name)),
        artifacts,
    })
}

fn prepare_output_root(backend_name: &str, output_root: &Path) -> Result<()> {
    let to_error = |err| InvocationError::OutputRootError {
        backend: backend_name.to_string(),
        output_root: output_root.to_path_buf(),
        err,
    };

    if output_root.exists() {
        let mut entries = fs::read_dir(output_root).map_err(to_error)?;
        if entries.next().is_some() {
            return Err(InvocationError::OutputRootNotEmpty {
                backend: backend_name.to_string(),
                output_root: output_root.to_path_buf(),
            });
        }
    } else {
        fs::create_dir_all(output_root).map_err(to_error)?;
    }
    Ok(())
}

fn collect_artifacts(
    backend_name: &str,
    output_root: &Path,
) -> Result<Vec<GeneratedArtifact>> {
    let mut artifacts = vec![];
    for entry in WalkDir::new(output_root).sort_by_file_name() {
        let entry = entry.map_err(|err| InvocationError::OutputWalkError {
            backend: backend_name.to_string(),
            err,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let relative_path = path
            .strip_prefix(output_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        log::trace!("Found generated file {relative_path:#?}.");
        artifacts.push(GeneratedArtifact {
            backend: backend_name.to_string(),
            relative_path,
            path,
        });
    }
    artifacts.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(artifacts)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.to_owned()
    } else {
        "<non-string panic payload>".to_string()
    }
}

#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("The `{backend}` backend failed: {err}")]
    BackendFailed {
        backend: String,
        err: BackendError,
    },

    #[error("The `{backend}` backend panicked: {message}")]
    BackendPanicked {
        backend: String,
        message: String,
    },

    #[error("IR file {ir_file_path:?} not found (`{backend}` backend)")]
    IrFileNotFound {
        backend: String,
        ir_file_path: PathBuf,
    },

    #[error("Failed to prepare output root {output_root:?} for the `{backend}` backend: {err}")]
    OutputRootError {
        backend: String,
        output_root: PathBuf,
        err: std::io::Error,
    },

    #[error("Output root {output_root:?} for the `{backend}` backend is not empty")]
    OutputRootNotEmpty {
        backend: String,
        output_root: PathBuf,
    },

    #[error("Failed to list files generated by the `{backend}` backend: {err}")]
    OutputWalkError {
        backend: String,
        err: walkdir::Error,
    },
}
impl InvocationError {
    pub fn backend(&self) -> &str {
        match self {
            Self::BackendFailed { backend, .. }
            | Self::BackendPanicked { backend, .. }
            | Self::IrFileNotFound { backend, .. }
            | Self::OutputRootError { backend, .. }
            | Self::OutputRootNotEmpty { backend, .. }
            | Self::OutputWalkError { backend, .. } => backend.as_str(),
        }
    }
}
