use crate::backend;
use crate::backend::GeneratedArtifact;
use crate::compile_verifier::CompilationUnit;
use crate::compile_verifier::CompileDiagnostic;
use crate::compile_verifier::SourceCompiler;
use crate::file_reader;
use crate::file_reader::ReadContentError;
use thiserror::Error;

type Result<T> = std::result::Result<T, CompileError>;

/// Loads generated files as compilation units of `namespace`.
///
/// Each unit is named after its file stem. Files in a subdirectory of the
/// namespace's package directory (`type/`, `fragment/`) belong to the
/// corresponding subpackage: `<namespace>.type.Hero`.
pub fn compilation_units(
    artifacts: &[GeneratedArtifact],
    namespace: &str,
) -> Result<Vec<CompilationUnit>> {
    let package_dir = backend::package_path(namespace);
    artifacts
        .iter()
        .map(|artifact| -> Result<CompilationUnit> {
            let mut segments: Vec<String> = vec![];
            if !namespace.is_empty() {
                segments.push(namespace.to_string());
            }
            if let Ok(within_package) = artifact.relative_path.strip_prefix(&package_dir)
                && let Some(subpackage) = within_package.parent() {
                segments.extend(
                    subpackage
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy().into_owned()),
                );
            }
            segments.push(
                artifact.path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );

            Ok(CompilationUnit {
                qualified_name: segments.join("."),
                source_path: artifact.path.to_owned(),
                source: file_reader::read_content(&artifact.path)?,
            })
        })
        .collect()
}

/// Compiles every artifact together and fails if the compiler reports any
/// error. Returns the number of units compiled.
pub fn verify(
    compiler: &dyn SourceCompiler,
    artifacts: &[GeneratedArtifact],
    namespace: &str,
) -> Result<usize> {
    let units = compilation_units(artifacts, namespace)?;
    if units.is_empty() {
        return Ok(0);
    }

    log::debug!(
        "Compiling {} units in `{namespace}` with {}...",
        units.len(),
        compiler.name(),
    );
    let diagnostics = compiler.compile(&units);
    for warning in diagnostics.iter().filter(|diag| !diag.is_error()) {
        log::debug!("{warning}");
    }

    if diagnostics.iter().any(CompileDiagnostic::is_error) {
        return Err(CompileError::Diagnostics {
            compiler: compiler.name().to_string(),
            namespace: namespace.to_string(),
            diagnostics,
        });
    }
    Ok(units.len())
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(
        "Generated sources in `{namespace}` failed to compile with \
        {compiler}:\n{}",
        format_diagnostics(.diagnostics),
    )]
    Diagnostics {
        compiler: String,
        namespace: String,
        diagnostics: Vec<CompileDiagnostic>,
    },

    #[error("Failed to load a generated source: {0}")]
    ReadError(#[from] ReadContentError),
}
impl CompileError {
    pub fn diagnostics(&self) -> &[CompileDiagnostic] {
        match self {
            Self::Diagnostics { diagnostics, .. } => diagnostics.as_slice(),
            Self::ReadError(_) => &[],
        }
    }
}

fn format_diagnostics(diagnostics: &[CompileDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diag| format!("  {diag}"))
        .collect::<Vec<_>>()
        .join("\n")
}
