use crate::backend::GeneratedArtifact;
use crate::file_reader::ReadContentError;
use crate::golden_matcher::GoldenArtifact;
use std::path::PathBuf;
use thiserror::Error;

/// The outcome of checking one golden file.
#[derive(Debug)]
pub struct MatchResult {
    pub golden: GoldenArtifact,

    /// The generated file the golden file resolved to, if any.
    pub generated: Option<GeneratedArtifact>,

    pub outcome: Result<(), MatchError>,
}
impl MatchResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&MatchError> {
        self.outcome.as_ref().err()
    }

    pub fn into_error(self) -> Option<MatchError> {
        self.outcome.err()
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(
        "Generated file {generated_file:?} does not match golden file \
        {golden_file:?}"
    )]
    ContentMismatch {
        golden_file: PathBuf,
        generated_file: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(
        "Couldn't find a generated `{file_name}` for golden file \
        {golden_file:?} (tried: {})",
        format_candidates(.candidates),
    )]
    GeneratedFileNotFound {
        golden_file: PathBuf,
        file_name: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Failed to walk golden directory {golden_dir:?}: {err}")]
    GoldenWalkError {
        golden_dir: PathBuf,
        err: walkdir::Error,
    },

    #[error("{0}")]
    ReadError(#[from] ReadContentError),
}
impl MatchError {
    /// The golden file this error is about, when there is one.
    pub fn golden_file(&self) -> Option<&std::path::Path> {
        match self {
            Self::ContentMismatch { golden_file, .. }
            | Self::GeneratedFileNotFound { golden_file, .. } => Some(golden_file),
            Self::GoldenWalkError { .. } | Self::ReadError(_) => None,
        }
    }
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|path| format!("{}", path.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
