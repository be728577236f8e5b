use crate::backend::InvocationError;
use crate::compile_verifier::CompileError;
use crate::golden_matcher::MatchError;
use thiserror::Error;

/// Result of running one conformance case against every backend.
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,

    /// Golden files examined, across all backends.
    pub golden_files_checked: usize,

    /// Generated files compiled, across all compile-verified backends.
    pub compiled_units: usize,

    pub failures: Vec<CaseFailure>,
}
impl CaseResult {
    pub fn new(case_name: impl Into<String>) -> Self {
        Self {
            case_name: case_name.into(),
            golden_files_checked: 0,
            compiled_units: 0,
            failures: vec![],
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CaseFailure {
    #[error("{0}")]
    Invocation(#[from] InvocationError),

    #[error("[{backend}] {error}")]
    Match {
        backend: String,
        error: MatchError,
    },

    #[error("[{backend}] {error}")]
    Compile {
        backend: String,
        error: CompileError,
    },
}
impl CaseFailure {
    pub fn backend(&self) -> &str {
        match self {
            Self::Invocation(err) => err.backend(),
            Self::Match { backend, .. } | Self::Compile { backend, .. } => backend.as_str(),
        }
    }
}
