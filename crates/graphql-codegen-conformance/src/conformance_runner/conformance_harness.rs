use crate::CaseCatalog;
use crate::CatalogError;
use crate::ConformanceCase;
use crate::backend;
use crate::backend::GeneratedArtifact;
use crate::backend::InvocationError;
use crate::compile_verifier;
use crate::conformance_runner::BackendTarget;
use crate::conformance_runner::CaseFailure;
use crate::conformance_runner::CaseResult;
use crate::conformance_runner::ConformanceResults;
use crate::conformance_runner::HarnessOptions;
use crate::golden_matcher;
use rayon::prelude::IntoParallelRefIterator;
use rayon::prelude::ParallelIterator;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

const SCRATCH_DIR_PREFIX: &str = "graphql-codegen-conformance-";

/// Drives every configured backend over a corpus of conformance cases.
///
/// Per case the steps are strictly sequential: invoke each backend, match
/// each backend's golden files, then compile-verify the backends that have a
/// compiler attached. Cases are independent of each other and run in
/// parallel; a failing case never stops its siblings.
#[derive(Clone, Debug)]
pub struct ConformanceHarness {
    options: HarnessOptions,
    targets: Vec<BackendTarget>,
}
impl ConformanceHarness {
    pub fn new(options: HarnessOptions) -> Self {
        Self {
            options,
            targets: vec![],
        }
    }

    pub fn with_target(mut self, target: BackendTarget) -> Self {
        self.targets.push(target);
        self
    }

    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    pub fn targets(&self) -> &[BackendTarget] {
        self.targets.as_slice()
    }

    pub fn discover(&self, corpus_root: &Path) -> Result<CaseCatalog, CatalogError> {
        CaseCatalog::discover(corpus_root, &self.options.catalog)
    }

    /// Discovers and runs every case under `corpus_root`. Only a malformed
    /// corpus or an unusable work dir is an `Err`; case failures are reported
    /// in the results.
    pub fn run_corpus(&self, corpus_root: &Path) -> Result<ConformanceResults, HarnessError> {
        let catalog = self.discover(corpus_root)?;
        if let Some(work_dir) = &self.options.work_dir {
            check_work_dir_outside(work_dir, corpus_root)?;
        }
        self.run_cases(catalog.cases())
    }

    pub fn run_cases(&self, cases: &[ConformanceCase]) -> Result<ConformanceResults, HarnessError> {
        let scratch_dir;
        let work_dir: &Path = match &self.options.work_dir {
            Some(work_dir) => {
                for case in cases {
                    check_work_dir_outside(work_dir, &case.golden_dir)?;
                }
                work_dir.as_path()
            },
            None => {
                scratch_dir = tempfile::Builder::new()
                    .prefix(SCRATCH_DIR_PREFIX)
                    .tempdir()
                    .map_err(HarnessError::ScratchDirError)?;
                scratch_dir.path()
            },
        };

        log::debug!(
            "Running {} conformance cases against {} backends in {work_dir:?}...",
            cases.len(),
            self.targets.len(),
        );
        let mut results: Vec<CaseResult> = cases
            .par_iter()
            .map(|case| self.run_case(case, work_dir))
            .collect();
        results.sort_by(|a, b| a.case_name.cmp(&b.case_name));

        let mut conformance_results = ConformanceResults::new();
        for result in results {
            conformance_results.add(result);
        }
        Ok(conformance_results)
    }

    fn run_case(&self, case: &ConformanceCase, work_dir: &Path) -> CaseResult {
        let mut result = CaseResult::new(&case.name);
        let package_name = case.configuration.package_name(
            &self.options.root_namespace,
            &case.name,
        );
        let case_work_dir = work_dir.join(&case.name);

        let mut outputs = vec![];
        for target in &self.targets {
            let backend_name = target.backend.name();
            let output_root = case_work_dir.join(backend_name);
            let invocation = clear_output_root(backend_name, &output_root)
                .and_then(|()| backend::invoke(
                    target.backend.as_ref(),
                    &case.ir_file_path,
                    &case.configuration,
                    &package_name,
                    &output_root,
                ));
            match invocation {
                Ok(output) => outputs.push((target, output)),
                Err(err) => {
                    log::debug!("Case `{}` failed: {err}", case.name);
                    result.failures.push(err.into());
                },
            }
        }

        let mut matched: Vec<(&BackendTarget, Vec<GeneratedArtifact>)> = vec![];
        for (target, output) in &outputs {
            let match_results = match golden_matcher::match_golden_files(
                &case.name,
                &case.golden_dir,
                output,
                &target.match_rule,
            ) {
                Ok(match_results) => match_results,
                Err(error) => {
                    result.failures.push(CaseFailure::Match {
                        backend: output.backend.to_owned(),
                        error,
                    });
                    continue;
                },
            };

            if match_results.is_empty() {
                log::warn!(
                    "Case `{}` has no `.{}` golden files for the `{}` backend.",
                    case.name,
                    target.match_rule.extension,
                    output.backend,
                );
            }
            result.golden_files_checked += match_results.len();

            let mut artifacts = vec![];
            let mut all_matched = true;
            for match_result in match_results {
                match match_result.outcome {
                    Ok(()) => artifacts.extend(match_result.generated),
                    Err(error) => {
                        all_matched = false;
                        result.failures.push(CaseFailure::Match {
                            backend: output.backend.to_owned(),
                            error,
                        });
                    },
                }
            }
            if all_matched {
                matched.push((*target, artifacts));
            }
        }

        for (target, artifacts) in matched {
            let Some(compiler) = &target.compiler else {
                continue;
            };
            match compile_verifier::verify(compiler.as_ref(), &artifacts, &package_name) {
                Ok(compiled_units) => result.compiled_units += compiled_units,
                Err(error) => result.failures.push(CaseFailure::Compile {
                    backend: target.backend.name().to_string(),
                    error,
                }),
            }
        }

        log::debug!(
            "Case `{}` {} ({} golden files, {} compiled units).",
            case.name,
            if result.passed() { "passed" } else { "failed" },
            result.golden_files_checked,
            result.compiled_units,
        );
        result
    }
}

/// Removes whatever a previous run left in `output_root`.
fn clear_output_root(backend_name: &str, output_root: &Path) -> Result<(), InvocationError> {
    if !output_root.exists() {
        return Ok(());
    }
    log::trace!("Clearing stale output root {output_root:#?}.");
    std::fs::remove_dir_all(output_root)
        .map_err(|err| InvocationError::OutputRootError {
            backend: backend_name.to_string(),
            output_root: output_root.to_path_buf(),
            err,
        })
}

/// Fails if `work_dir` is `golden_dir` or lies anywhere below it. Generated
/// files there would be picked up as golden files of their own.
fn check_work_dir_outside(work_dir: &Path, golden_dir: &Path) -> Result<(), HarnessError> {
    let resolved_work_dir = resolve_path(work_dir);
    let resolved_golden_dir = resolve_path(golden_dir);
    if resolved_work_dir.starts_with(&resolved_golden_dir) {
        return Err(HarnessError::WorkDirInsideCorpus {
            work_dir: work_dir.to_path_buf(),
            golden_dir: golden_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Makes `path` absolute and resolves symlinks in its longest existing
/// prefix. The rest need not exist yet.
fn resolve_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    for ancestor in absolute.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize()
            && let Ok(rest) = absolute.strip_prefix(ancestor) {
            return canonical.join(rest);
        }
    }
    absolute
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    CatalogError(#[from] CatalogError),

    #[error("Failed to create a scratch work dir: {0}")]
    ScratchDirError(std::io::Error),

    #[error(
        "Work dir {work_dir:?} is inside the golden dir {golden_dir:?}; \
        generated files would be read back as golden files"
    )]
    WorkDirInsideCorpus {
        work_dir: PathBuf,
        golden_dir: PathBuf,
    },
}
