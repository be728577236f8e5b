use crate::ConformanceCase;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, CatalogError>;

/// Name of the IR file inside each case directory unless configured
/// otherwise.
pub const DEFAULT_IR_FILE_NAME: &str = "TestOperation.json";

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogOptions {
    pub ir_file_name: String,
}
impl std::default::Default for CatalogOptions {
    fn default() -> Self {
        Self {
            ir_file_name: DEFAULT_IR_FILE_NAME.to_string(),
        }
    }
}

/// The set of conformance cases found in a corpus directory.
///
/// Every immediate subdirectory of the corpus root is one case, named after
/// the directory. Loose files at the corpus root are ignored. Cases are kept
/// sorted by name.
#[derive(Clone, Debug)]
pub struct CaseCatalog {
    corpus_root: PathBuf,
    cases: Vec<ConformanceCase>,
}
impl CaseCatalog {
    pub fn discover(corpus_root: &Path, options: &CatalogOptions) -> Result<Self> {
        if !corpus_root.exists() {
            return Err(CatalogError::CorpusRootNotFound(corpus_root.to_path_buf()));
        }
        if !corpus_root.is_dir() {
            return Err(CatalogError::CorpusRootNotADirectory(corpus_root.to_path_buf()));
        }

        log::debug!("Discovering conformance cases under {corpus_root:#?}...");
        let entries = fs::read_dir(corpus_root)
            .map_err(|err| CatalogError::ReadDirError {
                path: corpus_root.to_path_buf(),
                err,
            })?;

        let mut cases = vec![];
        for entry in entries {
            let entry = entry.map_err(|err| CatalogError::ReadDirError {
                path: corpus_root.to_path_buf(),
                err,
            })?;
            let case_dir = entry.path();
            if !case_dir.is_dir() {
                log::trace!("Skipping non-directory corpus entry: {case_dir:#?}.");
                continue;
            }

            let Some(case_name) = case_dir.file_name().and_then(|name| name.to_str()) else {
                return Err(CatalogError::InvalidCaseName(case_dir));
            };
            log::trace!("Found case `{case_name}` at {case_dir:#?}.");
            cases.push(ConformanceCase::from_case_dir(case_name, &case_dir, options));
        }

        if cases.is_empty() {
            return Err(CatalogError::NoCases(corpus_root.to_path_buf()));
        }
        cases.sort_by(|a, b| a.name.cmp(&b.name));
        log::debug!("Discovered {} conformance cases.", cases.len());

        Ok(Self {
            corpus_root: corpus_root.to_path_buf(),
            cases,
        })
    }

    pub fn corpus_root(&self) -> &Path {
        self.corpus_root.as_path()
    }

    pub fn cases(&self) -> &[ConformanceCase] {
        self.cases.as_slice()
    }

    pub fn get(&self, case_name: &str) -> Option<&ConformanceCase> {
        self.cases.iter().find(|case| case.name == case_name)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Restricts the catalog to the named cases. Naming a case that isn't in
    /// the corpus is an error rather than an empty run.
    pub fn filter(self, case_names: &[String]) -> Result<Self> {
        let unknown: Vec<String> = case_names
            .iter()
            .filter(|name| self.get(name).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(CatalogError::UnknownCases {
                corpus_root: self.corpus_root,
                case_names: unknown,
            });
        }

        let cases = self.cases
            .into_iter()
            .filter(|case| case_names.contains(&case.name))
            .collect();
        Ok(Self {
            corpus_root: self.corpus_root,
            cases,
        })
    }

    pub fn into_cases(self) -> Vec<ConformanceCase> {
        self.cases
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Corpus root {0:?} does not exist")]
    CorpusRootNotFound(PathBuf),

    #[error("Corpus root {0:?} is not a directory")]
    CorpusRootNotADirectory(PathBuf),

    #[error("Case directory {0:?} does not have a UTF-8 name")]
    InvalidCaseName(PathBuf),

    #[error("Corpus root {0:?} contains no case directories")]
    NoCases(PathBuf),

    #[error("Failed to list {path:?}: {err}")]
    ReadDirError {
        path: PathBuf,
        err: std::io::Error,
    },

    #[error("Cases not found in {corpus_root:?}: {}", case_names.join(", "))]
    UnknownCases {
        corpus_root: PathBuf,
        case_names: Vec<String>,
    },
}
