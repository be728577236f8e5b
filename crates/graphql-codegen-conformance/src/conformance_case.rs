use crate::CatalogOptions;
use crate::CodegenConfiguration;
use crate::case_configuration;
use std::path::Path;
use std::path::PathBuf;

/// One self-contained conformance scenario: an IR file, the configuration
/// derived from the case name, and a tree of golden files.
#[derive(Clone, Debug, PartialEq)]
pub struct ConformanceCase {
    pub name: String,
    pub ir_file_path: PathBuf,
    pub golden_dir: PathBuf,
    pub configuration: CodegenConfiguration,
}
impl ConformanceCase {
    /// Materializes the case rooted at `case_dir`. The golden directory is
    /// the case directory itself; golden files are told apart from the IR
    /// file by extension.
    pub fn from_case_dir(
        name: impl Into<String>,
        case_dir: &Path,
        options: &CatalogOptions,
    ) -> Self {
        let name = name.into();
        let configuration = case_configuration::configuration(&name);
        Self {
            ir_file_path: case_dir.join(&options.ir_file_name),
            golden_dir: case_dir.to_path_buf(),
            configuration,
            name,
        }
    }
}
