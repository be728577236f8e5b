use crate::CatalogOptions;
use std::path::PathBuf;

/// Namespace generated packages are nested under: case `hero_name` generates
/// into `com.example.hero_name`.
pub const DEFAULT_ROOT_NAMESPACE: &str = "com.example";

#[derive(Clone, Debug, PartialEq)]
pub struct HarnessOptions {
    /// Scratch directory backend output goes to. Each case gets
    /// `<work_dir>/<case_name>/<backend_name>`, cleared before every run.
    ///
    /// When `None`, every run generates into a fresh temporary directory that
    /// is removed once the run ends, so concurrent runs never share output
    /// roots.
    pub work_dir: Option<PathBuf>,

    pub root_namespace: String,
    pub catalog: CatalogOptions,
}
impl HarnessOptions {
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(work_dir.into());
        self
    }

    pub fn with_root_namespace(mut self, root_namespace: impl Into<String>) -> Self {
        self.root_namespace = root_namespace.into();
        self
    }
}
impl std::default::Default for HarnessOptions {
    fn default() -> Self {
        Self {
            work_dir: None,
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
            catalog: CatalogOptions::default(),
        }
    }
}
