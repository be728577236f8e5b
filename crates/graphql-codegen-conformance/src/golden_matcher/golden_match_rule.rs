use crate::TargetLanguage;

/// Substring golden file names carry that generated file names don't
/// (`ExpectedHero.java` is the golden for `Hero.java`).
pub const EXPECTED_MARKER: &str = "Expected";

/// Subdirectories of the package directory searched for a generated file, in
/// precedence order. Backends put operation classes directly in the package
/// directory and segregate type definitions and fragment classes.
const DEFAULT_SEARCH_SUBDIRS: [&str; 3] = ["", "type", "fragment"];

/// How golden files of one backend are found and mapped to generated files.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoldenMatchRule {
    /// Only golden files with this extension are considered.
    pub extension: String,

    /// Removed (every occurrence) from a golden file name to get the
    /// generated file name.
    pub expected_marker: String,

    /// Candidate directories, relative to the package directory, tried in
    /// order. The empty string is the package directory itself.
    pub search_subdirs: Vec<String>,
}
impl GoldenMatchRule {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            expected_marker: EXPECTED_MARKER.to_string(),
            search_subdirs: DEFAULT_SEARCH_SUBDIRS
                .iter()
                .map(|subdir| subdir.to_string())
                .collect(),
        }
    }

    pub fn for_target(target: TargetLanguage) -> Self {
        Self::new(target.file_extension())
    }
}
