use std::path::PathBuf;

/// A golden ("expected") file recorded for a case.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GoldenArtifact {
    pub case_name: String,

    /// Path relative to the case's golden directory.
    pub relative_path: PathBuf,

    pub path: PathBuf,

    /// Extension (without the leading `.`) that attributes this file to a
    /// backend.
    pub extension: String,
}
