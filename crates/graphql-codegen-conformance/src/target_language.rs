use serde::Deserialize;
use serde::Serialize;

/// The source language a [`CodegenBackend`](crate::backend::CodegenBackend)
/// emits.
///
/// Golden files are attributed to a backend solely by their file extension,
/// so each language maps to exactly one extension.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Java,
    Kotlin,
}
impl TargetLanguage {
    /// File extension (without the leading `.`) of sources in this language.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
        }
    }
}
impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Java => write!(f, "Java"),
            Self::Kotlin => write!(f, "Kotlin"),
        }
    }
}
