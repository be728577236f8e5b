//! Pairing golden files with generated files and comparing them.
//!
//! A single matcher implementation is parametrized by a
//! [`GoldenMatchRule`] (extension, name marker, search path list) and
//! instantiated once per backend.

mod golden_artifact;
mod golden_match_rule;
#[allow(clippy::module_inception)]
mod golden_matcher;
mod match_result;

pub use golden_artifact::GoldenArtifact;
pub use golden_match_rule::EXPECTED_MARKER;
pub use golden_match_rule::GoldenMatchRule;
pub use golden_matcher::candidate_paths;
pub use golden_matcher::compare_contents;
pub use golden_matcher::generated_file_stem;
pub use golden_matcher::golden_files;
pub use golden_matcher::match_golden_files;
pub use golden_matcher::resolve_generated_file;
pub use match_result::MatchError;
pub use match_result::MatchResult;
