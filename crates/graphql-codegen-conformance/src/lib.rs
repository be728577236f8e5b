//! A golden-file conformance harness for GraphQL code generation backends.
//!
//! Given a corpus directory with one subdirectory per case (an IR file plus a
//! tree of golden "expected" sources), the harness runs every configured
//! [`CodegenBackend`](backend::CodegenBackend) on each case, pairs every
//! golden file with the file the backend generated for it, compares the two
//! byte-for-byte, and optionally compiles the generated output.

pub mod backend;
mod case_catalog;
pub mod case_configuration;
mod codegen_configuration;
pub mod compile_verifier;
mod conformance_case;
pub mod conformance_runner;
pub mod file_reader;
pub mod golden_matcher;
mod target_language;

pub use case_catalog::CaseCatalog;
pub use case_catalog::CatalogError;
pub use case_catalog::CatalogOptions;
pub use case_catalog::DEFAULT_IR_FILE_NAME;
pub use case_configuration::configuration;
pub use codegen_configuration::CodegenConfiguration;
pub use codegen_configuration::NullableValueType;
pub use conformance_case::ConformanceCase;
pub use target_language::TargetLanguage;

#[cfg(test)]
mod tests;
