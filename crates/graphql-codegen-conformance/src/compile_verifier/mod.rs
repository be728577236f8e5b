//! Compiling generated sources to catch golden files that match but are
//! themselves broken.

#[allow(clippy::module_inception)]
mod compile_verifier;
mod java_syntax_checker;
mod javac_compiler;
mod source_compiler;

pub use compile_verifier::CompileError;
pub use compile_verifier::compilation_units;
pub use compile_verifier::verify;
pub use java_syntax_checker::JavaSyntaxChecker;
pub use javac_compiler::JavacCompiler;
pub use source_compiler::CompilationUnit;
pub use source_compiler::CompileDiagnostic;
pub use source_compiler::Severity;
pub use source_compiler::SourceCompiler;
