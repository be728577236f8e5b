//! Driving code generation backends.
//!
//! The backends themselves are external collaborators: this module only
//! knows how to hand one an IR file, a configuration and an empty output
//! root, and what was written under that root afterwards.

mod backend_invoker;
mod codegen_backend;
mod command_backend;

pub use backend_invoker::GeneratedArtifact;
pub use backend_invoker::GeneratedOutput;
pub use backend_invoker::InvocationError;
pub use backend_invoker::invoke;
pub use backend_invoker::package_path;
pub use codegen_backend::BackendError;
pub use codegen_backend::CodegenBackend;
pub use codegen_backend::GenerationRequest;
pub use command_backend::CommandBackend;
pub(crate) use command_backend::kill_and_reap;
