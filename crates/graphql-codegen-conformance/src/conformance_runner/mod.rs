//! Running conformance cases and reporting on them.

mod backend_target;
mod case_result;
mod conformance_harness;
mod conformance_results;
mod harness_options;

pub use backend_target::BackendTarget;
pub use case_result::CaseFailure;
pub use case_result::CaseResult;
pub use conformance_harness::ConformanceHarness;
pub use conformance_harness::HarnessError;
pub use conformance_results::ConformanceResults;
pub use conformance_results::mismatch_excerpt;
pub use harness_options::DEFAULT_ROOT_NAMESPACE;
pub use harness_options::HarnessOptions;
