use crate::backend::CodegenBackend;
use crate::compile_verifier::SourceCompiler;
use crate::golden_matcher::GoldenMatchRule;
use std::sync::Arc;

/// A backend under test together with how its output is checked.
#[derive(Clone, Debug)]
pub struct BackendTarget {
    pub backend: Arc<dyn CodegenBackend>,
    pub match_rule: GoldenMatchRule,

    /// When set, every matched generated file is compiled after golden
    /// matching succeeds.
    pub compiler: Option<Arc<dyn SourceCompiler>>,
}
impl BackendTarget {
    /// Targets `backend` with the default match rule for its language and no
    /// compile verification.
    pub fn new(backend: Arc<dyn CodegenBackend>) -> Self {
        Self {
            match_rule: GoldenMatchRule::for_target(backend.target()),
            backend,
            compiler: None,
        }
    }

    pub fn with_compiler(mut self, compiler: Arc<dyn SourceCompiler>) -> Self {
        self.compiler = Some(compiler);
        self
    }

    pub fn with_match_rule(mut self, match_rule: GoldenMatchRule) -> Self {
        self.match_rule = match_rule;
        self
    }
}
