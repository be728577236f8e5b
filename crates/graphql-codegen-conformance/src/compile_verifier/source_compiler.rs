use std::path::PathBuf;

/// One source file handed to a [`SourceCompiler`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompilationUnit {
    /// `<namespace>.<ClassName>`, e.g. `com.example.hero_name.Hero`.
    pub qualified_name: String,

    /// Where the source was read from. Only used for diagnostics.
    pub source_path: PathBuf,

    pub source: String,
}
impl CompilationUnit {
    /// The unqualified class name.
    pub fn simple_name(&self) -> &str {
        match self.qualified_name.rsplit_once('.') {
            Some((_, simple_name)) => simple_name,
            None => self.qualified_name.as_str(),
        }
    }

    /// The package the unit is expected to declare (empty for the default
    /// package).
    pub fn namespace(&self) -> &str {
        match self.qualified_name.rsplit_once('.') {
            Some((namespace, _)) => namespace,
            None => "",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}
impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single compiler message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileDiagnostic {
    /// Qualified name of the unit the message is about, when known.
    pub unit: Option<String>,

    /// 1-based.
    pub line: Option<usize>,

    /// 1-based.
    pub column: Option<usize>,

    pub severity: Severity,
    pub message: String,
}
impl CompileDiagnostic {
    pub fn error(unit: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            unit: unit.map(str::to_string),
            line: None,
            column: None,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn at(mut self, line: usize, column: Option<usize>) -> Self {
        self.line = Some(line);
        self.column = column;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
impl std::fmt::Display for CompileDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(unit) = &self.unit {
            write!(f, "{unit}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
                if let Some(column) = self.column {
                    write!(f, ":{column}")?;
                }
            }
            write!(f, ": ")?;
        }
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Something that can tell whether a set of sources compiles.
///
/// All units of a case are compiled together, so cross-references between
/// generated classes are resolved.
pub trait SourceCompiler: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn compile(&self, units: &[CompilationUnit]) -> Vec<CompileDiagnostic>;
}
