use crate::compile_verifier::CompilationUnit;
use crate::compile_verifier::CompileDiagnostic;
use crate::compile_verifier::Severity;
use crate::compile_verifier::SourceCompiler;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

/// Compiles units with an external `javac`.
///
/// Units are laid out by package in a scratch directory that is removed
/// afterwards; class files are written to a sibling scratch directory and
/// discarded. Extra arguments (typically `-classpath` for the generated
/// code's runtime) can be supplied with [`JavacCompiler::with_args`].
#[derive(Clone, Debug)]
pub struct JavacCompiler {
    program: PathBuf,
    args: Vec<String>,
}
impl JavacCompiler {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("javac"),
            args: vec![],
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn run(&self, units: &[CompilationUnit]) -> Result<Vec<CompileDiagnostic>, String> {
        let scratch_dir = tempfile::Builder::new()
            .prefix("javac-")
            .tempdir()
            .map_err(|err| format!("Failed to create a scratch directory: {err}"))?;
        let src_dir = scratch_dir.path().join("src");
        let classes_dir = scratch_dir.path().join("classes");
        std::fs::create_dir_all(&classes_dir)
            .map_err(|err| format!("Failed to create {classes_dir:?}: {err}"))?;

        let mut units_by_path = HashMap::new();
        let mut source_paths = vec![];
        for unit in units {
            let source_path = write_unit(&src_dir, unit)
                .map_err(|err| format!("Failed to stage `{}`: {err}", unit.qualified_name))?;
            units_by_path.insert(source_path.clone(), unit.qualified_name.to_owned());
            source_paths.push(source_path);
        }

        log::trace!("Running {:#?} on {} sources.", self.program, source_paths.len());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("-d")
            .arg(&classes_dir)
            .args(&source_paths)
            .output()
            .map_err(|err| format!("Failed to run {:?}: {err}", self.program))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut diagnostics = parse_javac_output(&stderr, &units_by_path);
        if !output.status.success() && !diagnostics.iter().any(CompileDiagnostic::is_error) {
            diagnostics.push(CompileDiagnostic::error(
                None,
                format!("javac exited with {}:\n{stderr}", output.status),
            ));
        }
        Ok(diagnostics)
    }
}
impl std::default::Default for JavacCompiler {
    fn default() -> Self {
        Self::new()
    }
}

#[inherent::inherent]
impl SourceCompiler for JavacCompiler {
    pub fn name(&self) -> &str {
        "javac"
    }

    pub fn compile(&self, units: &[CompilationUnit]) -> Vec<CompileDiagnostic> {
        self.run(units)
            .unwrap_or_else(|message| vec![CompileDiagnostic::error(None, message)])
    }
}

fn write_unit(src_dir: &Path, unit: &CompilationUnit) -> std::io::Result<PathBuf> {
    let package_dir = crate::backend::package_path(unit.namespace());
    let dir = src_dir.join(package_dir);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.java", unit.simple_name()));
    std::fs::write(&path, &unit.source)?;
    Ok(path)
}

/// Parses `javac`'s `<path>:<line>: <error|warning>: <message>` lines.
/// Continuation lines (source excerpts, carets) are dropped.
fn parse_javac_output(
    stderr: &str,
    units_by_path: &HashMap<PathBuf, String>,
) -> Vec<CompileDiagnostic> {
    stderr
        .lines()
        .filter_map(|line| {
            let (location, severity, message) =
                if let Some((location, message)) = line.split_once(": error: ") {
                    (location, Severity::Error, message)
                } else if let Some((location, message)) = line.split_once(": warning: ") {
                    (location, Severity::Warning, message)
                } else {
                    return None;
                };

            let (path, line_num) = match location.rsplit_once(':') {
                Some((path, line_num)) => (path, line_num.parse::<usize>().ok()),
                None => (location, None),
            };
            let unit = units_by_path
                .get(Path::new(path))
                .cloned()
                .or_else(|| Some(path.to_string()));

            Some(CompileDiagnostic {
                unit,
                line: line_num,
                column: None,
                severity,
                message: message.trim().to_string(),
            })
        })
        .collect()
}
