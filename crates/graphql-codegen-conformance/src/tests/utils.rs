//! Test backends and helpers.
//!
//! [`FixtureBackend`] is a tiny deterministic code generator reading a JSON
//! "IR" of the form:
//!
//! ```json
//! {
//!   "scalars": ["Date"],
//!   "operations": [{ "name": "TestQuery", "fields": [{ "name": "hero", "type": "Hero" }] }],
//!   "types": [{ "name": "Hero", "fields": [{ "name": "birthDate", "type": "Date" }] }],
//!   "fragments": []
//! }
//! ```
//!
//! Operations are written directly into the package directory, types into
//! `type/` and fragments into `fragment/`, mirroring the layout real backends
//! use.

use crate::CodegenConfiguration;
use crate::TargetLanguage;
use crate::backend::BackendError;
use crate::backend::CodegenBackend;
use crate::backend::GenerationRequest;
use crate::backend::package_path;
use crate::conformance_runner::BackendTarget;
use crate::compile_verifier::JavaSyntaxChecker;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;

pub fn get_fixture_corpus_dir() -> &'static Path {
    static FIXTURE_CORPUS_DIR: OnceLock<PathBuf> = OnceLock::new();
    FIXTURE_CORPUS_DIR.get_or_init(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/tests/fixtures/corpus")
    })
}

/// Writes `content` to `root/relative_path`, creating parent directories.
pub fn write_file(root: &Path, relative_path: &str, content: &str) -> PathBuf {
    let path = root.join(relative_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

#[derive(Debug, Deserialize)]
struct FixtureIr {
    #[serde(default)]
    scalars: Vec<String>,
    #[serde(default)]
    operations: Vec<FixtureClass>,
    #[serde(default)]
    types: Vec<FixtureClass>,
    #[serde(default)]
    fragments: Vec<FixtureClass>,
}

#[derive(Debug, Deserialize)]
struct FixtureClass {
    name: String,
    #[serde(default)]
    fields: Vec<FixtureField>,
}

#[derive(Debug, Deserialize)]
struct FixtureField {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Debug)]
pub struct FixtureBackend {
    name: String,
    target: TargetLanguage,
}
impl FixtureBackend {
    pub fn java() -> Self {
        Self {
            name: "java".to_string(),
            target: TargetLanguage::Java,
        }
    }

    pub fn kotlin() -> Self {
        Self {
            name: "kotlin".to_string(),
            target: TargetLanguage::Kotlin,
        }
    }

    fn native_type(
        &self,
        ir: &FixtureIr,
        configuration: &CodegenConfiguration,
        type_name: &str,
    ) -> String {
        if let Some(mapped) = configuration.custom_type_map.get(type_name) {
            return mapped.to_owned();
        }
        let builtin = match (self.target, type_name) {
            (TargetLanguage::Java, "Int") => Some("Integer"),
            (TargetLanguage::Kotlin, "Int") => Some("Int"),
            (_, "String" | "ID") => Some("String"),
            (_, "Boolean") => Some("Boolean"),
            (_, "Float") => Some("Double"),
            _ => None,
        };
        match builtin {
            Some(native) => native.to_string(),
            None if ir.scalars.iter().any(|scalar| scalar == type_name) => {
                match self.target {
                    TargetLanguage::Java => "Object".to_string(),
                    TargetLanguage::Kotlin => "Any".to_string(),
                }
            },
            None => type_name.to_string(),
        }
    }

    fn render(
        &self,
        ir: &FixtureIr,
        configuration: &CodegenConfiguration,
        package_name: &str,
        class: &FixtureClass,
    ) -> String {
        let fields: Vec<(String, String)> = class.fields
            .iter()
            .map(|field| (
                field.name.to_owned(),
                self.native_type(ir, configuration, &field.type_name),
            ))
            .collect();

        match self.target {
            TargetLanguage::Java => {
                let mut source = format!(
                    "package {package_name};\n\npublic final class {} {{\n",
                    class.name,
                );
                for (field_name, field_type) in fields {
                    source.push_str(&format!("  private final {field_type} {field_name};\n"));
                }
                source.push_str("}\n");
                source
            },

            TargetLanguage::Kotlin if fields.is_empty() => {
                format!("package {package_name}\n\nclass {}\n", class.name)
            },

            TargetLanguage::Kotlin => {
                let params = fields
                    .iter()
                    .map(|(field_name, field_type)| format!("  val {field_name}: {field_type}"))
                    .collect::<Vec<_>>()
                    .join(",\n");
                format!("package {package_name}\n\ndata class {}(\n{params}\n)\n", class.name)
            },
        }
    }

    fn write_class(
        &self,
        request: &GenerationRequest<'_>,
        ir: &FixtureIr,
        subpackage: Option<&str>,
        class: &FixtureClass,
    ) -> Result<(), BackendError> {
        let package_name = match subpackage {
            Some(subpackage) => format!("{}.{subpackage}", request.package_name),
            None => request.package_name.to_string(),
        };
        let dir = request.output_root.join(package_path(&package_name));
        let path = dir.join(format!("{}.{}", class.name, self.target.file_extension()));
        let source = self.render(ir, request.configuration, &package_name, class);

        std::fs::create_dir_all(&dir)
            .and_then(|()| std::fs::write(&path, source))
            .map_err(|err| BackendError::OutputWriteError { path, err })
    }
}

impl CodegenBackend for FixtureBackend {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn target(&self) -> TargetLanguage {
        self.target
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), BackendError> {
        let ir_json = std::fs::read_to_string(request.ir_file_path)
            .map_err(|err| BackendError::IrReadError {
                path: request.ir_file_path.to_path_buf(),
                err,
            })?;
        let ir: FixtureIr = serde_json::from_str(&ir_json)
            .map_err(|err| BackendError::GenerationFailed(format!("Invalid IR: {err}")))?;

        for class in &ir.operations {
            self.write_class(request, &ir, None, class)?;
        }
        for class in &ir.types {
            self.write_class(request, &ir, Some("type"), class)?;
        }
        for class in &ir.fragments {
            self.write_class(request, &ir, Some("fragment"), class)?;
        }
        Ok(())
    }
}

/// A backend that always reports a generation failure.
#[derive(Debug)]
pub struct FailingBackend;

impl CodegenBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn target(&self) -> TargetLanguage {
        TargetLanguage::Java
    }

    fn generate(&self, _request: &GenerationRequest<'_>) -> Result<(), BackendError> {
        Err(BackendError::GenerationFailed("unsupported selection".to_string()))
    }
}

/// A backend that panics mid-generation.
#[derive(Debug)]
pub struct PanickingBackend;

impl CodegenBackend for PanickingBackend {
    fn name(&self) -> &str {
        "panicking"
    }

    fn target(&self) -> TargetLanguage {
        TargetLanguage::Java
    }

    fn generate(&self, _request: &GenerationRequest<'_>) -> Result<(), BackendError> {
        panic!("template exploded")
    }
}

/// The Java fixture backend, compile-verified with the syntax checker.
pub fn java_target() -> BackendTarget {
    BackendTarget::new(Arc::new(FixtureBackend::java()))
        .with_compiler(Arc::new(JavaSyntaxChecker::new()))
}

pub fn kotlin_target() -> BackendTarget {
    BackendTarget::new(Arc::new(FixtureBackend::kotlin()))
}
