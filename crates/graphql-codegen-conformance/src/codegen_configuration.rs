use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// How a backend represents a nullable GraphQL value in generated code.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NullableValueType {
    /// The code generator runtime's own `Optional` wrapper type.
    #[default]
    ApolloOptional,

    /// `com.google.common.base.Optional`.
    GuavaOptional,

    /// `java.util.Optional`.
    JavaOptional,

    /// Plain values marked with `@Nullable`/`@NotNull` annotations.
    Annotated,
}

/// The full set of compiler options a single conformance case runs with.
///
/// Golden files are authored against one exact configuration, so this is a
/// plain value object: built once per case by
/// [`configuration()`](crate::configuration), then only read.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodegenConfiguration {
    /// GraphQL scalar name -> fully-qualified native type name.
    pub custom_type_map: IndexMap<String, String>,
    pub nullable_value_type: NullableValueType,
    pub use_semantic_naming: bool,
    pub generate_model_builder: bool,
    pub use_java_beans_semantic_naming: bool,
    pub suppress_raw_types_warning: bool,
    pub generate_visitor_for_polymorphic_datatypes: bool,

    /// Package the generated sources are emitted into. When `None` the
    /// package is derived from the case name; see
    /// [`CodegenConfiguration::package_name`].
    pub output_package_name: Option<String>,
}
impl CodegenConfiguration {
    /// Resolves the package (namespace) generated sources land in for the
    /// given case: the explicit `output_package_name` if one is set,
    /// otherwise `<root_namespace>.<case_name>`.
    pub fn package_name(&self, root_namespace: &str, case_name: &str) -> String {
        match &self.output_package_name {
            Some(package_name) => package_name.to_owned(),
            None if root_namespace.is_empty() => case_name.to_string(),
            None => format!("{root_namespace}.{case_name}"),
        }
    }
}
impl std::default::Default for CodegenConfiguration {
    fn default() -> Self {
        Self {
            custom_type_map: IndexMap::new(),
            nullable_value_type: NullableValueType::default(),
            use_semantic_naming: false,
            generate_model_builder: false,
            use_java_beans_semantic_naming: false,
            suppress_raw_types_warning: false,
            generate_visitor_for_polymorphic_datatypes: true,
            output_package_name: None,
        }
    }
}
