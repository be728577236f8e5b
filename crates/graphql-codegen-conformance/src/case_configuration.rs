//! Per-case compiler configuration.
//!
//! Golden files are hand-authored against an exact configuration, so the
//! mapping from case directory name to configuration lives in one explicit
//! table: [`CASE_CONFIGURATION_OVERRIDES`]. A case listed there gets its
//! override record merged onto [`CodegenConfiguration::default()`]; every
//! other case gets the defaults. Matching is exact name equality only.

use crate::CodegenConfiguration;
use crate::NullableValueType;

/// Custom scalar mapping shared by the cases that exercise custom scalars.
pub const CUSTOM_SCALAR_TYPE_MAP: &[(&str, &str)] = &[
    ("Date", "java.util.Date"),
    ("URL", "java.lang.String"),
    ("ID", "java.lang.Integer"),
];

/// A partial [`CodegenConfiguration`] attached to one case name. `None`
/// fields keep their default value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaseConfigurationOverride {
    pub case_name: &'static str,
    pub custom_type_map: Option<&'static [(&'static str, &'static str)]>,
    pub nullable_value_type: Option<NullableValueType>,
    pub use_semantic_naming: Option<bool>,
    pub generate_model_builder: Option<bool>,
    pub use_java_beans_semantic_naming: Option<bool>,
    pub suppress_raw_types_warning: Option<bool>,
    pub generate_visitor_for_polymorphic_datatypes: Option<bool>,
    pub output_package_name: Option<&'static str>,
}
impl CaseConfigurationOverride {
    const NONE: Self = Self {
        case_name: "",
        custom_type_map: None,
        nullable_value_type: None,
        use_semantic_naming: None,
        generate_model_builder: None,
        use_java_beans_semantic_naming: None,
        suppress_raw_types_warning: None,
        generate_visitor_for_polymorphic_datatypes: None,
        output_package_name: None,
    };

    /// Merges this override onto `base`, replacing only the fields this
    /// record sets.
    pub fn apply_to(&self, mut base: CodegenConfiguration) -> CodegenConfiguration {
        if let Some(type_map) = self.custom_type_map {
            base.custom_type_map = type_map
                .iter()
                .map(|(scalar, native)| (scalar.to_string(), native.to_string()))
                .collect();
        }
        if let Some(nullable_value_type) = self.nullable_value_type {
            base.nullable_value_type = nullable_value_type;
        }
        if let Some(flag) = self.use_semantic_naming {
            base.use_semantic_naming = flag;
        }
        if let Some(flag) = self.generate_model_builder {
            base.generate_model_builder = flag;
        }
        if let Some(flag) = self.use_java_beans_semantic_naming {
            base.use_java_beans_semantic_naming = flag;
        }
        if let Some(flag) = self.suppress_raw_types_warning {
            base.suppress_raw_types_warning = flag;
        }
        if let Some(flag) = self.generate_visitor_for_polymorphic_datatypes {
            base.generate_visitor_for_polymorphic_datatypes = flag;
        }
        if let Some(package_name) = self.output_package_name {
            base.output_package_name = Some(package_name.to_string());
        }
        base
    }
}

/// Every case whose configuration differs from the defaults. A case name
/// appears at most once.
pub const CASE_CONFIGURATION_OVERRIDES: &[CaseConfigurationOverride] = &[
    CaseConfigurationOverride {
        case_name: "custom_scalar_type",
        custom_type_map: Some(CUSTOM_SCALAR_TYPE_MAP),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "input_object_type",
        custom_type_map: Some(CUSTOM_SCALAR_TYPE_MAP),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "mutation_create_review",
        custom_type_map: Some(CUSTOM_SCALAR_TYPE_MAP),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "hero_details_guava",
        nullable_value_type: Some(NullableValueType::GuavaOptional),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "hero_details_java_optional",
        nullable_value_type: Some(NullableValueType::JavaOptional),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "fragments_with_type_condition_nullable",
        nullable_value_type: Some(NullableValueType::Annotated),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "hero_details_nullable",
        nullable_value_type: Some(NullableValueType::Annotated),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "hero_details_semantic_naming",
        use_semantic_naming: Some(true),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "mutation_create_review_semantic_naming",
        use_semantic_naming: Some(true),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "fragment_with_inline_fragment",
        generate_model_builder: Some(true),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "java_beans_semantic_naming",
        use_java_beans_semantic_naming: Some(true),
        generate_visitor_for_polymorphic_datatypes: Some(false),
        ..CaseConfigurationOverride::NONE
    },
    CaseConfigurationOverride {
        case_name: "custom_scalar_type_warnings",
        suppress_raw_types_warning: Some(true),
        ..CaseConfigurationOverride::NONE
    },
];

/// Looks up the override record for `case_name`, if the case has one.
pub fn case_override(case_name: &str) -> Option<&'static CaseConfigurationOverride> {
    CASE_CONFIGURATION_OVERRIDES
        .iter()
        .find(|entry| entry.case_name == case_name)
}

/// Derives the configuration a case runs with.
pub fn configuration(case_name: &str) -> CodegenConfiguration {
    match case_override(case_name) {
        Some(entry) => {
            log::trace!("Applying configuration overrides for case `{case_name}`.");
            entry.apply_to(CodegenConfiguration::default())
        },
        None => CodegenConfiguration::default(),
    }
}
