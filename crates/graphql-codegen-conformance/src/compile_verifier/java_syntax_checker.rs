//! An in-process syntax checker for generated Java sources.
//!
//! Every unit is parsed with the `tree-sitter-java` grammar. Any `ERROR` or
//! `MISSING` node in the resulting tree is reported as a diagnostic, so
//! malformed statements and expressions are caught as well as unbalanced
//! delimiters and unterminated literals. A unit that parses cleanly is then
//! checked for:
//!
//! - A `package` declaration that agrees with the unit's namespace
//! - A top-level type declaration named after the unit
//!
//! This is not a Java compiler: it does no name resolution or type checking.
//! Use [`JavacCompiler`](crate::compile_verifier::JavacCompiler) when a JDK
//! (and the generated code's runtime dependencies) are available.

use crate::compile_verifier::CompilationUnit;
use crate::compile_verifier::CompileDiagnostic;
use crate::compile_verifier::SourceCompiler;
use smallvec::SmallVec;
use tree_sitter::Node;
use tree_sitter::Parser;

const TYPE_DECLARATION_KINDS: [&str; 5] = [
    "annotation_type_declaration",
    "class_declaration",
    "enum_declaration",
    "interface_declaration",
    "record_declaration",
];

/// Longest stretch of offending source quoted in a syntax error.
const MAX_SNIPPET_CHARS: usize = 40;

#[derive(Clone, Copy, Debug, Default)]
pub struct JavaSyntaxChecker;
impl JavaSyntaxChecker {
    pub fn new() -> Self {
        Self
    }

    /// Checks a single unit, returning every problem found.
    pub fn check_unit(&self, unit: &CompilationUnit) -> Vec<CompileDiagnostic> {
        match java_parser() {
            Ok(mut parser) => check_parsed(&mut parser, unit),
            Err(diagnostic) => vec![diagnostic],
        }
    }
}

#[inherent::inherent]
impl SourceCompiler for JavaSyntaxChecker {
    pub fn name(&self) -> &str {
        "java-syntax-checker"
    }

    pub fn compile(&self, units: &[CompilationUnit]) -> Vec<CompileDiagnostic> {
        let mut parser = match java_parser() {
            Ok(parser) => parser,
            Err(diagnostic) => return vec![diagnostic],
        };
        units.iter()
            .flat_map(|unit| check_parsed(&mut parser, unit))
            .collect()
    }
}

fn java_parser() -> Result<Parser, CompileDiagnostic> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|err| CompileDiagnostic::error(
            None,
            format!("Failed to load the Java grammar: {err}"),
        ))?;
    Ok(parser)
}

fn check_parsed(parser: &mut Parser, unit: &CompilationUnit) -> Vec<CompileDiagnostic> {
    let unit_name = unit.qualified_name.as_str();
    let Some(tree) = parser.parse(&unit.source, None) else {
        return vec![CompileDiagnostic::error(Some(unit_name), "Failed to parse")];
    };
    let root = tree.root_node();

    let mut diagnostics = vec![];
    if root.has_error() {
        // Package and type checks are meaningless on a tree that went off the
        // rails.
        collect_syntax_errors(root, unit, &mut diagnostics);
        if diagnostics.is_empty() {
            diagnostics.push(CompileDiagnostic::error(Some(unit_name), "Syntax error"));
        }
        return diagnostics;
    }

    check_package_declaration(unit, root, &mut diagnostics);
    check_top_level_type(unit, root, &mut diagnostics);
    diagnostics
}

// =============================================================================
// Syntax errors
// =============================================================================

fn collect_syntax_errors(
    node: Node<'_>,
    unit: &CompilationUnit,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    if node.is_missing() {
        let message = if node.is_named() {
            format!("Expected {}", node.kind())
        } else {
            format!("Expected `{}`", node.kind())
        };
        diagnostics.push(diagnostic_at(unit, node, message));
        return;
    }

    if node.is_error() {
        let message = match snippet(node, &unit.source) {
            Some(text) => format!("Syntax error at `{text}`"),
            None => "Syntax error".to_string(),
        };
        diagnostics.push(diagnostic_at(unit, node, message));
        return;
    }

    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_syntax_errors(child, unit, diagnostics);
    }
}

/// The first line of the node's text, shortened to [`MAX_SNIPPET_CHARS`].
fn snippet(node: Node<'_>, source: &str) -> Option<String> {
    let text = node.utf8_text(source.as_bytes()).ok()?;
    let first_line = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    let mut snippet: String = first_line.chars().take(MAX_SNIPPET_CHARS).collect();
    if first_line.chars().count() > MAX_SNIPPET_CHARS {
        snippet.push_str("...");
    }
    Some(snippet)
}

/// An error positioned at `node`'s start (1-based line, 1-based character
/// column).
fn diagnostic_at(
    unit: &CompilationUnit,
    node: Node<'_>,
    message: impl Into<String>,
) -> CompileDiagnostic {
    let line = node.start_position().row + 1;
    let column = char_column(&unit.source, node.start_byte()) + 1;
    CompileDiagnostic::error(Some(unit.qualified_name.as_str()), message)
        .at(line, Some(column))
}

/// 0-based column of `byte_offset`, counted in characters.
fn char_column(source: &str, byte_offset: usize) -> usize {
    let byte_offset = byte_offset.min(source.len());
    let line_start = memchr::memrchr2(b'\n', b'\r', &source.as_bytes()[..byte_offset])
        .map_or(0, |idx| idx + 1);
    match source.get(line_start..byte_offset) {
        Some(text) => text.chars().count(),
        None => byte_offset - line_start,
    }
}

// =============================================================================
// Structural checks
// =============================================================================

fn is_comment(node: &Node<'_>) -> bool {
    node.kind().ends_with("comment")
}

fn check_package_declaration(
    unit: &CompilationUnit,
    root: Node<'_>,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    let expected = unit.namespace();

    let mut cursor = root.walk();
    let Some(first) = root.named_children(&mut cursor).find(|node| !is_comment(node)) else {
        diagnostics.push(CompileDiagnostic::error(
            Some(unit.qualified_name.as_str()),
            "Empty compilation unit",
        ));
        return;
    };

    if first.kind() != "package_declaration" {
        if !expected.is_empty() {
            diagnostics.push(diagnostic_at(
                unit,
                first,
                format!("Missing package declaration; expected `package {expected};`"),
            ));
        }
        return;
    }

    let mut name_cursor = first.walk();
    let declared: String = first
        .named_children(&mut name_cursor)
        .find(|node| matches!(node.kind(), "identifier" | "scoped_identifier"))
        .and_then(|node| node.utf8_text(unit.source.as_bytes()).ok())
        .unwrap_or_default()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();

    if declared != expected {
        diagnostics.push(diagnostic_at(
            unit,
            first,
            format!(
                "Declared package `{declared}` does not match the expected \
                package `{expected}`",
            ),
        ));
    }
}

fn check_top_level_type(
    unit: &CompilationUnit,
    root: Node<'_>,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    let simple_name = unit.simple_name();
    let mut cursor = root.walk();
    let declared_types: SmallVec<[&str; 4]> = root
        .named_children(&mut cursor)
        .filter(|node| TYPE_DECLARATION_KINDS.contains(&node.kind()))
        .filter_map(|node| node.child_by_field_name("name"))
        .filter_map(|name| name.utf8_text(unit.source.as_bytes()).ok())
        .collect();

    if declared_types.contains(&simple_name) {
        return;
    }

    let message = if declared_types.is_empty() {
        format!("No top-level type declaration found; expected `{simple_name}`")
    } else {
        format!(
            "No top-level type named `{simple_name}` (found: {})",
            declared_types.join(", "),
        )
    };
    diagnostics.push(CompileDiagnostic::error(Some(unit.qualified_name.as_str()), message));
}
