//! Top-level aggregate declarations.

use crate::config::ExtractOptions;
use crate::diagnostic::Diagnostic;
use crate::source::{SourceFile, is_exported};
use tree_sitter::Node;

/// A `type Name struct { ... }` declaration (or `type Name = struct { ... }`).
#[derive(Debug, Clone, Copy)]
pub struct AggregateDecl<'f> {
    pub name: &'f str,
    /// The `struct_type` node.
    pub shape: Node<'f>,
    /// 1-based line of the declaration.
    pub line: usize,
}

/// Collect struct-shaped type declarations in source order.
///
/// Everything else (functions, constants, variables, non-struct types) is
/// ignored. Generic declarations are skipped with a warning.
pub fn aggregate_decls<'f>(
    file: &'f SourceFile,
    options: &ExtractOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<AggregateDecl<'f>> {
    let root = file.root();
    let mut out = Vec::new();
    let mut cursor = root.walk();
    for decl in root.children(&mut cursor) {
        if decl.kind() != "type_declaration" {
            continue;
        }
        let mut spec_cursor = decl.walk();
        for spec in decl.children(&mut spec_cursor) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let (Some(name), Some(shape)) = (
                spec.child_by_field_name("name"),
                spec.child_by_field_name("type"),
            ) else {
                continue;
            };
            if shape.kind() != "struct_type" {
                continue;
            }
            let name = file.text(name);
            let line = spec.start_position().row + 1;
            if options.exported_only && !is_exported(name) {
                continue;
            }
            if spec.child_by_field_name("type_parameters").is_some() {
                diagnostics.push(
                    Diagnostic::warning(format!("{name} skipped: generic declarations are not supported"))
                        .in_declaration(name)
                        .at_line(line),
                );
                continue;
            }
            out.push(AggregateDecl { name, shape, line });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MEMORY_FILE_NAME;

    fn names(code: &str, options: &ExtractOptions) -> (Vec<String>, Vec<Diagnostic>) {
        let file = SourceFile::parse(code, MEMORY_FILE_NAME).unwrap();
        let mut diagnostics = Vec::new();
        let decls = aggregate_decls(&file, options, &mut diagnostics);
        (decls.iter().map(|d| d.name.to_string()).collect(), diagnostics)
    }

    #[test]
    fn test_only_structs() {
        let (names, diagnostics) = names(
            r#"package p

const Max = 3

type ID string

type Reader interface {
	Read() error
}

type User struct {
	Name string
}

func New() *User { return nil }

type (
	Point struct{ X, Y int }
	Handler func()
	inner struct{ V int }
)

type Alias = struct{ Z int }
"#,
            &ExtractOptions::default(),
        );
        assert_eq!(names, vec!["User", "Point", "inner", "Alias"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_exported_only() {
        let options = ExtractOptions {
            exported_only: true,
            ..Default::default()
        };
        let (names, _) = names(
            "package p\n\ntype User struct{ A int }\n\ntype user struct{ B int }\n",
            &options,
        );
        assert_eq!(names, vec!["User"]);
    }

    #[test]
    fn test_generic_skipped() {
        let (names, diagnostics) = names(
            "package p\n\ntype Box[T any] struct{ V T }\n\ntype Plain struct{ V int }\n",
            &ExtractOptions::default(),
        );
        assert_eq!(names, vec!["Plain"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].declaration.as_deref(), Some("Box"));
        assert_eq!(diagnostics[0].line, Some(3));
    }
}
