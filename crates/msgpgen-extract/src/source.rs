//! Go source loading.
//!
//! Parses a file with the tree-sitter Go grammar and applies the export gate:
//! a file with no exported top-level declaration is rejected as a whole.

use crate::error::ExtractError;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Display name used for in-memory buffers.
pub const MEMORY_FILE_NAME: &str = "<memory>";

/// A parsed Go source file.
pub struct SourceFile {
    name: String,
    source: String,
    tree: Tree,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.source.len())
            .finish()
    }
}

/// Read and parse a Go source file.
pub fn load(path: &Path) -> Result<SourceFile, ExtractError> {
    let source = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SourceFile::parse(source, path.display().to_string())
}

impl SourceFile {
    /// Parse a source buffer. `name` identifies the file in errors.
    pub fn parse(source: impl Into<String>, name: impl Into<String>) -> Result<Self, ExtractError> {
        let source = source.into();
        let name = name.into();

        let mut parser = Parser::new();
        parser
            .set_language(&arborium_go::language().into())
            .map_err(|e| ExtractError::Grammar {
                file: name.clone(),
                message: e.to_string(),
            })?;

        let tree = parser.parse(&source, None).ok_or_else(|| ExtractError::Parse {
            file: name.clone(),
            line: 1,
            column: 1,
            message: "parser produced no tree".into(),
        })?;

        if let Some(bad) = first_error(tree.root_node()) {
            let pos = bad.start_position();
            let message = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                "unexpected syntax".to_string()
            };
            return Err(ExtractError::Parse {
                file: name,
                line: pos.row + 1,
                column: pos.column + 1,
                message,
            });
        }

        let file = Self { name, source, tree };
        if !file.has_exports() {
            return Err(ExtractError::NoExports { file: file.name });
        }
        Ok(file)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Whether any top-level func, method, type, var or const is exported.
    /// Imports never count.
    fn has_exports(&self) -> bool {
        let root = self.root();
        let mut cursor = root.walk();
        let mut names = Vec::new();
        for child in root.children(&mut cursor) {
            self.declared_names(child, &mut names);
        }
        names.into_iter().any(is_exported)
    }

    fn declared_names<'s>(&'s self, node: Node<'_>, out: &mut Vec<&'s str>) {
        match node.kind() {
            "function_declaration" | "method_declaration" | "type_spec" | "type_alias" => {
                if let Some(name) = node.child_by_field_name("name") {
                    out.push(self.text(name));
                }
            }
            "const_spec" | "var_spec" => {
                let mut cursor = node.walk();
                for name in node.children_by_field_name("name", &mut cursor) {
                    out.push(self.text(name));
                }
            }
            "type_declaration" | "const_declaration" | "var_declaration" | "var_spec_list" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.declared_names(child, out);
                }
            }
            _ => {}
        }
    }
}

/// Go's export rule: the name starts with an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
