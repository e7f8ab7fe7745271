//! Field policy: naming, tag overrides, exclusion, embedding and
//! multi-name expansion.

use crate::config::DuplicateKeys;
use crate::diagnostic::Diagnostic;
use crate::element::Extractor;
use crate::error::ExtractError;
use crate::ir::{Element, Field};
use crate::tag;
use tree_sitter::Node;

/// Outcome of tag resolution for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputKey {
    Key(String),
    Excluded,
}

impl<'f> Extractor<'f> {
    /// Extract the fields of a `struct_type` node in declaration order.
    pub(crate) fn extract_fields(&mut self, shape: Node<'f>) -> Result<Vec<Field>, ExtractError> {
        let mut cursor = shape.walk();
        let Some(list) = shape
            .named_children(&mut cursor)
            .find(|c| c.kind() == "field_declaration_list")
        else {
            return Ok(Vec::new());
        };

        let mut list_cursor = list.walk();
        let decls: Vec<Node<'f>> = list
            .named_children(&mut list_cursor)
            .filter(|c| c.kind() == "field_declaration")
            .collect();

        let mut fields = Vec::with_capacity(decls.len());
        for decl in decls {
            self.extract_declaration(decl, &mut fields)?;
        }
        self.resolve_duplicates(fields)
    }

    fn extract_declaration(&mut self, decl: Node<'f>, out: &mut Vec<(Field, usize)>) -> Result<(), ExtractError> {
        let Some(ty) = decl.child_by_field_name("type") else {
            return Ok(());
        };
        let line = decl.start_position().row + 1;
        let mut cursor = decl.walk();
        let names: Vec<&'f str> = decl
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.file.text(n))
            .collect();

        match names.as_slice() {
            [] => self.extract_embedded(decl, ty, line, out),
            [name] => {
                let name = *name;
                self.extract_single(decl, name, ty, false, line, out)
            }
            many => {
                // `A, B T`: one field per name, each with its own element.
                // Tags are not consulted here.
                for &name in many {
                    if let Some(element) = self.build_field(name, ty, false, line)? {
                        let field = Field {
                            source_name: name.to_string(),
                            output_key: name.to_string(),
                            element,
                        };
                        out.push((field, line));
                    }
                }
                Ok(())
            }
        }
    }

    /// Embedded `T` or `*T`. The field takes the bare type name.
    fn extract_embedded(
        &mut self,
        decl: Node<'f>,
        ty: Node<'f>,
        line: usize,
        out: &mut Vec<(Field, usize)>,
    ) -> Result<(), ExtractError> {
        let mut cursor = decl.walk();
        let indirect = decl.children(&mut cursor).any(|c| !c.is_named() && c.kind() == "*");

        if ty.kind() != "type_identifier" {
            let text = self.file.text(ty);
            self.warn(
                format!("embedded field `{text}` skipped: no derivable field name"),
                text,
                line,
            );
            return Ok(());
        }
        let name = self.file.text(ty);
        self.extract_single(decl, name, ty, indirect, line, out)
    }

    fn extract_single(
        &mut self,
        decl: Node<'f>,
        name: &'f str,
        ty: Node<'f>,
        indirect: bool,
        line: usize,
        out: &mut Vec<(Field, usize)>,
    ) -> Result<(), ExtractError> {
        let output_key = match self.output_key(decl, name) {
            OutputKey::Key(key) => key,
            OutputKey::Excluded => {
                let path = self.field_path(name);
                self.diagnostics.push(
                    Diagnostic::notice(format!("field {path} excluded by tag"))
                        .in_declaration(self.declaration)
                        .on_field(path)
                        .at_line(line),
                );
                return Ok(());
            }
        };

        if let Some(element) = self.build_field(name, ty, indirect, line)? {
            let field = Field {
                source_name: name.to_string(),
                output_key,
                element,
            };
            out.push((field, line));
        }
        Ok(())
    }

    /// Resolve the output key from the field's struct tag.
    fn output_key(&self, decl: Node<'f>, name: &str) -> OutputKey {
        let value = decl
            .child_by_field_name("tag")
            .and_then(|t| tag::literal_value(self.file.text(t)))
            .and_then(|t| tag::lookup(&t, &self.options.tag_key));
        match value.as_deref() {
            Some("-") => OutputKey::Excluded,
            None | Some("") => OutputKey::Key(name.to_string()),
            Some(key) => OutputKey::Key(key.to_string()),
        }
    }

    /// Build a field's element, warning when the type is unsupported.
    fn build_field(
        &mut self,
        name: &'f str,
        ty: Node<'f>,
        indirect: bool,
        line: usize,
    ) -> Result<Option<Element>, ExtractError> {
        self.path.push(name);
        let built = self.build(ty);
        self.path.pop();

        let element = match built? {
            Some(e) if indirect => Some(Element::Optional(Box::new(e))),
            other => other,
        };
        if element.is_none() {
            let path = self.field_path(name);
            let text = self.file.text(ty);
            self.warn(
                format!("field {path} skipped: unsupported type `{text}`"),
                &path,
                line,
            );
        }
        Ok(element)
    }

    /// Enforce unique output keys within one aggregate.
    fn resolve_duplicates(&mut self, fields: Vec<(Field, usize)>) -> Result<Vec<Field>, ExtractError> {
        let mut out: Vec<Field> = Vec::with_capacity(fields.len());
        for (field, line) in fields {
            if let Some(pos) = out.iter().position(|f| f.output_key == field.output_key) {
                match self.options.duplicate_keys {
                    DuplicateKeys::Error => {
                        return Err(ExtractError::DuplicateKey {
                            file: self.file.name().to_string(),
                            declaration: self.scope(),
                            key: field.output_key,
                        });
                    }
                    DuplicateKeys::LastWins => {
                        let earlier = out.remove(pos);
                        let dropped = self.field_path(&earlier.source_name);
                        let path = self.field_path(&field.source_name);
                        let message = format!(
                            "field {dropped} dropped: output key {:?} reused by {path}",
                            field.output_key
                        );
                        self.warn(message, &path, line);
                    }
                }
            }
            out.push(field);
        }
        Ok(out)
    }

    fn warn(&mut self, message: String, field: &str, line: usize) {
        self.diagnostics.push(
            Diagnostic::warning(message)
                .in_declaration(self.declaration)
                .on_field(field)
                .at_line(line),
        );
    }

    /// Dotted path of `leaf` below the current nesting.
    fn field_path(&self, leaf: &str) -> String {
        let mut parts = self.path.clone();
        parts.push(leaf);
        parts.join(".")
    }

    /// Declaration name plus the nesting path.
    fn scope(&self) -> String {
        std::iter::once(self.declaration)
            .chain(self.path.iter().copied())
            .collect::<Vec<_>>()
            .join(".")
    }
}
