//! Type expression to [`Element`] mapping.
//!
//! The supported expression shapes are a closed set. Anything outside it
//! (channels, functions, interfaces, qualified and generic types) maps to
//! `None`, which tells the field extractor to drop the field.

use crate::config::ExtractOptions;
use crate::diagnostic::Diagnostic;
use crate::error::ExtractError;
use crate::ir::{BaseKind, Element};
use crate::source::SourceFile;
use tree_sitter::Node;

/// Per-declaration extraction state.
///
/// Holds read-only context (file, options, declaration name), the dotted
/// path of the nested field currently being built, and the diagnostics
/// collected so far. Field policy lives in [`crate::fields`].
pub(crate) struct Extractor<'f> {
    pub(crate) file: &'f SourceFile,
    pub(crate) options: &'f ExtractOptions,
    pub(crate) declaration: &'f str,
    pub(crate) path: Vec<&'f str>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'f> Extractor<'f> {
    pub(crate) fn new(file: &'f SourceFile, options: &'f ExtractOptions, declaration: &'f str) -> Self {
        Self {
            file,
            options,
            declaration,
            path: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Build the element for a type expression. `Ok(None)` means unsupported.
    ///
    /// Every call allocates a fresh subtree; nothing is shared between calls.
    pub(crate) fn build(&mut self, node: Node<'f>) -> Result<Option<Element>, ExtractError> {
        match node.kind() {
            "type_identifier" => Ok(self.named(node)),
            "slice_type" | "array_type" => self.sequence(node),
            "pointer_type" => match first_named_child(node) {
                Some(inner) => Ok(self.build(inner)?.map(|e| Element::Optional(Box::new(e)))),
                None => Ok(None),
            },
            "map_type" => Ok(self.map(node)),
            "struct_type" => Ok(Some(Element::Aggregate(self.extract_fields(node)?))),
            "parenthesized_type" => match first_named_child(node) {
                Some(inner) => self.build(inner),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn named(&self, node: Node<'f>) -> Option<Element> {
        let name = self.file.text(node);
        if let Some(kind) = BaseKind::from_ident(name) {
            return Some(Element::Base(kind));
        }
        // `any` on its own has no serializable shape; only map values accept it.
        if name == "any" {
            return None;
        }
        Some(Element::Deferred(name.to_string()))
    }

    fn sequence(&mut self, node: Node<'f>) -> Result<Option<Element>, ExtractError> {
        let Some(elem) = node.child_by_field_name("element").map(unparen) else {
            return Ok(None);
        };
        if elem.kind() == "type_identifier" && BaseKind::from_ident(self.file.text(elem)) == Some(BaseKind::Uint8) {
            return Ok(Some(Element::Base(BaseKind::Bytes)));
        }
        Ok(self.build(elem)?.map(|e| Element::Sequence(Box::new(e))))
    }

    /// Only `map[string]string` and `map[string]<dynamic>` are representable.
    fn map(&self, node: Node<'f>) -> Option<Element> {
        let key = node.child_by_field_name("key")?;
        let value = node.child_by_field_name("value")?;
        if key.kind() != "type_identifier" || self.file.text(key) != "string" {
            return None;
        }
        if value.kind() == "type_identifier" && self.file.text(value) == "string" {
            return Some(Element::Base(BaseKind::MapStrStr));
        }
        if self.is_dynamic(value) {
            return Some(Element::Base(BaseKind::MapStrIntf));
        }
        None
    }

    /// `interface{}` or `any`.
    fn is_dynamic(&self, node: Node<'f>) -> bool {
        let node = unparen(node);
        match node.kind() {
            "interface_type" => {
                let mut cursor = node.walk();
                node.named_children(&mut cursor).all(|c| c.kind() == "comment")
            }
            "type_identifier" => self.file.text(node) == "any",
            _ => false,
        }
    }
}

/// Strip any `( ... )` layers around a type expression.
fn unparen(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_type" {
        match first_named_child(node) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() != "comment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MEMORY_FILE_NAME;

    /// Build the element of the first field of `type T struct { F <ty> }`.
    fn build(ty: &str) -> Option<Element> {
        let code = format!("package p\n\ntype T struct {{\n\tF {ty}\n}}\n");
        let file = SourceFile::parse(code, MEMORY_FILE_NAME).unwrap();
        let options = ExtractOptions::default();
        let root = file.root();
        let mut cursor = root.walk();
        let decl = root
            .children(&mut cursor)
            .find(|n| n.kind() == "type_declaration")
            .unwrap();
        let spec = decl.named_child(0).unwrap();
        let shape = spec.child_by_field_name("type").unwrap();
        let list = shape.named_child(0).unwrap();
        let field = list.named_child(0).unwrap();
        let ty = field.child_by_field_name("type").unwrap();
        let mut extractor = Extractor::new(&file, &options, "T");
        extractor.build(ty).unwrap()
    }

    fn base(kind: BaseKind) -> Option<Element> {
        Some(Element::Base(kind))
    }

    #[test]
    fn test_base_idents() {
        assert_eq!(build("int"), base(BaseKind::Int));
        assert_eq!(build("uint16"), base(BaseKind::Uint16));
        assert_eq!(build("float32"), base(BaseKind::Float32));
        assert_eq!(build("complex128"), base(BaseKind::Complex128));
        assert_eq!(build("string"), base(BaseKind::String));
        assert_eq!(build("bool"), base(BaseKind::Bool));
    }

    #[test]
    fn test_unknown_ident_deferred() {
        assert_eq!(build("Address"), Some(Element::Deferred("Address".into())));
    }

    #[test]
    fn test_byte_sequences() {
        assert_eq!(build("[]byte"), base(BaseKind::Bytes));
        assert_eq!(build("[]uint8"), base(BaseKind::Bytes));
        assert_eq!(build("[16]byte"), base(BaseKind::Bytes));
        assert_eq!(build("[](byte)"), base(BaseKind::Bytes));
        assert_eq!(build("[]((uint8))"), base(BaseKind::Bytes));
    }

    #[test]
    fn test_sequences() {
        assert_eq!(
            build("[]string"),
            Some(Element::Sequence(Box::new(Element::Base(BaseKind::String))))
        );
        assert_eq!(
            build("[][]byte"),
            Some(Element::Sequence(Box::new(Element::Base(BaseKind::Bytes))))
        );
        assert_eq!(
            build("[4]*Item"),
            Some(Element::Sequence(Box::new(Element::Optional(Box::new(
                Element::Deferred("Item".into())
            )))))
        );
        assert_eq!(build("[]chan int"), None);
    }

    #[test]
    fn test_pointer() {
        assert_eq!(
            build("*float64"),
            Some(Element::Optional(Box::new(Element::Base(BaseKind::Float64))))
        );
        assert_eq!(build("*func()"), None);
    }

    #[test]
    fn test_maps() {
        assert_eq!(build("map[string]string"), base(BaseKind::MapStrStr));
        assert_eq!(build("map[string]interface{}"), base(BaseKind::MapStrIntf));
        assert_eq!(build("map[string]any"), base(BaseKind::MapStrIntf));
        assert_eq!(build("map[string](any)"), base(BaseKind::MapStrIntf));
        assert_eq!(build("map[string]int"), None);
        assert_eq!(build("map[int]string"), None);
        assert_eq!(build("map[string]interface{ Close() error }"), None);
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(build("chan int"), None);
        assert_eq!(build("func(int) error"), None);
        assert_eq!(build("interface{}"), None);
        assert_eq!(build("any"), None);
        assert_eq!(build("time.Time"), None);
        assert_eq!(build("List[int]"), None);
    }

    #[test]
    fn test_nested_struct() {
        let element = build("struct {\n\t\tX int `msg:\"x\"`\n\t\tY chan int\n\t}").unwrap();
        match element {
            Element::Aggregate(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].source_name, "X");
                assert_eq!(fields[0].output_key, "x");
            }
            other => panic!("expected Aggregate, got {other:?}"),
        }
    }
}
