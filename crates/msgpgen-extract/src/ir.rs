//! Intermediate representation for extracted type models.
//!
//! Every accepted declaration becomes a [`TypeModel`] whose root is
//! `Optional(Aggregate(fields))`. The generator consumes these values as-is;
//! nothing here is mutated after the extraction pass hands it over.

use serde::{Deserialize, Serialize};

/// Primitive serializable shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Bool,
    /// `[]byte`
    Bytes,
    /// `map[string]string`
    MapStrStr,
    /// `map[string]interface{}`
    MapStrIntf,
}

/// Identifier table for named base kinds.
///
/// `byte` and `rune` are Go's predeclared aliases for `uint8` and `int32`.
const BASE_IDENTS: &[(&str, BaseKind)] = &[
    ("int", BaseKind::Int),
    ("int8", BaseKind::Int8),
    ("int16", BaseKind::Int16),
    ("int32", BaseKind::Int32),
    ("int64", BaseKind::Int64),
    ("uint", BaseKind::Uint),
    ("uint8", BaseKind::Uint8),
    ("uint16", BaseKind::Uint16),
    ("uint32", BaseKind::Uint32),
    ("uint64", BaseKind::Uint64),
    ("float32", BaseKind::Float32),
    ("float64", BaseKind::Float64),
    ("complex64", BaseKind::Complex64),
    ("complex128", BaseKind::Complex128),
    ("string", BaseKind::String),
    ("bool", BaseKind::Bool),
    ("byte", BaseKind::Uint8),
    ("rune", BaseKind::Int32),
];

impl BaseKind {
    /// Look up the base kind named by a bare identifier.
    pub fn from_ident(name: &str) -> Option<BaseKind> {
        BASE_IDENTS
            .iter()
            .find(|(ident, _)| *ident == name)
            .map(|(_, kind)| *kind)
    }
}

/// A node describing the serializable shape of a value.
///
/// Unsupported shapes have no variant; builders return `None` instead and the
/// enclosing field is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Base(BaseKind),
    /// Variable-length collection of a uniform element type.
    Sequence(Box<Element>),
    /// Possibly-absent single value (pointer semantics).
    Optional(Box<Element>),
    /// Nested anonymous aggregate.
    Aggregate(Vec<Field>),
    /// Named type left for the generator to resolve.
    Deferred(String),
}

impl Element {
    /// Names of every deferred reference in this subtree, first-seen order,
    /// without repeats.
    pub fn deferred_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_deferred(&mut out);
        out
    }

    fn collect_deferred<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Element::Base(_) => {}
            Element::Sequence(inner) | Element::Optional(inner) => inner.collect_deferred(out),
            Element::Aggregate(fields) => {
                for field in fields {
                    field.element.collect_deferred(out);
                }
            }
            Element::Deferred(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
        }
    }
}

/// A field of an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// How the value is accessed in source (the Go field name).
    pub source_name: String,
    /// Key used in the serialized form.
    pub output_key: String,
    /// Shape of the field's value.
    pub element: Element,
}

/// Top-level extracted description of one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeModel {
    /// Declared type name.
    pub name: String,
    /// Always `Optional(Aggregate(fields))`.
    pub root: Element,
}

impl TypeModel {
    pub(crate) fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            root: Element::Optional(Box::new(Element::Aggregate(fields))),
        }
    }

    /// The declaration's fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        match &self.root {
            Element::Optional(inner) => match inner.as_ref() {
                Element::Aggregate(fields) => fields,
                _ => &[],
            },
            _ => &[],
        }
    }

    /// Deferred references anywhere in the model.
    pub fn deferred_names(&self) -> Vec<&str> {
        self.root.deferred_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, element: Element) -> Field {
        Field {
            source_name: name.to_string(),
            output_key: name.to_string(),
            element,
        }
    }

    #[test]
    fn test_base_table() {
        assert_eq!(BaseKind::from_ident("int64"), Some(BaseKind::Int64));
        assert_eq!(BaseKind::from_ident("complex64"), Some(BaseKind::Complex64));
        assert_eq!(BaseKind::from_ident("byte"), Some(BaseKind::Uint8));
        assert_eq!(BaseKind::from_ident("rune"), Some(BaseKind::Int32));
        assert_eq!(BaseKind::from_ident("Int"), None);
        assert_eq!(BaseKind::from_ident("any"), None);
    }

    #[test]
    fn test_model_root_shape() {
        let model = TypeModel::new("User", vec![field("Name", Element::Base(BaseKind::String))]);
        assert!(matches!(
            &model.root,
            Element::Optional(inner) if matches!(inner.as_ref(), Element::Aggregate(f) if f.len() == 1)
        ));
        assert_eq!(model.fields()[0].source_name, "Name");
    }

    #[test]
    fn test_deferred_names_dedup_in_order() {
        let model = TypeModel::new(
            "Order",
            vec![
                field("Buyer", Element::Optional(Box::new(Element::Deferred("User".into())))),
                field("Items", Element::Sequence(Box::new(Element::Deferred("Item".into())))),
                field(
                    "Meta",
                    Element::Aggregate(vec![field("Seller", Element::Deferred("User".into()))]),
                ),
            ],
        );
        assert_eq!(model.deferred_names(), vec!["User", "Item"]);
    }
}
