//! Type-model extraction for MessagePack code generation.
//!
//! `msgpgen-extract` reads Go source, finds struct declarations and turns
//! each one into a [`TypeModel`]: a closed, recursive description of the
//! serializable shape that a code-emission backend can consume without
//! re-deriving any field policy.
//!
//! # Architecture
//!
//! ```text
//! Go source ─> SourceFile ─> aggregate decls ─┬─> fields (tags, embedding, exclusion)
//! (source.rs)   (decl.rs)                      │     (fields.rs)
//!                                              └─> elements (element.rs)
//!                                                     │
//!                              Vec<TypeModel> <── model.rs
//! ```
//!
//! # Example
//!
//! ```
//! use msgpgen_extract::{ExtractOptions, extract_source, ir::Element};
//!
//! let source = r#"
//! package shop
//!
//! type Item struct {
//!     SKU   string `msg:"sku"`
//!     Price float64
//!     Notes string `msg:"-"`
//! }
//! "#;
//!
//! let out = extract_source(source, &ExtractOptions::default()).unwrap();
//! let item = &out.models[0];
//! assert_eq!(item.name, "Item");
//! assert_eq!(item.fields().len(), 2);
//! assert_eq!(item.fields()[0].output_key, "sku");
//! assert!(matches!(item.root, Element::Optional(_)));
//! ```
//!
//! # Struct tags
//!
//! The `msg` tag key (configurable via [`ExtractOptions::tag_key`]) sets the
//! output key; `msg:"-"` excludes the field. Fields declared together
//! (`A, B int`) ignore tags.

pub mod config;
pub mod decl;
pub mod diagnostic;
mod element;
pub mod error;
pub mod extract;
mod fields;
pub mod ir;
pub mod model;
pub mod source;
pub mod tag;

pub use config::{ConfigError, DuplicateKeys, ExtractOptions};
pub use diagnostic::{Diagnostic, Severity};
pub use error::ExtractError;
pub use extract::{Extraction, extract, extract_file, extract_named_source, extract_source};
pub use ir::{BaseKind, Element, Field, TypeModel};
pub use source::SourceFile;
