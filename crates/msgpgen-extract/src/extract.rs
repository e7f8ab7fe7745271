//! Whole-file extraction pipeline.
//!
//! load -> aggregate declarations -> fields/elements per declaration ->
//! model assembly. Each call is self-contained; independent files can be
//! extracted in parallel by the caller.

use crate::config::ExtractOptions;
use crate::decl::aggregate_decls;
use crate::diagnostic::{Diagnostic, Severity};
use crate::element::Extractor;
use crate::error::ExtractError;
use crate::ir::TypeModel;
use crate::model;
use crate::source::{self, MEMORY_FILE_NAME, SourceFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of extracting one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Accepted declarations in source order.
    pub models: Vec<TypeModel>,
    /// Notes and warnings collected during the pass.
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// Look up a model by declaration name.
    pub fn model(&self, name: &str) -> Option<&TypeModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Forward all diagnostics to `tracing`.
    pub fn emit_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            diagnostic.emit();
        }
    }

    /// The models as pretty JSON, for a generator running out of process.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.models)
    }
}

/// Extract type models from an already parsed file.
pub fn extract(file: &SourceFile, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let mut diagnostics = Vec::new();
    let decls = aggregate_decls(file, options, &mut diagnostics);

    let mut models = Vec::new();
    for decl in &decls {
        let mut extractor = Extractor::new(file, options, decl.name);
        let fields = extractor.extract_fields(decl.shape)?;
        diagnostics.extend(extractor.into_diagnostics());
        if let Some(model) = model::assemble(decl, fields, &mut diagnostics) {
            models.push(model);
        }
    }

    Ok(Extraction {
        models,
        diagnostics,
    })
}

/// Extract from an in-memory buffer.
pub fn extract_source(source: &str, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    extract_named_source(source, MEMORY_FILE_NAME, options)
}

/// Extract from an in-memory buffer, naming it `name` in errors.
pub fn extract_named_source(
    source: &str,
    name: &str,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    let file = SourceFile::parse(source, name)?;
    extract(&file, options)
}

/// Read and extract a Go source file.
pub fn extract_file(path: &Path, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    tracing::debug!(path = %path.display(), "loading Go source");
    let file = source::load(path)?;
    let extraction = extract(&file, options)?;
    tracing::debug!(
        path = %path.display(),
        models = extraction.models.len(),
        warnings = extraction.warnings().count(),
        "extracted type models"
    );
    Ok(extraction)
}
