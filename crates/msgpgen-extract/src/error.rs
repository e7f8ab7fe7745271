//! Errors that abort extraction of a whole file.
//!
//! Per-field problems (unsupported types, exclusions) are not errors; they
//! surface as [`Diagnostic`](crate::diagnostic::Diagnostic)s instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: tree-sitter init: {message}")]
    Grammar { file: String, message: String },

    #[error("{file}:{line}:{column}: parse error: {message}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{file}: no exports in file")]
    NoExports { file: String },

    #[error("{file}: duplicate output key {key:?} in {declaration}")]
    DuplicateKey {
        file: String,
        declaration: String,
        key: String,
    },
}

impl ExtractError {
    /// Display name of the file this error belongs to.
    pub fn file(&self) -> String {
        match self {
            ExtractError::Io { path, .. } => path.display().to_string(),
            ExtractError::Grammar { file, .. }
            | ExtractError::Parse { file, .. }
            | ExtractError::NoExports { file }
            | ExtractError::DuplicateKey { file, .. } => file.clone(),
        }
    }
}
