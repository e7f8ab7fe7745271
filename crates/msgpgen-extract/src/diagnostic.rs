//! Diagnostics produced alongside the extracted models.
//!
//! Extraction never prints. Notes and warnings are collected here and handed
//! back with the result; [`Diagnostic::emit`] forwards one to `tracing` when the
//! caller wants them logged.

use serde::{Deserialize, Serialize};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Routine progress (accepted declaration, excluded field).
    Notice,
    /// Something was dropped from the output.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Notice => write!(f, "notice"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Declaration being processed, if any.
    pub declaration: Option<String>,
    /// Dotted field path within the declaration (e.g. `Outer.Inner`).
    pub field: Option<String>,
    /// 1-based source line.
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            declaration: None,
            field: None,
            line: None,
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::new(Severity::Notice, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn in_declaration(mut self, name: &str) -> Self {
        self.declaration = Some(name.to_string());
        self
    }

    pub fn on_field(mut self, path: impl Into<String>) -> Self {
        self.field = Some(path.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Forward this diagnostic to the active `tracing` subscriber.
    pub fn emit(&self) {
        let declaration = self.declaration.as_deref().unwrap_or("");
        let field = self.field.as_deref().unwrap_or("");
        let line = self.line.unwrap_or(0);
        match self.severity {
            Severity::Notice => {
                tracing::info!(declaration, field, line, "{}", self.message)
            }
            Severity::Warning => {
                tracing::warn!(declaration, field, line, "{}", self.message)
            }
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "{}: line {}: {}", self.severity, line, self.message)
        } else {
            write!(f, "{}: {}", self.severity, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_display() {
        let d = Diagnostic::warning("field Ch skipped: unsupported type `chan int`")
            .in_declaration("Pipe")
            .on_field("Ch")
            .at_line(4);
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.declaration.as_deref(), Some("Pipe"));
        assert_eq!(
            d.to_string(),
            "warning: line 4: field Ch skipped: unsupported type `chan int`"
        );
        assert_eq!(Diagnostic::notice("extracted User").to_string(), "notice: extracted User");
    }
}
