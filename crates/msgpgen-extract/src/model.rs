//! Assembly of top-level type models.

use crate::decl::AggregateDecl;
use crate::diagnostic::Diagnostic;
use crate::ir::{Field, TypeModel};

/// Wrap a declaration's fields into a [`TypeModel`].
///
/// Returns `None` when no field survived extraction; the declaration is then
/// left out of the output and only a warning records it.
pub fn assemble(
    decl: &AggregateDecl<'_>,
    fields: Vec<Field>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<TypeModel> {
    if fields.is_empty() {
        diagnostics.push(
            Diagnostic::warning(format!("{} has no eligible fields", decl.name))
                .in_declaration(decl.name)
                .at_line(decl.line),
        );
        return None;
    }
    diagnostics.push(
        Diagnostic::notice(format!("parsed {} ({} fields)", decl.name, fields.len()))
            .in_declaration(decl.name)
            .at_line(decl.line),
    );
    Some(TypeModel::new(decl.name, fields))
}
