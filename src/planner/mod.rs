/// Snippet planner.
///
/// Turns a [`Declarations`] record into one [`InsertionPlan`]: either a
/// new constructor (when the class has none) or a rebuilt copy of the
/// existing one with an extra parameter and assignment.  Planning is pure;
/// moving the cursor and applying the edit are left to the caller.
///
/// Sub-modules:
/// - [`new_constructor`]: Synthesises property + constructor + assignment
/// - [`merge`]: Splices a parameter and assignment into an existing constructor
mod merge;
mod new_constructor;

use tower_lsp::lsp_types::TextEdit;

use crate::config::InserterConfig;
use crate::error::InsertError;
use crate::scanner::scan;
use crate::snippet::render_plain;
use crate::source::{SourceView, TextDocument};
use crate::types::{Declarations, InsertionPlan};

/// Placeholder text for the property name when the caller supplies none.
pub const DEFAULT_PROPERTY_NAME: &str = "property";

/// Build the plan for `decl`, which must come from a scan of `doc`.
pub fn plan_insertion<S: SourceView + ?Sized>(
    doc: &S,
    decl: &Declarations,
    config: &InserterConfig,
    property_name: &str,
) -> Result<InsertionPlan, InsertError> {
    if !is_valid_property_name(property_name) {
        return Err(InsertError::InvalidPropertyName(property_name.to_string()));
    }

    match &decl.constructor {
        None => new_constructor::build(doc, decl, config, property_name),
        Some(ctor) => merge::build(doc, decl, ctor, config, property_name),
    }
}

/// Scan `content` and plan against it in one go.
pub fn plan_document(
    content: &str,
    config: &InserterConfig,
    property_name: &str,
) -> Result<InsertionPlan, InsertError> {
    let doc = TextDocument::new(content);
    let decl = scan(&doc);
    tracing::debug!(?decl, "scanned declarations");
    plan_insertion(&doc, &decl, config, property_name)
}

/// A PHP identifier: letter or underscore, then letters, digits or
/// underscores.  Non-ASCII letters are allowed as PHP allows them.
pub fn is_valid_property_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

impl InsertionPlan {
    /// The plan as a plain `TextEdit`, placeholders filled with their
    /// defaults, for clients that cannot expand snippets.
    pub fn to_text_edit(&self) -> TextEdit {
        TextEdit {
            range: self.target.range(),
            new_text: render_plain(&self.text),
        }
    }
}
