/// Synthesis of a brand-new constructor.
///
/// Used when the scan found no constructor.  The property declaration,
/// the constructor and its single assignment go in as one block below the
/// last property, trait use or the class header.
use tower_lsp::lsp_types::Position;

use crate::config::InserterConfig;
use crate::error::InsertError;
use crate::snippet::SnippetBuilder;
use crate::source::SourceView;
use crate::types::{Declarations, EditTarget, InsertionPlan};

pub(super) fn build<S: SourceView + ?Sized>(
    doc: &S,
    decl: &Declarations,
    config: &InserterConfig,
    name: &str,
) -> Result<InsertionPlan, InsertError> {
    let line = decl.insertion_line().ok_or(InsertError::ClassNotFound)?;
    let insert_text = doc
        .line_text(line)
        .ok_or(InsertError::LineOutOfRange { line })?;
    let next_text = doc.line_text(line + 1).unwrap_or("");
    let indent = config.indent.as_str();

    let mut b = SnippetBuilder::new();

    // Directly below `class Foo {` a leading blank line would be orphaned.
    if decl.last_property_line.is_some() || decl.trait_use_line.is_some() {
        b.text("\n");
    }

    b.text(indent)
        .text(config.visibility.as_str())
        .text(" $")
        .tab_stop(1, name)
        .text(";\n\n");
    b.text(indent)
        .text(config.constructor_visibility.as_str())
        .text(" function __construct($")
        .tab_stop(1, name)
        .text(")\n");
    b.text(indent).text("{\n");
    b.text(indent)
        .text(indent)
        .text("$this->")
        .tab_stop(1, name)
        .text(" = $")
        .tab_stop(1, name)
        .text(";")
        .final_stop()
        .text("\n");
    b.text(indent).text("}");
    b.text(trailing_padding(insert_text, next_text));

    let at = Position { line, character: 0 };
    Ok(InsertionPlan {
        target: EditTarget::Insert { at },
        text: b.build(),
        reveal: at,
    })
}

/// Line breaks after the block, decided by the line it is inserted in
/// front of and the one after that.
fn trailing_padding(insert_text: &str, next_text: &str) -> &'static str {
    let insert_text = insert_text.trim_end();

    if insert_text.trim_start().is_empty() {
        // The existing blank line separates us from what follows, unless
        // that is the class's closing brace.
        if next_text.trim_end().ends_with('}') {
            ""
        } else {
            "\n"
        }
    } else if insert_text.ends_with('}') {
        "\n"
    } else {
        "\n\n"
    }
}
