/// Splicing a new parameter and assignment into an existing constructor.
///
/// The whole constructor, from its docblock (if any) to its closing brace,
/// is replaced by a rebuilt copy: a new property declaration, the docblock
/// and every existing parameter and body line copied verbatim (with `$`
/// and `\` escaped), the new parameter appended to the signature and the new
/// assignment appended to the body.
use std::sync::OnceLock;

use regex::Regex;
use tower_lsp::lsp_types::{Position, Range};

use crate::config::InserterConfig;
use crate::error::InsertError;
use crate::scanner::{find_signature_line, split_inline_body};
use crate::snippet::SnippetBuilder;
use crate::source::SourceView;
use crate::types::{ConstructorDecl, Declarations, EditTarget, InsertionPlan};

/// The first parenthesised group on the signature line.
fn parameter_list_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)\)").expect("parameter list regex"))
}

fn line_text<S: SourceView + ?Sized>(doc: &S, line: u32) -> Result<&str, InsertError> {
    doc.line_text(line).ok_or(InsertError::LineOutOfRange { line })
}

fn leading_whitespace(text: &str) -> &str {
    &text[..text.len() - text.trim_start().len()]
}

/// `$this->name = $name;` on a new line, one indent unit deeper than
/// `block_indent`, followed by the final cursor stop.
fn push_assignment(b: &mut SnippetBuilder, block_indent: &str, indent: &str, name: &str) {
    b.text("\n")
        .text(block_indent)
        .text(indent)
        .text("$this->")
        .tab_stop(1, name)
        .text(" = $")
        .tab_stop(1, name)
        .text(";")
        .final_stop();
}

pub(super) fn build<S: SourceView + ?Sized>(
    doc: &S,
    decl: &Declarations,
    ctor: &ConstructorDecl,
    config: &InserterConfig,
    name: &str,
) -> Result<InsertionPlan, InsertError> {
    let closing_line = ctor
        .closing_line
        .ok_or(InsertError::UnterminatedConstructor { line: ctor.line })?;
    let indent = config.indent.as_str();
    let start = ctor.range.start;

    let mut b = SnippetBuilder::new();
    b.text(indent)
        .text(config.visibility.as_str())
        .text(" $")
        .tab_stop(1, name)
        .text(";\n\n");

    let (signature_line, signature) = if ctor.has_docblock() {
        let signature_line = find_signature_line(doc, start.line)
            .ok_or(InsertError::SignatureNotFound { line: start.line })?;
        for line in start.line..signature_line {
            b.text(line_text(doc, line)?).text("\n");
        }
        (signature_line, line_text(doc, signature_line)?.to_string())
    } else {
        (start.line, doc.text_in(ctor.range))
    };

    let captures = parameter_list_regex()
        .captures(&signature)
        .ok_or(InsertError::MalformedConstructorSignature {
            line: signature_line,
        })?;
    let (Some(group), Some(params)) = (captures.get(0), captures.get(1)) else {
        return Err(InsertError::MalformedConstructorSignature {
            line: signature_line,
        });
    };

    b.text(&signature[..group.start()]).text("(");
    if !params.as_str().trim().is_empty() {
        b.text(params.as_str()).text(", ");
    }
    b.text("$").tab_stop(1, name).text(")");

    if closing_line == signature_line {
        // `) { ... }` on one line: open it up into a block.
        let (head, body) = split_inline_body(&signature)
            .filter(|(head, _)| head.len() >= group.end())
            .ok_or(InsertError::MalformedConstructorSignature {
                line: signature_line,
            })?;
        let signature_indent = leading_whitespace(&signature);
        b.text(head[group.end()..].trim_end())
            .text("\n")
            .text(signature_indent)
            .text("{");
        let body = body.trim();
        if !body.is_empty() {
            b.text("\n").text(signature_indent).text(indent).text(body);
        }
        push_assignment(&mut b, signature_indent, indent, name);
        b.text("\n").text(signature_indent).text("}");
    } else {
        b.text(&signature[group.end()..]);
        for line in signature_line + 1..closing_line {
            b.text("\n").text(line_text(doc, line)?);
        }

        let closing = line_text(doc, closing_line)?.trim_end();
        push_assignment(&mut b, leading_whitespace(closing), indent, name);
        b.text("\n").text(closing);
    }

    // Keep a blank line between the constructor and a following member.
    let after = doc.line_text(closing_line + 1).unwrap_or("").trim_end();
    if !after.trim_start().is_empty() && !after.ends_with('}') {
        b.text("\n");
    }

    let end = doc
        .line_at(closing_line)
        .ok_or(InsertError::LineOutOfRange { line: closing_line })?
        .range
        .end;

    let reveal_line = decl
        .insertion_line()
        .filter(|&line| line < doc.line_count())
        .unwrap_or(ctor.line);

    Ok(InsertionPlan {
        target: EditTarget::Replace {
            range: Range { start, end },
        },
        text: b.build(),
        reveal: Position {
            line: reveal_line,
            character: 0,
        },
    })
}
