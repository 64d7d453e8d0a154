/// Declaration scanner.
///
/// A single forward pass over the document that records where the class
/// body starts, where its trait uses and properties end, and where the
/// constructor (with its docblock) begins and ends.  There is no parser
/// behind this: each line is classified by pattern alone (see
/// [`classify_line`]) with no brace counting and no comment awareness
/// beyond the constructor docblock.  False positives, such as a string
/// literal containing `function __construct`, are taken at face value.
///
/// Sub-modules:
/// - [`classify`]: The per-line pattern classifier
/// - [`resolve`]: Forward/backward anchor resolvers (property end,
///   constructor docblock, signature line)
mod classify;
mod resolve;

pub use classify::classify_line;
pub(crate) use classify::split_inline_body;
pub use resolve::{find_constructor_range, find_property_last_line, find_signature_line};

use crate::source::SourceView;
use crate::types::{ConstructorDecl, Declarations, LineKind};

/// Scan `doc` and return the anchors found.
///
/// Later matches overwrite earlier ones ("last property", "last trait
/// use").  The scan stops as soon as the constructor's closing brace is
/// found; lines after it are never looked at.
pub fn scan<S: SourceView + ?Sized>(doc: &S) -> Declarations {
    let mut decl = Declarations::default();

    for line in 0..doc.line_count() {
        let Some(text) = doc.line_text(line) else {
            break;
        };

        for kind in classify_line(text) {
            match kind {
                LineKind::ClassHeader { brace_inline } => {
                    // The body starts below a brace that sits on its own line.
                    decl.class_line = Some(if brace_inline { line } else { line + 1 });
                }
                LineKind::TraitUse if decl.class_line.is_some() => {
                    decl.trait_use_line = Some(line);
                }
                LineKind::PropertyDecl => {
                    if let Some(last) = find_property_last_line(doc, line) {
                        decl.last_property_line = Some(last);
                    }
                }
                LineKind::ConstructorSig => {
                    let lower_bound = decl.class_line.unwrap_or(0);
                    if let Some(range) = find_constructor_range(doc, line, lower_bound) {
                        // `__construct() {}` closes on its own line.
                        let closing_line = split_inline_body(text).map(|_| line);
                        decl.constructor = Some(ConstructorDecl {
                            line,
                            range,
                            closing_line,
                        });
                    }
                }
                LineKind::ConstructorClose => {
                    if let Some(ctor) = decl.constructor.as_mut()
                        && line > ctor.line
                    {
                        ctor.closing_line = Some(line);
                    }
                }
                LineKind::TraitUse | LineKind::Other => {}
            }
        }

        if decl
            .constructor
            .is_some_and(|ctor| ctor.closing_line.is_some())
        {
            tracing::trace!(line, "constructor closed, stopping scan");
            break;
        }
    }

    decl
}
