/// Anchor resolvers used while scanning and merging.
///
/// Each resolver walks lines from a starting point until it finds the line
/// it is looking for.  None of them assume success: running off the
/// document (or past the given bound) yields `None` or a documented
/// fallback.
use tower_lsp::lsp_types::Range;

use super::classify::is_constructor_signature;
use crate::source::SourceView;

/// Last line of a property declaration that starts on `start`.
///
/// A declaration with a default value may wrap, so this walks forward to
/// the first line whose trimmed text ends with `;`.
pub fn find_property_last_line<S: SourceView + ?Sized>(doc: &S, start: u32) -> Option<u32> {
    (start..doc.line_count()).find(|&line| {
        doc.line_text(line)
            .is_some_and(|text| text.trim_end().ends_with(';'))
    })
}

/// Range of the constructor's first line.
///
/// When the line above `constructor_line` closes a comment (`*/`), walks
/// back to the line opening it (`/**`) and returns that line's range.  The
/// walk never goes above `lower_bound`; if no opener turns up the comment
/// is not treated as the constructor's docblock and the signature line's
/// own range is returned.
pub fn find_constructor_range<S: SourceView + ?Sized>(
    doc: &S,
    constructor_line: u32,
    lower_bound: u32,
) -> Option<Range> {
    let own_range = doc.line_at(constructor_line)?.range;

    let Some(above) = constructor_line.checked_sub(1) else {
        return Some(own_range);
    };
    let closes_comment = doc
        .line_text(above)
        .is_some_and(|text| text.trim_end().ends_with("*/"));
    if !closes_comment {
        return Some(own_range);
    }

    for line in (lower_bound.min(above)..=above).rev() {
        let Some(source_line) = doc.line_at(line) else {
            continue;
        };
        let text = source_line.text.trim();
        // A one-line `/** ... */` opens and closes on the same line.
        if text.ends_with("/**") || (line == above && text.starts_with("/**")) {
            return Some(source_line.range);
        }
    }

    Some(own_range)
}

/// First line at or after `start` holding a constructor signature.
pub fn find_signature_line<S: SourceView + ?Sized>(doc: &S, start: u32) -> Option<u32> {
    (start..doc.line_count()).find(|&line| doc.line_text(line).is_some_and(is_constructor_signature))
}
