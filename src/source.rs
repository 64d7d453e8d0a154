/// Line-indexed, read-only view of a document.
///
/// Everything the scanner and planner know about the buffer comes through
/// [`SourceView`].  The server backs it with [`TextDocument`], built from
/// the text the client last synced; tests build one straight from a string.
///
/// Columns are UTF-16 code units, matching LSP `Position` semantics.
use tower_lsp::lsp_types::{Position, Range};

/// A snapshot of one line taken at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Zero-based line index.
    pub line_number: u32,
    /// The line text without its terminator.
    pub text: &'a str,
    /// `(line, 0)` up to the end of the text, terminator excluded.
    pub range: Range,
}

pub trait SourceView {
    /// Number of lines, counting the empty line after a trailing newline.
    fn line_count(&self) -> u32;

    /// The line at `line`, or `None` past the end of the document.
    fn line_at(&self, line: u32) -> Option<SourceLine<'_>>;

    /// Text covered by `range`.  Out-of-range positions are clamped.
    fn text_in(&self, range: Range) -> String;

    /// Shorthand for `line_at(line).map(|l| l.text)`.
    fn line_text(&self, line: u32) -> Option<&str> {
        self.line_at(line).map(|l| l.text)
    }
}

/// An owned document split into lines.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    lines: Vec<String>,
}

impl TextDocument {
    pub fn new(content: &str) -> Self {
        let lines = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }
}

impl From<&str> for TextDocument {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl SourceView for TextDocument {
    fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    fn line_at(&self, line: u32) -> Option<SourceLine<'_>> {
        let text = self.lines.get(line as usize)?.as_str();
        Some(SourceLine {
            line_number: line,
            text,
            range: Range {
                start: Position { line, character: 0 },
                end: Position {
                    line,
                    character: utf16_len(text),
                },
            },
        })
    }

    fn text_in(&self, range: Range) -> String {
        let last = self.line_count().saturating_sub(1);
        let start_line = range.start.line.min(last);
        let end_line = range.end.line.min(last);

        let mut out = String::new();
        for line in start_line..=end_line {
            let Some(text) = self.line_text(line) else {
                break;
            };
            let from = if line == range.start.line {
                utf16_to_byte(text, range.start.character)
            } else {
                0
            };
            let to = if line == range.end.line {
                utf16_to_byte(text, range.end.character)
            } else {
                text.len()
            };
            if line > start_line {
                out.push('\n');
            }
            if from < to {
                out.push_str(&text[from..to]);
            }
        }
        out
    }
}

/// Length of `text` in UTF-16 code units.
pub(crate) fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}

/// Byte index of the UTF-16 column `column` in `text`, clamped to its end.
pub(crate) fn utf16_to_byte(text: &str, column: u32) -> usize {
    let mut units = 0u32;
    for (idx, ch) in text.char_indices() {
        if units >= column {
            return idx;
        }
        units += ch.len_utf16() as u32;
    }
    text.len()
}
