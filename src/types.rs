//! Data types shared by the scanner, the planner and the server.
//!
//! This module contains the "model" types: the per-line classification
//! produced by the line classifier, the [`Declarations`] record produced by
//! a scan, and the [`InsertionPlan`] handed back to the editor.

use std::fmt;

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Position, Range};

/// Visibility modifier emitted for generated members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single source line looks like to the scanner.
///
/// A line can match several patterns at once (a promoted constructor
/// parameter is both a property and a constructor signature), so the
/// classifier returns every kind that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `class Foo`.  `brace_inline` is true when the line ends with `{`.
    ClassHeader { brace_inline: bool },
    /// `use SomeTrait;`
    TraitUse,
    /// A visibility or `static` modifier followed by a `$name`.
    PropertyDecl,
    /// Contains `function __construct`.
    ConstructorSig,
    /// An indented line ending in `}`.
    ConstructorClose,
    /// None of the above.
    Other,
}

/// The constructor found by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorDecl {
    /// Line holding `function __construct`.
    pub line: u32,
    /// Range of the constructor's first line: the signature line, or the
    /// opening line of the docblock directly above it.
    pub range: Range,
    /// First indented `}` line after the signature, or the signature line
    /// itself when the body opens and closes there (`__construct() {}`).
    pub closing_line: Option<u32>,
}

impl ConstructorDecl {
    /// True when `range` starts on a docblock above the signature.
    pub fn has_docblock(&self) -> bool {
        self.range.start.line < self.line
    }
}

/// Anchors found by one forward scan of a class.
///
/// A fresh record is built for every request; lines move between edits so
/// nothing here is worth keeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// First body line of the class: the header line when its `{` is
    /// inline, otherwise the line below it.
    pub class_line: Option<u32>,
    /// Last `use Trait;` line after the class header.
    pub trait_use_line: Option<u32>,
    /// Line of the terminating `;` of the last property declaration.
    pub last_property_line: Option<u32>,
    pub constructor: Option<ConstructorDecl>,
}

impl Declarations {
    /// Line a new member block goes on: one past the last property, trait
    /// use or class line, whichever is found first in that order.
    pub fn insertion_line(&self) -> Option<u32> {
        self.last_property_line
            .or(self.trait_use_line)
            .or(self.class_line)
            .map(|line| line + 1)
    }
}

/// Where an [`InsertionPlan`] writes its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditTarget {
    /// Zero-width insertion.
    Insert { at: Position },
    /// Replace the covered text.
    Replace { range: Range },
}

impl EditTarget {
    pub fn range(&self) -> Range {
        match *self {
            EditTarget::Insert { at } => Range { start: at, end: at },
            EditTarget::Replace { range } => range,
        }
    }
}

/// One edit, fully described.
///
/// `text` is snippet markup: `${1:name}` placeholders sharing stop 1, a
/// `$0` final cursor marker, and every literal `$` escaped as `\$`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertionPlan {
    pub target: EditTarget,
    pub text: String,
    /// Where the caller moves the cursor and viewport before applying.
    pub reveal: Position,
}
