/// Line classifier.
///
/// Pure pattern matching on one line of text with no context.  Whether a
/// match counts (a `use` line only counts inside a class, a closing brace
/// only after the constructor signature) is decided by the scanner.
use std::sync::OnceLock;

use regex::Regex;

use crate::types::LineKind;

fn class_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"class \w").expect("class header regex"))
}

fn trait_use_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"use .+?;").expect("trait use regex"))
}

fn property_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(public|protected|private|static) \$").expect("property regex"))
}

/// Matches a constructor signature anywhere on the line.
pub(crate) fn is_constructor_signature(text: &str) -> bool {
    text.contains("function __construct")
}

/// For a constructor whose body opens and closes on the signature line,
/// the text before its `{` and the text between the braces.
pub(crate) fn split_inline_body(text: &str) -> Option<(&str, &str)> {
    let start = text.find("function __construct")?;
    let open = start + text[start..].find('{')?;
    let body = text[open + 1..].trim_end().strip_suffix('}')?;
    Some((&text[..open], body))
}

/// An indented line ending in `}`.  The indentation is what tells a
/// method's closing brace apart from the class's own.
fn is_nested_closing_brace(text: &str) -> bool {
    text.starts_with([' ', '\t']) && text.trim_end().ends_with('}')
}

/// Classify a line.  Returns every matching kind in scan priority order,
/// or `[LineKind::Other]` when nothing matches.
pub fn classify_line(text: &str) -> Vec<LineKind> {
    let mut kinds = Vec::new();

    if class_header_regex().is_match(text) {
        kinds.push(LineKind::ClassHeader {
            brace_inline: text.trim_end().ends_with('{'),
        });
    }
    if trait_use_regex().is_match(text) {
        kinds.push(LineKind::TraitUse);
    }
    if property_regex().is_match(text) {
        kinds.push(LineKind::PropertyDecl);
    }
    if is_constructor_signature(text) {
        kinds.push(LineKind::ConstructorSig);
    }
    if is_nested_closing_brace(text) {
        kinds.push(LineKind::ConstructorClose);
    }

    if kinds.is_empty() {
        kinds.push(LineKind::Other);
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_header_with_inline_brace() {
        assert_eq!(
            classify_line("final class Foo extends Bar {"),
            vec![LineKind::ClassHeader { brace_inline: true }]
        );
    }

    #[test]
    fn class_header_with_brace_on_next_line() {
        assert_eq!(
            classify_line("class Foo"),
            vec![LineKind::ClassHeader {
                brace_inline: false
            }]
        );
    }

    #[test]
    fn class_constant_is_not_a_header() {
        assert_eq!(classify_line("    $x = Foo::class;"), vec![LineKind::Other]);
    }

    #[test]
    fn trait_use() {
        assert_eq!(classify_line("    use Notifiable;"), vec![LineKind::TraitUse]);
    }

    #[test]
    fn property_declarations() {
        for line in [
            "    private $name;",
            "    protected $items = [];",
            "    public static $cache;",
            "    static $count = 0;",
        ] {
            assert!(
                classify_line(line).contains(&LineKind::PropertyDecl),
                "{line:?} should be a property"
            );
        }
    }

    #[test]
    fn typed_property_is_not_matched() {
        assert_eq!(classify_line("    private int $id;"), vec![LineKind::Other]);
    }

    #[test]
    fn constructor_signature() {
        assert_eq!(
            classify_line("    public function __construct(Foo $foo)"),
            vec![LineKind::ConstructorSig]
        );
    }

    #[test]
    fn promoted_parameter_matches_property_and_signature() {
        assert_eq!(
            classify_line("    public function __construct(private $foo)"),
            vec![LineKind::PropertyDecl, LineKind::ConstructorSig]
        );
    }

    #[test]
    fn indented_closing_brace() {
        assert_eq!(classify_line("    }"), vec![LineKind::ConstructorClose]);
        assert_eq!(classify_line("\t} "), vec![LineKind::ConstructorClose]);
    }

    #[test]
    fn class_closing_brace_is_not_nested() {
        assert_eq!(classify_line("}"), vec![LineKind::Other]);
    }

    #[test]
    fn one_line_body_is_a_closing_brace() {
        assert_eq!(
            classify_line("    public function foo() {}"),
            vec![LineKind::ConstructorClose]
        );
    }

    #[test]
    fn inline_constructor_body_is_split_at_the_brace() {
        assert_eq!(
            split_inline_body("    public function __construct() {}"),
            Some(("    public function __construct() ", ""))
        );
        assert_eq!(
            split_inline_body("    public function __construct($a) { parent::__construct(); }"),
            Some(("    public function __construct($a) ", " parent::__construct(); "))
        );
    }

    #[test]
    fn open_constructor_body_is_not_inline() {
        assert_eq!(split_inline_body("    public function __construct($a) {"), None);
        assert_eq!(split_inline_body("    public function __construct($a)"), None);
        assert_eq!(split_inline_body("    public function run() {}"), None);
    }
}
