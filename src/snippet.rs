/// Snippet markup helpers.
///
/// Generated text uses the LSP/TextMate snippet syntax: `${1:name}`
/// placeholders, `$1` mirrors, a `$0` final cursor marker, and `\$` / `\\`
/// for a literal dollar sign or backslash.  Text copied from the document
/// (parameter lists, constructor bodies, docblocks) is inert and goes
/// through [`escape_literal`] so PHP variables are not read as tab-stops
/// and PHP escapes such as `"\\n"` survive expansion.
use std::collections::HashMap;

/// Prefix every `$` with a single `\`.
pub fn escape_dollars(text: &str) -> String {
    text.replace('$', "\\$")
}

/// Escape `text` so a snippet engine inserts it unchanged: every `\`
/// is doubled, then every `$` is prefixed with `\`.
///
/// A bare `}` outside a placeholder is already literal and is left alone.
pub fn escape_literal(text: &str) -> String {
    escape_dollars(&text.replace('\\', "\\\\"))
}

/// Incrementally composes snippet text.
#[derive(Debug, Default, Clone)]
pub struct SnippetBuilder {
    out: String,
}

impl SnippetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text, escaping `\` and `$`.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.out.push_str(&escape_literal(text));
        self
    }

    /// Append a `${n:default}` placeholder.
    pub fn tab_stop(&mut self, n: u32, default: &str) -> &mut Self {
        self.out.push_str(&format!("${{{n}:{default}}}"));
        self
    }

    /// Append the `$0` final cursor marker.
    pub fn final_stop(&mut self) -> &mut Self {
        self.out.push_str("$0");
        self
    }

    pub fn build(self) -> String {
        self.out
    }
}

/// Resolve snippet markup to the text a user would see before typing
/// anything: placeholders become their defaults, mirrors repeat the first
/// default of their stop, and escapes are dropped.
pub fn render_plain(snippet: &str) -> String {
    let mut text = String::with_capacity(snippet.len());
    let mut defaults: HashMap<u32, String> = HashMap::new();
    let chars: Vec<char> = snippet.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if matches!(chars.get(i + 1), Some('$' | '\\' | '}')) => {
                text.push(chars[i + 1]);
                i += 2;
            }
            '$' => {
                let (stop, consumed) = parse_tab_stop(&chars[i + 1..]);
                match stop {
                    Some(TabStop::Mirror(n)) => {
                        if let Some(default) = defaults.get(&n) {
                            text.push_str(default);
                        }
                    }
                    Some(TabStop::Placeholder(n, default)) => {
                        text.push_str(&default);
                        defaults.entry(n).or_insert(default);
                    }
                    None => text.push('$'),
                }
                i += 1 + consumed;
            }
            ch => {
                text.push(ch);
                i += 1;
            }
        }
    }

    text
}

enum TabStop {
    Mirror(u32),
    Placeholder(u32, String),
}

/// Parse what follows a `$`.  Returns the stop and how many chars it used.
fn parse_tab_stop(rest: &[char]) -> (Option<TabStop>, usize) {
    let digits = rest.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let n = parse_number(&rest[..digits]);
        return (Some(TabStop::Mirror(n)), digits);
    }

    if rest.first() != Some(&'{') {
        return (None, 0);
    }
    let digits = rest[1..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return (None, 0);
    }
    let n = parse_number(&rest[1..1 + digits]);
    let mut j = 1 + digits;
    match rest.get(j) {
        Some('}') => return (Some(TabStop::Mirror(n)), j + 1),
        Some(':') => j += 1,
        _ => return (None, 0),
    }

    let mut default = String::new();
    while j < rest.len() {
        match rest[j] {
            '\\' if matches!(rest.get(j + 1), Some('$' | '\\' | '}')) => {
                default.push(rest[j + 1]);
                j += 2;
            }
            '}' => return (Some(TabStop::Placeholder(n, default)), j + 1),
            ch => {
                default.push(ch);
                j += 1;
            }
        }
    }

    // Unterminated placeholder: treat the `$` as literal.
    (None, 0)
}

fn parse_number(digits: &[char]) -> u32 {
    digits
        .iter()
        .fold(0u32, |n, d| n.saturating_mul(10).saturating_add(d.to_digit(10).unwrap_or(0)))
}
