//! Line tokenizer for configuration text.
//!
//! Splits the source into significant lines and yields one [`Directive`]
//! per line. Blank lines and lines whose first non-whitespace character is
//! `#` produce nothing.

use std::iter::Enumerate;
use std::str::Lines;

/// A single `<key> <value...>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// 1-based line number in the source.
    pub line: usize,
    /// First whitespace-delimited token.
    pub key: &'a str,
    /// Second token, if present.
    pub value: Option<&'a str>,
    /// Anything after the value, trimmed; `None` if nothing follows.
    pub trailing: Option<&'a str>,
}

/// Lazy iterator over the directives of a source text.
#[derive(Debug, Clone)]
pub struct Directives<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> Iterator for Directives<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.lines.by_ref() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, rest) = split_token(line);
            let (value, trailing) = split_token(rest);
            return Some(Directive {
                line: idx + 1,
                key,
                value: (!value.is_empty()).then_some(value),
                trailing: (!trailing.is_empty()).then_some(trailing),
            });
        }
        None
    }
}

/// Tokenizes `text` into directives.
///
/// A leading UTF-8 byte order mark is ignored.
#[must_use]
pub fn directives(text: &str) -> Directives<'_> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Directives {
        lines: text.lines().enumerate(),
    }
}

/// Removes one matching pair of surrounding `"` or `'` quotes.
#[must_use]
pub fn strip_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = token
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    token
}

/// Splits off the first whitespace-delimited token; the remainder is
/// returned with leading whitespace removed.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], s[pos..].trim_start()),
        None => (s, ""),
    }
}

// ============================================================================
// Tests
// ============================================================================
