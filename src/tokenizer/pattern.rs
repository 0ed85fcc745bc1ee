//! # Lexeme Patterns
//!
//! A [`Pattern`] is an anchored regular expression tested against the start of
//! the remaining input. The source expression is wrapped as `^(?:...)` so that
//! alternations inside it cannot escape the anchor.
//!
//! Besides matching, a pattern knows its *literal form*: when the source
//! contains no regex metacharacters (escaped punctuation such as `\+` is
//! allowed) the literal form is the exact text it matches. The lexer uses it
//! for its construction-time shadowing diagnostics.

use std::fmt;

use regex::Regex;

use super::token::{TokenizerError, TokenizerResult};

const METACHARACTERS: &[char] = &[
    '.', '^', '$', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|',
];

/// Single characters the lexer always skips before trying any pattern.
const WHITESPACE_PROBES: &[&str] = &[" ", "\t", "\n", "\r"];

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    literal: Option<String>,
}

impl Pattern {
    /// Compiles `source` as an anchored pattern.
    ///
    /// `name` is only used to label the error when the expression is invalid.
    pub fn new(name: &str, source: &str) -> TokenizerResult<Self> {
        let regex =
            Regex::new(&format!("^(?:{})", source)).map_err(|e| TokenizerError::InvalidPattern {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
            literal: literal_form(source),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The exact text this pattern matches, if it is a plain literal.
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the matched prefix of `input`, or `None` when the pattern does
    /// not match there or only matches the empty string.
    pub fn find<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.regex
            .find(input)
            .map(|m| m.as_str())
            .filter(|matched| !matched.is_empty())
    }

    /// True when the pattern can consume a lone whitespace character.
    ///
    /// Such lexemes are skipped before matching starts, so the pattern never
    /// sees them.
    pub fn matches_whitespace(&self) -> bool {
        if let Some(literal) = self.literal() {
            if !literal.is_empty() && literal.chars().all(|c| c <= ' ') {
                return true;
            }
        }
        WHITESPACE_PROBES
            .iter()
            .any(|probe| self.find(probe) == Some(*probe))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Unescapes `source` when it denotes a fixed string.
fn literal_form(source: &str) -> Option<String> {
    let mut literal = String::with_capacity(source.len());
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next()?;
                // `\d`, `\w`, `\s` and friends are classes, not characters
                if escaped.is_ascii_alphanumeric() {
                    return None;
                }
                literal.push(escaped);
            }
            c if METACHARACTERS.contains(&c) => return None,
            c => literal.push(c),
        }
    }
    Some(literal)
}
