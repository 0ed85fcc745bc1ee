use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::pattern::Pattern;

/// A token kind: a name plus the anchored pattern that recognizes it.
///
/// Terminals are shared through [`Arc`] by the lexer that produces their
/// instances and by the grammar rules that consume them. Two terminals are the
/// same kind only when they are the same allocation, see [`Terminal::same`].
#[derive(Debug)]
pub struct Terminal {
    name: String,
    pattern: Pattern,
}

impl Terminal {
    pub fn new(name: &str, pattern: &str) -> TokenizerResult<Arc<Self>> {
        Ok(Arc::new(Self {
            name: name.to_string(),
            pattern: Pattern::new(name, pattern)?,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Identity comparison between two shared terminals.
    pub fn same(a: &Arc<Terminal>, b: &Arc<Terminal>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One lexeme produced by the lexer.
#[derive(Debug, Clone, Serialize)]
pub struct TokenInstance {
    #[serde(rename = "kind", serialize_with = "serialize_terminal")]
    pub terminal: Arc<Terminal>,
    pub text: String,
    /// Byte offsets into the tokenized text.
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl TokenInstance {
    pub fn kind(&self) -> &str {
        self.terminal.name()
    }

    /// True when this instance was produced by `terminal`.
    pub fn is(&self, terminal: &Arc<Terminal>) -> bool {
        Terminal::same(&self.terminal, terminal)
    }
}

impl PartialEq for TokenInstance {
    fn eq(&self, other: &Self) -> bool {
        Terminal::same(&self.terminal, &other.terminal)
            && self.text == other.text
            && self.start == other.start
            && self.end == other.end
            && self.line == other.line
            && self.column == other.column
    }
}

impl fmt::Display for TokenInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}, {})",
            self.terminal.name(),
            self.text,
            self.line,
            self.column
        )
    }
}

fn serialize_terminal<S>(terminal: &Arc<Terminal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(terminal.name())
}

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Unexpected lexeme at line {line}, column {column}: {lexeme}")]
    UnexpectedLexeme {
        line: usize,
        column: usize,
        lexeme: String,
    },
    #[error("Invalid pattern for token {name}: {message}")]
    InvalidPattern { name: String, message: String },
}
