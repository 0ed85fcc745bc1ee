//! # Token Tables
//!
//! A [`TokenTable`] is an ordered, caller-owned collection of terminals. It
//! replaces a process-wide registry of predefined tokens: every grammar builds
//! (or clones) its own table and hands the terminals it needs to the lexer and
//! to its rules, so two grammars never share token identity by accident.

use std::sync::Arc;

use super::token::{Terminal, TokenizerResult};

/// Predefined lexical tokens, in a registration order where every literal
/// comes before any other entry that would shadow it.
const COMMON_TOKENS: &[(&str, &str)] = &[
    // Keywords
    ("TK_IF", "if\\b"),
    ("TK_ELSE", "else\\b"),
    ("TK_WHILE", "while\\b"),
    ("TK_FOR", "for\\b"),
    ("TK_RETURN", "return\\b"),
    ("TK_BREAK", "break\\b"),
    ("TK_CONTINUE", "continue\\b"),
    ("TK_TRUE", "true\\b"),
    ("TK_FALSE", "false\\b"),
    // Literals
    ("TK_FLOAT", "[0-9]+\\.[0-9]+"),
    ("TK_INT", "[0-9]+"),
    ("TK_STRING", "\"[^\"]*\""),
    ("TK_IDENTIFIER", "[a-zA-Z_][a-zA-Z0-9_]*"),
    // Multi-character operators
    ("TK_ARROW", "->"),
    ("TK_LESS_EQUAL", "<="),
    ("TK_GREATER_EQUAL", ">="),
    ("TK_EQUAL_EQUAL", "=="),
    // Single-character operators
    ("TK_PLUS", "\\+"),
    ("TK_MINUS", "-"),
    ("TK_STAR", "\\*"),
    ("TK_SLASH", "/"),
    ("TK_PERCENT", "%"),
    ("TK_POWER", "\\^"),
    ("TK_EQUALS", "="),
    ("TK_LESS", "<"),
    ("TK_GREATER", ">"),
    ("TK_QMARK", "\\?"),
    ("TK_EXCLAMATION", "!"),
    ("TK_AMPERSAND", "&"),
    ("TK_PIPE", "\\|"),
    ("TK_TILDE", "~"),
    // Delimiters
    ("TK_LPAREN", "\\("),
    ("TK_RPAREN", "\\)"),
    ("TK_LBRACE", "\\{"),
    ("TK_RBRACE", "\\}"),
    ("TK_LBRACKET", "\\["),
    ("TK_RBRACKET", "\\]"),
    ("TK_COMMA", ","),
    ("TK_COLON", ":"),
    ("TK_SEMICOLON", ";"),
    ("TK_DOT", "\\."),
];

#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    terminals: Vec<Arc<Terminal>>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh table holding the usual keywords, literals, operators and
    /// delimiters.
    pub fn common() -> Self {
        let mut table = Self::new();
        for (name, pattern) in COMMON_TOKENS {
            // Built-in patterns are known to compile.
            if let Ok(terminal) = Terminal::new(name, pattern) {
                table.terminals.push(terminal);
            }
        }
        table
    }

    /// Compiles and appends a terminal, returning the shared handle.
    pub fn define(&mut self, name: &str, pattern: &str) -> TokenizerResult<Arc<Terminal>> {
        let terminal = Terminal::new(name, pattern)?;
        self.terminals.push(terminal.clone());
        Ok(terminal)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Terminal>> {
        self.terminals.iter().find(|t| t.name() == name).cloned()
    }

    pub fn terminals(&self) -> &[Arc<Terminal>] {
        &self.terminals
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }
}
