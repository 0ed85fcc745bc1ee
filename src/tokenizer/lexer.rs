use std::fmt;
use std::sync::Arc;

use crate::config::LexerConfig;

use super::token::{Terminal, TokenInstance, TokenizerError, TokenizerResult};

/// Advisory findings about a lexer configuration.
///
/// None of them prevent the lexer from being built; each is logged with
/// `tracing::warn!` when registered and kept for later inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum LexerWarning {
    EmptyPattern {
        token: String,
    },
    MatchesWhitespace {
        token: String,
    },
    Shadowed {
        token: String,
        by: String,
    },
    MatchedAndIgnored {
        token: String,
    },
}

impl fmt::Display for LexerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerWarning::EmptyPattern { token } => {
                write!(f, "token {} has an empty pattern; it will never be matched", token)
            }
            LexerWarning::MatchesWhitespace { token } => write!(
                f,
                "token {} matches whitespace, which is skipped before matching; it will never be produced from it",
                token
            ),
            LexerWarning::Shadowed { token, by } => write!(
                f,
                "token {} will never be matched because {} is registered first and matches a prefix of it; register {} before {}",
                token, by, token, by
            ),
            LexerWarning::MatchedAndIgnored { token } => write!(
                f,
                "token {} is both matched and ignored; it will not be ignored",
                token
            ),
        }
    }
}

/// Ordered, first-match-wins lexer.
///
/// Significant terminals are tried in registration order and produce
/// [`TokenInstance`]s. Ignorable terminals are only tried when no significant
/// one matches and their lexemes are dropped. Characters up to and including
/// the space (`c <= ' '`) are always skipped between lexemes.
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    tokens: Vec<Arc<Terminal>>,
    ignored: Vec<Arc<Terminal>>,
    warnings: Vec<LexerWarning>,
    config: LexerConfig,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LexerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Registers a significant terminal at the lowest priority so far.
    pub fn add_token(&mut self, terminal: &Arc<Terminal>) -> &mut Self {
        let name = terminal.name().to_string();
        let pattern = terminal.pattern();

        if pattern.is_empty() {
            self.warn(LexerWarning::EmptyPattern {
                token: name.clone(),
            });
        } else if pattern.matches_whitespace() {
            self.warn(LexerWarning::MatchesWhitespace {
                token: name.clone(),
            });
        }

        if self.ignored.iter().any(|t| Terminal::same(t, terminal)) {
            self.warn(LexerWarning::MatchedAndIgnored {
                token: name.clone(),
            });
        }

        if let Some(literal) = pattern.literal().filter(|l| !l.is_empty()) {
            let shadows: Vec<String> = self
                .tokens
                .iter()
                .filter(|earlier| earlier.pattern().find(literal).is_some())
                .map(|earlier| earlier.name().to_string())
                .collect();
            for by in shadows {
                self.warn(LexerWarning::Shadowed {
                    token: name.clone(),
                    by,
                });
            }
        }

        self.tokens.push(terminal.clone());
        self
    }

    /// Compiles `pattern` into a new terminal and registers it as significant.
    pub fn add_pattern(&mut self, name: &str, pattern: &str) -> TokenizerResult<Arc<Terminal>> {
        let terminal = Terminal::new(name, pattern)?;
        self.add_token(&terminal);
        Ok(terminal)
    }

    /// Registers a terminal whose lexemes are consumed but not emitted.
    pub fn ignore_token(&mut self, terminal: &Arc<Terminal>) -> &mut Self {
        if self.tokens.iter().any(|t| Terminal::same(t, terminal)) {
            self.warn(LexerWarning::MatchedAndIgnored {
                token: terminal.name().to_string(),
            });
        }
        self.ignored.push(terminal.clone());
        self
    }

    pub fn tokens(&self) -> &[Arc<Terminal>] {
        &self.tokens
    }

    pub fn ignored_tokens(&self) -> &[Arc<Terminal>] {
        &self.ignored
    }

    pub fn warnings(&self) -> &[LexerWarning] {
        &self.warnings
    }

    /// True when `terminal` can appear in this lexer's output.
    pub fn produces(&self, terminal: &Arc<Terminal>) -> bool {
        self.tokens.iter().any(|t| Terminal::same(t, terminal))
    }

    fn warn(&mut self, warning: LexerWarning) {
        if !self.config.diagnostics {
            return;
        }
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    #[tracing::instrument(level = "debug", skip(self, input), fields(len = input.len()))]
    pub fn tokenize(&self, input: &str) -> TokenizerResult<Vec<TokenInstance>> {
        let mut cursor = Cursor::new(input);
        let mut instances = Vec::new();

        loop {
            cursor.skip_blank();
            let remaining = cursor.remaining();
            if remaining.is_empty() {
                break;
            }

            if let Some((terminal, lexeme)) = first_match(&self.tokens, remaining) {
                let (start, line, column) = (cursor.offset, cursor.line, cursor.column);
                cursor.advance(lexeme);
                instances.push(TokenInstance {
                    terminal: terminal.clone(),
                    text: lexeme.to_string(),
                    start,
                    end: cursor.offset,
                    line,
                    column,
                });
                continue;
            }

            if let Some((_, lexeme)) = first_match(&self.ignored, remaining) {
                cursor.advance(lexeme);
                continue;
            }

            let error = TokenizerError::UnexpectedLexeme {
                line: cursor.line,
                column: cursor.column,
                lexeme: remaining
                    .split(|c: char| c <= ' ')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            };
            tracing::error!("{}", error);
            return Err(error);
        }

        tracing::debug!(count = instances.len(), "tokenized");
        Ok(instances)
    }
}

fn first_match<'t, 'i>(
    terminals: &'t [Arc<Terminal>],
    input: &'i str,
) -> Option<(&'t Arc<Terminal>, &'i str)> {
    terminals
        .iter()
        .find_map(|terminal| terminal.pattern().find(input).map(|m| (terminal, m)))
}

/// Byte offset plus 1-based line/column over the text being tokenized.
struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn skip_blank(&mut self) {
        let remaining = self.remaining();
        let blank = remaining
            .find(|c: char| c > ' ')
            .unwrap_or(remaining.len());
        self.advance(&remaining[..blank]);
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            self.offset += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}
