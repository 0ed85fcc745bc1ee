//! # Tokenizer Component
//!
//! The Tokenizer component turns raw text into a sequence of positioned
//! [`TokenInstance`]s for the analyzer.
//!
//! ## Design Principles
//!
//! * **Caller-owned token kinds**: every token kind is a [`Terminal`] built
//!   from a name and an anchored regular expression. There is no global
//!   registry; [`TokenTable::common`] hands out a fresh table of the usual
//!   tokens when a grammar wants them.
//! * **Order is priority**: the [`Lexer`] takes the first registered terminal
//!   that matches, not the longest match. Construction-time
//!   [`LexerWarning`]s point out registrations that can never win.
//! * **Blank characters are separators**: every character up to and including
//!   the space is skipped between lexemes, so whitespace never needs its own
//!   token.
//! * **Fail fast**: the first position nothing matches aborts tokenization with
//!   [`TokenizerError::UnexpectedLexeme`].
//!
//! ## Component Structure
//!
//! * [`pattern`]: anchored patterns and their literal forms
//! * [`token`]: terminals, token instances and tokenizer errors
//! * [`table`]: ordered token tables
//! * [`lexer`]: the lexer itself
//!
//! ## Usage Example
//!
//! ```rust
//! use lexparse::tokenizer::Lexer;
//!
//! let mut lexer = Lexer::new();
//! lexer.add_pattern("INT", "[0-9]+").unwrap();
//! lexer.add_pattern("PLUS", "\\+").unwrap();
//!
//! let tokens = lexer.tokenize("12 + 3").unwrap();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].to_string(), "PLUS: + (1, 4)");
//! ```

pub mod lexer;
pub mod pattern;
pub mod table;
pub mod token;

pub use lexer::{Lexer, LexerWarning};
pub use pattern::Pattern;
pub use table::TokenTable;
pub use token::{Terminal, TokenInstance, TokenizerError, TokenizerResult};
