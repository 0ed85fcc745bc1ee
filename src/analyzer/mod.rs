//! # Analyzer Component
//!
//! The analyzer turns a token sequence into a value by enumerating the
//! derivations of a grammar lazily and accepting the first one that consumes
//! the whole input.
//!
//! ## Component Structure
//!
//! * [`core`]: derivations, value construction and error types
//! * [`combinators`]: the lazy merge and nesting iterators
//! * [`grammar`]: symbols, rules, non-terminals and the grammar builder
//! * [`parser`]: the full-input driver
//! * [`prelude`]: shorthands for writing grammars
//!
//! ## Usage Example
//!
//! ```rust
//! use lexparse::analyzer::prelude::*;
//! use lexparse::tokenizer::Lexer;
//!
//! let mut lexer = Lexer::new();
//! let int = lexer.add_pattern("INT", "[0-9]+").unwrap();
//! let plus = lexer.add_pattern("PLUS", "\\+").unwrap();
//!
//! let mut builder = GrammarBuilder::<String>::new();
//! let expr = builder.non_terminal("Expr");
//! builder
//!     .rule(expr, vec![t(&int)], |mut v| v.remove(0))
//!     .try_rule(expr, vec![nt(expr), t(&plus), t(&int)], |v| {
//!         Ok((v[0].parse::<i64>()? + v[2].parse::<i64>()?).to_string())
//!     })
//!     .start(expr);
//! let parser = Parser::new(builder.build().unwrap());
//!
//! let tokens = lexer.tokenize("1+2+3").unwrap();
//! assert_eq!(parser.parse(&tokens).unwrap().value, "6");
//! ```

pub mod combinators;
pub mod core;
pub mod grammar;
pub mod parser;
pub mod prelude;

pub use core::{Derivation, Derivations, FromToken, ParseError, ParseResult, ReduceError, Step};
pub use grammar::{
    Grammar, GrammarBuilder, GrammarError, GrammarResult, NonTerminal, NonTerminalId, ParseContext,
    Reducer, Rule, Symbol,
};
pub use parser::{Parsed, Parser};
