//! # lexparse: Regex Lexer and Lazy Grammar-Combinator Parser
//!
//! lexparse turns text into values in two stages:
//!
//! ```text
//! Source Text → Lexer → Token Instances → Parser(start symbol) → Value
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] module splits text with an ordered list of regular
//! expressions. The first registered terminal that matches wins, and blank
//! characters separate lexemes.
//!
//! ### Stage 2: Analysis
//!
//! The [`analyzer`] module describes a grammar as non-terminals whose rules
//! are sequences of terminals and non-terminals, each with a reduction
//! function. Parsing enumerates derivations lazily, merging alternatives
//! round-robin so that no rule starves the others, and accepts the first
//! derivation that consumes every token. Left-recursive and ambiguous
//! grammars are fine.
//!
//! ## Entry Points
//!
//! * [`Frontend`] bundles a lexer and a parser behind `parse(text)`.
//! * [`Value`] is a ready-made tree value for grammars without their own type.
//! * [`Config`] holds the tunables, loadable from JSON.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod frontend;
pub mod tokenizer;
pub mod value;

// Re-exports
pub use config::Config;
pub use error::*;
pub use frontend::Frontend;
pub use value::Value;
