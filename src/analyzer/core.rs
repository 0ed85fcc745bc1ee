//! # Core Parser Definitions
//!
//! This module defines the values that flow through the lazy enumeration and
//! the error types of the analyzer.
//!
//! Every symbol answers a parse request with a [`Derivations`] stream: a boxed,
//! pull-based iterator of [`Step`]s. Pulling one item does only the work needed
//! to produce that item, so a caller can stop after the first useful
//! derivation, or abandon a grammar with infinitely many derivations, simply by
//! dropping the iterator.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::tokenizer::TokenInstance;

/// One successful derivation of a symbol.
///
/// `next` is the index of the first token after the derivation; for a parse
/// over `[start, end)` it always lies in `[start, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation<V> {
    pub value: V,
    pub next: usize,
}

impl<V> Derivation<V> {
    pub fn new(value: V, next: usize) -> Self {
        Self { value, next }
    }
}

/// Item of a derivation stream.
///
/// An `Err` stops the whole enumeration: it is raised when a reducer rejects
/// its inputs, and the parser reports it as is.
pub type Step<V> = Result<Derivation<V>, ParseError>;

/// Lazy stream of derivations borrowing the grammar and the tokens for `'p`.
pub type Derivations<'p, V> = Box<dyn Iterator<Item = Step<V>> + 'p>;

/// Builds a symbol's value from the token it matched.
pub trait FromToken {
    fn from_token(token: &TokenInstance) -> Self;
}

impl FromToken for String {
    fn from_token(token: &TokenInstance) -> Self {
        token.text.clone()
    }
}

/// Domain error raised by a reduction function.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ReduceError {
    message: String,
}

impl ReduceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ReduceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ReduceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<ParseIntError> for ReduceError {
    fn from(e: ParseIntError) -> Self {
        Self::new(format!("invalid integer: {}", e))
    }
}

impl From<ParseFloatError> for ReduceError {
    fn from(e: ParseFloatError) -> Self {
        Self::new(format!("invalid float: {}", e))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Failures reported at the parser boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("No derivation consumes the full input after {attempts} attempts")]
    NoDerivation { attempts: usize },
    #[error("Gave up after {attempts} attempts (limit {limit})")]
    BudgetExhausted { attempts: usize, limit: usize },
    #[error("Reduction of {non_terminal} -> {rule} failed: {source}")]
    Reduction {
        non_terminal: String,
        rule: String,
        source: ReduceError,
    },
}

impl ParseError {
    /// Number of derivations pulled before the failure, when known.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            ParseError::NoDerivation { attempts } => Some(*attempts),
            ParseError::BudgetExhausted { attempts, .. } => Some(*attempts),
            ParseError::Reduction { .. } => None,
        }
    }
}
