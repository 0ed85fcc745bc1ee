use std::sync::Arc;

use crate::tokenizer::Terminal;

pub use super::core::{FromToken, ParseError, ReduceError};
pub use super::grammar::{Grammar, GrammarBuilder, NonTerminalId, Rule, Symbol};
pub use super::parser::{Parsed, Parser};

pub fn t(terminal: &Arc<Terminal>) -> Symbol {
    Symbol::Terminal(terminal.clone())
}

pub fn nt(id: NonTerminalId) -> Symbol {
    Symbol::NonTerminal(id)
}

pub fn rule<V>(symbols: Vec<Symbol>) -> Rule<V> {
    Rule::pattern(symbols)
}
