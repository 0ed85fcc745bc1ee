//! # Grammar Model
//!
//! A [`Grammar`] is an arena of [`NonTerminal`]s addressed by
//! [`NonTerminalId`]. Rules refer to other symbols through a [`Symbol`], which
//! is either a shared [`Terminal`] or the id of a non-terminal, so recursive
//! grammars form a cyclic graph without any ownership cycle.
//!
//! Grammars are assembled with a [`GrammarBuilder`] and checked once by
//! [`GrammarBuilder::build`]. A built grammar is immutable and can be shared
//! between any number of parses, on any number of threads.
//!
//! ## Enumeration
//!
//! * A terminal yields one derivation when the token at `start` is one of its
//!   instances.
//! * A rule enumerates, with an [`Odometer`], every chain of derivations of its
//!   symbols where each symbol starts where the previous one stopped, and
//!   reduces every complete chain into one value.
//! * A non-terminal merges its rules' streams, round-robin by default.
//!
//! When a rule starts with a non-terminal and contains a terminal later on, the
//! first such terminal is its *hint*. The leading non-terminal can only end
//! before the last occurrence of the hint in the range, so its search range is
//! cut there. Since every derivation consumes at least one token, the cut is
//! exact, and it is what makes left-recursive rules terminate: each recursive
//! call sees a strictly shorter range.

use std::collections::HashMap;
use std::fmt;
use std::iter;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{Alternation, GrammarConfig};
use crate::tokenizer::{Terminal, TokenInstance};

use super::combinators::{sequential, Interleave, Odometer, WheelBuilder};
use super::core::{Derivation, Derivations, FromToken, ParseError, ReduceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminalId(usize);

impl NonTerminalId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A grammar symbol: the two variants share the parse contract of
/// [`Symbol::parse`].
#[derive(Debug, Clone)]
pub enum Symbol {
    Terminal(Arc<Terminal>),
    NonTerminal(NonTerminalId),
}

impl From<Arc<Terminal>> for Symbol {
    fn from(terminal: Arc<Terminal>) -> Self {
        Symbol::Terminal(terminal)
    }
}

impl From<&Arc<Terminal>> for Symbol {
    fn from(terminal: &Arc<Terminal>) -> Self {
        Symbol::Terminal(terminal.clone())
    }
}

impl From<NonTerminalId> for Symbol {
    fn from(id: NonTerminalId) -> Self {
        Symbol::NonTerminal(id)
    }
}

/// The grammar and the token slice a parse runs against.
pub struct ParseContext<'p, V> {
    pub grammar: &'p Grammar<V>,
    pub tokens: &'p [TokenInstance],
}

impl<V> Clone for ParseContext<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ParseContext<'_, V> {}

impl<'p, V> ParseContext<'p, V> {
    pub fn new(grammar: &'p Grammar<V>, tokens: &'p [TokenInstance]) -> Self {
        Self { grammar, tokens }
    }
}

impl Symbol {
    /// Every derivation starting exactly at `start` and ending at or before
    /// `end`.
    pub fn parse<'p, V>(
        &'p self,
        ctx: ParseContext<'p, V>,
        start: usize,
        end: usize,
    ) -> Derivations<'p, V>
    where
        V: Clone + FromToken + 'static,
    {
        self.parse_hinted(ctx, start, end, None)
    }

    /// Same as [`Symbol::parse`]; `hint` may only shrink the searched range.
    pub fn parse_hinted<'p, V>(
        &'p self,
        ctx: ParseContext<'p, V>,
        start: usize,
        end: usize,
        hint: Option<&'p Arc<Terminal>>,
    ) -> Derivations<'p, V>
    where
        V: Clone + FromToken + 'static,
    {
        match self {
            Symbol::Terminal(terminal) => parse_terminal(terminal, ctx, start, end),
            Symbol::NonTerminal(id) => ctx.grammar.non_terminal(*id).parse_hinted(ctx, start, end, hint),
        }
    }

    pub fn as_terminal(&self) -> Option<&Arc<Terminal>> {
        match self {
            Symbol::Terminal(terminal) => Some(terminal),
            Symbol::NonTerminal(_) => None,
        }
    }
}

fn parse_terminal<'p, V>(
    terminal: &Arc<Terminal>,
    ctx: ParseContext<'p, V>,
    start: usize,
    end: usize,
) -> Derivations<'p, V>
where
    V: FromToken + 'static,
{
    match ctx.tokens.get(start) {
        Some(token) if start < end && token.is(terminal) => Box::new(iter::once_with(move || {
            Ok(Derivation::new(V::from_token(token), start + 1))
        })),
        _ => Box::new(iter::empty()),
    }
}

pub type Reducer<V> = Arc<dyn Fn(Vec<V>) -> Result<V, ReduceError> + Send + Sync>;

/// One alternative of a non-terminal: a symbol sequence and its reduction.
pub struct Rule<V> {
    symbols: Vec<Symbol>,
    reducer: Option<Reducer<V>>,
    hint: Option<Arc<Terminal>>,
    owner: String,
    label: String,
}

impl<V> Rule<V> {
    pub fn pattern(symbols: Vec<Symbol>) -> Self {
        let hint = symbols.iter().find_map(Symbol::as_terminal).cloned();
        Self {
            symbols,
            reducer: None,
            hint,
            owner: String::new(),
            label: String::new(),
        }
    }

    pub fn reduce(self, f: impl Fn(Vec<V>) -> V + Send + Sync + 'static) -> Self {
        self.try_reduce(move |values| Ok(f(values)))
    }

    pub fn try_reduce(
        mut self,
        f: impl Fn(Vec<V>) -> Result<V, ReduceError> + Send + Sync + 'static,
    ) -> Self {
        self.reducer = Some(Arc::new(f));
        self
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// First terminal of the sequence, used to bound the leading symbol.
    pub fn hint(&self) -> Option<&Arc<Terminal>> {
        self.hint.as_ref()
    }

    pub fn has_reducer(&self) -> bool {
        self.reducer.is_some()
    }

    pub fn parse<'p>(&'p self, ctx: ParseContext<'p, V>, start: usize, end: usize) -> Derivations<'p, V>
    where
        V: Clone + FromToken + 'static,
    {
        if start >= end {
            return Box::new(iter::empty());
        }
        let (Some((first, rest)), Some(reducer)) = (self.symbols.split_first(), self.reducer.as_ref())
        else {
            return Box::new(iter::empty());
        };

        let hint = self.hint.as_ref();
        let builders: Vec<WheelBuilder<'p, Derivation<V>, ParseError>> = rest
            .iter()
            .map(|symbol| -> WheelBuilder<'p, Derivation<V>, ParseError> {
                Box::new(move |previous: &Derivation<V>| symbol.parse(ctx, previous.next, end))
            })
            .collect();
        let odometer = Odometer::new(move || first.parse_hinted(ctx, start, end, hint), builders);

        Box::new(odometer.map(move |chain| {
            let chain = chain?;
            let next = chain.last().map_or(start, |d| d.next);
            let values = chain.into_iter().map(|d| d.value).collect();
            reducer(values)
                .map(|value| Derivation::new(value, next))
                .map_err(|source| ParseError::Reduction {
                    non_terminal: self.owner.clone(),
                    rule: self.label.clone(),
                    source,
                })
        }))
    }
}

impl<V> fmt::Display for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl<V> fmt::Debug for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("owner", &self.owner)
            .field("label", &self.label)
            .field("reducer", &self.reducer.is_some())
            .finish()
    }
}

/// A named set of alternative rules. Rule order is enumeration order.
#[derive(Debug)]
pub struct NonTerminal<V> {
    name: String,
    rules: Vec<Rule<V>>,
    hint_pruning: bool,
    alternation: Alternation,
}

impl<V> NonTerminal<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule<V>] {
        &self.rules
    }

    pub fn hint_pruning(&self) -> bool {
        self.hint_pruning
    }

    pub fn alternation(&self) -> Alternation {
        self.alternation
    }

    pub fn parse<'p>(&'p self, ctx: ParseContext<'p, V>, start: usize, end: usize) -> Derivations<'p, V>
    where
        V: Clone + FromToken + 'static,
    {
        self.parse_hinted(ctx, start, end, None)
    }

    pub fn parse_hinted<'p>(
        &'p self,
        ctx: ParseContext<'p, V>,
        start: usize,
        end: usize,
        hint: Option<&Arc<Terminal>>,
    ) -> Derivations<'p, V>
    where
        V: Clone + FromToken + 'static,
    {
        if start >= end {
            return Box::new(iter::empty());
        }
        let end = match hint {
            Some(hint) if self.hint_pruning => last_occurrence(ctx.tokens, start, end, hint),
            _ => end,
        };

        let streams: Vec<Derivations<'p, V>> =
            self.rules.iter().map(|rule| rule.parse(ctx, start, end)).collect();
        match self.alternation {
            Alternation::RoundRobin => Box::new(Interleave::new(streams)),
            Alternation::Sequential => Box::new(sequential(streams)),
        }
    }
}

/// Index of the last instance of `terminal` in `[start, end)`, or `start`
/// when there is none.
fn last_occurrence(tokens: &[TokenInstance], start: usize, end: usize, terminal: &Arc<Terminal>) -> usize {
    (start..end.min(tokens.len()))
        .rev()
        .find(|&i| tokens[i].is(terminal))
        .unwrap_or(start)
}

/// An immutable, validated grammar with a designated start symbol.
#[derive(Debug)]
pub struct Grammar<V> {
    non_terminals: Vec<NonTerminal<V>>,
    start: Symbol,
}

impl<V> Grammar<V> {
    pub fn start(&self) -> &Symbol {
        &self.start
    }

    /// # Panics
    ///
    /// Panics when `id` was handed out by another builder and is out of range
    /// here; [`Grammar::get`] is the checked form.
    pub fn non_terminal(&self, id: NonTerminalId) -> &NonTerminal<V> {
        &self.non_terminals[id.0]
    }

    pub fn get(&self, id: NonTerminalId) -> Option<&NonTerminal<V>> {
        self.non_terminals.get(id.0)
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = (NonTerminalId, &NonTerminal<V>)> {
        self.non_terminals
            .iter()
            .enumerate()
            .map(|(i, nt)| (NonTerminalId(i), nt))
    }

    pub fn find(&self, name: &str) -> Option<NonTerminalId> {
        self.non_terminals
            .iter()
            .position(|nt| nt.name == name)
            .map(NonTerminalId)
    }

    /// Every distinct terminal the grammar can consume.
    pub fn terminals(&self) -> Vec<Arc<Terminal>> {
        let mut terminals: Vec<Arc<Terminal>> = Vec::new();
        let used = iter::once(&self.start).chain(
            self.non_terminals
                .iter()
                .flat_map(|nt| nt.rules.iter().flat_map(|rule| rule.symbols.iter())),
        );
        for terminal in used.filter_map(Symbol::as_terminal) {
            if !terminals.iter().any(|t| Terminal::same(t, terminal)) {
                terminals.push(terminal.clone());
            }
        }
        terminals
    }

    fn symbol_name<'a>(&'a self, symbol: &'a Symbol) -> &'a str {
        match symbol {
            Symbol::Terminal(terminal) => terminal.name(),
            Symbol::NonTerminal(id) => self.non_terminal(*id).name(),
        }
    }
}

impl<V> fmt::Display for Grammar<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}", self.symbol_name(&self.start))?;
        for nt in &self.non_terminals {
            let alternatives: Vec<&str> = nt.rules.iter().map(|r| r.label.as_str()).collect();
            writeln!(f, "{} ::= {}", nt.name, alternatives.join(" | "))?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    #[error("Rule {non_terminal} -> {rule} has no reduction function")]
    MissingReducer { non_terminal: String, rule: String },
    #[error("Non-terminal {name} is referenced but never defined")]
    UndefinedNonTerminal { name: String },
    #[error("No start symbol designated")]
    MissingStart,
    #[error("Terminal {name} is used by the grammar but never produced by the lexer")]
    UnregisteredTerminal { name: String },
}

pub type GrammarResult<T> = Result<T, GrammarError>;

struct Entry<V> {
    non_terminal: NonTerminal<V>,
    defined: bool,
}

/// Incremental grammar construction.
///
/// Non-terminals can be referenced before they are defined, which is how
/// mutually recursive grammars are written; [`GrammarBuilder::build`] rejects
/// references that were never defined.
pub struct GrammarBuilder<V> {
    entries: Vec<Entry<V>>,
    names: HashMap<String, NonTerminalId>,
    start: Option<Symbol>,
    config: GrammarConfig,
}

impl<V> Default for GrammarBuilder<V> {
    fn default() -> Self {
        Self::with_config(GrammarConfig::default())
    }
}

impl<V> GrammarBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GrammarConfig) -> Self {
        Self {
            entries: Vec::new(),
            names: HashMap::new(),
            start: None,
            config,
        }
    }

    /// Defines the non-terminal `name`, possibly with no rules at all.
    pub fn non_terminal(&mut self, name: &str) -> NonTerminalId {
        let id = self.reference(name);
        self.entries[id.0].defined = true;
        id
    }

    /// Refers to `name` without defining it.
    pub fn reference(&mut self, name: &str) -> NonTerminalId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }
        let id = NonTerminalId(self.entries.len());
        self.entries.push(Entry {
            non_terminal: NonTerminal {
                name: name.to_string(),
                rules: Vec::new(),
                hint_pruning: self.config.hint_pruning,
                alternation: self.config.alternation,
            },
            defined: false,
        });
        self.names.insert(name.to_string(), id);
        id
    }

    /// Appends `rule` as the lowest-priority alternative of `lhs`.
    ///
    /// # Panics
    ///
    /// Panics when `lhs` or a non-terminal in `rule` was not handed out by
    /// this builder. The same holds for [`GrammarBuilder::set_hint_pruning`]
    /// and [`GrammarBuilder::set_alternation`].
    pub fn add_rule(&mut self, lhs: NonTerminalId, mut rule: Rule<V>) -> &mut Self {
        let names: Vec<&str> = rule
            .symbols
            .iter()
            .map(|symbol| match symbol {
                Symbol::Terminal(terminal) => terminal.name(),
                Symbol::NonTerminal(id) => self.entries[id.0].non_terminal.name.as_str(),
            })
            .collect();
        rule.label = names.join(" ");

        let entry = &mut self.entries[lhs.0];
        entry.defined = true;
        rule.owner = entry.non_terminal.name.clone();
        if rule.symbols.is_empty() {
            tracing::warn!("rule of {} has no symbols; it will never match", rule.owner);
        }
        entry.non_terminal.rules.push(rule);
        self
    }

    /// Appends the rule `lhs -> symbols` reduced by `reduce`.
    ///
    /// The value type is fixed by the builder, so the closure needs no
    /// annotations even when it indexes its arguments.
    pub fn rule(
        &mut self,
        lhs: NonTerminalId,
        symbols: Vec<Symbol>,
        reduce: impl Fn(Vec<V>) -> V + Send + Sync + 'static,
    ) -> &mut Self {
        self.add_rule(lhs, Rule::pattern(symbols).reduce(reduce))
    }

    /// Like [`GrammarBuilder::rule`] with a reduction that may fail.
    pub fn try_rule(
        &mut self,
        lhs: NonTerminalId,
        symbols: Vec<Symbol>,
        reduce: impl Fn(Vec<V>) -> Result<V, ReduceError> + Send + Sync + 'static,
    ) -> &mut Self {
        self.add_rule(lhs, Rule::pattern(symbols).try_reduce(reduce))
    }

    pub fn set_hint_pruning(&mut self, id: NonTerminalId, enabled: bool) -> &mut Self {
        self.entries[id.0].non_terminal.hint_pruning = enabled;
        self
    }

    pub fn set_alternation(&mut self, id: NonTerminalId, alternation: Alternation) -> &mut Self {
        self.entries[id.0].non_terminal.alternation = alternation;
        self
    }

    pub fn start(&mut self, symbol: impl Into<Symbol>) -> &mut Self {
        self.start = Some(symbol.into());
        self
    }

    pub fn build(self) -> GrammarResult<Grammar<V>> {
        let start = self.start.ok_or(GrammarError::MissingStart)?;

        let mut non_terminals = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            let nt = entry.non_terminal;
            if !entry.defined {
                return Err(GrammarError::UndefinedNonTerminal { name: nt.name });
            }
            if let Some(rule) = nt.rules.iter().find(|rule| !rule.has_reducer()) {
                return Err(GrammarError::MissingReducer {
                    non_terminal: nt.name.clone(),
                    rule: rule.label.clone(),
                });
            }
            non_terminals.push(nt);
        }

        let grammar = Grammar {
            non_terminals,
            start,
        };
        tracing::debug!("built grammar\n{}", grammar);
        Ok(grammar)
    }
}
