#![allow(dead_code)]

use std::sync::Arc;

use lexparse::analyzer::prelude::*;
use lexparse::tokenizer::{Lexer, Terminal};
use lexparse::value::reducers;
use lexparse::{Frontend, Value};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

pub struct Tokens {
    pub lexer: Lexer,
    pub int: Arc<Terminal>,
    pub plus: Arc<Terminal>,
    pub minus: Arc<Terminal>,
    pub star: Arc<Terminal>,
    pub slash: Arc<Terminal>,
    pub lparen: Arc<Terminal>,
    pub rparen: Arc<Terminal>,
}

impl Tokens {
    pub fn arithmetic() -> Self {
        let mut lexer = Lexer::new();
        let int = lexer.add_pattern("INT", "[0-9]+").unwrap();
        let plus = lexer.add_pattern("PLUS", "\\+").unwrap();
        let minus = lexer.add_pattern("MINUS", "-").unwrap();
        let star = lexer.add_pattern("STAR", "\\*").unwrap();
        let slash = lexer.add_pattern("SLASH", "/").unwrap();
        let lparen = lexer.add_pattern("LPAREN", "\\(").unwrap();
        let rparen = lexer.add_pattern("RPAREN", "\\)").unwrap();
        Self {
            lexer,
            int,
            plus,
            minus,
            star,
            slash,
            lparen,
            rparen,
        }
    }
}

fn binary(
    op: fn(i64, i64) -> Option<i64>,
) -> impl Fn(Vec<Value>) -> Result<Value, ReduceError> + Send + Sync + 'static {
    move |v| {
        let (lhs, rhs) = (v[0].to_int()?, v[2].to_int()?);
        op(lhs, rhs)
            .map(Value::Int)
            .ok_or_else(|| ReduceError::new(format!("cannot evaluate {} {} {}", lhs, v[1], rhs)))
    }
}

/// Expr   -> Expr PLUS Term | Expr MINUS Term | Term
/// Term   -> Term STAR Factor | Term SLASH Factor | Factor
/// Factor -> INT | LPAREN Expr RPAREN
pub fn calculator() -> Frontend<Value> {
    let tokens = Tokens::arithmetic();
    let mut builder = GrammarBuilder::<Value>::new();
    let expr = builder.non_terminal("Expr");
    let term = builder.non_terminal("Term");
    let factor = builder.non_terminal("Factor");

    builder
        .add_rule(
            expr,
            rule(vec![nt(expr), t(&tokens.plus), nt(term)]).try_reduce(binary(i64::checked_add)),
        )
        .add_rule(
            expr,
            rule(vec![nt(expr), t(&tokens.minus), nt(term)]).try_reduce(binary(i64::checked_sub)),
        )
        .add_rule(expr, rule(vec![nt(term)]).reduce(reducers::pick(0)))
        .add_rule(
            term,
            rule(vec![nt(term), t(&tokens.star), nt(factor)]).try_reduce(binary(i64::checked_mul)),
        )
        .add_rule(
            term,
            rule(vec![nt(term), t(&tokens.slash), nt(factor)]).try_reduce(binary(i64::checked_div)),
        )
        .add_rule(term, rule(vec![nt(factor)]).reduce(reducers::pick(0)))
        .try_rule(factor, vec![t(&tokens.int)], |v| Ok(Value::Int(v[0].to_int()?)))
        .add_rule(
            factor,
            rule(vec![t(&tokens.lparen), nt(expr), t(&tokens.rparen)]).reduce(reducers::pick(1)),
        )
        .start(expr);

    Frontend::new(tokens.lexer, Parser::new(builder.build().unwrap())).unwrap()
}

pub fn sum_parser(tokens: &Tokens) -> Parser<String> {
    Parser::new(sum_grammar(tokens))
}

/// Expr -> INT | Expr PLUS INT, over plain token text.
pub fn sum_grammar(tokens: &Tokens) -> Grammar<String> {
    let mut builder = GrammarBuilder::<String>::new();
    let expr = builder.non_terminal("Expr");
    builder
        .rule(expr, vec![t(&tokens.int)], |mut v| v.remove(0))
        .try_rule(expr, vec![nt(expr), t(&tokens.plus), t(&tokens.int)], |v| {
            Ok((v[0].parse::<i64>()? + v[2].parse::<i64>()?).to_string())
        })
        .start(expr);
    builder.build().unwrap()
}
