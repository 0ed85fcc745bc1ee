use crate::config::ParserConfig;
use crate::tokenizer::TokenInstance;

use super::core::{Derivations, FromToken, ParseError, ParseResult};
use super::grammar::{Grammar, ParseContext};

/// Accepted parse: the value and the number of derivations pulled to find it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<V> {
    pub value: V,
    pub attempts: usize,
}

/// Drives a grammar's start symbol over a whole token sequence.
///
/// The first derivation that consumes every token wins; the enumeration order
/// of the grammar is what disambiguates.
#[derive(Debug)]
pub struct Parser<V> {
    grammar: Grammar<V>,
    config: ParserConfig,
}

impl<V> Parser<V>
where
    V: Clone + FromToken + 'static,
{
    pub fn new(grammar: Grammar<V>) -> Self {
        Self::with_config(grammar, ParserConfig::default())
    }

    pub fn with_config(grammar: Grammar<V>, config: ParserConfig) -> Self {
        Self { grammar, config }
    }

    pub fn grammar(&self) -> &Grammar<V> {
        &self.grammar
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Every derivation of the start symbol from the first token, complete or
    /// not, in enumeration order.
    pub fn derivations<'p>(&'p self, tokens: &'p [TokenInstance]) -> Derivations<'p, V> {
        let ctx = ParseContext::new(&self.grammar, tokens);
        self.grammar.start().parse(ctx, 0, tokens.len())
    }

    #[tracing::instrument(level = "debug", skip(self, tokens), fields(tokens = tokens.len()))]
    pub fn parse(&self, tokens: &[TokenInstance]) -> ParseResult<Parsed<V>> {
        let mut attempts = 0;
        for step in self.derivations(tokens) {
            attempts += 1;
            let derivation = step?;
            if derivation.next == tokens.len() {
                tracing::debug!("parse success after {} attempts", attempts);
                return Ok(Parsed {
                    value: derivation.value,
                    attempts,
                });
            }
            if let Some(limit) = self.config.max_attempts {
                if attempts >= limit {
                    tracing::debug!("giving up after {} attempts", attempts);
                    return Err(ParseError::BudgetExhausted { attempts, limit });
                }
            }
        }
        tracing::debug!("no full derivation after {} attempts", attempts);
        Err(ParseError::NoDerivation { attempts })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analyzer::core::ReduceError;
    use crate::analyzer::grammar::GrammarBuilder;
    use crate::tokenizer::{Lexer, Terminal};

    struct Calculator {
        lexer: Lexer,
        int: Arc<Terminal>,
        plus: Arc<Terminal>,
        slash: Arc<Terminal>,
    }

    impl Calculator {
        fn new() -> Self {
            let mut lexer = Lexer::new();
            let int = lexer.add_pattern("INT", "[0-9]+").unwrap();
            let plus = lexer.add_pattern("PLUS", "\\+").unwrap();
            let slash = lexer.add_pattern("SLASH", "/").unwrap();
            Self {
                lexer,
                int,
                plus,
                slash,
            }
        }

        /// Expr -> INT | Expr PLUS INT | Expr SLASH INT
        fn grammar(&self) -> Grammar<String> {
            let mut builder = GrammarBuilder::<String>::new();
            let expr = builder.non_terminal("Expr");
            builder
                .rule(expr, vec![(&self.int).into()], |mut v| v.remove(0))
                .try_rule(expr, vec![expr.into(), (&self.plus).into(), (&self.int).into()], |v| {
                    let sum = v[0].parse::<i64>()? + v[2].parse::<i64>()?;
                    Ok(sum.to_string())
                })
                .try_rule(expr, vec![expr.into(), (&self.slash).into(), (&self.int).into()], |v| {
                    let divisor = v[2].parse::<i64>()?;
                    if divisor == 0 {
                        return Err(ReduceError::new("division by zero"));
                    }
                    Ok((v[0].parse::<i64>()? / divisor).to_string())
                })
                .start(expr);
            builder.build().unwrap()
        }
    }

    #[test]
    fn test_left_recursive_sum() {
        let calc = Calculator::new();
        let parser = Parser::new(calc.grammar());
        let tokens = calc.lexer.tokenize("1+2+3").unwrap();
        let parsed = parser.parse(&tokens).unwrap();
        assert_eq!(
            parsed,
            Parsed {
                value: "6".to_string(),
                attempts: 3
            }
        );
    }

    #[test]
    fn test_derivations_are_lazy_prefixes() {
        let calc = Calculator::new();
        let parser = Parser::new(calc.grammar());
        let tokens = calc.lexer.tokenize("1+2+3").unwrap();
        let prefixes: Vec<(String, usize)> = parser
            .derivations(&tokens)
            .map(|step| step.map(|d| (d.value, d.next)).unwrap())
            .collect();
        assert_eq!(
            prefixes,
            vec![("1".to_string(), 1), ("3".to_string(), 3), ("6".to_string(), 5)]
        );
    }

    #[test]
    fn test_start_without_rules() {
        let calc = Calculator::new();
        let mut builder = GrammarBuilder::<String>::new();
        let start = builder.non_terminal("Start");
        builder.start(start);
        let parser = Parser::new(builder.build().unwrap());
        let tokens = calc.lexer.tokenize("1").unwrap();
        assert_eq!(parser.parse(&tokens), Err(ParseError::NoDerivation { attempts: 0 }));
    }

    #[test]
    fn test_empty_input() {
        let calc = Calculator::new();
        let parser = Parser::new(calc.grammar());
        assert_eq!(parser.parse(&[]), Err(ParseError::NoDerivation { attempts: 0 }));
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        let calc = Calculator::new();
        let parser = Parser::new(calc.grammar());
        let tokens = calc.lexer.tokenize("1+2+").unwrap();
        assert_eq!(parser.parse(&tokens), Err(ParseError::NoDerivation { attempts: 2 }));
    }

    #[test]
    fn test_attempt_budget() {
        let calc = Calculator::new();
        let parser = Parser::with_config(
            calc.grammar(),
            ParserConfig {
                max_attempts: Some(2),
            },
        );
        let tokens = calc.lexer.tokenize("1+2+3").unwrap();
        assert_eq!(
            parser.parse(&tokens),
            Err(ParseError::BudgetExhausted {
                attempts: 2,
                limit: 2
            })
        );

        let parser = Parser::with_config(
            calc.grammar(),
            ParserConfig {
                max_attempts: Some(3),
            },
        );
        assert_eq!(parser.parse(&tokens).map(|p| p.value), Ok("6".to_string()));
    }

    #[test]
    fn test_reduction_error_stops_the_parse() {
        let calc = Calculator::new();
        let parser = Parser::new(calc.grammar());
        let tokens = calc.lexer.tokenize("8/0").unwrap();
        assert_eq!(
            parser.parse(&tokens),
            Err(ParseError::Reduction {
                non_terminal: "Expr".to_string(),
                rule: "Expr SLASH INT".to_string(),
                source: ReduceError::new("division by zero"),
            })
        );

        let tokens = calc.lexer.tokenize("8/2+1").unwrap();
        assert_eq!(parser.parse(&tokens).map(|p| p.value), Ok("5".to_string()));
    }

    #[test]
    fn test_ambiguity_follows_enumeration_order() {
        // E -> E MINUS E | INT, evaluated on 5-2-1: the left-nested reading
        // (5-2)-1 completes first, on the first attempt.
        let mut lexer = Lexer::new();
        let int = lexer.add_pattern("INT", "[0-9]+").unwrap();
        let minus = lexer.add_pattern("MINUS", "-").unwrap();
        let mut builder = GrammarBuilder::<String>::new();
        let e = builder.non_terminal("E");
        builder
            .try_rule(e, vec![e.into(), (&minus).into(), e.into()], |v| {
                Ok((v[0].parse::<i64>()? - v[2].parse::<i64>()?).to_string())
            })
            .rule(e, vec![(&int).into()], |mut v| v.remove(0))
            .start(e);
        let parser = Parser::new(builder.build().unwrap());
        let tokens = lexer.tokenize("5-2-1").unwrap();
        let parsed = parser.parse(&tokens).unwrap();
        let again = parser.parse(&tokens).unwrap();
        assert_eq!(parsed, again);
        assert_eq!(
            parsed,
            Parsed {
                value: "2".to_string(),
                attempts: 1
            }
        );
    }
}
