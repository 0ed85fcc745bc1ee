//! Text-to-value entry point.
//!
//! A [`Frontend`] pairs a [`Lexer`] with a [`Parser`] built for the terminals
//! that lexer produces, and runs both stages on raw text.

use crate::analyzer::{FromToken, GrammarError, Grammar, Parsed, Parser};
use crate::config::Config;
use crate::error::InternalResult;
use crate::tokenizer::Lexer;

#[derive(Debug)]
pub struct Frontend<V> {
    lexer: Lexer,
    parser: Parser<V>,
}

impl<V> Frontend<V>
where
    V: Clone + FromToken + 'static,
{
    /// Fails with [`GrammarError::UnregisteredTerminal`] when the grammar uses
    /// a terminal the lexer never emits, since no input could ever match it.
    pub fn new(lexer: Lexer, parser: Parser<V>) -> InternalResult<Self> {
        if let Some(missing) = parser
            .grammar()
            .terminals()
            .into_iter()
            .find(|terminal| !lexer.produces(terminal))
        {
            return Err(GrammarError::UnregisteredTerminal {
                name: missing.name().to_string(),
            }
            .into());
        }
        Ok(Self { lexer, parser })
    }

    /// Builds the parser from `grammar` with the parser section of `config`.
    pub fn with_config(lexer: Lexer, grammar: Grammar<V>, config: &Config) -> InternalResult<Self> {
        Self::new(lexer, Parser::with_config(grammar, config.parser.clone()))
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn parser(&self) -> &Parser<V> {
        &self.parser
    }

    pub fn parse(&self, text: &str) -> InternalResult<V> {
        self.parse_counted(text).map(|parsed| parsed.value)
    }

    #[tracing::instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn parse_counted(&self, text: &str) -> InternalResult<Parsed<V>> {
        let tokens = self.lexer.tokenize(text)?;
        tracing::debug!("{} tokens", tokens.len());
        Ok(self.parser.parse(&tokens)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analyzer::{GrammarBuilder, ParseError};
    use crate::error::Error;
    use crate::tokenizer::{Terminal, TokenizerError};

    fn sum_grammar(int: &std::sync::Arc<Terminal>, plus: &std::sync::Arc<Terminal>) -> Grammar<String> {
        let mut builder = GrammarBuilder::<String>::new();
        let expr = builder.non_terminal("Expr");
        builder
            .rule(expr, vec![int.into()], |mut v| v.remove(0))
            .try_rule(expr, vec![expr.into(), plus.into(), int.into()], |v| {
                Ok((v[0].parse::<i64>()? + v[2].parse::<i64>()?).to_string())
            })
            .start(expr);
        builder.build().unwrap()
    }

    #[test]
    fn test_parse_text() {
        let mut lexer = Lexer::new();
        let int = lexer.add_pattern("INT", "[0-9]+").unwrap();
        let plus = lexer.add_pattern("PLUS", "\\+").unwrap();
        let frontend = Frontend::new(lexer, Parser::new(sum_grammar(&int, &plus))).unwrap();

        assert_eq!(frontend.parse("1 + 2 + 3"), Ok("6".to_string()));
        assert_eq!(frontend.parse_counted("40+2").map(|p| p.attempts), Ok(2));
    }

    #[test]
    fn test_stages_report_their_errors() {
        let mut lexer = Lexer::new();
        let int = lexer.add_pattern("INT", "[0-9]+").unwrap();
        let plus = lexer.add_pattern("PLUS", "\\+").unwrap();
        let frontend = Frontend::new(lexer, Parser::new(sum_grammar(&int, &plus))).unwrap();

        assert_eq!(
            frontend.parse("1 + x"),
            Err(Error::Tokenize(TokenizerError::UnexpectedLexeme {
                line: 1,
                column: 5,
                lexeme: "x".to_string()
            }))
        );
        assert_eq!(
            frontend.parse("1 +"),
            Err(Error::Parse(ParseError::NoDerivation { attempts: 1 }))
        );
    }

    #[test]
    fn test_rejects_unregistered_terminal() {
        let mut lexer = Lexer::new();
        let int = lexer.add_pattern("INT", "[0-9]+").unwrap();
        let plus = Terminal::new("PLUS", "\\+").unwrap();
        let result = Frontend::new(lexer, Parser::new(sum_grammar(&int, &plus)));
        assert!(matches!(
            result,
            Err(Error::Grammar(GrammarError::UnregisteredTerminal { ref name })) if name == "PLUS"
        ));
    }
}
