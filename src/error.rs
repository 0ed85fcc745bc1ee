use thiserror::Error;

use crate::analyzer::{GrammarError, ParseError};
use crate::tokenizer::TokenizerError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizerError),
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }
}
