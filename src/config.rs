use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{Error, InternalResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lexer: LexerConfig,

    #[serde(default)]
    pub grammar: GrammarConfig,

    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexerConfig {
    /// Report registrations that can never produce a token.
    #[serde(default = "default_true")]
    pub diagnostics: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            diagnostics: default_true(),
        }
    }
}

/// Defaults applied to every non-terminal a grammar builder creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarConfig {
    #[serde(default = "default_true")]
    pub hint_pruning: bool,

    #[serde(default)]
    pub alternation: Alternation,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            hint_pruning: default_true(),
            alternation: Alternation::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Abandon the enumeration after this many derivations.
    #[serde(default)]
    pub max_attempts: Option<usize>,
}

/// How a non-terminal merges the derivations of its rules.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Alternation {
    /// One derivation from each rule in turn, skipping exhausted rules.
    #[default]
    RoundRobin,
    /// Every derivation of the first rule, then of the second, and so on.
    Sequential,
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path.as_ref())
        .map_err(|e| Error::Config(format!("failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: Config = from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.lexer.diagnostics);
        assert!(config.grammar.hint_pruning);
        assert_eq!(config.grammar.alternation, Alternation::RoundRobin);
        assert_eq!(config.parser.max_attempts, None);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = from_str(
            r#"{
                "grammar": { "alternation": "sequential" },
                "parser": { "max_attempts": 500 }
            }"#,
        )
        .unwrap();
        assert!(config.grammar.hint_pruning);
        assert_eq!(config.grammar.alternation, Alternation::Sequential);
        assert_eq!(config.parser.max_attempts, Some(500));
    }

    #[test]
    fn test_invalid_config() {
        let result: InternalResult<Config> = from_str(r#"{ "parser": { "max_attempts": "many" } }"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/lexparse.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_alternation_names() {
        for alternation in Alternation::iter() {
            let name = alternation.to_string();
            assert_eq!(Alternation::from_str(&name).unwrap(), alternation);
            let json = serde_json::to_string(&alternation).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
        }
    }
}
