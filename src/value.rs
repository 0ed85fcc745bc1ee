//! Dynamic parse values.
//!
//! [`Value`] lets a grammar build a tree without a dedicated value type:
//! terminals become [`Value::Text`] and reducers from [`reducers`] assemble
//! nodes and lists. The tree serializes to JSON for external tools.

use std::fmt;

use serde::Serialize;

use crate::analyzer::{FromToken, ReduceError};
use crate::tokenizer::TokenInstance;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Node { kind: String, children: Vec<Value> },
}

impl Value {
    pub fn node(kind: impl Into<String>, children: Vec<Value>) -> Self {
        Value::Node {
            kind: kind.into(),
            children,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer view; text is parsed on demand.
    pub fn to_int(&self) -> Result<i64, ReduceError> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Text(text) => Ok(text.parse::<i64>()?),
            other => Err(ReduceError::new(format!("expected an integer, found {}", other))),
        }
    }

    /// Float view; integers widen and text is parsed on demand.
    pub fn to_float(&self) -> Result<f64, ReduceError> {
        match self {
            Value::Float(x) => Ok(*x),
            Value::Int(n) => Ok(*n as f64),
            Value::Text(text) => Ok(text.parse::<f64>()?),
            other => Err(ReduceError::new(format!("expected a number, found {}", other))),
        }
    }
}

impl FromToken for Value {
    fn from_token(token: &TokenInstance) -> Self {
        Value::Text(token.text.clone())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

fn write_all(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{}", text),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                write_all(f, items)?;
                write!(f, "]")
            }
            Value::Node { kind, children } => {
                write!(f, "({}", kind)?;
                if !children.is_empty() {
                    write!(f, " ")?;
                    write_all(f, children)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Ready-made reduction functions over [`Value`].
pub mod reducers {
    use super::Value;

    /// Wraps every child in a node named `kind`.
    pub fn node(kind: &str) -> impl Fn(Vec<Value>) -> Value + Send + Sync + 'static {
        let kind = kind.to_string();
        move |children| Value::node(kind.clone(), children)
    }

    /// Collects the children into a list, splicing a leading list so that
    /// left-recursive rules build one flat list.
    pub fn list() -> impl Fn(Vec<Value>) -> Value + Send + Sync + 'static {
        |children| {
            let mut items = Vec::with_capacity(children.len());
            for (i, child) in children.into_iter().enumerate() {
                match child {
                    Value::List(head) if i == 0 => items.extend(head),
                    other => items.push(other),
                }
            }
            Value::List(items)
        }
    }

    /// Keeps only the child at `index`; typical for parenthesized forms.
    pub fn pick(index: usize) -> impl Fn(Vec<Value>) -> Value + Send + Sync + 'static {
        move |mut children| {
            if index < children.len() {
                children.swap_remove(index)
            } else {
                Value::List(children)
            }
        }
    }
}
