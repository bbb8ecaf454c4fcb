//! Conversion between [`Expr`] and `serde_json::Value`.
//!
//! | JSON | Expression |
//! |------|------------|
//! | array | `List[...]` |
//! | object | association of `"key" -> value` rules |
//! | integer / float | `Integer` / `Real` |
//! | string | `Str` |
//! | `true` / `false` / `null` | `True` / `False` / `Null` |
//! | `{"$symbol": name}` | any other symbol |
//! | `{"$head": name, "$args": [...]}` | any other composite |

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::expr::{Atom, Expr, Node};
use crate::symbol::heads;

const SYMBOL_TAG: &str = "$symbol";
const HEAD_TAG: &str = "$head";
const ARGS_TAG: &str = "$args";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum JsonConvertError {
    #[error("association key {0} is not a string")]
    NonStringKey(Expr),
    #[error("real {0} has no JSON representation")]
    NonFiniteReal(f64),
    #[error("integer {0} is out of range")]
    IntegerOutOfRange(String),
}

/// Convert a JSON value into an expression tree.
pub fn from_json(value: &Value) -> Result<Expr, JsonConvertError> {
    Ok(match value {
        Value::Null => Expr::symbol(heads::NULL),
        Value::Bool(true) => Expr::symbol(heads::TRUE),
        Value::Bool(false) => Expr::symbol(heads::FALSE),
        Value::Number(n) => number_to_expr(n)?,
        Value::String(s) => Expr::string(s.clone()),
        Value::Array(items) => Expr::list(items.iter().map(from_json).collect::<Result<_, _>>()?),
        Value::Object(map) => {
            if let Some(expr) = tagged_to_expr(map)? {
                return Ok(expr);
            }
            // JSON object keys are unique, so the rules can be trusted as-is.
            let rules = map
                .iter()
                .map(|(k, v)| Ok(Expr::rule(Expr::string(k.clone()), from_json(v)?)))
                .collect::<Result<Vec<_>, JsonConvertError>>()?;
            Expr::from_node(Node::Association(rules))
        }
    })
}

fn number_to_expr(n: &Number) -> Result<Expr, JsonConvertError> {
    if let Some(i) = n.as_i64() {
        return Ok(Expr::int(i));
    }
    if n.is_u64() {
        return Err(JsonConvertError::IntegerOutOfRange(n.to_string()));
    }
    match n.as_f64() {
        Some(f) => Ok(Expr::real(f)),
        None => Err(JsonConvertError::IntegerOutOfRange(n.to_string())),
    }
}

fn tagged_to_expr(map: &Map<String, Value>) -> Result<Option<Expr>, JsonConvertError> {
    if map.len() == 1 {
        if let Some(Value::String(name)) = map.get(SYMBOL_TAG) {
            return Ok(Some(Expr::symbol(name.as_str())));
        }
    }
    if map.len() == 2 {
        if let (Some(Value::String(head)), Some(Value::Array(args))) =
            (map.get(HEAD_TAG), map.get(ARGS_TAG))
        {
            let args = args.iter().map(from_json).collect::<Result<Vec<_>, _>>()?;
            return Ok(Some(Expr::composite(head.as_str(), args)));
        }
    }
    Ok(None)
}

/// Convert an expression tree into a JSON value.
pub fn to_json(expr: &Expr) -> Result<Value, JsonConvertError> {
    Ok(match expr.node() {
        Node::Atom(Atom::Integer(i)) => Value::Number((*i).into()),
        Node::Atom(Atom::Real(r)) => Number::from_f64(*r)
            .map(Value::Number)
            .ok_or(JsonConvertError::NonFiniteReal(*r))?,
        Node::Atom(Atom::Str(s)) => Value::String(s.clone()),
        Node::Atom(Atom::Symbol(s)) => {
            if s.is(heads::TRUE) {
                Value::Bool(true)
            } else if s.is(heads::FALSE) {
                Value::Bool(false)
            } else if s.is(heads::NULL) {
                Value::Null
            } else {
                let mut map = Map::new();
                map.insert(SYMBOL_TAG.to_string(), Value::String(s.as_str().to_string()));
                Value::Object(map)
            }
        }
        Node::Association(rules) => {
            let mut map = Map::new();
            for rule in rules {
                let (key, value) = match (rule.rule_key(), rule.rule_value()) {
                    (Some(k), Some(v)) => (k, v),
                    _ => continue,
                };
                let key = key
                    .as_str()
                    .ok_or_else(|| JsonConvertError::NonStringKey(key.clone()))?;
                map.insert(key.to_string(), to_json(value)?);
            }
            Value::Object(map)
        }
        Node::Composite { head, args } => {
            let args = args.iter().map(to_json).collect::<Result<Vec<_>, _>>()?;
            if head.is(heads::LIST) {
                Value::Array(args)
            } else {
                let mut map = Map::new();
                map.insert(HEAD_TAG.to_string(), Value::String(head.as_str().to_string()));
                map.insert(ARGS_TAG.to_string(), Value::Array(args));
                Value::Object(map)
            }
        }
    })
}
