//! Positions from host values: expressions and JSON.
//!
//! An integer is an index step, a string is a key step, `Key[k]` (or the
//! JSON object `{"key": k}`) is a key step with an arbitrary key. A flat list
//! is one path and a non-empty list of lists is a position set.

use serde_json::Value;
use symtree_expr::{from_json, heads, Expr};

use crate::types::{Path, PositionSpec, Step};
use crate::PathParseError;

const KEY_TAG: &str = "key";

pub fn step_from_expr(expr: &Expr) -> Result<Step, PathParseError> {
    if let Some(i) = expr.as_integer() {
        return Ok(Step::Index(i));
    }
    if expr.as_str().is_some() {
        return Ok(Step::Key(expr.clone()));
    }
    if expr.has_head(heads::KEY) && expr.len() == 1 {
        if let Some(key) = expr.arg(1) {
            return Ok(Step::Key(key.clone()));
        }
    }
    Err(PathParseError::NotAStep(expr.to_string()))
}

pub fn path_from_expr(expr: &Expr) -> Result<Path, PathParseError> {
    if expr.is_list() {
        return expr.args().iter().map(step_from_expr).collect();
    }
    Ok(vec![step_from_expr(expr)?])
}

pub fn position_spec_from_expr(expr: &Expr) -> Result<PositionSpec, PathParseError> {
    if expr.is_list() && !expr.is_empty() && expr.args().iter().all(Expr::is_list) {
        let paths = expr
            .args()
            .iter()
            .map(path_from_expr)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(PositionSpec::Many(paths));
    }
    Ok(PositionSpec::Single(path_from_expr(expr)?))
}

pub fn step_from_json(value: &Value) -> Result<Step, PathParseError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Step::Index)
            .ok_or_else(|| PathParseError::IndexOutOfRange(n.to_string())),
        Value::String(s) => Ok(Step::key(s.clone())),
        Value::Object(map) if map.len() == 1 => match map.get(KEY_TAG) {
            Some(key) => from_json(key)
                .map(Step::Key)
                .map_err(|e| PathParseError::NotAStep(e.to_string())),
            None => Err(PathParseError::NotAStep(value.to_string())),
        },
        other => Err(PathParseError::NotAStep(other.to_string())),
    }
}

pub fn path_from_json(value: &Value) -> Result<Path, PathParseError> {
    match value {
        Value::Array(items) => items.iter().map(step_from_json).collect(),
        other => Ok(vec![step_from_json(other)?]),
    }
}

pub fn position_spec_from_json(value: &Value) -> Result<PositionSpec, PathParseError> {
    if let Value::Array(items) = value {
        if !items.is_empty() && items.iter().all(Value::is_array) {
            let paths = items
                .iter()
                .map(path_from_json)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(PositionSpec::Many(paths));
        }
    }
    Ok(PositionSpec::Single(path_from_json(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn steps_from_expressions() {
        assert_eq!(step_from_expr(&Expr::int(-1)).unwrap(), Step::Index(-1));
        assert_eq!(step_from_expr(&Expr::string("a")).unwrap(), Step::key("a"));
        assert_eq!(
            step_from_expr(&Expr::key(Expr::symbol("b"))).unwrap(),
            Step::Key(Expr::symbol("b"))
        );
        assert_eq!(
            step_from_expr(&Expr::symbol("b")),
            Err(PathParseError::NotAStep("b".to_string()))
        );
    }

    #[test]
    fn spec_from_expressions() {
        let single = position_spec_from_expr(&Expr::int(2)).unwrap();
        assert_eq!(single, PositionSpec::Single(vec![Step::Index(2)]));

        let path = Expr::list(vec![Expr::int(1), Expr::string("k")]);
        assert_eq!(
            position_spec_from_expr(&path).unwrap(),
            PositionSpec::Single(vec![Step::Index(1), Step::key("k")])
        );

        let many = Expr::list(vec![
            Expr::list(vec![Expr::int(1)]),
            Expr::list(vec![Expr::int(2), Expr::int(-1)]),
        ]);
        assert_eq!(
            position_spec_from_expr(&many).unwrap(),
            PositionSpec::Many(vec![vec![Step::Index(1)], vec![Step::Index(2), Step::Index(-1)]])
        );

        let with_empty = Expr::list(vec![Expr::list(vec![])]);
        assert_eq!(
            position_spec_from_expr(&with_empty).unwrap(),
            PositionSpec::Many(vec![vec![]])
        );
    }

    #[test]
    fn spec_from_json() {
        assert_eq!(
            position_spec_from_json(&json!(3)).unwrap(),
            PositionSpec::Single(vec![Step::Index(3)])
        );
        assert_eq!(
            position_spec_from_json(&json!([1, "a", {"key": {"$symbol": "s"}}])).unwrap(),
            PositionSpec::Single(vec![Step::Index(1), Step::key("a"), Step::Key(Expr::symbol("s"))])
        );
        assert_eq!(
            position_spec_from_json(&json!([[2], [2]])).unwrap(),
            PositionSpec::Many(vec![vec![Step::Index(2)], vec![Step::Index(2)]])
        );
        assert!(position_spec_from_json(&json!([true])).is_err());
        assert!(position_spec_from_json(&json!([1.5])).is_err());
    }
}
