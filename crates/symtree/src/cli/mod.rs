//! Command-line glue for the `symtree-*` binaries.
//!
//! - `symtree-insert`: insert a value at positions of a JSON document
//! - `symtree-delete`: delete the elements at positions of a JSON document
//! - `symtree-part`:   extract the part at a pointer
//!
//! Documents and values travel as JSON (see [`symtree_expr::from_json`]);
//! positions are JSON as well: `2`, `[2, "key", -1]` or `[[1], [3]]`.

use std::str::FromStr;

use serde_json::Value;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use symtree_expr::{from_json, to_json, Expr, JsonConvertError};
use symtree_position::{get, parse_pointer, position_spec_from_json, PathParseError};
use thiserror::Error;

use crate::edit::{delete_with, insert_with, ConfigError, EditError, EditOptions};

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "SYMTREE_LOG";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Convert(#[from] JsonConvertError),
    #[error("{0}")]
    Position(#[from] PathParseError),
    #[error("{0}")]
    Edit(#[from] EditError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("{0}")]
    Usage(String),
}

// ── Arguments ─────────────────────────────────────────────────────────────

/// Positional arguments plus the optional `--config <file>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub positional: Vec<String>,
    pub config: Option<String>,
}

impl Invocation {
    /// The `index`-th positional argument, or a usage error naming it.
    pub fn arg(&self, index: usize, what: &str) -> Result<&str, CliError> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("Argument {} must be {what}.", index + 1)))
    }
}

/// Splits raw arguments (without the program name).
///
/// Everything except `--config` is positional, so `-1` is a position.
pub fn parse_args<I>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Invocation::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args
                .next()
                .ok_or_else(|| CliError::Usage("--config needs a file path.".to_string()))?;
            out.config = Some(path);
        } else if let Some(path) = arg.strip_prefix("--config=") {
            out.config = Some(path.to_string());
        } else {
            out.positional.push(arg);
        }
    }
    Ok(out)
}

pub fn load_options(config: Option<&str>) -> Result<EditOptions, CliError> {
    match config {
        Some(path) => Ok(EditOptions::load(path)?),
        None => Ok(EditOptions::default()),
    }
}

// ── Logging ───────────────────────────────────────────────────────────────

/// Level named by `value` (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(value.trim()).ok()
}

/// Logs to stderr at the level from [`LOG_ENV`], `warn` by default.
///
/// Stdout carries the JSON result only.
pub fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(LevelFilter::Warn);
    // A second initialisation keeps the first logger.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

// ── Commands ──────────────────────────────────────────────────────────────

fn parse_doc(json: &str) -> Result<Expr, CliError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(from_json(&value)?)
}

fn render(expr: &Expr) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&to_json(expr)?)?)
}

/// Inserts `value_json` at `positions_json` in `doc_json`.
///
/// Returns the edited document as pretty-printed JSON.
pub fn insert_json(
    doc_json: &str,
    value_json: &str,
    positions_json: &str,
    options: &EditOptions,
) -> Result<String, CliError> {
    let doc = parse_doc(doc_json)?;
    let value = parse_doc(value_json)?;
    let positions = position_spec_from_json(&serde_json::from_str(positions_json)?)?;
    let edited = insert_with(&doc, &value, &positions, options)?;
    render(&edited)
}

/// Deletes the elements at `positions_json` from `doc_json`.
pub fn delete_json(
    doc_json: &str,
    positions_json: &str,
    options: &EditOptions,
) -> Result<String, CliError> {
    let doc = parse_doc(doc_json)?;
    let positions = position_spec_from_json(&serde_json::from_str(positions_json)?)?;
    let edited = delete_with(&doc, &positions, options)?;
    render(&edited)
}

/// The part of `doc_json` at `pointer` (`/2/name/-1`; empty for the root).
pub fn part_json(doc_json: &str, pointer: &str) -> Result<String, CliError> {
    let doc = parse_doc(doc_json)?;
    let path = parse_pointer(pointer)?;
    let part = get(&doc, &path).ok_or_else(|| CliError::NotFound(pointer.to_string()))?;
    render(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_extracts_config() {
        let inv = parse_args(args(&["[1]", "--config", "opts.toml", "-1"])).unwrap();
        assert_eq!(inv.positional, args(&["[1]", "-1"]));
        assert_eq!(inv.config.as_deref(), Some("opts.toml"));

        let inv = parse_args(args(&["--config=a.toml"])).unwrap();
        assert_eq!(inv.config.as_deref(), Some("a.toml"));
        assert!(inv.arg(0, "a position").is_err());
    }

    #[test]
    fn parse_args_requires_config_value() {
        assert!(matches!(
            parse_args(args(&["--config"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn levels() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("OFF"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn insert_into_array() {
        let out = insert_json("[1, 2, 3]", "0", "[[2], [2]]", &EditOptions::default()).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v, serde_json::json!([1, 0, 0, 2, 3]));
    }

    #[test]
    fn delete_by_key() {
        let out = delete_json(r#"{"a": 1, "b": [1, 2]}"#, r#"["b", -1]"#, &EditOptions::default())
            .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v, serde_json::json!({"a": 1, "b": [1]}));
    }

    #[test]
    fn part_not_found() {
        let err = part_json("[1]", "/2").unwrap_err();
        assert_eq!(err.to_string(), "NOT_FOUND: /2");
        assert_eq!(part_json("[1, [2]]", "/2/1").unwrap().trim(), "2");
    }

    #[test]
    fn edit_errors_surface_message() {
        let err = insert_json("[1]", "0", "[5]", &EditOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot insert at position 5 in {1}.");
    }
}
