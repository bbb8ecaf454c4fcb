//! `symtree-part`: print the part of a JSON document at a pointer.
//!
//! Usage:
//!   symtree-part '<pointer>'
//!
//! Pointer components are 1-based indices (negative from the end) or keys,
//! e.g. `/items/-1/name`. The document is read from stdin.

use std::io::{self, Read, Write};

use symtree::cli::{init_logging, parse_args, part_json, CliError};

fn run() -> Result<String, CliError> {
    let invocation = parse_args(std::env::args().skip(1))?;
    let pointer = invocation.arg(0, "a pointer such as /2/name")?;

    let mut doc = String::new();
    io::stdin()
        .read_to_string(&mut doc)
        .map_err(|e| CliError::Usage(e.to_string()))?;
    part_json(doc.trim(), pointer)
}

fn main() {
    init_logging();
    match run() {
        Ok(result) => {
            let mut out = io::stdout();
            if writeln!(out, "{result}").is_err() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
