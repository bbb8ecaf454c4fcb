//! `symtree-delete`: delete the elements at positions of a JSON document.
//!
//! Usage:
//!   symtree-delete '<positions-json>' [--config <file>]
//!
//! The document is read from stdin; the edited document is written to stdout.

use std::io::{self, Read, Write};

use symtree::cli::{delete_json, init_logging, load_options, parse_args, CliError};

fn run() -> Result<String, CliError> {
    let invocation = parse_args(std::env::args().skip(1))?;
    let positions = invocation.arg(0, "a JSON position or list of positions")?;
    let options = load_options(invocation.config.as_deref())?;

    let mut doc = String::new();
    io::stdin()
        .read_to_string(&mut doc)
        .map_err(|e| CliError::Usage(e.to_string()))?;
    delete_json(doc.trim(), positions, &options)
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
