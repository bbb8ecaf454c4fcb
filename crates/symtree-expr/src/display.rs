//! InputForm-style rendering, used in diagnostics and test failures.

use std::fmt;

use crate::expr::{Atom, Expr, Node};
use crate::symbol::heads;

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Integer(i) => write!(f, "{i}"),
            Atom::Real(r) => write!(f, "{r:?}"),
            Atom::Str(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Atom::Symbol(s) => write!(f, "{s}"),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Atom(atom) => write!(f, "{atom}"),
            Node::Association(rules) => {
                f.write_str("<|")?;
                write_seq(f, rules)?;
                f.write_str("|>")
            }
            Node::Composite { head, args } => {
                if head.is(heads::LIST) {
                    f.write_str("{")?;
                    write_seq(f, args)?;
                    return f.write_str("}");
                }
                if args.len() == 2 && head.is(heads::RULE) {
                    return write!(f, "{} -> {}", args[0], args[1]);
                }
                if args.len() == 2 && head.is(heads::RULE_DELAYED) {
                    return write!(f, "{} :> {}", args[0], args[1]);
                }
                write!(f, "{head}[")?;
                write_seq(f, args)?;
                f.write_str("]")
            }
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
