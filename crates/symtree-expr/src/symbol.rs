//! Interned-by-value symbol names.

use std::fmt;
use std::sync::Arc;

/// Head names the editing core treats specially.
pub mod heads {
    pub const LIST: &str = "List";
    pub const RULE: &str = "Rule";
    pub const RULE_DELAYED: &str = "RuleDelayed";
    pub const KEY: &str = "Key";
    pub const TRUE: &str = "True";
    pub const FALSE: &str = "False";
    pub const NULL: &str = "Null";
}

/// A symbol name such as `List`, `f` or `x`.
///
/// Cloning shares the name buffer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        &*self.0 == name
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.is(other)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
