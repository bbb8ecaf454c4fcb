use crate::types::{Path, Step};
use crate::PathParseError;

/// Unescapes a pointer component: `~1` becomes `/`, `~0` becomes `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, so that "~01" decodes to "~1" rather than "/".
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer component: `~` becomes `~0`, `/` becomes `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a component spells an integer: optional `-`, then digits
/// without leading zeros.
pub fn is_integer_component(component: &str) -> bool {
    let digits = component.strip_prefix('-').unwrap_or(component);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    !(digits.len() > 1 && digits.starts_with('0'))
}

/// Parse pointer text such as `/2/-1/name` into a path.
///
/// Integer components become index steps, everything else becomes a string
/// key. The empty string is the root (empty path).
pub fn parse_pointer(pointer: &str) -> Result<Path, PathParseError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| PathParseError::InvalidPointer(pointer.to_string()))?;
    rest.split('/')
        .map(|component| {
            if is_integer_component(component) {
                component
                    .parse::<i64>()
                    .map(Step::Index)
                    .map_err(|_| PathParseError::IndexOutOfRange(component.to_string()))
            } else {
                Ok(Step::key(unescape_component(component)))
            }
        })
        .collect()
}

/// Format a path as pointer text.
///
/// Non-string keys have no pointer spelling and are written in InputForm.
pub fn format_pointer(path: &[Step]) -> String {
    let mut out = String::new();
    for step in path {
        out.push('/');
        match step {
            Step::Index(i) => out.push_str(&i.to_string()),
            Step::Key(k) => match k.as_str() {
                Some(s) => out.push_str(&escape_component(s)),
                None => out.push_str(&escape_component(&k.to_string())),
            },
        }
    }
    out
}

/// Format a path the way the host prints positions, e.g. `{2, -1, "a"}`.
pub fn format_path(path: &[Step]) -> String {
    let mut out = String::from("{");
    for (i, step) in path.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&step.to_string());
    }
    out.push('}');
    out
}

/// Check if a path points to the root.
pub fn is_root(path: &[Step]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
pub fn is_child(parent: &[Step], child: &[Step]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}

/// Check if two paths are equal.
pub fn is_path_equal(p1: &[Step], p2: &[Step]) -> bool {
    p1 == p2
}

/// Get the parent path of a given path.
pub fn parent(path: &[Step]) -> Result<Path, PathParseError> {
    if path.is_empty() {
        return Err(PathParseError::NoParent);
    }
    Ok(path[..path.len() - 1].to_vec())
}
