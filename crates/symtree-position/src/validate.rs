//! Validation functions for paths and position sets.

use thiserror::Error;

use crate::types::Step;

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("path of {len} steps exceeds the limit of {max}")]
    PathTooLong { len: usize, max: usize },
    #[error("position {index} of the position set is empty")]
    EmptyPath { index: usize },
}

/// Validate a single path against a depth limit.
///
/// # Example
///
/// ```
/// use symtree_position::{validate_path, Step};
///
/// validate_path(&[Step::Index(1), Step::key("a")], 256).unwrap();
/// validate_path(&vec![Step::Index(1); 300], 256).unwrap_err();
/// ```
pub fn validate_path(path: &[Step], max: usize) -> Result<(), ValidationError> {
    if path.len() > max {
        return Err(ValidationError::PathTooLong {
            len: path.len(),
            max,
        });
    }
    Ok(())
}

/// Validate every path of a position set; empty paths are rejected.
///
/// `index` in [`ValidationError::EmptyPath`] is 1-based.
pub fn validate_position_set(paths: &[Vec<Step>], max: usize) -> Result<(), ValidationError> {
    for (i, path) in paths.iter().enumerate() {
        if path.is_empty() {
            return Err(ValidationError::EmptyPath { index: i + 1 });
        }
        validate_path(path, max)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_short_path() {
        assert!(validate_path(&[Step::Index(1), Step::Index(2)], MAX_PATH_LENGTH).is_ok());
    }

    #[test]
    fn test_validate_long_path() {
        let path: Vec<Step> = (1..=300).map(Step::Index).collect();
        assert_eq!(
            validate_path(&path, MAX_PATH_LENGTH),
            Err(ValidationError::PathTooLong { len: 300, max: 256 })
        );
    }

    #[test]
    fn test_validate_max_length_path() {
        let path: Vec<Step> = (1..=256).map(Step::Index).collect();
        assert!(validate_path(&path, MAX_PATH_LENGTH).is_ok());
    }

    #[test]
    fn test_validate_position_set_empty_path() {
        let set = vec![vec![Step::Index(1)], vec![]];
        assert_eq!(
            validate_position_set(&set, MAX_PATH_LENGTH),
            Err(ValidationError::EmptyPath { index: 2 })
        );
    }
}
