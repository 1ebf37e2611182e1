//! Validation functions for dotted field paths.

use thiserror::Error;

/// Maximum allowed path string length.
pub const MAX_PATH_LENGTH: usize = 1024;

/// Maximum allowed path depth.
pub const MAX_PATH_DEPTH: usize = 256;

/// Separator between keys of a dotted path.
pub const SEPARATOR: char = '.';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path has an empty key at position {index}")]
    EmptySegment { index: usize },
    #[error("field path key at position {index} contains a '.'")]
    DotInSegment { index: usize },
    #[error("field path is longer than 1024 bytes")]
    TooLong,
    #[error("field path is deeper than 256 keys")]
    TooDeep,
}

/// Validate a dotted field path string.
///
/// # Errors
///
/// Returns an error if:
/// - The path is empty
/// - Any key between dots is empty (leading, trailing or doubled dot)
/// - The path exceeds the maximum length (1024 bytes) or depth (256 keys)
///
/// # Example
///
/// ```
/// use fundlens_path::validate_field_path;
///
/// validate_field_path("fees.management_fee").unwrap();
/// validate_field_path("").unwrap_err();
/// validate_field_path("fees..management_fee").unwrap_err();
/// ```
pub fn validate_field_path(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(PathError::TooLong);
    }
    validate_steps(path.split(SEPARATOR))
}

/// Validate already-split keys.
///
/// Keys must be non-empty and must not contain the separator, otherwise the
/// path could not be written back in dotted form.
pub fn validate_steps<'a, I>(steps: I) -> Result<(), PathError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut depth = 0;
    for (index, step) in steps.into_iter().enumerate() {
        if step.is_empty() {
            return Err(PathError::EmptySegment { index });
        }
        if step.contains(SEPARATOR) {
            return Err(PathError::DotInSegment { index });
        }
        depth = index + 1;
        if depth > MAX_PATH_DEPTH {
            return Err(PathError::TooDeep);
        }
    }
    if depth == 0 {
        return Err(PathError::Empty);
    }
    Ok(())
}
